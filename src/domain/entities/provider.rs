//! # Provider Records
//!
//! Provider metadata as kept by the registry backing store.

use crate::domain::value_objects::ProviderId;
use serde::{Deserialize, Serialize};

/// A provider as listed by the provider store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Provider identifier (the dispatch key).
    identifier: ProviderId,
    /// Display name.
    name: String,
    /// Whether the provider is offered to callers.
    active: bool,
}

impl ProviderRecord {
    /// Creates an active provider record.
    #[must_use]
    pub fn new(identifier: ProviderId, name: impl Into<String>) -> Self {
        Self {
            identifier,
            name: name.into(),
            active: true,
        }
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the identifier.
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &ProviderId {
        &self.identifier
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the provider is active.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Pairing metadata linking a provider to a CUPID (carrier) code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCupid {
    /// Provider the code belongs to.
    pub provider_id: ProviderId,
    /// Carrier code.
    pub cupid: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProviderCupid {
    /// Creates a cupid entry without description.
    #[must_use]
    pub fn new(provider_id: ProviderId, cupid: impl Into<String>) -> Self {
        Self {
            provider_id,
            cupid: cupid.into(),
            description: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn records_are_active_by_default() {
        let record = ProviderRecord::new(ProviderId::new("p"), "Provider");
        assert!(record.is_active());
        assert!(!record.with_active(false).is_active());
    }

    #[test]
    fn record_serializes_active_flag() {
        let record = ProviderRecord::new(ProviderId::new("p"), "Provider").with_active(false);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["active"], serde_json::json!(false));
        assert_eq!(value["identifier"], serde_json::json!("p"));
    }
}
