//! # Request Context
//!
//! Persisted context of a quote request, used to pick markup rules.

use crate::domain::value_objects::{RequestId, UserType};
use serde::{Deserialize, Serialize};

/// Stored context of an originating quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Request identifier.
    pub request_id: RequestId,
    /// Quote type of the requesting user, if recorded.
    #[serde(default)]
    pub quote_type_id: Option<UserType>,
}

impl RequestContext {
    /// Creates a context with a known quote type.
    #[must_use]
    pub fn new(request_id: RequestId, quote_type_id: UserType) -> Self {
        Self {
            request_id,
            quote_type_id: Some(quote_type_id),
        }
    }

    /// Returns the quote type, or `fallback` when none is recorded.
    #[must_use]
    pub fn user_type_or(&self, fallback: UserType) -> UserType {
        self.quote_type_id.unwrap_or(fallback)
    }
}
