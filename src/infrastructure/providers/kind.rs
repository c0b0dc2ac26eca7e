//! # Provider Kinds
//!
//! The closed set of supported connectivity providers and their dispatch
//! traits.
//!
//! Each kind decides three things for the gateway:
//!
//! - how contract terms are sent ([`TermDispatch`]): one call per term, or
//!   one call carrying the whole list
//! - whether the provider's API supports debug passthrough
//! - which provider-specific normalization runs before pricing
//!
//! # Examples
//!
//! ```
//! use provider_gateway::infrastructure::providers::kind::{ProviderKind, TermDispatch};
//!
//! assert_eq!(ProviderKind::Neos.term_dispatch(), TermDispatch::PerTerm);
//! assert!(!ProviderKind::Colt.supports_debug());
//! assert_eq!("virgin_media".parse::<ProviderKind>().unwrap(), ProviderKind::VirginMedia);
//! ```

use crate::domain::entities::RawQuote;
use crate::domain::errors::DomainResult;
use crate::infrastructure::providers::error::ProviderError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CityFibre product type that is never offered.
pub const CITYFIBRE_EXCLUDED_PRODUCT: &str = "GPON";

/// Months per year, used to annualize CityFibre rental.
pub const MONTHS_PER_YEAR: i64 = 12;

/// How a provider expects contract terms to be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermDispatch {
    /// One upstream call per term; replies are concatenated.
    PerTerm,
    /// One upstream call with every term.
    Batched,
}

/// Supported connectivity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Neos Networks.
    Neos,
    /// TalkTalk Business.
    #[serde(rename = "talktalk")]
    TalkTalk,
    /// CityFibre.
    #[serde(rename = "cityfibre")]
    CityFibre,
    /// Virgin Media Business.
    VirginMedia,
    /// Colt.
    Colt,
    /// Sky Business.
    Sky,
    /// BT Wholesale.
    Bt,
    /// ITS Technology.
    Its,
}

impl ProviderKind {
    /// Every provider kind.
    pub const ALL: [Self; 8] = [
        Self::Neos,
        Self::TalkTalk,
        Self::CityFibre,
        Self::VirginMedia,
        Self::Colt,
        Self::Sky,
        Self::Bt,
        Self::Its,
    ];

    /// Returns the configuration key (e.g. `"virgin_media"`).
    #[must_use]
    pub const fn config_key(&self) -> &'static str {
        match self {
            Self::Neos => "neos",
            Self::TalkTalk => "talktalk",
            Self::CityFibre => "cityfibre",
            Self::VirginMedia => "virgin_media",
            Self::Colt => "colt",
            Self::Sky => "sky",
            Self::Bt => "bt",
            Self::Its => "its",
        }
    }

    /// Returns the display name used in caller-facing messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Neos => "Neos",
            Self::TalkTalk => "TalkTalk",
            Self::CityFibre => "CityFibre",
            Self::VirginMedia => "Virgin Media",
            Self::Colt => "Colt",
            Self::Sky => "Sky",
            Self::Bt => "BT",
            Self::Its => "ITS",
        }
    }

    /// Returns how terms are sent upstream.
    #[must_use]
    pub const fn term_dispatch(&self) -> TermDispatch {
        match self {
            Self::Neos | Self::VirginMedia => TermDispatch::PerTerm,
            Self::TalkTalk | Self::CityFibre | Self::Colt | Self::Sky | Self::Bt | Self::Its => {
                TermDispatch::Batched
            }
        }
    }

    /// Returns true if the provider API accepts the debug flag.
    #[must_use]
    pub const fn supports_debug(&self) -> bool {
        !matches!(self, Self::VirginMedia | Self::Colt)
    }

    /// Applies provider-specific normalization before pricing.
    ///
    /// CityFibre reports monthly rental and includes GPON products: GPON
    /// quotes are dropped and the rest have rental multiplied by 12. Other
    /// providers pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if annualized rental overflows.
    pub fn normalize(&self, quotes: Vec<RawQuote>) -> DomainResult<Vec<RawQuote>> {
        match self {
            Self::CityFibre => quotes
                .into_iter()
                .filter(|quote| quote.product_type() != Some(CITYFIBRE_EXCLUDED_PRODUCT))
                .map(|quote| quote.scale_rental(Decimal::from(MONTHS_PER_YEAR)))
                .collect(),
            Self::Neos
            | Self::TalkTalk
            | Self::VirginMedia
            | Self::Colt
            | Self::Sky
            | Self::Bt
            | Self::Its => Ok(quotes),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.config_key() == key)
            .ok_or_else(|| ProviderError::configuration(format!("unknown provider kind: {s}")))
    }
}
