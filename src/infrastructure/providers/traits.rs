//! # Quote Provider Trait
//!
//! Port definition for provider integrations.
//!
//! Every provider adapter implements [`QuoteProvider`]. An adapter answers a
//! request for a list of contract terms with a [`ProviderReply`]: decoded
//! quotes, the raw upstream records (debug mode), or the upstream's own
//! rejection payload.
//!
//! # Examples
//!
//! ```
//! use provider_gateway::infrastructure::providers::traits::{FetchMode, ProviderReply};
//! use serde_json::json;
//!
//! let reply = ProviderReply::from_body(json!({"message": "No coverage"}), FetchMode::Priced).unwrap();
//! assert!(reply.is_rejected());
//!
//! let reply = ProviderReply::from_body(json!([]), FetchMode::Priced).unwrap();
//! assert!(matches!(reply, ProviderReply::Quotes(ref quotes) if quotes.is_empty()));
//! ```

use crate::domain::entities::{QuoteRequest, RawQuote};
use crate::domain::value_objects::ContractTerm;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::kind::ProviderKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Whether the caller wants priced quotes or the raw provider response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FetchMode {
    /// Quotes are decoded for pricing.
    #[default]
    Priced,
    /// Raw records are passed through untouched.
    Debug,
}

impl FetchMode {
    /// Maps the caller's `debug` flag.
    #[inline]
    #[must_use]
    pub const fn from_debug(debug: bool) -> Self {
        if debug { Self::Debug } else { Self::Priced }
    }

    /// Returns true for debug passthrough.
    #[inline]
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// An upstream `error` / `message` object, passed to callers verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpstreamPayload(Map<String, Value>);

impl UpstreamPayload {
    /// Key of the upstream error value.
    pub const ERROR_KEY: &'static str = "error";
    /// Key of the upstream message value.
    pub const MESSAGE_KEY: &'static str = "message";

    /// Wraps an upstream object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Creates a payload carrying only a message.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(Self::MESSAGE_KEY.to_string(), Value::String(message.into()));
        Self(fields)
    }

    /// Returns true if `fields` carries an `error` or `message` key.
    #[must_use]
    pub fn is_rejection(fields: &Map<String, Value>) -> bool {
        fields.contains_key(Self::ERROR_KEY) || fields.contains_key(Self::MESSAGE_KEY)
    }

    /// Returns the `error` value, if present.
    #[must_use]
    pub fn error(&self) -> Option<&Value> {
        self.0.get(Self::ERROR_KEY)
    }

    /// Returns the `message` value as text, if it is a string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.0.get(Self::MESSAGE_KEY).and_then(Value::as_str)
    }

    /// Returns the payload fields.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<UpstreamPayload> for Value {
    fn from(payload: UpstreamPayload) -> Self {
        Value::Object(payload.0)
    }
}

/// Outcome of one provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    /// Decoded quotes.
    Quotes(Vec<RawQuote>),
    /// Raw upstream records (debug mode).
    Raw(Vec<Value>),
    /// The provider rejected the request.
    Rejected(UpstreamPayload),
}

impl ProviderReply {
    /// Returns an empty reply of the flavor `mode` expects.
    #[must_use]
    pub fn empty(mode: FetchMode) -> Self {
        match mode {
            FetchMode::Priced => Self::Quotes(Vec::new()),
            FetchMode::Debug => Self::Raw(Vec::new()),
        }
    }

    /// Interprets an upstream JSON body.
    ///
    /// - an array is a list of quote records, decoded unless `mode` is debug
    /// - an object with `error` or `message` is a rejection
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Protocol` for any other shape, or if a record
    /// cannot be decoded as a quote.
    pub fn from_body(body: Value, mode: FetchMode) -> ProviderResult<Self> {
        match body {
            Value::Array(records) if mode.is_debug() => Ok(Self::Raw(records)),
            Value::Array(records) => decode_quotes(records).map(Self::Quotes),
            Value::Object(fields) if UpstreamPayload::is_rejection(&fields) => {
                Ok(Self::Rejected(UpstreamPayload::new(fields)))
            }
            Value::Object(_) => Err(ProviderError::protocol(
                "object response carries neither quotes nor error/message",
            )),
            other => Err(ProviderError::protocol(format!(
                "unexpected response body: {other}"
            ))),
        }
    }

    /// Returns true for an upstream rejection.
    #[inline]
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Returns the number of records carried.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Quotes(quotes) => quotes.len(),
            Self::Raw(records) => records.len(),
            Self::Rejected(_) => 0,
        }
    }

    /// Returns true if no records are carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates two replies; a rejection on either side wins.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Protocol` if quotes cannot be re-encoded when
    /// mixing decoded and raw replies.
    pub fn merge(self, other: Self) -> ProviderResult<Self> {
        match (self, other) {
            (rejected @ Self::Rejected(_), _) | (_, rejected @ Self::Rejected(_)) => Ok(rejected),
            (Self::Quotes(mut left), Self::Quotes(right)) => {
                left.extend(right);
                Ok(Self::Quotes(left))
            }
            (left, right) => {
                let mut records = left.into_records()?;
                records.extend(right.into_records()?);
                Ok(Self::Raw(records))
            }
        }
    }

    /// Returns the records as JSON values.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Protocol` if a quote cannot be encoded, or if
    /// the reply is a rejection.
    pub fn into_records(self) -> ProviderResult<Vec<Value>> {
        match self {
            Self::Raw(records) => Ok(records),
            Self::Quotes(quotes) => quotes
                .iter()
                .map(|quote| {
                    serde_json::to_value(quote)
                        .map_err(|e| ProviderError::protocol(format!("failed to encode quote: {e}")))
                })
                .collect(),
            Self::Rejected(_) => Err(ProviderError::protocol("rejected reply carries no records")),
        }
    }

    /// Returns the records as decoded quotes.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Protocol` if a raw record cannot be decoded,
    /// or if the reply is a rejection.
    pub fn into_quotes(self) -> ProviderResult<Vec<RawQuote>> {
        match self {
            Self::Quotes(quotes) => Ok(quotes),
            Self::Raw(records) => decode_quotes(records),
            Self::Rejected(_) => Err(ProviderError::protocol("rejected reply carries no quotes")),
        }
    }
}

/// Decodes quote records, skipping those whose numeric `term` is below one
/// year.
fn decode_quotes(records: Vec<Value>) -> ProviderResult<Vec<RawQuote>> {
    records
        .into_iter()
        .filter(|record| {
            let term = record.get("term").and_then(Value::as_i64);
            let keep = !term.is_some_and(|years| years < 1);
            if !keep {
                warn!(term = ?term, "skipping quote with a term below one year");
            }
            keep
        })
        .map(|record| {
            serde_json::from_value(record)
                .map_err(|e| ProviderError::protocol(format!("failed to decode quote: {e}")))
        })
        .collect()
}

/// Trait defining the interface for provider adapters.
///
/// The gateway decides how terms are grouped (see
/// [`TermDispatch`](super::kind::TermDispatch)); an adapter sends exactly
/// the terms it is given.
#[async_trait]
pub trait QuoteProvider: Send + Sync + fmt::Debug {
    /// Returns the provider kind this adapter speaks to.
    fn kind(&self) -> ProviderKind;

    /// Requests quotes for `terms`.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Timeout` / `ProviderError::Connection` - transport failure
    /// - `ProviderError::Protocol` - the response could not be decoded
    async fn fetch_quotes(
        &self,
        request: &QuoteRequest,
        terms: &[ContractTerm],
        mode: FetchMode,
    ) -> ProviderResult<ProviderReply>;
}
