//! # Markup Resolver
//!
//! Finds the markup rule that prices a request.
//!
//! The user type comes from the stored request context (`quote_type_id`);
//! requests without one use the configured default. The supplier is the
//! provider the request was routed to.

use crate::application::error::ApplicationResult;
use crate::domain::entities::{MarkupRule, QuoteRequest};
use crate::domain::value_objects::{ProviderId, RequestId, UserType};
use crate::infrastructure::persistence::{MarkupRepository, RequestContextRepository};
use std::sync::Arc;
use tracing::debug;

/// Resolves markup rules for quote requests.
#[derive(Debug, Clone)]
pub struct MarkupResolver {
    markups: Arc<dyn MarkupRepository>,
    contexts: Arc<dyn RequestContextRepository>,
    default_user_type: UserType,
}

impl MarkupResolver {
    /// Creates a resolver falling back to [`UserType::DEFAULT`].
    #[must_use]
    pub fn new(
        markups: Arc<dyn MarkupRepository>,
        contexts: Arc<dyn RequestContextRepository>,
    ) -> Self {
        Self {
            markups,
            contexts,
            default_user_type: UserType::DEFAULT,
        }
    }

    /// Sets the user type used when a request has no recorded quote type.
    #[must_use]
    pub fn with_default_user_type(mut self, user_type: UserType) -> Self {
        self.default_user_type = user_type;
        self
    }

    /// Returns the fallback user type.
    #[inline]
    #[must_use]
    pub fn default_user_type(&self) -> UserType {
        self.default_user_type
    }

    /// Returns the rule for `(user_type, supplier_id)`, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if the store fails.
    pub async fn lookup(
        &self,
        user_type: UserType,
        supplier_id: &ProviderId,
    ) -> ApplicationResult<Option<MarkupRule>> {
        Ok(self.markups.get_markup(user_type, supplier_id).await?)
    }

    /// Returns the user type recorded for `request_id`, or the default.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if the store fails.
    pub async fn user_type_for(&self, request_id: &RequestId) -> ApplicationResult<UserType> {
        let context = self.contexts.get_by_request_id(request_id).await?;
        Ok(context
            .map(|context| context.user_type_or(self.default_user_type))
            .unwrap_or(self.default_user_type))
    }

    /// Returns the rule that prices `request`, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Infrastructure` if a store fails.
    pub async fn resolve(&self, request: &QuoteRequest) -> ApplicationResult<Option<MarkupRule>> {
        let user_type = self.user_type_for(request.request_id()).await?;
        let rule = self.lookup(user_type, request.provider()).await?;

        debug!(
            request_id = %request.request_id(),
            provider = %request.provider(),
            user_type = %user_type,
            found = rule.is_some(),
            "markup rule resolved"
        );
        Ok(rule)
    }
}
