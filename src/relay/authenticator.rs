//! Platform credential API boundary
//!
//! The browser exposes credential creation and retrieval through
//! `navigator.credentials`; headless consumers bind a CTAP device or a
//! software authenticator instead. Either way the relay only sees this
//! trait: decoded options in, binary credential material out.

use async_trait::async_trait;
use thiserror::Error;

use super::types::{Assertion, CreatedCredential, CreationOptions, RequestOptions};

/// Failure kinds surfaced by the platform credential API
#[derive(Debug, Error)]
pub enum AuthenticatorError {
    /// The user dismissed the platform prompt
    #[error("operation cancelled: {0}")]
    Cancelled(String),

    /// The operation was not allowed (origin or relying-party mismatch)
    #[error("operation not allowed: {0}")]
    NotAllowed(String),

    /// The authenticator itself failed
    #[error("authenticator failure: {0}")]
    Failed(String),

    /// Any other platform error
    #[error("platform error: {0}")]
    Other(String),
}

/// Platform credential API
///
/// Timeouts and user cancellation are the platform's concern; the relay
/// imposes no timeout of its own on these calls.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create a new credential (`navigator.credentials.create`)
    ///
    /// # Errors
    ///
    /// Returns an error if the user cancels, the relying party does not
    /// match, or the authenticator fails.
    async fn create(
        &self,
        options: CreationOptions,
    ) -> Result<CreatedCredential, AuthenticatorError>;

    /// Produce an assertion with an existing credential (`navigator.credentials.get`)
    ///
    /// # Errors
    ///
    /// Returns an error if the user cancels, no matching credential exists,
    /// or the authenticator fails.
    async fn get(&self, options: RequestOptions) -> Result<Assertion, AuthenticatorError>;
}

#[async_trait]
impl<A: Authenticator + ?Sized> Authenticator for std::sync::Arc<A> {
    async fn create(
        &self,
        options: CreationOptions,
    ) -> Result<CreatedCredential, AuthenticatorError> {
        (**self).create(options).await
    }

    async fn get(&self, options: RequestOptions) -> Result<Assertion, AuthenticatorError> {
        (**self).get(options).await
    }
}
