//! Error types for the passkey relay
//!
//! The relay distinguishes the three failure kinds that can end a flow:
//! network failure on either round trip, a platform credential API
//! rejection, and a server response the relay cannot use. Every branch is
//! explicit; nothing is dropped silently.

use thiserror::Error;

use crate::relay::authenticator::AuthenticatorError;

/// Errors that can occur while driving a relay flow
#[derive(Debug, Error)]
pub enum RelayError {
    /// Network failure on either round trip
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a status or body the relay cannot use
    #[error("server error: {0}")]
    Server(String),

    /// base64url conversion failed
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The platform credential API rejected the operation
    #[error("authenticator error: {0}")]
    Authenticator(#[from] AuthenticatorError),

    /// Invalid relay configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}
