#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

//! A headless `WebAuthn` passkey relay client.
//!
//! `passkey-relay` drives the two request/response round trips that make up
//! a passkey registration or authentication against a relying-party server:
//! it fetches the server-issued challenge options, converts the base64url
//! wire fields to binary, hands them to the platform credential API (the
//! [`Authenticator`] trait), re-encodes the resulting credential material,
//! posts it to the completion endpoint, and translates the server's answer
//! into a [`PageAction`].
//!
//! Challenge generation, attestation/assertion verification, and credential
//! storage all live on the server; this crate only relays.

/// Version of the passkey-relay crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codec;
pub mod errors;
pub mod relay;
pub mod settings;

#[cfg(feature = "testing")]
pub mod testing;

/// Re-export commonly used items
pub use errors::RelayError;
pub use relay::authenticator::{Authenticator, AuthenticatorError};
pub use relay::page::{Page, PageAction};
pub use relay::PasskeyRelay;
pub use settings::RelaySettings;
