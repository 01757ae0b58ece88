//! Testing utilities for passkey-relay
//!
//! Gated behind the `testing` cargo feature so integration tests (and
//! downstream consumers writing their own) can drive relay flows without a
//! real platform authenticator.
//!
//! - [`mock`] - Mock authenticator and page implementations
//! - [`fixtures`] - Pre-built wire options payloads

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;
pub use mock::{MockAuthenticator, RecordingPage};

/// Common test constants
pub mod constants {
    /// Default test username
    pub const TEST_USERNAME: &str = "alice";

    /// Default test credential ID bytes
    pub const TEST_CREDENTIAL_ID: &[u8] = &[0xde, 0xad, 0xbe, 0xef];

    /// Default test user handle bytes
    pub const TEST_USER_HANDLE: &[u8] = &[0x01, 0x02, 0x03, 0x04];

    /// Client data the mock authenticator reports
    pub const TEST_CLIENT_DATA: &[u8] = br#"{"type":"webauthn.create"}"#;
}
