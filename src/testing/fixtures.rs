//! Test fixtures providing pre-built wire payloads
//!
//! These produce the JSON the relying-party server would serve from its
//! start endpoints, with fresh random challenges per call.

use rand::RngCore;
use serde_json::{json, Value};

use crate::codec;

/// Central fixture provider for wire test data
pub struct TestFixtures;

impl TestFixtures {
    /// A fresh 32-byte challenge, base64url-encoded
    #[must_use]
    pub fn random_challenge() -> String {
        let mut challenge = [0u8; 32];
        rand::rng().fill_bytes(&mut challenge);
        codec::encode(challenge)
    }

    /// Registration-start response body with `excluded` excluded credentials
    #[must_use]
    pub fn creation_options_json(excluded: usize) -> Value {
        json!({
            "publicKey": {
                "challenge": Self::random_challenge(),
                "rp": {"id": "localhost", "name": "Test RP"},
                "user": {
                    "id": codec::encode([0x01, 0x02, 0x03, 0x04]),
                    "name": "alice",
                    "displayName": "Alice"
                },
                "pubKeyCredParams": [{"type": "public-key", "alg": -7}],
                "timeout": 60000,
                "excludeCredentials": Self::descriptors_json(excluded),
            }
        })
    }

    /// Authentication-start response body: `[sessionId, options]` with
    /// `allowed` allowed credentials
    #[must_use]
    pub fn authentication_start_json(session_id: &str, allowed: usize) -> Value {
        json!([
            session_id,
            {
                "publicKey": {
                    "challenge": Self::random_challenge(),
                    "rpId": "localhost",
                    "timeout": 60000,
                    "allowCredentials": Self::descriptors_json(allowed),
                }
            }
        ])
    }

    fn descriptors_json(count: usize) -> Value {
        let descriptors: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "type": "public-key",
                    "id": codec::encode([u8::try_from(i).unwrap_or(u8::MAX); 16]),
                })
            })
            .collect();
        Value::Array(descriptors)
    }
}
