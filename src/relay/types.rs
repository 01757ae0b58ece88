//! Wire and platform data structures for the relay
//!
//! Each structure exists in two representations: the wire form, where every
//! binary field is base64url text, and the decoded form handed to the
//! platform credential API, where the same fields are raw byte buffers.
//! Fields the relay does not convert pass through untouched via flattened
//! maps, so the authenticator sees exactly what the server sent.
//!
//! All structures are ephemeral: constructed per flow invocation and
//! discarded once the round trip completes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec;
use crate::errors::RelayError;

// ===============================
// REGISTRATION OPTIONS (server -> authenticator)
// ===============================

/// Registration options as served by the relying party (`{"publicKey": {...}}`)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreationOptionsEnvelope {
    #[serde(rename = "publicKey")]
    pub public_key: WireCreationOptions,
}

/// Credential creation options in wire form
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WireCreationOptions {
    pub challenge: String, // Base64URL-encoded random challenge
    pub user: WireUserEntity,
    #[serde(
        rename = "excludeCredentials",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_credentials: Option<Vec<WireCredentialDescriptor>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User entity in wire form
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WireUserEntity {
    pub id: String, // Base64URL-encoded user handle
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Credential descriptor in wire form
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WireCredentialDescriptor {
    pub r#type: String, // Always "public-key"
    pub id: String,     // Base64URL-encoded credential ID
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Credential creation options with binary fields decoded
#[derive(Clone, Debug)]
pub struct CreationOptions {
    pub challenge: Vec<u8>,
    pub user: UserEntity,
    pub exclude_credentials: Vec<CredentialDescriptor>,
    pub extra: Map<String, Value>,
}

/// User entity with the handle decoded
#[derive(Clone, Debug)]
pub struct UserEntity {
    pub id: Vec<u8>,
    pub extra: Map<String, Value>,
}

/// Credential descriptor with the credential ID decoded
#[derive(Clone, Debug)]
pub struct CredentialDescriptor {
    pub r#type: String,
    pub id: Vec<u8>,
    pub extra: Map<String, Value>,
}

impl WireCreationOptions {
    /// Decode the challenge, user handle, and excluded-credential IDs
    ///
    /// An absent exclusion list and an empty one decode identically.
    ///
    /// # Errors
    ///
    /// Returns an error if any base64url field is invalid.
    pub fn decode(self) -> Result<CreationOptions, RelayError> {
        Ok(CreationOptions {
            challenge: codec::decode(&self.challenge)?,
            user: UserEntity {
                id: codec::decode(&self.user.id)?,
                extra: self.user.extra,
            },
            exclude_credentials: decode_descriptors(self.exclude_credentials)?,
            extra: self.extra,
        })
    }
}

// ===============================
// AUTHENTICATION OPTIONS (server -> authenticator)
// ===============================

/// Authentication options as served by the relying party (`{"publicKey": {...}}`)
///
/// The start endpoint wraps this in a JSON pair `[sessionId, envelope]`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RequestOptionsEnvelope {
    #[serde(rename = "publicKey")]
    pub public_key: WireRequestOptions,
}

/// Credential request options in wire form
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WireRequestOptions {
    pub challenge: String, // Base64URL-encoded random challenge
    #[serde(
        rename = "allowCredentials",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_credentials: Option<Vec<WireCredentialDescriptor>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Credential request options with binary fields decoded
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub challenge: Vec<u8>,
    pub allow_credentials: Vec<CredentialDescriptor>,
    pub extra: Map<String, Value>,
}

impl WireRequestOptions {
    /// Decode the challenge and allowed-credential IDs
    ///
    /// # Errors
    ///
    /// Returns an error if any base64url field is invalid.
    pub fn decode(self) -> Result<RequestOptions, RelayError> {
        Ok(RequestOptions {
            challenge: codec::decode(&self.challenge)?,
            allow_credentials: decode_descriptors(self.allow_credentials)?,
            extra: self.extra,
        })
    }
}

fn decode_descriptors(
    descriptors: Option<Vec<WireCredentialDescriptor>>,
) -> Result<Vec<CredentialDescriptor>, RelayError> {
    descriptors
        .unwrap_or_default()
        .into_iter()
        .map(|descriptor| {
            Ok(CredentialDescriptor {
                r#type: descriptor.r#type,
                id: codec::decode(&descriptor.id)?,
                extra: descriptor.extra,
            })
        })
        .collect()
}

// ===============================
// CREDENTIAL RESULTS (authenticator -> server)
// ===============================

/// Credential produced by the platform API during registration
#[derive(Clone, Debug)]
pub struct CreatedCredential {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub r#type: String,
    pub attestation_object: Vec<u8>,
    pub client_data_json: Vec<u8>,
}

/// Assertion produced by the platform API during authentication
#[derive(Clone, Debug)]
pub struct Assertion {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub r#type: String,
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
}

/// Registration credential in wire form
#[derive(Serialize, Deserialize, Debug)]
pub struct WireRegisterCredential {
    pub id: String,
    #[serde(rename = "rawId")]
    pub raw_id: String, // Base64URL-encoded raw credential ID
    pub r#type: String,
    pub response: WireAttestationResponse,
}

/// Attestation envelope in wire form
#[derive(Serialize, Deserialize, Debug)]
pub struct WireAttestationResponse {
    #[serde(rename = "attestationObject")]
    pub attestation_object: String, // Base64URL-encoded attestation object
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String, // Base64URL-encoded client data JSON
}

/// Authentication credential in wire form
#[derive(Serialize, Deserialize, Debug)]
pub struct WireAssertionCredential {
    pub id: String,
    #[serde(rename = "rawId")]
    pub raw_id: String, // Base64URL-encoded raw credential ID
    pub r#type: String,
    pub response: WireAssertionResponse,
}

/// Assertion envelope in wire form
#[derive(Serialize, Deserialize, Debug)]
pub struct WireAssertionResponse {
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: String, // Base64URL-encoded authenticator data
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String, // Base64URL-encoded client data JSON
    pub signature: String, // Base64URL-encoded signature
    #[serde(rename = "userHandle")]
    pub user_handle: Option<String>, // Base64URL-encoded user handle
}

impl From<CreatedCredential> for WireRegisterCredential {
    fn from(credential: CreatedCredential) -> Self {
        Self {
            id: credential.id,
            raw_id: codec::encode(&credential.raw_id),
            r#type: credential.r#type,
            response: WireAttestationResponse {
                attestation_object: codec::encode(&credential.attestation_object),
                client_data_json: codec::encode(&credential.client_data_json),
            },
        }
    }
}

impl From<Assertion> for WireAssertionCredential {
    fn from(assertion: Assertion) -> Self {
        Self {
            id: assertion.id,
            raw_id: codec::encode(&assertion.raw_id),
            r#type: assertion.r#type,
            response: WireAssertionResponse {
                authenticator_data: codec::encode(&assertion.authenticator_data),
                client_data_json: codec::encode(&assertion.client_data_json),
                signature: codec::encode(&assertion.signature),
                user_handle: assertion.user_handle.map(codec::encode),
            },
        }
    }
}

// ===============================
// FINISH PAYLOADS (relay -> server)
// ===============================

/// Body posted to the registration-finish endpoint
#[derive(Serialize, Deserialize, Debug)]
pub struct RegistrationFinishRequest {
    pub name: String,
    pub credential: WireRegisterCredential,
}

/// Body posted to the authentication-finish endpoint
///
/// `credential` stays `null` when the platform API rejected the assertion;
/// the server treats that as an authentication failure signal. The session
/// `id` is echoed back exactly as the start endpoint issued it.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthenticationFinishRequest {
    pub id: Value,
    pub username: Option<String>,
    pub credential: Option<WireAssertionCredential>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_creation_options_decode_counts_exclusions() {
        let envelope: CreationOptionsEnvelope = serde_json::from_value(json!({
            "publicKey": {
                "challenge": "AQIDBA",
                "rp": {"id": "example.com", "name": "Example"},
                "user": {"id": "BQYHCA", "name": "alice", "displayName": "Alice"},
                "pubKeyCredParams": [{"type": "public-key", "alg": -7}],
                "excludeCredentials": [
                    {"type": "public-key", "id": "AAEC"},
                    {"type": "public-key", "id": "AwQF"},
                    {"type": "public-key", "id": "BgcI"}
                ]
            }
        }))
        .unwrap();

        let options = envelope.public_key.decode().unwrap();
        assert_eq!(options.challenge, vec![1, 2, 3, 4]);
        assert_eq!(options.user.id, vec![5, 6, 7, 8]);
        assert_eq!(options.exclude_credentials.len(), 3);
        assert_eq!(options.exclude_credentials[0].id, vec![0, 1, 2]);

        // Untouched fields survive the decode
        assert_eq!(options.extra["rp"]["id"], "example.com");
        assert_eq!(options.extra["pubKeyCredParams"][0]["alg"], -7);
        assert_eq!(options.user.extra["displayName"], "Alice");
    }

    #[test]
    fn test_absent_exclusion_list_decodes_to_empty() {
        let envelope: CreationOptionsEnvelope = serde_json::from_value(json!({
            "publicKey": {
                "challenge": "AQIDBA",
                "user": {"id": "BQYHCA"}
            }
        }))
        .unwrap();
        let options = envelope.public_key.decode().unwrap();
        assert!(options.exclude_credentials.is_empty());
    }

    #[test]
    fn test_empty_and_absent_allow_lists_are_identical() {
        let absent: RequestOptionsEnvelope =
            serde_json::from_value(json!({"publicKey": {"challenge": "AQID"}})).unwrap();
        let empty: RequestOptionsEnvelope = serde_json::from_value(
            json!({"publicKey": {"challenge": "AQID", "allowCredentials": []}}),
        )
        .unwrap();

        assert!(absent.public_key.decode().unwrap().allow_credentials.is_empty());
        assert!(empty.public_key.decode().unwrap().allow_credentials.is_empty());
    }

    #[test]
    fn test_invalid_challenge_is_rejected() {
        let envelope: RequestOptionsEnvelope =
            serde_json::from_value(json!({"publicKey": {"challenge": "!!!"}})).unwrap();
        assert!(envelope.public_key.decode().is_err());
    }

    #[test]
    fn test_register_credential_wire_field_names() {
        let credential = CreatedCredential {
            id: "AAEC".to_string(),
            raw_id: vec![0, 1, 2],
            r#type: "public-key".to_string(),
            attestation_object: vec![0xa3, 0x63],
            client_data_json: b"{}".to_vec(),
        };

        let body = serde_json::to_value(RegistrationFinishRequest {
            name: "laptop".to_string(),
            credential: credential.into(),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "name": "laptop",
                "credential": {
                    "id": "AAEC",
                    "rawId": "AAEC",
                    "type": "public-key",
                    "response": {
                        "attestationObject": "o2M",
                        "clientDataJSON": "e30"
                    }
                }
            })
        );
    }

    #[test]
    fn test_assertion_wire_field_names_and_optional_handle() {
        let assertion = Assertion {
            id: "AAEC".to_string(),
            raw_id: vec![0, 1, 2],
            r#type: "public-key".to_string(),
            authenticator_data: vec![1],
            client_data_json: b"{}".to_vec(),
            signature: vec![2, 3],
            user_handle: None,
        };

        let wire: WireAssertionCredential = assertion.clone().into();
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["rawId"], "AAEC");
        assert_eq!(value["response"]["authenticatorData"], "AQ");
        assert_eq!(value["response"]["clientDataJSON"], "e30");
        assert_eq!(value["response"]["signature"], "AgM");
        assert_eq!(value["response"]["userHandle"], Value::Null);

        let with_handle = Assertion {
            user_handle: Some(vec![9]),
            ..assertion
        };
        let wire: WireAssertionCredential = with_handle.into();
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["response"]["userHandle"], "CQ");
    }

    #[test]
    fn test_authentication_finish_serializes_nulls() {
        let body = serde_json::to_value(AuthenticationFinishRequest {
            id: json!("2024-01-01T00:00:00+00:00"),
            username: None,
            credential: None,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "id": "2024-01-01T00:00:00+00:00",
                "username": null,
                "credential": null
            })
        );
    }
}
