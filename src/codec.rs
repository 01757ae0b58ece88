//! base64url codec for `WebAuthn` wire fields
//!
//! Every binary field crossing the network boundary travels as URL-safe
//! base64 without padding. Decoding is padding-indifferent since some
//! servers emit the padded form. Conversion is lossless in both directions
//! and never reinterprets the bytes themselves.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::errors::RelayError;

/// URL-safe engine: unpadded on encode, padding-indifferent on decode
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode binary data as unpadded base64url text
pub fn encode(data: impl AsRef<[u8]>) -> String {
    BASE64URL.encode(data)
}

/// Decode base64url text into binary data
///
/// # Errors
///
/// Returns [`RelayError::Encoding`] if the input is not valid base64url.
pub fn decode(text: &str) -> Result<Vec<u8>, RelayError> {
    BASE64URL
        .decode(text)
        .map_err(|e| RelayError::Encoding(format!("invalid base64url data: {e}")))
}
