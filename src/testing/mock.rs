//! Mock objects and fake implementations for testing
//!
//! [`MockAuthenticator`] stands in for the platform credential API with
//! scripted outcomes and records every options structure it receives, so
//! tests can assert exactly what crossed the platform boundary.

use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::codec;
use crate::relay::authenticator::{Authenticator, AuthenticatorError};
use crate::relay::page::Page;
use crate::relay::types::{Assertion, CreatedCredential, CreationOptions, RequestOptions};

use super::constants::{TEST_CLIENT_DATA, TEST_CREDENTIAL_ID, TEST_USER_HANDLE};

/// Scripted mock of the platform credential API
pub struct MockAuthenticator {
    cancel: bool,
    user_handle: Option<Vec<u8>>,
    /// Creation options received, in call order
    pub created_with: Mutex<Vec<CreationOptions>>,
    /// Request options received, in call order
    pub asserted_with: Mutex<Vec<RequestOptions>>,
}

impl MockAuthenticator {
    /// Mock that completes every operation successfully
    #[must_use]
    pub fn succeeding() -> Self {
        Self {
            cancel: false,
            user_handle: Some(TEST_USER_HANDLE.to_vec()),
            created_with: Mutex::new(Vec::new()),
            asserted_with: Mutex::new(Vec::new()),
        }
    }

    /// Mock where the user dismisses every platform prompt
    #[must_use]
    pub fn cancelling() -> Self {
        Self {
            cancel: true,
            ..Self::succeeding()
        }
    }

    /// Override the user handle reported in assertions (`None` omits it)
    #[must_use]
    pub fn with_user_handle(mut self, user_handle: Option<Vec<u8>>) -> Self {
        self.user_handle = user_handle;
        self
    }

    fn check_cancelled(&self) -> Result<(), AuthenticatorError> {
        if self.cancel {
            return Err(AuthenticatorError::Cancelled(
                "user dismissed the prompt".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn create(
        &self,
        options: CreationOptions,
    ) -> Result<CreatedCredential, AuthenticatorError> {
        self.check_cancelled()?;
        // Echo the challenge into the attestation object so tests can
        // verify the decoded bytes reached the platform boundary.
        let attestation_object = options.challenge.clone();
        self.created_with
            .lock()
            .expect("mock lock poisoned")
            .push(options);

        Ok(CreatedCredential {
            id: codec::encode(TEST_CREDENTIAL_ID),
            raw_id: TEST_CREDENTIAL_ID.to_vec(),
            r#type: "public-key".to_string(),
            attestation_object,
            client_data_json: TEST_CLIENT_DATA.to_vec(),
        })
    }

    async fn get(&self, options: RequestOptions) -> Result<Assertion, AuthenticatorError> {
        self.check_cancelled()?;
        let authenticator_data = options.challenge.clone();
        self.asserted_with
            .lock()
            .expect("mock lock poisoned")
            .push(options);

        Ok(Assertion {
            id: codec::encode(TEST_CREDENTIAL_ID),
            raw_id: TEST_CREDENTIAL_ID.to_vec(),
            r#type: "public-key".to_string(),
            authenticator_data,
            client_data_json: TEST_CLIENT_DATA.to_vec(),
            signature: vec![0x30, 0x45],
            user_handle: self.user_handle.clone(),
        })
    }
}

/// Page implementation that records the actions applied to it
#[derive(Debug, Default)]
pub struct RecordingPage {
    pub navigations: Vec<Url>,
    pub documents: Vec<String>,
}

impl RecordingPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Page for RecordingPage {
    fn navigate(&mut self, url: &Url) {
        self.navigations.push(url.clone());
    }

    fn replace_document(&mut self, html: &str) {
        self.documents.push(html.to_string());
    }
}
