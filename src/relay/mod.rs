//! Passkey relay flows
//!
//! This module orchestrates the two `WebAuthn` round trips against the
//! relying-party server. Each flow fetches server-issued options, decodes
//! the base64url fields, hands the options to the platform credential API,
//! re-encodes the result, and posts it to the completion endpoint. Flows
//! share no mutable state: every invocation constructs its own values, and
//! the authentication session identifier is threaded explicitly from the
//! start step to the finish step.

pub mod authenticator;
pub mod page;
pub mod types;

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::errors::RelayError;
use crate::settings::RelaySettings;
use authenticator::Authenticator;
use page::PageAction;
use types::{
    AuthenticationFinishRequest, CreationOptionsEnvelope, RegistrationFinishRequest,
    RequestOptionsEnvelope, WireAssertionCredential,
};

/// Orchestrates passkey registration and authentication round trips
pub struct PasskeyRelay<A> {
    settings: RelaySettings,
    http: Client,
    authenticator: A,
}

impl<A: Authenticator> PasskeyRelay<A> {
    /// Create a new relay over the given authenticator
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(settings: RelaySettings, authenticator: A) -> Result<Self, RelayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.http.timeout_seconds))
            .build()
            .map_err(|e| RelayError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            settings,
            http,
            authenticator,
        })
    }

    /// Register a new passkey
    ///
    /// Sends the resident-key preference to the registration-start endpoint,
    /// decodes the returned creation options, asks the authenticator to
    /// create a credential, and posts `{name, credential}` to the finish
    /// endpoint. The display name is sent as-is; the server validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if either round trip fails, the options cannot be
    /// decoded, or the authenticator rejects the creation. Unlike
    /// authentication, a platform rejection here aborts the flow and is
    /// surfaced to the caller.
    pub async fn register(&self, name: &str, resident: bool) -> Result<PageAction, RelayError> {
        let start_url = self
            .settings
            .endpoint_url(&self.settings.endpoints.register_start)?;
        log::debug!("starting passkey registration (resident: {resident})");

        let envelope: CreationOptionsEnvelope = self
            .post_json(start_url, &resident)
            .await?
            .json()
            .await
            .map_err(|e| RelayError::Server(format!("invalid registration options: {e}")))?;

        let options = envelope.public_key.decode()?;
        let credential = self.authenticator.create(options).await?;

        let finish_url = self
            .settings
            .endpoint_url(&self.settings.endpoints.register_finish)?;
        let payload = RegistrationFinishRequest {
            name: name.to_owned(),
            credential: credential.into(),
        };

        let response = self
            .http
            .post(finish_url.clone())
            .json(&payload)
            .send()
            .await?;
        log::info!("passkey registration finished with status {}", response.status());
        PageAction::from_response(&finish_url, response).await
    }

    /// Authenticate with an existing passkey
    ///
    /// An empty username is sent as JSON `null`, signaling a username-less
    /// (resident-key) flow. The start endpoint answers with a JSON pair
    /// `[sessionId, options]`; the session identifier is opaque to the relay
    /// and echoed back verbatim in the finish payload.
    ///
    /// A platform rejection does not abort the flow: the finish payload is
    /// still posted with a `null` credential, which the server treats as an
    /// authentication failure signal.
    ///
    /// # Errors
    ///
    /// Returns an error if either round trip fails or the options cannot be
    /// decoded.
    pub async fn authenticate(&self, username: &str) -> Result<PageAction, RelayError> {
        let username = if username.is_empty() {
            None
        } else {
            Some(username.to_owned())
        };

        let start_url = self
            .settings
            .endpoint_url(&self.settings.endpoints.authenticate_start)?;
        log::debug!(
            "starting passkey authentication (username provided: {})",
            username.is_some()
        );

        let (session_id, envelope): (Value, RequestOptionsEnvelope) = self
            .post_json(start_url, &username)
            .await?
            .json()
            .await
            .map_err(|e| RelayError::Server(format!("invalid authentication options: {e}")))?;

        let options = envelope.public_key.decode()?;
        let credential = match self.authenticator.get(options).await {
            Ok(assertion) => Some(WireAssertionCredential::from(assertion)),
            Err(e) => {
                log::warn!("authenticator rejected the assertion request: {e}");
                None
            }
        };

        let finish_url = self
            .settings
            .endpoint_url(&self.settings.endpoints.authenticate_finish)?;
        let payload = AuthenticationFinishRequest {
            id: session_id,
            username,
            credential,
        };

        let response = self
            .http
            .post(finish_url.clone())
            .json(&payload)
            .send()
            .await?;
        log::info!("passkey authentication finished with status {}", response.status());
        PageAction::from_response(&finish_url, response).await
    }

    /// POST a JSON body to a start endpoint and require a success status
    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<reqwest::Response, RelayError> {
        let response = self.http.post(url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(RelayError::Server(format!(
                "start endpoint answered with status {}",
                response.status()
            )));
        }
        Ok(response)
    }
}
