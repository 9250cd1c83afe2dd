//! Telephony provider client.
//!
//! `CallProvider` is the seam between the scheduler and the outside world:
//! the scheduler only sees a typed two-way outcome (confirmation id or
//! failure detail), so the FAILED transition is an ordinary branch rather
//! than an escaped error. Transport failures and provider rejections
//! collapse into the same `ProviderError`.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::call::CallTarget;
use crate::config::TwilioConfig;

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// Confirmation returned when the provider accepts the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallConfirmation {
    /// Provider-side call identifier (Twilio calls this the SID).
    pub sid: String,
}

/// Why a call could not be placed. Operator-facing only — callers of the
/// status endpoint see just the `failed` terminal state.
#[derive(Debug, Error)]
#[error("call provider error: {0}")]
pub struct ProviderError(pub String);

#[async_trait]
pub trait CallProvider: Send + Sync {
    async fn place_call(&self, target: &CallTarget)
        -> Result<CallConfirmation, ProviderError>;
}

// ---------------------------------------------------------------------------
// TwilioProvider
// ---------------------------------------------------------------------------

/// Places calls through the Twilio REST API.
pub struct TwilioProvider {
    client: reqwest::Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
    voice_url: String,
}

#[derive(Debug, Deserialize)]
struct CallsResponse {
    sid: String,
}

impl TwilioProvider {
    pub fn new(config: &TwilioConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            voice_url: config.voice_url.clone(),
        }
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base, self.account_sid
        )
    }
}

#[async_trait]
impl CallProvider for TwilioProvider {
    async fn place_call(
        &self,
        target: &CallTarget,
    ) -> Result<CallConfirmation, ProviderError> {
        let params = [
            ("To", target.to_number.as_str()),
            ("From", target.from_number.as_str()),
            ("Url", self.voice_url.as_str()),
        ];

        let response = self
            .client
            .post(self.calls_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError(format!("transport: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError(format!("provider returned {status}: {body}")));
        }

        let parsed: CallsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError(format!("malformed provider response: {e}")))?;
        Ok(CallConfirmation { sid: parsed.sid })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> CallTarget {
        CallTarget {
            to_number: "+15551230001".into(),
            from_number: "+15551230002".into(),
        }
    }

    fn provider_for(server: &mockito::ServerGuard) -> TwilioProvider {
        TwilioProvider::new(&TwilioConfig {
            account_sid: "AC123".into(),
            auth_token: "secret".into(),
            from_number: "+15551230002".into(),
            to_number: "+15551230001".into(),
            voice_url: "http://demo.twilio.com/docs/voice.xml".into(),
            api_base: server.url(),
        })
    }

    #[tokio::test]
    async fn successful_call_returns_confirmation_sid() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Calls.json")
            .match_header("authorization", mockito::Matcher::Regex("^Basic ".into()))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sid":"CA0123456789"}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let confirmation = provider.place_call(&target()).await.unwrap();
        assert_eq!(confirmation.sid, "CA0123456789");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejection_status_is_a_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Calls.json")
            .with_status(401)
            .with_body(r#"{"code":20003,"message":"Authentication Error"}"#)
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider.place_call(&target()).await.unwrap_err();
        assert!(err.0.contains("401"), "detail: {}", err.0);
    }

    #[tokio::test]
    async fn malformed_body_is_a_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/2010-04-01/Accounts/AC123/Calls.json")
            .with_status(201)
            .with_body("not json")
            .create_async()
            .await;

        let provider = provider_for(&server);
        let err = provider.place_call(&target()).await.unwrap_err();
        assert!(err.0.contains("malformed"), "detail: {}", err.0);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_provider_error() {
        // Nothing listens here; the connect error must surface as ProviderError
        let provider = TwilioProvider::new(&TwilioConfig {
            account_sid: "AC123".into(),
            api_base: "http://127.0.0.1:9".into(),
            ..TwilioConfig::default()
        });

        let err = provider.place_call(&target()).await.unwrap_err();
        assert!(err.0.starts_with("transport:"), "detail: {}", err.0);
    }
}
