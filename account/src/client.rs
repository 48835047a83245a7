use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::types::{
    AccessKeyEnvelope, ApiErrorBody, LoginOutcome, LoginRequest, OrganizationsResponse,
    TokenEnvelope
};
use crate::{AccountError, AccountService, Result};

const AUTH_HEADER: &str = "X-Auth-Token";

/// `type` values of a 403 that asks for a one-time code, e.g. `2FA_required`.
fn is_two_factor_challenge(error_type: &str) -> bool {
    error_type.to_ascii_lowercase().starts_with("2fa")
}

/// Configuration for [`HttpAccountClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountClientConfig {
    /// Base URL of the Account API, without trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64
}

impl Default for AccountClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://account.stratus.cloud".to_string(),
            timeout_secs: 30
        }
    }
}

impl AccountClientConfig {
    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `STRATUS_ACCOUNT_API_URL` (default: https://account.stratus.cloud)
    /// - `STRATUS_ACCOUNT_TIMEOUT_SECS` (default: 30)
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("STRATUS_ACCOUNT_API_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }

        if let Ok(timeout) = std::env::var("STRATUS_ACCOUNT_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.timeout_secs = secs;
            }
        }

        config
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Account Service over HTTP.
pub struct HttpAccountClient {
    config: AccountClientConfig,
    http: Client
}

impl HttpAccountClient {
    pub fn new(config: AccountClientConfig) -> Result<Self> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(AccountError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn api_error(response: Response) -> AccountError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::api_error_from(status, &body)
    }

    fn api_error_from(status: StatusCode, body: &str) -> AccountError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        AccountError::Api {
            status: status.as_u16(),
            message
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| AccountError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AccountService for HttpAccountClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome> {
        let url = self.url("/tokens");
        debug!(
            email = %request.email,
            two_factor = request.two_factor_token.is_some(),
            "creating session token"
        );

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            if request.two_factor_token.is_some() {
                return Err(AccountError::TwoFactorRejected);
            }
            let body = response.text().await.unwrap_or_default();
            let error_type = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error_type);
            if error_type.as_deref().is_some_and(is_two_factor_challenge) {
                debug!(?error_type, "two-factor authentication required");
                return Ok(LoginOutcome::TwoFactorRequired);
            }
            return Err(Self::api_error_from(status, &body));
        }

        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        let envelope: TokenEnvelope = Self::parse(response).await?;
        Ok(LoginOutcome::Issued(envelope.token))
    }

    async fn list_organization_ids(&self, secret_key: &str) -> Result<Vec<String>> {
        let url = self.url("/organizations");
        debug!("listing organizations");

        let response = self
            .http
            .get(&url)
            .header(AUTH_HEADER, secret_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let body: OrganizationsResponse = Self::parse(response).await?;
        Ok(body.organizations.into_iter().map(|o| o.id).collect())
    }

    async fn get_access_key(&self, secret_key: &str) -> Result<String> {
        let url = self.url(&format!("/tokens/{secret_key}"));
        debug!("fetching access key");

        let response = self
            .http
            .get(&url)
            .header(AUTH_HEADER, secret_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let envelope: AccessKeyEnvelope = Self::parse(response).await?;
        Ok(envelope.token.access_key)
    }
}

// ============================================================================
// Integration Tests (with wiremock)
// ============================================================================
