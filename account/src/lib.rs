//! Account Service client.
//!
//! The Account Service issues secret keys (login, with an optional
//! two-factor step), lists the organizations a secret key belongs to and
//! resolves the access key paired with a secret key.
//!
//! [`AccountService`] is the seam used by the CLI; [`HttpAccountClient`] is
//! the implementation talking to the remote API.
//!
//! # Example
//!
//! ```rust,ignore
//! use account::{AccountClientConfig, AccountService, HttpAccountClient};
//!
//! let client = HttpAccountClient::new(AccountClientConfig::from_env())?;
//! let ids = client.list_organization_ids(&secret_key).await?;
//! ```

mod client;
mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::{AccountClientConfig, HttpAccountClient};
pub use types::{LoginOutcome, LoginRequest, Organization, Token};

/// Errors returned by the Account Service.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Transport failure: connection, TLS, timeout, body decoding.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an unexpected status.
    #[error("account API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A two-factor code was submitted and refused.
    #[error("two-factor code rejected")]
    TwoFactorRejected,

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("invalid client configuration: {0}")]
    Config(String)
}

pub type Result<T> = std::result::Result<T, AccountError>;

/// Remote account operations needed to initialize a profile.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create a session token from email and password.
    ///
    /// Returns [`LoginOutcome::TwoFactorRequired`] when the account enforces
    /// two-factor authentication and `request` carries no code yet.
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome>;

    /// IDs of the organizations visible to `secret_key`.
    async fn list_organization_ids(&self, secret_key: &str) -> Result<Vec<String>>;

    /// Access key paired with `secret_key`.
    async fn get_access_key(&self, secret_key: &str) -> Result<String>;
}
