use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Body of `POST /tokens`.
///
/// The password and two-factor code are wiped from memory on drop.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,

    /// Human-readable label attached to the issued token.
    pub description: String,

    /// Issued tokens never expire.
    #[zeroize(skip)]
    pub expires: bool,

    #[serde(rename = "2FA_token", skip_serializing_if = "Option::is_none")]
    pub two_factor_token: Option<String>
}

impl LoginRequest {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        description: impl Into<String>
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            description: description.into(),
            expires: false,
            two_factor_token: None
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("description", &self.description)
            .field("expires", &self.expires)
            .field(
                "two_factor_token",
                &self.two_factor_token.as_ref().map(|_| "<redacted>")
            )
            .finish()
    }
}

/// Token issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Token {
    pub secret_key: String,

    #[serde(default)]
    pub access_key: Option<String>
}

/// Result of one login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Issued(Token),
    /// The account enforces 2FA; retry with a one-time code.
    TwoFactorRequired
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenEnvelope {
    pub token: Token
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessKeyToken {
    pub access_key: String
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessKeyEnvelope {
    pub token: AccessKeyToken
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationsResponse {
    #[serde(default)]
    pub organizations: Vec<Organization>
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "type")]
    pub error_type: Option<String>
}
