//! Secret key resolution: accept a pasted secret key, or log in with email,
//! password and, when the account requires it, a two-factor code.

use account::{AccountService, LoginOutcome, LoginRequest};
use tracing::debug;

use super::classify::{CredentialInput, classify};
use super::error::InitError;
use crate::prompt::{InputPrompt, Prompter};

fn validate_credential(value: &str) -> Result<(), String> {
    match classify(value) {
        CredentialInput::Invalid => Err("invalid email or secret-key".to_string()),
        _ => Ok(()),
    }
}

fn validate_two_factor_code(value: &str) -> Result<(), String> {
    if utils::is_two_factor_code(value) {
        Ok(())
    } else {
        Err("invalid 2FA code".to_string())
    }
}

/// Ask for a secret key or an email until one is given.
///
/// A secret key is returned as typed, without any remote call. An email
/// starts the login loop.
pub async fn resolve_secret_key(
    prompter: &dyn Prompter,
    account: &dyn AccountService,
) -> Result<String, InitError> {
    let raw = prompter.input(
        &InputPrompt::new("Enter a valid secret-key or an email")
            .validate_with(validate_credential),
    )?;

    match classify(&raw) {
        CredentialInput::SecretKey(secret_key) => Ok(secret_key),
        CredentialInput::Email(email) => login(prompter, account, email).await,
        CredentialInput::Invalid => Err(InitError::InvalidCredential(raw)),
    }
}

/// Log in until a secret key is issued.
///
/// No retry cap: every two-factor challenge asks for a new code, and a
/// refused code comes back from the Account Service as an error, which ends
/// the loop.
async fn login(
    prompter: &dyn Prompter,
    account: &dyn AccountService,
    email: String,
) -> Result<String, InitError> {
    let password = prompter.password("Enter your password")?;
    let mut request = LoginRequest::new(email, password, device_description());

    loop {
        match account.login(&request).await.map_err(InitError::Login)? {
            LoginOutcome::Issued(token) => return Ok(token.secret_key),
            LoginOutcome::TwoFactorRequired => {
                debug!("two-factor code required");
                let code = prompter.input(
                    &InputPrompt::new("Enter your 2FA code")
                        .validate_with(validate_two_factor_code),
                )?;
                request.two_factor_token = Some(code);
            }
        }
    }
}

/// Label for the issued token, `stratus-cli <user>@<host>`.
pub fn device_description() -> String {
    let user = env_first(&["USER", "USERNAME"]).unwrap_or_else(|| "unknown".to_string());
    let host = env_first(&["HOSTNAME", "COMPUTERNAME"])
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
        })
        .unwrap_or_else(|| "unknown".to_string());

    format!("stratus-cli {user}@{host}")
}

fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}
