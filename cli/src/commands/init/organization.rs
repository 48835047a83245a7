use account::AccountService;
use tracing::warn;

use super::error::InitError;
use crate::prompt::{InputPrompt, Prompter};

fn validate_organization_id(value: &str) -> Result<(), String> {
    if utils::is_organization_id(value) {
        Ok(())
    } else {
        Err("invalid organization-id".to_string())
    }
}

/// Pick the organization for `secret_key`.
///
/// A single visible organization is used as is. Otherwise the user is asked,
/// with the first listed organization as default. A failed listing is only
/// a warning and is handled like an empty list.
pub async fn resolve_organization_id(
    prompter: &dyn Prompter,
    account: &dyn AccountService,
    secret_key: &str,
) -> Result<String, InitError> {
    let ids = match account.list_organization_ids(secret_key).await {
        Ok(ids) => ids,
        Err(err) => {
            warn!(error = %err, "could not list organizations");
            prompter.warn(&format!("could not list your organizations: {err}"));
            Vec::new()
        }
    };

    if let [only] = ids.as_slice() {
        return Ok(only.clone());
    }

    let mut request =
        InputPrompt::new("Enter your Organization ID").validate_with(validate_organization_id);
    if let Some(first) = ids.first() {
        request = request.with_default(first);
    }

    Ok(prompter.input(&request)?)
}
