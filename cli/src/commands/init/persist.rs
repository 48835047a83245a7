//! Writing the resolved profile, and the override gate that runs before any
//! question is asked.

use account::{AccountError, AccountService};
use colored::Colorize;
use config::{Config, ConfigError, ConfigStore, Region, Zone};
use tracing::{info, warn};

use super::error::{InitError, SaveStage};
use crate::prompt::Prompter;

/// Everything the resolvers produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub secret_key: String,
    pub zone: Zone,
    pub region: Region,
    pub organization_id: String,
    /// `None` leaves the stored flag untouched.
    pub send_usage: Option<bool>,
}

/// Outcome of the access key lookup that follows the first save.
#[derive(Debug)]
pub enum Enrichment {
    Attached(String),
    Failed(AccountError),
}

/// The profile fields are saved once a report exists. `enrichment` tells
/// whether the access key made it in as well.
#[derive(Debug)]
pub struct SaveReport {
    pub config: Config,
    /// No usable config existed before this run.
    pub created: bool,
    pub enrichment: Enrichment,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        matches!(self.enrichment, Enrichment::Attached(_))
    }
}

/// What is currently at the store path.
enum Existing {
    Missing,
    Loaded(Config),
    /// Present but not a valid record; replaced on save.
    Corrupt(ConfigError),
}

fn load_existing(store: &dyn ConfigStore) -> Result<Existing, InitError> {
    match store.load() {
        Ok(Some(config)) => Ok(Existing::Loaded(config)),
        Ok(None) => Ok(Existing::Missing),
        Err(err @ ConfigError::Parse { .. }) => {
            warn!(path = %store.path().display(), error = %err, "existing config is unreadable");
            Ok(Existing::Corrupt(err))
        }
        Err(err) => Err(InitError::Load(err)),
    }
}

/// Show the existing config and ask before replacing it.
///
/// A file that does not parse is reported and goes through the same
/// confirmation. Declining is `InitError::Cancelled`; nothing is written.
pub fn confirm_override(store: &dyn ConfigStore, prompter: &dyn Prompter) -> Result<(), InitError> {
    match load_existing(store)? {
        Existing::Missing => return Ok(()),
        Existing::Loaded(existing) => {
            prompter.println(&format!(
                "Current config is located at {}",
                store.path().display()
            ));
            prompter.println(&existing.to_string().dimmed().to_string());
        }
        Existing::Corrupt(err) => {
            prompter.warn(&format!(
                "{err}; the file will be replaced with a new config"
            ));
        }
    }

    if prompter.confirm("Do you want to override current config?", true)? {
        Ok(())
    } else {
        Err(InitError::Cancelled)
    }
}

/// Merge `resolved` into the active profile and save it, then attach the
/// access key and save again.
///
/// The first save is durable before the access key is requested. A failed
/// lookup still returns `Ok`, with [`Enrichment::Failed`].
pub async fn apply_and_save(
    store: &dyn ConfigStore,
    account: &dyn AccountService,
    prompter: &dyn Prompter,
    resolved: &ResolvedProfile,
) -> Result<SaveReport, InitError> {
    let (mut config, created) = match load_existing(store)? {
        Existing::Loaded(config) => (config, false),
        Existing::Missing | Existing::Corrupt(_) => (Config::default(), true),
    };
    if created {
        prompter.println(&format!(
            "Creating new config at {}",
            store.path().display()
        ));
    }

    if let Some(send_usage) = resolved.send_usage {
        config.send_usage = send_usage;
    }

    let profile = config.active_profile_mut();
    profile.secret_key = Some(resolved.secret_key.clone());
    profile.set_zone(&resolved.zone);
    profile.set_region(&resolved.region);
    profile.default_organization_id = Some(resolved.organization_id.clone());

    store.save(&config).map_err(|source| InitError::Persist {
        stage: SaveStage::Profile,
        source,
    })?;
    info!(profile = config.active_profile_name(), "profile saved");

    let access_key = match account.get_access_key(&resolved.secret_key).await {
        Ok(access_key) => access_key,
        Err(err) => {
            warn!(error = %err, "access key lookup failed");
            return Ok(SaveReport {
                config,
                created,
                enrichment: Enrichment::Failed(err),
            });
        }
    };

    config.active_profile_mut().access_key = Some(access_key.clone());
    store.save(&config).map_err(|source| InitError::Persist {
        stage: SaveStage::AccessKey,
        source,
    })?;

    Ok(SaveReport {
        config,
        created,
        enrichment: Enrichment::Attached(access_key),
    })
}
