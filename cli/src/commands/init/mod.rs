//! `stratus init`: resolve credentials, locality and organization, then
//! write them to the active profile of the local config.

mod classify;
mod credentials;
mod error;
mod flow;
mod organization;
mod persist;
mod zone;

#[cfg(test)]
mod testing;

use std::path::{Path, PathBuf};

use account::{AccountClientConfig, AccountError, HttpAccountClient};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use config::{ConfigStore, FileConfigStore, LocalityError, Zone};
use tracing::{info, warn};

use error::InitError;
use flow::{InitFlow, InitRequest};
use persist::{Enrichment, SaveReport};

use crate::prompt::{PromptError, TerminalPrompter};
use crate::{banner, output, ux_error};

#[derive(Args, Debug)]
pub struct InitArgs {
    #[arg(
        long,
        env = "STRATUS_SECRET_KEY",
        hide_env_values = true,
        value_parser = parse_uuid,
        help = "Secret key to store; skips the login"
    )]
    pub secret_key: Option<String>,

    #[arg(long, env = "STRATUS_DEFAULT_ZONE", help = "Default zone, e.g. fr-par-1")]
    pub zone: Option<Zone>,

    #[arg(
        long,
        env = "STRATUS_DEFAULT_ORGANIZATION_ID",
        value_parser = parse_uuid,
        help = "Default organization ID"
    )]
    pub organization_id: Option<String>,

    #[arg(
        long,
        env = "STRATUS_SEND_USAGE",
        help = "Send usage statistics and diagnostics (true|false)"
    )]
    pub send_usage: Option<bool>,

    #[arg(long, env = "STRATUS_CONFIG_PATH", help = "Config file to write")]
    pub config_path: Option<PathBuf>,

    #[arg(long, env = "STRATUS_ACCOUNT_API_URL", help = "Account API base URL")]
    pub api_url: Option<String>,
}

fn parse_uuid(value: &str) -> std::result::Result<String, String> {
    if utils::is_uuid(value) {
        Ok(value.to_string())
    } else {
        Err(format!("'{value}' is not a valid UUID"))
    }
}

impl InitArgs {
    fn request(&self) -> InitRequest {
        InitRequest {
            secret_key: self.secret_key.clone(),
            zone: self.zone.clone(),
            organization_id: self.organization_id.clone(),
            send_usage: self.send_usage,
        }
    }

    fn store(&self) -> Result<FileConfigStore> {
        match &self.config_path {
            Some(path) => Ok(FileConfigStore::new(path)),
            None => FileConfigStore::from_env().context("Failed to locate the config file"),
        }
    }

    fn account_client(&self) -> Result<HttpAccountClient> {
        let mut config = AccountClientConfig::from_env();
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url);
        }
        HttpAccountClient::new(config).context("Failed to build the account API client")
    }
}

pub async fn run(args: InitArgs) -> Result<()> {
    banner::print_welcome();

    let store = args.store()?;
    let account = args.account_client()?;
    let prompter = TerminalPrompter::new();

    let flow = InitFlow {
        prompter: &prompter,
        account: &account,
        store: &store,
    };

    let report = match flow.run(args.request()).await {
        Ok(report) => report,
        Err(err) => {
            if err.is_cancellation() {
                info!("initialization cancelled");
            } else {
                warn!(error = %err, "initialization failed");
            }
            return Err(present(err, store.path()).into());
        }
    };

    if let Enrichment::Failed(err) = &report.enrichment {
        println!("Config saved at {}:", store.path().display());
        println!("{}", report.config.to_string().dimmed());
        return Err(ux_error::access_key_unavailable(&err.to_string()).into());
    }

    print_summary(&report, store.path());
    output::success("Initialization completed");
    Ok(())
}

fn print_summary(report: &SaveReport, path: &Path) {
    println!();
    output::header(if report.created {
        "Config created"
    } else {
        "Config updated"
    });
    output::field("path", &path.display().to_string());
    output::field("profile", report.config.active_profile_name());

    if let Some(profile) = report.config.active_profile() {
        let fields = [
            ("zone", &profile.default_zone),
            ("region", &profile.default_region),
            ("organization", &profile.default_organization_id),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                output::field(label, value);
            }
        }
    }
    println!();
}

/// Turn a flow error into what the user sees.
fn present(err: InitError, path: &Path) -> ux_error::UxError {
    let path = path.display().to_string();
    match err {
        InitError::Cancelled | InitError::Prompt(PromptError::Cancelled) => ux_error::cancelled(),
        InitError::Prompt(PromptError::NotATerminal) => ux_error::not_a_terminal(),
        InitError::Prompt(PromptError::Io(err)) => ux_error::prompt_failed(&err.to_string()),
        InitError::InvalidCredential(value) => ux_error::invalid_credential(&value),
        InitError::Login(AccountError::TwoFactorRejected) => ux_error::two_factor_rejected(),
        InitError::Login(err) => ux_error::login_failed(&err.to_string()),
        InitError::Locality(LocalityError::UnknownZone { zone }) => {
            let known: Vec<String> = Zone::known().map(|z| z.to_string()).collect();
            ux_error::unknown_zone(&zone, &known)
        }
        InitError::Locality(err) => ux_error::UxError::new(err.to_string()),
        InitError::Load(err) => ux_error::config_unreadable(&path, &err.to_string()),
        InitError::Persist { stage, source } => {
            ux_error::persist_failed(&stage.to_string(), &path, &source.to_string())
        }
    }
}
