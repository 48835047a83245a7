use account::AccountService;
use config::{ConfigStore, Zone};
use tracing::{debug, info};

use super::credentials::resolve_secret_key;
use super::error::InitError;
use super::organization::resolve_organization_id;
use super::persist::{ResolvedProfile, SaveReport, apply_and_save, confirm_override};
use super::zone::resolve_zone_and_region;
use crate::prompt::Prompter;

const SEND_USAGE_NOTICE: &str = "To improve this tool we rely on diagnostic and usage data.\n\
Sending such data is optional and can be disabled at any time by running \"stratus init --send-usage=false\".";

/// Values supplied up front. Each one skips its question.
#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    pub secret_key: Option<String>,
    pub zone: Option<Zone>,
    pub organization_id: Option<String>,
    pub send_usage: Option<bool>,
}

/// The whole `init` sequence over injected collaborators.
pub struct InitFlow<'a> {
    pub prompter: &'a dyn Prompter,
    pub account: &'a dyn AccountService,
    pub store: &'a dyn ConfigStore,
}

impl InitFlow<'_> {
    /// Override gate, secret key, zone and region, organization, usage
    /// consent, then the two saves.
    pub async fn run(&self, request: InitRequest) -> Result<SaveReport, InitError> {
        confirm_override(self.store, self.prompter)?;

        let secret_key = match request.secret_key {
            Some(secret_key) => secret_key,
            None => resolve_secret_key(self.prompter, self.account).await?,
        };

        let (zone, region) = resolve_zone_and_region(self.prompter, request.zone)?;
        debug!(zone = %zone, region = %region, "locality resolved");

        let organization_id = match request.organization_id {
            Some(organization_id) => organization_id,
            None => resolve_organization_id(self.prompter, self.account, &secret_key).await?,
        };

        let send_usage = match request.send_usage {
            Some(send_usage) => Some(send_usage),
            None => Some(self.ask_send_usage()?),
        };

        let resolved = ResolvedProfile {
            secret_key,
            zone,
            region,
            organization_id,
            send_usage,
        };

        let report = apply_and_save(self.store, self.account, self.prompter, &resolved).await?;
        info!(
            path = %self.store.path().display(),
            complete = report.is_complete(),
            "init finished"
        );
        Ok(report)
    }

    fn ask_send_usage(&self) -> Result<bool, InitError> {
        self.prompter.println(SEND_USAGE_NOTICE);
        Ok(self
            .prompter
            .confirm("Do you want to send usage statistics and diagnostics?", true)?)
    }
}
