//! # Configuration Record
//!
//! The structure persisted at the config path.
//!
//! ```yaml
//! secret_key: 11111111-2222-3333-4444-555555555555
//! default_zone: fr-par-1
//! default_region: fr-par
//! default_organization_id: 66666666-7777-8888-9999-000000000000
//! send_usage: true
//! active_profile: work
//! profiles:
//!   work:
//!     secret_key: ...
//! ```
//!
//! The top-level profile fields form the default profile. When
//! `active_profile` is set, the named entry under `profiles` is active
//! instead.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locality::{Region, Zone};

/// One bundle of credential and locality defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_organization_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_zone: Option<String>
}

impl Profile {
    pub fn set_zone(&mut self, zone: &Zone) {
        self.default_zone = Some(zone.to_string());
    }

    pub fn set_region(&mut self, region: &Region) {
        self.default_region = Some(region.to_string());
    }

    fn masked(&self) -> Self {
        Self {
            secret_key: self.secret_key.as_deref().map(mask_secret_key),
            ..self.clone()
        }
    }
}

/// Configuration record: a default profile, optional named profiles and the
/// global usage-reporting flag.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Holds everything `stratus init` writes. Exactly one profile is active at a
/// time.
///
/// ## Usage
/// ```rust
/// use config::Config;
///
/// let mut config = Config::default();
/// config.active_profile_mut().secret_key = Some("key".to_string());
/// assert_eq!(config.active_profile().unwrap().secret_key.as_deref(), Some("key"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub default_profile: Profile,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_profile: Option<String>,

    #[serde(default)]
    pub send_usage: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, Profile>,

    /// Top-level keys this record does not model, written back untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>
}

impl Config {
    /// The active profile, if it exists.
    ///
    /// Returns `None` only when `active_profile` names a profile that is not
    /// present under `profiles`.
    pub fn active_profile(&self) -> Option<&Profile> {
        match &self.active_profile {
            Some(name) => self.profiles.get(name),
            None => Some(&self.default_profile)
        }
    }

    /// The active profile, created empty if `active_profile` names a profile
    /// that does not exist yet.
    pub fn active_profile_mut(&mut self) -> &mut Profile {
        match &self.active_profile {
            Some(name) => self.profiles.entry(name.clone()).or_default(),
            None => &mut self.default_profile
        }
    }

    /// Name of the active profile for display purposes.
    pub fn active_profile_name(&self) -> &str {
        self.active_profile.as_deref().unwrap_or("default")
    }

    /// Copy of this record with every secret key masked.
    pub fn masked(&self) -> Self {
        Self {
            default_profile: self.default_profile.masked(),
            active_profile: self.active_profile.clone(),
            send_usage: self.send_usage,
            profiles: self
                .profiles
                .iter()
                .map(|(name, profile)| (name.clone(), profile.masked()))
                .collect(),
            extra: self.extra.clone()
        }
    }
}

/// Renders the record as YAML with secret keys masked.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_yaml::to_string(&self.masked()).map_err(|_| fmt::Error)?;
        f.write_str(rendered.trim_end())
    }
}

/// Keep the first UUID group of a secret key and hide the rest.
pub fn mask_secret_key(secret_key: &str) -> String {
    match secret_key.get(..8) {
        Some(prefix) => format!("{prefix}-xxxx-xxxx-xxxx-xxxxxxxxxxxx"),
        None => "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx".to_string()
    }
}
