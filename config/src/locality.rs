//! # Zones and Regions
//!
//! Every zone belongs to exactly one region. The mapping is fixed; a zone
//! that is syntactically valid but not listed here has no region.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Zone offered by default when prompting.
pub const DEFAULT_ZONE: &str = "fr-par-1";

const ZONE_REGIONS: &[(&str, &str)] = &[
    ("fr-par-1", "fr-par"),
    ("fr-par-2", "fr-par"),
    ("nl-ams-1", "nl-ams")
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocalityError {
    #[error("invalid zone: '{value}'")]
    InvalidZone { value: String },

    #[error("invalid region: '{value}'")]
    InvalidRegion { value: String },

    #[error("{zone} is an unknown zone")]
    UnknownZone { zone: String }
}

/// A syntactically valid zone identifier, e.g. `fr-par-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Zone(String);

impl Zone {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the region this zone belongs to.
    ///
    /// # Errors
    ///
    /// Returns `LocalityError::UnknownZone` when the zone has no known
    /// region. There is no fallback region.
    pub fn region(&self) -> Result<Region, LocalityError> {
        ZONE_REGIONS
            .iter()
            .find(|(zone, _)| *zone == self.0)
            .map(|(_, region)| Region((*region).to_string()))
            .ok_or_else(|| LocalityError::UnknownZone {
                zone: self.0.clone()
            })
    }

    /// All zones with a known region.
    pub fn known() -> impl Iterator<Item = Zone> {
        ZONE_REGIONS
            .iter()
            .map(|(zone, _)| Zone((*zone).to_string()))
    }
}

impl FromStr for Zone {
    type Err = LocalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if utils::is_zone(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(LocalityError::InvalidZone {
                value: s.to_string()
            })
        }
    }
}

impl TryFrom<String> for Zone {
    type Error = LocalityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A region identifier, e.g. `fr-par`. Only obtained from [`Zone::region`]
/// or by parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Region {
    type Err = LocalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if utils::is_region(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(LocalityError::InvalidRegion {
                value: s.to_string()
            })
        }
    }
}

impl TryFrom<String> for Region {
    type Error = LocalityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
