use config::{DEFAULT_ZONE, Region, Zone};

use super::error::InitError;
use crate::prompt::{InputPrompt, Prompter};

fn validate_zone(value: &str) -> Result<(), String> {
    if utils::is_zone(value) {
        Ok(())
    } else {
        Err("invalid zone".to_string())
    }
}

/// Use the supplied zone or ask for one, then derive its region.
///
/// An unknown zone is a hard error; there is no default region.
pub fn resolve_zone_and_region(
    prompter: &dyn Prompter,
    supplied: Option<Zone>,
) -> Result<(Zone, Region), InitError> {
    let zone = match supplied {
        Some(zone) => zone,
        None => prompter
            .input(
                &InputPrompt::new("Select a zone")
                    .with_default(DEFAULT_ZONE)
                    .validate_with(validate_zone),
            )?
            .parse()?,
    };

    let region = zone.region()?;
    Ok((zone, region))
}
