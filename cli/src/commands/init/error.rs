use std::fmt;

use account::AccountError;
use config::{ConfigError, LocalityError};
use thiserror::Error;

use crate::prompt::PromptError;

/// Which of the two saves failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStage {
    /// Profile fields, before the access key lookup.
    Profile,
    /// Second save, after attaching the access key.
    AccessKey,
}

impl fmt::Display for SaveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile => f.write_str("profile"),
            Self::AccessKey => f.write_str("access key"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("initialization cancelled")]
    Cancelled,

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("invalid email or secret-key: '{0}'")]
    InvalidCredential(String),

    #[error("login failed: {0}")]
    Login(#[source] AccountError),

    #[error(transparent)]
    Locality(#[from] LocalityError),

    #[error("failed to load existing config: {0}")]
    Load(#[source] ConfigError),

    #[error("failed to save {stage} config: {source}")]
    Persist {
        stage: SaveStage,
        #[source]
        source: ConfigError,
    },
}

impl InitError {
    /// Whether the user stopped the flow rather than something failing.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Prompt(PromptError::Cancelled))
    }
}
