//! # Configuration System
//!
//! Local profile configuration for the Stratus CLI.
//!
//! This crate provides:
//! - The on-disk configuration record and its profiles
//! - Zone and region identifiers, with the zone to region mapping
//! - A `ConfigStore` abstraction and its YAML file implementation
//!
//! The record is always passed explicitly. Callers own the
//! load / mutate / save lifecycle; nothing here caches a global config.

pub mod config;
pub mod locality;
pub mod store;

pub use config::{Config, Profile, mask_secret_key};
pub use locality::{DEFAULT_ZONE, LocalityError, Region, Zone};
pub use store::{CONFIG_PATH_ENV, ConfigError, ConfigStore, FileConfigStore, default_config_path};
