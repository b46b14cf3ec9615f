//! Configuration loading utilities

use crate::{ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File};
use std::env;
use thiserror::Error;

/// Default config file stem, resolved against any supported format
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

/// Prefix of environment variable overrides (`HOTELS__SEARCH__DEADLINE_MS`)
pub const ENV_PREFIX: &str = "HOTELS";

/// Errors raised while loading settings
#[derive(Error, Debug)]
pub enum ConfigLoadError {
	#[error("Failed to read configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from the config file named by `CONFIG_PATH` (or the
/// default path) with environment overrides applied on top
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
	load_config_from(&path)
}

/// Load configuration from a specific file path
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator("__")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;

	Ok(settings)
}
