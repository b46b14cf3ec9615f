//! Hotels Configuration
//!
//! Configuration management and startup utilities for the hotels search
//! aggregator.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	ConfigValidationError, LoadSettings, LogFormat, LoggingSettings, SearchSettings, Settings,
	SupplierSettings,
};
pub use startup_logger::{
	log_configuration, log_service_info, log_service_shutdown, log_startup_complete,
};
