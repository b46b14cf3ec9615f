//! Configuration settings structures

use hotels_types::constants::limits::{
	DEFAULT_BRANCH_GRACE_MS, DEFAULT_INCLUSION_DECAY, DEFAULT_LOAD_SOURCES,
	DEFAULT_MAX_ESTABLISHMENTS, DEFAULT_MEAN_INTERVAL_MS, DEFAULT_SEARCH_DEADLINE_MS,
	DEFAULT_SUPPLIER_COUNT, MAX_MEAN_INTERVAL_MS,
};
use hotels_types::{SupplierConfig as DomainSupplierConfig, SupplierValidationError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;
use thiserror::Error;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub search: SearchSettings,
	/// Suppliers keyed by config entry name; empty means the reference fleet
	pub suppliers: BTreeMap<String, SupplierSettings>,
	pub load: LoadSettings,
	pub logging: LoggingSettings,
}

/// Aggregate search timing
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SearchSettings {
	/// Deadline applied uniformly to every supplier branch
	pub deadline_ms: u64,
	/// How long branches get to settle after cancellation before being aborted
	pub branch_grace_ms: u64,
}

impl Default for SearchSettings {
	fn default() -> Self {
		Self {
			deadline_ms: DEFAULT_SEARCH_DEADLINE_MS,
			branch_grace_ms: DEFAULT_BRANCH_GRACE_MS,
		}
	}
}

impl SearchSettings {
	pub fn deadline(&self) -> Duration {
		Duration::from_millis(self.deadline_ms)
	}

	pub fn branch_grace(&self) -> Duration {
		Duration::from_millis(self.branch_grace_ms)
	}
}

/// Individual supplier configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupplierSettings {
	pub supplier_id: String,
	pub name: Option<String>,
	pub average_search_duration_ms: u64,
	pub availability_multiplier: f64,
	pub error_percentage: f64,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
}

fn default_enabled() -> bool {
	true
}

/// Convert from settings SupplierSettings to domain SupplierConfig
impl From<SupplierSettings> for DomainSupplierConfig {
	fn from(settings: SupplierSettings) -> Self {
		Self {
			supplier_id: settings.supplier_id,
			name: settings.name,
			average_search_duration_ms: settings.average_search_duration_ms,
			availability_multiplier: settings.availability_multiplier,
			error_percentage: settings.error_percentage,
			enabled: settings.enabled,
		}
	}
}

impl From<DomainSupplierConfig> for SupplierSettings {
	fn from(config: DomainSupplierConfig) -> Self {
		Self {
			supplier_id: config.supplier_id,
			name: config.name,
			average_search_duration_ms: config.average_search_duration_ms,
			availability_multiplier: config.availability_multiplier,
			error_percentage: config.error_percentage,
			enabled: config.enabled,
		}
	}
}

/// Synthetic load generation
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoadSettings {
	pub enabled: bool,
	/// Number of independent sources; source IDs run from 1 to `sources`
	pub sources: u32,
	/// Mean wait of source 1; source `n` waits `n` times longer on average
	pub mean_interval_ms: u64,
	/// Exclusive upper bound on the sampled establishment range
	pub max_establishments: u32,
	/// Establishment `k` is kept with probability `decay^k`
	pub inclusion_decay: f64,
}

impl Default for LoadSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			sources: DEFAULT_LOAD_SOURCES,
			mean_interval_ms: DEFAULT_MEAN_INTERVAL_MS,
			max_establishments: DEFAULT_MAX_ESTABLISHMENTS,
			inclusion_decay: DEFAULT_INCLUSION_DECAY,
		}
	}
}

impl LoadSettings {
	pub fn mean_interval(&self) -> Duration {
		Duration::from_millis(self.mean_interval_ms)
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
	/// Attached to every event through the root span
	pub facility: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
			facility: "HotelsSample".to_string(),
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Settings validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
	#[error("Search deadline must be greater than zero")]
	ZeroDeadline,

	#[error("Load generator needs at least one source")]
	NoLoadSources,

	#[error("Mean interval must be at most {max_ms}ms, got {value_ms}ms")]
	MeanIntervalTooLarge { value_ms: u64, max_ms: u64 },

	#[error("Inclusion decay must be in (0, 1], got {value}")]
	InvalidInclusionDecay { value: f64 },

	#[error("Duplicate supplier ID: {supplier_id}")]
	DuplicateSupplierId { supplier_id: String },

	#[error("Invalid supplier configuration: {0}")]
	Supplier(#[from] SupplierValidationError),
}

impl Settings {
	/// Supplier configurations to build the registry from
	///
	/// Falls back to the reference fleet when no suppliers are configured.
	pub fn supplier_configs(&self) -> Vec<DomainSupplierConfig> {
		if self.suppliers.is_empty() {
			return DomainSupplierConfig::reference_fleet(DEFAULT_SUPPLIER_COUNT);
		}

		self.suppliers.values().cloned().map(Into::into).collect()
	}

	/// Get enabled suppliers only
	pub fn enabled_suppliers(&self) -> Vec<DomainSupplierConfig> {
		self.supplier_configs()
			.into_iter()
			.filter(|config| config.enabled)
			.collect()
	}

	/// Validate cross-field constraints
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.search.deadline_ms == 0 {
			return Err(ConfigValidationError::ZeroDeadline);
		}

		if self.load.enabled && self.load.sources == 0 {
			return Err(ConfigValidationError::NoLoadSources);
		}

		if self.load.mean_interval_ms > MAX_MEAN_INTERVAL_MS {
			return Err(ConfigValidationError::MeanIntervalTooLarge {
				value_ms: self.load.mean_interval_ms,
				max_ms: MAX_MEAN_INTERVAL_MS,
			});
		}

		let decay = self.load.inclusion_decay;
		if !(decay > 0.0 && decay <= 1.0) {
			return Err(ConfigValidationError::InvalidInclusionDecay { value: decay });
		}

		let mut seen = HashSet::new();
		for config in self.supplier_configs() {
			config.validate()?;
			if !seen.insert(config.supplier_id.clone()) {
				return Err(ConfigValidationError::DuplicateSupplierId {
					supplier_id: config.supplier_id,
				});
			}
		}

		Ok(())
	}
}
