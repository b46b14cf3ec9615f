//! Supplier configuration model

use super::{SupplierValidationError, SupplierValidationResult};
use crate::constants::limits::{MAX_AVERAGE_SEARCH_DURATION_MS, MAX_ERROR_PERCENTAGE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Latency, availability and failure profile of one supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierConfig {
	pub supplier_id: String,
	pub name: Option<String>,
	/// Mean of the exponentially distributed search latency
	pub average_search_duration_ms: u64,
	/// Scales the `id^-0.5` availability curve
	pub availability_multiplier: f64,
	/// Chance (in percent) that a completed lookup reports a fault instead
	pub error_percentage: f64,
	pub enabled: bool,
}

impl SupplierConfig {
	pub fn new(
		supplier_id: impl Into<String>,
		average_search_duration_ms: u64,
		availability_multiplier: f64,
		error_percentage: f64,
	) -> Self {
		Self {
			supplier_id: supplier_id.into(),
			name: None,
			average_search_duration_ms,
			availability_multiplier,
			error_percentage,
			enabled: true,
		}
	}

	/// Reference profile for supplier number `index` (1-based)
	///
	/// Supplier `n` averages `n` seconds per lookup, scales availability by
	/// `sqrt(n)` and fails `n` percent of the time.
	pub fn reference(index: u32) -> Self {
		let mut config = Self::new(
			format!("supplier-{}", index),
			u64::from(index) * 1000,
			f64::from(index).sqrt(),
			f64::from(index),
		);
		config.name = Some(format!("Supplier {}", index));
		config
	}

	/// Reference fleet of suppliers `1..=count`
	pub fn reference_fleet(count: u32) -> Vec<Self> {
		(1..=count).map(Self::reference).collect()
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn disabled(mut self) -> Self {
		self.enabled = false;
		self
	}

	pub fn average_search_duration(&self) -> Duration {
		Duration::from_millis(self.average_search_duration_ms)
	}

	pub fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.supplier_id)
	}

	/// Validate the configuration ranges
	pub fn validate(&self) -> SupplierValidationResult {
		if self.supplier_id.trim().is_empty() {
			return Err(SupplierValidationError::InvalidSupplierId {
				supplier_id: self.supplier_id.clone(),
			});
		}

		if !self.error_percentage.is_finite()
			|| !(0.0..=MAX_ERROR_PERCENTAGE).contains(&self.error_percentage)
		{
			return Err(SupplierValidationError::InvalidErrorPercentage {
				supplier_id: self.supplier_id.clone(),
				value: self.error_percentage,
				max: MAX_ERROR_PERCENTAGE,
			});
		}

		if !self.availability_multiplier.is_finite() || self.availability_multiplier < 0.0 {
			return Err(SupplierValidationError::InvalidAvailabilityMultiplier {
				supplier_id: self.supplier_id.clone(),
				value: self.availability_multiplier,
			});
		}

		if self.average_search_duration_ms > MAX_AVERAGE_SEARCH_DURATION_MS {
			return Err(SupplierValidationError::InvalidSearchDuration {
				supplier_id: self.supplier_id.clone(),
				duration_ms: self.average_search_duration_ms,
				max_ms: MAX_AVERAGE_SEARCH_DURATION_MS,
			});
		}

		Ok(())
	}
}
