//! Error types for supplier operations

use super::SupplierOutcome;
use thiserror::Error;

/// Validation errors for supplier configurations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SupplierValidationError {
	#[error("Invalid supplier ID: '{supplier_id}'")]
	InvalidSupplierId { supplier_id: String },

	#[error("Invalid error percentage for {supplier_id}: {value} (must be between 0 and {max})")]
	InvalidErrorPercentage {
		supplier_id: String,
		value: f64,
		max: f64,
	},

	#[error("Invalid availability multiplier for {supplier_id}: {value} (must be finite and >= 0)")]
	InvalidAvailabilityMultiplier { supplier_id: String, value: f64 },

	#[error("Invalid average search duration for {supplier_id}: {duration_ms}ms (max {max_ms}ms)")]
	InvalidSearchDuration {
		supplier_id: String,
		duration_ms: u64,
		max_ms: u64,
	},
}

/// Supplier lookup errors
///
/// These never reach the aggregator's caller; a supplier degrades each of
/// them into an empty [`super::SupplierResult`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SupplierError {
	#[error("Supplier search timeout: {supplier_id} after {elapsed_ms}ms")]
	Timeout { supplier_id: String, elapsed_ms: u64 },

	#[error("Supplier search error: {supplier_id}")]
	InjectedFailure { supplier_id: String },

	#[error("Supplier internal fault: {supplier_id} - {reason}")]
	InternalFault { supplier_id: String, reason: String },
}

impl SupplierError {
	pub fn supplier_id(&self) -> &str {
		match self {
			SupplierError::Timeout { supplier_id, .. }
			| SupplierError::InjectedFailure { supplier_id }
			| SupplierError::InternalFault { supplier_id, .. } => supplier_id,
		}
	}

	/// Outcome recorded when this error is degraded into an empty result
	pub fn outcome(&self) -> SupplierOutcome {
		match self {
			SupplierError::Timeout { .. } => SupplierOutcome::TimedOut,
			SupplierError::InjectedFailure { .. } => SupplierOutcome::InjectedFailure,
			SupplierError::InternalFault { reason, .. } => SupplierOutcome::InternalFault {
				reason: reason.clone(),
			},
		}
	}
}

/// Supplier registry errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SupplierRegistryError {
	#[error("Supplier already registered: {supplier_id}")]
	AlreadyRegistered { supplier_id: String },

	#[error("Supplier not registered: {supplier_id}")]
	NotRegistered { supplier_id: String },

	#[error("Supplier validation failed: {0}")]
	Validation(#[from] SupplierValidationError),
}
