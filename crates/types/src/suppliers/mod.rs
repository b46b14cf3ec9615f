//! Supplier domain models
//!
//! A supplier is one backend that can answer availability lookups. Every call
//! settles into exactly one [`SupplierResult`]; timeouts and failures become
//! an empty result with an explicit [`SupplierOutcome`] instead of an error.

pub mod config;
pub mod errors;
pub mod traits;

pub use config::SupplierConfig;
pub use errors::{SupplierError, SupplierRegistryError, SupplierValidationError};
pub use traits::Supplier;

use crate::search::EstablishmentId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Result type for supplier configuration operations
pub type SupplierValidationResult<T = ()> = Result<T, SupplierValidationError>;

/// How a supplier branch settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SupplierOutcome {
	/// The lookup ran to completion (the result may still be empty)
	Completed,
	/// The shared cancellation signal fired before the lookup finished
	TimedOut,
	/// The simulated backend reported a fault
	InjectedFailure,
	/// The branch panicked or had to be aborted
	InternalFault { reason: String },
}

impl SupplierOutcome {
	pub fn is_completed(&self) -> bool {
		matches!(self, SupplierOutcome::Completed)
	}

	/// Short label used as a structured log field
	pub fn as_str(&self) -> &'static str {
		match self {
			SupplierOutcome::Completed => "completed",
			SupplierOutcome::TimedOut => "timed_out",
			SupplierOutcome::InjectedFailure => "injected_failure",
			SupplierOutcome::InternalFault { .. } => "internal_fault",
		}
	}
}

impl fmt::Display for SupplierOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SupplierOutcome::InternalFault { reason } => write!(f, "internal_fault: {}", reason),
			other => f.write_str(other.as_str()),
		}
	}
}

/// Result of one supplier branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierResult {
	pub supplier_id: String,
	/// Establishments reported as available; empty unless the lookup completed
	pub available_ids: HashSet<EstablishmentId>,
	pub outcome: SupplierOutcome,
	pub elapsed_ms: u64,
}

impl SupplierResult {
	/// Successful lookup
	pub fn completed(
		supplier_id: impl Into<String>,
		available_ids: HashSet<EstablishmentId>,
		elapsed_ms: u64,
	) -> Self {
		Self {
			supplier_id: supplier_id.into(),
			available_ids,
			outcome: SupplierOutcome::Completed,
			elapsed_ms,
		}
	}

	/// Lookup cut off by the shared cancellation signal
	pub fn timed_out(supplier_id: impl Into<String>, elapsed_ms: u64) -> Self {
		Self::empty(supplier_id, SupplierOutcome::TimedOut, elapsed_ms)
	}

	/// Branch that never produced a usable result
	pub fn internal_fault(
		supplier_id: impl Into<String>,
		reason: impl Into<String>,
		elapsed_ms: u64,
	) -> Self {
		Self::empty(
			supplier_id,
			SupplierOutcome::InternalFault {
				reason: reason.into(),
			},
			elapsed_ms,
		)
	}

	/// Degrade a supplier error into an empty result
	pub fn from_error(error: &SupplierError, elapsed_ms: u64) -> Self {
		Self::empty(error.supplier_id(), error.outcome(), elapsed_ms)
	}

	fn empty(supplier_id: impl Into<String>, outcome: SupplierOutcome, elapsed_ms: u64) -> Self {
		Self {
			supplier_id: supplier_id.into(),
			available_ids: HashSet::new(),
			outcome,
			elapsed_ms,
		}
	}

	pub fn result_count(&self) -> usize {
		self.available_ids.len()
	}
}
