//! Search outcome models

use super::{EstablishmentId, SourceId};
use crate::suppliers::{SupplierOutcome, SupplierResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Lifecycle of a single aggregate search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
	/// One branch per supplier has been spawned
	Dispatched,
	/// Waiting for every branch to settle or the deadline to fire
	AwaitingAll,
	/// Branch results have been folded into the aggregate set
	Merged,
	/// The aggregate has been handed back to the caller
	Returned,
}

impl fmt::Display for SearchPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			SearchPhase::Dispatched => "dispatched",
			SearchPhase::AwaitingAll => "awaiting_all",
			SearchPhase::Merged => "merged",
			SearchPhase::Returned => "returned",
		};
		f.write_str(name)
	}
}

/// Per-supplier line of a search report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSummary {
	pub supplier_id: String,
	pub outcome: SupplierOutcome,
	pub result_count: usize,
	pub elapsed_ms: u64,
}

impl From<&SupplierResult> for SupplierSummary {
	fn from(result: &SupplierResult) -> Self {
		Self {
			supplier_id: result.supplier_id.clone(),
			outcome: result.outcome.clone(),
			result_count: result.available_ids.len(),
			elapsed_ms: result.elapsed_ms,
		}
	}
}

/// Full outcome of an aggregate search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
	pub search_id: Uuid,
	pub source_id: SourceId,
	/// Union of every supplier's available establishments
	pub available_ids: HashSet<EstablishmentId>,
	pub suppliers: Vec<SupplierSummary>,
	pub elapsed_ms: u64,
	/// Whether the deadline fired before every branch settled
	pub deadline_reached: bool,
}

impl SearchReport {
	pub fn result_count(&self) -> usize {
		self.available_ids.len()
	}

	/// Number of suppliers that completed their lookup
	pub fn completed_count(&self) -> usize {
		self.count_where(|outcome| outcome.is_completed())
	}

	pub fn timed_out_count(&self) -> usize {
		self.count_where(|outcome| matches!(outcome, SupplierOutcome::TimedOut))
	}

	/// Number of suppliers that failed (injected failures and internal faults)
	pub fn failed_count(&self) -> usize {
		self.count_where(|outcome| {
			matches!(
				outcome,
				SupplierOutcome::InjectedFailure | SupplierOutcome::InternalFault { .. }
			)
		})
	}

	fn count_where(&self, predicate: impl Fn(&SupplierOutcome) -> bool) -> usize {
		self.suppliers
			.iter()
			.filter(|summary| predicate(&summary.outcome))
			.count()
	}
}
