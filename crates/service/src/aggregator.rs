//! Core search aggregation logic
//!
//! A search fans out to every registered supplier under one shared deadline,
//! waits for all branches to settle, and merges whatever came back. Branch
//! failures never fail the search: a supplier that times out, reports an
//! error or panics contributes the empty set.

use async_trait::async_trait;
use futures::future::join_all;
use hotels_config::SearchSettings;
use hotels_suppliers::SupplierRegistry;
use hotels_types::constants::limits::{DEFAULT_BRANCH_GRACE_MS, DEFAULT_SEARCH_DEADLINE_MS};
use hotels_types::{
	EstablishmentId, SearchPhase, SearchReport, SearchRequest, SupplierResult, SupplierSummary,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tokio::time::{timeout, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Search entry point used by load generators and other callers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchAggregatorTrait: Send + Sync {
	/// Establishments reported available by at least one supplier
	async fn search(&self, request: SearchRequest) -> HashSet<EstablishmentId>;

	/// Same search, with per-supplier outcomes and timing
	async fn search_with_report(&self, request: SearchRequest) -> SearchReport;
}

/// Timing applied to every search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
	/// Budget for the whole search, shared by all branches
	pub deadline: Duration,
	/// Time branches get to settle after cancellation before being aborted
	pub branch_grace: Duration,
}

impl Default for AggregatorConfig {
	fn default() -> Self {
		Self {
			deadline: Duration::from_millis(DEFAULT_SEARCH_DEADLINE_MS),
			branch_grace: Duration::from_millis(DEFAULT_BRANCH_GRACE_MS),
		}
	}
}

impl AggregatorConfig {
	pub fn with_deadline(deadline: Duration) -> Self {
		Self {
			deadline,
			..Self::default()
		}
	}
}

impl From<&SearchSettings> for AggregatorConfig {
	fn from(settings: &SearchSettings) -> Self {
		Self {
			deadline: settings.deadline(),
			branch_grace: settings.branch_grace(),
		}
	}
}

/// Union of every branch's available establishments
///
/// Order-independent: any permutation of `results` yields the same set.
pub fn merge_results<'a>(
	results: impl IntoIterator<Item = &'a SupplierResult>,
) -> HashSet<EstablishmentId> {
	results
		.into_iter()
		.flat_map(|result| result.available_ids.iter().copied())
		.collect()
}

/// Service fanning searches out to all registered suppliers
pub struct SearchAggregator {
	registry: Arc<SupplierRegistry>,
	config: AggregatorConfig,
}

impl SearchAggregator {
	pub fn new(registry: Arc<SupplierRegistry>, config: AggregatorConfig) -> Self {
		Self { registry, config }
	}

	pub fn registry(&self) -> &SupplierRegistry {
		&self.registry
	}

	pub fn config(&self) -> AggregatorConfig {
		self.config
	}

	/// Get aggregation statistics
	pub fn get_stats(&self) -> AggregationStats {
		AggregationStats {
			total_suppliers: self.registry.len(),
			deadline_ms: self.config.deadline.as_millis() as u64,
			branch_grace_ms: self.config.branch_grace.as_millis() as u64,
		}
	}

	async fn run_search(&self, request: SearchRequest) -> SearchReport {
		let started = Instant::now();
		let search_id = request.search_id();

		info!(
			establishment_count = request.len(),
			supplier_count = self.registry.len(),
			"Starting search {}",
			search_id
		);

		if request.is_empty() {
			info!(
				elapsed_ms = 0u64,
				result_count = 0usize,
				"Search completed in 0.00ms. 0 result(s) found (no establishments requested)"
			);
			return SearchReport {
				search_id,
				source_id: request.source_id(),
				available_ids: HashSet::new(),
				suppliers: Vec::new(),
				elapsed_ms: 0,
				deadline_reached: false,
			};
		}

		let (results, deadline_reached) = self.dispatch(&request, started).await;

		let available_ids = merge_results(&results);
		debug!(phase = %SearchPhase::Merged, branches = results.len());

		let elapsed = started.elapsed();
		let report = SearchReport {
			search_id,
			source_id: request.source_id(),
			available_ids,
			suppliers: results.iter().map(SupplierSummary::from).collect(),
			elapsed_ms: elapsed.as_millis() as u64,
			deadline_reached,
		};

		info!(
			elapsed_ms = report.elapsed_ms,
			result_count = report.result_count(),
			completed = report.completed_count(),
			timed_out = report.timed_out_count(),
			failed = report.failed_count(),
			deadline_reached,
			"Search completed in {:.2}ms. {} result(s) found",
			elapsed.as_secs_f64() * 1000.0,
			report.result_count()
		);
		debug!(phase = %SearchPhase::Returned);

		report
	}

	/// Spawn one branch per supplier and collect exactly one result per branch
	async fn dispatch(
		&self,
		request: &SearchRequest,
		started: Instant,
	) -> (Vec<SupplierResult>, bool) {
		let cancellation = CancellationToken::new();
		// Branches outlive this future otherwise, e.g. when the caller drops the search
		let _cancel_on_drop = cancellation.clone().drop_guard();
		let establishment_ids = Arc::new(request.establishment_ids().clone());

		let mut supplier_ids = Vec::with_capacity(self.registry.len());
		let mut handles = Vec::with_capacity(self.registry.len());

		for supplier in self.registry.get_all() {
			let supplier = Arc::clone(supplier);
			let establishment_ids = Arc::clone(&establishment_ids);
			let cancellation = cancellation.clone();
			let branch_span = info_span!("supplier_branch", supplier_id = supplier.supplier_id());

			supplier_ids.push(supplier.supplier_id().to_string());
			handles.push(tokio::spawn(
				async move {
					supplier
						.get_availability(&establishment_ids, &cancellation)
						.await
				}
				.instrument(branch_span),
			));
		}

		let abort_handles: Vec<_> = handles.iter().map(|handle| handle.abort_handle()).collect();
		debug!(phase = %SearchPhase::Dispatched, branches = handles.len());

		let joined = join_all(handles);
		tokio::pin!(joined);
		debug!(phase = %SearchPhase::AwaitingAll);

		let deadline = tokio::time::sleep_until(started + self.config.deadline);
		let (outcomes, deadline_reached) = tokio::select! {
			outcomes = &mut joined => (outcomes, false),
			_ = deadline => {
				warn!(
					deadline_ms = self.config.deadline.as_millis() as u64,
					"Search deadline reached, cancelling pending supplier searches"
				);
				cancellation.cancel();

				match timeout(self.config.branch_grace, &mut joined).await {
					Ok(outcomes) => (outcomes, true),
					Err(_) => {
						error!(
							grace_ms = self.config.branch_grace.as_millis() as u64,
							"Supplier branches ignored cancellation, aborting them"
						);
						for handle in &abort_handles {
							handle.abort();
						}
						(joined.await, true)
					},
				}
			},
		};

		let results = supplier_ids
			.into_iter()
			.zip(outcomes)
			.map(|(supplier_id, outcome)| match outcome {
				Ok(result) => result,
				Err(join_error) => Self::fault_result(supplier_id, &join_error, started),
			})
			.collect();

		(results, deadline_reached)
	}

	fn fault_result(supplier_id: String, join_error: &JoinError, started: Instant) -> SupplierResult {
		let reason = if join_error.is_panic() {
			"supplier branch panicked"
		} else {
			"supplier branch aborted after ignoring cancellation"
		};

		error!(
			supplier_id = %supplier_id,
			outcome = "internal_fault",
			"Supplier search failed unexpectedly: {}",
			reason
		);

		SupplierResult::internal_fault(supplier_id, reason, started.elapsed().as_millis() as u64)
	}
}

#[async_trait]
impl SearchAggregatorTrait for SearchAggregator {
	async fn search(&self, request: SearchRequest) -> HashSet<EstablishmentId> {
		self.search_with_report(request).await.available_ids
	}

	async fn search_with_report(&self, request: SearchRequest) -> SearchReport {
		let span = info_span!(
			"search",
			search_id = %request.search_id(),
			source_id = request.source_id()
		);

		self.run_search(request).instrument(span).await
	}
}

/// Aggregation service statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationStats {
	pub total_suppliers: usize,
	pub deadline_ms: u64,
	pub branch_grace_ms: u64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use hotels_types::{Supplier, SupplierOutcome, SupplierResult};

	#[derive(Debug, Clone, Copy)]
	enum Behavior {
		Return,
		Fail,
		IgnoreCancellation,
		Panic,
	}

	#[derive(Debug)]
	struct ScriptedSupplier {
		id: String,
		delay: Duration,
		available: HashSet<EstablishmentId>,
		behavior: Behavior,
	}

	impl ScriptedSupplier {
		fn new(id: &str, delay_ms: u64, available: &[EstablishmentId]) -> Arc<dyn Supplier> {
			Self::with_behavior(id, delay_ms, available, Behavior::Return)
		}

		fn with_behavior(
			id: &str,
			delay_ms: u64,
			available: &[EstablishmentId],
			behavior: Behavior,
		) -> Arc<dyn Supplier> {
			Arc::new(Self {
				id: id.to_string(),
				delay: Duration::from_millis(delay_ms),
				available: available.iter().copied().collect(),
				behavior,
			})
		}
	}

	#[async_trait]
	impl Supplier for ScriptedSupplier {
		fn supplier_id(&self) -> &str {
			&self.id
		}

		async fn get_availability(
			&self,
			establishment_ids: &HashSet<EstablishmentId>,
			cancellation: &CancellationToken,
		) -> SupplierResult {
			match self.behavior {
				Behavior::IgnoreCancellation => {
					tokio::time::sleep(self.delay).await;
				},
				Behavior::Panic => panic!("scripted supplier panic"),
				_ => {
					tokio::select! {
						_ = cancellation.cancelled() => {
							return SupplierResult::timed_out(self.id.clone(), 0);
						},
						_ = tokio::time::sleep(self.delay) => {},
					}
				},
			}

			if let Behavior::Fail = self.behavior {
				return SupplierResult::from_error(
					&hotels_types::SupplierError::InjectedFailure {
						supplier_id: self.id.clone(),
					},
					0,
				);
			}

			let available = establishment_ids
				.intersection(&self.available)
				.copied()
				.collect();
			SupplierResult::completed(self.id.clone(), available, 0)
		}
	}

	fn aggregator(suppliers: Vec<Arc<dyn Supplier>>, deadline_ms: u64) -> SearchAggregator {
		let mut registry = SupplierRegistry::new();
		for supplier in suppliers {
			registry.register(supplier).unwrap();
		}
		SearchAggregator::new(
			Arc::new(registry),
			AggregatorConfig {
				deadline: Duration::from_millis(deadline_ms),
				branch_grace: Duration::from_millis(50),
			},
		)
	}

	fn result(id: &str, ids: &[EstablishmentId]) -> SupplierResult {
		SupplierResult::completed(id, ids.iter().copied().collect(), 1)
	}

	#[test]
	fn test_merge_is_union() {
		let results = vec![
			result("a", &[1, 2]),
			result("b", &[2, 3]),
			SupplierResult::timed_out("c", 15),
		];

		assert_eq!(merge_results(&results), HashSet::from([1, 2, 3]));
	}

	#[test]
	fn test_merge_ignores_order() {
		let results = vec![
			result("a", &[1, 9]),
			result("b", &[4]),
			result("c", &[]),
			result("d", &[9, 12, 4]),
		];
		let expected = merge_results(&results);

		let mut reversed = results.clone();
		reversed.reverse();
		assert_eq!(merge_results(&reversed), expected);

		let mut rotated = results.clone();
		rotated.rotate_left(2);
		assert_eq!(merge_results(&rotated), expected);
	}

	#[test]
	fn test_empty_branch_never_changes_union() {
		let mut results = vec![result("a", &[3, 4])];
		let before = merge_results(&results);

		results.push(SupplierResult::internal_fault("b", "panicked", 0));
		results.push(result("c", &[]));
		assert_eq!(merge_results(&results), before);
	}

	#[tokio::test(start_paused = true)]
	async fn test_reference_scenario() {
		let aggregator = aggregator(
			vec![
				ScriptedSupplier::new("a", 1_000, &[5, 7]),
				ScriptedSupplier::new("b", 20_000, &[5, 6, 7, 8]),
				ScriptedSupplier::with_behavior("c", 1_000, &[6, 8], Behavior::Fail),
			],
			15_000,
		);

		let started = Instant::now();
		let report = aggregator
			.search_with_report(SearchRequest::new(1, vec![5, 6, 7, 8]))
			.await;

		assert_eq!(report.available_ids, HashSet::from([5, 7]));
		assert!(report.deadline_reached);
		assert_eq!(report.completed_count(), 1);
		assert_eq!(report.timed_out_count(), 1);
		assert_eq!(report.failed_count(), 1);
		assert!(started.elapsed() < Duration::from_millis(15_100));
	}

	#[tokio::test(start_paused = true)]
	async fn test_all_fast_suppliers_return_before_deadline() {
		let aggregator = aggregator(
			vec![
				ScriptedSupplier::new("a", 10, &[1]),
				ScriptedSupplier::new("b", 20, &[2]),
			],
			15_000,
		);

		let started = Instant::now();
		let report = aggregator
			.search_with_report(SearchRequest::new(1, vec![1, 2, 3]))
			.await;

		assert_eq!(report.available_ids, HashSet::from([1, 2]));
		assert!(!report.deadline_reached);
		assert!(started.elapsed() < Duration::from_millis(100));
	}

	#[tokio::test]
	async fn test_empty_request_returns_empty_set() {
		let aggregator = aggregator(
			vec![
				ScriptedSupplier::new("a", 0, &[1, 2]),
				ScriptedSupplier::new("b", 0, &[3]),
			],
			1_000,
		);

		let result = aggregator.search(SearchRequest::new(1, Vec::new())).await;
		assert!(result.is_empty());
	}

	#[tokio::test]
	async fn test_no_suppliers_returns_empty_set() {
		let aggregator = aggregator(Vec::new(), 1_000);

		let report = aggregator
			.search_with_report(SearchRequest::new(1, vec![1, 2]))
			.await;
		assert!(report.available_ids.is_empty());
		assert!(report.suppliers.is_empty());
	}

	#[tokio::test]
	async fn test_panicking_supplier_contributes_nothing() {
		let aggregator = aggregator(
			vec![
				ScriptedSupplier::new("a", 0, &[1]),
				ScriptedSupplier::with_behavior("b", 0, &[2], Behavior::Panic),
			],
			1_000,
		);

		let report = aggregator
			.search_with_report(SearchRequest::new(1, vec![1, 2]))
			.await;

		assert_eq!(report.available_ids, HashSet::from([1]));
		let faulted = report
			.suppliers
			.iter()
			.find(|summary| summary.supplier_id == "b")
			.unwrap();
		assert!(matches!(
			faulted.outcome,
			SupplierOutcome::InternalFault { .. }
		));
	}

	#[tokio::test(start_paused = true)]
	async fn test_branch_ignoring_cancellation_is_aborted() {
		let aggregator = aggregator(
			vec![
				ScriptedSupplier::new("a", 10, &[1]),
				ScriptedSupplier::with_behavior("b", 60_000, &[2], Behavior::IgnoreCancellation),
			],
			500,
		);

		let started = Instant::now();
		let report = aggregator
			.search_with_report(SearchRequest::new(1, vec![1, 2]))
			.await;

		assert_eq!(report.available_ids, HashSet::from([1]));
		assert!(started.elapsed() < Duration::from_millis(1_000));
		assert_eq!(report.failed_count(), 1);
	}

	#[test]
	fn test_stats() {
		let aggregator = aggregator(vec![ScriptedSupplier::new("a", 0, &[])], 15_000);

		assert_eq!(
			aggregator.get_stats(),
			AggregationStats {
				total_suppliers: 1,
				deadline_ms: 15_000,
				branch_grace_ms: 50,
			}
		);
	}

	#[test]
	fn test_config_from_settings() {
		let settings = SearchSettings {
			deadline_ms: 1_200,
			branch_grace_ms: 30,
		};

		let config = AggregatorConfig::from(&settings);
		assert_eq!(config.deadline, Duration::from_millis(1_200));
		assert_eq!(config.branch_grace, Duration::from_millis(30));
	}
}
