//! Mock suppliers for demos and testing
//!
//! Deterministic suppliers with fixed latency and availability that can be
//! plugged into the builder without touching the random simulation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use hotels_types::{EstablishmentId, Supplier, SupplierError, SupplierResult};

/// Supplier with scripted latency, availability and failure behavior
///
/// Every call is counted, and the number of calls that ran to completion is
/// tracked separately so tests can tell cancelled lookups apart.
#[derive(Debug, Clone)]
pub struct MockSupplier {
	pub id: String,
	pub response_delay: Duration,
	pub available_ids: HashSet<EstablishmentId>,
	pub should_fail: bool,
	calls: Arc<AtomicUsize>,
	completions: Arc<AtomicUsize>,
}

impl MockSupplier {
	/// Create a mock that answers after `response_delay` with `available_ids`
	pub fn new(
		id: &str,
		response_delay: Duration,
		available_ids: impl IntoIterator<Item = EstablishmentId>,
	) -> Self {
		Self {
			id: id.to_string(),
			response_delay,
			available_ids: available_ids.into_iter().collect(),
			should_fail: false,
			calls: Arc::new(AtomicUsize::new(0)),
			completions: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Answers after ~10ms
	pub fn fast(id: &str, available_ids: impl IntoIterator<Item = EstablishmentId>) -> Self {
		Self::new(id, Duration::from_millis(10), available_ids)
	}

	/// Answers after ~1.5s
	pub fn slow(id: &str, available_ids: impl IntoIterator<Item = EstablishmentId>) -> Self {
		Self::new(id, Duration::from_millis(1_500), available_ids)
	}

	/// Takes far longer than any sensible deadline
	pub fn timeout(id: &str, available_ids: impl IntoIterator<Item = EstablishmentId>) -> Self {
		Self::new(id, Duration::from_secs(3_600), available_ids)
	}

	/// Always reports an injected failure after ~10ms
	pub fn failing(id: &str) -> Self {
		Self {
			should_fail: true,
			..Self::new(id, Duration::from_millis(10), [])
		}
	}

	/// Number of lookups started against this supplier
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Number of lookups that were not cancelled
	pub fn completion_count(&self) -> usize {
		self.completions.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Supplier for MockSupplier {
	fn supplier_id(&self) -> &str {
		&self.id
	}

	async fn get_availability(
		&self,
		establishment_ids: &HashSet<EstablishmentId>,
		cancellation: &CancellationToken,
	) -> SupplierResult {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let started = Instant::now();

		tokio::select! {
			biased;
			_ = cancellation.cancelled() => {
				return SupplierResult::timed_out(&self.id, started.elapsed().as_millis() as u64);
			},
			_ = tokio::time::sleep(self.response_delay) => {},
		}

		self.completions.fetch_add(1, Ordering::SeqCst);
		let elapsed_ms = started.elapsed().as_millis() as u64;

		if self.should_fail {
			let error = SupplierError::InjectedFailure {
				supplier_id: self.id.clone(),
			};
			return SupplierResult::from_error(&error, elapsed_ms);
		}

		let available = establishment_ids
			.intersection(&self.available_ids)
			.copied()
			.collect();
		SupplierResult::completed(&self.id, available, elapsed_ms)
	}
}
