//! Timing-controlled suppliers for deadline and cancellation tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hotels_aggregator::{EstablishmentId, Supplier, SupplierResult};
use tokio_util::sync::CancellationToken;

/// Call tracking for verifying which suppliers were actually called
#[derive(Debug, Clone)]
pub struct CallTracker {
	pub calls: Arc<AtomicUsize>,
	pub finished: Arc<AtomicUsize>,
}

impl CallTracker {
	pub fn new() -> Self {
		Self {
			calls: Arc::new(AtomicUsize::new(0)),
			finished: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn record_call(&self) {
		self.calls.fetch_add(1, Ordering::SeqCst);
	}

	pub fn record_finish(&self) {
		self.finished.fetch_add(1, Ordering::SeqCst);
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn finish_count(&self) -> usize {
		self.finished.load(Ordering::SeqCst)
	}
}

/// Supplier that answers after a fixed delay
///
/// Unlike the library mock it can be told to ignore cancellation, which is
/// what a misbehaving supplier integration would look like.
#[derive(Debug, Clone)]
pub struct TimingControlledSupplier {
	pub id: String,
	pub response_delay: Duration,
	pub available_ids: HashSet<EstablishmentId>,
	pub honors_cancellation: bool,
	pub tracker: CallTracker,
}

impl TimingControlledSupplier {
	/// Responds in ~100ms
	pub fn fast(id: &str, available_ids: &[EstablishmentId]) -> Self {
		Self::new(id, 100, available_ids)
	}

	/// Responds in ~1500ms
	pub fn slow(id: &str, available_ids: &[EstablishmentId]) -> Self {
		Self::new(id, 1_500, available_ids)
	}

	/// Responds in ~20s, past any test deadline
	pub fn timeout(id: &str, available_ids: &[EstablishmentId]) -> Self {
		Self::new(id, 20_000, available_ids)
	}

	/// Keeps sleeping after the search has been cancelled
	pub fn uncooperative(id: &str, available_ids: &[EstablishmentId]) -> Self {
		Self {
			honors_cancellation: false,
			..Self::new(id, 20_000, available_ids)
		}
	}

	pub fn new(id: &str, response_delay_ms: u64, available_ids: &[EstablishmentId]) -> Self {
		Self {
			id: id.to_string(),
			response_delay: Duration::from_millis(response_delay_ms),
			available_ids: available_ids.iter().copied().collect(),
			honors_cancellation: true,
			tracker: CallTracker::new(),
		}
	}
}

#[async_trait]
impl Supplier for TimingControlledSupplier {
	fn supplier_id(&self) -> &str {
		&self.id
	}

	async fn get_availability(
		&self,
		establishment_ids: &HashSet<EstablishmentId>,
		cancellation: &CancellationToken,
	) -> SupplierResult {
		self.tracker.record_call();

		if self.honors_cancellation {
			tokio::select! {
				_ = cancellation.cancelled() => {
					return SupplierResult::timed_out(&self.id, 0);
				},
				_ = tokio::time::sleep(self.response_delay) => {},
			}
		} else {
			tokio::time::sleep(self.response_delay).await;
		}

		self.tracker.record_finish();
		let available = establishment_ids
			.intersection(&self.available_ids)
			.copied()
			.collect();
		SupplierResult::completed(&self.id, available, self.response_delay.as_millis() as u64)
	}
}
