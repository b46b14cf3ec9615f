//! Simulated supplier backed by a probability profile

use crate::profile::{RandomProfile, SupplierProfile};
use async_trait::async_trait;
use hotels_types::constants::limits::WEIRD_EVENT_PROBABILITY;
use hotels_types::{EstablishmentId, Supplier, SupplierConfig, SupplierError, SupplierResult};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Supplier that simulates an availability backend
///
/// Each lookup sleeps for a latency drawn from the profile, honoring the
/// cancellation signal while suspended, then either injects a failure or
/// filters the requested ids through the profile's availability function.
pub struct SimulatedSupplier {
	config: SupplierConfig,
	profile: Arc<dyn SupplierProfile>,
	weird_event_seen: Arc<AtomicBool>,
	weird_event_probability: f64,
}

impl SimulatedSupplier {
	/// Create a supplier whose decisions come from the thread-local RNG
	pub fn new(config: SupplierConfig) -> Self {
		let profile = Arc::new(RandomProfile::from(&config));
		Self::with_profile(config, profile)
	}

	/// Create a supplier with a custom profile
	pub fn with_profile(config: SupplierConfig, profile: Arc<dyn SupplierProfile>) -> Self {
		Self {
			config,
			profile,
			weird_event_seen: Arc::new(AtomicBool::new(false)),
			weird_event_probability: WEIRD_EVENT_PROBABILITY,
		}
	}

	/// Share the one-off "weird event" flag with other suppliers
	pub fn with_weird_event_flag(mut self, flag: Arc<AtomicBool>) -> Self {
		self.weird_event_seen = flag;
		self
	}

	/// Override the per-lookup chance of the "weird event"
	pub fn with_weird_event_probability(mut self, probability: f64) -> Self {
		self.weird_event_probability = probability;
		self
	}

	pub fn config(&self) -> &SupplierConfig {
		&self.config
	}

	async fn lookup(
		&self,
		establishment_ids: &HashSet<EstablishmentId>,
		cancellation: &CancellationToken,
		started: Instant,
	) -> Result<HashSet<EstablishmentId>, SupplierError> {
		let duration = self.profile.search_duration();
		debug!(
			supplier_id = %self.config.supplier_id,
			simulated_ms = duration.as_millis() as u64,
			"Simulating supplier latency"
		);

		tokio::select! {
			biased;
			_ = cancellation.cancelled() => {
				return Err(SupplierError::Timeout {
					supplier_id: self.config.supplier_id.clone(),
					elapsed_ms: started.elapsed().as_millis() as u64,
				});
			},
			_ = tokio::time::sleep(duration) => {},
		}

		if self.profile.is_error() {
			return Err(SupplierError::InjectedFailure {
				supplier_id: self.config.supplier_id.clone(),
			});
		}

		let available = establishment_ids
			.iter()
			.copied()
			.filter(|id| self.profile.is_available(*id))
			.collect();

		self.maybe_report_weird_event();

		Ok(available)
	}

	fn maybe_report_weird_event(&self) {
		if self.weird_event_seen.load(Ordering::Relaxed) {
			return;
		}
		if rand::rng().random::<f64>() >= self.weird_event_probability {
			return;
		}
		if self
			.weird_event_seen
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
			.is_ok()
		{
			info!(supplier_id = %self.config.supplier_id, "Something weird happened!");
		}
	}
}

impl fmt::Debug for SimulatedSupplier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SimulatedSupplier")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl Supplier for SimulatedSupplier {
	fn supplier_id(&self) -> &str {
		&self.config.supplier_id
	}

	fn name(&self) -> &str {
		self.config.display_name()
	}

	async fn get_availability(
		&self,
		establishment_ids: &HashSet<EstablishmentId>,
		cancellation: &CancellationToken,
	) -> SupplierResult {
		let started = Instant::now();
		let supplier_id = self.config.supplier_id.as_str();

		info!(
			supplier_id,
			establishment_count = establishment_ids.len(),
			establishment_ids = ?establishment_ids,
			"Supplier search starting"
		);

		let outcome = self.lookup(establishment_ids, cancellation, started).await;
		let elapsed = started.elapsed();
		let elapsed_ms = elapsed.as_millis() as u64;

		match outcome {
			Ok(available_ids) => {
				info!(
					supplier_id,
					elapsed_ms,
					result_count = available_ids.len(),
					available_ids = ?available_ids,
					outcome = "completed",
					"Supplier search took {:.2}ms and returned {} result(s)",
					elapsed.as_secs_f64() * 1000.0,
					available_ids.len()
				);
				SupplierResult::completed(supplier_id, available_ids, elapsed_ms)
			},
			Err(e @ SupplierError::Timeout { .. }) => {
				warn!(supplier_id, elapsed_ms, outcome = "timed_out", "{}", e);
				SupplierResult::from_error(&e, elapsed_ms)
			},
			Err(e) => {
				error!(
					supplier_id,
					elapsed_ms,
					outcome = e.outcome().as_str(),
					"{}",
					e
				);
				SupplierResult::from_error(&e, elapsed_ms)
			},
		}
	}
}
