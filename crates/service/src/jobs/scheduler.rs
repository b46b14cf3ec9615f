//! Load generator driving one search trigger per source

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, Instrument};

use hotels_config::LoadSettings;
use hotels_types::SourceId;

use super::sampler::{RandomRequestSampler, RequestSampler};
use super::trigger::SearchTrigger;
use super::types::{LoadGeneratorError, LoadGeneratorResult};
use crate::aggregator::SearchAggregatorTrait;

/// Synthetic load generator
///
/// Spawns an independent [`SearchTrigger`] per source. All triggers share one
/// shutdown token and are stopped together by [`LoadGenerator::shutdown`].
pub struct LoadGenerator {
	triggers: Vec<(SourceId, JoinHandle<()>)>,
	shutdown: CancellationToken,
	searches_issued: Arc<AtomicU64>,
	stopped: bool,
}

impl LoadGenerator {
	/// Start triggers for sources `1..=sources`
	pub fn start(
		aggregator: Arc<dyn SearchAggregatorTrait>,
		sampler: Arc<dyn RequestSampler>,
		sources: u32,
	) -> LoadGeneratorResult<Self> {
		if sources == 0 {
			return Err(LoadGeneratorError::InvalidConfig(
				"at least one source is required".to_string(),
			));
		}

		let shutdown = CancellationToken::new();
		let searches_issued = Arc::new(AtomicU64::new(0));

		let triggers = (1..=sources)
			.map(|source_id| {
				let trigger = SearchTrigger::new(
					source_id,
					Arc::clone(&aggregator),
					Arc::clone(&sampler),
					Arc::clone(&searches_issued),
				);
				let handle = tokio::spawn(trigger.run(shutdown.clone()).in_current_span());
				(source_id, handle)
			})
			.collect();

		info!("Started load generator with {} source(s)", sources);

		Ok(Self {
			triggers,
			shutdown,
			searches_issued,
			stopped: false,
		})
	}

	/// Start with the random sampler configured by `settings`
	pub fn from_settings(
		aggregator: Arc<dyn SearchAggregatorTrait>,
		settings: &LoadSettings,
	) -> LoadGeneratorResult<Self> {
		let sampler = Arc::new(RandomRequestSampler::from(settings)) as Arc<dyn RequestSampler>;
		Self::start(aggregator, sampler, settings.sources)
	}

	pub fn source_ids(&self) -> Vec<SourceId> {
		self.triggers.iter().map(|(source_id, _)| *source_id).collect()
	}

	/// Total searches completed across all sources
	pub fn searches_issued(&self) -> u64 {
		self.searches_issued.load(Ordering::Relaxed)
	}

	pub fn is_running(&self) -> bool {
		!self.stopped
	}

	/// Stop every trigger and wait for them to finish
	pub async fn shutdown(&mut self) -> LoadGeneratorResult {
		if self.stopped {
			return Err(LoadGeneratorError::AlreadyStopped);
		}

		info!("Shutting down load generator...");
		self.stopped = true;
		self.shutdown.cancel();

		let mut first_failure = None;
		for (source_id, handle) in self.triggers.drain(..) {
			match handle.await {
				Ok(()) => debug!(source_id, "Search trigger shut down cleanly"),
				Err(e) => {
					error!(source_id, "Search trigger failed to shut down cleanly: {}", e);
					first_failure.get_or_insert(LoadGeneratorError::TriggerFailed {
						source_id,
						message: e.to_string(),
					});
				},
			}
		}

		info!(
			searches_issued = self.searches_issued(),
			"Load generator shutdown complete"
		);

		match first_failure {
			Some(error) => Err(error),
			None => Ok(()),
		}
	}
}

impl Drop for LoadGenerator {
	fn drop(&mut self) {
		self.shutdown.cancel();
	}
}
