//! Per-source search trigger

use futures::FutureExt;
use hotels_types::{SearchRequest, SourceId};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};

use super::sampler::RequestSampler;
use crate::aggregator::SearchAggregatorTrait;

/// Repeatedly issues synthetic searches on behalf of one source
pub struct SearchTrigger {
	source_id: SourceId,
	aggregator: Arc<dyn SearchAggregatorTrait>,
	sampler: Arc<dyn RequestSampler>,
	searches_issued: Arc<AtomicU64>,
}

impl SearchTrigger {
	pub fn new(
		source_id: SourceId,
		aggregator: Arc<dyn SearchAggregatorTrait>,
		sampler: Arc<dyn RequestSampler>,
		searches_issued: Arc<AtomicU64>,
	) -> Self {
		Self {
			source_id,
			aggregator,
			sampler,
			searches_issued,
		}
	}

	pub fn source_id(&self) -> SourceId {
		self.source_id
	}

	/// Run until `shutdown` fires
	///
	/// Both the randomized wait and the search itself race the shutdown
	/// token, so a trigger stops promptly even mid-search.
	pub async fn run(self, shutdown: CancellationToken) {
		let span = info_span!("search_trigger", source_id = self.source_id);
		self.run_loop(shutdown).instrument(span).await
	}

	async fn run_loop(self, shutdown: CancellationToken) {
		debug!("Search trigger started");

		loop {
			let delay = self.sampler.next_delay(self.source_id);

			tokio::select! {
				biased;
				_ = shutdown.cancelled() => break,
				_ = tokio::time::sleep(delay) => {},
			}

			let request = SearchRequest::new(self.source_id, self.sampler.establishment_ids());
			debug!(
				search_id = %request.search_id(),
				establishment_count = request.len(),
				"Issuing synthetic search"
			);

			// Use panic protection to prevent one bad search from killing the trigger
			let aggregator = Arc::clone(&self.aggregator);
			let search =
				AssertUnwindSafe(async move { aggregator.search(request).await }).catch_unwind();

			tokio::select! {
				biased;
				_ = shutdown.cancelled() => break,
				outcome = search => {
					self.searches_issued.fetch_add(1, Ordering::Relaxed);
					match outcome {
						Ok(available) => {
							debug!(result_count = available.len(), "Synthetic search finished");
						},
						Err(_) => {
							error!("Search error: aggregator panicked while searching");
						},
					}
				},
			}
		}

		info!("Search trigger stopped");
	}
}
