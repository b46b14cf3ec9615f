//! End-to-end tests for the synthetic load generator

mod mocks;

use std::sync::Arc;
use std::time::Duration;

use hotels_aggregator::config::LoadSettings;
use hotels_aggregator::mocks::MockSupplier;
use hotels_aggregator::{
	AggregatorBuilder, EstablishmentId, LoadGenerator, LoadGeneratorError, RequestSampler,
	SearchAggregatorTrait, SourceId,
};
use mocks::MockConfigs;

/// Sampler with a fixed interval and request
struct FixedSampler {
	interval: Duration,
	ids: Vec<EstablishmentId>,
}

impl RequestSampler for FixedSampler {
	fn next_delay(&self, _source_id: SourceId) -> Duration {
		self.interval
	}

	fn establishment_ids(&self) -> Vec<EstablishmentId> {
		self.ids.clone()
	}
}

#[tokio::test(start_paused = true)]
async fn test_load_generator_drives_aggregator() {
	let supplier = MockSupplier::fast("fast", [1, 2, 3]);
	let aggregator = AggregatorBuilder::from_config(MockConfigs::test_settings())
		.with_supplier(Arc::new(supplier.clone()))
		.build()
		.unwrap();
	let sampler = Arc::new(FixedSampler {
		interval: Duration::from_millis(100),
		ids: vec![1, 2],
	});

	let mut generator = LoadGenerator::start(
		Arc::new(aggregator) as Arc<dyn SearchAggregatorTrait>,
		sampler,
		2,
	)
	.unwrap();

	tokio::time::sleep(Duration::from_secs(1)).await;
	generator.shutdown().await.unwrap();

	let issued = generator.searches_issued();
	assert!(issued >= 10);
	assert!(supplier.call_count() as u64 >= issued);
}

#[tokio::test(start_paused = true)]
async fn test_load_generator_from_settings() {
	let aggregator = AggregatorBuilder::from_config(MockConfigs::test_settings())
		.with_supplier(Arc::new(MockSupplier::fast("fast", 1..=100)))
		.build()
		.unwrap();
	let settings = LoadSettings {
		enabled: true,
		sources: 3,
		mean_interval_ms: 50,
		..LoadSettings::default()
	};

	let mut generator =
		LoadGenerator::from_settings(Arc::new(aggregator) as Arc<dyn SearchAggregatorTrait>, &settings)
			.unwrap();
	assert_eq!(generator.source_ids(), vec![1, 2, 3]);

	tokio::time::sleep(Duration::from_secs(5)).await;

	assert!(generator.shutdown().await.is_ok());
	assert!(generator.searches_issued() > 0);
	assert_eq!(
		generator.shutdown().await,
		Err(LoadGeneratorError::AlreadyStopped)
	);
}
