//! Hotels Service
//!
//! Fan-out availability search across suppliers and synthetic load generation.

pub mod aggregator;
pub mod jobs;

pub use aggregator::{
	merge_results, AggregationStats, AggregatorConfig, SearchAggregator, SearchAggregatorTrait,
};
pub use jobs::{
	LoadGenerator, LoadGeneratorError, LoadGeneratorResult, RandomRequestSampler, RequestSampler,
	SearchTrigger,
};
