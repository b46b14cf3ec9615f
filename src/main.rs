//! Hotels Search Aggregator
//!
//! Main entry point for the aggregator service

use hotels_aggregator::AggregatorBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Run the complete service with all defaults and setup handled automatically
	AggregatorBuilder::new().run().await
}
