//! Hotels Search Aggregator Library
//!
//! Fans an availability search out to a fleet of simulated hotel suppliers,
//! merges whatever arrives before the deadline and drives the whole thing with
//! a synthetic load generator.

use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};

// Core domain types
pub use hotels_types::{
	chrono,
	uuid,
	EstablishmentId,
	SearchReport,
	SearchRequest,
	SourceId,
	// Supplier contract
	Supplier,
	SupplierConfig,
	// Error types
	SupplierError,
	SupplierOutcome,
	SupplierRegistryError,
	SupplierResult,
	SupplierValidationError,
};

// Suppliers
pub use hotels_suppliers::{RandomProfile, SimulatedSupplier, SupplierProfile, SupplierRegistry};

// Service layer
pub use hotels_service::{
	merge_results, AggregationStats, AggregatorConfig, LoadGenerator, LoadGeneratorError,
	RandomRequestSampler, RequestSampler, SearchAggregator, SearchAggregatorTrait,
};

// Config
pub use hotels_config::{load_config, log_service_info, log_startup_complete, Settings};

// Module aliases
pub mod types {
	pub use hotels_types::*;
}

pub mod suppliers {
	pub use hotels_suppliers::*;
}

pub mod config {
	pub use hotels_config::*;
}

pub mod service {
	pub use hotels_service::*;
}

pub mod mocks;

// Re-export external dependencies for demos
pub use async_trait;

/// Builder pattern for configuring the aggregator
#[derive(Default)]
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	registry: Option<SupplierRegistry>,
	suppliers: Vec<Arc<dyn Supplier>>,
}

impl AggregatorBuilder {
	/// Create a new aggregator builder
	pub fn new() -> Self {
		Self::default()
	}

	/// Create aggregator builder from configuration
	pub fn from_config(settings: Settings) -> Self {
		Self::new().with_settings(settings)
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Add a supplier to the aggregator
	///
	/// Ignored when the settings define their own supplier fleet.
	pub fn with_supplier(mut self, supplier: Arc<dyn Supplier>) -> Self {
		self.suppliers.push(supplier);
		self
	}

	/// Use a prepared supplier registry
	pub fn with_registry(mut self, registry: SupplierRegistry) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Validate the settings and assemble the search aggregator
	pub fn build(self) -> Result<SearchAggregator, Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let has_injected = self.registry.is_some() || !self.suppliers.is_empty();

		let registry = if settings.suppliers.is_empty() && has_injected {
			let mut registry = self.registry.unwrap_or_default();
			for supplier in self.suppliers {
				registry.register(supplier)?;
			}
			registry
		} else {
			if has_injected {
				warn!("Suppliers are configured in settings, ignoring injected suppliers");
			}
			// Falls back to the reference fleet when settings define no suppliers
			SupplierRegistry::from_configs(&settings.enabled_suppliers())?
		};

		info!("Successfully initialized with {} supplier(s)", registry.len());

		Ok(SearchAggregator::new(
			Arc::new(registry),
			AggregatorConfig::from(&settings.search),
		))
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
		use hotels_config::LogFormat;

		// Create env filter using config level or environment variable
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
		let structured = settings.logging.structured;

		match settings.logging.format {
			LogFormat::Json => {
				tracing_subscriber::fmt()
					.json()
					.with_env_filter(env_filter)
					.with_target(structured)
					.with_thread_ids(structured)
					.try_init()
					.map_err(|e| e.to_string())?;
			},
			LogFormat::Pretty => {
				tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter)
					.with_target(structured)
					.with_thread_ids(structured)
					.try_init()
					.map_err(|e| e.to_string())?;
			},
			LogFormat::Compact => {
				tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter)
					.with_target(structured)
					.with_thread_ids(structured)
					.try_init()
					.map_err(|e| e.to_string())?;
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Route unhandled panics through the log
	fn install_panic_hook() {
		std::panic::set_hook(Box::new(|panic_info| {
			error!(panic = %panic_info, "Unhandled panic");
		}));
	}

	/// Run the complete service with all defaults and setup
	///
	/// This method handles everything needed to run the service, including:
	/// - Loading .env file
	/// - Loading configuration with defaults
	/// - Initializing tracing
	/// - Starting the load generator
	/// - Shutting down on Ctrl-C
	pub async fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
		// Load .env file if it exists
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		Self::init_tracing_from_settings(&settings)?;
		Self::install_panic_hook();

		let root_span = info_span!(
			"hotels",
			facility = %settings.logging.facility,
			instance_id = %uuid::Uuid::new_v4()
		);

		self.settings = Some(settings.clone());
		self.serve(settings, using_provided_settings)
			.instrument(root_span)
			.await
	}

	async fn serve(
		self,
		settings: Settings,
		using_provided_settings: bool,
	) -> Result<(), Box<dyn std::error::Error>> {
		log_service_info();

		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);
		hotels_config::log_configuration(&settings);

		let aggregator = Arc::new(self.build()?);

		let mut load_generator = if settings.load.enabled {
			Some(LoadGenerator::from_settings(
				Arc::clone(&aggregator) as Arc<dyn SearchAggregatorTrait>,
				&settings.load,
			)?)
		} else {
			None
		};

		log_startup_complete();
		info!("Press Ctrl-C to stop");

		tokio::signal::ctrl_c().await?;
		info!("Shutdown signal received");

		if let Some(generator) = load_generator.as_mut() {
			generator.shutdown().await?;
		}

		hotels_config::log_service_shutdown();
		Ok(())
	}
}
