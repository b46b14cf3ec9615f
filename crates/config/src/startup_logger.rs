//! Service startup logging for the hotels search aggregator

use crate::Settings;
use std::env;
use tracing::info;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "hotels-aggregator";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Hotels Search Aggregator Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the effective search and supplier configuration
pub fn log_configuration(settings: &Settings) {
	info!(
		"Search deadline: {}ms (grace {}ms)",
		settings.search.deadline_ms, settings.search.branch_grace_ms
	);

	let suppliers = settings.enabled_suppliers();
	info!("Enabled suppliers: {}", suppliers.len());
	for supplier in &suppliers {
		info!(
			"  - {}: mean {}ms, multiplier {:.2}, errors {:.1}%",
			supplier.display_name(),
			supplier.average_search_duration_ms,
			supplier.availability_multiplier,
			supplier.error_percentage
		);
	}

	if settings.load.enabled {
		info!(
			"Load generator: {} source(s), mean interval {}ms",
			settings.load.sources, settings.load.mean_interval_ms
		);
	} else {
		info!("Load generator disabled");
	}
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 Hotels Search Aggregator Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs startup completion
pub fn log_startup_complete() {
	info!("✅ Hotels Search Aggregator Started Successfully");
}
