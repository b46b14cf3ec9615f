//! Configuration mocks and builders for tests

use hotels_aggregator::config::*;
use std::collections::BTreeMap;

/// Configuration builders for tests
#[allow(dead_code)]
pub struct MockConfigs;

#[allow(dead_code)]
impl MockConfigs {
	/// Minimal settings: short deadline, no load, reference fleet
	pub fn test_settings() -> Settings {
		Settings {
			search: SearchSettings {
				deadline_ms: 1_000,
				branch_grace_ms: 50,
			},
			suppliers: BTreeMap::new(),
			load: LoadSettings {
				enabled: false,
				..LoadSettings::default()
			},
			logging: LoggingSettings {
				level: "debug".to_string(),
				format: LogFormat::Compact,
				..LoggingSettings::default()
			},
		}
	}

	/// Test settings with a custom deadline
	pub fn test_settings_with_deadline(deadline_ms: u64) -> Settings {
		let mut settings = Self::test_settings();
		settings.search.deadline_ms = deadline_ms;
		settings
	}

	/// Supplier entry that never fails and sees every establishment
	pub fn reliable_supplier(supplier_id: &str, average_search_duration_ms: u64) -> SupplierSettings {
		SupplierSettings {
			supplier_id: supplier_id.to_string(),
			name: Some(format!("Reliable {}", supplier_id)),
			average_search_duration_ms,
			availability_multiplier: 1.0,
			error_percentage: 0.0,
			enabled: true,
		}
	}

	/// Test settings with the given supplier entries keyed by id
	pub fn test_settings_with_suppliers(suppliers: Vec<SupplierSettings>) -> Settings {
		let mut settings = Self::test_settings();
		settings.suppliers = suppliers
			.into_iter()
			.map(|supplier| (supplier.supplier_id.clone(), supplier))
			.collect();
		settings
	}
}
