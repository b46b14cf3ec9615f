//! Hotels Suppliers
//!
//! Supplier implementations and the registry the search aggregator fans out
//! over.

pub mod profile;
pub mod simulated;

pub use hotels_types::{Supplier, SupplierRegistryError, SupplierResult};
pub use profile::{RandomProfile, SupplierProfile};
pub use simulated::SimulatedSupplier;

use hotels_types::constants::limits::DEFAULT_SUPPLIER_COUNT;
use hotels_types::SupplierConfig;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Result type for registry operations
pub type RegistryResult<T = ()> = Result<T, SupplierRegistryError>;

/// Ordered collection of suppliers, unique by supplier ID
#[derive(Debug, Clone, Default)]
pub struct SupplierRegistry {
	suppliers: Vec<Arc<dyn Supplier>>,
}

impl SupplierRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry holding the reference fleet of simulated suppliers
	pub fn with_defaults() -> Self {
		let fleet = SupplierConfig::reference_fleet(DEFAULT_SUPPLIER_COUNT);
		match Self::from_configs(&fleet) {
			Ok(registry) => registry,
			Err(e) => {
				tracing::error!("Failed to build reference supplier fleet: {}", e);
				Self::new()
			},
		}
	}

	/// Build simulated suppliers from configuration
	///
	/// Disabled entries are skipped. All suppliers created here share one
	/// "weird event" flag so that log fires at most once per registry.
	pub fn from_configs(configs: &[SupplierConfig]) -> RegistryResult<Self> {
		let weird_event_seen = Arc::new(AtomicBool::new(false));
		let mut registry = Self::new();

		for config in configs.iter().filter(|config| config.enabled) {
			config.validate()?;
			let supplier = SimulatedSupplier::new(config.clone())
				.with_weird_event_flag(Arc::clone(&weird_event_seen));
			registry.register(Arc::new(supplier))?;
		}

		Ok(registry)
	}

	/// Register a supplier, rejecting duplicate IDs
	pub fn register(&mut self, supplier: Arc<dyn Supplier>) -> RegistryResult {
		if self.get(supplier.supplier_id()).is_some() {
			return Err(SupplierRegistryError::AlreadyRegistered {
				supplier_id: supplier.supplier_id().to_string(),
			});
		}

		tracing::debug!(supplier_id = supplier.supplier_id(), "Registered supplier");
		self.suppliers.push(supplier);
		Ok(())
	}

	/// Remove a supplier by ID, returning it
	pub fn unregister(&mut self, supplier_id: &str) -> RegistryResult<Arc<dyn Supplier>> {
		let position = self
			.suppliers
			.iter()
			.position(|supplier| supplier.supplier_id() == supplier_id)
			.ok_or_else(|| SupplierRegistryError::NotRegistered {
				supplier_id: supplier_id.to_string(),
			})?;

		Ok(self.suppliers.remove(position))
	}

	pub fn get(&self, supplier_id: &str) -> Option<&Arc<dyn Supplier>> {
		self.suppliers
			.iter()
			.find(|supplier| supplier.supplier_id() == supplier_id)
	}

	pub fn get_all(&self) -> &[Arc<dyn Supplier>] {
		&self.suppliers
	}

	pub fn supplier_ids(&self) -> Vec<String> {
		self.suppliers
			.iter()
			.map(|supplier| supplier.supplier_id().to_string())
			.collect()
	}

	pub fn len(&self) -> usize {
		self.suppliers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.suppliers.is_empty()
	}
}
