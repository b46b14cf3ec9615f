//! Hotels Types
//!
//! Shared models and traits for the hotels search aggregator, organized by
//! business entity.

pub mod constants;
pub mod search;
pub mod suppliers;

// Re-export chrono and uuid for convenience
pub use chrono;
pub use uuid;

pub use search::{
	EstablishmentId, SearchPhase, SearchReport, SearchRequest, SourceId, SupplierSummary,
};

pub use suppliers::{
	Supplier, SupplierConfig, SupplierError, SupplierOutcome, SupplierRegistryError,
	SupplierResult, SupplierValidationError, SupplierValidationResult,
};
