//! Search domain models
//!
//! A search is one aggregate availability lookup issued by a load source and
//! fanned out to every registered supplier.

pub mod request;
pub mod response;

pub use request::SearchRequest;
pub use response::{SearchPhase, SearchReport, SupplierSummary};

/// Identifier of an establishment (the unit of inventory being checked)
pub type EstablishmentId = u32;

/// Identifier of the logical caller/channel that issued a search
pub type SourceId = u32;
