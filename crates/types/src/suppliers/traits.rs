//! Core supplier trait for availability backends

use super::SupplierResult;
use crate::search::EstablishmentId;
use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

/// Availability backend queried by the search aggregator
///
/// Implementations must always settle into a [`SupplierResult`]: when
/// `cancellation` fires the call returns promptly with an empty, timed-out
/// result, and backend faults become empty results as well.
#[async_trait]
pub trait Supplier: Send + Sync + Debug {
	/// Stable identifier used for registration and log correlation
	fn supplier_id(&self) -> &str;

	/// Human-readable name
	fn name(&self) -> &str {
		self.supplier_id()
	}

	/// Report which of `establishment_ids` are available
	///
	/// The returned ids are always a subset of `establishment_ids`.
	async fn get_availability(
		&self,
		establishment_ids: &HashSet<EstablishmentId>,
		cancellation: &CancellationToken,
	) -> SupplierResult;
}
