//! Search request model

use super::{EstablishmentId, SourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Availability search request
///
/// Fields are private so a request cannot change once it has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	search_id: Uuid,
	source_id: SourceId,
	establishment_ids: HashSet<EstablishmentId>,
	requested_at: DateTime<Utc>,
}

impl SearchRequest {
	/// Create a new request with a freshly generated search ID
	pub fn new(
		source_id: SourceId,
		establishment_ids: impl IntoIterator<Item = EstablishmentId>,
	) -> Self {
		Self::with_id(Uuid::new_v4(), source_id, establishment_ids)
	}

	/// Create a request with an explicit search ID
	pub fn with_id(
		search_id: Uuid,
		source_id: SourceId,
		establishment_ids: impl IntoIterator<Item = EstablishmentId>,
	) -> Self {
		Self {
			search_id,
			source_id,
			establishment_ids: establishment_ids.into_iter().collect(),
			requested_at: Utc::now(),
		}
	}

	pub fn search_id(&self) -> Uuid {
		self.search_id
	}

	pub fn source_id(&self) -> SourceId {
		self.source_id
	}

	pub fn establishment_ids(&self) -> &HashSet<EstablishmentId> {
		&self.establishment_ids
	}

	pub fn requested_at(&self) -> DateTime<Utc> {
		self.requested_at
	}

	pub fn is_empty(&self) -> bool {
		self.establishment_ids.is_empty()
	}

	pub fn len(&self) -> usize {
		self.establishment_ids.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_request_deduplicates_ids() {
		let request = SearchRequest::new(3, vec![5, 6, 5, 7, 6]);

		assert_eq!(request.source_id(), 3);
		assert_eq!(request.len(), 3);
		assert!(request.establishment_ids().contains(&7));
	}

	#[test]
	fn test_new_requests_get_distinct_ids() {
		let first = SearchRequest::new(1, vec![1]);
		let second = SearchRequest::new(1, vec![1]);

		assert_ne!(first.search_id(), second.search_id());
	}

	#[test]
	fn test_empty_request() {
		let request = SearchRequest::new(1, Vec::new());
		assert!(request.is_empty());
	}

	#[test]
	fn test_request_serializes_camel_case() {
		let request = SearchRequest::new(2, vec![10]);
		let json = serde_json::to_value(&request).unwrap();

		assert_eq!(json["sourceId"], 2);
		assert!(json["searchId"].is_string());
		assert_eq!(json["establishmentIds"][0], 10);
	}
}
