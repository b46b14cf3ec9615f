//! Load generator types and definitions

use hotels_types::SourceId;
use thiserror::Error;

/// Errors that can occur while running the load generator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadGeneratorError {
	#[error("Load generator has already been shut down")]
	AlreadyStopped,

	#[error("Search trigger for source {source_id} failed to stop cleanly: {message}")]
	TriggerFailed { source_id: SourceId, message: String },

	#[error("Invalid load generator configuration: {0}")]
	InvalidConfig(String),
}

/// Result type for load generator operations
pub type LoadGeneratorResult<T = ()> = Result<T, LoadGeneratorError>;
