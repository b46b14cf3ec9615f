//! Synthetic load generation
//!
//! Independent triggers, one per source, issue randomized searches against
//! the aggregator until the generator is shut down.

pub mod sampler;
pub mod scheduler;
pub mod trigger;
pub mod types;

pub use sampler::{RandomRequestSampler, RequestSampler};
pub use scheduler::LoadGenerator;
pub use trigger::SearchTrigger;
pub use types::{LoadGeneratorError, LoadGeneratorResult};
