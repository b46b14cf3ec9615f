//! Centralized mocks and fixtures for testing
//!
//! Reusable suppliers and configurations shared by the integration tests.

pub mod configs;
pub mod suppliers;

// Re-export commonly used items for convenience
#[allow(unused_imports)]
pub use configs::MockConfigs;
#[allow(unused_imports)]
pub use suppliers::{CallTracker, TimingControlledSupplier};
