//! Default limits and tuning values shared across crates

/// Deadline applied to a whole aggregate search (15 seconds)
pub const DEFAULT_SEARCH_DEADLINE_MS: u64 = 15_000;

/// Time a branch gets to settle after the deadline fires before it is aborted
pub const DEFAULT_BRANCH_GRACE_MS: u64 = 250;

/// Number of suppliers in the reference fleet
pub const DEFAULT_SUPPLIER_COUNT: u32 = 10;

/// Number of independent load sources driving searches
pub const DEFAULT_LOAD_SOURCES: u32 = 9;

/// Mean interval between searches of source 1; source `n` waits `n` times longer
pub const DEFAULT_MEAN_INTERVAL_MS: u64 = 60_000;

/// Maximum mean interval accepted for the load generator (one day)
pub const MAX_MEAN_INTERVAL_MS: u64 = 86_400_000;

/// Upper bound (exclusive) on the size of the sampled establishment range
pub const DEFAULT_MAX_ESTABLISHMENTS: u32 = 100;

/// Per-id decay used when sampling establishment ids for synthetic requests
pub const DEFAULT_INCLUSION_DECAY: f64 = 0.99;

/// Exponent of the availability curve `id^-0.5 * multiplier`
pub const AVAILABILITY_EXPONENT: f64 = -0.5;

/// Probability per successful lookup of the one-off "weird event" log
pub const WEIRD_EVENT_PROBABILITY: f64 = 0.00001;

/// Maximum error percentage a supplier can be configured with
pub const MAX_ERROR_PERCENTAGE: f64 = 100.0;

/// Maximum mean search duration accepted for a supplier (10 minutes)
pub const MAX_AVERAGE_SEARCH_DURATION_MS: u64 = 600_000;
