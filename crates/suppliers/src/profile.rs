//! Probability profiles driving simulated suppliers

use hotels_types::constants::limits::AVAILABILITY_EXPONENT;
use hotels_types::{EstablishmentId, SupplierConfig};
use rand::Rng;
use rand_distr::Exp1;
use std::time::Duration;

/// Source of latency, failure and availability decisions for a supplier
#[cfg_attr(test, mockall::automock)]
pub trait SupplierProfile: Send + Sync {
	/// Latency of the next lookup
	fn search_duration(&self) -> Duration;

	/// Whether the next completed lookup should report a fault
	fn is_error(&self) -> bool;

	/// Whether `establishment_id` is available for this lookup
	fn is_available(&self, establishment_id: EstablishmentId) -> bool;
}

/// Profile backed by the thread-local random generator
///
/// Latency is exponentially distributed around the configured mean, and
/// availability falls off as `id^-0.5 * multiplier`. Each call draws from
/// `rand::rng()`, so concurrent branches never contend on a shared generator.
#[derive(Debug, Clone)]
pub struct RandomProfile {
	average_search_duration: Duration,
	availability_multiplier: f64,
	error_probability: f64,
}

impl RandomProfile {
	pub fn new(
		average_search_duration: Duration,
		availability_multiplier: f64,
		error_percentage: f64,
	) -> Self {
		Self {
			average_search_duration,
			availability_multiplier,
			error_probability: error_percentage / 100.0,
		}
	}

	/// Chance that `establishment_id` is reported available, clamped to `[0, 1]`
	pub fn availability_probability(&self, establishment_id: EstablishmentId) -> f64 {
		let curve = f64::from(establishment_id).powf(AVAILABILITY_EXPONENT);
		(curve * self.availability_multiplier).clamp(0.0, 1.0)
	}
}

impl From<&SupplierConfig> for RandomProfile {
	fn from(config: &SupplierConfig) -> Self {
		Self::new(
			config.average_search_duration(),
			config.availability_multiplier,
			config.error_percentage,
		)
	}
}

impl SupplierProfile for RandomProfile {
	fn search_duration(&self) -> Duration {
		let factor: f64 = rand::rng().sample(Exp1);
		self.average_search_duration.mul_f64(factor)
	}

	fn is_error(&self) -> bool {
		rand::rng().random::<f64>() < self.error_probability
	}

	fn is_available(&self, establishment_id: EstablishmentId) -> bool {
		self.availability_probability(establishment_id) > rand::rng().random::<f64>()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_availability_decreases_with_id() {
		let profile = RandomProfile::new(Duration::from_secs(1), 1.0, 0.0);

		assert_eq!(profile.availability_probability(1), 1.0);
		assert!(profile.availability_probability(4) > profile.availability_probability(100));
		assert!((profile.availability_probability(100) - 0.1).abs() < 1e-9);
	}

	#[test]
	fn test_multiplier_scales_and_clamps() {
		let profile = RandomProfile::new(Duration::from_secs(1), 3.0, 0.0);

		assert!((profile.availability_probability(100) - 0.3).abs() < 1e-9);
		assert_eq!(profile.availability_probability(4), 1.0);
	}

	#[test]
	fn test_zero_error_rate_never_fails() {
		let profile = RandomProfile::new(Duration::from_millis(1), 1.0, 0.0);
		assert!((0..1000).all(|_| !profile.is_error()));

		let profile = RandomProfile::new(Duration::from_millis(1), 1.0, 100.0);
		assert!((0..1000).all(|_| profile.is_error()));
	}

	#[test]
	fn test_zero_multiplier_is_never_available() {
		let profile = RandomProfile::new(Duration::from_millis(1), 0.0, 0.0);
		assert!((1..500).all(|id| !profile.is_available(id)));
	}

	#[test]
	fn test_zero_mean_duration_is_instant() {
		let profile = RandomProfile::new(Duration::ZERO, 1.0, 0.0);
		assert_eq!(profile.search_duration(), Duration::ZERO);
	}

	#[test]
	fn test_from_reference_config() {
		let profile = RandomProfile::from(&SupplierConfig::reference(9));

		assert_eq!(profile.average_search_duration, Duration::from_secs(9));
		assert_eq!(profile.availability_multiplier, 3.0);
		assert!((profile.error_probability - 0.09).abs() < 1e-12);
	}
}
