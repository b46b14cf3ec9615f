//! Randomized request sampling for synthetic load

use hotels_config::LoadSettings;
use hotels_types::{EstablishmentId, SourceId};
use rand::Rng;
use rand_distr::Exp1;
use std::time::Duration;

/// Source of inter-search delays and requested establishments
#[cfg_attr(test, mockall::automock)]
pub trait RequestSampler: Send + Sync {
	/// Wait before the next search issued by `source_id`
	fn next_delay(&self, source_id: SourceId) -> Duration;

	/// Establishments to check in the next search
	fn establishment_ids(&self) -> Vec<EstablishmentId>;
}

/// Sampler backed by the thread-local random generator
///
/// Source `n` waits `n * mean_interval * Exp(1)` between searches, so
/// higher-numbered sources are proportionally quieter. Requests cover ids
/// `1..=k` for a uniform `k` below `max_establishments`, keeping id `i` with
/// probability `decay^i`.
#[derive(Debug, Clone)]
pub struct RandomRequestSampler {
	mean_interval: Duration,
	max_establishments: u32,
	inclusion_decay: f64,
}

impl RandomRequestSampler {
	pub fn new(mean_interval: Duration, max_establishments: u32, inclusion_decay: f64) -> Self {
		Self {
			mean_interval,
			max_establishments,
			inclusion_decay,
		}
	}
}

impl From<&LoadSettings> for RandomRequestSampler {
	fn from(settings: &LoadSettings) -> Self {
		Self::new(
			settings.mean_interval(),
			settings.max_establishments,
			settings.inclusion_decay,
		)
	}
}

impl RequestSampler for RandomRequestSampler {
	fn next_delay(&self, source_id: SourceId) -> Duration {
		let factor: f64 = rand::rng().sample(Exp1);
		delay_for(self.mean_interval, f64::from(source_id) * factor)
	}

	fn establishment_ids(&self) -> Vec<EstablishmentId> {
		if self.max_establishments == 0 {
			return Vec::new();
		}

		let mut rng = rand::rng();
		let upper = rng.random_range(0..self.max_establishments);

		(1..=upper)
			.filter(|id| rng.random::<f64>() > 1.0 - self.inclusion_decay.powf(f64::from(*id)))
			.collect()
	}
}

/// `interval * factor`, saturating instead of panicking on overflow
fn delay_for(interval: Duration, factor: f64) -> Duration {
	Duration::try_from_secs_f64(interval.as_secs_f64() * factor).unwrap_or(Duration::MAX)
}
