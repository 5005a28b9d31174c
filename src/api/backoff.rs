//! Randomized exponential backoff governing the API retry policy.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;

/// Initial wait interval of [`ExponentialBackOff`].
pub const BACKOFF_INITIAL_INTERVAL: Duration = Duration::from_millis(500);
/// Randomization factor applied as ± jitter around the current interval.
pub const BACKOFF_RANDOMIZATION_FACTOR: f64 = 0.5;
/// Growth factor between consecutive intervals.
pub const BACKOFF_MULTIPLIER: f64 = 1.5;
/// Upper bound for a single wait interval.
pub const BACKOFF_MAX_INTERVAL: Duration = Duration::from_secs(60);
/// Total time after which the policy gives up.
pub const BACKOFF_MAX_ELAPSED_TIME: Duration = Duration::from_secs(180);

/// Retry policy deciding how long to wait before the next attempt.
#[cfg_attr(test, mockall::automock)]
pub trait BackOff: Send {
    /// Returns the next wait duration, or `None` once the policy has given up.
    fn next_backoff(&mut self) -> Option<Duration>;

    /// Restarts the sequence from the initial interval.
    fn reset(&mut self);
}

/// Factory producing a fresh [`BackOff`] for every call, so concurrent calls
/// never share timer or RNG state.
pub type BackOffProvider = Arc<dyn Fn() -> Box<dyn BackOff> + Send + Sync>;

/// Provider of the default [`ExponentialBackOff`] policy.
pub fn default_backoff_provider() -> BackOffProvider {
    Arc::new(|| Box::new(ExponentialBackOff::default()))
}

/// Exponential backoff with randomized intervals and an elapsed-time cutoff.
#[derive(Debug, Clone)]
pub struct ExponentialBackOff {
    pub initial_interval: Duration,
    pub randomization_factor: f64,
    pub multiplier: f64,
    pub max_interval: Duration,
    pub max_elapsed_time: Duration,
    current_interval: Duration,
    started_at: Instant,
}

impl Default for ExponentialBackOff {
    fn default() -> Self {
        Self {
            initial_interval: BACKOFF_INITIAL_INTERVAL,
            randomization_factor: BACKOFF_RANDOMIZATION_FACTOR,
            multiplier: BACKOFF_MULTIPLIER,
            max_interval: BACKOFF_MAX_INTERVAL,
            max_elapsed_time: BACKOFF_MAX_ELAPSED_TIME,
            current_interval: BACKOFF_INITIAL_INTERVAL,
            started_at: Instant::now(),
        }
    }
}

impl ExponentialBackOff {
    /// Applies the randomization factor as a uniform ± jitter around `interval`.
    fn randomized(&self, interval: Duration) -> Duration {
        if self.randomization_factor <= 0.0 {
            return interval;
        }
        let delta = self.randomization_factor * interval.as_secs_f64();
        let low = (interval.as_secs_f64() - delta).max(0.0);
        let high = interval.as_secs_f64() + delta;
        Duration::from_secs_f64(rand::rng().random_range(low..=high))
    }
}

impl BackOff for ExponentialBackOff {
    fn next_backoff(&mut self) -> Option<Duration> {
        if self.started_at.elapsed() > self.max_elapsed_time {
            return None;
        }
        let delay = self.randomized(self.current_interval);
        self.current_interval = self
            .current_interval
            .mul_f64(self.multiplier)
            .min(self.max_interval);
        Some(delay)
    }

    fn reset(&mut self) {
        self.current_interval = self.initial_interval;
        self.started_at = Instant::now();
    }
}
