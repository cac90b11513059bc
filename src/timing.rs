//! Wall-clock instrumentation around the estimators.

use std::time::{Duration, Instant};

use log::debug;

use crate::distributions::Integrand;
use crate::error::Result;
use crate::integration::{IntegralEstimate, MonteCarloIntegrator};
use crate::rng::RandomSource;
use crate::stats::efficiency;

pub struct Timer {
    last: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Returns the time since the previous lap (or construction) and restarts the clock.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed
    }

    /// Logs `msg` together with the lap time at debug level.
    pub fn log<T: std::fmt::Debug>(&mut self, msg: T) -> Duration {
        let elapsed = self.lap();
        debug!("{msg:?}: {elapsed:?}");
        elapsed
    }
}

/// An unbiased estimate together with what it cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEstimate {
    pub estimate: IntegralEstimate,
    pub elapsed: Duration,
}

impl TimedEstimate {
    /// `1 / (elapsed · variance + ε)`, recomputed from the stored measurements.
    pub fn efficiency(&self) -> f64 {
        efficiency(self.elapsed, self.estimate.variance)
    }
}

/// Runs [`MonteCarloIntegrator::estimate_unbiased`] and measures its wall-clock time.
///
/// ```rust
/// use mini_mc::distributions::SincExp;
/// use mini_mc::integration::MonteCarloIntegrator;
/// use mini_mc::rng::SeededSource;
/// use mini_mc::timing::timed_unbiased;
///
/// let mut mc = MonteCarloIntegrator::new(SincExp::DOMAIN_SIZE, SeededSource::new(0));
/// let timed = timed_unbiased(&mut mc, SincExp, 1_000).unwrap();
/// assert!(timed.efficiency() > 0.0);
/// ```
pub fn timed_unbiased<R, F, N>(
    integrator: &mut MonteCarloIntegrator<R>,
    integrand: F,
    n: N,
) -> Result<TimedEstimate>
where
    R: RandomSource,
    F: Integrand,
    N: num_traits::ToPrimitive + std::fmt::Display + Copy,
{
    let mut timer = Timer::new();
    let estimate = integrator.estimate_unbiased(integrand, n)?;
    let elapsed = timer.log("unbiased estimate");
    Ok(TimedEstimate { estimate, elapsed })
}
