//! Running statistics for chains and estimators, and the Monte Carlo efficiency metric.

use std::time::Duration;

/// Guard added to the efficiency denominator so it never divides by zero.
pub const EFFICIENCY_EPSILON: f64 = 1e-12;

/// Streaming mean and variance (Welford's update), one value at a time.
///
/// Nothing is retained besides the three accumulators, so it is safe to feed
/// with arbitrarily many values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    n: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.n
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (divides by N). Zero for fewer than two values.
    pub fn variance(&self) -> f64 {
        if self.n < 2 {
            0.0
        } else {
            (self.m2 / self.n as f64).max(0.0)
        }
    }

    /// Bessel-corrected variance (divides by N - 1). Zero for fewer than two values.
    pub fn sample_variance(&self) -> f64 {
        if self.n < 2 {
            0.0
        } else {
            (self.m2 / (self.n - 1) as f64).max(0.0)
        }
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        iter.into_iter().for_each(|x| self.push(x));
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

/// Tracks a sampler run: how many proposals were accepted, how many were
/// rejected because the current state had zero density, and the moments of
/// the visited states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainTracker {
    steps: u64,
    accepted: u64,
    degenerate: u64,
    moments: RunningStats,
}

/// Snapshot of a [`ChainTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    pub steps: u64,
    pub p_accept: f64,
    pub degenerate: u64,
    pub mean: f64,
    pub variance: f64,
}

impl ChainTracker {
    /// Starts tracking from the seed value of the chain.
    pub fn new(initial_state: f64) -> Self {
        let mut moments = RunningStats::new();
        moments.push(initial_state);
        Self {
            moments,
            ..Self::default()
        }
    }

    /// Records one transition to `state`.
    pub fn step(&mut self, state: f64, accepted: bool, degenerate: bool) {
        self.steps += 1;
        self.accepted += u64::from(accepted);
        self.degenerate += u64::from(degenerate);
        self.moments.push(state);
    }

    pub fn p_accept(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.accepted as f64 / self.steps as f64
        }
    }

    pub fn stats(&self) -> ChainStats {
        ChainStats {
            steps: self.steps,
            p_accept: self.p_accept(),
            degenerate: self.degenerate,
            mean: self.moments.mean(),
            variance: self.moments.variance(),
        }
    }
}

/// Monte Carlo figure of merit: `1 / (elapsed · variance + ε)`.
///
/// Larger is better. Depends only on the two measured quantities.
///
/// ```rust
/// use mini_mc::stats::efficiency;
/// use std::time::Duration;
///
/// let fast = efficiency(Duration::from_millis(10), 0.5);
/// let slow = efficiency(Duration::from_millis(20), 0.5);
/// assert!(fast > slow);
/// assert!(efficiency(Duration::ZERO, 0.0).is_finite());
/// ```
pub fn efficiency(elapsed: Duration, variance: f64) -> f64 {
    1.0 / (elapsed.as_secs_f64() * variance + EFFICIENCY_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn running_stats_match_two_pass() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats: RunningStats = xs.iter().copied().collect();
        assert_eq!(stats.count(), 8);
        assert_abs_diff_eq!(stats.mean(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.variance(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.sample_variance(), 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn variance_of_constant_is_zero() {
        let stats: RunningStats = std::iter::repeat(3.25).take(1_000).collect();
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.mean(), 3.25);
    }

    #[test]
    fn single_value_has_zero_variance() {
        let mut stats = RunningStats::new();
        stats.push(1.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.sample_variance(), 0.0);
    }

    #[test]
    fn tracker_counts_acceptances() {
        let mut tracker = ChainTracker::new(0.0);
        tracker.step(1.0, true, false);
        tracker.step(1.0, false, false);
        tracker.step(1.0, false, true);
        tracker.step(3.0, true, false);
        let stats = tracker.stats();
        assert_eq!(stats.steps, 4);
        assert_eq!(stats.degenerate, 1);
        assert_abs_diff_eq!(stats.p_accept, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.mean, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn efficiency_guard_keeps_it_finite() {
        assert_abs_diff_eq!(
            efficiency(Duration::ZERO, 1.0),
            1.0 / EFFICIENCY_EPSILON,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(
            efficiency(Duration::from_secs(2), 0.25),
            1.0 / (0.5 + EFFICIENCY_EPSILON),
            epsilon = 1e-9
        );
    }
}
