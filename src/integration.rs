/*!
# Monte Carlo Integration on `[0, L]`

Two estimators of `I = ∫₀ᴸ f(x) dx` from `N` uniform draws `x_i = L·u_i`:

- **Unbiased**: `Î = L · mean(f(x_i))`, reported together with its own variance
  `L² · Var(f(x_i)) / N`. The variance is computed from the samples (population
  variance, dividing by `N`), not from the distance to any known true value.
- **Biased max**: `max(f(x_i)) / 2`. A heuristic that assumes the integrand's peak
  is about twice its integral. It holds only for particular integrand shapes and
  exists to be compared against the unbiased estimate. Do not use it as an
  integral estimate in general.

A point that lands exactly on `x = 0` (a zero draw, or `L·u` underflowing) is moved
to `x = f64::EPSILON`, so an integrand that is singular at the left boundary is never
evaluated there.

```rust
use mini_mc::integration::MonteCarloIntegrator;
use mini_mc::rng::SeededSource;

let mut mc = MonteCarloIntegrator::new(2.0, SeededSource::new(0));
let est = mc.estimate_unbiased(|x: f64| x, 100_000).unwrap();
assert!((est.estimate - 2.0).abs() < 0.05);
```
*/

use log::debug;

use crate::distributions::Integrand;
use crate::error::{sample_count, McError, Result};
use crate::rng::RandomSource;
use crate::stats::RunningStats;

/// Domain size of the reference problem, `[0, 10]`.
pub const DEFAULT_DOMAIN_SIZE: f64 = 10.0;

/// Result of the unbiased estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegralEstimate {
    /// `L · mean(f(x_i))`.
    pub estimate: f64,
    /// Variance of `estimate` itself: `L² · Var(f(x_i)) / N`, never negative.
    pub variance: f64,
    /// Number of draws, always positive.
    pub sample_count: usize,
}

impl IntegralEstimate {
    /// Standard error of the estimate.
    pub fn std_error(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Integrates over `[0, domain_size]` with an owned random stream.
#[derive(Debug, Clone)]
pub struct MonteCarloIntegrator<R> {
    pub domain_size: f64,
    pub source: R,
}

impl<R: RandomSource> MonteCarloIntegrator<R> {
    pub fn new(domain_size: f64, source: R) -> Self {
        Self {
            domain_size,
            source,
        }
    }

    /// Maps the next uniform draw into `(0, domain_size)`.
    ///
    /// The check runs on the product, since `domain_size * u` underflows to zero
    /// for a tiny domain even when `u > 0`.
    fn draw_point(&mut self) -> f64 {
        let x = self.domain_size * self.source.uniform();
        if x == 0.0 {
            f64::EPSILON
        } else {
            x
        }
    }

    fn validate<N>(&self, n: N) -> Result<usize>
    where
        N: num_traits::ToPrimitive + std::fmt::Display + Copy,
    {
        let n = sample_count(n)?;
        if !(self.domain_size.is_finite() && self.domain_size > 0.0) {
            return Err(McError::invalid(format!(
                "domain size must be positive and finite, got {}",
                self.domain_size
            )));
        }
        Ok(n)
    }

    /**
    Unbiased estimate of the integral and its variance from `n` draws.

    The integrand is evaluated once per draw, in draw order.

    # Errors

    - [`McError::InvalidArgument`] for a non-positive `n` or domain size, before any draw.
    - [`McError::EvaluationFailure`] on the first non-finite integrand value.
    */
    pub fn estimate_unbiased<F, N>(&mut self, integrand: F, n: N) -> Result<IntegralEstimate>
    where
        F: Integrand,
        N: num_traits::ToPrimitive + std::fmt::Display + Copy,
    {
        let n = self.validate(n)?;
        self.unbiased_inner(&integrand, n)
    }

    /// The unbiased estimator loop, on an already validated `n`.
    fn unbiased_inner<F>(&mut self, integrand: &F, n: usize) -> Result<IntegralEstimate>
    where
        F: Integrand + ?Sized,
    {
        let mut ys = RunningStats::new();
        for _ in 0..n {
            let x = self.draw_point();
            ys.push(integrand.try_value(x)?);
        }

        let l = self.domain_size;
        let result = IntegralEstimate {
            estimate: l * ys.mean(),
            variance: l * l * ys.variance() / n as f64,
            sample_count: n,
        };
        debug!(
            "unbiased estimate over [0, {l}]: n = {n}, estimate = {:.6}, variance = {:.6e}",
            result.estimate, result.variance
        );
        Ok(result)
    }

    /**
    The biased `max / 2` estimate from `n` draws.

    Only the running maximum is kept. For a nonnegative integrand the result is
    nonnegative.

    # Errors

    Same as [`MonteCarloIntegrator::estimate_unbiased`].
    */
    pub fn estimate_biased_max<F, N>(&mut self, integrand: F, n: N) -> Result<f64>
    where
        F: Integrand,
        N: num_traits::ToPrimitive + std::fmt::Display + Copy,
    {
        let n = self.validate(n)?;
        let mut max = f64::NEG_INFINITY;
        for _ in 0..n {
            let x = self.draw_point();
            max = max.max(integrand.try_value(x)?);
        }

        let estimate = max / 2.0;
        debug!(
            "biased max estimate over [0, {}]: n = {n}, max = {max:.6}, estimate = {estimate:.6}",
            self.domain_size
        );
        Ok(estimate)
    }

    /**
    Runs the unbiased estimator for every sample count `1..=max_n` and returns
    `(n, estimate - true_value)` pairs.

    Every run draws fresh variates from the same stream. The first evaluation
    failure aborts the whole sweep.

    ```rust
    use mini_mc::distributions::SincExp;
    use mini_mc::integration::MonteCarloIntegrator;
    use mini_mc::rng::SeededSource;

    let mut mc = MonteCarloIntegrator::new(SincExp::DOMAIN_SIZE, SeededSource::new(1));
    let errors = mc.error_sweep(SincExp, SincExp::true_integral(), 50).unwrap();
    assert_eq!(errors.len(), 50);
    assert_eq!(errors[0].0, 1.0);
    ```
    */
    pub fn error_sweep<F, N>(
        &mut self,
        integrand: F,
        true_value: f64,
        max_n: N,
    ) -> Result<Vec<(f64, f64)>>
    where
        F: Integrand,
        N: num_traits::ToPrimitive + std::fmt::Display + Copy,
    {
        let max_n = self.validate(max_n)?;
        (1..=max_n)
            .map(|n| {
                let est = self.unbiased_inner(&integrand, n)?;
                Ok((n as f64, est.estimate - true_value))
            })
            .collect()
    }
}
