/*!
Model functions evaluated pointwise by the sampler and the integrator.

- [`Density`]: a nonnegative, possibly unnormalized target density for
  [`MetropolisHastings`](crate::metropolis_hastings::MetropolisHastings).
- [`Integrand`]: a real-valued function for
  [`MonteCarloIntegrator`](crate::integration::MonteCarloIntegrator).

Any `Fn(f64) -> f64` is both. Two concrete models are provided: the Gaussian
PDF [`Normal1D`] and the reference integrand [`SincExp`], whose integral on
`[0, 10]` is known in closed form.

# Examples

```rust
use mini_mc::distributions::{Density, Integrand, Normal1D, SincExp};

let std_normal = Normal1D::standard();
assert!((std_normal.density(0.0) - 0.398_942_28).abs() < 1e-8);

// Closures work wherever a model is expected.
let unnormalized = |x: f64| (-0.5 * x * x).exp();
assert_eq!(unnormalized.density(0.0), 1.0);

let f = SincExp;
assert!(f.try_value(5.0).is_ok());
assert!(f.try_value(0.0).is_err()); // 0/0 at the left boundary
```
*/

use std::f64::consts::{E, PI};

use crate::error::{McError, Result};

/// A target density, known up to a constant factor.
pub trait Density {
    /// Returns the (unnormalized) density at `x`.
    fn density(&self, x: f64) -> f64;

    /// Evaluates the density, failing on values a density cannot take.
    ///
    /// NaN, infinities and negative values are [`McError::EvaluationFailure`].
    fn try_density(&self, x: f64) -> Result<f64> {
        let value = self.density(x);
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(McError::EvaluationFailure { x, value })
        }
    }
}

impl<F: Fn(f64) -> f64> Density for F {
    fn density(&self, x: f64) -> f64 {
        self(x)
    }
}

/// A function to integrate.
pub trait Integrand {
    /// Returns `f(x)`.
    fn value(&self, x: f64) -> f64;

    /// Evaluates `f(x)`, failing with [`McError::EvaluationFailure`] on
    /// non-finite results.
    fn try_value(&self, x: f64) -> Result<f64> {
        let value = self.value(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(McError::EvaluationFailure { x, value })
        }
    }
}

impl<F: Fn(f64) -> f64> Integrand for F {
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}

/// `1 / sqrt(2π)`.
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/**
A one-dimensional Gaussian with closed-form, normalized PDF.

# Examples

```rust
use mini_mc::distributions::{Density, Normal1D};

let n = Normal1D::new(1.0, 2.0);
assert!((n.density(1.0) - 0.199_471_14).abs() < 1e-8);
```
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal1D {
    pub mean: f64,
    pub std: f64,
}

impl Normal1D {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// N(0, 1).
    pub fn standard() -> Self {
        Self::new(0.0, 1.0)
    }

    /// The PDF clamped to `[0, 1]`, which is what gets plotted against samples.
    pub fn clipped(&self, x: f64) -> f64 {
        self.density(x).clamp(0.0, 1.0)
    }
}

impl Density for Normal1D {
    fn density(&self, x: f64) -> f64 {
        let r_std = 1.0 / self.std;
        let z = (x - self.mean) * r_std;
        FRAC_1_SQRT_2PI * r_std * (-0.5 * z * z).exp()
    }
}

impl Integrand for Normal1D {
    fn value(&self, x: f64) -> f64 {
        self.density(x)
    }
}

/**
`f(x) = sin(a) / a · e^a` with `a = π·sqrt(x / 10)`.

The function is 0/0 at `x = 0`, so evaluating it exactly there yields NaN; the
integrator never samples that point. On `[0, 10]` its integral is
`(10·e^π + 10) / π²`, see [`SincExp::true_integral`].
*/
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SincExp;

impl SincExp {
    /// The domain on which [`SincExp::true_integral`] holds.
    pub const DOMAIN_SIZE: f64 = 10.0;

    /// Exact value of the integral over `[0, 10]`.
    pub fn true_integral() -> f64 {
        (10.0 * E.powf(PI) + 10.0) / (PI * PI)
    }
}

impl Integrand for SincExp {
    fn value(&self, x: f64) -> f64 {
        let arg = PI * (x * 0.1).sqrt();
        (arg.sin() / arg) * E.powf(arg)
    }
}
