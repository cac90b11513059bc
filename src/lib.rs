//! # Mini MC
//!
//! A compact library for two one-dimensional stochastic-simulation primitives that
//! share one random-sampling substrate:
//!
//! - [`metropolis_hastings`]: a random-walk Metropolis–Hastings sampler that draws a
//!   correlated chain from any (possibly unnormalized) target density.
//! - [`integration`]: a Monte Carlo estimator of `∫₀ᴸ f(x) dx` that reports an unbiased
//!   estimate with its variance, a biased `max / 2` estimate for comparison, and (via
//!   [`timing`]) the cost-normalized efficiency `1 / (time · variance + ε)`.
//!
//! Randomness is always an explicitly owned [`rng::RandomSource`]; seeding it fixes the
//! output bit for bit.
//!
//! ## Example
//!
//! ```rust
//! use mini_mc::distributions::{Normal1D, SincExp};
//! use mini_mc::integration::MonteCarloIntegrator;
//! use mini_mc::metropolis_hastings::MetropolisHastings;
//! use mini_mc::rng::SeededSource;
//!
//! let mut mh = MetropolisHastings::new(Normal1D::standard(), SeededSource::new(0));
//! let chain = mh.run(0.0, 10_000).unwrap();
//! assert_eq!(chain.len(), 10_000);
//!
//! let mut mc = MonteCarloIntegrator::new(SincExp::DOMAIN_SIZE, SeededSource::new(0));
//! let unbiased = mc.estimate_unbiased(SincExp, 10_000).unwrap();
//! let biased = mc.estimate_biased_max(SincExp, 10_000).unwrap();
//! assert!(unbiased.variance >= 0.0 && biased >= 0.0);
//! ```

pub mod core;
pub mod distributions;
pub mod error;
pub mod explorer;
pub mod integration;
pub mod io;
pub mod metropolis_hastings;
pub mod rng;
pub mod stats;
pub mod timing;

pub use error::{McError, Result};
