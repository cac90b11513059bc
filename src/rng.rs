/*!
# Random Sources

Both algorithms pull their randomness through the [`RandomSource`] trait, so the stream
is always an explicitly owned value rather than process-wide state. [`SeededSource`] is the
standard implementation: a seeded [`SmallRng`] that also counts how many variates it has
handed out.

```rust
use mini_mc::rng::{RandomSource, SeededSource};

let mut a = SeededSource::new(42);
let mut b = SeededSource::new(42);
assert_eq!(a.uniform(), b.uniform());
assert_eq!(a.normal(0.0, 1.0), b.normal(0.0, 1.0));
assert_eq!(a.draws(), 2);
```
*/

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A single stream of uniform and Gaussian variates.
///
/// Every call advances the stream. Implementations must not reseed between calls.
pub trait RandomSource {
    /// Draws from U[0, 1).
    fn uniform(&mut self) -> f64;

    /// Draws from N(mean, stddev²).
    fn normal(&mut self, mean: f64, stddev: f64) -> f64;

    /// Number of variates drawn so far.
    fn draws(&self) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn normal(&mut self, mean: f64, stddev: f64) -> f64 {
        (**self).normal(mean, stddev)
    }

    fn draws(&self) -> u64 {
        (**self).draws()
    }
}

/// A reproducible [`RandomSource`] backed by [`SmallRng`].
#[derive(Debug, Clone)]
pub struct SeededSource {
    /// The seed this source was constructed with.
    pub seed: u64,
    rng: SmallRng,
    draws: u64,
}

impl SeededSource {
    /// Creates a source whose whole output is determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Creates a source with a seed taken from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen::<u64>())
    }

    /// Creates the source for the `stream`-th independent unit of work.
    ///
    /// Stream `i` is seeded with `seed + i`, so two units never share a stream.
    ///
    /// ```rust
    /// use mini_mc::rng::SeededSource;
    ///
    /// assert_eq!(SeededSource::for_stream(42, 3).seed, 45);
    /// ```
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::new(seed.wrapping_add(stream))
    }

    /// Restarts the stream from a new seed and clears the draw counter.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
        self.draws = 0;
        self
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self) -> f64 {
        self.draws += 1;
        self.rng.gen::<f64>()
    }

    fn normal(&mut self, mean: f64, stddev: f64) -> f64 {
        self.draws += 1;
        let z: f64 = self.rng.sample(StandardNormal);
        mean + stddev * z
    }

    fn draws(&self) -> u64 {
        self.draws
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SeededSource::new(7);
        let mut b = SeededSource::new(7);
        for _ in 0..1_000 {
            assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
            assert_eq!(a.normal(1.0, 2.0).to_bits(), b.normal(1.0, 2.0).to_bits());
        }
    }

    #[test]
    fn uniform_stays_in_half_open_unit_interval() {
        let mut src = SeededSource::new(0);
        for _ in 0..10_000 {
            let u = src.uniform();
            assert!((0.0..1.0).contains(&u), "u = {u}");
        }
    }

    #[test]
    fn normal_moments_match_parameters() {
        const N: usize = 100_000;
        let mut src = SeededSource::new(1);
        let xs: Vec<f64> = (0..N).map(|_| src.normal(3.0, 0.5)).collect();
        let mean = xs.iter().sum::<f64>() / N as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / N as f64;
        assert!((mean - 3.0).abs() < 0.01, "mean = {mean}");
        assert!((var - 0.25).abs() < 0.01, "var = {var}");
    }

    #[test]
    fn draws_are_counted_and_reset_by_set_seed() {
        let mut src = SeededSource::new(3);
        src.uniform();
        src.normal(0.0, 1.0);
        src.uniform();
        assert_eq!(src.draws(), 3);

        let src = src.set_seed(3);
        assert_eq!(src.draws(), 0);
        assert_eq!(src.seed, 3);
    }

    #[test]
    fn set_seed_restarts_the_stream() {
        let mut fresh = SeededSource::new(11);
        let mut reused = SeededSource::new(99);
        reused.uniform();
        let mut reused = reused.set_seed(11);
        assert_eq!(fresh.uniform(), reused.uniform());
    }

    #[test]
    fn borrowed_source_advances_the_owner() {
        fn draw<R: RandomSource>(mut source: R) -> f64 {
            source.uniform()
        }
        let mut src = SeededSource::new(5);
        let mut twin = SeededSource::new(5);
        assert_eq!(draw(&mut src), twin.uniform());
        assert_eq!(src.draws(), 1);
    }

    #[test]
    fn streams_are_distinct() {
        let mut a = SeededSource::for_stream(42, 0);
        let mut b = SeededSource::for_stream(42, 1);
        assert_ne!(a.uniform(), b.uniform());
    }
}
