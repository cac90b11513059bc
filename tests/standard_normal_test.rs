//! Tests verifying that the Metropolis-Hastings sampler targets a 1D standard normal.
//!
//! Instead of a KS test, we compare the chain's mean and variance with the target's.

use mini_mc::core::MarkovChain;
use mini_mc::distributions::{Density, Normal1D};
use mini_mc::metropolis_hastings::{MHMarkovChain, MetropolisHastings};
use mini_mc::rng::{RandomSource, SeededSource};
use mini_mc::stats::RunningStats;

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks that a long chain from seed 0 at the default proposal width reproduces the
    /// first two moments of N(0, 1).
    #[test]
    fn test_standard_normal_moments() {
        const SAMPLE_SIZE: usize = 100_000;
        const SEED: u64 = 0;

        let mut mh = MetropolisHastings::new(Normal1D::standard(), SeededSource::new(SEED));
        let samples = mh.run(0.0, SAMPLE_SIZE).expect("Expected sampling to succeed");
        assert_eq!(samples.len(), SAMPLE_SIZE);

        let moments: RunningStats = samples.iter().copied().collect();
        assert!(
            moments.mean().abs() < 0.05,
            "Mean deviation too large: {}",
            moments.mean()
        );
        assert!(
            (moments.variance() - 1.0).abs() < 0.1,
            "Variance deviation too large: {}",
            moments.variance()
        );
    }

    /// Same moments check with a wide proposal.
    #[test]
    fn test_standard_normal_moments_wide_proposal() {
        const SAMPLE_SIZE: usize = 100_000;
        const SEED: u64 = 0;

        // A near-optimal random-walk width keeps the chain well mixed.
        let mut mh =
            MetropolisHastings::new(Normal1D::standard(), SeededSource::new(SEED)).proposal_std(2.4);
        let samples = mh.run(0.0, SAMPLE_SIZE).expect("Expected sampling to succeed");
        assert_eq!(samples.len(), SAMPLE_SIZE);

        let moments: RunningStats = samples.iter().copied().collect();
        assert!(
            moments.mean().abs() < 0.05,
            "Mean deviation too large: {}",
            moments.mean()
        );
        assert!(
            (moments.variance() - 1.0).abs() < 0.1,
            "Variance deviation too large: {}",
            moments.variance()
        );
    }

    /// The normalization of the target must not matter.
    #[test]
    fn test_unnormalized_target_gives_same_chain() {
        let normalized = Normal1D::standard();
        let unnormalized = |x: f64| 1234.5 * (-0.5 * x * x).exp();

        let a = MetropolisHastings::new(normalized, SeededSource::new(3))
            .proposal_std(1.0)
            .run(0.0, 1_000)
            .unwrap();
        let b = MetropolisHastings::new(unnormalized, SeededSource::new(3))
            .proposal_std(1.0)
            .run(0.0, 1_000)
            .unwrap();

        // Ratios agree up to rounding, so almost every decision matches.
        let same = a.iter().zip(&b).filter(|(x, y)| x == y).count();
        assert!(same > 990, "only {same} of 1000 states agree");
    }

    /// Samples of a shifted target must not match the standard normal.
    #[test]
    fn test_wrong_target_is_detected() {
        let mut mh = MetropolisHastings::new(Normal1D::new(3.0, 0.5), SeededSource::new(1))
            .proposal_std(1.0);
        let samples = mh.run(3.0, 20_000).unwrap();
        let moments: RunningStats = samples.iter().copied().collect();
        assert!((moments.mean() - 3.0).abs() < 0.1);
        assert!(moments.mean().abs() > 1.0);
        assert!((moments.variance() - 0.25).abs() < 0.05);
    }

    #[test]
    fn test_chain_is_bit_reproducible() {
        let run = |seed| {
            MetropolisHastings::new(Normal1D::standard(), SeededSource::new(seed))
                .run(0.0, 10_000)
                .unwrap()
        };
        let a = run(42);
        let b = run(42);
        let c = run(43);
        assert!(a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits()));
        assert_ne!(a, c);
    }

    /// Every state is the previous one or the proposal of that step, and every
    /// acceptance probability lies in [0, 1].
    #[test]
    fn test_chain_validity_and_acceptance_bound() {
        let target = |x: f64| if x.abs() < 2.0 { 1.0 + x.sin().abs() } else { 0.0 };
        let mut source = SeededSource::new(17);
        let mut chain = MHMarkovChain::new(&target, &mut source, 1.5, 0.0);

        let mut previous = chain.current_state();
        for _ in 0..20_000 {
            let step = chain.step().unwrap();
            assert_eq!(step.current, previous);
            assert!(
                (0.0..=1.0).contains(&step.acceptance),
                "acceptance out of bounds: {}",
                step.acceptance
            );
            let next = chain.current_state();
            assert!(next == previous || next == step.proposed);
            // The bounded target is never left.
            assert!(target.density(next) > 0.0);
            previous = next;
        }
    }

    /// Chains started where the density underflows to zero stay put.
    #[test]
    fn test_zero_density_start_never_moves() {
        let mut mh = MetropolisHastings::new(Normal1D::standard(), SeededSource::new(0))
            .proposal_std(1.0);
        let samples = mh.run(1e3, 500).unwrap();
        assert!(samples.iter().all(|&x| x == 1e3));
        assert_eq!(mh.source.draws(), 2 * 499);
    }

    #[test]
    fn test_invalid_lengths_draw_nothing() {
        let mut mh = MetropolisHastings::new(Normal1D::standard(), SeededSource::new(0));
        for n in [0i64, -5, i64::MIN] {
            let err = mh.run(0.0, n).unwrap_err();
            assert!(err.is_invalid_argument(), "unexpected error {err:?}");
        }
        assert_eq!(mh.source.draws(), 0);
    }
}
