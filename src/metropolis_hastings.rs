/*!
# Metropolis–Hastings Sampler

A random-walk Metropolis–Hastings sampler for one-dimensional targets. Candidates are drawn
from a Gaussian centred on the current state, `x* ~ N(x_i, σ²)`. Because that proposal is
symmetric, `q(x* | x_i) = q(x_i | x*)`, the proposal terms cancel out of the acceptance ratio
and only the ratio of target densities remains:

\[
A(x_i, x^*) = \min\left(1, \frac{p(x^*)}{p(x_i)}\right)
\]

so the target never needs to be normalized.

## Overview

- **Target (`D`)**: any [`Density`], including plain closures.
- **Randomness (`R`)**: any [`RandomSource`]; the sampler owns it, and a run consumes exactly
  two variates per transition (first the uniform `u`, then the proposal).
- **Chain**: `run` returns `N` states. The first is the initial value, every later one is
  either the candidate proposed at that step or a copy of its predecessor.

## Example Usage

```rust
use mini_mc::distributions::Normal1D;
use mini_mc::metropolis_hastings::MetropolisHastings;
use mini_mc::rng::SeededSource;

let mut mh = MetropolisHastings::new(Normal1D::standard(), SeededSource::new(42));
let chain = mh.run(0.0, 1_000).unwrap();
assert_eq!(chain.len(), 1_000);
assert_eq!(chain[0], 0.0);
```
*/

use log::{debug, warn};

use crate::core::{progress_bar, run_chain, run_chain_with_progress, MarkovChain};
use crate::distributions::Density;
use crate::error::{sample_count, McError, Result};
use crate::rng::RandomSource;
use crate::stats::{ChainStats, ChainTracker};

/// Standard deviation of the Gaussian proposal unless configured otherwise.
pub const DEFAULT_PROPOSAL_STD: f64 = 0.05;

/// What happened during one transition of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposalStep {
    /// State before the transition.
    pub current: f64,
    /// Candidate drawn from `N(current, σ²)`.
    pub proposed: f64,
    /// The uniform draw compared against `acceptance`.
    pub u: f64,
    /// Acceptance probability, always in `[0, 1]`.
    pub acceptance: f64,
    /// Whether `proposed` became the new state.
    pub accepted: bool,
}

impl ProposalStep {
    /// The state after the transition.
    pub fn next_state(&self) -> f64 {
        if self.accepted {
            self.proposed
        } else {
            self.current
        }
    }
}

/// Acceptance probability for a symmetric proposal.
///
/// A current density of zero gives `0`, so the move is rejected instead of
/// dividing by zero.
pub fn acceptance_ratio(current_density: f64, proposed_density: f64) -> f64 {
    if current_density <= 0.0 {
        return 0.0;
    }
    (proposed_density / current_density).min(1.0).clamp(0.0, 1.0)
}

/**
A single Metropolis–Hastings chain over borrowed target and randomness.

# Examples

```rust
use mini_mc::core::MarkovChain;
use mini_mc::distributions::Normal1D;
use mini_mc::metropolis_hastings::MHMarkovChain;
use mini_mc::rng::SeededSource;

let target = Normal1D::standard();
let mut source = SeededSource::new(1);
let mut chain = MHMarkovChain::new(&target, &mut source, 0.5, 0.0);
let step = chain.step().unwrap();
assert!((0.0..=1.0).contains(&step.acceptance));
assert_eq!(chain.current_state(), step.next_state());
```
*/
#[derive(Debug)]
pub struct MHMarkovChain<'a, D, R> {
    /// The target distribution to sample from.
    pub target: &'a D,
    /// Standard deviation of the Gaussian proposal.
    pub proposal_std: f64,
    /// The current state of the chain.
    pub current_state: f64,
    source: &'a mut R,
    tracker: ChainTracker,
}

impl<'a, D, R> MHMarkovChain<'a, D, R>
where
    D: Density,
    R: RandomSource,
{
    pub fn new(target: &'a D, source: &'a mut R, proposal_std: f64, initial_state: f64) -> Self {
        Self {
            target,
            proposal_std,
            current_state: initial_state,
            source,
            tracker: ChainTracker::new(initial_state),
        }
    }

    /// Acceptance rate and moments of the states visited so far.
    pub fn stats(&self) -> ChainStats {
        self.tracker.stats()
    }
}

impl<D, R> MarkovChain for MHMarkovChain<'_, D, R>
where
    D: Density,
    R: RandomSource,
{
    type Step = ProposalStep;

    /**
    Performs one Metropolis–Hastings update step.

    Draws `u ~ U[0, 1)`, then a candidate `x* ~ N(x_i, σ²)`, and moves to `x*` if
    `u < A(x_i, x*)`. If the density at the current state has underflowed to zero the
    move is rejected and the chain stays where it is.

    # Errors

    [`McError::EvaluationFailure`] if the target returns NaN, an infinity or a negative
    value at either point. The state is left unchanged in that case.
    */
    fn step(&mut self) -> Result<ProposalStep> {
        let current = self.current_state;
        let u = self.source.uniform();
        let proposed = self.source.normal(current, self.proposal_std);

        let current_density = self.target.try_density(current)?;
        let proposed_density = self.target.try_density(proposed)?;
        let acceptance = acceptance_ratio(current_density, proposed_density);

        let accepted = u < acceptance;
        if accepted {
            self.current_state = proposed;
        }
        self.tracker
            .step(self.current_state, accepted, current_density == 0.0);

        Ok(ProposalStep {
            current,
            proposed,
            u,
            acceptance,
            accepted,
        })
    }

    fn current_state(&self) -> f64 {
        self.current_state
    }
}

/**
Owns a target, a proposal width and a random stream, and produces whole chains.

Consecutive runs continue the same random stream, so a second `run` does not repeat
the first one. Build a fresh sampler from the same seed to reproduce a run.
*/
#[derive(Debug, Clone)]
pub struct MetropolisHastings<D, R> {
    /// The target distribution we want to sample from.
    pub target: D,
    /// Standard deviation of the Gaussian proposal.
    pub proposal_std: f64,
    /// The random stream all chains of this sampler draw from.
    pub source: R,
}

impl<D, R> MetropolisHastings<D, R>
where
    D: Density,
    R: RandomSource,
{
    /// Creates a sampler using [`DEFAULT_PROPOSAL_STD`].
    pub fn new(target: D, source: R) -> Self {
        Self {
            target,
            proposal_std: DEFAULT_PROPOSAL_STD,
            source,
        }
    }

    /// Sets the standard deviation of the Gaussian proposal.
    pub fn proposal_std(mut self, proposal_std: f64) -> Self {
        self.proposal_std = proposal_std;
        self
    }

    /**
    Runs a chain of `n` states starting at `initial_value`.

    # Errors

    - [`McError::InvalidArgument`] if `n` is not a positive integer, the proposal
      width is not positive and finite, or `initial_value` is not finite. Nothing is
      drawn from the random stream in that case.
    - [`McError::EvaluationFailure`] as soon as the target misbehaves.

    # Examples

    ```rust
    use mini_mc::metropolis_hastings::MetropolisHastings;
    use mini_mc::rng::{RandomSource, SeededSource};

    let mut mh = MetropolisHastings::new(|x: f64| (-x.abs()).exp(), SeededSource::new(3));
    assert!(mh.run(0.0, -5).unwrap_err().is_invalid_argument());
    assert_eq!(mh.source.draws(), 0);
    ```
    */
    pub fn run<N>(&mut self, initial_value: f64, n: N) -> Result<Vec<f64>>
    where
        N: num_traits::ToPrimitive + std::fmt::Display + Copy,
    {
        let n = self.validate(initial_value, n)?;
        let mut chain = MHMarkovChain::new(
            &self.target,
            &mut self.source,
            self.proposal_std,
            initial_value,
        );
        let samples = run_chain(&mut chain, n)?;
        log_summary(&chain.stats());
        Ok(samples)
    }

    /// Same as [`MetropolisHastings::run`], with a progress bar on stderr.
    pub fn run_progress<N>(&mut self, initial_value: f64, n: N) -> Result<Vec<f64>>
    where
        N: num_traits::ToPrimitive + std::fmt::Display + Copy,
    {
        let n = self.validate(initial_value, n)?;
        let pb = progress_bar(n);
        pb.set_prefix("Chain");
        let mut chain = MHMarkovChain::new(
            &self.target,
            &mut self.source,
            self.proposal_std,
            initial_value,
        );
        let samples = run_chain_with_progress(&mut chain, n, &pb)?;
        pb.finish_with_message("Done!");
        log_summary(&chain.stats());
        Ok(samples)
    }

    fn validate<N>(&self, initial_value: f64, n: N) -> Result<usize>
    where
        N: num_traits::ToPrimitive + std::fmt::Display + Copy,
    {
        let n = sample_count(n)?;
        if !(self.proposal_std.is_finite() && self.proposal_std > 0.0) {
            return Err(McError::invalid(format!(
                "proposal standard deviation must be positive and finite, got {}",
                self.proposal_std
            )));
        }
        if !initial_value.is_finite() {
            return Err(McError::invalid(format!(
                "initial value must be finite, got {initial_value}"
            )));
        }
        Ok(n)
    }
}

fn log_summary(stats: &ChainStats) {
    debug!(
        "metropolis-hastings: {} states, acceptance rate {:.4}, mean {:.4}, variance {:.4}",
        stats.steps + 1,
        stats.p_accept,
        stats.mean,
        stats.variance
    );
    if stats.degenerate > 0 {
        warn!(
            "metropolis-hastings: {} of {} steps rejected because the current density was zero",
            stats.degenerate, stats.steps
        );
    }
}
