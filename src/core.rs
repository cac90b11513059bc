use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;

pub trait MarkovChain {
    /// Per-transition record returned by [`MarkovChain::step`].
    type Step;

    /// Does one iteration of the chain, returning what happened in it.
    fn step(&mut self) -> Result<Self::Step>;

    /// Get the current state without stepping.
    fn current_state(&self) -> f64;
}

/// Records `n_steps` states: the current state followed by `n_steps - 1` transitions.
///
/// Entries are written strictly in index order. The first failing transition
/// aborts the run and the partial chain is dropped.
pub fn run_chain<M: MarkovChain>(chain: &mut M, n_steps: usize) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(n_steps);
    if n_steps == 0 {
        return Ok(out);
    }
    out.push(chain.current_state());

    for _ in 1..n_steps {
        chain.step()?;
        out.push(chain.current_state());
    }

    Ok(out)
}

pub fn run_chain_with_progress<M: MarkovChain>(
    chain: &mut M,
    n_steps: usize,
    pb: &ProgressBar,
) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(n_steps);
    pb.set_length(n_steps as u64);
    if n_steps == 0 {
        return Ok(out);
    }
    out.push(chain.current_state());
    pb.inc(1);

    for _ in 1..n_steps {
        chain.step()?;
        out.push(chain.current_state());

        // Update progress bar
        pb.inc(1);
    }

    Ok(out)
}

/// The bar style used by the samplers' `run_progress`.
pub(crate) fn progress_bar(n_steps: usize) -> ProgressBar {
    let pb = ProgressBar::new(n_steps as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::McError;

    /// Moves one unit right per step and fails once it reaches `fail_at`.
    struct Counter {
        state: f64,
        fail_at: f64,
    }

    impl MarkovChain for Counter {
        type Step = ();

        fn step(&mut self) -> Result<()> {
            if self.state + 1.0 >= self.fail_at {
                return Err(McError::EvaluationFailure {
                    x: self.state + 1.0,
                    value: f64::NAN,
                });
            }
            self.state += 1.0;
            Ok(())
        }

        fn current_state(&self) -> f64 {
            self.state
        }
    }

    #[test]
    fn chain_starts_at_current_state() {
        let mut chain = Counter {
            state: 5.0,
            fail_at: f64::INFINITY,
        };
        let out = run_chain(&mut chain, 4).unwrap();
        assert_eq!(out, vec![5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn single_state_chain_takes_no_steps() {
        let mut chain = Counter {
            state: 1.0,
            fail_at: 2.0,
        };
        assert_eq!(run_chain(&mut chain, 1).unwrap(), vec![1.0]);
    }

    #[test]
    fn failing_step_aborts_run() {
        let mut chain = Counter {
            state: 0.0,
            fail_at: 3.0,
        };
        let err = run_chain(&mut chain, 10).unwrap_err();
        assert!(err.is_evaluation_failure());
    }

    #[test]
    fn progress_variant_matches_plain_run() {
        let pb = ProgressBar::hidden();
        let mut a = Counter {
            state: 0.0,
            fail_at: f64::INFINITY,
        };
        let mut b = Counter {
            state: 0.0,
            fail_at: f64::INFINITY,
        };
        let with_progress = run_chain_with_progress(&mut a, 50, &pb).unwrap();
        assert_eq!(with_progress, run_chain(&mut b, 50).unwrap());
        assert_eq!(pb.position(), 50);
    }
}
