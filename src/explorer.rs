/*!
Re-running the sampler when an interactive control changes the sample count.

A plotting front end owns a [`ChainExplorer`] and forwards its slider value to
[`ChainExplorer::on_sample_count_changed`]; the explorer truncates the value to an
integer, re-runs the sampler from the configured initial value and keeps the new chain
and its clipped PDF values for drawing. The sampling algorithm itself is unchanged.

```rust
use mini_mc::explorer::ChainExplorer;
use mini_mc::rng::SeededSource;

let mut explorer = ChainExplorer::standard_normal(SeededSource::new(0), 100).unwrap();
assert_eq!(explorer.samples().len(), 100);

explorer.on_sample_count_changed(2_500.7).unwrap();
assert_eq!(explorer.samples().len(), 2_500);
assert_eq!(explorer.pdf_values().len(), 2_500);
```
*/

use crate::distributions::Normal1D;
use crate::error::{McError, Result};
use crate::metropolis_hastings::MetropolisHastings;
use crate::rng::RandomSource;

/// Smallest and largest sample counts the slider offers.
pub const SLIDER_RANGE: (f64, f64) = (10.0, 250_000.0);

pub struct ChainExplorer<R> {
    sampler: MetropolisHastings<Normal1D, R>,
    initial_value: f64,
    samples: Vec<f64>,
    pdf_values: Vec<f64>,
}

impl<R: RandomSource> ChainExplorer<R> {
    /// Samples the standard normal and draws an initial chain of `n` states from zero.
    pub fn standard_normal(source: R, n: usize) -> Result<Self> {
        let mut explorer = Self {
            sampler: MetropolisHastings::new(Normal1D::standard(), source),
            initial_value: 0.0,
            samples: Vec::new(),
            pdf_values: Vec::new(),
        };
        explorer.resample(n)?;
        Ok(explorer)
    }

    /// Slider callback: truncates `value` and re-runs the chain with that many states.
    ///
    /// Values above the slider's upper end are rejected. On error the previously
    /// drawn chain is kept.
    pub fn on_sample_count_changed(&mut self, value: f64) -> Result<&[f64]> {
        if !value.is_finite() || value.trunc() < 1.0 {
            return Err(McError::invalid(format!(
                "slider value must be at least 1, got {value}"
            )));
        }
        if value > SLIDER_RANGE.1 {
            return Err(McError::invalid(format!(
                "slider value must be at most {}, got {value}",
                SLIDER_RANGE.1
            )));
        }
        self.resample(value.trunc() as usize)?;
        Ok(&self.samples)
    }

    fn resample(&mut self, n: usize) -> Result<()> {
        let samples = self.sampler.run(self.initial_value, n)?;
        let target = self.sampler.target;
        self.pdf_values = samples.iter().map(|&x| target.clipped(x)).collect();
        self.samples = samples;
        Ok(())
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Clipped target PDF at each sample, paired index-by-index with [`Self::samples`].
    pub fn pdf_values(&self) -> &[f64] {
        &self.pdf_values
    }

    /// `(sample, pdf)` points for a scatter plot.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .copied()
            .zip(self.pdf_values.iter().copied())
            .collect()
    }
}

/// `n` evenly spaced points on `[-3.5, 3.5]` with the clipped standard normal PDF, the
/// reference curve drawn under the samples.
pub fn reference_curve(n: usize) -> Vec<(f64, f64)> {
    let pdf = Normal1D::standard();
    match n {
        0 => Vec::new(),
        1 => vec![(-3.5, pdf.clipped(-3.5))],
        _ => {
            let step = 7.0 / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    let x = -3.5 + step * i as f64;
                    (x, pdf.clipped(x))
                })
                .collect()
        }
    }
}
