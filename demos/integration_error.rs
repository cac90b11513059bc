//! Sweeps the unbiased Monte Carlo estimator over 1..=1000 samples for the reference
//! integrand and prints the error against the closed-form value as `(n, error)` records.

use mini_mc::distributions::SincExp;
use mini_mc::integration::MonteCarloIntegrator;
use mini_mc::io::write_pairs;
use mini_mc::rng::SeededSource;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    const MAX_SAMPLES: usize = 1_000;

    let mut mc = MonteCarloIntegrator::new(SincExp::DOMAIN_SIZE, SeededSource::from_entropy());
    let errors = mc.error_sweep(SincExp, SincExp::true_integral(), MAX_SAMPLES)?;

    write_pairs(std::io::stdout().lock(), &errors)?;
    Ok(())
}
