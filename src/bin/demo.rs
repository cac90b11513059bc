//! Command-line demo: samples a standard normal with Metropolis-Hastings and compares the
//! Monte Carlo estimators on the reference integrand.

use std::error::Error;
use std::io::BufRead;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use mini_mc::distributions::{Normal1D, SincExp};
use mini_mc::explorer::{reference_curve, ChainExplorer, SLIDER_RANGE};
use mini_mc::integration::{MonteCarloIntegrator, DEFAULT_DOMAIN_SIZE};
use mini_mc::io::save_pairs;
use mini_mc::metropolis_hastings::{MetropolisHastings, DEFAULT_PROPOSAL_STD};
use mini_mc::rng::SeededSource;
use mini_mc::stats::RunningStats;
use mini_mc::timing::{timed_unbiased, Timer};

#[derive(Parser, Debug)]
#[command(name = "mini-mc-demo", about = "Metropolis-Hastings and Monte Carlo integration demo")]
struct Cli {
    /// Seed for the random stream; drawn from entropy when omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample the standard normal and report the chain's moments.
    Sample(SampleArgs),
    /// Sweep the unbiased estimator over sample counts and compare it with the max estimator.
    Integrate(IntegrateArgs),
    /// Re-run the sampler for every sample count read from stdin.
    Explore(ExploreArgs),
}

#[derive(ClapArgs, Debug)]
struct SampleArgs {
    /// Number of chain states.
    #[arg(long, default_value_t = 100_000)]
    samples: usize,
    /// Standard deviation of the Gaussian proposal.
    #[arg(long, default_value_t = DEFAULT_PROPOSAL_STD)]
    proposal_std: f64,
    /// Show a progress bar.
    #[arg(long)]
    progress: bool,
    /// Write the `(sample, pdf)` points here, one `(x, y)` per line.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct ExploreArgs {
    /// Sample count of the first chain.
    #[arg(long, default_value_t = 100)]
    initial: usize,
}

#[derive(ClapArgs, Debug)]
struct IntegrateArgs {
    /// Largest sample count in the error sweep.
    #[arg(long, default_value_t = 1_000)]
    max_samples: usize,
    /// Sample count for the estimator comparison.
    #[arg(long, default_value_t = 100_000)]
    samples: usize,
    /// Write the `(n, error)` sweep here, one `(x, y)` per line.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let source = match cli.seed {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_entropy(),
    };
    println!("Seed: {}", source.seed);

    match cli.command {
        Command::Sample(args) => run_sample(args, source),
        Command::Integrate(args) => run_integrate(args, source),
        Command::Explore(args) => run_explore(args, source),
    }
}

fn run_sample(args: SampleArgs, source: SeededSource) -> Result<(), Box<dyn Error>> {
    let target = Normal1D::standard();
    let mut mh = MetropolisHastings::new(target, source).proposal_std(args.proposal_std);
    let mut timer = Timer::new();
    let samples = if args.progress {
        mh.run_progress(0.0, args.samples)?
    } else {
        mh.run(0.0, args.samples)?
    };
    let elapsed = timer.lap();

    let moments: RunningStats = samples.iter().copied().collect();
    println!("Generated {} samples in {:.3?}", samples.len(), elapsed);
    println!(
        "Mean: {:.4}, variance: {:.4} (target: 0, 1)",
        moments.mean(),
        moments.variance()
    );

    if let Some(path) = args.out {
        let points: Vec<(f64, f64)> = samples.iter().map(|&x| (x, target.clipped(x))).collect();
        save_pairs(&path, &points)?;
        let reference = path.with_extension("reference.txt");
        save_pairs(&reference, &reference_curve(samples.len()))?;
        println!(
            "Saved samples to {} and the reference curve to {}",
            path.display(),
            reference.display()
        );
    }
    Ok(())
}

fn run_explore(args: ExploreArgs, source: SeededSource) -> Result<(), Box<dyn Error>> {
    let mut explorer = ChainExplorer::standard_normal(source, args.initial)?;
    println!(
        "Enter sample counts between {} and {}, one per line.",
        SLIDER_RANGE.0, SLIDER_RANGE.1
    );
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let value: f64 = match line.trim().parse() {
            Ok(value) => value,
            Err(err) => {
                eprintln!("Ignoring {line:?}: {err}");
                continue;
            }
        };
        match explorer.on_sample_count_changed(value.clamp(SLIDER_RANGE.0, SLIDER_RANGE.1)) {
            Ok(samples) => {
                let moments: RunningStats = samples.iter().copied().collect();
                println!(
                    "{} samples: mean {:.4}, variance {:.4}",
                    samples.len(),
                    moments.mean(),
                    moments.variance()
                );
            }
            Err(err) => eprintln!("{err}"),
        }
    }
    Ok(())
}

fn run_integrate(args: IntegrateArgs, source: SeededSource) -> Result<(), Box<dyn Error>> {
    let truth = SincExp::true_integral();
    let mut mc = MonteCarloIntegrator::new(DEFAULT_DOMAIN_SIZE, source);

    let sweep = mc.error_sweep(SincExp, truth, args.max_samples)?;
    if let Some((n, err)) = sweep.last() {
        println!("Error after {n} samples: {err:+.6}");
    }
    if let Some(path) = &args.out {
        save_pairs(path, &sweep)?;
        println!("Saved error sweep to {}", path.display());
    }

    let timed = timed_unbiased(&mut mc, SincExp, args.samples)?;
    let mut timer = Timer::new();
    let biased = mc.estimate_biased_max(SincExp, args.samples)?;
    let biased_elapsed = timer.lap();

    println!("True value:       {truth:.6}");
    println!(
        "Unbiased:         {:.6} (variance {:.3e}, {:.3?}, efficiency {:.3e})",
        timed.estimate.estimate,
        timed.estimate.variance,
        timed.elapsed,
        timed.efficiency()
    );
    println!("Biased (max / 2): {biased:.6} ({biased_elapsed:.3?})");
    Ok(())
}
