use mini_mc::distributions::Normal1D;
use mini_mc::metropolis_hastings::MetropolisHastings;
use mini_mc::rng::SeededSource;

fn main() {
    let mut mh = MetropolisHastings::new(Normal1D::standard(), SeededSource::new(42));

    // Run a chain of 1,000 states starting at zero
    let chain = mh.run(0.0, 1_000).unwrap();

    assert_eq!(chain.len(), 1_000);
    assert_eq!(chain[0], 0.0);
}
