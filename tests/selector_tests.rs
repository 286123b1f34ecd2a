use rand::rngs::StdRng;
use rand::SeedableRng;

use rstest::{fixture, rstest};

use cellforge::cellular::objective::Objective;
use cellforge::cellular::phenotype::Phenotype;
use cellforge::cellular::selector::{Selector, TournamentSelection};
use cellforge::common::traits::Genotype;

#[derive(Clone, Debug, PartialEq)]
struct Tag(usize);

impl Genotype for Tag {}

#[fixture]
fn sample_pool() -> Vec<Phenotype<Tag>> {
    return (0..8)
        .map(|i| Phenotype::with_fitness(Tag(i), 0, i as f64))
        .collect();
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
fn test_tournament_count(#[case] count: usize, sample_pool: Vec<Phenotype<Tag>>) {
    let mut rng = StdRng::seed_from_u64(42);
    let pool: Vec<&Phenotype<Tag>> = sample_pool.iter().collect();

    let selection = TournamentSelection::new(3);
    let winners = selection.select(&mut rng, &pool, count, Objective::Minimize);

    assert_eq!(count, winners.len(),
        "Wrong number of winners! Expected {}, found {}", count, winners.len()
    );
}

#[rstest]
fn test_tournament_full_pool_picks_best(sample_pool: Vec<Phenotype<Tag>>) {
    let mut rng = StdRng::seed_from_u64(42);
    let pool: Vec<&Phenotype<Tag>> = sample_pool.iter().collect();

    // A tournament much larger than the pool all but guarantees the optimum
    // is drawn at least once.
    let selection = TournamentSelection::new(256);

    let winner = &selection.select(&mut rng, &pool, 1, Objective::Minimize)[0];
    assert_eq!(Tag(0), *winner.genotype(),
        "Minimization must keep the lowest fitness! Found {:?}", winner.genotype()
    );

    let winner = &selection.select(&mut rng, &pool, 1, Objective::Maximize)[0];
    assert_eq!(Tag(7), *winner.genotype(),
        "Maximization must keep the highest fitness! Found {:?}", winner.genotype()
    );
}

#[rstest]
fn test_tournament_larger_than_pool() {
    let mut rng = StdRng::seed_from_u64(42);
    let lonely = Phenotype::with_fitness(Tag(1), 0, 1.0);
    let pool = vec![&lonely];

    // Draws are with replacement, so the pool may be smaller than the
    // tournament.
    let selection = TournamentSelection::new(5);
    let winners = selection.select(&mut rng, &pool, 2, Objective::Minimize);

    assert_eq!(2, winners.len(), "Expected {} winners, found {}", 2, winners.len());
    for winner in &winners {
        assert_eq!(Tag(1), *winner.genotype(), "Only pool member must win every tournament!");
    }
}

#[rstest]
fn test_tournament_nan_never_wins() {
    let mut rng = StdRng::seed_from_u64(42);
    let poisoned = Phenotype::with_fitness(Tag(0), 0, f64::NAN);
    let healthy = Phenotype::with_fitness(Tag(1), 0, 1e9);
    let pool = vec![&poisoned, &healthy];

    let selection = TournamentSelection::new(16);
    for _ in 0..20 {
        let winner = &selection.select(&mut rng, &pool, 1, Objective::Minimize)[0];
        assert_eq!(Tag(1), *winner.genotype(), "NaN fitness must lose every comparison!");
    }
}

#[rstest]
fn test_duplicate_entries_boost_odds(sample_pool: Vec<Phenotype<Tag>>) {
    let mut rng = StdRng::seed_from_u64(42);

    // The worst individual occupies 9 of 10 slots; with single-draw
    // tournaments it must win most selections.
    let mut pool: Vec<&Phenotype<Tag>> = vec![&sample_pool[7]; 9];
    pool.push(&sample_pool[0]);

    let selection = TournamentSelection::new(1);
    let winners = selection.select(&mut rng, &pool, 200, Objective::Minimize);
    let heavy = winners.iter().filter(|w| *w.genotype() == Tag(7)).count();

    assert!(heavy > 150,
        "Duplicated entries must dominate the draw! Found {} of {}", heavy, winners.len()
    );
}
