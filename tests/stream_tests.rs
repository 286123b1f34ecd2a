use std::sync::Arc;

use rand::{Rng, RngCore};
use rstest::{fixture, rstest};

use cellforge::cellular::alterer::Alterer;
use cellforge::cellular::engine::{CellularEngine, EvolutionStart};
use cellforge::cellular::errors::EngineError;
use cellforge::cellular::objective::Objective;
use cellforge::cellular::phenotype::Phenotype;
use cellforge::cellular::problem::Problem;
use cellforge::cellular::stream::{EvolutionStreamExt, Limit};
use cellforge::cellular::executor::Executor;
use cellforge::common::traits::Genotype;
use cellforge::topology::generators::grid;

#[derive(Clone, Debug, PartialEq)]
struct Level(f64);

impl Genotype for Level {}

struct LevelProblem;

impl Problem<Level> for LevelProblem {
    fn new_genotype(&self, rng: &mut dyn RngCore) -> Result<Level, EngineError> {
        return Ok(Level(10.0 + rng.gen::<f64>()));
    }

    fn fitness(&self, genotype: &Level) -> f64 { return genotype.0; }

    fn objective(&self) -> Objective { return Objective::Minimize; }
}

/// Improves every parent by one each generation.
struct StepDown;

impl Alterer<Level> for StepDown {
    fn alter(
        &self, _rng: &mut dyn RngCore,
        parents: &[Phenotype<Level>], generation: usize
    ) -> (Vec<Phenotype<Level>>, usize) {
        let offspring = parents.iter()
            .map(|parent| Phenotype::new(Level(parent.genotype().0 - 1.0), generation))
            .collect::<Vec<_>>();
        let altered = offspring.len();
        return (offspring, altered);
    }
}

#[fixture]
fn level_engine() -> CellularEngine<Level> {
    return CellularEngine::builder(Arc::new(LevelProblem))
        .set_topology(grid(9))
        .add_alterer(Box::new(StepDown))
        .set_executor(Executor::serial())
        .set_seed(42)
        .build().expect("Failed to build engine!");
}

#[rstest]
fn test_limit_generations(level_engine: CellularEngine<Level>) {
    let results = level_engine.stream().expect("Failed to create stream!")
        .limit(Limit::Generations(5))
        .collect::<Result<Vec<_>, _>>()
        .expect("Stream failed!");

    assert_eq!(5, results.len(),
        "Wrong stream length! Expected {}, found {}", 5, results.len()
    );
    for (index, result) in results.iter().enumerate() {
        assert_eq!(index + 1, result.generation(),
            "Wrong generation number! Expected {}, found {}", index + 1, result.generation()
        );
    }
}

#[rstest]
fn test_limit_threshold_includes_crossing_result(level_engine: CellularEngine<Level>) {
    // Levels start in [10, 11) and improve by 1 per generation: the best
    // fitness crosses 5.5 in generation 5 at the earliest.
    let results = level_engine.stream().expect("Failed to create stream!")
        .limit(Limit::FitnessThreshold(5.5))
        .limit(Limit::Generations(50))
        .collect::<Result<Vec<_>, _>>()
        .expect("Stream failed!");

    let last = results.last().expect("Stream must not be empty!");
    assert!(last.best_fitness() <= 5.5,
        "The crossing result is the last one yielded! Found best {}", last.best_fitness()
    );
    for result in &results[..results.len() - 1] {
        assert!(result.best_fitness() > 5.5,
            "Only the final result crosses the threshold! Found {}", result.best_fitness()
        );
    }
    assert!(results.len() < 50, "Threshold must trigger before the generation cap!");
}

#[rstest]
fn test_best_so_far_is_monotone(level_engine: CellularEngine<Level>) {
    let results = level_engine.stream().expect("Failed to create stream!")
        .limit(Limit::Generations(20))
        .collect::<Result<Vec<_>, _>>()
        .expect("Stream failed!");

    let mut best = f64::INFINITY;
    for result in &results {
        assert!(result.best_fitness() <= best,
            "Best fitness must never worsen! Was {}, now {}", best, result.best_fitness()
        );
        best = result.best_fitness();
    }
}

#[rstest]
fn test_fold_to_best_result(level_engine: CellularEngine<Level>) {
    let best = level_engine.stream().expect("Failed to create stream!")
        .limit(Limit::Generations(10))
        .to_best_result()
        .expect("Stream failed!")
        .expect("Stream must not be empty!");

    // Fitness improves every generation, so the fold keeps the last result.
    assert_eq!(10, best.generation(),
        "Wrong best generation! Expected {}, found {}", 10, best.generation()
    );

    let phenotype = level_engine.stream().expect("Failed to create stream!")
        .limit(Limit::Generations(10))
        .to_best_phenotype()
        .expect("Stream failed!")
        .expect("Stream must not be empty!");
    assert_eq!(best.best_fitness(), phenotype.fitness().unwrap(),
        "Best phenotype and best result must agree! Expected {}, found {}",
        best.best_fitness(), phenotype.fitness().unwrap()
    );
}

#[rstest]
fn test_short_start_is_padded(level_engine: CellularEngine<Level>) {
    let population = (0..3).map(|_| Phenotype::new(Level(20.0), 0)).collect();
    let start = EvolutionStart::new(population, 0);

    let result = level_engine.stream_from(start).expect("Failed to create stream!")
        .next().expect("Stream must not be empty!")
        .expect("Stream failed!");

    assert_eq!(9, result.population().len(),
        "Short starts are padded to the topology size! Expected {}, found {}",
        9, result.population().len()
    );
}

#[rstest]
fn test_oversized_start_is_rejected(level_engine: CellularEngine<Level>) {
    let population = (0..12).map(|_| Phenotype::new(Level(20.0), 0)).collect();
    let start = EvolutionStart::new(population, 0);

    let stream = level_engine.stream_from(start);
    assert!(matches!(stream, Err(EngineError::Configuration(_))),
        "A start population larger than the topology must be rejected!"
    );
}

#[rstest]
fn test_streams_are_reproducible(level_engine: CellularEngine<Level>) {
    let run = || {
        return level_engine.stream().expect("Failed to create stream!")
            .limit(Limit::Generations(10))
            .collect::<Result<Vec<_>, _>>()
            .expect("Stream failed!");
    };

    for (a, b) in run().iter().zip(run().iter()) {
        assert_eq!(a.population().len(), b.population().len());
        for (left, right) in a.population().iter().zip(b.population().iter()) {
            assert_eq!(left.genotype(), right.genotype(), "Streams with one engine must agree!");
            assert_eq!(left.fitness(), right.fitness(), "Streams with one engine must agree!");
        }
    }
}
