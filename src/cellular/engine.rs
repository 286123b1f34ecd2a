//! The per-generation cellular evolution step.
//!
//! One call to [`CellularEngine::evolve`] turns a population indexed by node
//! id into its successor: filter out invalid and over-aged phenotypes,
//! evaluate, evolve every cell against its neighborhood, evaluate the
//! offspring and replace locally elitist. The phases run in fixed order and
//! each one is total; termination is the stream driver's business.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

use crate::cellular::alterer::Alterer;
use crate::cellular::constraint::{Constraint, RetryConstraint};
use crate::cellular::errors::EngineError;
use crate::cellular::evaluator;
use crate::cellular::executor::Executor;
use crate::cellular::objective::Objective;
use crate::cellular::phenotype::Phenotype;
use crate::cellular::problem::Problem;
use crate::cellular::rng;
use crate::cellular::selector::{Selector, TournamentSelection};
use crate::cellular::stream::EvolutionStream;
use crate::common::traits::Genotype;
use crate::topology::generators::grid;
use crate::topology::graph::GraphMap;

// Lane discriminants keep the random draws of different phases independent
// even when they touch the same slot in the same generation.
const INIT_LANE: u64 = 0x01;
const FILTER_LANE: u64 = 0x02;
const EVOLVE_LANE: u64 = 0x03;

/// Input of one evolution step: a population and its generation number.
///
/// The population is ordered; index `i` is node `i` of the topology.
#[derive(Clone, Debug)]
pub struct EvolutionStart<G: Genotype> {
    population: Vec<Phenotype<G>>,
    generation: usize,
}

impl<G: Genotype> EvolutionStart<G> {
    pub fn new(population: Vec<Phenotype<G>>, generation: usize) -> Self {
        return Self { population, generation };
    }

    pub fn population(&self) -> &[Phenotype<G>] { return &self.population; }
    pub fn generation(&self) -> usize { return self.generation; }
}

/// Wall-clock durations of the phases of one evolution step.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default)]
pub struct StepTimes {
    pub filter: Duration,
    pub evaluation: Duration,
    pub evolution: Duration,
    pub replacement: Duration,
}

impl StepTimes {
    pub fn total(&self) -> Duration {
        return self.filter + self.evaluation + self.evolution + self.replacement;
    }
}

/// Output of one evolution step.
///
/// # Fields
/// * `population: Vec<Phenotype<G>>` - successor population, fully evaluated
/// * `generation: usize` - generation number of the successor
/// * `times: StepTimes` - per-phase durations
/// * `kill_count: usize` - phenotypes replaced for exceeding the age cap
/// * `invalid_count: usize` - phenotypes repaired by the constraint
/// * `alter_count: usize` - cells whose offspring beat the incumbent
/// * `objective: Objective` - direction the run optimizes in
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct EvolutionResult<G: Genotype> {
    population: Vec<Phenotype<G>>,
    generation: usize,
    times: StepTimes,
    kill_count: usize,
    invalid_count: usize,
    alter_count: usize,
    objective: Objective,
}

impl<G: Genotype> EvolutionResult<G> {
    pub fn population(&self) -> &[Phenotype<G>] { return &self.population; }
    pub fn generation(&self) -> usize { return self.generation; }
    pub fn times(&self) -> &StepTimes { return &self.times; }
    pub fn kill_count(&self) -> usize { return self.kill_count; }
    pub fn invalid_count(&self) -> usize { return self.invalid_count; }
    pub fn alter_count(&self) -> usize { return self.alter_count; }
    pub fn objective(&self) -> Objective { return self.objective; }

    /// Returns the best phenotype of the population under the result's
    /// objective.
    pub fn best_phenotype(&self) -> &Phenotype<G> {
        return self.population.iter()
            .min_by(|a, b| self.objective.compare(
                a.fitness().unwrap_or(self.objective.worst()),
                b.fitness().unwrap_or(self.objective.worst())
            ))
            .expect("Population is never empty!");
    }

    /// Returns the best fitness of the population.
    pub fn best_fitness(&self) -> f64 {
        return self.best_phenotype().fitness().unwrap_or(self.objective.worst());
    }

    /// Serializes the result, population included, for drivers that persist
    /// snapshots.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String>
    where
        G: Serialize,
    {
        return serde_json::to_string(self);
    }

    pub(crate) fn restart(&self) -> EvolutionStart<G> {
        return EvolutionStart::new(self.population.clone(), self.generation);
    }
}

/// The cellular evolution engine.
///
/// Owns the topology, the operators, the executor and the seed; every
/// [`evolve`][`CellularEngine::evolve`] call is a pure function of its input
/// given that configuration, so a stream of generations is reproducible from
/// the seed alone at any worker count.
pub struct CellularEngine<G: Genotype> {
    problem: Arc<dyn Problem<G>>,
    topology: GraphMap,
    selector: Box<dyn Selector<G>>,
    alterers: Vec<Box<dyn Alterer<G>>>,
    constraint: Box<dyn Constraint<G>>,
    objective: Objective,
    max_phenotype_age: usize,
    executor: Executor,
    seed: u64,
}

impl<G: Genotype + 'static> CellularEngine<G> {
    /// Creates a builder around the given problem. All other configuration
    /// has defaults.
    pub fn builder(problem: Arc<dyn Problem<G>>) -> CellularEngineBuilder<G> {
        return CellularEngineBuilder::new(problem);
    }

    pub fn topology(&self) -> &GraphMap { return &self.topology; }
    pub fn objective(&self) -> Objective { return self.objective; }
    pub fn seed(&self) -> u64 { return self.seed; }

    /// Creates the generation-0 start: a fresh random phenotype per node.
    pub fn init_start(&self) -> Result<EvolutionStart<G>, EngineError> {
        let population = self.extend_population(Vec::new(), 0)?;
        return Ok(EvolutionStart::new(population, 0));
    }

    /// Pads a population with fresh random phenotypes up to the topology
    /// size. Slot index keys the random sub-stream, so padding is
    /// deterministic.
    fn extend_population(
        &self, population: Vec<Phenotype<G>>, generation: usize
    ) -> Result<Vec<Phenotype<G>>, EngineError> {
        let n = self.topology.size();
        if population.len() > n {
            return Err(EngineError::Configuration(format!(
                "population of size {} exceeds topology of size {}", population.len(), n
            )));
        }
        if population.len() == n { return Ok(population); }

        let offset = population.len();
        let fresh = self.executor.map_indexed(n - offset, |slot| {
            let mut rng = rng::sub_stream(self.seed, generation, INIT_LANE, offset + slot);
            return Ok(Phenotype::new(self.problem.new_genotype(&mut rng)?, generation));
        })?;

        let mut population = population;
        population.extend(fresh);
        return Ok(population);
    }

    /// Runs one generation.
    ///
    /// # Arguments
    /// * `start: &EvolutionStart<G>` - population of size `topology.size()`
    /// and its generation number
    ///
    /// # Returns
    /// * `Result<EvolutionResult<G>, EngineError>` - successor population
    /// with step counters, or the first worker error
    pub fn evolve(&self, start: &EvolutionStart<G>) -> Result<EvolutionResult<G>, EngineError> {
        let n = self.topology.size();
        if start.population.len() != n {
            return Err(EngineError::Configuration(format!(
                "population of size {} does not match topology of size {}", start.population.len(), n
            )));
        }
        let generation = start.generation;

        // Filter: repair invalid phenotypes, retire over-aged ones.
        let filter_start = Instant::now();
        let mut invalid_count = 0;
        let mut kill_count = 0;
        let mut filtered = Vec::with_capacity(n);
        for (slot, phenotype) in start.population.iter().enumerate() {
            if !self.constraint.is_valid(phenotype) {
                let mut rng = rng::sub_stream(self.seed, generation, FILTER_LANE, slot);
                filtered.push(self.constraint.repair(&mut rng, phenotype, generation)?);
                invalid_count += 1;
            } else if phenotype.age(generation) > self.max_phenotype_age {
                let mut rng = rng::sub_stream(self.seed, generation, FILTER_LANE, slot);
                filtered.push(Phenotype::new(self.problem.new_genotype(&mut rng)?, generation));
                kill_count += 1;
            } else {
                filtered.push(phenotype.clone());
            }
        }
        let filter_time = filter_start.elapsed();

        // Evaluate the filtered population.
        let evaluation_start = Instant::now();
        let evaluated = evaluator::eval(&self.executor, self.problem.as_ref(), filtered)?;
        let mut evaluation_time = evaluation_start.elapsed();

        // Per-cell evolution over the read-only snapshot. Each cell draws
        // from its own random sub-stream and fills only its own output slot.
        let evolution_start = Instant::now();
        let snapshot = &evaluated;
        let candidates = self.executor.map_indexed(n, |cell| {
            let mut rng = rng::sub_stream(self.seed, generation, EVOLVE_LANE, cell);

            let neighbors = self.topology.neighbors(cell);
            let pool: Vec<&Phenotype<G>> = if neighbors.is_empty() {
                vec![&snapshot[cell]]
            } else {
                neighbors.iter().map(|&id| &snapshot[id]).collect()
            };

            let mut offspring = self.selector.select(&mut rng, &pool, 2, self.objective);
            for alterer in &self.alterers {
                let (altered, _count) = alterer.alter(&mut rng, &offspring, generation);
                offspring = altered;
            }

            // The cell has exactly one successor slot; surplus offspring are
            // dropped.
            return offspring.into_iter().next().ok_or_else(|| EngineError::Worker {
                cell,
                message: "alterer chain returned no offspring".to_string(),
            });
        })?;
        let evolution_time = evolution_start.elapsed();

        // Evaluate offspring, then replace locally elitist: the offspring
        // takes the slot only when strictly better, so ties keep the parent.
        let evaluation_start = Instant::now();
        let children = evaluator::eval(&self.executor, self.problem.as_ref(), candidates)?;
        evaluation_time += evaluation_start.elapsed();

        let replacement_start = Instant::now();
        let mut alter_count = 0;
        let mut next_population = Vec::with_capacity(n);
        for (incumbent, child) in evaluated.into_iter().zip(children.into_iter()) {
            let incumbent_fitness = incumbent.fitness().unwrap_or(self.objective.worst());
            let child_fitness = child.fitness().unwrap_or(self.objective.worst());
            if self.objective.prefer(child_fitness, incumbent_fitness) {
                next_population.push(child);
                alter_count += 1;
            } else {
                next_population.push(incumbent);
            }
        }
        let replacement_time = replacement_start.elapsed();

        debug!("Generation {}: {} invalid, {} killed, {} replaced",
            generation, invalid_count, kill_count, alter_count
        );
        return Ok(EvolutionResult {
            population: next_population,
            generation: generation + 1,
            times: StepTimes {
                filter: filter_time,
                evaluation: evaluation_time,
                evolution: evolution_time,
                replacement: replacement_time,
            },
            kill_count,
            invalid_count,
            alter_count,
            objective: self.objective,
        });
    }

    /// Creates a lazy stream of generations from a fresh random population.
    pub fn stream(&self) -> Result<EvolutionStream<'_, G>, EngineError> {
        return Ok(EvolutionStream::new(self, self.init_start()?));
    }

    /// Creates a lazy stream of generations from the given start. A start
    /// population shorter than the topology is padded with fresh random
    /// phenotypes.
    pub fn stream_from(&self, start: EvolutionStart<G>) -> Result<EvolutionStream<'_, G>, EngineError> {
        let generation = start.generation;
        let population = self.extend_population(start.population, generation)?;
        return Ok(EvolutionStream::new(self, EvolutionStart::new(population, generation)));
    }
}

/// Builder for [`CellularEngine`] with validation at `build`.
///
/// Defaults: `grid(100)` topology, tournament selection of size 3, the
/// problem's default alterers, retry constraint, the problem's objective,
/// age cap of 70 generations, worker pool sized by hardware parallelism,
/// seed 0.
pub struct CellularEngineBuilder<G: Genotype> {
    problem: Arc<dyn Problem<G>>,
    topology: Option<GraphMap>,
    selector: Option<Box<dyn Selector<G>>>,
    alterers: Vec<Box<dyn Alterer<G>>>,
    constraint: Option<Box<dyn Constraint<G>>>,
    objective: Option<Objective>,
    max_phenotype_age: usize,
    executor: Option<Executor>,
    seed: u64,
}

impl<G: Genotype + 'static> CellularEngineBuilder<G> {
    pub fn new(problem: Arc<dyn Problem<G>>) -> Self {
        return Self {
            problem,
            topology: None,
            selector: None,
            alterers: Vec::new(),
            constraint: None,
            objective: None,
            max_phenotype_age: 70,
            executor: None,
            seed: 0,
        };
    }

    pub fn set_topology(mut self, topology: GraphMap) -> Self {
        self.topology = Some(topology);
        return self;
    }

    pub fn set_selector(mut self, selector: Box<dyn Selector<G>>) -> Self {
        self.selector = Some(selector);
        return self;
    }

    /// Appends an alterer; the chain applies in insertion order.
    pub fn add_alterer(mut self, alterer: Box<dyn Alterer<G>>) -> Self {
        self.alterers.push(alterer);
        return self;
    }

    pub fn set_constraint(mut self, constraint: Box<dyn Constraint<G>>) -> Self {
        self.constraint = Some(constraint);
        return self;
    }

    pub fn set_objective(mut self, objective: Objective) -> Self {
        self.objective = Some(objective);
        return self;
    }

    pub fn set_max_phenotype_age(mut self, max_phenotype_age: usize) -> Self {
        self.max_phenotype_age = max_phenotype_age;
        return self;
    }

    pub fn set_executor(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        return self;
    }

    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        return self;
    }

    /// Validates the configuration and builds the engine.
    ///
    /// # Returns
    /// * `Result<CellularEngine<G>, EngineError>` - engine, or a
    /// configuration error for an empty or out-of-range topology
    pub fn build(self) -> Result<CellularEngine<G>, EngineError> {
        let topology = self.topology.unwrap_or_else(|| grid(100));
        if topology.is_empty() {
            return Err(EngineError::Configuration("topology has no nodes".to_string()));
        }
        if let Some((node, neighbor)) = topology.out_of_range_neighbor() {
            return Err(EngineError::Configuration(format!(
                "node {} has out-of-range neighbor {}", node, neighbor
            )));
        }

        let alterers = if self.alterers.is_empty() {
            self.problem.default_alterers(topology.size())
        } else {
            self.alterers
        };
        let executor = match self.executor {
            Some(executor) => executor,
            None => Executor::worker_pool(0)?,
        };

        return Ok(CellularEngine {
            constraint: self.constraint
                .unwrap_or_else(|| Box::new(RetryConstraint::new(self.problem.clone()))),
            objective: self.objective.unwrap_or_else(|| self.problem.objective()),
            selector: self.selector
                .unwrap_or_else(|| Box::new(TournamentSelection::new(3))),
            problem: self.problem,
            topology,
            alterers,
            max_phenotype_age: self.max_phenotype_age,
            executor,
            seed: self.seed,
        });
    }
}
