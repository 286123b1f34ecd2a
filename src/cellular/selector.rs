//! Selection methods over phenotype pools.
//!
//! Selectors pick parents from a sub-population: in the cellular engine the
//! pool is a cell's neighborhood, handed over as borrowed snapshot entries.
//! Duplicate entries are legitimate; a neighbor appearing twice is twice as
//! likely to enter a tournament.

use rand::{Rng, RngCore};

use crate::cellular::objective::Objective;
use crate::cellular::phenotype::Phenotype;
use crate::common::traits::Genotype;

/// Interface for selecting phenotypes from a pool.
pub trait Selector<G: Genotype>: Send + Sync {
    /// Selects `count` phenotypes from a non-empty pool.
    ///
    /// # Arguments
    /// * `rng: &mut dyn RngCore` - random source
    /// * `pool: &[&Phenotype<G>]` - sub-population to select from
    /// * `count: usize` - number of winners to produce
    /// * `objective: Objective` - direction fitness is compared in
    ///
    /// # Returns
    /// * `Vec<Phenotype<G>>` - owned clones of the winners
    fn select(
        &self, rng: &mut dyn RngCore,
        pool: &[&Phenotype<G>], count: usize, objective: Objective
    ) -> Vec<Phenotype<G>>;
}

/// Tournament selection operator that selects best individual from a random
/// subset.
///
/// Each winner is the best of `tournament_size` draws taken uniformly *with*
/// replacement, so the pool may be smaller than the tournament. Ties keep
/// the earliest drawn candidate.
///
/// # Fields
/// * `tournament_size: usize` - number of individuals randomly sampled per tournament
///
/// # Examples
/// ```
/// use cellforge::cellular::selector::TournamentSelection;
///
/// let selection = TournamentSelection::new(3);
///
/// assert_eq!(3, selection.tournament_size(),
///     "Tournament sizes do not match! Expected {}, found {}",
///     3, selection.tournament_size()
/// );
/// ```
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates new TournamentSelection operator.
    ///
    /// # Arguments
    /// * `tournament_size: usize` - number of individuals in tournament
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size > 0, "Tournament size must be positive! Found {}", tournament_size);
        return Self { tournament_size };
    }

    pub fn tournament_size(&self) -> usize { return self.tournament_size; }
}

impl<G: Genotype> Selector<G> for TournamentSelection {
    fn select(
        &self, rng: &mut dyn RngCore,
        pool: &[&Phenotype<G>], count: usize, objective: Objective
    ) -> Vec<Phenotype<G>> {
        assert!(!pool.is_empty(), "Cannot select from an empty pool!");

        let mut winners = Vec::with_capacity(count);
        for _ in 0..count {
            let mut best = pool[rng.gen_range(0..pool.len())];
            for _ in 1..self.tournament_size {
                let candidate = pool[rng.gen_range(0..pool.len())];
                let best_fitness = best.fitness().unwrap_or(objective.worst());
                let candidate_fitness = candidate.fitness().unwrap_or(objective.worst());
                if objective.prefer(candidate_fitness, best_fitness) {
                    best = candidate;
                }
            }
            winners.push(best.clone());
        }
        return winners;
    }
}
