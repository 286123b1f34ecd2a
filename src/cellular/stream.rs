//! Lazy generation streams with limit and fold combinators.
//!
//! A stream pulls one [`EvolutionResult`] per `next()` from the engine and
//! re-enters with it. Termination is entirely the consumer's: take a fixed
//! number of generations, stop once a fitness threshold is crossed, or fold
//! the whole stream down to its best result. A step error is yielded once
//! and fuses the stream.

use crate::cellular::engine::{CellularEngine, EvolutionResult, EvolutionStart};
use crate::cellular::errors::EngineError;
use crate::cellular::objective::Objective;
use crate::cellular::phenotype::Phenotype;
use crate::common::traits::Genotype;

/// Lazy sequence of evolution results.
pub struct EvolutionStream<'a, G: Genotype> {
    engine: &'a CellularEngine<G>,
    next_start: Option<EvolutionStart<G>>,
}

impl<'a, G: Genotype> EvolutionStream<'a, G> {
    pub(crate) fn new(engine: &'a CellularEngine<G>, start: EvolutionStart<G>) -> Self {
        return Self { engine, next_start: Some(start) };
    }
}

impl<G: Genotype + 'static> Iterator for EvolutionStream<'_, G> {
    type Item = Result<EvolutionResult<G>, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start.take()?;
        match self.engine.evolve(&start) {
            Ok(result) => {
                self.next_start = Some(result.restart());
                return Some(Ok(result));
            },
            // next_start stays empty: the stream is fused after an error.
            Err(error) => return Some(Err(error)),
        }
    }
}

/// Truncation rules for evolution streams.
///
/// # Variants
/// * `Generations(usize)` - take the first `n` results
/// * `FitnessThreshold(f64)` - take until the best fitness crosses the
/// threshold in the optimize direction; the crossing result is the last one
/// yielded
#[derive(Clone, Copy, Debug)]
pub enum Limit {
    Generations(usize),
    FitnessThreshold(f64),
}

impl Limit {
    fn crossed(&self, result: &EvolutionResult<impl Genotype>) -> bool {
        match self {
            Limit::Generations(_) => return false,
            Limit::FitnessThreshold(threshold) => {
                let best = result.best_fitness();
                match result.objective() {
                    Objective::Minimize => return best <= *threshold,
                    Objective::Maximize => return best >= *threshold,
                }
            }
        }
    }
}

/// Stream adaptor applying a [`Limit`].
pub struct Limited<I> {
    inner: I,
    limit: Limit,
    yielded: usize,
    done: bool,
}

impl<G, I> Iterator for Limited<I>
where
    G: Genotype,
    I: Iterator<Item = Result<EvolutionResult<G>, EngineError>>,
{
    type Item = Result<EvolutionResult<G>, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done { return None; }
        if let Limit::Generations(count) = self.limit {
            if self.yielded >= count {
                self.done = true;
                return None;
            }
        }

        let item = self.inner.next()?;
        self.yielded += 1;
        match &item {
            Ok(result) => {
                if self.limit.crossed(result) { self.done = true; }
            },
            Err(_) => self.done = true,
        }
        return Some(item);
    }
}

/// Fold and truncation combinators over evolution streams.
///
/// Implemented for every iterator of evolution results, so limits chain:
/// `stream.limit(threshold).limit(generation cap)` guards a threshold run
/// against never converging.
pub trait EvolutionStreamExt<G: Genotype>:
    Iterator<Item = Result<EvolutionResult<G>, EngineError>> + Sized
{
    /// Truncates the stream by the given limit.
    fn limit(self, limit: Limit) -> Limited<Self> {
        return Limited { inner: self, limit, yielded: 0, done: false };
    }

    /// Folds the stream into the result with the best phenotype. `None` on
    /// an empty stream; the first step error aborts the fold.
    fn to_best_result(self) -> Result<Option<EvolutionResult<G>>, EngineError> {
        let mut best: Option<EvolutionResult<G>> = None;
        for item in self {
            let result = item?;
            let replace = match &best {
                None => true,
                Some(incumbent) => result.objective()
                    .prefer(result.best_fitness(), incumbent.best_fitness()),
            };
            if replace { best = Some(result); }
        }
        return Ok(best);
    }

    /// Folds the stream into its overall best phenotype.
    fn to_best_phenotype(self) -> Result<Option<Phenotype<G>>, EngineError> {
        let best = self.to_best_result()?;
        return Ok(best.map(|result| result.best_phenotype().clone()));
    }
}

impl<G, I> EvolutionStreamExt<G> for I
where
    G: Genotype,
    I: Iterator<Item = Result<EvolutionResult<G>, EngineError>> + Sized,
{
}
