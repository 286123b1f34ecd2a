use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use rstest::{fixture, rstest};

use cellforge::cellular::alterer::Alterer;
use cellforge::cellular::phenotype::Phenotype;
use cellforge::common::traits::Initializer;
use cellforge::operators::builder::OperatorsBuilder;
use cellforge::operators::functions::symbolic::{add, mul, sub};
use cellforge::operators::set::Operators;
use cellforge::tree::core::tree::TreeGenotype;
use cellforge::tree::operators::crossover::SingleNodeCrossover;
use cellforge::tree::operators::init::Grow;

#[fixture]
fn sample_operators() -> Arc<Operators> {
    let operators = OperatorsBuilder::default()
        .add_function("+", add, 2, 1.0 / 3.0).expect("Failed to add an operator!")
        .add_function("-", sub, 2, 1.0 / 3.0).expect("Failed to add an operator!")
        .add_function("*", mul, 2, 1.0 / 3.0).expect("Failed to add an operator!")
        .add_variable("x", 0.5).expect("Failed to add a variable!")
        .add_variable("y", 0.5).expect("Failed to add a variable!")
        .build().expect("Failed to build operators!");
    return Arc::new(operators);
}

#[fixture]
fn sample_parents(sample_operators: Arc<Operators>) -> Vec<Phenotype<TreeGenotype>> {
    let mut rng = StdRng::seed_from_u64(7);
    let init_scheme = Grow::new(2, 4);

    return (0..2)
        .map(|i| Phenotype::with_fitness(init_scheme.initialize(&mut rng, &sample_operators), 0, i as f64))
        .collect();
}

fn valid_tree(tree: &TreeGenotype) -> bool {
    let linked: usize = tree.children().values().map(|children| children.len()).sum();
    return linked + 1 == tree.arena().len();
}

#[rstest]
fn test_crossover_never_fires(sample_operators: Arc<Operators>, sample_parents: Vec<Phenotype<TreeGenotype>>) {
    let mut rng = StdRng::seed_from_u64(42);

    let crossover = SingleNodeCrossover::new(0.0, sample_operators).expect("Failed to create SingleNodeCrossover!");
    let (children, altered) = crossover.alter(&mut rng, &sample_parents, 1);

    assert_eq!(0, altered, "No alterations expected! Found {}", altered);
    for (parent, child) in sample_parents.iter().zip(children.iter()) {
        assert_eq!(parent.genotype(), child.genotype(), "Parents must pass through unchanged!");
        assert_eq!(parent.fitness(), child.fitness(), "Fitness must survive an idle pass!");
    }
}

#[rstest]
fn test_crossover_always_fires(sample_operators: Arc<Operators>, sample_parents: Vec<Phenotype<TreeGenotype>>) {
    let mut rng = StdRng::seed_from_u64(42);

    let crossover = SingleNodeCrossover::new(1.0, sample_operators).expect("Failed to create SingleNodeCrossover!");
    let (children, altered) = crossover.alter(&mut rng, &sample_parents, 3);

    assert_eq!(2, children.len(), "Expected {} children, found {}", 2, children.len());
    assert_eq!(2, altered, "Expected {} alterations, found {}", 2, altered);

    let parent_nodes: usize = sample_parents.iter().map(|p| p.genotype().size()).sum();
    let child_nodes: usize = children.iter().map(|c| c.genotype().size()).sum();
    assert_eq!(parent_nodes, child_nodes,
        "Subtree swap must conserve total node count! Expected {}, found {}", parent_nodes, child_nodes
    );

    for child in &children {
        assert!(valid_tree(child.genotype()), "Child arena and children map disagree!");
        assert!(child.fitness().is_none(), "Altered children must have absent fitness!");
        assert_eq!(3, child.generation(),
            "Wrong birth generation! Expected {}, found {}", 3, child.generation()
        );
    }
}

#[rstest]
fn test_crossover_self_is_copy(sample_operators: Arc<Operators>, sample_parents: Vec<Phenotype<TreeGenotype>>) {
    let mut rng = StdRng::seed_from_u64(42);

    let lonely = vec![sample_parents[0].clone()];
    let crossover = SingleNodeCrossover::new(1.0, sample_operators).expect("Failed to create SingleNodeCrossover!");
    let (children, _) = crossover.alter(&mut rng, &lonely, 1);

    assert_eq!(2, children.len(), "Expected {} children, found {}", 2, children.len());
    let total: usize = children.iter().map(|c| c.genotype().size()).sum();
    assert_eq!(2 * lonely[0].genotype().size(), total,
        "Crossing a tree with itself must conserve total node count! Expected {}, found {}",
        2 * lonely[0].genotype().size(), total
    );
    for child in &children {
        assert!(valid_tree(child.genotype()), "Child arena and children map disagree!");
    }
}

#[rstest]
fn test_crossover_rejects_invalid_probability(sample_operators: Arc<Operators>) {
    assert!(SingleNodeCrossover::new(1.5, sample_operators).is_err(),
        "Probability above 1.0 must be rejected!"
    );
}
