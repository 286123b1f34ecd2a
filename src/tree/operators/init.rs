//! Tree initialization methods for Genetic Programming.
//!
//! Provides standard implementations: Grow, Full and Ramped Half-and-Half.
//! All methods return a [`TreeGenotype`] and serve as templates for custom
//! initialization methods.

use rand::Rng;

use crate::common::traits::Initializer;
use crate::tree::core::tree::TreeGenotype;
use crate::operators::set::Operators;

/// Grow initialization method.
///
/// Generates trees with depths between minimum and maximum bounds.
/// Forces function nodes until min_depth, then randomly selects between
/// terminals and functions. Terminal draws materialize ephemeral constants,
/// freezing the drawn value into the node label.
///
/// # Fields:
/// * `min_depth: usize` - minimum depth of a tree
/// * `max_depth: usize` - maximum depth of a tree
///
/// # Examples
/// ```
/// use cellforge::tree::operators::init::Grow;
///
/// let initializer = Grow::new(1, 2); // min_depth=1, max_depth=2
/// ```
pub struct Grow {
    min_depth: usize,
    max_depth: usize
}

impl Grow {
    pub fn new(min_depth: usize, max_depth: usize) -> Self {
        return Self { min_depth, max_depth };
    }
}

impl Initializer<TreeGenotype> for Grow {
    fn initialize<R: Rng>(&self, rng: &mut R, operators: &Operators) -> TreeGenotype {
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut tree = TreeGenotype::default();

        let mut root: usize = 0;
        let (node_id, node_arity) =
            if self.max_depth == 0 {
                (operators.sample_terminal(rng), 0)
            } else {
                operators.sample_function(rng)
            };

        tree.arena_mut().push(node_id);
        for _ in 0..node_arity {
            stack.push((root, 1));
        }

        while let Some((parent, depth)) = stack.pop() {
            root += 1;
            let (node_id, node_arity) =
                if depth == self.max_depth {
                    (operators.sample_terminal(rng), 0)
                } else if depth < self.min_depth {
                    operators.sample_function(rng)
                } else if rng.gen::<f64>() < 0.5 {
                    (operators.sample_terminal(rng), 0)
                } else {
                    operators.sample_function(rng)
                };

            tree.arena_mut().push(node_id);
            tree.children_mut().entry(parent).or_default().push(root);
            for _ in 0..node_arity {
                stack.push((root, depth+1));
            }
        }
        return tree;
    }
}

/// Full initialization method.
///
/// Generates complete trees where all branches reach specified depth.
/// Implemented as a special case of Grow with min_depth = max_depth.
///
/// # Fields:
/// * `depth: usize` - depth of the tree
///
/// # Examples
/// ```
/// use cellforge::tree::operators::init::Full;
///
/// let init = Full::new(2); // depth=2
/// ```
pub struct Full {
    depth: usize
}

impl Full {
    pub fn new(depth: usize) -> Self { return Self { depth }; }
}

impl Initializer<TreeGenotype> for Full {
    fn initialize<R: Rng>(&self, rng: &mut R, operators: &Operators) -> TreeGenotype {
        let scheme = Grow::new(self.depth, self.depth);
        return scheme.initialize(rng, operators);
    }
}

/// Ramped Half-and-Half initialization method.
///
/// Draws a depth bound uniformly from the configured range and grows either
/// a Full or a Grow tree with even probability. Used for seeding diverse
/// initial populations.
///
/// # Fields:
/// * `min_depth: usize` - minimum depth bound
/// * `max_depth: usize` - maximum depth bound
pub struct RampedHalfAndHalf {
    min_depth: usize,
    max_depth: usize
}

impl RampedHalfAndHalf {
    pub fn new(min_depth: usize, max_depth: usize) -> Self {
        return Self { min_depth, max_depth };
    }
}

impl Initializer<TreeGenotype> for RampedHalfAndHalf {
    fn initialize<R: Rng>(&self, rng: &mut R, operators: &Operators) -> TreeGenotype {
        let depth = rng.gen_range(self.min_depth..=self.max_depth);
        if rng.gen::<f64>() < 0.5 {
            return Full::new(depth).initialize(rng, operators);
        }
        return Grow::new(self.min_depth, depth).initialize(rng, operators);
    }
}
