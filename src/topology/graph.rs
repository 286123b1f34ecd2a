//! Immutable directed adjacency for cellular populations.

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

/// A named, fixed-size directed graph over node ids `[0, size)`.
///
/// Node `i` of the graph is index `i` of the population evolving on it. A
/// neighbor list may contain the node itself, may contain duplicates (a
/// duplicated neighbor weighs twice in selection) and may be empty, in which
/// case the engine treats the cell as its own sole neighbor.
///
/// # Fields
/// * `name: String` - label of the generating algorithm
/// * `adjacency: Vec<Vec<usize>>` - ordered out-neighbor lists per node
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphMap {
    name: String,
    adjacency: Vec<Vec<usize>>,
}

impl GraphMap {
    /// Creates new graph with provided name and adjacency.
    pub fn new(name: &str, adjacency: Vec<Vec<usize>>) -> Self {
        return Self { name: name.to_string(), adjacency };
    }

    pub fn name(&self) -> &str { return &self.name; }

    /// Returns number of nodes.
    pub fn size(&self) -> usize { return self.adjacency.len(); }

    pub fn is_empty(&self) -> bool { return self.adjacency.is_empty(); }

    /// Returns ordered out-neighbors of given node.
    pub fn neighbors(&self, id: usize) -> &[usize] {
        return &self.adjacency[id];
    }

    /// Returns first out-of-range neighbor id, if any. Engine construction
    /// rejects graphs where this is `Some`.
    pub fn out_of_range_neighbor(&self) -> Option<(usize, usize)> {
        for (node, neighbors) in self.adjacency.iter().enumerate() {
            for &neighbor in neighbors {
                if neighbor >= self.adjacency.len() {
                    return Some((node, neighbor));
                }
            }
        }
        return None;
    }
}
