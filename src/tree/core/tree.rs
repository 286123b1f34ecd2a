//! Core tree structure for tree-based Genetic Programming.
//!
//! This module provides the [`TreeGenotype`] structure that represents
//! programs as trees using a linear array (arena) in prefix order with
//! explicit child references.
use std::hash::{Hash, Hasher};
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result};

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

use crate::common::traits::Genotype;
use crate::operators::set::Operators;

/// Tree structure for representing programs in Genetic Programming.
/// Uses arena-based representation with hashmap of parent-child relationships.
///
/// The arena stores node labels in prefix order: the root sits at index 0 and
/// every subtree occupies a contiguous index range. Subtree surgery is a
/// splice of that range.
///
/// # Fields
/// * `arena: Vec<String>` - flat array storing node labels in prefix order
/// * `children: HashMap<usize, Vec<usize>>` - maps parent indices to their children indices
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct TreeGenotype {
    arena: Vec<String>,
    children: HashMap<usize, Vec<usize>>,
}

impl Genotype for TreeGenotype {}

impl TreeGenotype {
    /// Creates new tree with provided arena and children mapping.
    pub fn new(arena: Vec<String>, children: HashMap<usize, Vec<usize>>) -> Self { return Self { arena, children }; }
    /// Creates new tree with provided arena and empty children mapping.
    pub fn with_arena(arena: Vec<String>) -> Self { return Self { arena, children: HashMap::new() }; }

    pub fn arena(&self) -> &Vec<String> { return &self.arena; }
    pub fn arena_mut(&mut self) -> &mut Vec<String> { return &mut self.arena; }
    pub fn children(&self) -> &HashMap<usize, Vec<usize>> { return &self.children; }
    pub fn children_mut(&mut self) -> &mut HashMap<usize, Vec<usize>> { return &mut self.children; }

    /// Returns total node count.
    pub fn size(&self) -> usize { return self.arena.len(); }

    /// Returns index of last node in subtree rooted at given index.
    ///
    /// # Arguments
    /// * `root: usize` - index of subtree root
    ///
    /// # Returns
    /// * `usize` - index of last node in subtree
    pub fn subtree(&self, root: usize) -> usize {
        let mut stack = vec![root];
        let mut last_visited = root;

        while let Some(index) = stack.pop() {
            if index > last_visited { last_visited = index; }
            if let Some(children) = self.children.get(&index) {
                for child in children { stack.push(*child); }
            }
        }
        return last_visited;
    }

    /// Returns depth of every node, indexed like the arena. The root has
    /// depth 0.
    pub fn node_depths(&self) -> Vec<usize> {
        let mut depths = vec![0; self.arena.len()];
        let mut stack = vec![0];

        while let Some(index) = stack.pop() {
            if let Some(children) = self.children.get(&index) {
                for &child in children {
                    depths[child] = depths[index] + 1;
                    stack.push(child);
                }
            }
        }
        return depths;
    }

    /// Returns depth of the tree: the maximum node depth.
    pub fn depth(&self) -> usize {
        return self.node_depths().into_iter().max().unwrap_or(0);
    }

    /// Constructs children mapping from flat arena representation.
    ///
    /// # Arguments
    /// * `operators: &Operators` - provides node arities for tree construction
    ///
    /// # Returns
    /// * `HashMap<usize, Vec<usize>>` - mapping of parent indices to children indices
    pub fn construct_children(&self, operators: &Operators) -> HashMap<usize, Vec<usize>> {
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        if self.arena.is_empty() { return children; }

        let mut stack = vec![0]; // Stack of pending child slots
        let mut current = 0;

        while let Some(parent) = stack.pop() {
            if parent != current {
                children.entry(parent)
                    .and_modify(|vec: &mut Vec<usize>| vec.push(current))
                    .or_insert(vec![current]);
            }

            let arity = operators.arity_of(&self.arena[current]);
            for _ in 0..arity {
                stack.push(current);
            }
            current += 1;
        }
        return children;
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, node_index: usize, prefix: &str, child_prefix: &str) -> Result {
        writeln!(f, "{}{}", prefix, self.arena[node_index])?;

        if let Some(children) = self.children.get(&node_index) {
            let child_count = children.len();

            for (i, &child_index) in children.iter().enumerate() {
                let is_last = i == child_count - 1;
                let new_prefix = if is_last {
                    format!("{}└── ", child_prefix)
                } else {
                    format!("{}├── ", child_prefix)
                };
                let new_child_prefix = if is_last {
                    format!("{}    ", child_prefix)
                } else {
                    format!("{}│   ", child_prefix)
                };

                self.fmt_node(f, child_index, &new_prefix, &new_child_prefix)?;
            }
        }
        return Ok(());
    }
}

impl Display for TreeGenotype {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.arena.is_empty() {
            return Ok(());
        }
        self.fmt_node(f, 0, "", "")?;
        return Ok(());
    }
}

impl Default for TreeGenotype {
    fn default() -> Self { return Self::new(Vec::new(), HashMap::new()); }
}

impl Hash for TreeGenotype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let hashable = self.arena.iter().fold(
            String::new(), |mut hashable, word| {
                hashable.push_str(word);
                hashable
        });
        hashable.hash(state);
    }
}

impl Eq for TreeGenotype {}

impl PartialEq for TreeGenotype {
    fn eq(&self, other: &Self) -> bool {
        return self.arena == other.arena;
    }
}
