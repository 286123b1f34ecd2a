//! Graph generation algorithms.
//!
//! All generators are deterministic given a seeded random source and produce
//! a [`GraphMap`][`crate::topology::graph::GraphMap`] of the requested size.
//! Node ids double as population indices, so generators only ever emit
//! neighbor ids inside `[0, size)`.

use rand::Rng;

use crate::topology::graph::GraphMap;

/// Creates toroidal grid of `⌊√n⌋` columns over `n` nodes.
///
/// Each node connects to its right, left, lower and upper neighbor, all
/// wrapping, in that order.
///
/// # Examples
/// ```
/// use cellforge::topology::generators::grid;
///
/// let graph = grid(9);
///
/// assert_eq!(vec![1, 8, 3, 6], graph.neighbors(0));
/// ```
pub fn grid(n: usize) -> GraphMap {
    let side = (n as f64).sqrt().floor() as usize;

    let mut adjacency = Vec::with_capacity(n);
    for i in 0..n {
        let right = (i + 1) % n;
        let left = if i == 0 { n - 1 } else { i - 1 };
        let down = (i + side) % n;
        let up = if i < side { n - side + i } else { i - side };
        adjacency.push(vec![right, left, down, up]);
    }
    return GraphMap::new("grid", adjacency);
}

/// Creates Erdős–Rényi random graph: every ordered pair `i != j` is an edge
/// with probability `p`.
pub fn erdos_renyi<R: Rng>(rng: &mut R, n: usize, p: f64) -> GraphMap {
    let mut adjacency = vec![Vec::new(); n];
    for (i, neighbors) in adjacency.iter_mut().enumerate() {
        for j in 0..n {
            if i != j && rng.gen::<f64>() < p {
                neighbors.push(j);
            }
        }
    }
    return GraphMap::new("erdos_renyi", adjacency);
}

/// Creates Watts–Strogatz small-world graph.
///
/// Starts from a ring lattice where node `i` connects forward to
/// `(i+1)..=(i+k/2) mod n`, then rewires each edge with probability `beta`
/// to a uniformly chosen node that is neither `i` nor already one of its
/// out-neighbors. `beta = 0` yields exactly the ring lattice.
///
/// # Examples
/// ```
/// use cellforge::topology::generators::watts_strogatz;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let graph = watts_strogatz(&mut rng, 10, 4, 0.0);
///
/// assert_eq!(vec![1, 2], graph.neighbors(0));
/// ```
pub fn watts_strogatz<R: Rng>(rng: &mut R, n: usize, k: usize, beta: f64) -> GraphMap {
    assert!(k % 2 == 0, "Lattice degree must be even! Found {}", k);

    let mut adjacency = Vec::with_capacity(n);
    for i in 0..n {
        let neighbors = (1..=k / 2).map(|offset| (i + offset) % n).collect::<Vec<usize>>();
        adjacency.push(neighbors);
    }

    for i in 0..n {
        for edge in 0..adjacency[i].len() {
            if rng.gen::<f64>() >= beta { continue; }
            if adjacency[i].len() >= n - 1 { continue; }

            let mut target = rng.gen_range(0..n);
            while target == i || adjacency[i].contains(&target) {
                target = rng.gen_range(0..n);
            }
            adjacency[i][edge] = target;
        }
    }
    return GraphMap::new("watts_strogatz", adjacency);
}

/// Creates Barabási–Albert preferential-attachment graph.
///
/// Seeds with `m0` fully connected nodes, `m0` drawn uniformly from
/// `[m, 2m)`, then attaches every further node with `m` undirected edges
/// whose endpoints are drawn by degree-proportional roulette. Draws are with
/// replacement, so duplicate edges may occur.
pub fn barabasi_albert<R: Rng>(rng: &mut R, n: usize, m: usize) -> GraphMap {
    assert!(m > 0, "Attachment count must be positive! Found {}", m);

    let m0 = rng.gen_range(m..2 * m).min(n);

    let mut adjacency = vec![Vec::new(); n];
    let mut degrees = vec![0usize; n];
    for i in 0..m0 {
        for j in 0..m0 {
            if i != j { adjacency[i].push(j); }
        }
        degrees[i] = m0 - 1;
    }

    for v in m0..n {
        for _ in 0..m {
            let u = roulette(rng, &degrees[0..v]);
            adjacency[u].push(v);
            adjacency[v].push(u);
            degrees[u] += 1;
            degrees[v] += 1;
        }
    }
    return GraphMap::new("barabasi_albert", adjacency);
}

/// Degree-proportional draw over `weights`; uniform when all weights are 0.
fn roulette<R: Rng>(rng: &mut R, weights: &[usize]) -> usize {
    let total: usize = weights.iter().sum();
    if total == 0 {
        return rng.gen_range(0..weights.len());
    }

    let mut remaining = rng.gen_range(0..total);
    for (index, &weight) in weights.iter().enumerate() {
        if remaining < weight { return index; }
        remaining -= weight;
    }
    return weights.len() - 1;
}

/// Creates layered DAG of `layers * layer_size` nodes.
///
/// Every pair of nodes in adjacent layers is an edge with probability `p`,
/// always directed towards the higher layer, so the result is acyclic.
pub fn layered_dag<R: Rng>(rng: &mut R, layers: usize, layer_size: usize, p: f64) -> GraphMap {
    let n = layers * layer_size;
    let mut adjacency = vec![Vec::new(); n];

    for layer in 0..layers.saturating_sub(1) {
        for i in 0..layer_size {
            let source = layer * layer_size + i;
            for j in 0..layer_size {
                let target = (layer + 1) * layer_size + j;
                if rng.gen::<f64>() < p {
                    adjacency[source].push(target);
                }
            }
        }
    }
    return GraphMap::new("layered_dag", adjacency);
}

/// Creates asymmetric hub graph.
///
/// Picks `⌊n·f_in⌋` in-hubs and `⌊n·f_out⌋` out-hubs uniformly without
/// replacement. Every node draws `degree` random out-targets, out-hubs draw
/// `degree²`, and every in-hub additionally receives `degree²` random
/// incoming edges. Self-edges are skipped; duplicate edges are kept and act
/// as selection weight boosts downstream.
pub fn multiple_in_and_out<R: Rng>(rng: &mut R, n: usize, f_in: f64, f_out: f64, degree: usize) -> GraphMap {
    let in_hubs = fill_to_size(rng, n, (n as f64 * f_in).floor() as usize);
    let out_hubs = fill_to_size(rng, n, (n as f64 * f_out).floor() as usize);

    let mut adjacency = vec![Vec::new(); n];
    if n < 2 {
        return GraphMap::new("multiple_in_and_out", adjacency);
    }

    for i in 0..n {
        let out_degree = if out_hubs.contains(&i) { degree * degree } else { degree };
        for _ in 0..out_degree {
            adjacency[i].push(random_other(rng, n, i));
        }
    }

    for &hub in &in_hubs {
        for _ in 0..degree * degree {
            let source = random_other(rng, n, hub);
            adjacency[source].push(hub);
        }
    }
    return GraphMap::new("multiple_in_and_out", adjacency);
}

/// Draws uniform node id different from `excluded`. Requires `n >= 2`.
fn random_other<R: Rng>(rng: &mut R, n: usize, excluded: usize) -> usize {
    let mut id = rng.gen_range(0..n);
    while id == excluded {
        id = rng.gen_range(0..n);
    }
    return id;
}

/// Draws uniform node ids without replacement until the set reaches the
/// requested count.
fn fill_to_size<R: Rng>(rng: &mut R, n: usize, count: usize) -> Vec<usize> {
    let count = count.min(n);
    let mut chosen: Vec<usize> = Vec::with_capacity(count);
    while chosen.len() < count {
        let id = rng.gen_range(0..n);
        if !chosen.contains(&id) {
            chosen.push(id);
        }
    }
    return chosen;
}
