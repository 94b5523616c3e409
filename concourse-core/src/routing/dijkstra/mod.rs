//! Single-source shortest paths over a building adjacency

mod binary_heap;
mod linear_scan;
mod state;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::trace;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Deserialize;

use crate::NodeId;
use crate::model::Adjacency;

/// Frontier selection strategy of the solver.
/// Both strategies produce identical distances and predecessors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frontier {
    /// Scan all unvisited nodes for the minimum, O(V^2)
    #[default]
    LinearScan,
    /// Lazy-deletion binary heap, O((V + E) log V)
    BinaryHeap,
}

struct SearchState {
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
}

/// Relaxes every outgoing edge of `current`, calling `on_improve` with the
/// neighbor and its new distance after each improvement
fn relax(
    adjacency: &Adjacency,
    current: usize,
    visited: &FixedBitSet,
    state: &mut SearchState,
    mut on_improve: impl FnMut(usize, f64),
) {
    let base = state.distances[current];
    for edge in adjacency.graph().edges(NodeIndex::new(current)) {
        let next = edge.target().index();
        if visited.contains(next) {
            continue;
        }
        let candidate = base + *edge.weight();
        if candidate < state.distances[next] {
            state.distances[next] = candidate;
            state.predecessors[next] = Some(current);
            on_improve(next, candidate);
        }
    }
}

/// Distances and predecessor links of one solver run.
///
/// When the run stopped at a target, distances of nodes that were not settled
/// yet are upper bounds only. The distance and predecessor chain of the target
/// itself are final.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'a> {
    adjacency: &'a Adjacency,
    source: NodeId,
    distances: Vec<f64>,
    predecessors: Vec<Option<usize>>,
}

impl<'a> ShortestPaths<'a> {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distance from the source, infinity for unreachable or unknown nodes
    pub fn distance(&self, node: &str) -> f64 {
        match self.adjacency.index_of(node) {
            Some(idx) => self.distances[idx],
            None if node == self.source => 0.0,
            None => f64::INFINITY,
        }
    }

    pub fn predecessor(&self, node: &str) -> Option<&'a NodeId> {
        let idx = self.adjacency.index_of(node)?;
        self.predecessors[idx].map(|prev| self.adjacency.id(prev))
    }

    pub fn is_reachable(&self, node: &str) -> bool {
        self.distance(node).is_finite()
    }

    /// Nodes with a finite distance, in adjacency order
    pub fn reachable(&self) -> impl Iterator<Item = (&'a NodeId, f64)> + '_ {
        let adjacency = self.adjacency;
        self.distances
            .iter()
            .enumerate()
            .filter(|(_, distance)| distance.is_finite())
            .map(move |(idx, &distance)| (adjacency.id(idx), distance))
    }

    /// Map form of the distances, covering every known node
    pub fn distances(&self) -> HashMap<NodeId, f64> {
        let mut map: HashMap<NodeId, f64> = self
            .adjacency
            .node_ids()
            .cloned()
            .zip(self.distances.iter().copied())
            .collect();
        map.entry(self.source.clone()).or_insert(0.0);
        map
    }

    /// Map form of the predecessor links, `None` for the source and for
    /// nodes that were never reached
    pub fn predecessors(&self) -> HashMap<NodeId, Option<NodeId>> {
        let mut map: HashMap<NodeId, Option<NodeId>> = self
            .adjacency
            .node_ids()
            .cloned()
            .zip(
                self.predecessors
                    .iter()
                    .map(|prev| prev.map(|idx| self.adjacency.id(idx).clone())),
            )
            .collect();
        map.entry(self.source.clone()).or_insert(None);
        map
    }

    /// Number of nodes the run covered
    pub fn node_count(&self) -> usize {
        self.distances.len()
    }
}

/// Shortest paths from `source`, stopping once `target` is settled
pub fn shortest_path<'a>(
    adjacency: &'a Adjacency,
    source: &str,
    target: &str,
) -> ShortestPaths<'a> {
    shortest_path_with(adjacency, source, Some(target), Frontier::default())
}

/// Shortest paths from `source` to every reachable node
pub fn shortest_path_tree<'a>(
    adjacency: &'a Adjacency,
    source: &str,
    frontier: Frontier,
) -> ShortestPaths<'a> {
    shortest_path_with(adjacency, source, None, frontier)
}

/// Dijkstra's algorithm over non-negative weights.
///
/// A source that is not part of the adjacency has distance 0 and no
/// outgoing edges. An unknown target never stops the run early.
pub fn shortest_path_with<'a>(
    adjacency: &'a Adjacency,
    source: &str,
    target: Option<&str>,
    frontier: Frontier,
) -> ShortestPaths<'a> {
    let mut state = SearchState {
        distances: vec![f64::INFINITY; adjacency.len()],
        predecessors: vec![None; adjacency.len()],
    };

    if let Some(source_idx) = adjacency.index_of(source) {
        let target_idx = target.and_then(|t| adjacency.index_of(t));
        match frontier {
            Frontier::LinearScan => linear_scan::run(adjacency, source_idx, target_idx, &mut state),
            Frontier::BinaryHeap => binary_heap::run(adjacency, source_idx, target_idx, &mut state),
        }
    } else {
        trace!("Source {source} is not part of the adjacency");
    }

    ShortestPaths {
        adjacency,
        source: source.to_string(),
        distances: state.distances,
        predecessors: state.predecessors,
    }
}
