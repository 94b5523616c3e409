//! Building-wide adjacency structure over floor edges and inter-floor links

use hashbrown::HashMap;
use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::{Floor, InterFloorLink};
use crate::NodeId;

/// Which connections take part in the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AdjacencyOptions {
    /// Leave out walkways marked inaccessible and non-elevator connectors
    pub step_free: bool,
}

/// Routing graph of a building with its id lookup.
///
/// Every undirected connection is stored as two directed edges. Node indices
/// are dense and follow insertion order: known nodes first (floor order, then
/// declaration order), then ids only named by edges or links, in the order
/// they are first seen. Parallel edges are kept.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    graph: DiGraph<NodeId, f64>,
    index: HashMap<NodeId, NodeIndex>,
}

impl Adjacency {
    pub fn graph(&self) -> &DiGraph<NodeId, f64> {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_index(&self, node: &str) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    /// Dense position of a node, usable as an index into per-node vectors
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.node_index(node).map(NodeIndex::index)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    /// Node id behind a dense index
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds
    pub fn id(&self, idx: usize) -> &NodeId {
        &self.graph[NodeIndex::new(idx)]
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.graph.node_weights()
    }

    /// Outgoing edges of a node by id, empty for unknown ids
    pub fn neighbors_of(&self, node: &str) -> impl Iterator<Item = (&NodeId, f64)> {
        self.node_index(node)
            .into_iter()
            .flat_map(|idx| self.graph.edges(idx))
            .map(|edge| (&self.graph[edge.target()], *edge.weight()))
    }

    /// Smallest weight of a direct connection `from -> to`
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.node_index(from)?;
        let to = self.node_index(to)?;
        self.graph
            .edges_connecting(from, to)
            .map(|edge| *edge.weight())
            .min_by(f64::total_cmp)
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Plain map form of the adjacency
    pub fn to_map(&self) -> HashMap<NodeId, Vec<(NodeId, f64)>> {
        self.graph
            .node_indices()
            .map(|idx| {
                let list = self
                    .graph
                    .edges(idx)
                    .map(|edge| (self.graph[edge.target()].clone(), *edge.weight()))
                    .collect();
                (self.graph[idx].clone(), list)
            })
            .collect()
    }

    fn ensure_node(&mut self, node: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(node) {
            return idx;
        }
        let idx = self.graph.add_node(node.to_string());
        self.index.insert(node.to_string(), idx);
        idx
    }

    fn add_undirected(&mut self, a: &str, b: &str, weight: f64) {
        let a = self.ensure_node(a);
        let b = self.ensure_node(b);
        self.graph.add_edge(a, b, weight);
        self.graph.add_edge(b, a, weight);
    }
}

/// Builds the full adjacency of a building
pub fn build_adjacency(floors: &[Floor], links: &[InterFloorLink]) -> Adjacency {
    build_adjacency_with(floors, links, AdjacencyOptions::default())
}

/// Builds the adjacency of a building restricted by `options`.
/// Every node stays present even when all its connections are filtered out.
pub fn build_adjacency_with(
    floors: &[Floor],
    links: &[InterFloorLink],
    options: AdjacencyOptions,
) -> Adjacency {
    let node_count: usize = floors.iter().map(|floor| floor.nodes.len()).sum();
    let edge_count: usize = floors.iter().map(|floor| floor.edges.len()).sum();
    let mut adjacency = Adjacency {
        graph: DiGraph::with_capacity(node_count, 2 * (edge_count + links.len())),
        index: HashMap::with_capacity(node_count),
    };

    for node in floors.iter().flat_map(|floor| floor.nodes.iter()) {
        adjacency.ensure_node(&node.id);
    }

    for edge in floors.iter().flat_map(|floor| floor.edges.iter()) {
        if options.step_free && !edge.accessible {
            continue;
        }
        adjacency.add_undirected(&edge.from, &edge.to, edge.weight);
    }

    for link in links {
        if options.step_free && !link.kind.is_step_free() {
            continue;
        }
        adjacency.add_undirected(&link.from, &link.to, link.weight);
    }

    debug!(
        "Built adjacency with {} nodes and {} directed edges (step_free: {})",
        adjacency.len(),
        adjacency.edge_count(),
        options.step_free
    );

    adjacency
}
