use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;

use super::state::State;
use super::{SearchState, relax};
use crate::model::Adjacency;

/// Dijkstra with a lazy-deletion binary heap as frontier.
///
/// Entries are ordered by `(cost, index)`, so nodes are settled in the same
/// order as by the linear scan and the result is identical.
pub(super) fn run(
    adjacency: &Adjacency,
    source: usize,
    target: Option<usize>,
    state: &mut SearchState,
) {
    let mut visited = FixedBitSet::with_capacity(adjacency.len());
    let mut heap = BinaryHeap::with_capacity(adjacency.len() / 4 + 1);

    state.distances[source] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Skip stale entries
        if visited.contains(node) || cost > state.distances[node] {
            continue;
        }

        visited.insert(node);
        if target == Some(node) {
            break;
        }

        relax(adjacency, node, &visited, state, |next, next_cost| {
            heap.push(State {
                cost: next_cost,
                node: next,
            });
        });
    }
}
