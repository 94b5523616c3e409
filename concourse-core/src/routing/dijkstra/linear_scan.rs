use fixedbitset::FixedBitSet;

use super::{SearchState, relax};
use crate::model::Adjacency;

/// Dijkstra with a linear scan over unvisited nodes as frontier.
/// Ties go to the node with the lowest adjacency index.
pub(super) fn run(
    adjacency: &Adjacency,
    source: usize,
    target: Option<usize>,
    state: &mut SearchState,
) {
    let mut visited = FixedBitSet::with_capacity(adjacency.len());
    state.distances[source] = 0.0;

    loop {
        let mut current = None;
        let mut best = f64::INFINITY;
        for node in visited.zeroes() {
            if state.distances[node] < best {
                best = state.distances[node];
                current = Some(node);
            }
        }

        // Every remaining node is unreachable
        let Some(current) = current else {
            break;
        };

        visited.insert(current);
        if target == Some(current) {
            break;
        }

        relax(adjacency, current, &visited, state, |_, _| {});
    }
}
