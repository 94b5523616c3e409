use super::ShortestPaths;
use crate::NodeId;

/// Ordered node sequence from `source` to `target`, or `None` when the
/// predecessor chain of `target` does not lead back to `source`
pub fn reconstruct_path(
    paths: &ShortestPaths<'_>,
    source: &str,
    target: &str,
) -> Option<Vec<NodeId>> {
    if source == target {
        return Some(vec![source.to_string()]);
    }

    let mut node_path = vec![target.to_string()];
    let mut current = target;
    while let Some(prev) = paths.predecessor(current) {
        // A chain longer than the graph can only be a corrupted map
        if node_path.len() > paths.node_count() {
            return None;
        }
        node_path.push(prev.clone());
        current = prev;
    }
    node_path.reverse(); // Now path is from source to target

    if node_path.first().map(String::as_str) == Some(source) {
        Some(node_path)
    } else {
        None
    }
}
