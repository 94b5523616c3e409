use rstar::{RTree, primitives::GeomWithData};

use super::Floor;

type IndexedNode = GeomWithData<[f64; 2], usize>;

/// R-tree over the node positions of one floor
#[derive(Debug, Clone)]
pub(super) struct FloorIndex {
    tree: RTree<IndexedNode>,
}

impl FloorIndex {
    pub(super) fn new(floor: &Floor) -> Self {
        let points = floor
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.position.x().is_finite() && node.position.y().is_finite())
            .map(|(pos, node)| IndexedNode::new([node.position.x(), node.position.y()], pos))
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Position of the closest node within the floor's node list.
    /// Non-finite queries match nothing.
    pub(super) fn nearest(&self, x: f64, y: f64) -> Option<usize> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        self.tree.nearest_neighbor(&[x, y]).map(|entry| entry.data)
    }
}
