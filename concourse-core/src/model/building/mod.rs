//! Multi-floor building graph

pub mod adjacency;
pub mod components;
mod spatial;

pub use adjacency::{Adjacency, AdjacencyOptions, build_adjacency, build_adjacency_with};
pub use components::{
    ConnectorKind, CoordinateSpace, Edge, Floor, InterFloorLink, Node, NodeKind,
};

use hashbrown::{HashMap, HashSet};

use self::spatial::FloorIndex;
use super::DataWarning;

/// Floors, their nodes and edges, and the connectors between floors
#[derive(Debug, Clone)]
pub struct Building {
    pub name: Option<String>,
    floors: Vec<Floor>,
    links: Vec<InterFloorLink>,
    /// Node id to (floor position, node position)
    node_index: HashMap<String, (usize, usize)>,
    floor_index: HashMap<String, usize>,
    spatial: Vec<FloorIndex>,
}

impl Building {
    /// Assembles a building and reports structural problems of the source data.
    ///
    /// A floor id or node id declared more than once is kept at its first
    /// declaration only. Nodes without a finite position are dropped. Edges
    /// and links naming unknown nodes are kept as they are.
    pub fn new(
        name: Option<String>,
        mut floors: Vec<Floor>,
        links: Vec<InterFloorLink>,
    ) -> (Self, Vec<DataWarning>) {
        let mut warnings = Vec::new();

        let mut floor_ids = HashSet::with_capacity(floors.len());
        floors.retain(|floor| {
            if floor_ids.insert(floor.id.clone()) {
                true
            } else {
                warnings.push(DataWarning::DuplicateFloor {
                    floor: floor.id.clone(),
                    nodes: floor.nodes.len(),
                });
                false
            }
        });

        let mut first_floor: HashMap<String, String> = HashMap::new();
        for floor in &mut floors {
            let floor_id = floor.id.clone();
            floor.nodes.retain(|node| {
                if !(node.position.x().is_finite() && node.position.y().is_finite()) {
                    warnings.push(DataWarning::InvalidPosition {
                        node: node.id.clone(),
                        floor: floor_id.clone(),
                    });
                    return false;
                }
                if let Some(first) = first_floor.get(&node.id) {
                    warnings.push(DataWarning::DuplicateNode {
                        node: node.id.clone(),
                        floor: floor_id.clone(),
                        first_floor: first.clone(),
                    });
                    false
                } else {
                    first_floor.insert(node.id.clone(), floor_id.clone());
                    true
                }
            });
            // Nodes keep the floor they were declared on
            for node in &mut floor.nodes {
                node.floor.clone_from(&floor_id);
            }
        }

        let mut node_index = HashMap::with_capacity(first_floor.len());
        let mut floor_index = HashMap::with_capacity(floors.len());
        for (floor_pos, floor) in floors.iter().enumerate() {
            floor_index.insert(floor.id.clone(), floor_pos);
            for (node_pos, node) in floor.nodes.iter().enumerate() {
                node_index.insert(node.id.clone(), (floor_pos, node_pos));
            }
        }

        for floor in &floors {
            let local: HashSet<&str> = floor.nodes.iter().map(|n| n.id.as_str()).collect();
            for edge in &floor.edges {
                for endpoint in [&edge.from, &edge.to] {
                    if !local.contains(endpoint.as_str()) && !node_index.contains_key(endpoint) {
                        warnings.push(DataWarning::DanglingEdgeEndpoint {
                            floor: floor.id.clone(),
                            from: edge.from.clone(),
                            to: edge.to.clone(),
                            missing: endpoint.clone(),
                        });
                    }
                }
            }
        }

        for link in &links {
            let from_floor = node_index.get(&link.from).map(|&(f, _)| f);
            let to_floor = node_index.get(&link.to).map(|&(f, _)| f);
            for (endpoint, resolved) in [(&link.from, from_floor), (&link.to, to_floor)] {
                if resolved.is_none() {
                    warnings.push(DataWarning::DanglingLinkEndpoint {
                        from: link.from.clone(),
                        to: link.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
            if let (Some(a), Some(b)) = (from_floor, to_floor) {
                if a == b {
                    warnings.push(DataWarning::SameFloorLink {
                        from: link.from.clone(),
                        to: link.to.clone(),
                        floor: floors[a].id.clone(),
                    });
                }
            }
        }

        let spatial = floors.iter().map(FloorIndex::new).collect();

        let building = Self {
            name,
            floors,
            links,
            node_index,
            floor_index,
            spatial,
        };
        (building, warnings)
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn links(&self) -> &[InterFloorLink] {
        &self.links
    }

    pub fn floor(&self, floor_id: &str) -> Option<&Floor> {
        self.floor_index.get(floor_id).map(|&idx| &self.floors[idx])
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.node_index
            .get(node_id)
            .map(|&(floor, node)| &self.floors[floor].nodes[node])
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node_index.contains_key(node_id)
    }

    /// All nodes in floor order, then declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.floors.iter().flat_map(|floor| floor.nodes.iter())
    }

    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Node of the given floor closest to a position in that floor's coordinates
    pub fn nearest_node(&self, floor_id: &str, x: f64, y: f64) -> Option<&Node> {
        let floor_pos = *self.floor_index.get(floor_id)?;
        let node_pos = self.spatial[floor_pos].nearest(x, y)?;
        self.floors[floor_pos].nodes.get(node_pos)
    }

    pub fn adjacency(&self, options: AdjacencyOptions) -> Adjacency {
        build_adjacency_with(&self.floors, &self.links, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_floors() -> Vec<Floor> {
        vec![
            Floor::pixel("F1", 0.1)
                .with_node("a", 0.0, 0.0, "entrance")
                .with_node("b", 10.0, 0.0, "corridor")
                .with_edge("a", "b", 10.0),
            Floor::pixel("F2", 0.1)
                .with_node("c", 5.0, 5.0, "gate")
                .with_node("a", 1.0, 1.0, "gate"),
        ]
    }

    #[test]
    fn duplicate_node_keeps_first_floor() {
        let (building, warnings) = Building::new(None, two_floors(), vec![]);

        assert_eq!(building.node_count(), 3);
        assert_eq!(building.node("a").map(|n| n.floor.as_str()), Some("F1"));
        assert_eq!(building.floor("F2").map(|f| f.nodes.len()), Some(1));
        assert!(warnings.iter().any(|w| matches!(
            w,
            DataWarning::DuplicateNode { node, floor, .. } if node == "a" && floor == "F2"
        )));
    }

    #[test]
    fn duplicate_floor_keeps_first_declaration() {
        let mut floors = two_floors();
        floors.push(
            Floor::pixel("F1", 0.5)
                .with_node("d", 0.0, 0.0, "gate")
                .with_node("e", 5.0, 0.0, "gate"),
        );

        let (building, warnings) = Building::new(None, floors, vec![]);

        assert_eq!(building.floor_count(), 2);
        assert_eq!(building.floor("F1").and_then(Floor::meters_per_pixel), Some(0.1));
        assert!(!building.contains_node("d"));
        assert!(warnings.iter().any(|w| matches!(
            w,
            DataWarning::DuplicateFloor { floor, nodes: 2 } if floor == "F1"
        )));
    }

    #[test]
    fn non_finite_positions_are_dropped() {
        let mut floors = two_floors();
        floors[0].nodes.push(Node::new("nan", "F1", f64::NAN, 0.0, "gate"));
        floors[1].nodes.push(Node::new("inf", "F2", 1.0, f64::INFINITY, "gate"));

        let (building, warnings) = Building::new(None, floors, vec![]);

        assert!(!building.contains_node("nan"));
        assert!(!building.contains_node("inf"));
        let dropped = warnings
            .iter()
            .filter(|w| matches!(w, DataWarning::InvalidPosition { .. }))
            .count();
        assert_eq!(dropped, 2);
        assert_eq!(building.nearest_node("F1", 100.0, 0.0).map(|n| n.id.as_str()), Some("b"));
    }

    #[test]
    fn non_finite_query_has_no_nearest_node() {
        let (building, _) = Building::new(None, two_floors(), vec![]);

        assert!(building.nearest_node("F1", f64::NAN, 0.0).is_none());
        assert!(building.nearest_node("F1", 0.0, f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn reports_dangling_edges_and_links() {
        let mut floors = two_floors();
        floors[0].edges.push(Edge::new("b", "ghost", 3.0));
        let links = vec![
            InterFloorLink::new("b", "c"),
            InterFloorLink::new("c", "nowhere"),
            InterFloorLink::new("a", "b"),
        ];

        let (building, warnings) = Building::new(None, floors, links);

        assert_eq!(building.links().len(), 3);
        assert!(warnings.iter().any(|w| matches!(
            w,
            DataWarning::DanglingEdgeEndpoint { missing, .. } if missing == "ghost"
        )));
        assert!(warnings.iter().any(|w| matches!(
            w,
            DataWarning::DanglingLinkEndpoint { missing, .. } if missing == "nowhere"
        )));
        assert!(warnings.iter().any(|w| matches!(
            w,
            DataWarning::SameFloorLink { floor, .. } if floor == "F1"
        )));
    }

    #[test]
    fn cross_floor_edge_endpoint_is_not_dangling() {
        let mut floors = two_floors();
        floors[0].edges.push(Edge::new("b", "c", 3.0));

        let (_, warnings) = Building::new(None, floors, vec![]);

        assert!(
            !warnings
                .iter()
                .any(|w| matches!(w, DataWarning::DanglingEdgeEndpoint { .. }))
        );
    }

    #[test]
    fn nearest_node_is_floor_local() {
        let (building, _) = Building::new(None, two_floors(), vec![]);

        assert_eq!(building.nearest_node("F1", 9.0, 1.0).map(|n| n.id.as_str()), Some("b"));
        assert_eq!(building.nearest_node("F2", 0.0, 0.0).map(|n| n.id.as_str()), Some("c"));
        assert!(building.nearest_node("F9", 0.0, 0.0).is_none());
    }
}
