use thiserror::Error;

use crate::{FloorId, NodeId};

/// Non-fatal problems found in the source data. Each one has a fallback so
/// that loading never stops on incomplete data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataWarning {
    #[error("Edge {from} - {to} on floor {floor} references unknown node {missing}")]
    DanglingEdgeEndpoint {
        floor: FloorId,
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },
    #[error("Inter-floor link {from} - {to} references unknown node {missing}")]
    DanglingLinkEndpoint {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },
    #[error("Inter-floor link {from} - {to} connects two nodes of floor {floor}")]
    SameFloorLink {
        from: NodeId,
        to: NodeId,
        floor: FloorId,
    },
    #[error("Floor {floor} has no scale, assuming {fallback} m/px")]
    MissingScale { floor: FloorId, fallback: f64 },
    #[error("Floor {floor} has no image dimensions, assuming {width}x{height} px")]
    MissingDimensions {
        floor: FloorId,
        width: u32,
        height: u32,
    },
    #[error("Connection {from} - {to} has invalid weight {weight}, using {fallback}")]
    InvalidWeight {
        floor: Option<FloorId>,
        from: NodeId,
        to: NodeId,
        weight: f64,
        fallback: f64,
    },
    #[error("Node {node} on floor {floor} was already declared on floor {first_floor}")]
    DuplicateNode {
        node: NodeId,
        floor: FloorId,
        first_floor: FloorId,
    },
    #[error("Floor {floor} is declared twice, ignoring the later one and its {nodes} nodes")]
    DuplicateFloor { floor: FloorId, nodes: usize },
    #[error("Node {node} on floor {floor} has a non-finite position and is ignored")]
    InvalidPosition { node: NodeId, floor: FloorId },
    #[error("Point of interest '{label}' references unknown node {node}")]
    UnknownPointNode { label: String, node: NodeId },
}
