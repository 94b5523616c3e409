//! Building graph components - nodes, edges, floors and inter-floor links

use std::fmt;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_EDGE_WEIGHT, DEFAULT_FLOOR_HEIGHT, DEFAULT_FLOOR_WIDTH, FloorId,
    INTER_FLOOR_LINK_WEIGHT, NodeId,
};

/// Category tag of a graph node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Entrance,
    Corridor,
    CorridorEnd,
    Security,
    Gate,
    Toilet,
    Elevator,
    Stairs,
    Checkin,
    Bakery,
    Restaurant,
    VerticalCore,
    /// Any tag not known to the router, kept verbatim
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Entrance => "entrance",
            Self::Corridor => "corridor",
            Self::CorridorEnd => "corridor_end",
            Self::Security => "security",
            Self::Gate => "gate",
            Self::Toilet => "toilet",
            Self::Elevator => "elevator",
            Self::Stairs => "stairs",
            Self::Checkin => "checkin",
            Self::Bakery => "bakery",
            Self::Restaurant => "restaurant",
            Self::VerticalCore => "vertical_core",
            Self::Other(tag) => tag,
        }
    }

    /// Human readable name used for synthesized registry entries
    pub fn display_name(&self) -> String {
        match self {
            Self::Entrance => "Entrance".to_string(),
            Self::Corridor => "Corridor".to_string(),
            Self::CorridorEnd => "Corridor end".to_string(),
            Self::Security => "Security".to_string(),
            Self::Gate => "Gate".to_string(),
            Self::Toilet => "Toilet".to_string(),
            Self::Elevator => "Elevator".to_string(),
            Self::Stairs => "Stairs".to_string(),
            Self::Checkin => "Check-in".to_string(),
            Self::Bakery => "Bakery".to_string(),
            Self::Restaurant => "Restaurant".to_string(),
            Self::VerticalCore => "Vertical core".to_string(),
            Self::Other(tag) => {
                let spaced = tag.replace('_', " ");
                let mut chars = spaced.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => "Point".to_string(),
                }
            }
        }
    }

    /// Pass-through waypoints that only exist to shape the walkway
    pub fn is_waypoint(&self) -> bool {
        matches!(self, Self::Corridor | Self::CorridorEnd)
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "entrance" => Self::Entrance,
            "corridor" => Self::Corridor,
            "corridor_end" => Self::CorridorEnd,
            "security" => Self::Security,
            "gate" => Self::Gate,
            "toilet" => Self::Toilet,
            "elevator" => Self::Elevator,
            "stairs" => Self::Stairs,
            "checkin" => Self::Checkin,
            "bakery" => Self::Bakery,
            "restaurant" => Self::Restaurant,
            "vertical_core" => Self::VerticalCore,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Building graph node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub floor: FloorId,
    /// Pixel coordinates, or (longitude, latitude) on geographic floors
    pub position: Point<f64>,
    pub kind: NodeKind,
    pub name: Option<String>,
    pub tags: Vec<String>,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        floor: impl Into<FloorId>,
        x: f64,
        y: f64,
        kind: impl Into<NodeKind>,
    ) -> Self {
        Self {
            id: id.into(),
            floor: floor.into(),
            position: Point::new(x, y),
            kind: kind.into(),
            name: None,
            tags: Vec::new(),
        }
    }
}

/// Undirected walkway between two nodes of a floor
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
    pub kind: Option<String>,
    /// `false` marks a walkway that is not usable step-free
    pub accessible: bool,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
            kind: None,
            accessible: true,
        }
    }

    pub fn unweighted(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self::new(from, to, DEFAULT_EDGE_WEIGHT)
    }
}

/// Vertical connector type of an inter-floor link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    #[default]
    Elevator,
    Stairs,
    Escalator,
}

impl ConnectorKind {
    pub fn is_step_free(self) -> bool {
        matches!(self, Self::Elevator)
    }
}

/// Fixed-weight connection between nodes on different floors
#[derive(Debug, Clone, PartialEq)]
pub struct InterFloorLink {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
    pub kind: ConnectorKind,
}

impl InterFloorLink {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: INTER_FLOOR_LINK_WEIGHT,
            kind: ConnectorKind::default(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ConnectorKind) -> Self {
        self.kind = kind;
        self
    }
}

/// How node positions of a floor are interpreted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateSpace {
    /// Floor-image pixels with a physical scale
    Pixel { meters_per_pixel: f64 },
    /// Longitude / latitude in degrees
    Geographic,
}

/// Single floor with its local graph
#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub id: FloorId,
    pub label: Option<String>,
    pub width: u32,
    pub height: u32,
    pub coordinates: CoordinateSpace,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Floor {
    /// Empty pixel-space floor with the default canvas size
    pub fn pixel(id: impl Into<FloorId>, meters_per_pixel: f64) -> Self {
        Self::new(id, CoordinateSpace::Pixel { meters_per_pixel })
    }

    pub fn geographic(id: impl Into<FloorId>) -> Self {
        Self::new(id, CoordinateSpace::Geographic)
    }

    fn new(id: impl Into<FloorId>, coordinates: CoordinateSpace) -> Self {
        Self {
            id: id.into(),
            label: None,
            width: DEFAULT_FLOOR_WIDTH,
            height: DEFAULT_FLOOR_HEIGHT,
            coordinates,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a node on this floor
    #[must_use]
    pub fn with_node(mut self, id: &str, x: f64, y: f64, kind: &str) -> Self {
        let node = Node::new(id, self.id.clone(), x, y, kind);
        self.nodes.push(node);
        self
    }

    #[must_use]
    pub fn with_edge(mut self, from: &str, to: &str, weight: f64) -> Self {
        self.edges.push(Edge::new(from, to, weight));
        self
    }

    pub fn meters_per_pixel(&self) -> Option<f64> {
        match self.coordinates {
            CoordinateSpace::Pixel { meters_per_pixel } => Some(meters_per_pixel),
            CoordinateSpace::Geographic => None,
        }
    }
}
