//! Data model for indoor routing
//!
//! Contains the building graph (floors, nodes, edges, inter-floor links),
//! the point registry and the immutable building snapshot used for routing.

pub mod building;
pub mod building_model;
pub mod registry;
pub mod warnings;

pub use building::{
    Adjacency, AdjacencyOptions, Building, ConnectorKind, CoordinateSpace, Edge, Floor,
    InterFloorLink, Node, NodeKind, build_adjacency, build_adjacency_with,
};
pub use building_model::BuildingModel;
pub use registry::{PointOfInterest, PointRegistry, RegisteredPoint};
pub use warnings::DataWarning;
