pub use crate::{
    DEFAULT_EDGE_WEIGHT, DEFAULT_METERS_PER_PIXEL, INTER_FLOOR_HOP_METERS,
    INTER_FLOOR_LINK_WEIGHT, WALKING_SPEED_M_PER_MIN,
};

// Re-export key components
pub use crate::flights::{Flight, FlightPayload, normalize_board, resolve_gate};
pub use crate::loading::{BuildingData, BuildingModelConfig, create_building_model};
pub use crate::model::{
    Adjacency, AdjacencyOptions, Building, BuildingModel, DataWarning, Floor, InterFloorLink,
    Node, NodeKind, PointOfInterest, PointRegistry,
};
pub use crate::routing::{
    Frontier, PathMetrics, RoutingOptions, RoutingRequest, RoutingResponse, ShortestPaths,
    compute_metrics, distance_matrix, reconstruct_path, route, route_to_nearest, shortest_path,
};
pub use crate::store::{BuildingSource, GraphStore};

// Core identifier types
pub use crate::FloorId;
pub use crate::NodeId;
pub use crate::PointId;
