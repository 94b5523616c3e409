//! Shortest-path routing over the building graph

pub mod dijkstra;
mod indoor_routing;
mod matrix;
mod metrics;
mod nearest;
mod path;

pub use dijkstra::{
    Frontier, ShortestPaths, shortest_path, shortest_path_tree, shortest_path_with,
};
pub use indoor_routing::{PathStep, RoutingOptions, RoutingRequest, RoutingResponse, route};
pub use matrix::distance_matrix;
pub use metrics::{PathMetrics, compute_metrics, haversine_distance, walking_minutes};
pub use nearest::route_to_nearest;
pub use path::reconstruct_path;
