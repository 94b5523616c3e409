//! Multi-floor indoor routing for airport terminals.
//!
//! A building is loaded from a manifest of floors, each with its own node and
//! edge list, plus a list of inter-floor connectors (elevators, stairs). The
//! crate builds one adjacency structure over the whole building, runs
//! Dijkstra between two registered points and converts the result into a
//! physical path length and a walking time estimate.

pub mod error;
pub mod flights;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod store;

pub use error::Error;
pub use loading::{BuildingModelConfig, create_building_model};
pub use model::{Building, BuildingModel, PointRegistry};
pub use routing::{RoutingOptions, RoutingRequest, RoutingResponse, route};
pub use store::GraphStore;

/// Building-wide unique node identifier
pub type NodeId = String;
/// Floor identifier as declared in the building manifest
pub type FloorId = String;
/// Externally exposed point identifier, assigned from 1 upwards
pub type PointId = u32;

/// Graph weight of an inter-floor link when the manifest gives none
pub const INTER_FLOOR_LINK_WEIGHT: f64 = 50.0;
/// Physical length added for a hop between two floors
pub const INTER_FLOOR_HOP_METERS: f64 = 15.0;
/// Weight of a floor edge when the source data gives none
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;
/// Scale applied to floors that declare no meters-per-pixel factor
pub const DEFAULT_METERS_PER_PIXEL: f64 = 0.1;
/// Canvas size assumed for floors without image dimensions
pub const DEFAULT_FLOOR_WIDTH: u32 = 2000;
pub const DEFAULT_FLOOR_HEIGHT: u32 = 1200;
/// Average walking speed, roughly 4.8 km/h
pub const WALKING_SPEED_M_PER_MIN: f64 = 80.0;
/// Mean Earth radius used for geographic floors
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
