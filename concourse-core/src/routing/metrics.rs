//! Physical length and walking time of a node path

use geo::Point;
use itertools::Itertools;
use serde::Serialize;

use crate::model::{Building, CoordinateSpace};
use crate::{
    DEFAULT_METERS_PER_PIXEL, EARTH_RADIUS_METERS, INTER_FLOOR_HOP_METERS, NodeId,
    WALKING_SPEED_M_PER_MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMetrics {
    pub length_meters: f64,
    /// `None` for a zero-length path
    pub walking_minutes: Option<f64>,
}

/// Sums the physical length of every hop of `path`.
///
/// Hops within a floor use the floor geometry. Hops between floors, and hops
/// touching a node the building does not know, count as a fixed
/// [`INTER_FLOOR_HOP_METERS`].
pub fn compute_metrics(path: &[NodeId], building: &Building) -> PathMetrics {
    let length_meters: f64 = path
        .iter()
        .tuple_windows()
        .map(|(from, to)| hop_length(building, from, to))
        .sum();

    PathMetrics {
        length_meters,
        walking_minutes: walking_minutes(length_meters),
    }
}

pub fn walking_minutes(length_meters: f64) -> Option<f64> {
    if length_meters > 0.0 {
        Some(length_meters / WALKING_SPEED_M_PER_MIN)
    } else {
        None
    }
}

fn hop_length(building: &Building, from: &str, to: &str) -> f64 {
    let (Some(from), Some(to)) = (building.node(from), building.node(to)) else {
        return INTER_FLOOR_HOP_METERS;
    };
    if from.floor != to.floor {
        return INTER_FLOOR_HOP_METERS;
    }

    match building.floor(&from.floor).map(|floor| floor.coordinates) {
        Some(CoordinateSpace::Geographic) => haversine_distance(from.position, to.position),
        Some(CoordinateSpace::Pixel { meters_per_pixel }) => {
            pixel_distance(from.position, to.position) * meters_per_pixel
        }
        None => pixel_distance(from.position, to.position) * DEFAULT_METERS_PER_PIXEL,
    }
}

fn pixel_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    (a.x() - b.x()).hypot(a.y() - b.y())
}

/// Great-circle distance in meters between two (longitude, latitude) points
pub fn haversine_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.x() - a.x()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}
