//! Point-to-point routing entry point

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Frontier, ShortestPaths, compute_metrics, reconstruct_path, shortest_path_with};
use crate::model::{AdjacencyOptions, BuildingModel};
use crate::{Error, FloorId, NodeId, PointId};

/// Routing request between two registered points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRequest {
    pub from_point_id: i64,
    pub to_point_id: i64,
}

impl RoutingRequest {
    pub fn new(from_point_id: i64, to_point_id: i64) -> Self {
        Self {
            from_point_id,
            to_point_id,
        }
    }

    /// Rejects non-positive point ids before the graph is touched
    pub fn validate(&self) -> Result<(i64, i64), Error> {
        for (field, value) in [("from", self.from_point_id), ("to", self.to_point_id)] {
            if value <= 0 {
                return Err(Error::InvalidRequest(format!(
                    "'{field}' point id must be positive, got {value}"
                )));
            }
        }
        Ok((self.from_point_id, self.to_point_id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingOptions {
    /// Route over elevators and accessible walkways only
    pub step_free: bool,
    pub frontier: Frontier,
}

impl RoutingOptions {
    pub(crate) fn adjacency_options(self) -> AdjacencyOptions {
        AdjacencyOptions {
            step_free: self.step_free,
        }
    }
}

/// Single node of a routed path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStep {
    /// `None` for ids only known from edge data
    pub point_id: Option<PointId>,
    pub node_id: NodeId,
    pub floor_id: Option<FloorId>,
    /// `[x, y]` pixels or `[longitude, latitude]`
    pub position: Option<[f64; 2]>,
}

/// Routing result. An unreachable target is a regular response with an
/// empty path and no metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResponse {
    pub path: Vec<PathStep>,
    /// Total edge weight
    pub distance: Option<f64>,
    pub path_length_meters: Option<f64>,
    pub walking_minutes: Option<f64>,
}

impl RoutingResponse {
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: None,
            path_length_meters: None,
            walking_minutes: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }

    /// Node ids of the path in walking order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.path.iter().map(|step| step.node_id.as_str())
    }
}

/// Resolves an external point id to its node
pub(crate) fn resolve_point(model: &BuildingModel, point: i64) -> Result<&NodeId, Error> {
    PointId::try_from(point)
        .ok()
        .and_then(|id| model.registry.resolve(id))
        .ok_or(Error::UnknownPoint(point))
}

/// Shortest walking route between two registered points
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for non-positive ids and
/// [`Error::UnknownPoint`] for ids the registry does not know
pub fn route(
    model: &BuildingModel,
    request: &RoutingRequest,
    options: &RoutingOptions,
) -> Result<RoutingResponse, Error> {
    let (from, to) = request.validate()?;
    let source = resolve_point(model, from)?;
    let target = resolve_point(model, to)?;

    debug!("Routing point {from} ({source}) to point {to} ({target})");

    let adjacency = model.adjacency(options.adjacency_options());
    let paths = shortest_path_with(adjacency, source, Some(target), options.frontier);
    Ok(response_from_paths(model, &paths, source, target))
}

/// Builds the response for `target` out of a finished solver run
pub(crate) fn response_from_paths(
    model: &BuildingModel,
    paths: &ShortestPaths<'_>,
    source: &str,
    target: &str,
) -> RoutingResponse {
    let distance = paths.distance(target);
    if !distance.is_finite() {
        debug!("No path from {source} to {target}");
        return RoutingResponse::unreachable();
    }
    let Some(nodes) = reconstruct_path(paths, source, target) else {
        debug!("Predecessor chain of {target} does not reach {source}");
        return RoutingResponse::unreachable();
    };

    let metrics = compute_metrics(&nodes, &model.building);
    let path = nodes
        .into_iter()
        .map(|node_id| {
            let node = model.building.node(&node_id);
            PathStep {
                point_id: model.registry.resolve_reverse(&node_id),
                floor_id: node.map(|n| n.floor.clone()),
                position: node.map(|n| [n.position.x(), n.position.y()]),
                node_id,
            }
        })
        .collect();

    RoutingResponse {
        path,
        distance: Some(distance),
        path_length_meters: Some(metrics.length_meters),
        walking_minutes: metrics.walking_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConnectorKind, Floor, InterFloorLink, PointOfInterest};

    fn model(floors: Vec<Floor>, links: Vec<InterFloorLink>) -> BuildingModel {
        BuildingModel::new(None, floors, links, &[], Vec::new())
    }

    fn point(model: &BuildingModel, node: &str) -> i64 {
        i64::from(model.registry.resolve_reverse(node).unwrap())
    }

    fn request(model: &BuildingModel, from: &str, to: &str) -> RoutingRequest {
        RoutingRequest::new(point(model, from), point(model, to))
    }

    #[test]
    fn straight_corridor_on_one_floor() {
        let floor = Floor::pixel("F1", 1.0)
            .with_node("A", 0.0, 0.0, "entrance")
            .with_node("B", 100.0, 0.0, "corridor")
            .with_node("C", 100.0, 100.0, "gate")
            .with_edge("A", "B", 100.0)
            .with_edge("B", "C", 100.0);
        let model = model(vec![floor], vec![]);

        let response = route(&model, &request(&model, "A", "C"), &RoutingOptions::default()).unwrap();

        assert_eq!(response.distance, Some(200.0));
        assert_eq!(response.path_length_meters, Some(200.0));
        assert_eq!(response.walking_minutes, Some(2.5));
        assert_eq!(response.node_ids().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(response.path[2].floor_id.as_deref(), Some("F1"));
        assert_eq!(response.path[2].position, Some([100.0, 100.0]));
    }

    #[test]
    fn missing_edge_is_unreachable() {
        let floor = Floor::pixel("F1", 1.0)
            .with_node("A", 0.0, 0.0, "entrance")
            .with_node("C", 100.0, 100.0, "gate");
        let model = model(vec![floor], vec![]);

        let response = route(&model, &request(&model, "A", "C"), &RoutingOptions::default()).unwrap();

        assert_eq!(response, RoutingResponse::unreachable());
    }

    #[test]
    fn elevator_between_floors() {
        let floors = vec![
            Floor::pixel("F1", 1.0).with_node("X", 10.0, 10.0, "elevator"),
            Floor::pixel("F2", 1.0).with_node("Y", 10.0, 10.0, "elevator"),
        ];
        let model = model(floors, vec![InterFloorLink::new("X", "Y").with_weight(50.0)]);

        let response = route(&model, &request(&model, "X", "Y"), &RoutingOptions::default()).unwrap();

        assert_eq!(response.distance, Some(50.0));
        assert_eq!(response.path_length_meters, Some(15.0));
        let minutes = response.walking_minutes.unwrap();
        assert!((minutes - 0.1875).abs() < 1e-12);
        assert_eq!((minutes * 100.0).round() / 100.0, 0.19);
    }

    #[test]
    fn route_to_itself_has_no_walking_time() {
        let floor = Floor::pixel("F1", 1.0).with_node("A", 0.0, 0.0, "gate");
        let model = model(vec![floor], vec![]);

        let response = route(&model, &request(&model, "A", "A"), &RoutingOptions::default()).unwrap();

        assert_eq!(response.node_ids().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(response.distance, Some(0.0));
        assert_eq!(response.path_length_meters, Some(0.0));
        assert_eq!(response.walking_minutes, None);
    }

    #[test]
    fn rejects_invalid_and_unknown_points() {
        let floor = Floor::pixel("F1", 1.0).with_node("A", 0.0, 0.0, "gate");
        let model = model(vec![floor], vec![]);
        let options = RoutingOptions::default();

        assert!(matches!(
            route(&model, &RoutingRequest::new(0, 1), &options),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            route(&model, &RoutingRequest::new(1, -3), &options),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            route(&model, &RoutingRequest::new(1, 99), &options),
            Err(Error::UnknownPoint(99))
        ));
        assert!(matches!(
            route(&model, &RoutingRequest::new(i64::MAX, 1), &options),
            Err(Error::UnknownPoint(_))
        ));
    }

    #[test]
    fn step_free_avoids_stairs() {
        let floors = vec![
            Floor::pixel("F1", 1.0)
                .with_node("hall", 0.0, 0.0, "entrance")
                .with_node("stairs_1", 10.0, 0.0, "stairs")
                .with_node("lift_1", 100.0, 0.0, "elevator")
                .with_edge("hall", "stairs_1", 10.0)
                .with_edge("hall", "lift_1", 100.0),
            Floor::pixel("F2", 1.0)
                .with_node("stairs_2", 10.0, 0.0, "stairs")
                .with_node("lift_2", 100.0, 0.0, "elevator")
                .with_node("gate", 50.0, 0.0, "gate")
                .with_edge("stairs_2", "gate", 40.0)
                .with_edge("lift_2", "gate", 50.0),
        ];
        let links = vec![
            InterFloorLink::new("stairs_1", "stairs_2").with_kind(ConnectorKind::Stairs),
            InterFloorLink::new("lift_1", "lift_2"),
        ];
        let model = model(floors, links);
        let request = request(&model, "hall", "gate");

        let direct = route(&model, &request, &RoutingOptions::default()).unwrap();
        assert_eq!(direct.distance, Some(100.0));
        assert!(direct.node_ids().any(|id| id == "stairs_2"));

        let options = RoutingOptions {
            step_free: true,
            ..RoutingOptions::default()
        };
        let step_free = route(&model, &request, &options).unwrap();
        assert_eq!(step_free.distance, Some(200.0));
        assert!(step_free.node_ids().all(|id| !id.starts_with("stairs")));
    }

    #[test]
    fn dangling_waypoint_keeps_route_alive() {
        let mut floor = Floor::pixel("F1", 1.0)
            .with_node("A", 0.0, 0.0, "entrance")
            .with_node("B", 300.0, 0.0, "gate")
            .with_edge("A", "tunnel", 1.0)
            .with_edge("tunnel", "B", 1.0);
        floor.edges.push(crate::model::Edge::new("A", "B", 10.0));
        let model = BuildingModel::new(
            None,
            vec![floor],
            vec![],
            &[PointOfInterest::new("B", "Gate B")],
            Vec::new(),
        );

        let response = route(&model, &request(&model, "A", "B"), &RoutingOptions::default()).unwrap();

        assert_eq!(response.distance, Some(2.0));
        assert_eq!(response.path_length_meters, Some(30.0));
        assert_eq!(response.path[1].point_id, None);
        assert_eq!(response.path[1].floor_id, None);
        assert_eq!(response.path[2].point_id, Some(1));
    }
}
