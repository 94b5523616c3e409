use log::debug;

use super::indoor_routing::{resolve_point, response_from_paths};
use super::{RoutingOptions, RoutingRequest, RoutingResponse, shortest_path_tree};
use crate::model::BuildingModel;
use crate::Error;

/// Route from a point to the closest other point of a category
/// (e.g. the nearest `toilet` or `restaurant`).
///
/// Runs the solver once over the whole building. Equal distances go to the
/// lower point id. The starting point itself never counts as a match.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for a non-positive id or an empty
/// category and [`Error::UnknownPoint`] for an unregistered id
pub fn route_to_nearest(
    model: &BuildingModel,
    from_point_id: i64,
    category: &str,
    options: &RoutingOptions,
) -> Result<RoutingResponse, Error> {
    RoutingRequest::new(from_point_id, from_point_id).validate()?;
    let category = category.trim();
    if category.is_empty() {
        return Err(Error::InvalidRequest("category must not be empty".to_string()));
    }
    let source = resolve_point(model, from_point_id)?;

    let adjacency = model.adjacency(options.adjacency_options());
    let paths = shortest_path_tree(adjacency, source, options.frontier);

    let mut best: Option<(&str, f64)> = None;
    for point in model.registry.points() {
        if point.node == *source || !point.category.eq_ignore_ascii_case(category) {
            continue;
        }
        let distance = paths.distance(&point.node);
        if distance.is_finite() && best.is_none_or(|(_, d)| distance < d) {
            best = Some((point.node.as_str(), distance));
        }
    }

    match best {
        Some((target, _)) => Ok(response_from_paths(model, &paths, source, target)),
        None => {
            debug!("No reachable '{category}' point from point {from_point_id}");
            Ok(RoutingResponse::unreachable())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Floor, PointOfInterest};

    fn model() -> BuildingModel {
        let floor = Floor::pixel("F1", 1.0)
            .with_node("hall", 0.0, 0.0, "entrance")
            .with_node("wc_far", 90.0, 0.0, "toilet")
            .with_node("wc_near", 0.0, 20.0, "toilet")
            .with_node("wc_island", 500.0, 500.0, "toilet")
            .with_node("cafe", 10.0, 0.0, "corridor")
            .with_edge("hall", "wc_far", 90.0)
            .with_edge("hall", "wc_near", 20.0)
            .with_edge("hall", "cafe", 10.0);
        let mut cafe = PointOfInterest::new("cafe", "Cafe Central");
        cafe.category = Some("restaurant".to_string());
        BuildingModel::new(None, vec![floor], vec![], &[cafe], Vec::new())
    }

    fn hall(model: &BuildingModel) -> i64 {
        i64::from(model.registry.resolve_reverse("hall").unwrap())
    }

    #[test]
    fn picks_closest_reachable_match() {
        let model = model();

        let response =
            route_to_nearest(&model, hall(&model), "toilet", &RoutingOptions::default()).unwrap();

        assert_eq!(response.node_ids().collect::<Vec<_>>(), vec!["hall", "wc_near"]);
        assert_eq!(response.distance, Some(20.0));
    }

    #[test]
    fn matches_curated_categories_ignoring_case() {
        let model = model();

        let response =
            route_to_nearest(&model, hall(&model), "Restaurant", &RoutingOptions::default())
                .unwrap();

        assert_eq!(response.node_ids().last(), Some("cafe"));
    }

    #[test]
    fn no_match_is_unreachable() {
        let model = model();

        let response =
            route_to_nearest(&model, hall(&model), "bakery", &RoutingOptions::default()).unwrap();

        assert!(!response.is_reachable());
        assert!(matches!(
            route_to_nearest(&model, hall(&model), "  ", &RoutingOptions::default()),
            Err(Error::InvalidRequest(_))
        ));
    }
}
