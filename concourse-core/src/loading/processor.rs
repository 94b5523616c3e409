//! Normalization of raw source schemas into the building model

use log::debug;

use super::raw_types::{
    RawCoordinates, RawFloorEntry, RawFloorGraph, RawGeoGraph, RawLink, RawPixelGraph, RawPoint,
    RawTags,
};
use crate::model::{CoordinateSpace, DataWarning, Edge, Floor, InterFloorLink, Node, PointOfInterest};
use crate::{
    DEFAULT_EDGE_WEIGHT, DEFAULT_FLOOR_HEIGHT, DEFAULT_FLOOR_WIDTH, DEFAULT_METERS_PER_PIXEL,
    INTER_FLOOR_LINK_WEIGHT,
};

/// Builds a floor from its manifest entry and graph file.
/// Values in the manifest entry take precedence over the graph file.
pub(crate) fn floor_from_raw(
    entry: &RawFloorEntry,
    graph: RawFloorGraph,
    warnings: &mut Vec<DataWarning>,
) -> Floor {
    match graph {
        RawFloorGraph::Pixel(graph) => pixel_floor(entry, graph, warnings),
        RawFloorGraph::Geographic(graph) => geographic_floor(entry, graph, warnings),
    }
}

fn pixel_floor(entry: &RawFloorEntry, graph: RawPixelGraph, warnings: &mut Vec<DataWarning>) -> Floor {
    let coordinates = if entry.coordinates == Some(RawCoordinates::Geographic) {
        CoordinateSpace::Geographic
    } else {
        let scale = entry
            .meters_per_pixel
            .or(graph.meters_per_pixel)
            .filter(|scale| scale.is_finite() && *scale > 0.0);
        let meters_per_pixel = scale.unwrap_or_else(|| {
            warnings.push(DataWarning::MissingScale {
                floor: entry.id.clone(),
                fallback: DEFAULT_METERS_PER_PIXEL,
            });
            DEFAULT_METERS_PER_PIXEL
        });
        CoordinateSpace::Pixel { meters_per_pixel }
    };

    let width = entry.width.or(graph.width).filter(|w| *w > 0);
    let height = entry.height.or(graph.height).filter(|h| *h > 0);
    if width.is_none() || height.is_none() {
        warnings.push(DataWarning::MissingDimensions {
            floor: entry.id.clone(),
            width: width.unwrap_or(DEFAULT_FLOOR_WIDTH),
            height: height.unwrap_or(DEFAULT_FLOOR_HEIGHT),
        });
    }

    let nodes = graph
        .nodes
        .into_iter()
        .map(|raw| {
            let mut node = Node::new(
                raw.id,
                entry.id.clone(),
                raw.x,
                raw.y,
                raw.kind.unwrap_or_else(|| "corridor".to_string()),
            );
            node.name = raw.name;
            node
        })
        .collect();

    let edges = graph
        .edges
        .into_iter()
        .map(|raw| {
            let from = String::from(raw.from);
            let to = String::from(raw.to);
            let weight = sanitize_weight(
                Some(entry.id.as_str()),
                &from,
                &to,
                raw.weight,
                DEFAULT_EDGE_WEIGHT,
                warnings,
            );
            let mut edge = Edge::new(from, to, weight);
            edge.kind = raw.kind;
            edge.accessible = raw.accessible.unwrap_or(true);
            edge
        })
        .collect();

    Floor {
        id: entry.id.clone(),
        label: entry.label.clone(),
        width: width.unwrap_or(DEFAULT_FLOOR_WIDTH),
        height: height.unwrap_or(DEFAULT_FLOOR_HEIGHT),
        coordinates,
        nodes,
        edges,
    }
}

fn geographic_floor(
    entry: &RawFloorEntry,
    graph: RawGeoGraph,
    warnings: &mut Vec<DataWarning>,
) -> Floor {
    if entry.coordinates == Some(RawCoordinates::Pixel) {
        debug!(
            "Floor {} is declared as pixel space but its graph has geographic coordinates",
            entry.id
        );
    }

    let nodes = graph
        .nodes
        .into_iter()
        .map(|raw| {
            let mut node = Node::new(
                raw.id,
                entry.id.clone(),
                raw.lng,
                raw.lat,
                raw.kind.unwrap_or_else(|| "gate".to_string()),
            );
            node.name = raw.name;
            node.tags = raw.tags.map(parse_tags).unwrap_or_default();
            node
        })
        .collect();

    let edges = graph
        .edges
        .into_iter()
        .map(|raw| {
            let from = String::from(raw.from_id);
            let to = String::from(raw.to_id);
            let weight = sanitize_weight(
                Some(entry.id.as_str()),
                &from,
                &to,
                raw.weight,
                DEFAULT_EDGE_WEIGHT,
                warnings,
            );
            Edge::new(from, to, weight)
        })
        .collect();

    Floor {
        id: entry.id.clone(),
        label: entry.label.clone(),
        width: entry.width.unwrap_or(DEFAULT_FLOOR_WIDTH),
        height: entry.height.unwrap_or(DEFAULT_FLOOR_HEIGHT),
        coordinates: CoordinateSpace::Geographic,
        nodes,
        edges,
    }
}

pub(crate) fn link_from_raw(raw: RawLink, warnings: &mut Vec<DataWarning>) -> InterFloorLink {
    let from = String::from(raw.from);
    let to = String::from(raw.to);
    let weight = sanitize_weight(None, &from, &to, raw.weight, INTER_FLOOR_LINK_WEIGHT, warnings);
    InterFloorLink::new(from, to)
        .with_weight(weight)
        .with_kind(raw.kind.unwrap_or_default())
}

pub(crate) fn point_from_raw(raw: RawPoint) -> PointOfInterest {
    PointOfInterest {
        node: raw.node.into(),
        label: raw.label,
        floor: raw.floor.filter(|floor| !floor.trim().is_empty()),
        category: raw.category.filter(|category| !category.trim().is_empty()),
    }
}

/// Missing weights take the fallback silently, unusable ones with a warning
fn sanitize_weight(
    floor: Option<&str>,
    from: &str,
    to: &str,
    weight: Option<f64>,
    fallback: f64,
    warnings: &mut Vec<DataWarning>,
) -> f64 {
    match weight {
        None => fallback,
        Some(w) if w.is_finite() && w >= 0.0 => w,
        Some(w) => {
            warnings.push(DataWarning::InvalidWeight {
                floor: floor.map(str::to_string),
                from: from.to_string(),
                to: to.to_string(),
                weight: w,
                fallback,
            });
            fallback
        }
    }
}

fn parse_tags(tags: RawTags) -> Vec<String> {
    match tags {
        RawTags::List(list) => list,
        RawTags::Encoded(text) => serde_json::from_str::<Vec<String>>(&text).unwrap_or_else(|_| {
            text.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        }),
    }
}
