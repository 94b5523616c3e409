//! Routing, point lookup and admin endpoints

use axum::Json;
use axum::extract::{Path, Query, State};
use concourse_core::model::RegisteredPoint;
use concourse_core::routing::{RoutingResponse, route_to_nearest};
use concourse_core::{Error, RoutingRequest};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub loaded: bool,
    pub generation: u64,
    pub floors: usize,
    pub nodes: usize,
    pub points: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let snapshot = state.store.snapshot();
    Json(Health {
        status: "ok",
        loaded: snapshot.is_some(),
        generation: state.store.generation(),
        floors: snapshot.as_ref().map_or(0, |model| model.floor_count()),
        nodes: snapshot.as_ref().map_or(0, |model| model.node_count()),
        points: snapshot.as_ref().map_or(0, |model| model.point_count()),
    })
}

pub async fn list_points(State(state): State<AppState>) -> Json<Vec<RegisteredPoint>> {
    let points = state
        .store
        .snapshot()
        .map(|model| model.registry.points().to_vec())
        .unwrap_or_default();
    Json(points)
}

/// Query parameters of the route endpoint. Values arrive as text so that a
/// missing or malformed value is reported like any other invalid request.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub step_free: Option<String>,
}

pub async fn get_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RoutingResponse>, ApiError> {
    let (Some(from), Some(to)) = (query.from.as_deref(), query.to.as_deref()) else {
        return Err(Error::InvalidRequest("Missing from/to".into()).into());
    };
    let request = RoutingRequest::new(parse_point_id("from", from)?, parse_point_id("to", to)?);
    let step_free = parse_flag("step_free", query.step_free.as_deref())?;

    let response = state.store.route(&request, &state.options(step_free))?;
    tracing::debug!(
        "Route {} -> {}: {:?}",
        request.from_point_id,
        request.to_point_id,
        response.distance
    );
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct NearestRouteQuery {
    pub from: Option<String>,
    pub category: Option<String>,
    pub step_free: Option<String>,
}

pub async fn get_nearest_route(
    State(state): State<AppState>,
    Query(query): Query<NearestRouteQuery>,
) -> Result<Json<RoutingResponse>, ApiError> {
    let (Some(from), Some(category)) = (query.from.as_deref(), query.category.as_deref()) else {
        return Err(Error::InvalidRequest("Missing from/category".into()).into());
    };
    let from = parse_point_id("from", from)?;
    RoutingRequest::new(from, from).validate()?;
    let step_free = parse_flag("step_free", query.step_free.as_deref())?;

    let Some(model) = state.store.snapshot() else {
        return Ok(Json(RoutingResponse::unreachable()));
    };
    let response = route_to_nearest(&model, from, category, &state.options(step_free))?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct PositionQuery {
    pub x: Option<String>,
    pub y: Option<String>,
}

pub async fn get_nearest_point(
    State(state): State<AppState>,
    Path(floor): Path<String>,
    Query(position): Query<PositionQuery>,
) -> Result<Json<RegisteredPoint>, ApiError> {
    let x = parse_coordinate("x", position.x.as_deref())?;
    let y = parse_coordinate("y", position.y.as_deref())?;
    let model = state
        .store
        .snapshot()
        .ok_or_else(|| ApiError::NotFound("No building loaded".into()))?;
    model
        .nearest_point(&floor, x, y)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No points on floor '{floor}'")))
}

#[derive(Debug, Serialize)]
pub struct ReloadSummary {
    pub generation: u64,
    pub floors: usize,
    pub nodes: usize,
    pub points: usize,
    pub warnings: usize,
}

pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadSummary>, ApiError> {
    let store = state.store.clone();
    let model = tokio::task::spawn_blocking(move || store.reload())
        .await
        .map_err(|err| ApiError::Internal(format!("Reload task failed: {err}")))??;

    tracing::info!("Reloaded building: {}", model.summary());
    Ok(Json(ReloadSummary {
        generation: state.store.generation(),
        floors: model.floor_count(),
        nodes: model.node_count(),
        points: model.point_count(),
        warnings: model.warnings().len(),
    }))
}

fn parse_point_id(field: &str, value: &str) -> Result<i64, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidRequest(format!("'{field}' must be an integer, got '{value}'")))
}

fn parse_flag(field: &str, value: Option<&str>) -> Result<bool, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) if value.eq_ignore_ascii_case("true") || value == "1" => Ok(true),
        Some(value) if value.eq_ignore_ascii_case("false") || value == "0" => Ok(false),
        Some(value) => Err(Error::InvalidRequest(format!(
            "'{field}' must be true or false, got '{value}'"
        ))),
    }
}

fn parse_coordinate(field: &str, value: Option<&str>) -> Result<f64, Error> {
    let Some(value) = value else {
        return Err(Error::InvalidRequest(format!("Missing {field}")));
    };
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|coordinate| coordinate.is_finite())
        .ok_or_else(|| {
            Error::InvalidRequest(format!("'{field}' must be a finite number, got '{value}'"))
        })
}
