//! Source file schemas, as found on disk.
//!
//! Each upstream shape gets its own type; `processor` normalizes them into
//! the canonical model.

use std::path::PathBuf;

use serde::Deserialize;

use crate::model::ConnectorKind;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawManifest {
    #[serde(default)]
    pub name: Option<String>,
    pub floors: Vec<RawFloorEntry>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFloorEntry {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub graph: PathBuf,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub meters_per_pixel: Option<f64>,
    #[serde(default)]
    pub coordinates: Option<RawCoordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawCoordinates {
    Pixel,
    Geographic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLink {
    pub from: RawNodeId,
    pub to: RawNodeId,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub kind: Option<ConnectorKind>,
}

/// Floor graph file, in one of the two known schemas
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawFloorGraph {
    /// Floor-editor export: pixel coordinates, ids usually strings
    Pixel(RawPixelGraph),
    /// Database export: numeric ids and latitude / longitude
    Geographic(RawGeoGraph),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPixelGraph {
    pub nodes: Vec<RawPixelNode>,
    #[serde(default)]
    pub edges: Vec<RawPixelEdge>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub meters_per_pixel: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RawPixelNode {
    pub id: RawNodeId,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPixelEdge {
    pub from: RawNodeId,
    pub to: RawNodeId,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub accessible: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RawGeoGraph {
    pub nodes: Vec<RawGeoNode>,
    #[serde(default)]
    pub edges: Vec<RawGeoEdge>,
}

#[derive(Debug, Deserialize)]
pub struct RawGeoNode {
    pub id: RawNodeId,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub tags: Option<RawTags>,
}

#[derive(Debug, Deserialize)]
pub struct RawGeoEdge {
    pub from_id: RawNodeId,
    pub to_id: RawNodeId,
    #[serde(default)]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawNodeId {
    Number(i64),
    Text(String),
}

impl From<RawNodeId> for String {
    fn from(id: RawNodeId) -> Self {
        match id {
            RawNodeId::Number(n) => n.to_string(),
            RawNodeId::Text(s) => s,
        }
    }
}

/// Search tags, either as a list or as a JSON-encoded string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    List(Vec<String>),
    Encoded(String),
}

/// Entry of a JSON points-of-interest file
#[derive(Debug, Deserialize)]
pub struct RawPoint {
    pub node: RawNodeId,
    pub label: String,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Row of a CSV points-of-interest file. The node id is read as text so
/// that ids like `007` are not reinterpreted as numbers.
#[derive(Debug, Deserialize)]
pub struct RawCsvPoint {
    pub node: String,
    pub label: String,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<RawCsvPoint> for RawPoint {
    fn from(row: RawCsvPoint) -> Self {
        Self {
            node: RawNodeId::Text(row.node),
            label: row.label,
            floor: row.floor,
            category: row.category,
        }
    }
}
