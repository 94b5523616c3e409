//! Stable point identifiers on top of graph node identifiers

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{Building, DataWarning, Node};
use crate::{FloorId, NodeId, PointId};

/// Curated, named place as delivered by the points-of-interest loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub node: NodeId,
    pub label: String,
    #[serde(default)]
    pub floor: Option<FloorId>,
    #[serde(default)]
    pub category: Option<String>,
}

impl PointOfInterest {
    pub fn new(node: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            label: label.into(),
            floor: None,
            category: None,
        }
    }
}

/// Registry entry exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredPoint {
    pub id: PointId,
    pub name: String,
    pub node: NodeId,
    pub floor: FloorId,
    pub category: String,
    /// `false` for entries synthesized from bare graph nodes
    pub curated: bool,
}

/// Bijection between point ids and node ids.
///
/// Curated points are registered first, in list order, so their ids stay
/// stable across rebuilds as long as that list is stable. Every remaining
/// node of the building is registered afterwards.
#[derive(Debug, Clone, Default)]
pub struct PointRegistry {
    points: Vec<RegisteredPoint>,
    by_node: HashMap<NodeId, PointId>,
    by_label: HashMap<String, PointId>,
}

impl PointRegistry {
    pub fn build(building: &Building, curated: &[PointOfInterest]) -> (Self, Vec<DataWarning>) {
        let mut registry = Self::default();
        let mut warnings = Vec::new();

        for poi in curated {
            let Some(node) = building.node(&poi.node) else {
                warnings.push(DataWarning::UnknownPointNode {
                    label: poi.label.clone(),
                    node: poi.node.clone(),
                });
                continue;
            };
            if let Some(floor) = poi.floor.as_deref() {
                if floor != node.floor {
                    log::debug!(
                        "Point '{}' declares floor {floor} but node {} is on floor {}",
                        poi.label,
                        node.id,
                        node.floor
                    );
                }
            }
            let category = poi
                .category
                .clone()
                .unwrap_or_else(|| node.kind.as_str().to_string());
            registry.register(node, poi.label.clone(), category, true);
        }

        for node in building.nodes() {
            if registry.by_node.contains_key(&node.id) {
                continue;
            }
            registry.register(
                node,
                synthesized_name(node),
                node.kind.as_str().to_string(),
                false,
            );
        }

        (registry, warnings)
    }

    /// Registers a node, returning the id it already has if any
    fn register(&mut self, node: &Node, name: String, category: String, curated: bool) -> PointId {
        if let Some(&id) = self.by_node.get(&node.id) {
            return id;
        }
        let id = PointId::try_from(self.points.len() + 1).unwrap_or(PointId::MAX);
        self.by_node.insert(node.id.clone(), id);
        self.by_label.entry(name.to_uppercase()).or_insert(id);
        self.points.push(RegisteredPoint {
            id,
            name,
            node: node.id.clone(),
            floor: node.floor.clone(),
            category,
            curated,
        });
        id
    }

    pub fn resolve(&self, point: PointId) -> Option<&NodeId> {
        self.get(point).map(|p| &p.node)
    }

    pub fn resolve_reverse(&self, node: &str) -> Option<PointId> {
        self.by_node.get(node).copied()
    }

    pub fn get(&self, point: PointId) -> Option<&RegisteredPoint> {
        let idx = usize::try_from(point).ok()?.checked_sub(1)?;
        self.points.get(idx)
    }

    /// First point carrying this display name, ignoring case
    pub fn find_by_label(&self, label: &str) -> Option<&RegisteredPoint> {
        let id = *self.by_label.get(&label.trim().to_uppercase())?;
        self.get(id)
    }

    /// All points in id order
    pub fn points(&self) -> &[RegisteredPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn synthesized_name(node: &Node) -> String {
    match &node.name {
        Some(name) if !name.trim().is_empty() => name.clone(),
        _ => format!("{} {}", node.kind.display_name(), node.id),
    }
}
