use log::{info, warn};

use super::{
    Adjacency, AdjacencyOptions, Building, DataWarning, Floor, InterFloorLink, PointOfInterest,
    PointRegistry, RegisteredPoint,
};

/// Immutable snapshot of a building ready for routing.
///
/// Holds the building graph, both adjacency variants, the point registry and
/// every data warning raised while it was assembled.
#[derive(Debug, Clone)]
pub struct BuildingModel {
    pub building: Building,
    pub registry: PointRegistry,
    adjacency: Adjacency,
    step_free_adjacency: Adjacency,
    warnings: Vec<DataWarning>,
}

impl BuildingModel {
    pub fn new(
        name: Option<String>,
        floors: Vec<Floor>,
        links: Vec<InterFloorLink>,
        points: &[PointOfInterest],
        mut warnings: Vec<DataWarning>,
    ) -> Self {
        let (building, building_warnings) = Building::new(name, floors, links);
        warnings.extend(building_warnings);

        let (registry, registry_warnings) = PointRegistry::build(&building, points);
        warnings.extend(registry_warnings);

        let adjacency = building.adjacency(AdjacencyOptions::default());
        let step_free_adjacency = building.adjacency(AdjacencyOptions { step_free: true });

        for warning in &warnings {
            warn!("{warning}");
        }

        let model = Self {
            building,
            registry,
            adjacency,
            step_free_adjacency,
            warnings,
        };
        info!("{}", model.summary());
        model
    }

    pub fn adjacency(&self, options: AdjacencyOptions) -> &Adjacency {
        if options.step_free {
            &self.step_free_adjacency
        } else {
            &self.adjacency
        }
    }

    pub fn warnings(&self) -> &[DataWarning] {
        &self.warnings
    }

    pub fn floor_count(&self) -> usize {
        self.building.floor_count()
    }

    pub fn node_count(&self) -> usize {
        self.building.node_count()
    }

    pub fn point_count(&self) -> usize {
        self.registry.len()
    }

    /// Registered point of the node nearest to a floor position
    pub fn nearest_point(&self, floor: &str, x: f64, y: f64) -> Option<&RegisteredPoint> {
        let node = self.building.nearest_node(floor, x, y)?;
        let point = self.registry.resolve_reverse(&node.id)?;
        self.registry.get(point)
    }

    pub fn summary(&self) -> String {
        format!(
            "Building {} with {} floors, {} nodes, {} inter-floor links and {} points ({} data warnings)",
            self.building.name.as_deref().unwrap_or("<unnamed>"),
            self.floor_count(),
            self.node_count(),
            self.building.links().len(),
            self.point_count(),
            self.warnings.len()
        )
    }
}
