use std::path::Path;

use log::info;
use rayon::prelude::*;

use super::config::BuildingModelConfig;
use super::parser::{read_json, read_points};
use super::processor::{floor_from_raw, link_from_raw};
use super::raw_types::{RawFloorGraph, RawManifest};
use crate::model::{BuildingModel, DataWarning, Floor, InterFloorLink, PointOfInterest};
use crate::Error;

/// Normalized output of the loaders, before any graph is built
#[derive(Debug, Clone, Default)]
pub struct BuildingData {
    pub name: Option<String>,
    pub floors: Vec<Floor>,
    pub links: Vec<InterFloorLink>,
    pub points: Vec<PointOfInterest>,
    /// Problems found while normalizing the source files
    pub warnings: Vec<DataWarning>,
}

impl BuildingData {
    pub fn new(floors: Vec<Floor>, links: Vec<InterFloorLink>) -> Self {
        Self {
            floors,
            links,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<PointOfInterest>) -> Self {
        self.points = points;
        self
    }

    pub fn into_model(self) -> BuildingModel {
        BuildingModel::new(
            self.name,
            self.floors,
            self.links,
            &self.points,
            self.warnings,
        )
    }
}

/// Creates a building model based on the provided configuration
///
/// # Errors
///
/// Returns an error if there are problems reading or parsing source files
pub fn create_building_model(config: &BuildingModelConfig) -> Result<BuildingModel, Error> {
    let data = load_building_data(config)?;
    info!("Building routing graph");
    Ok(data.into_model())
}

/// Reads and normalizes every source file named by `config`
///
/// # Errors
///
/// Returns an error if a file is missing or does not match any known schema
pub fn load_building_data(config: &BuildingModelConfig) -> Result<BuildingData, Error> {
    validate_config(config)?;

    info!("Reading building manifest: {}", config.manifest_path.display());
    let manifest: RawManifest = read_json(&config.manifest_path)?;
    let base_dir = config.manifest_path.parent().unwrap_or(Path::new("."));

    if manifest.floors.is_empty() {
        return Err(Error::InvalidData(format!(
            "Manifest '{}' declares no floors",
            config.manifest_path.display()
        )));
    }

    info!("Processing {} floor graphs", manifest.floors.len());
    let loaded = manifest
        .floors
        .par_iter()
        .map(|entry| {
            let graph: RawFloorGraph = read_json(&base_dir.join(&entry.graph))?;
            let mut warnings = Vec::new();
            let floor = floor_from_raw(entry, graph, &mut warnings);
            Ok::<_, Error>((floor, warnings))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut warnings = Vec::new();
    let mut floors = Vec::with_capacity(loaded.len());
    for (floor, floor_warnings) in loaded {
        info!(
            "Floor {}: {} nodes, {} edges",
            floor.id,
            floor.nodes.len(),
            floor.edges.len()
        );
        floors.push(floor);
        warnings.extend(floor_warnings);
    }

    let links = manifest
        .links
        .into_iter()
        .map(|raw| link_from_raw(raw, &mut warnings))
        .collect::<Vec<_>>();
    info!("Loaded {} inter-floor links", links.len());

    let points = match &config.points_path {
        Some(path) => {
            info!("Reading points of interest: {}", path.display());
            read_points(path)?
        }
        None => Vec::new(),
    };

    Ok(BuildingData {
        name: manifest.name,
        floors,
        links,
        points,
        warnings,
    })
}

fn validate_config(config: &BuildingModelConfig) -> Result<(), Error> {
    if !config.manifest_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!(
                "Building manifest not found: {}",
                config.manifest_path.display()
            ),
        )));
    }

    if let Some(points) = &config.points_path {
        if !points.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Points of interest file not found: {}", points.display()),
            )));
        }
    }

    Ok(())
}
