use std::path::PathBuf;

use serde::Deserialize;

/// Location of the source files of a building
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildingModelConfig {
    /// Building manifest (JSON). Floor graph paths inside it are relative
    /// to the manifest's directory.
    pub manifest_path: PathBuf,
    /// Curated points of interest, CSV or JSON
    #[serde(default)]
    pub points_path: Option<PathBuf>,
}

impl BuildingModelConfig {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            points_path: None,
        }
    }

    #[must_use]
    pub fn with_points(mut self, points_path: impl Into<PathBuf>) -> Self {
        self.points_path = Some(points_path.into());
        self
    }
}
