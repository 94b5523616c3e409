//! This module is responsible for loading building data from manifest,
//! floor graph and points-of-interest files and building a routing model.

mod builder;
mod config;
mod parser;
mod processor;
pub mod raw_types;

pub use builder::{BuildingData, create_building_model, load_building_data};
pub use config::BuildingModelConfig;
pub use parser::{read_json, read_points};
