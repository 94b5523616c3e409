use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::warn;
use serde::de::DeserializeOwned;

use super::processor::point_from_raw;
use super::raw_types::{RawCsvPoint, RawPoint};
use crate::Error;
use crate::model::PointOfInterest;

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        ))
    })
}

/// Reads a whole JSON file into `T`
pub fn read_json<T>(path: &Path) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        Error::InvalidData(format!("Failed to parse '{}': {}", path.display(), e))
    })
}

/// Reads CSV rows, skipping rows that do not deserialize
fn read_csv_rows<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    let file = open(path)?;
    let mut skipped = 0usize;
    let rows = csv::Reader::from_reader(file)
        .deserialize()
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(e) => {
                skipped += 1;
                log::trace!("Skipping row of '{}': {e}", path.display());
                None
            }
        })
        .collect::<Vec<T>>();
    if skipped > 0 {
        warn!("Skipped {skipped} malformed rows in '{}'", path.display());
    }
    Ok(rows)
}

/// Reads curated points of interest. Files ending in `.csv` are read as
/// CSV with a `node,label,floor,category` header, anything else as a JSON
/// array of objects with the same fields.
pub fn read_points(path: &Path) -> Result<Vec<PointOfInterest>, Error> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let raw: Vec<RawPoint> = if is_csv {
        read_csv_rows::<RawCsvPoint>(path)?
            .into_iter()
            .map(RawPoint::from)
            .collect()
    } else {
        read_json(path)?
    };
    Ok(raw.into_iter().map(point_from_raw).collect())
}
