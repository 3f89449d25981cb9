//! Reads the scraped input files.
//!
//! Three files feed the report:
//!
//! - the post list (`[{"date": "2024/01/31", "title": ..., "page": ...}, ...]`)
//! - the content totals (`{"total_blogs": ..., "total_images": ..., ...}`)
//! - the location list for the map (`[{"name": ..., "lat": ..., "lng": ...}, ...]`)

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::models::{ContentTotals, Location, Post};

pub fn load_posts(path: &Path) -> Result<Vec<Post>, LoadError> {
    let posts: Vec<Post> = load_array(path)?;
    info!("Loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}

pub fn load_locations(path: &Path) -> Result<Vec<Location>, LoadError> {
    let locations: Vec<Location> = load_array(path)?;
    info!("Loaded {} locations from {}", locations.len(), path.display());
    Ok(locations)
}

/// The totals file must hold a single JSON object; a list is rejected.
pub fn load_content_totals(path: &Path) -> Result<ContentTotals, LoadError> {
    let value = read_value(path)?;
    if !value.is_object() {
        return Err(LoadError::UnexpectedShape {
            path: path.to_path_buf(),
            expected: "object",
            found: json_kind(&value),
        });
    }
    let totals = serde_json::from_value(value).map_err(|e| LoadError::json(path, e))?;
    debug!("Loaded content totals from {}", path.display());
    Ok(totals)
}

pub fn posts_from_reader<R: Read>(reader: R) -> Result<Vec<Post>, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub fn locations_from_reader<R: Read>(reader: R) -> Result<Vec<Location>, serde_json::Error> {
    serde_json::from_reader(reader)
}

fn load_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let value = read_value(path)?;
    if !value.is_array() {
        return Err(LoadError::UnexpectedShape {
            path: path.to_path_buf(),
            expected: "array",
            found: json_kind(&value),
        });
    }
    serde_json::from_value(value).map_err(|e| LoadError::json(path, e))
}

fn read_value(path: &Path) -> Result<serde_json::Value, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError::json(path, e))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
