use crate::db::models::Car;
use crate::db::storage::CarStorage;
use crate::error::CarError;
use serde_json::error::Category;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// The backing document: one compact JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CarStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Car>, CarError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            CarError::StorageUnavailable(format!("read {}: {e}", self.path.display()))
        })?;
        // Broken JSON is recoverable by a reset; well-formed JSON of the wrong
        // shape still holds records and must not be overwritten.
        let cars: Vec<Car> = serde_json::from_str(&contents).map_err(|e| match e.classify() {
            Category::Data => {
                error!(path = %self.path.display(), error = %e, "car collection has unexpected shape");
                CarError::Json(e)
            }
            Category::Io | Category::Syntax | Category::Eof => {
                CarError::StorageUnavailable(format!("parse {}: {e}", self.path.display()))
            }
        })?;
        debug!(path = %self.path.display(), count = cars.len(), "loaded car collection");
        Ok(cars)
    }

    fn save(&self, cars: &[Car]) -> Result<(), CarError> {
        let body = serde_json::to_vec(cars)?;
        fs::write(&self.path, body).map_err(|source| {
            error!(path = %self.path.display(), error = %source, "failed to write car collection");
            CarError::Persistence {
                path: self.path.clone(),
                source,
            }
        })
    }
}
