use crate::db::models::Car;
use crate::db::storage::CarStorage;
use crate::error::CarError;
use std::sync::Mutex;

/// In-memory backing document. `None` plays the role of a missing file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: Mutex<Option<Vec<Car>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cars(cars: Vec<Car>) -> Self {
        Self {
            document: Mutex::new(Some(cars)),
        }
    }

    /// Current document without going through the self-healing path.
    pub fn snapshot(&self) -> Option<Vec<Car>> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CarStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Car>, CarError> {
        self.snapshot()
            .ok_or_else(|| CarError::StorageUnavailable("in-memory document not initialized".into()))
    }

    fn save(&self, cars: &[Car]) -> Result<(), CarError> {
        *self
            .document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(cars.to_vec());
        Ok(())
    }
}
