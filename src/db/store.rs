use crate::db::models::{Car, CarPatch, NewCar};
use crate::db::storage::CarStorage;
use crate::error::CarError;
use std::sync::Arc;
use tracing::{info, warn};

/// CRUD over the car collection.
///
/// Every operation reads the whole document, mutates it in memory and writes the
/// whole document back. Nothing is cached between calls and nothing is locked:
/// concurrent writers race and the last one wins.
#[derive(Clone)]
pub struct RecordStore {
    storage: Arc<dyn CarStorage>,
}

impl RecordStore {
    pub fn new(storage: Arc<dyn CarStorage>) -> Self {
        Self { storage }
    }

    /// All persisted cars in insertion order. A missing or unparsable document
    /// is reset to `[]` and reported as empty; any other load error is returned
    /// and the document is left alone.
    pub fn list(&self) -> Result<Vec<Car>, CarError> {
        match self.storage.load() {
            Ok(cars) => Ok(cars),
            Err(CarError::StorageUnavailable(reason)) => {
                warn!(%reason, "car storage unreadable; reinitializing to empty collection");
                self.storage.save(&[])?;
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn insert(&self, candidate: NewCar) -> Result<Car, CarError> {
        let mut cars = self.list()?;

        let id = match candidate.requested_id() {
            Some(id) if cars.iter().any(|c| c.id == id) => {
                warn!(id, "car with this id already exists");
                return Err(CarError::DuplicateId(id));
            }
            Some(id) => id,
            None => next_id(&cars)?,
        };

        let car = candidate.into_car(id);
        cars.push(car.clone());
        self.storage.save(&cars)?;
        info!(id, make = %car.make, model = %car.model, "car added");
        Ok(car)
    }

    pub fn delete(&self, id: u64) -> Result<Car, CarError> {
        let mut cars = self.list()?;
        let Some(index) = cars.iter().position(|c| c.id == id) else {
            warn!(id, "car not found for delete");
            return Err(CarError::NotFound(id));
        };

        let removed = cars.remove(index);
        self.storage.save(&cars)?;
        info!(id, "car deleted");
        Ok(removed)
    }

    /// Apply `patch` to the car with `id`. `make` is never changed.
    pub fn update(&self, id: u64, patch: CarPatch) -> Result<Car, CarError> {
        let mut cars = self.list()?;
        let Some(car) = cars.iter_mut().find(|c| c.id == id) else {
            warn!(id, "car not found for update");
            return Err(CarError::NotFound(id));
        };

        patch.apply(car);
        let updated = car.clone();
        self.storage.save(&cars)?;
        info!(id, model = %updated.model, seats = updated.seats, "car updated");
        Ok(updated)
    }
}

fn next_id(cars: &[Car]) -> Result<u64, CarError> {
    match cars.iter().map(|c| c.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            warn!(max, "car id space exhausted");
            CarError::IdSpaceExhausted(max)
        }),
    }
}
