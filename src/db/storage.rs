use crate::db::models::Car;
use crate::error::CarError;

/// Whole-document persistence for the car collection.
///
/// `load` must report a missing or unparsable document as an error so the
/// store can reinitialize it; `save` replaces the entire document.
pub trait CarStorage: Send + Sync {
    fn load(&self) -> Result<Vec<Car>, CarError>;

    fn save(&self, cars: &[Car]) -> Result<(), CarError>;
}
