use serde::{Deserialize, Deserializer, Serialize};

/// Persisted record. Reading is lenient: documents written by older clients may
/// lack `make`/`model` or carry `seats` as a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Car {
    pub id: u64,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, deserialize_with = "seats_or_zero")]
    pub seats: u32,
}

/// Insert candidate. `id` is optional; a missing or zero id is assigned by the store.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NewCar {
    #[serde(default)]
    pub id: Option<u64>,
    pub make: String,
    pub model: String,
    #[serde(deserialize_with = "seats_required")]
    pub seats: u32,
}

impl NewCar {
    pub fn requested_id(&self) -> Option<u64> {
        self.id.filter(|id| *id != 0)
    }

    pub(crate) fn into_car(self, id: u64) -> Car {
        Car {
            id,
            make: self.make,
            model: self.model,
            seats: self.seats,
        }
    }
}

/// Partial update. Only `model` and `seats` are mutable; other fields in the body are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CarPatch {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "seats_from_number_or_string")]
    pub seats: Option<u32>,
}

impl CarPatch {
    /// Overwrite provided, non-empty fields. Returns whether anything changed.
    pub fn apply(self, car: &mut Car) -> bool {
        let mut touched = false;
        if let Some(model) = self.model.filter(|m| !m.is_empty()) {
            car.model = model;
            touched = true;
        }
        if let Some(seats) = self.seats.filter(|s| *s != 0) {
            car.seats = seats;
            touched = true;
        }
        touched
    }
}

fn seats_required<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    seats_from_number_or_string(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("seats must not be empty"))
}

fn seats_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(seats_from_number_or_string(deserializer)?.unwrap_or(0))
}

// Browser forms post raw input values, so `"7"` must be accepted alongside `7`.
fn seats_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seats {
        Number(u32),
        Text(String),
    }

    match Option::<Seats>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Seats::Number(n)) => Ok(Some(n)),
        Some(Seats::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Seats::Text(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
