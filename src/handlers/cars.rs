use axum::{Json, extract::State, http::StatusCode};

use crate::db::{Car, CarPatch, NewCar, RecordStore};
use crate::error::{ApiMessage, CarError};
use crate::middleware::CarId;
use crate::router::CarsState;

/// Run a store operation on the blocking pool; the store does synchronous file I/O.
async fn with_store<T, F>(state: CarsState, op: F) -> Result<T, CarError>
where
    T: Send + 'static,
    F: FnOnce(&RecordStore) -> Result<T, CarError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&state.store))
        .await
        .map_err(|e| CarError::TaskJoin(e.to_string()))?
}

/// GET /api (and GET /cars) -> full collection.
pub async fn list_cars(State(state): State<CarsState>) -> Result<Json<Vec<Car>>, CarError> {
    let cars = with_store(state, RecordStore::list).await?;
    Ok(Json(cars))
}

/// POST /cars -> 201 on insert, 409 when the id is taken.
pub async fn add_car(
    State(state): State<CarsState>,
    Json(candidate): Json<NewCar>,
) -> Result<(StatusCode, Json<ApiMessage>), CarError> {
    with_store(state, move |store| store.insert(candidate)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::new("Car added successfully")),
    ))
}

/// DELETE /cars/{id}
pub async fn delete_car(
    State(state): State<CarsState>,
    CarId(id): CarId,
) -> Result<Json<ApiMessage>, CarError> {
    with_store(state, move |store| store.delete(id)).await?;
    Ok(Json(ApiMessage::new("Car deleted successfully")))
}

/// PUT /cars/{id} -> overwrite `model` and/or `seats`.
pub async fn update_car(
    State(state): State<CarsState>,
    CarId(id): CarId,
    Json(patch): Json<CarPatch>,
) -> Result<Json<ApiMessage>, CarError> {
    with_store(state, move |store| store.update(id, patch)).await?;
    Ok(Json(ApiMessage::new("Car updated successfully")))
}
