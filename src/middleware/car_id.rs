use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::error::CarError;

/// Numeric `{id}` path segment. Anything that is not a valid id cannot match a
/// stored car, so it is rejected as not found rather than as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarId(pub u64);

impl<S> FromRequestParts<S> for CarId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        raw.trim()
            .parse::<u64>()
            .map(CarId)
            .map_err(|_| CarError::NotFound(0).into_response())
    }
}
