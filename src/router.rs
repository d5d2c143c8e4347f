use axum::{
    Router, middleware,
    routing::{get, put},
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::db::RecordStore;
use crate::handlers::assets::serve_frontend;
use crate::handlers::cars::{add_car, delete_car, list_cars, update_car};
use crate::middleware::headers::{cors, security_headers};

#[derive(Clone)]
pub struct CarsState {
    pub store: RecordStore,
    /// Set only in production mode.
    pub static_dir: Option<Arc<PathBuf>>,
}

impl CarsState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(Arc::new(dir.into()));
        self
    }
}

pub fn cars_router(state: CarsState) -> Router {
    let mut router = Router::new()
        .route("/api", get(list_cars))
        .route("/cars", get(list_cars).post(add_car))
        .route("/cars/{id}", put(update_car).delete(delete_car));

    if state.static_dir.is_some() {
        router = router.fallback(serve_frontend);
    }

    router
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}
