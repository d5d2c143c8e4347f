use mimalloc::MiMalloc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use carlot::db::{JsonFileStorage, RecordStore};
use carlot::router::{CarsState, cars_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = carlot::Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let storage = JsonFileStorage::new(cfg.data_path.clone());
    info!(
        port = cfg.port,
        app_env = ?cfg.app_env,
        data_path = %storage.path().display(),
        loglevel = %cfg.loglevel
    );

    let store = RecordStore::new(Arc::new(storage));
    let mut state = CarsState::new(store);
    if cfg.is_production() {
        if !cfg.static_dir.is_dir() {
            warn!(path = %cfg.static_dir.display(), "static directory not found; front end requests will 404");
        }
        info!(path = %cfg.static_dir.display(), "serving front end");
        state = state.with_static_dir(cfg.static_dir.clone());
    }
    let app = cars_router(state);

    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server is running at http://localhost:{}", cfg.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
