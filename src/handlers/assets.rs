use axum::{
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::router::CarsState;

const INDEX: &str = "index.html";

/// Serve the built front end. Unknown paths fall back to `index.html` so the
/// client-side router can take over.
pub async fn serve_frontend(State(state): State<CarsState>, method: Method, uri: Uri) -> Response {
    let Some(root) = state.static_dir.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }
    let Some(relative) = sanitize(uri.path()) else {
        debug!(path = uri.path(), "rejected static asset path");
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(resp) = read_asset(&root.join(&relative)).await {
        return resp;
    }
    read_asset(&root.join(INDEX))
        .await
        .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

fn sanitize(path: &str) -> Option<PathBuf> {
    let relative = Path::new(path.trim_start_matches('/'));
    let mut clean = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(seg) => clean.push(seg),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if clean.as_os_str().is_empty() {
        clean.push(INDEX);
    }
    Some(clean)
}

async fn read_asset(path: &Path) -> Option<Response> {
    let meta = tokio::fs::metadata(path).await.ok()?;
    if !meta.is_file() {
        return None;
    }
    let bytes = tokio::fs::read(path).await.ok()?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response())
}
