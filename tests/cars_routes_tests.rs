use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use carlot::db::{JsonFileStorage, RecordStore};
use carlot::router::{CarsState, cars_router};
use serde_json::{Value, json};
use std::{fs, path::PathBuf, sync::Arc};
use tempfile::TempDir;
use tower::ServiceExt;

struct Harness {
    _dir: TempDir,
    data_path: PathBuf,
    app: Router,
}

fn harness() -> Harness {
    let dir = TempDir::new().expect("failed to create temp dir");
    let data_path = dir.path().join("cars.json");
    let store = RecordStore::new(Arc::new(JsonFileStorage::new(&data_path)));
    let app = cars_router(CarsState::new(store));
    Harness {
        _dir: dir,
        data_path,
        app,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    // Extractor rejections answer with plain text; treat those as no JSON body.
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn list_on_fresh_storage_returns_empty_array_and_creates_file() {
    let h = harness();
    let (status, body) = send(&h.app, "GET", "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(fs::read_to_string(&h.data_path).unwrap(), "[]");
}

#[tokio::test]
async fn post_assigns_id_and_returns_201() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        "POST",
        "/cars",
        Some(json!({"make": "Toyota", "model": "Camry", "seats": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "Car added successfully"}));

    let (_, cars) = send(&h.app, "GET", "/cars", None).await;
    assert_eq!(
        cars,
        json!([{"id": 1, "make": "Toyota", "model": "Camry", "seats": 5}])
    );
}

#[tokio::test]
async fn post_with_existing_id_returns_409() {
    let h = harness();
    let car = json!({"id": 1, "make": "Ford", "model": "Focus", "seats": 4});
    let (status, _) = send(&h.app, "POST", "/cars", Some(car)).await;
    assert_eq!(status, StatusCode::CREATED);

    let dup = json!({"id": 1, "make": "Honda", "model": "Civic", "seats": 5});
    let (status, body) = send(&h.app, "POST", "/cars", Some(dup)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "Car with this ID already exists"}));

    let (_, cars) = send(&h.app, "GET", "/api", None).await;
    assert_eq!(cars.as_array().unwrap().len(), 1);
    assert_eq!(cars[0]["model"], "Focus");
}

#[tokio::test]
async fn post_accepts_string_seats_from_forms() {
    let h = harness();
    let car = json!({"make": "Ford", "model": "Focus", "seats": "4"});
    let (status, _) = send(&h.app, "POST", "/cars", Some(car)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, cars) = send(&h.app, "GET", "/api", None).await;
    assert_eq!(cars[0]["seats"], 4);
}

#[tokio::test]
async fn post_without_id_after_max_id_returns_409() {
    let h = harness();
    let top = json!({"id": u64::MAX, "make": "Ford", "model": "Focus", "seats": 4});
    let (status, _) = send(&h.app, "POST", "/cars", Some(top)).await;
    assert_eq!(status, StatusCode::CREATED);

    let next = json!({"make": "Kia", "model": "Rio", "seats": 5});
    let (status, _) = send(&h.app, "POST", "/cars", Some(next)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, cars) = send(&h.app, "GET", "/api", None).await;
    assert_eq!(cars.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_preserves_document_with_legacy_records() {
    let h = harness();
    let raw = r#"[{"id":1,"make":"Toyota","model":"Camry","seats":5},{"id":2,"model":"Ford Focus","seats":"4"}]"#;
    fs::write(&h.data_path, raw).unwrap();

    let (status, cars) = send(&h.app, "GET", "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cars.as_array().unwrap().len(), 2);
    assert_eq!(cars[1]["seats"], 4);
    assert_eq!(fs::read_to_string(&h.data_path).unwrap(), raw);
}

#[tokio::test]
async fn post_missing_required_field_is_rejected() {
    let h = harness();
    let (status, _) = send(&h.app, "POST", "/cars", Some(json!({"make": "Ford"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn put_updates_only_provided_fields() {
    let h = harness();
    fs::write(
        &h.data_path,
        r#"[{"id":1,"make":"Nissan","model":"Altima","seats":4}]"#,
    )
    .unwrap();

    let (status, body) = send(&h.app, "PUT", "/cars/1", Some(json!({"seats": "7"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Car updated successfully"}));

    let (_, cars) = send(&h.app, "GET", "/api", None).await;
    assert_eq!(
        cars,
        json!([{"id": 1, "make": "Nissan", "model": "Altima", "seats": 7}])
    );

    let patch = json!({"make": "Hyundai", "model": "Sonata"});
    let (status, _) = send(&h.app, "PUT", "/cars/1", Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, cars) = send(&h.app, "GET", "/api", None).await;
    assert_eq!(cars[0]["make"], "Nissan");
    assert_eq!(cars[0]["model"], "Sonata");
}

#[tokio::test]
async fn put_and_delete_unknown_ids_return_404() {
    let h = harness();
    let raw = r#"[{"id":1,"make":"Toyota","model":"Camry","seats":5}]"#;
    fs::write(&h.data_path, raw).unwrap();

    let (status, body) = send(&h.app, "PUT", "/cars/2", Some(json!({"seats": 2}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Car not found"}));

    let (status, _) = send(&h.app, "DELETE", "/cars/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&h.app, "DELETE", "/cars/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(fs::read_to_string(&h.data_path).unwrap(), raw);
}

#[tokio::test]
async fn delete_removes_car() {
    let h = harness();
    fs::write(
        &h.data_path,
        r#"[{"id":1,"make":"A","model":"a","seats":2},{"id":2,"make":"B","model":"b","seats":4}]"#,
    )
    .unwrap();

    let (status, body) = send(&h.app, "DELETE", "/cars/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Car deleted successfully"}));

    let (_, cars) = send(&h.app, "GET", "/api", None).await;
    assert_eq!(cars, json!([{"id": 2, "make": "B", "model": "b", "seats": 4}]));
}

#[tokio::test]
async fn responses_carry_cors_and_security_headers() {
    let h = harness();
    let resp = h
        .app
        .clone()
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let headers = resp.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN");

    let preflight = h
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/cars/1")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(preflight.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        preflight.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "content-type"
    );
}

#[tokio::test]
async fn production_mode_serves_assets_with_index_fallback() {
    let dir = TempDir::new().unwrap();
    let static_dir = dir.path().join("build");
    fs::create_dir_all(static_dir.join("static")).unwrap();
    fs::write(static_dir.join("index.html"), "<html>cars</html>").unwrap();
    fs::write(static_dir.join("static").join("app.js"), "console.log(1)").unwrap();

    let store = RecordStore::new(Arc::new(JsonFileStorage::new(dir.path().join("cars.json"))));
    let app = cars_router(CarsState::new(store).with_static_dir(&static_dir));

    let fetch = |uri: &'static str| {
        let app = app.clone();
        async move {
            let resp = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            let status = resp.status();
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            (status, content_type, String::from_utf8(body.to_vec()).unwrap())
        }
    };

    let (status, content_type, body) = fetch("/static/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.contains("javascript"));
    assert_eq!(body, "console.log(1)");

    let (status, content_type, body) = fetch("/add-car").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body, "<html>cars</html>");

    let (status, _, _) = fetch("/../cars.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = fetch("/api").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn development_mode_does_not_serve_assets() {
    let h = harness();
    let (status, _) = send(&h.app, "GET", "/index.html", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
