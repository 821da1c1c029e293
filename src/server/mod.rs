mod handlers;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::api::{DynAPI, API};
use crate::config::Config;
use crate::error::{server_error, Error};
use crate::server::handlers::routes;

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/routes", get(routes::list).post(routes::create))
        .layer(Extension(api))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, config: &Config) -> Result<(), Error> {
    let app = router(api);
    let addr = config.addr();

    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)
        .map_err(server_error)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(server_error)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}

#[cfg(test)]
async fn call(
    app: Router,
    method: &str,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let request = Request::builder().method(method).uri("/routes");
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

#[cfg(test)]
fn test_app() -> Router {
    use crate::db::InMemoryRouteStore;
    use crate::engine::Engine;

    router(Engine::new(Arc::new(InMemoryRouteStore::new())))
}

#[test]
fn list_starts_empty() {
    use axum::http::StatusCode;
    use serde_json::json;
    use tokio_test::block_on;

    let (status, body) = block_on(call(test_app(), "GET", None));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[test]
fn create_then_list() {
    use axum::http::StatusCode;
    use serde_json::json;
    use tokio_test::block_on;

    let app = test_app();

    let (status, created) = block_on(call(
        app.clone(),
        "POST",
        Some(json!({
            "title": "my title",
            "startPosition": { "lat": 1, "lng": 2 },
            "endPosition": { "lat": 3, "lng": 4 },
        })),
    ));
    assert_eq!(status, StatusCode::CREATED);
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert_eq!(created["title"], "my title");
    assert_eq!(created["startPosition"], json!({ "lat": 1.0, "lng": 2.0 }));
    assert_eq!(created["endPosition"], json!({ "lat": 3.0, "lng": 4.0 }));
    assert_eq!(created["points"], json!([]));

    let (status, second) = block_on(call(
        app.clone(),
        "POST",
        Some(json!({
            "title": "second",
            "startPosition": { "lat": 1, "lng": 2 },
            "endPosition": { "lat": 3, "lng": 4 },
            "points": [{ "lat": 2, "lng": 3 }],
        })),
    ));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["points"], json!([{ "lat": 2.0, "lng": 3.0 }]));

    let (status, listed) = block_on(call(app, "GET", None));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created, second]));
}

#[test]
fn create_rejects_malformed_body() {
    use axum::http::StatusCode;
    use serde_json::json;
    use tokio_test::block_on;

    let app = test_app();

    let (status, body) = block_on(call(
        app.clone(),
        "POST",
        Some(json!({ "title": "no positions" })),
    ));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "code": 101, "error": "invalid input" }));

    let (_, listed) = block_on(call(app, "GET", None));
    assert_eq!(listed, json!([]));
}
