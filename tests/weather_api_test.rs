//! End-to-end tests of the REST API over SQLite and the moka cache.

mod helpers;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use weather_cache::adapters::http::router;
use weather_cache::ListInvalidation;

async fn app(list_invalidation: ListInvalidation) -> Router {
    router(helpers::setup_service(list_invalidation).await, false)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Option<Value>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).ok();
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = app(ListInvalidation::Strict).await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_create_returns_201_with_id() {
    let app = app(ListInvalidation::Strict).await;

    let (status, body) = send(&app, Method::POST, "/api/weather", Some(json!({"city": "Paris", "temperature": "21"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let body = body.unwrap();
    assert!(body["id"].is_i64());
    assert_eq!(body["city"], "Paris");
    assert_eq!(body["temperature"], "21");
}

#[tokio::test]
async fn test_post_existing_city_updates_in_place() {
    let app = app(ListInvalidation::Strict).await;

    let (_, first) = send(&app, Method::POST, "/api/weather", Some(json!({"city": "Paris", "temperature": "21"}))).await;
    let (status, second) = send(&app, Method::POST, "/api/weather", Some(json!({"city": "Paris", "temperature": "26"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first.unwrap()["id"], second.as_ref().unwrap()["id"]);

    let (_, fetched) = send(&app, Method::GET, "/api/weather/Paris", None).await;
    assert_eq!(fetched.unwrap()["temperature"], "26");
}

#[tokio::test]
async fn test_get_missing_city_is_404() {
    let app = app(ListInvalidation::Strict).await;

    let (status, body) = send(&app, Method::GET, "/api/weather/Atlantis", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_put_updates_existing_city() {
    let app = app(ListInvalidation::Strict).await;
    let (_, created) = send(&app, Method::POST, "/api/weather", Some(json!({"city": "Oslo", "temperature": "3"}))).await;

    let (status, updated) = send(&app, Method::PUT, "/api/weather/Oslo", Some(json!({"temperature": "-2"}))).await;
    assert_eq!(status, StatusCode::OK);

    let updated = updated.unwrap();
    assert_eq!(updated["id"], created.unwrap()["id"]);
    assert_eq!(updated["temperature"], "-2");

    let (_, all) = send(&app, Method::GET, "/api/weather", None).await;
    assert_eq!(all.unwrap(), json!([updated]));
}

#[tokio::test]
async fn test_put_missing_city_is_404() {
    let app = app(ListInvalidation::Strict).await;

    let (status, _) = send(&app, Method::PUT, "/api/weather/Atlantis", Some(json!({"temperature": "20"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = send(&app, Method::GET, "/api/weather", None).await;
    assert_eq!(all.unwrap(), json!([]));
}

#[tokio::test]
async fn test_list_returns_all_cities() {
    let app = app(ListInvalidation::Strict).await;
    send(&app, Method::POST, "/api/weather", Some(json!({"city": "Paris", "temperature": "21"}))).await;
    send(&app, Method::POST, "/api/weather", Some(json!({"city": "Cairo", "temperature": "34"}))).await;

    let (status, body) = send(&app, Method::GET, "/api/weather", None).await;
    assert_eq!(status, StatusCode::OK);

    let cities: Vec<_> = body.unwrap().as_array().unwrap().iter().map(|r| r["city"].clone()).collect();
    assert_eq!(cities, vec![json!("Paris"), json!("Cairo")]);
}

#[tokio::test]
async fn test_delete_flow() {
    let app = app(ListInvalidation::Strict).await;
    send(&app, Method::POST, "/api/weather", Some(json!({"city": "Paris", "temperature": "21"}))).await;
    send(&app, Method::GET, "/api/weather", None).await;

    let (status, _) = send(&app, Method::DELETE, "/api/weather/Paris", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/weather/Paris", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = send(&app, Method::GET, "/api/weather", None).await;
    assert_eq!(all.unwrap(), json!([]));
}

#[tokio::test]
async fn test_delete_missing_city_is_204() {
    let app = app(ListInvalidation::Strict).await;

    let (status, _) = send(&app, Method::DELETE, "/api/weather/Atlantis", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_blank_city_is_400() {
    let app = app(ListInvalidation::Strict).await;

    let (status, body) = send(&app, Method::POST, "/api/weather", Some(json!({"city": "", "temperature": "21"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_relaxed_policy_serves_stale_list() {
    let app = app(ListInvalidation::Relaxed).await;
    send(&app, Method::POST, "/api/weather", Some(json!({"city": "Paris", "temperature": "21"}))).await;
    send(&app, Method::GET, "/api/weather", None).await;

    send(&app, Method::POST, "/api/weather", Some(json!({"city": "Oslo", "temperature": "3"}))).await;

    // Oslo is persisted and individually readable, but the cached list predates it.
    let (status, _) = send(&app, Method::GET, "/api/weather/Oslo", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, all) = send(&app, Method::GET, "/api/weather", None).await;
    let all = all.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["city"], "Paris");
}
