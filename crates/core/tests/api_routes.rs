//! Control API routes against the in-memory target backend.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use dev_browser::PageRegistry;
use dev_browser::api::{ApiState, router};
use dev_browser::testing::FakeTargets;
use serde_json::{Value, json};
use tower::ServiceExt;

const WS_ENDPOINT: &str = "ws://127.0.0.1:9223/devtools/browser/3f5c";

fn app() -> (Router, Arc<FakeTargets>) {
	let fake = Arc::new(FakeTargets::new());
	let registry = Arc::new(PageRegistry::new(fake.clone()));
	(router(ApiState::new(WS_ENDPOINT, registry)), fake)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
	let mut builder = Request::builder().method(method).uri(uri);
	let body = match body {
		Some(value) => {
			builder = builder.header(header::CONTENT_TYPE, "application/json");
			Body::from(value.to_string())
		}
		None => Body::empty(),
	};

	let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
	let status = response.status();
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes) }));
	(status, value)
}

#[tokio::test]
async fn root_reports_ws_endpoint() {
	let (app, _) = app();
	let (status, body) = send(&app, Method::GET, "/", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "wsEndpoint": WS_ENDPOINT }));
}

#[tokio::test]
async fn get_page_creates_then_reuses() {
	let (app, fake) = app();

	let (status, first) = send(&app, Method::POST, "/pages", Some(json!({ "name": "main" }))).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(first["wsEndpoint"], WS_ENDPOINT);
	assert_eq!(first["name"], "main");
	assert_eq!(first["targetId"], "page-1");

	let (status, second) = send(&app, Method::POST, "/pages", Some(json!({ "name": "main" }))).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(second, first);
	assert_eq!(fake.created_count().await, 1);
}

#[tokio::test]
async fn get_page_requires_name() {
	let (app, fake) = app();

	for body in [json!({}), json!({ "name": "" })] {
		let (status, response) = send(&app, Method::POST, "/pages", Some(body)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(response, json!({ "error": "name is required" }));
	}
	assert_eq!(fake.created_count().await, 0);
}

#[tokio::test]
async fn get_page_rejects_long_names() {
	let (app, _) = app();
	let name = "n".repeat(257);
	let (status, response) = send(&app, Method::POST, "/pages", Some(json!({ "name": name }))).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(response["error"], "name must be at most 256 characters");
}

#[tokio::test]
async fn get_page_rejects_malformed_body() {
	let (app, _) = app();
	let request = Request::builder()
		.method(Method::POST)
		.uri("/pages")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from("{not json"))
		.unwrap();

	let response = app.oneshot(request).await.unwrap();
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
	let body: Value = serde_json::from_slice(&bytes).unwrap();
	assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn list_pages_reflects_open_pages() {
	let (app, fake) = app();

	let (_, body) = send(&app, Method::GET, "/pages", None).await;
	assert_eq!(body, json!({ "pages": [] }));

	send(&app, Method::POST, "/pages", Some(json!({ "name": "docs" }))).await;
	let (_, closed) = send(&app, Method::POST, "/pages", Some(json!({ "name": "checkout" }))).await;
	send(&app, Method::POST, "/pages", Some(json!({ "name": "admin" }))).await;
	fake.close_externally(closed["targetId"].as_str().unwrap()).await;

	let (status, body) = send(&app, Method::GET, "/pages", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "pages": ["admin", "docs"] }));
}

#[tokio::test]
async fn delete_page_closes_target() {
	let (app, fake) = app();
	send(&app, Method::POST, "/pages", Some(json!({ "name": "main" }))).await;

	let (status, body) = send(&app, Method::DELETE, "/pages/main", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "success": true }));
	assert!(fake.open_ids().await.is_empty());

	let (status, body) = send(&app, Method::DELETE, "/pages/main", None).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body, json!({ "error": "page not found" }));
}

#[tokio::test]
async fn delete_decodes_percent_encoded_names() {
	let (app, _) = app();
	send(&app, Method::POST, "/pages", Some(json!({ "name": "my page" }))).await;

	let (status, _) = send(&app, Method::DELETE, "/pages/my%20page", None).await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn browser_failures_map_to_bad_gateway() {
	let (app, fake) = app();
	fake.fail_next("connection refused").await;

	let (status, body) = send(&app, Method::POST, "/pages", Some(json!({ "name": "main" }))).await;
	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert!(body["error"].as_str().unwrap().contains("connection refused"));
}
