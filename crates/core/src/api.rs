//! HTTP control API.
//!
//! | Method | Path | Response |
//! | --- | --- | --- |
//! | `GET` | `/` | [`ServerInfo`] |
//! | `GET` | `/pages` | [`PageList`] |
//! | `POST` | `/pages` | [`PageInfo`] for `{"name": ...}`, reusing a live page of that name |
//! | `DELETE` | `/pages/{name}` | [`ClosePageResponse`], or 404 |
//!
//! Failures carry an [`ErrorBody`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use dev_browser_protocol::{ClosePageResponse, ErrorBody, GetPageRequest, PageInfo, PageList, ServerInfo};
use dev_browser_runtime::RuntimeError;
use tracing::warn;

use crate::pages::{PageRegistry, validate_page_name};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct ApiState {
	ws_endpoint: Arc<str>,
	pages: Arc<PageRegistry>,
}

impl ApiState {
	pub fn new(ws_endpoint: &str, pages: Arc<PageRegistry>) -> Self {
		Self {
			ws_endpoint: Arc::from(ws_endpoint),
			pages,
		}
	}
}

/// Builds the control API router.
pub fn router(state: ApiState) -> Router {
	Router::new()
		.route("/", get(server_info))
		.route("/pages", get(list_pages).post(get_page))
		.route("/pages/{name}", delete(close_page))
		.with_state(state)
}

#[derive(Debug)]
enum ApiError {
	BadRequest(String),
	NotFound(&'static str),
	Browser(RuntimeError),
}

impl From<RuntimeError> for ApiError {
	fn from(err: RuntimeError) -> Self {
		ApiError::Browser(err)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, error) = match self {
			ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
			ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
			ApiError::Browser(err) => {
				warn!(target = "dev_browser.api", error = %err, "browser request failed");
				(StatusCode::BAD_GATEWAY, err.to_string())
			}
		};
		(status, Json(ErrorBody { error })).into_response()
	}
}

async fn server_info(State(state): State<ApiState>) -> Json<ServerInfo> {
	Json(ServerInfo {
		ws_endpoint: state.ws_endpoint.to_string(),
	})
}

async fn list_pages(State(state): State<ApiState>) -> Result<Json<PageList>, ApiError> {
	let pages = state.pages.names().await?;
	Ok(Json(PageList { pages }))
}

async fn get_page(State(state): State<ApiState>, body: Result<Json<GetPageRequest>, JsonRejection>) -> Result<Json<PageInfo>, ApiError> {
	let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
	let name = validate_page_name(request.name.as_deref()).map_err(|e| ApiError::BadRequest(e.to_string()))?;

	let entry = state.pages.get_or_create(name).await?;
	Ok(Json(PageInfo {
		ws_endpoint: state.ws_endpoint.to_string(),
		name: name.to_string(),
		target_id: entry.target_id,
	}))
}

async fn close_page(State(state): State<ApiState>, Path(name): Path<String>) -> Result<Json<ClosePageResponse>, ApiError> {
	if state.pages.close(&name).await? {
		Ok(Json(ClosePageResponse { success: true }))
	} else {
		Err(ApiError::NotFound("page not found"))
	}
}
