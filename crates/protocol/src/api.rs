//! Request and response bodies of the HTTP control API.

use serde::{Deserialize, Serialize};

/// `GET /` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
	pub ws_endpoint: String,
}

/// `POST /pages` request.
///
/// `name` is optional on the wire so a missing field surfaces as a validation
/// error with a JSON body rather than a deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPageRequest {
	#[serde(default)]
	pub name: Option<String>,
}

/// `POST /pages` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
	/// Browser-level debug endpoint the client should connect to.
	pub ws_endpoint: String,
	pub name: String,
	/// CDP target id of the named page.
	pub target_id: String,
}

/// `GET /pages` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageList {
	pub pages: Vec<String>,
}

/// `DELETE /pages/{name}` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosePageResponse {
	pub success: bool,
}

/// Body returned with every non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	pub error: String,
}
