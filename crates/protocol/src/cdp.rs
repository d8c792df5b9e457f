//! Chrome DevTools Protocol HTTP discovery shapes.

use serde::{Deserialize, Serialize};

/// `/json/version` response subset from Chrome DevTools Protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdpVersionInfo {
	#[serde(rename = "webSocketDebuggerUrl")]
	pub web_socket_debugger_url: String,
	#[serde(rename = "Browser", default)]
	pub browser: Option<String>,
}

/// One entry of `/json/list`, also returned by `/json/new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdpTarget {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub url: String,
	/// Absent while another client is attached to the target.
	#[serde(default)]
	pub web_socket_debugger_url: Option<String>,
}

impl CdpTarget {
	/// Returns `true` for top-level page targets (tabs).
	pub fn is_page(&self) -> bool {
		self.kind == "page"
	}
}
