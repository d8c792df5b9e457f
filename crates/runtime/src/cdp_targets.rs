//! Page target management over the CDP HTTP endpoints.

use std::time::Duration;

use dev_browser_protocol::CdpTarget;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{Result, RuntimeError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for `/json/list`, `/json/new` and `/json/close` on one browser.
#[derive(Debug, Clone)]
pub struct CdpClient {
	base_url: String,
	http: reqwest::Client,
}

impl CdpClient {
	/// Creates a client for the debugging server on `127.0.0.1:port`.
	pub fn new(port: u16) -> Result<Self> {
		Self::with_base_url(format!("http://127.0.0.1:{}", port))
	}

	/// Creates a client for an arbitrary debugging server base URL.
	pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
		let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
		Ok(Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			http,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Lists page targets currently open in the browser.
	pub async fn list_pages(&self) -> Result<Vec<CdpTarget>> {
		let response = self.http.get(format!("{}/json/list", self.base_url)).send().await?;
		let targets: Vec<CdpTarget> = check_status(response, "list targets").await?.json().await?;
		Ok(targets.into_iter().filter(CdpTarget::is_page).collect())
	}

	/// Opens a new blank tab.
	pub async fn new_page(&self) -> Result<CdpTarget> {
		// Recent Chrome rejects GET on /json/new.
		let response = self.http.put(format!("{}/json/new?about:blank", self.base_url)).send().await?;
		let target: CdpTarget = check_status(response, "create target").await?.json().await?;
		debug!(target = "dev_browser.cdp", target_id = %target.id, "created page target");
		Ok(target)
	}

	/// Closes a target. Returns `false` when the browser no longer knows `id`.
	pub async fn close_page(&self, id: &str) -> Result<bool> {
		let response = self.http.get(format!("{}/json/close/{}", self.base_url, id)).send().await?;
		if response.status() == StatusCode::NOT_FOUND {
			debug!(target = "dev_browser.cdp", target_id = %id, "target already closed");
			return Ok(false);
		}
		check_status(response, "close target").await?;
		Ok(true)
	}
}

async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}

	let body = response.text().await.unwrap_or_default();
	Err(RuntimeError::Cdp(format!("Failed to {}: {} {}", action, status, body.trim())))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_drops_trailing_slash() {
		let client = CdpClient::with_base_url("http://127.0.0.1:9223/").unwrap();
		assert_eq!(client.base_url(), "http://127.0.0.1:9223");
	}

	#[test]
	fn new_targets_loopback_port() {
		let client = CdpClient::new(9333).unwrap();
		assert_eq!(client.base_url(), "http://127.0.0.1:9333");
	}
}
