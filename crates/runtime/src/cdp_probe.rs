//! Readiness probing of the browser's debugging endpoint.

use std::time::Duration;

use dev_browser_protocol::CdpVersionInfo;
use reqwest::Client;

use crate::error::{Result, RuntimeError};

const PROBE_TIMEOUT: Duration = Duration::from_millis(400);

/// Browsers differ in which loopback name the debugging server answers on.
const LOOPBACK_HOSTS: [&str; 2] = ["127.0.0.1", "localhost"];

/// Polls `/json/version` on one debugging port.
///
/// One HTTP client is shared by every probe, so the startup loop does not
/// rebuild a connection pool per attempt.
#[derive(Debug, Clone)]
pub struct CdpProbe {
	http: Client,
	port: u16,
}

impl CdpProbe {
	pub fn new(port: u16) -> Result<Self> {
		let http = Client::builder().timeout(PROBE_TIMEOUT).build()?;
		Ok(Self { http, port })
	}

	pub fn port(&self) -> u16 {
		self.port
	}

	/// Version metadata from the first loopback host that answers.
	pub async fn version(&self) -> Result<CdpVersionInfo> {
		let mut failures = Vec::with_capacity(LOOPBACK_HOSTS.len());
		for host in LOOPBACK_HOSTS {
			match self.version_at(host).await {
				Ok(info) => return Ok(info),
				Err(e) => failures.push(format!("{host}: {e}")),
			}
		}

		Err(RuntimeError::Cdp(format!(
			"no debugging endpoint on port {} ({})",
			self.port,
			failures.join("; ")
		)))
	}

	async fn version_at(&self, host: &str) -> Result<CdpVersionInfo> {
		let url = format!("http://{host}:{}/json/version", self.port);
		let response = self.http.get(&url).send().await?.error_for_status()?;
		Ok(response.json().await?)
	}
}
