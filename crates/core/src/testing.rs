//! In-memory target backend for exercising the registry and control API
//! without a browser.
//!
//! # Example
//!
//! ```ignore
//! let fake = Arc::new(FakeTargets::new());
//! let registry = PageRegistry::new(fake.clone());
//! registry.get_or_create("main").await?;
//! fake.close_externally("page-1").await;
//! ```

use async_trait::async_trait;
use dev_browser_protocol::CdpTarget;
use dev_browser_runtime::{Result, RuntimeError};
use tokio::sync::Mutex;

use crate::pages::TargetBackend;

#[derive(Default)]
struct FakeState {
	created: usize,
	open: Vec<CdpTarget>,
	fail_next: Option<String>,
}

impl FakeState {
	fn take_failure(&mut self) -> Result<()> {
		match self.fail_next.take() {
			Some(message) => Err(RuntimeError::Cdp(message)),
			None => Ok(()),
		}
	}
}

/// Fake browser holding a list of open page targets with ids `page-1`, `page-2`, ...
#[derive(Default)]
pub struct FakeTargets {
	state: Mutex<FakeState>,
}

impl FakeTargets {
	pub fn new() -> Self {
		Self::default()
	}

	/// Simulates the user closing a tab in the browser window.
	pub async fn close_externally(&self, id: &str) {
		self.state.lock().await.open.retain(|t| t.id != id);
	}

	/// Makes the next backend call fail with a CDP error.
	pub async fn fail_next(&self, message: &str) {
		self.state.lock().await.fail_next = Some(message.to_string());
	}

	/// Ids of targets currently open.
	pub async fn open_ids(&self) -> Vec<String> {
		self.state.lock().await.open.iter().map(|t| t.id.clone()).collect()
	}

	/// Number of targets created since construction.
	pub async fn created_count(&self) -> usize {
		self.state.lock().await.created
	}
}

#[async_trait]
impl TargetBackend for FakeTargets {
	async fn list_pages(&self) -> Result<Vec<CdpTarget>> {
		let mut state = self.state.lock().await;
		state.take_failure()?;
		Ok(state.open.clone())
	}

	async fn new_page(&self) -> Result<CdpTarget> {
		let mut state = self.state.lock().await;
		state.take_failure()?;
		state.created += 1;
		let id = format!("page-{}", state.created);
		let target = CdpTarget {
			web_socket_debugger_url: Some(format!("ws://127.0.0.1:9223/devtools/page/{id}")),
			id,
			kind: "page".to_string(),
			title: "about:blank".to_string(),
			url: "about:blank".to_string(),
		};
		state.open.push(target.clone());
		Ok(target)
	}

	async fn close_page(&self, id: &str) -> Result<bool> {
		let mut state = self.state.lock().await;
		state.take_failure()?;
		let before = state.open.len();
		state.open.retain(|t| t.id != id);
		Ok(state.open.len() != before)
	}
}
