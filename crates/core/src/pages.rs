//! Named page registry backed by browser targets.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use dev_browser_protocol::CdpTarget;
use dev_browser_runtime::{CdpClient, Result};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Longest accepted page name, in characters.
pub const MAX_PAGE_NAME_LEN: usize = 256;

/// Source of page targets. Implemented by [`CdpClient`] for real browsers and by
/// [`FakeTargets`](crate::testing::FakeTargets) in tests.
#[async_trait]
pub trait TargetBackend: Send + Sync {
	/// Page targets currently open.
	async fn list_pages(&self) -> Result<Vec<CdpTarget>>;

	/// Opens a new blank page.
	async fn new_page(&self) -> Result<CdpTarget>;

	/// Closes a target; `false` when it was already gone.
	async fn close_page(&self, id: &str) -> Result<bool>;
}

#[async_trait]
impl TargetBackend for CdpClient {
	async fn list_pages(&self) -> Result<Vec<CdpTarget>> {
		CdpClient::list_pages(self).await
	}

	async fn new_page(&self) -> Result<CdpTarget> {
		CdpClient::new_page(self).await
	}

	async fn close_page(&self, id: &str) -> Result<bool> {
		CdpClient::close_page(self, id).await
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageNameError {
	#[error("name is required")]
	Missing,
	#[error("name must be at most 256 characters")]
	TooLong,
}

/// Checks a client-supplied page name.
pub fn validate_page_name(name: Option<&str>) -> std::result::Result<&str, PageNameError> {
	match name {
		None | Some("") => Err(PageNameError::Missing),
		Some(name) if name.chars().count() > MAX_PAGE_NAME_LEN => Err(PageNameError::TooLong),
		Some(name) => Ok(name),
	}
}

/// Result of [`PageRegistry::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
	pub target_id: String,
	pub created: bool,
}

/// Maps page names to target ids.
///
/// Every operation holds the registry lock across its backend calls, so two
/// concurrent requests for one name never create two targets.
pub struct PageRegistry {
	backend: Arc<dyn TargetBackend>,
	pages: Mutex<BTreeMap<String, String>>,
}

impl PageRegistry {
	pub fn new(backend: Arc<dyn TargetBackend>) -> Self {
		Self {
			backend,
			pages: Mutex::new(BTreeMap::new()),
		}
	}

	/// Returns the live target registered under `name`, opening a new page when
	/// the name is unknown or its target was closed outside the API.
	pub async fn get_or_create(&self, name: &str) -> Result<PageEntry> {
		let mut pages = self.pages.lock().await;

		if let Some(target_id) = pages.get(name).cloned() {
			let live = self.backend.list_pages().await?;
			if live.iter().any(|t| t.id == target_id) {
				return Ok(PageEntry { target_id, created: false });
			}
			debug!(target = "dev_browser.pages", page = name, %target_id, "registered target disappeared; replacing");
			pages.remove(name);
		}

		let target = self.backend.new_page().await?;
		info!(target = "dev_browser.pages", page = name, target_id = %target.id, "page created");
		pages.insert(name.to_string(), target.id.clone());
		Ok(PageEntry {
			target_id: target.id,
			created: true,
		})
	}

	/// Names of pages whose targets are still open, sorted.
	pub async fn names(&self) -> Result<Vec<String>> {
		let mut pages = self.pages.lock().await;
		if pages.is_empty() {
			return Ok(Vec::new());
		}

		let live = self.backend.list_pages().await?;
		pages.retain(|name, target_id| {
			let alive = live.iter().any(|t| t.id == *target_id);
			if !alive {
				debug!(target = "dev_browser.pages", page = %name, %target_id, "pruning closed page");
			}
			alive
		});
		Ok(pages.keys().cloned().collect())
	}

	/// Closes and forgets the page registered under `name`.
	///
	/// Returns `false` when no such page is registered.
	pub async fn close(&self, name: &str) -> Result<bool> {
		let mut pages = self.pages.lock().await;
		let Some(target_id) = pages.get(name).cloned() else {
			return Ok(false);
		};

		self.backend.close_page(&target_id).await?;
		pages.remove(name);
		info!(target = "dev_browser.pages", page = name, %target_id, "page closed");
		Ok(true)
	}
}
