//! Configuration accepted by [`serve`](crate::serve).

use std::path::PathBuf;

use crate::error::{DevBrowserError, Result};

/// Default control API port.
pub const DEFAULT_PORT: u16 = 9222;
/// Default browser remote debugging port.
pub const DEFAULT_CDP_PORT: u16 = 9223;

/// Options for one server instance.
///
/// Fields are public for inspection; the chained setters are the intended way
/// to build a value:
///
/// ```ignore
/// let options = ServeOptions::default().port(9333).headless(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
	/// Control API listen port.
	pub port: u16,
	/// Run the browser without a visible window.
	pub headless: bool,
	/// Browser remote debugging port.
	pub cdp_port: u16,
	/// Profile root. User data lives in `<profile_dir>/browser-data`, or in
	/// `./.browser-data` when unset.
	pub profile_dir: Option<PathBuf>,
	/// Browser binary to launch instead of discovering one.
	pub executable_path: Option<PathBuf>,
}

impl Default for ServeOptions {
	fn default() -> Self {
		Self {
			port: DEFAULT_PORT,
			headless: false,
			cdp_port: DEFAULT_CDP_PORT,
			profile_dir: None,
			executable_path: None,
		}
	}
}

impl ServeOptions {
	pub fn port(mut self, port: u16) -> Self {
		self.port = port;
		self
	}

	pub fn headless(mut self, headless: bool) -> Self {
		self.headless = headless;
		self
	}

	pub fn cdp_port(mut self, cdp_port: u16) -> Self {
		self.cdp_port = cdp_port;
		self
	}

	pub fn profile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.profile_dir = Some(dir.into());
		self
	}

	pub fn executable_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.executable_path = Some(path.into());
		self
	}

	/// Rejects option combinations that cannot produce a working server.
	pub fn validate(&self) -> Result<()> {
		if self.port == 0 {
			return Err(DevBrowserError::InvalidOptions("port must be between 1 and 65535".into()));
		}
		if self.cdp_port == 0 {
			return Err(DevBrowserError::InvalidOptions("cdp_port must be between 1 and 65535".into()));
		}
		if self.port == self.cdp_port {
			return Err(DevBrowserError::InvalidOptions(format!(
				"port and cdp_port must differ (both are {})",
				self.port
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_documented_ports() {
		let options = ServeOptions::default();
		assert_eq!(options.port, 9222);
		assert_eq!(options.cdp_port, 9223);
		assert!(!options.headless);
		assert!(options.validate().is_ok());
	}

	#[test]
	fn setters_chain() {
		let options = ServeOptions::default()
			.port(9400)
			.cdp_port(9401)
			.headless(true)
			.profile_dir("/tmp/profile")
			.executable_path("/usr/bin/chromium");

		assert_eq!(options.port, 9400);
		assert_eq!(options.cdp_port, 9401);
		assert!(options.headless);
		assert_eq!(options.profile_dir, Some(PathBuf::from("/tmp/profile")));
		assert_eq!(options.executable_path, Some(PathBuf::from("/usr/bin/chromium")));
	}

	#[test]
	fn rejects_shared_port() {
		let err = ServeOptions::default().cdp_port(DEFAULT_PORT).validate().unwrap_err();
		assert!(matches!(&err, DevBrowserError::InvalidOptions(msg) if msg.contains("9222")), "unexpected error: {err}");
	}

	#[test]
	fn rejects_zero_ports() {
		assert!(ServeOptions::default().port(0).validate().is_err());
		assert!(ServeOptions::default().cdp_port(0).validate().is_err());
	}
}
