use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors raised while locating, launching or talking to the browser.
#[derive(Debug, Error)]
pub enum RuntimeError {
	#[error("Could not find a Chrome/Chromium executable. Install Chrome or pass an explicit executable path.")]
	BrowserNotFound,

	#[error("Browser executable does not exist: {}", .0.display())]
	ExecutableMissing(PathBuf),

	#[error("Failed to launch browser at {}", path.display())]
	Spawn {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(
		"Browser exited before debugging endpoint became available (status: {status}). \
		 Another browser may already be using the same profile directory."
	)]
	BrowserExited { status: ExitStatus },

	#[error("Browser launched but debugging endpoint not available on port {port}. Last error: {last_error}")]
	EndpointUnavailable { port: u16, last_error: String },

	#[error("CDP request failed: {0}")]
	Cdp(String),

	#[error(transparent)]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
