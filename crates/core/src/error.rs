use std::net::SocketAddr;

use dev_browser_runtime::RuntimeError;
use thiserror::Error;

/// Errors returned by [`serve`](crate::serve) and [`ServerHandle`](crate::ServerHandle).
#[derive(Debug, Error)]
pub enum DevBrowserError {
	#[error("Invalid serve options: {0}")]
	InvalidOptions(String),

	#[error("Port {port} is already in use")]
	PortInUse { port: u16 },

	#[error("Failed to bind control API to {addr}")]
	Bind {
		addr: SocketAddr,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Runtime(#[from] RuntimeError),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DevBrowserError>;
