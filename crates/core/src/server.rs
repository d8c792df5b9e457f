//! Server startup and lifetime.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use dev_browser_runtime::{BrowserProcess, CdpClient, LaunchConfig, launch_browser, process, profile, resolve_executable};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::{self, ApiState};
use crate::error::{DevBrowserError, Result};
use crate::options::ServeOptions;
use crate::pages::{PageRegistry, TargetBackend};

/// Loopback address the control API binds to.
const API_HOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Endpoint addresses of a started server.
pub trait BrowserServer {
	/// Port the control API is bound to.
	fn port(&self) -> u16;

	/// Browser-level WebSocket debug endpoint.
	fn ws_endpoint(&self) -> &str;
}

/// A running control API plus the browser it drives.
///
/// Dropping the handle stops the API and kills the browser; [`ServerHandle::stop`]
/// does the same while waiting for both to finish.
pub struct ServerHandle {
	port: u16,
	ws_endpoint: String,
	shutdown_tx: oneshot::Sender<()>,
	server: JoinHandle<std::io::Result<()>>,
	browser: BrowserProcess,
}

impl ServerHandle {
	/// OS process id of the launched browser.
	pub fn browser_pid(&self) -> Option<u32> {
		self.browser.pid()
	}

	/// Returns `false` once the browser has exited, for whatever reason.
	pub fn is_browser_running(&self) -> bool {
		!self.browser.has_exited()
	}

	/// Gracefully stops the control API, then terminates the browser.
	pub async fn stop(self) -> Result<()> {
		let Self {
			shutdown_tx,
			server,
			browser,
			port,
			..
		} = self;

		let browser_pid = browser.pid();
		let _ = shutdown_tx.send(());
		let served = server.await.map_err(std::io::Error::other);
		browser.close().await;
		info!(target = "dev_browser.server", port, ?browser_pid, "server stopped");

		served??;
		Ok(())
	}
}

impl BrowserServer for ServerHandle {
	fn port(&self) -> u16 {
		self.port
	}

	fn ws_endpoint(&self) -> &str {
		&self.ws_endpoint
	}
}

/// Launches the browser and starts the control API.
///
/// The API port is bound before the browser is spawned so a port conflict
/// never leaves a stray browser behind.
pub async fn serve(options: ServeOptions) -> Result<ServerHandle> {
	options.validate()?;

	let listener = bind_api(options.port).await?;
	if let Some(port) = process::first_unavailable(&[options.cdp_port]) {
		return Err(DevBrowserError::PortInUse { port });
	}

	let executable = resolve_executable(options.executable_path.as_deref())?;
	let user_data_dir = profile::resolve_user_data_dir(options.profile_dir.as_deref())?;
	info!(
		target = "dev_browser.server",
		executable = %executable.display(),
		user_data_dir = %user_data_dir.display(),
		headless = options.headless,
		"launching browser"
	);

	let browser = launch_browser(&LaunchConfig {
		executable: &executable,
		cdp_port: options.cdp_port,
		user_data_dir: &user_data_dir,
		headless: options.headless,
	})
	.await?;

	let cdp = match CdpClient::new(options.cdp_port) {
		Ok(cdp) => cdp,
		Err(err) => {
			browser.close().await;
			return Err(err.into());
		}
	};

	start_api(listener, browser, Arc::new(cdp))
}

/// Serves the control API on `listener` for an already running browser.
fn start_api(listener: TcpListener, browser: BrowserProcess, backend: Arc<dyn TargetBackend>) -> Result<ServerHandle> {
	let ws_endpoint = browser.ws_endpoint().to_string();
	let port = listener.local_addr()?.port();
	let app = api::router(ApiState::new(&ws_endpoint, Arc::new(PageRegistry::new(backend))));

	let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
	let server = tokio::spawn(async move {
		let result = axum::serve(listener, app)
			.with_graceful_shutdown(async {
				let _ = shutdown_rx.await;
			})
			.await;
		if let Err(e) = &result {
			error!(target = "dev_browser.server", error = %e, "control API failed");
		}
		result
	});

	info!(
		target = "dev_browser.server",
		port,
		endpoint = %ws_endpoint,
		browser_pid = ?browser.pid(),
		"dev browser server listening"
	);

	Ok(ServerHandle {
		port,
		ws_endpoint,
		shutdown_tx,
		server,
		browser,
	})
}

async fn bind_api(port: u16) -> Result<TcpListener> {
	let addr = SocketAddr::from((API_HOST, port));
	TcpListener::bind(addr).await.map_err(|source| match source.kind() {
		std::io::ErrorKind::AddrInUse => DevBrowserError::PortInUse { port },
		_ => DevBrowserError::Bind { addr, source },
	})
}
