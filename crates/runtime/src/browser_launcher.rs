//! Browser process launch and supervision.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use dev_browser_protocol::CdpVersionInfo;
use tokio::process::{Child, Command};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cdp_probe::CdpProbe;
use crate::error::{Result, RuntimeError};

const PROBE_INTERVAL: Duration = Duration::from_millis(200);
const PROBE_ATTEMPTS: usize = 50;

/// Everything needed to spawn one browser instance.
#[derive(Debug, Clone, Copy)]
pub struct LaunchConfig<'a> {
	pub executable: &'a Path,
	pub cdp_port: u16,
	pub user_data_dir: &'a Path,
	pub headless: bool,
}

impl LaunchConfig<'_> {
	/// Command-line flags passed to the browser.
	pub fn args(&self) -> Vec<String> {
		let mut args = vec![
			format!("--remote-debugging-port={}", self.cdp_port),
			format!("--user-data-dir={}", self.user_data_dir.display()),
			"--no-first-run".to_string(),
			"--no-default-browser-check".to_string(),
		];
		if self.headless {
			args.push("--headless=new".to_string());
		}
		args.push("about:blank".to_string());
		args
	}
}

/// A running browser owned by a supervisor task.
///
/// The supervisor kills the child when [`BrowserProcess::close`] is called or
/// when this value is dropped, and logs if the browser exits on its own.
#[derive(Debug)]
pub struct BrowserProcess {
	pid: Option<u32>,
	info: CdpVersionInfo,
	stop_tx: oneshot::Sender<()>,
	supervisor: JoinHandle<()>,
}

impl BrowserProcess {
	/// Takes ownership of a spawned browser whose debugging endpoint already
	/// answered, handing the child to a new supervisor task.
	pub fn adopt(child: Child, info: CdpVersionInfo) -> Self {
		let pid = child.id();
		let (stop_tx, stop_rx) = oneshot::channel();
		let supervisor = tokio::spawn(supervise(child, stop_rx));
		Self {
			pid,
			info,
			stop_tx,
			supervisor,
		}
	}

	pub fn pid(&self) -> Option<u32> {
		self.pid
	}

	/// Browser-level WebSocket debug endpoint.
	pub fn ws_endpoint(&self) -> &str {
		&self.info.web_socket_debugger_url
	}

	/// Returns `true` once the supervised process has exited or been killed.
	pub fn has_exited(&self) -> bool {
		self.supervisor.is_finished()
	}

	/// Terminates the browser and waits for the supervisor to reap it.
	pub async fn close(self) {
		let Self { stop_tx, supervisor, .. } = self;
		let _ = stop_tx.send(());
		if let Err(e) = supervisor.await {
			warn!(target = "dev_browser.runtime", error = %e, "browser supervisor task failed");
		}
	}
}

/// Spawns the browser and waits until its debugging endpoint answers.
pub async fn launch_browser(config: &LaunchConfig<'_>) -> Result<BrowserProcess> {
	let probe = CdpProbe::new(config.cdp_port)?;
	let mut cmd = Command::new(config.executable);
	cmd.args(config.args())
		.stdin(Stdio::null())
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.kill_on_drop(true);

	let mut child = cmd.spawn().map_err(|source| RuntimeError::Spawn {
		path: config.executable.to_path_buf(),
		source,
	})?;
	let pid = child.id();
	debug!(target = "dev_browser.runtime", ?pid, port = config.cdp_port, "browser spawned");

	let info = match wait_for_endpoint(&mut child, &probe).await {
		Ok(info) => info,
		Err(err) => {
			let _ = child.kill().await;
			return Err(err);
		}
	};
	info!(
		target = "dev_browser.runtime",
		?pid,
		endpoint = %info.web_socket_debugger_url,
		browser = info.browser.as_deref().unwrap_or("unknown"),
		"browser ready"
	);

	Ok(BrowserProcess::adopt(child, info))
}

async fn wait_for_endpoint(child: &mut Child, probe: &CdpProbe) -> Result<CdpVersionInfo> {
	let mut last_error = "endpoint not reachable".to_string();
	for _ in 0..PROBE_ATTEMPTS {
		tokio::time::sleep(PROBE_INTERVAL).await;

		if let Some(status) = child.try_wait()? {
			return Err(RuntimeError::BrowserExited { status });
		}

		match probe.version().await {
			Ok(info) => return Ok(info),
			Err(e) => last_error = e.to_string(),
		}
	}

	Err(RuntimeError::EndpointUnavailable {
		port: probe.port(),
		last_error,
	})
}

async fn supervise(mut child: Child, stop_rx: oneshot::Receiver<()>) {
	tokio::select! {
		status = child.wait() => match status {
			Ok(status) => warn!(target = "dev_browser.runtime", %status, "browser exited"),
			Err(e) => warn!(target = "dev_browser.runtime", error = %e, "failed to wait on browser"),
		},
		// A dropped sender counts as a stop request.
		_ = stop_rx => {
			if let Err(e) = child.kill().await {
				warn!(target = "dev_browser.runtime", error = %e, "failed to kill browser");
			} else {
				debug!(target = "dev_browser.runtime", "browser terminated");
			}
		}
	}
}
