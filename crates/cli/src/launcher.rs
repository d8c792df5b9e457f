//! Starts the server with a fixed configuration and keeps the process alive.

use std::convert::Infallible;
use std::future::{Future, pending};
use std::io::Write;

use anyhow::Context;
use dev_browser::{BrowserServer, ServeOptions};
use tracing::info;

/// Control API port used by the launcher.
pub const LAUNCH_PORT: u16 = 9222;

/// The launcher's configuration. Not influenced by arguments or environment.
pub fn launch_options() -> ServeOptions {
	ServeOptions::default().port(LAUNCH_PORT).headless(false)
}

/// Writes the startup banner for a running server and flushes `out`.
pub fn write_banner(out: &mut impl Write, server: &impl BrowserServer) -> std::io::Result<()> {
	writeln!(out, "Dev browser server started")?;
	writeln!(out, "  HTTP API: http://localhost:{}", server.port())?;
	writeln!(out, "  WebSocket: {}", server.ws_endpoint())?;
	writeln!(out, "\nPress Ctrl+C to stop")?;
	out.flush()
}

/// Calls `serve` once with [`launch_options`], prints the banner to `out` and
/// then never completes.
///
/// A failing `serve` is returned as-is with context; nothing is written and no
/// retry is attempted.
pub async fn run<F, Fut, S, W>(serve: F, mut out: W) -> anyhow::Result<Infallible>
where
	F: FnOnce(ServeOptions) -> Fut,
	Fut: Future<Output = dev_browser::Result<S>>,
	S: BrowserServer,
	W: Write,
{
	let server = serve(launch_options()).await.context("failed to start dev browser server")?;
	write_banner(&mut out, &server)?;
	info!(target = "dev_browser.launcher", port = server.port(), "running until terminated");

	// `server` is dropped only if this future is.
	pending().await
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Endpoints;

	impl BrowserServer for Endpoints {
		fn port(&self) -> u16 {
			9333
		}

		fn ws_endpoint(&self) -> &str {
			"ws://127.0.0.1:9223/devtools/browser/xyz"
		}
	}

	#[test]
	fn banner_uses_handle_values() {
		let mut out = Vec::new();
		write_banner(&mut out, &Endpoints).unwrap();
		let text = String::from_utf8(out).unwrap();

		assert!(text.contains("  HTTP API: http://localhost:9333\n"));
		assert!(text.contains("  WebSocket: ws://127.0.0.1:9223/devtools/browser/xyz\n"));
		assert!(text.ends_with("\n\nPress Ctrl+C to stop\n"));
	}

	#[test]
	fn launch_options_are_fixed() {
		let options = launch_options();
		assert_eq!(options.port, 9222);
		assert!(!options.headless);
		assert_eq!(
			options,
			ServeOptions {
				port: 9222,
				headless: false,
				..ServeOptions::default()
			}
		);
	}
}
