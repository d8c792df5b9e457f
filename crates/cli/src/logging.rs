use tracing_subscriber::{EnvFilter, fmt};

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
///
/// Stdout is reserved for the startup banner.
pub fn init_logging() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}
