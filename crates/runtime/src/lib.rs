//! Browser process lifecycle for dev-browser.
//!
//! This crate owns everything that touches the launched browser directly:
//! executable discovery, spawning with remote debugging enabled, readiness
//! probing of the CDP HTTP endpoint, target management over `/json/*`, and
//! profile/port helpers used before launch.

pub mod browser_finder;
pub mod browser_launcher;
pub mod cdp_probe;
pub mod cdp_targets;
pub mod error;
pub mod process;
pub mod profile;

pub use browser_finder::resolve_executable;
pub use browser_launcher::{BrowserProcess, LaunchConfig, launch_browser};
pub use cdp_probe::CdpProbe;
pub use cdp_targets::CdpClient;
pub use error::{Result, RuntimeError};
