//! Launcher for the dev-browser server.
//!
//! The `start-server` binary is a thin wrapper over [`launcher::run`], kept in a
//! library so its output and lifetime can be tested without a browser.

pub mod launcher;
pub mod logging;
