//! dev-browser: a long-lived debuggable browser behind a small HTTP control API.
//!
//! [`serve`] launches a Chromium-family browser with remote debugging enabled
//! and starts an HTTP server through which clients obtain named pages. Clients
//! then attach to the browser over CDP using the returned WebSocket endpoint and
//! target id.
//!
//! ```ignore
//! use dev_browser::{BrowserServer, ServeOptions};
//!
//! let server = dev_browser::serve(ServeOptions::default().headless(true)).await?;
//! println!("{} {}", server.port(), server.ws_endpoint());
//! server.stop().await?;
//! ```

pub mod api;
pub mod error;
pub mod options;
pub mod pages;
pub mod server;
pub mod testing;

pub use dev_browser_protocol as protocol;
pub use error::{DevBrowserError, Result};
pub use options::{DEFAULT_CDP_PORT, DEFAULT_PORT, ServeOptions};
pub use pages::{PageRegistry, TargetBackend};
pub use server::{BrowserServer, ServerHandle, serve};
