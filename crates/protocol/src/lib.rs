//! Wire types for the dev-browser server.
//!
//! This crate contains the serde-serializable types exchanged over the two
//! HTTP surfaces the server touches: the control API it exposes to clients, and
//! the Chrome DevTools Protocol discovery endpoints (`/json/*`) it consumes from
//! the launched browser.
//!
//! Types in this crate are pure data with no behavior beyond
//! serialization/deserialization. Higher-level APIs live in `dev-browser`.

pub mod api;
pub mod cdp;

pub use api::*;
pub use cdp::*;
