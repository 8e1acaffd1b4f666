//! Item relay library.
//!
//! Forwards `/api/client/*` GET requests to an upstream item server and
//! relays the decoded item back to the caller.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use client::{ClientService, Item};
pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
