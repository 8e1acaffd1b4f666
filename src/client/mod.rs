//! Upstream client subsystem.
//!
//! # Data Flow
//! ```text
//! http::handlers
//!     → service.rs (build URI, GET upstream, decode)
//!     → types.rs (Item, ClientError)
//!     → back to handler as Option<Item> or ClientError
//! ```

pub mod service;
pub mod types;

pub use service::ClientService;
pub use types::{ClientError, ClientResult, Item};
