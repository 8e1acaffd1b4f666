//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → per-request spans (http::request) tagged with the request ID
//!
//! logging.rs installs the subscriber that writes them to stdout.
//! ```

pub mod logging;
