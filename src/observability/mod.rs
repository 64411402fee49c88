//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (request_id, path, verb, handler)
//!     → per-action spans keyed by request id (controller::Base)
//!
//! Consumers:
//!     → logging.rs subscriber (pretty for development, JSON for production)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows from the header through middleware into the action span
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::{build_filter, init_logging};
