//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! transport (per path, per verb)
//!     → middleware.rs (app, then group middleware; registration order in / reverse out)
//!     → endpoint.rs (C::default → init(ctx) → action → finish)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Endpoints capture the action function pointer at registration time
//! - A panicking action yields 500 for that request only
//! - No locking: each request owns its controller and context

pub mod endpoint;
pub mod error;
pub mod middleware;

pub use endpoint::{endpoint, Endpoint};
pub use error::DispatchError;
pub use middleware::{from_fn, wrap, Middleware, Next};
