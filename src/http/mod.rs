//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, tower-http layers: request id, trace, timeout, body limit)
//!     → router.rs (path → verb map → endpoint, 404 / 405)
//!     → dispatch (app middleware → group middleware → controller action)
//!     → Send to client
//! ```

pub mod router;
pub mod server;

pub use server::HttpServer;
