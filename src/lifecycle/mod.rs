//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (bin/autoroute):
//!     Load config → init logging → App::into_server (routes) → bind listener → run
//!
//! Shutdown (shutdown.rs):
//!     Trigger or signal received → stop accepting → drain in-flight requests → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then listener
//! - Route derivation errors are fatal before the listener is bound
//! - In-flight requests finish; no forced abort

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
