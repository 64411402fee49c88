//! Convention and annotation driven HTTP routing for controller types.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌────────────────────────── startup ──────────────────────────┐
//!                   │                                                              │
//!   AppConfig ─────▶│  App ──▶ RouterGroup[] ──▶ convention (auto mode)            │
//!                   │                        └─▶ comment index (comment mode)      │
//!                   │                              ▲                               │
//!                   │          controller sources ─┘ (debug) / manifest (other)    │
//!                   │                                                              │
//!                   │  ──▶ RouteTable (collision-checked, immutable)               │
//!                   └──────────────────────────────┬───────────────────────────────┘
//!                                                  ▼
//!   Client Request ──▶ http server (tower-http layers) ──▶ path → verb ──▶
//!       app + group middleware ──▶ fresh controller: init(ctx) → action → response
//! ```

// Core subsystems
pub mod app;
pub mod comment;
pub mod controller;
pub mod dispatch;
pub mod naming;
pub mod routing;

// Transport
pub mod http;
pub mod middleware;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use app::{App, AppError};
pub use config::AppConfig;
pub use controller::{Base, Context, Controller, HandlerDescriptor};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteTable, RouterGroup};
