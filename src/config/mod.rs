//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, `-c config/app.toml`)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → passed by reference into App::build and HttpServer::new
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload while serving
//! - All fields have defaults to allow minimal configs
//! - An unreadable or invalid file is logged and replaced by defaults
//!   (`load_config_or_default`); `load_config` exposes the error for callers
//!   that want to abort instead

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, parse_config, ConfigError};
pub use schema::AppConfig;
pub use schema::AppSection;
pub use schema::{LogConfig, LogFormat, RouteSeparator, RouterMode, RunMode, ServerConfig};
