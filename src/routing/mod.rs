//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (once, before serving):
//!     RouterGroup[] (prefix, controllers, middleware)
//!     → convention.rs (auto mode: names → verb + path)
//!       or CommentRouteIndex lookup (comment mode)
//!     → group.rs (prefix join, middleware wrap)
//!     → table.rs (collision check)
//!     → RouteTable, frozen and handed to the transport
//! ```
//!
//! # Design Decisions
//! - Bindings resolved at startup, immutable at runtime
//! - Fixed path segments only (no parameters, no wildcards)
//! - A `(verb, path)` collision fails startup instead of overriding
//! - Deterministic: the same controllers always yield the same table

pub mod convention;
pub mod declaration;
pub mod group;
pub mod path;
pub mod table;
pub mod verb;

pub use convention::ConventionDeriver;
pub use declaration::RouteDeclaration;
pub use group::{ControllerEntry, RouterGroup};
pub use table::{Binding, RouteError, RouteTable};
pub use verb::{UnknownVerb, Verb};

use crate::config::{AppSection, RouteSeparator, RouterMode};
use crate::naming::AcronymStyle;

/// The routing-relevant part of the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    pub mode: RouterMode,
    pub separator: RouteSeparator,
    /// Module name under which controllers live (e.g. `controller`).
    pub controller_root: String,
    pub acronyms: AcronymStyle,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self::from_config(&AppSection::default())
    }
}

impl RouterSettings {
    pub fn from_config(app: &AppSection) -> Self {
        Self {
            mode: app.router_mode,
            separator: app.router_sep,
            controller_root: app.controller_root().to_string(),
            acronyms: app.acronyms,
        }
    }
}
