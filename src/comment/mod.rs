//! Declarative (comment) routing.
//!
//! # Data Flow
//! ```text
//! Debug run mode:
//!     controller sources (*.rs)
//!     → parser.rs (syn: inherent impls → method doc attrs)
//!     → annotation.rs (`@router <path> [verbs]`)
//!     → CommentRouteIndex → manifest (TOML) rewritten
//!
//! Test / release run mode:
//!     manifest (TOML) → CommentRouteIndex
//! ```
//!
//! # Design Decisions
//! - Built once before any binding is registered, read-only afterwards
//! - Keys are `"<lastModuleSegment>/<TypeName>"`, matched against controller
//!   identities by suffix on a `/` boundary
//! - A compiled binary cannot read doc comments, so the manifest travels with it

pub mod annotation;
pub mod index;
pub mod parser;

pub use annotation::{parse_router_line, AnnotationError};
pub use index::{CommentRouteIndex, ManifestError};
pub use parser::{parse_dir, parse_file, parse_source, ParseError};
