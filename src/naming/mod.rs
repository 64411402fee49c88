//! Identifier naming subsystem.
//!
//! # Data Flow
//! ```text
//! action / controller identifier (e.g. "GetUserInfo")
//!     → case.rs (camel-case → separator-case)
//!     → URL segment (e.g. "get-user-info")
//! ```
//!
//! # Design Decisions
//! - ASCII-only case detection; other characters pass through untouched
//! - Acronym runs split per letter unless `AcronymStyle::Grouped` is selected

pub mod case;

pub use case::{to_camel_case, to_separator_case, to_separator_case_with, AcronymStyle};
