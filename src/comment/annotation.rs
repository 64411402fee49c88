//! `@router` annotation lines.
//!
//! ```text
//! /// @router /user/login [get,post]
//! /// @router /health
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::routing::{path, Verb};

pub const ANNOTATION_TAG: &str = "@router";

static ROUTER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@router\s+(\S+)(?:\s+\[([^\]]*)\])?\s*$").expect("valid @router pattern"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("malformed annotation {0:?}, expected `@router <path> [verb,...]`")]
    Malformed(String),

    #[error("unknown verb {verb:?} in annotation {line:?}")]
    UnknownVerb { verb: String, line: String },
}

/// Parse one documentation line.
///
/// Returns `None` when the line is not an annotation at all, so callers can
/// feed every doc line through it.
pub fn parse_router_line(line: &str) -> Option<Result<(String, Vec<Verb>), AnnotationError>> {
    let line = line.trim();
    let rest = line.strip_prefix(ANNOTATION_TAG)?;
    // `@routers` and friends are not ours
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let Some(captures) = ROUTER_LINE.captures(line) else {
        return Some(Err(AnnotationError::Malformed(line.to_string())));
    };

    let route_path = path::normalize(&captures[1]);
    let mut verbs = Vec::new();
    if let Some(list) = captures.get(2) {
        for raw in list.as_str().split(',').map(str::trim).filter(|v| !v.is_empty()) {
            match raw.parse::<Verb>() {
                Ok(verb) => verbs.push(verb),
                Err(_) => {
                    return Some(Err(AnnotationError::UnknownVerb {
                        verb: raw.to_string(),
                        line: line.to_string(),
                    }))
                }
            }
        }
    }

    Some(Ok((route_path, verbs)))
}
