//! Supported HTTP verbs.
//!
//! The standard methods plus the WebDAV extension methods. `http::Method`
//! accepts arbitrary tokens, so this enum is what bounds the set an action
//! suffix like `_PUT` may select.

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
    Connect,
    Mkcol,
    Copy,
    Move,
    Propfind,
    Proppatch,
    Lock,
    Unlock,
}

impl Verb {
    pub const ALL: [Verb; 16] = [
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Delete,
        Verb::Patch,
        Verb::Options,
        Verb::Head,
        Verb::Trace,
        Verb::Connect,
        Verb::Mkcol,
        Verb::Copy,
        Verb::Move,
        Verb::Propfind,
        Verb::Proppatch,
        Verb::Lock,
        Verb::Unlock,
    ];

    /// Verbs registered when an action does not name one.
    pub const DEFAULT: [Verb; 2] = [Verb::Get, Verb::Post];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Patch => "PATCH",
            Verb::Options => "OPTIONS",
            Verb::Head => "HEAD",
            Verb::Trace => "TRACE",
            Verb::Connect => "CONNECT",
            Verb::Mkcol => "MKCOL",
            Verb::Copy => "COPY",
            Verb::Move => "MOVE",
            Verb::Propfind => "PROPFIND",
            Verb::Proppatch => "PROPPATCH",
            Verb::Lock => "LOCK",
            Verb::Unlock => "UNLOCK",
        }
    }

    /// Convert into the transport's method type.
    pub fn to_method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
            Verb::Patch => Method::PATCH,
            Verb::Options => Method::OPTIONS,
            Verb::Head => Method::HEAD,
            Verb::Trace => Method::TRACE,
            Verb::Connect => Method::CONNECT,
            // extension methods are valid tokens, so this cannot fail
            other => Method::from_bytes(other.as_str().as_bytes()).unwrap_or(Method::GET),
        }
    }

    /// Look up the verb for an incoming request method.
    pub fn from_method(method: &Method) -> Option<Verb> {
        method.as_str().parse().ok()
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no supported verb.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP verb: {0}")]
pub struct UnknownVerb(pub String);

impl FromStr for Verb {
    type Err = UnknownVerb;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Verb::ALL
            .into_iter()
            .find(|v| v.as_str() == upper)
            .ok_or_else(|| UnknownVerb(s.to_string()))
    }
}
