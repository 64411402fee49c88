//! Finalized route table.
//!
//! # Responsibilities
//! - Hold every binding of every router group
//! - Reject a second binding for an already registered `(verb, path)`
//! - Expose the bindings, grouped by path, to the transport
//!
//! # Design Decisions
//! - Immutable once handed to the transport
//! - Collisions are startup errors, never silent overrides
//! - Insertion order is kept for logging and inspection
//! - App middleware is held apart from the bindings; the transport wraps it
//!   around every endpoint and around the 404 / 405 answers

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use thiserror::Error;

use crate::dispatch::{Endpoint, Middleware};
use crate::routing::Verb;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route {verb} {path} registered by {existing} conflicts with {incoming}")]
    Collision {
        verb: Verb,
        path: String,
        existing: String,
        incoming: String,
    },

    #[error("controller {controller} declares route for unknown action {action}")]
    UnknownAction { controller: String, action: String },

    #[error("route path {path} contains dynamic segment {segment}")]
    InvalidPath { path: String, segment: String },
}

/// One `(verb, path)` served by one controller action.
#[derive(Clone)]
pub struct Binding {
    pub verb: Verb,
    pub path: String,
    pub action: String,
    pub controller: String,
    pub endpoint: Endpoint,
}

impl Binding {
    /// `Controller.Action`, as used in logs and collision errors.
    pub fn handler(&self) -> String {
        format!("{}.{}", self.controller, self.action)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("action", &self.action)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

#[derive(Default, Clone)]
pub struct RouteTable {
    bindings: Vec<Binding>,
    index: HashMap<(Verb, String), usize>,
    middleware: Vec<Middleware>,
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("bindings", &self.bindings)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Middleware run for every request, matched or not, outside group middleware.
    pub fn set_middleware(&mut self, middleware: Vec<Middleware>) {
        self.middleware = middleware;
    }

    pub fn middleware(&self) -> &[Middleware] {
        &self.middleware
    }

    pub fn insert(&mut self, binding: Binding) -> Result<(), RouteError> {
        let key = (binding.verb, binding.path.clone());
        if let Some(&existing) = self.index.get(&key) {
            let incoming = binding.handler();
            return Err(RouteError::Collision {
                verb: binding.verb,
                path: binding.path,
                existing: self.bindings[existing].handler(),
                incoming,
            });
        }

        self.index.insert(key, self.bindings.len());
        self.bindings.push(binding);
        Ok(())
    }

    pub fn get(&self, verb: Verb, path: &str) -> Option<&Binding> {
        self.index
            .get(&(verb, path.to_string()))
            .map(|&i| &self.bindings[i])
    }

    pub fn contains(&self, verb: Verb, path: &str) -> bool {
        self.get(verb, path).is_some()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Distinct paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.bindings.iter().map(|b| b.path.as_str()).collect();
        paths.sort_unstable();
        paths.dedup();
        paths
    }

    /// Move every binding of `other` into this table, failing on the first collision.
    pub fn merge(&mut self, other: RouteTable) -> Result<(), RouteError> {
        for binding in other.bindings {
            self.insert(binding)?;
        }
        Ok(())
    }

    /// Bindings grouped per path, each with its verb map.
    pub fn into_paths(self) -> BTreeMap<String, HashMap<Verb, Endpoint>> {
        let mut paths: BTreeMap<String, HashMap<Verb, Endpoint>> = BTreeMap::new();
        for binding in self.bindings {
            paths
                .entry(binding.path)
                .or_default()
                .insert(binding.verb, binding.endpoint);
        }
        paths
    }

    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }
}
