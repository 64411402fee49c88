//! Route declarations: an action name, a path and the verbs it answers.

use serde::{Deserialize, Serialize};

use crate::routing::Verb;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteDeclaration {
    /// Action name or Rust method identifier.
    pub method: String,
    /// Path relative to the router group prefix.
    pub path: String,
    /// Declared verbs; empty means GET and POST.
    #[serde(default)]
    pub verbs: Vec<Verb>,
}

impl RouteDeclaration {
    pub fn new(method: impl Into<String>, path: impl Into<String>, verbs: Vec<Verb>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            verbs,
        }
    }

    /// Declared verbs, or GET and POST when none were declared. Duplicates removed.
    pub fn effective_verbs(&self) -> Vec<Verb> {
        if self.verbs.is_empty() {
            return Verb::DEFAULT.to_vec();
        }

        let mut verbs = Vec::with_capacity(self.verbs.len());
        for verb in &self.verbs {
            if !verbs.contains(verb) {
                verbs.push(*verb);
            }
        }
        verbs
    }
}
