//! Comment route index and its TOML manifest.
//!
//! The manifest is the on-disk form of the index, one `[[route]]` table per
//! declaration:
//!
//! ```toml
//! [[route]]
//! key = "admin/UserController"
//! method = "login"
//! path = "/user/login"
//! verbs = ["GET", "POST"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::{RouteDeclaration, Verb};

const MANIFEST_HEADER: &str = "# Generated from `@router` doc comments. Edits are lost on the next debug start.\n\n";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to access manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode manifest: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Route declarations keyed by `"<lastModuleSegment>/<TypeName>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRouteIndex {
    routes: BTreeMap<String, Vec<RouteDeclaration>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Manifest {
    #[serde(rename = "route", default)]
    routes: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ManifestEntry {
    key: String,
    method: String,
    path: String,
    #[serde(default)]
    verbs: Vec<Verb>,
}

impl CommentRouteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration, keeping source order per key.
    pub fn push(&mut self, key: impl Into<String>, declaration: RouteDeclaration) {
        self.routes.entry(key.into()).or_default().push(declaration);
    }

    pub fn get(&self, key: &str) -> Option<&[RouteDeclaration]> {
        self.routes.get(key).map(Vec::as_slice)
    }

    /// Declarations for a controller identity such as
    /// `shop/controller/admin/UserController`.
    ///
    /// A key matches when it equals the identity or is a suffix of it that
    /// starts right after a `/`. The longest matching key wins.
    pub fn lookup(&self, identity: &str) -> Option<&[RouteDeclaration]> {
        if let Some(exact) = self.get(identity) {
            return Some(exact);
        }

        self.routes
            .iter()
            .filter(|(key, _)| {
                identity
                    .strip_suffix(key.as_str())
                    .is_some_and(|head| head.ends_with('/'))
            })
            .max_by_key(|(key, _)| key.len())
            .map(|(_, decls)| decls.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Number of controller keys.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of declarations across all keys.
    pub fn declaration_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn to_toml(&self) -> Result<String, ManifestError> {
        let manifest = Manifest {
            routes: self
                .routes
                .iter()
                .flat_map(|(key, decls)| {
                    decls.iter().map(move |d| ManifestEntry {
                        key: key.clone(),
                        method: d.method.clone(),
                        path: d.path.clone(),
                        verbs: d.verbs.clone(),
                    })
                })
                .collect(),
        };
        Ok(toml::to_string(&manifest)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(content)?;
        let mut index = Self::new();
        for entry in manifest.routes {
            index.push(entry.key, RouteDeclaration::new(entry.method, entry.path, entry.verbs));
        }
        Ok(index)
    }

    /// Write the manifest, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let io_err = |source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = format!("{MANIFEST_HEADER}{}", self.to_toml()?);
        fs::write(path, content).map_err(io_err)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }
}
