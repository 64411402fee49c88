//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the engine.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::naming::AcronymStyle;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Application and routing settings.
    pub app: AppSection,

    /// HTTP server settings.
    pub server: ServerConfig,

    /// Logging settings.
    pub log: LogConfig,
}

/// Process run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Comment routes are regenerated from source on every start.
    #[default]
    Debug,
    Test,
    Release,
}

/// How controller actions are turned into routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterMode {
    /// Paths and verbs derived from controller and action names.
    #[default]
    Auto,
    /// Paths and verbs declared with `@router` doc comments.
    Comment,
}

/// Separator used when converting identifiers into path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum RouteSeparator {
    /// Identifiers are used verbatim: `/v1/HomeTest/HelloWorld`.
    #[default]
    None,
    /// `/v1/home-test/hello-world`
    Dash,
    /// `/v1/home_test/hello_world`
    Underscore,
}

impl RouteSeparator {
    pub fn as_char(self) -> Option<char> {
        match self {
            RouteSeparator::None => None,
            RouteSeparator::Dash => Some('-'),
            RouteSeparator::Underscore => Some('_'),
        }
    }
}

impl TryFrom<String> for RouteSeparator {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "" => Ok(RouteSeparator::None),
            "-" => Ok(RouteSeparator::Dash),
            "_" => Ok(RouteSeparator::Underscore),
            other => Err(format!("router_sep must be \"\", \"-\" or \"_\", got {other:?}")),
        }
    }
}

impl From<RouteSeparator> for String {
    fn from(sep: RouteSeparator) -> Self {
        sep.as_char().map(String::from).unwrap_or_default()
    }
}

impl fmt::Display for RouteSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from(*self))
    }
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSection {
    /// Application name, used in log output.
    pub name: String,

    pub run_mode: RunMode,

    pub router_mode: RouterMode,

    /// Only used in auto mode.
    pub router_sep: RouteSeparator,

    /// Directory holding the crate sources (e.g. "src").
    pub source_root: String,

    /// Controller module path below `source_root`. Its last component is the
    /// module name stripped from controller module paths in auto mode.
    pub controller_path: String,

    /// Route manifest written in debug mode and read otherwise (comment mode).
    pub route_manifest: String,

    /// How uppercase runs in identifiers are split.
    pub acronyms: AcronymStyle,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "autoroute".to_string(),
            run_mode: RunMode::default(),
            router_mode: RouterMode::default(),
            router_sep: RouteSeparator::default(),
            source_root: "src".to_string(),
            controller_path: "controller".to_string(),
            route_manifest: "config/routes.toml".to_string(),
            acronyms: AcronymStyle::default(),
        }
    }
}

impl AppSection {
    /// Directory scanned for `@router` declarations.
    pub fn controller_dir(&self) -> PathBuf {
        PathBuf::from(&self.source_root).join(&self.controller_path)
    }

    /// Module name marking the controller root, e.g. "controller".
    pub fn controller_root(&self) -> &str {
        self.controller_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. "info" or "autoroute=debug". `RUST_LOG` wins.
    pub level: String,

    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.app.router_mode, RouterMode::Auto);
        assert_eq!(config.app.run_mode, RunMode::Debug);
        assert_eq!(config.app.router_sep, RouteSeparator::None);
        assert_eq!(config.app.controller_path, "controller");
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_full_app_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            run_mode = "release"
            router_mode = "comment"
            router_sep = "-"
            controller_path = "web/controller"
            acronyms = "grouped"

            [log]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.app.run_mode, RunMode::Release);
        assert_eq!(config.app.router_mode, RouterMode::Comment);
        assert_eq!(config.app.router_sep, RouteSeparator::Dash);
        assert_eq!(config.app.acronyms, AcronymStyle::Grouped);
        assert_eq!(config.app.controller_root(), "controller");
        assert_eq!(config.app.controller_dir(), PathBuf::from("src/web/controller"));
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_bad_separator_rejected() {
        let err = toml::from_str::<AppConfig>("[app]\nrouter_sep = \"/\"").unwrap_err();
        assert!(err.to_string().contains("router_sep"));
    }

    #[test]
    fn test_separator_serializes_back() {
        let mut config = AppConfig::default();
        config.app.router_sep = RouteSeparator::Underscore;
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("router_sep = \"_\""));
    }
}
