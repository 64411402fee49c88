//! Application assembly and startup.
//!
//! # Data Flow
//! ```text
//! App::new(AppConfig)
//!     → use_middleware(m)       (every request, even 404 / 405)
//!     → add_router_groups(groups)
//!     → build():
//!         comment mode + debug   → parse controller sources → rewrite manifest
//!         comment mode otherwise → load manifest
//!         every group            → finalize into a scratch RouteTable
//!         app middleware         → handed to the table, outside group middleware
//!     → serve(listener, shutdown)
//! ```
//!
//! # Design Decisions
//! - No process-wide state: the app owns config, groups and the table
//! - Startup is all-or-nothing: any group error discards every binding
//! - A missing manifest outside debug mode only warns; nothing is routed

use std::fmt;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::comment::{parse_dir, CommentRouteIndex, ParseError};
use crate::config::{AppConfig, RouterMode, RunMode};
use crate::dispatch::Middleware;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::routing::{RouteError, RouteTable, RouterGroup, RouterSettings};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to parse controller sources: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to register routes: {0}")]
    Route(#[from] RouteError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct App {
    config: AppConfig,
    groups: Vec<RouterGroup>,
    middleware: Vec<Middleware>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("groups", &self.groups)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            groups: Vec::new(),
            middleware: Vec::new(),
        }
    }

    /// Add middleware run for every request, including unmatched paths and
    /// verbs. It wraps group middleware; the first added runs outermost.
    pub fn use_middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn add_router_groups(mut self, groups: impl IntoIterator<Item = RouterGroup>) -> Self {
        self.groups.extend(groups);
        self
    }

    pub fn groups(&self) -> &[RouterGroup] {
        &self.groups
    }

    pub fn settings(&self) -> RouterSettings {
        RouterSettings::from_config(&self.config.app)
    }

    /// The comment route index for this run, `None` in auto mode.
    pub fn comment_index(&self) -> Result<Option<CommentRouteIndex>, ParseError> {
        let app = &self.config.app;
        if app.router_mode != RouterMode::Comment {
            return Ok(None);
        }

        let manifest = std::path::Path::new(&app.route_manifest);
        if app.run_mode == RunMode::Debug {
            let dir = app.controller_dir();
            let index = parse_dir(&dir)?;
            tracing::info!(
                dir = %dir.display(),
                controllers = index.len(),
                routes = index.declaration_count(),
                "Parsed @router declarations"
            );
            if let Err(e) = index.save(manifest) {
                tracing::warn!(manifest = %manifest.display(), error = %e, "Failed to write route manifest");
            }
            return Ok(Some(index));
        }

        match CommentRouteIndex::load(manifest) {
            Ok(index) => {
                tracing::info!(manifest = %manifest.display(), routes = index.declaration_count(), "Loaded route manifest");
                Ok(Some(index))
            }
            Err(e) => {
                tracing::warn!(
                    manifest = %manifest.display(),
                    error = %e,
                    "Failed to load route manifest, no comment routes registered"
                );
                Ok(Some(CommentRouteIndex::new()))
            }
        }
    }

    /// Finalize every group into one table.
    pub fn build(&self) -> Result<RouteTable, AppError> {
        let settings = self.settings();
        let index = self.comment_index()?;

        let mut table = RouteTable::new();
        for group in &self.groups {
            let added = group.finalize(&settings, index.as_ref(), &mut table)?;
            tracing::debug!(prefix = %group.get_prefix(), routes = added, "Finalized router group");
        }
        table.set_middleware(self.middleware.clone());

        tracing::info!(
            app = %self.config.app.name,
            mode = ?settings.mode,
            routes = table.len(),
            "Routes registered"
        );
        Ok(table)
    }

    pub fn into_server(self) -> Result<HttpServer, AppError> {
        let table = self.build()?;
        Ok(HttpServer::new(&self.config.server, table))
    }

    /// Build the routes and serve until shutdown.
    pub async fn serve(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), AppError> {
        self.into_server()?.run(listener, shutdown).await?;
        Ok(())
    }
}
