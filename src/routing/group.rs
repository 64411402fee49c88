//! Router groups: a prefix, its controllers and the middleware around them.

use std::fmt;

use crate::comment::CommentRouteIndex;
use crate::config::RouterMode;
use crate::controller::{Controller, HandlerDescriptor};
use crate::dispatch::{self, Middleware};
use crate::routing::{path, Binding, ConventionDeriver, RouteError, RouteTable, RouterSettings};

type BindFn = fn(&RouterSettings, Option<&CommentRouteIndex>) -> Result<Vec<Binding>, RouteError>;

/// A registered controller type, erased to its descriptor and a binder.
#[derive(Clone)]
pub struct ControllerEntry {
    descriptor: HandlerDescriptor,
    bind: BindFn,
}

impl ControllerEntry {
    pub fn of<C: Controller>() -> Self {
        Self {
            descriptor: C::descriptor(),
            bind: bindings_for::<C>,
        }
    }

    pub fn descriptor(&self) -> &HandlerDescriptor {
        &self.descriptor
    }

    /// Bindings relative to the group prefix.
    pub fn bindings(
        &self,
        settings: &RouterSettings,
        index: Option<&CommentRouteIndex>,
    ) -> Result<Vec<Binding>, RouteError> {
        (self.bind)(settings, index)
    }
}

impl fmt::Debug for ControllerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ControllerEntry").field(&self.descriptor.identity()).finish()
    }
}

fn bindings_for<C: Controller>(
    settings: &RouterSettings,
    index: Option<&CommentRouteIndex>,
) -> Result<Vec<Binding>, RouteError> {
    let descriptor = C::descriptor();
    let identity = descriptor.identity();
    let actions = C::actions();

    let declarations = match (settings.mode, index) {
        (RouterMode::Comment, Some(index)) => index.lookup(&identity).map(<[_]>::to_vec).unwrap_or_default(),
        (RouterMode::Comment, None) => Vec::new(),
        (RouterMode::Auto, _) => ConventionDeriver::from_settings(settings).derive(&descriptor, &actions),
    };

    let mut bindings = Vec::new();
    for declaration in declarations {
        let spec = actions
            .find(&declaration.method)
            .ok_or_else(|| RouteError::UnknownAction {
                controller: identity.clone(),
                action: declaration.method.clone(),
            })?;
        if spec.is_excluded() {
            tracing::debug!(controller = %identity, action = %spec.name, "Skipping excluded action");
            continue;
        }

        let endpoint = dispatch::endpoint::<C>(spec.action, format!("{}.{}", descriptor.type_name(), spec.name));
        for verb in declaration.effective_verbs() {
            bindings.push(Binding {
                verb,
                path: declaration.path.clone(),
                action: spec.name.clone(),
                controller: identity.clone(),
                endpoint: endpoint.clone(),
            });
        }
    }
    Ok(bindings)
}

/// A set of controllers served under one prefix.
///
/// ```ignore
/// let api = RouterGroup::new()
///     .prefix("/api")
///     .use_middleware(middleware::request_logger())
///     .controller::<UserController>();
/// ```
#[derive(Clone)]
pub struct RouterGroup {
    prefix: String,
    controllers: Vec<ControllerEntry>,
    middleware: Vec<Middleware>,
}

impl RouterGroup {
    pub fn new() -> Self {
        Self {
            prefix: "/".to_string(),
            controllers: Vec::new(),
            middleware: Vec::new(),
        }
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = path::normalize(prefix);
        self
    }

    /// Register a controller type; may be called repeatedly.
    pub fn controller<C: Controller>(mut self) -> Self {
        self.controllers.push(ControllerEntry::of::<C>());
        self
    }

    /// Add middleware; the first added runs outermost.
    pub fn use_middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn controllers(&self) -> &[ControllerEntry] {
        &self.controllers
    }

    /// Derive every binding of the group and insert it into `table`.
    ///
    /// Returns the number of bindings added. On error the table may hold part
    /// of this group; callers wanting atomicity finalize into a scratch table.
    pub fn finalize(
        &self,
        settings: &RouterSettings,
        index: Option<&CommentRouteIndex>,
        table: &mut RouteTable,
    ) -> Result<usize, RouteError> {
        let mut added = 0;
        for entry in &self.controllers {
            for mut binding in entry.bindings(settings, index)? {
                binding.path = path::join(&[self.prefix.as_str(), binding.path.as_str()]);
                if let Some(segment) = path::find_dynamic_segment(&binding.path) {
                    return Err(RouteError::InvalidPath {
                        path: binding.path.clone(),
                        segment: segment.to_string(),
                    });
                }

                binding.endpoint = dispatch::wrap(binding.endpoint, &self.middleware);
                tracing::debug!(
                    verb = %binding.verb,
                    path = %binding.path,
                    handler = %binding.handler(),
                    "Registered route"
                );
                table.insert(binding)?;
                added += 1;
            }
        }
        Ok(added)
    }
}

impl Default for RouterGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterGroup")
            .field("prefix", &self.prefix)
            .field("controllers", &self.controllers)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
