//! Controller subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Controller::descriptor()  → identity ("shop/controller/home/ExampleController")
//!     Controller::actions()     → ActionTable (name, ident, fn pointer, overrides)
//!     → routing deriver picks (verb, path) per action
//!
//! Per request:
//!     C::default() → init(Context) → action(&mut C) → finish() → Context → Response
//! ```
//!
//! # Design Decisions
//! - Explicit action registration replaces runtime method reflection
//! - One controller value per request; nothing is shared between requests
//! - Controllers embed `Base`, which owns the context and the request span

pub mod actions;
pub mod context;

use std::fmt;

pub use actions::{Action, ActionSpec, ActionTable, EXCLUDED_ACTIONS};
pub use context::{Context, REQUEST_ID};

/// Identity of a controller type: module path plus type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerDescriptor {
    package: String,
    type_name: String,
}

impl HandlerDescriptor {
    /// Descriptor of `T`, read from its `std::any::type_name`.
    ///
    /// Generic arguments are dropped. The module part matches
    /// `module_path!()` where `T` is defined.
    pub fn of<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let base = full.split('<').next().unwrap_or(full);
        match base.rsplit_once("::") {
            Some((module, name)) => Self::new(module, name),
            None => Self::new("", base),
        }
    }

    /// `module_path` uses Rust syntax (`shop::controller::home`); it is stored
    /// with `/` separators so it can be matched against manifest keys.
    pub fn new(module_path: &str, type_name: &str) -> Self {
        Self {
            package: module_path.replace("::", "/"),
            type_name: type_name.to_string(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn package_segments(&self) -> impl Iterator<Item = &str> {
        self.package.split('/').filter(|s| !s.is_empty())
    }

    /// Fully-qualified identity, e.g. `shop/controller/home/ExampleController`.
    pub fn identity(&self) -> String {
        if self.package.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}/{}", self.package, self.type_name)
        }
    }
}

impl fmt::Display for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}

/// Descriptor for a controller type defined in the calling module, for
/// controllers that override [`Controller::descriptor`].
#[macro_export]
macro_rules! descriptor {
    ($ty:ident) => {
        $crate::controller::HandlerDescriptor::new(module_path!(), stringify!($ty))
    };
}

/// Request state every controller embeds.
pub struct Base {
    ctx: Context,
    span: tracing::Span,
}

impl Default for Base {
    fn default() -> Self {
        Self {
            ctx: Context::default(),
            span: tracing::Span::none(),
        }
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Base").field("ctx", &self.ctx).finish_non_exhaustive()
    }
}

impl Base {
    /// Bind the request context and open a span keyed by its request id.
    pub fn init(&mut self, ctx: Context) {
        self.span = tracing::info_span!("action", request_id = %ctx.request_id());
        self.ctx = ctx;
    }

    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn request_id(&self) -> &str {
        self.ctx.request_id()
    }

    pub fn take_context(&mut self) -> Context {
        std::mem::take(&mut self.ctx)
    }
}

/// A type whose registered actions become request handlers.
///
/// ```ignore
/// #[derive(Default)]
/// pub struct ExampleController {
///     base: Base,
/// }
///
/// impl Controller for ExampleController {
///     fn actions() -> ActionTable<Self> {
///         autoroute::actions![Self; HelloWorld => hello_world]
///     }
///
///     fn base(&mut self) -> &mut Base {
///         &mut self.base
///     }
/// }
/// ```
pub trait Controller: Default + Send + 'static {
    /// Identity used for derived paths and manifest lookup. Defaults to the
    /// type's own module path and name.
    fn descriptor() -> HandlerDescriptor {
        HandlerDescriptor::of::<Self>()
    }

    fn actions() -> ActionTable<Self>;

    fn base(&mut self) -> &mut Base;

    /// Context-initialization entry point, called before every action.
    fn init(&mut self, ctx: Context) {
        self.base().init(ctx);
    }

    /// Hand the context (and the response written into it) back to the dispatcher.
    fn finish(&mut self) -> Context {
        self.base().take_context()
    }
}
