//! Action registration.
//!
//! Rust has no runtime method reflection, so each controller lists its actions
//! explicitly. An entry pairs the exported action name used for convention
//! routing (`HelloWorld`, `UpdateInfo_PUT`) with the Rust identifier of the
//! method (`hello_world`), which is what the comment parser sees in source.

use futures_util::future::BoxFuture;

use crate::routing::Verb;

/// Action names that never become routes.
pub const EXCLUDED_ACTIONS: &[&str] = &["Init", "init"];

/// A controller method, captured as a plain function pointer.
pub enum Action<C> {
    Sync(fn(&mut C)),
    Async(for<'a> fn(&'a mut C) -> BoxFuture<'a, ()>),
}

impl<C> Clone for Action<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Action<C> {}

impl<C> std::fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Sync(_) => f.write_str("Action::Sync"),
            Action::Async(_) => f.write_str("Action::Async"),
        }
    }
}

impl<C> Action<C> {
    pub async fn invoke(self, controller: &mut C) {
        match self {
            Action::Sync(f) => f(controller),
            Action::Async(f) => f(controller).await,
        }
    }
}

/// One registered action and its optional explicit routing.
#[derive(Debug)]
pub struct ActionSpec<C> {
    pub name: String,
    pub ident: String,
    pub action: Action<C>,
    /// Explicit verbs; replaces the suffix/default inference.
    pub verbs: Option<Vec<Verb>>,
    /// Explicit path relative to the group prefix.
    pub path: Option<String>,
}

impl<C> Clone for ActionSpec<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            ident: self.ident.clone(),
            action: self.action,
            verbs: self.verbs.clone(),
            path: self.path.clone(),
        }
    }
}

impl<C> ActionSpec<C> {
    pub fn is_excluded(&self) -> bool {
        EXCLUDED_ACTIONS.contains(&self.name.as_str()) || EXCLUDED_ACTIONS.contains(&self.ident.as_str())
    }
}

/// Ordered list of a controller's actions.
#[derive(Debug)]
pub struct ActionTable<C> {
    entries: Vec<ActionSpec<C>>,
}

impl<C> Default for ActionTable<C> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<C> ActionTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synchronous action whose Rust identifier is the same as `name`.
    pub fn action(self, name: &str, f: fn(&mut C)) -> Self {
        self.bind(name, name, Action::Sync(f))
    }

    /// Register an async action whose Rust identifier is the same as `name`.
    pub fn async_action(self, name: &str, f: for<'a> fn(&'a mut C) -> BoxFuture<'a, ()>) -> Self {
        self.bind(name, name, Action::Async(f))
    }

    /// Register an action under an exported name and a Rust identifier.
    pub fn bind(mut self, name: &str, ident: &str, action: Action<C>) -> Self {
        self.entries.push(ActionSpec {
            name: name.to_string(),
            ident: ident.to_string(),
            action,
            verbs: None,
            path: None,
        });
        self
    }

    /// Restrict the last registered action to explicit verbs.
    pub fn verbs(mut self, verbs: impl IntoIterator<Item = Verb>) -> Self {
        if let Some(last) = self.entries.last_mut() {
            last.verbs = Some(verbs.into_iter().collect());
        }
        self
    }

    /// Give the last registered action an explicit path.
    pub fn path(mut self, path: &str) -> Self {
        if let Some(last) = self.entries.last_mut() {
            last.path = Some(path.to_string());
        }
        self
    }

    /// Find an action by exported name or Rust identifier.
    pub fn find(&self, name: &str) -> Option<&ActionSpec<C>> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .or_else(|| self.entries.iter().find(|e| e.ident == name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionSpec<C>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build an [`ActionTable`] from `ExportedName => method` pairs.
///
/// ```ignore
/// actions![Self;
///     HelloWorld => hello_world,
///     UpdateInfo_PUT => update_info,
///     async Load => load,
/// ]
/// ```
#[macro_export]
macro_rules! actions {
    (@acc $ty:ty; $table:expr; ) => { $table };
    (@acc $ty:ty; $table:expr; async $name:ident => $method:ident $(, $($rest:tt)*)?) => {
        $crate::actions!(@acc $ty;
            $table.bind(
                stringify!($name),
                stringify!($method),
                $crate::controller::Action::Async(<$ty>::$method),
            );
            $($($rest)*)?)
    };
    (@acc $ty:ty; $table:expr; $name:ident => $method:ident $(, $($rest:tt)*)?) => {
        $crate::actions!(@acc $ty;
            $table.bind(
                stringify!($name),
                stringify!($method),
                $crate::controller::Action::Sync(<$ty>::$method),
            );
            $($($rest)*)?)
    };
    ($ty:ty; $($rest:tt)*) => {
        $crate::actions!(@acc $ty; $crate::controller::ActionTable::<$ty>::new(); $($rest)*)
    };
}
