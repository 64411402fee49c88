//! Convention-based route derivation.
//!
//! ```text
//! shop::controller::home::ExampleController + "UpdateInfo_PUT", sep '-'
//!     package  → "home"          (module path after the controller root)
//!     type     → "example"       (minus "Controller", case-converted)
//!     action   → "update-info"   (verb suffix stripped, case-converted)
//!     verbs    → [PUT]           (suffix; GET + POST when absent)
//!     path     → /home/example/update-info
//! ```
//!
//! Derivation cannot fail: an unknown controller root only moves the route to
//! the root package segment.

use crate::config::RouteSeparator;
use crate::controller::{ActionTable, HandlerDescriptor};
use crate::naming::{to_separator_case_with, AcronymStyle};
use crate::routing::{path, RouteDeclaration, RouterSettings, Verb};

const CONTROLLER_SUFFIX: &str = "Controller";

#[derive(Debug, Clone)]
pub struct ConventionDeriver<'a> {
    separator: RouteSeparator,
    controller_root: &'a str,
    acronyms: AcronymStyle,
}

impl<'a> ConventionDeriver<'a> {
    pub fn new(separator: RouteSeparator, controller_root: &'a str, acronyms: AcronymStyle) -> Self {
        Self {
            separator,
            controller_root,
            acronyms,
        }
    }

    pub fn from_settings(settings: &'a RouterSettings) -> Self {
        Self::new(settings.separator, &settings.controller_root, settings.acronyms)
    }

    /// One declaration per routable action, in registration order.
    pub fn derive<C>(&self, descriptor: &HandlerDescriptor, actions: &ActionTable<C>) -> Vec<RouteDeclaration> {
        let package = package_segment(descriptor, self.controller_root);
        let controller = self.convert(
            descriptor
                .type_name()
                .strip_suffix(CONTROLLER_SUFFIX)
                .unwrap_or(descriptor.type_name()),
        );

        let mut routes = Vec::new();
        for spec in actions.iter() {
            if spec.is_excluded() {
                tracing::debug!(controller = %descriptor, action = %spec.name, "Skipping excluded action");
                continue;
            }

            let (stem, suffix_verb) = split_verb_suffix(&spec.name);
            let verbs = match (&spec.verbs, suffix_verb) {
                (Some(explicit), _) if !explicit.is_empty() => explicit.clone(),
                (_, Some(verb)) => vec![verb],
                _ => Verb::DEFAULT.to_vec(),
            };

            let route_path = match &spec.path {
                Some(explicit) => path::normalize(explicit),
                None => path::join(&[package.as_str(), controller.as_str(), self.convert(stem).as_str()]),
            };

            routes.push(RouteDeclaration::new(spec.name.clone(), route_path, verbs));
        }
        routes
    }

    fn convert(&self, ident: &str) -> String {
        match self.separator.as_char() {
            Some(sep) => to_separator_case_with(ident, sep, self.acronyms),
            None => ident.to_string(),
        }
    }
}

/// Split `UpdateInfo_PUT` into `("UpdateInfo", Some(PUT))`.
///
/// Only the segment after the last `_` is considered, and only when there is
/// more than one segment.
pub fn split_verb_suffix(name: &str) -> (&str, Option<Verb>) {
    match name.rsplit_once('_') {
        Some((stem, last)) => match last.parse::<Verb>() {
            Ok(verb) => (stem, Some(verb)),
            Err(_) => (name, None),
        },
        None => (name, None),
    }
}

/// Module path below the controller root, or `/` when the root is absent.
pub fn package_segment(descriptor: &HandlerDescriptor, controller_root: &str) -> String {
    let mut segments = descriptor.package_segments();
    if controller_root.is_empty() || !segments.any(|s| s == controller_root) {
        return "/".to_string();
    }

    let rest: Vec<&str> = segments.collect();
    if rest.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", rest.join("/"))
    }
}
