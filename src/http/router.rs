//! Route table → axum `Router`.
//!
//! # Responsibilities
//! - Register every path exactly once
//! - Select the endpoint by verb inside the path handler
//! - Buffer the body and build the per-request `Context`
//! - Run app middleware for every request, including 404 and 405 answers
//!
//! # Design Decisions
//! - `any` plus a verb map instead of `MethodRouter`, so WebDAV verbs work
//! - Registered path, unregistered verb → 405 with `Allow`
//! - Unregistered path → 404
//! - 404 and 405 answers are endpoints too, so middleware wraps them the same way

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use futures_util::future::FutureExt;

use crate::controller::Context;
use crate::dispatch::{self, DispatchError, Endpoint, Middleware};
use crate::routing::{RouteTable, Verb};

/// Endpoints of one path, keyed by verb.
struct PathEndpoints {
    endpoints: HashMap<Verb, Endpoint>,
    not_allowed: Endpoint,
}

impl PathEndpoints {
    fn new(endpoints: HashMap<Verb, Endpoint>, middleware: &[Middleware]) -> Self {
        let mut verbs: Vec<Verb> = endpoints.keys().copied().collect();
        verbs.sort_unstable();
        let allow = verbs.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ");
        let allow = HeaderValue::from_str(&allow).unwrap_or_else(|_| HeaderValue::from_static(""));

        Self {
            endpoints: endpoints
                .into_iter()
                .map(|(verb, endpoint)| (verb, dispatch::wrap(endpoint, middleware)))
                .collect(),
            not_allowed: dispatch::wrap(method_not_allowed(allow), middleware),
        }
    }

    fn select(&self, request: &Request<Body>) -> Endpoint {
        Verb::from_method(request.method())
            .and_then(|verb| self.endpoints.get(&verb))
            .unwrap_or(&self.not_allowed)
            .clone()
    }
}

impl RouteTable {
    /// Convert the finalized table into an axum `Router`.
    pub fn into_router(self) -> Router {
        let middleware = self.middleware().to_vec();
        let mut router = Router::new();
        for (path, endpoints) in self.into_paths() {
            let path_endpoints = Arc::new(PathEndpoints::new(endpoints, &middleware));
            router = router.route(
                &path,
                any(move |request: Request<Body>| {
                    let endpoint = path_endpoints.select(&request);
                    dispatch_request(endpoint, request)
                }),
            );
        }

        let fallback = dispatch::wrap(Arc::new(|ctx: Context| not_found(ctx).boxed()), &middleware);
        router.fallback(move |request: Request<Body>| dispatch_request(Arc::clone(&fallback), request))
    }
}

async fn dispatch_request(endpoint: Endpoint, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    // The server's body limit layer bounds this.
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = DispatchError::Body(e.to_string());
            tracing::warn!(path = %parts.uri.path(), error = %err, "Rejected request body");
            return err.into_response();
        }
    };

    endpoint(Context::from_parts(parts, bytes)).await
}

fn method_not_allowed(allow: HeaderValue) -> Endpoint {
    Arc::new(move |ctx: Context| {
        let allow = allow.clone();
        async move {
            tracing::debug!(method = %ctx.method(), path = %ctx.path(), "Method not allowed");
            (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, allow)], "Method Not Allowed").into_response()
        }
        .boxed()
    })
}

async fn not_found(ctx: Context) -> Response {
    tracing::debug!(method = %ctx.method(), path = %ctx.path(), "No route matched");
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{from_fn, Next};
    use crate::routing::Binding;
    use axum::http::Method;
    use tower::ServiceExt;

    fn binding(verb: Verb, path: &str, body: &'static str) -> Binding {
        Binding {
            verb,
            path: path.to_string(),
            action: body.to_string(),
            controller: "test/Controller".to_string(),
            endpoint: Arc::new(move |ctx: Context| {
                async move { (StatusCode::OK, format!("{body}:{}", ctx.body().len())).into_response() }.boxed()
            }),
        }
    }

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table.insert(binding(Verb::Get, "/files", "list")).unwrap();
        table.insert(binding(Verb::Propfind, "/files", "props")).unwrap();
        table.insert(binding(Verb::Post, "/", "root")).unwrap();
        table
    }

    async fn call(router: Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Option<String>, String) {
        let request = Request::builder().method(method).uri(uri).body(Body::from(body)).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let allow = response
            .headers()
            .get(header::ALLOW)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, allow, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_dispatch_by_verb() {
        let router = table().into_router();
        assert_eq!(call(router.clone(), Method::GET, "/files", "").await.2, "list:0");

        let propfind = Method::from_bytes(b"PROPFIND").unwrap();
        assert_eq!(call(router.clone(), propfind, "/files", "").await.2, "props:0");

        assert_eq!(call(router, Method::POST, "/", "abc").await.2, "root:3");
    }

    #[tokio::test]
    async fn test_wrong_verb_is_405_with_allow() {
        let (status, allow, _) = call(table().into_router(), Method::DELETE, "/files", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(allow.as_deref(), Some("GET, PROPFIND"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (status, _, _) = call(table().into_router(), Method::GET, "/nope", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_app_middleware_sees_unmatched_requests() {
        let tag = from_fn(|ctx: Context, next: Next| async move {
            let path = ctx.path().to_string();
            let mut response = next.run(ctx).await;
            if let Ok(value) = HeaderValue::from_str(&path) {
                response.headers_mut().insert("x-seen", value);
            }
            response
        });
        let mut table = table();
        table.set_middleware(vec![tag]);
        let router = table.into_router();

        for (method, uri, status) in [
            (Method::GET, "/files", StatusCode::OK),
            (Method::DELETE, "/files", StatusCode::METHOD_NOT_ALLOWED),
            (Method::GET, "/nope", StatusCode::NOT_FOUND),
        ] {
            let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            let response = router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), status, "{uri}");
            assert_eq!(response.headers()["x-seen"], uri);
        }
    }
}
