//! Built-in middleware.
//!
//! Add them with `use_middleware` on the [`App`](crate::App), to cover every
//! request, or on a [`RouterGroup`](crate::routing::RouterGroup). `request_id`
//! should come first so later middleware and the action see the id.

use std::time::Instant;

use uuid::Uuid;

use crate::controller::{Context, REQUEST_ID};
use crate::dispatch::{from_fn, Middleware, Next};

/// Header read (and set by the server's request-id layer) for correlation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Store the request id in the context under [`REQUEST_ID`].
///
/// Uses the `x-request-id` header when present, a fresh UUID otherwise.
pub fn request_id() -> Middleware {
    from_fn(|mut ctx: Context, next: Next| async move {
        let id = ctx
            .header(REQUEST_ID_HEADER)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        ctx.set(REQUEST_ID, id);
        next.run(ctx).await
    })
}

/// Log one event before and one after the rest of the chain.
pub fn request_logger() -> Middleware {
    from_fn(|ctx: Context, next: Next| async move {
        let request_id = ctx.request_id().to_string();
        let method = ctx.method().clone();
        let path = ctx.path().to_string();
        let host = ctx.header("host").unwrap_or_default().to_string();

        tracing::debug!(request_id = %request_id, method = %method, path = %path, host = %host, "before-handle");
        let start = Instant::now();
        let response = next.run(ctx).await;
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "after-handle"
        );
        response
    })
}
