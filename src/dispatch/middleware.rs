//! Group middleware chain.
//!
//! Middleware run in registration order on the way in and in reverse order on
//! the way out. Each one receives the context and a [`Next`]; calling
//! `next.run(ctx)` proceeds, returning a response without calling it
//! short-circuits the chain.

use std::future::Future;
use std::sync::Arc;

use axum::response::Response;
use futures_util::future::{BoxFuture, FutureExt};

use crate::controller::Context;
use crate::dispatch::Endpoint;

pub type Middleware = Arc<dyn Fn(Context, Next) -> BoxFuture<'static, Response> + Send + Sync>;

/// Build a [`Middleware`] from an async function or closure.
///
/// ```
/// use autoroute::dispatch::{from_fn, Next};
/// use autoroute::controller::Context;
///
/// let tag = from_fn(|mut ctx: Context, next: Next| async move {
///     ctx.set("tagged", true);
///     next.run(ctx).await
/// });
/// ```
pub fn from_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(Context, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |ctx, next| f(ctx, next).boxed())
}

/// The remainder of the chain after the current middleware.
#[derive(Clone)]
pub struct Next {
    layers: Arc<[Middleware]>,
    index: usize,
    endpoint: Endpoint,
}

impl Next {
    /// Continue to the next middleware, or to the action when none are left.
    pub fn run(self, ctx: Context) -> BoxFuture<'static, Response> {
        match self.layers.get(self.index).cloned() {
            Some(layer) => {
                let next = Next {
                    index: self.index + 1,
                    ..self
                };
                layer(ctx, next)
            }
            None => (self.endpoint)(ctx),
        }
    }
}

/// Wrap `endpoint` so every call passes through `layers` first.
pub fn wrap(endpoint: Endpoint, layers: &[Middleware]) -> Endpoint {
    if layers.is_empty() {
        return endpoint;
    }

    let layers: Arc<[Middleware]> = layers.into();
    Arc::new(move |ctx| {
        Next {
            layers: Arc::clone(&layers),
            index: 0,
            endpoint: Arc::clone(&endpoint),
        }
        .run(ctx)
    })
}
