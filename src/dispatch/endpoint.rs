//! Dispatch wrapper: one fresh controller per request.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};
use tracing::Instrument;

use crate::controller::{Action, Context, Controller};
use crate::dispatch::DispatchError;

/// The closure registered with the transport for one binding.
pub type Endpoint = Arc<dyn Fn(Context) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wrap an action of `C` into an [`Endpoint`].
///
/// The action is resolved before this is called, so nothing is looked up per
/// request.
pub fn endpoint<C: Controller>(action: Action<C>, name: impl Into<Arc<str>>) -> Endpoint {
    let name: Arc<str> = name.into();
    Arc::new(move |ctx: Context| {
        let name = Arc::clone(&name);
        async move {
            let request_id = ctx.request_id().to_string();
            match invoke::<C>(action, &name, ctx).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(request_id = %request_id, action = %name, error = %e, "Dispatch failed");
                    e.into_response()
                }
            }
        }
        .boxed()
    })
}

async fn invoke<C: Controller>(action: Action<C>, name: &str, ctx: Context) -> Result<Response, DispatchError> {
    let run = async move {
        let mut controller = C::default();
        controller.init(ctx);
        let span = controller.base().span().clone();
        action.invoke(&mut controller).instrument(span).await;
        controller.finish().into_response()
    };

    AssertUnwindSafe(run)
        .catch_unwind()
        .await
        .map_err(|panic| DispatchError::Panicked {
            action: name.to_string(),
            message: panic_message(panic.as_ref()),
        })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
