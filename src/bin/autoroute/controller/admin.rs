use autoroute::controller::{ActionTable, Base, Controller};
use axum::http::StatusCode;
use futures_util::future::{BoxFuture, FutureExt};

#[derive(Default)]
pub struct UserController {
    base: Base,
}

impl UserController {
    /// @router /user/login [post]
    pub fn login(&mut self) -> BoxFuture<'_, ()> {
        async move {
            // stands in for a credential store lookup
            tokio::task::yield_now().await;
            let user = self.base.ctx().header("x-user").unwrap_or("anonymous").to_string();
            tracing::info!(user = %user, "User logged in");
            self.base.ctx_mut().set("user", user.clone());
            self.base.ctx_mut().text(StatusCode::OK, format!("welcome {user}"));
        }
        .boxed()
    }

    /// @router /user/logout [get,delete]
    pub fn logout(&mut self) {
        self.base.ctx_mut().respond(StatusCode::NO_CONTENT);
    }

    pub fn init(&mut self) {}
}

impl Controller for UserController {
    fn actions() -> ActionTable<Self> {
        autoroute::actions![Self;
            async Login_POST => login,
            Logout => logout,
            Init => init,
        ]
    }

    fn base(&mut self) -> &mut Base {
        &mut self.base
    }
}
