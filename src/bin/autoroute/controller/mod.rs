pub mod admin;

use autoroute::controller::{ActionTable, Base, Controller};
use axum::http::StatusCode;
use serde::Deserialize;

#[derive(Default)]
pub struct ExampleController {
    base: Base,
}

#[derive(Deserialize)]
struct InfoUpdate {
    name: String,
}

impl ExampleController {
    /// Greets whoever is named in `?name=`.
    ///
    /// @router /hello-world [get,post]
    pub fn hello_world(&mut self) {
        let name = self.base.ctx().query("name").unwrap_or_else(|| "world".to_string());
        tracing::info!(name = %name, "Saying hello");
        self.base.ctx_mut().text(StatusCode::OK, format!("hello, {name}"));
    }

    /// @router /update-info [put]
    pub fn update_info(&mut self) {
        let ctx = self.base.ctx_mut();
        match ctx.json::<InfoUpdate>() {
            Ok(update) => {
                let body = serde_json::json!({ "updated": update.name });
                ctx.json_response(StatusCode::OK, &body);
            }
            Err(e) => ctx.text(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}

impl Controller for ExampleController {
    fn actions() -> ActionTable<Self> {
        autoroute::actions![Self;
            HelloWorld => hello_world,
            UpdateInfo_PUT => update_info,
        ]
    }

    fn base(&mut self) -> &mut Base {
        &mut self.base
    }
}
