//! Shared controllers and helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::response::Response;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use autoroute::{App, AppError, Shutdown};

pub mod controller {
    use autoroute::controller::{ActionTable, Base, Controller, HandlerDescriptor};
    use axum::http::StatusCode;

    #[derive(Default)]
    pub struct ExampleController {
        base: Base,
    }

    impl ExampleController {
        /// @router /hello [get]
        pub fn hello_world(&mut self) {
            self.base.ctx_mut().text(StatusCode::OK, "hello world");
        }

        /// @router /info [put,patch]
        pub fn update_info(&mut self) {
            let body = String::from_utf8_lossy(self.base.ctx().body()).into_owned();
            self.base.ctx_mut().text(StatusCode::OK, format!("updated {body}"));
        }

        /// Replies with the request id the middleware stored.
        pub fn request_id(&mut self) {
            let id = self.base.request_id().to_string();
            self.base.ctx_mut().text(StatusCode::OK, id);
        }

        pub fn boom(&mut self) {
            panic!("action failed");
        }

        /// Writes nothing: the response is an empty 200.
        pub fn silent(&mut self) {}

        pub fn init(&mut self) {}
    }

    impl Controller for ExampleController {
        fn actions() -> ActionTable<Self> {
            autoroute::actions![Self;
                HelloWorld => hello_world,
                UpdateInfo_PUT => update_info,
                RequestId_GET => request_id,
                Boom_GET => boom,
                Silent => silent,
                Init => init,
            ]
        }

        fn base(&mut self) -> &mut Base {
            &mut self.base
        }
    }

    pub mod home {
        use super::*;
        use autoroute::routing::Verb;

        #[derive(Default)]
        pub struct HomeController {
            base: Base,
        }

        impl HomeController {
            /// @router / [get]
            pub fn index(&mut self) {
                self.base.ctx_mut().text(StatusCode::OK, "home");
            }

            /// Echoes the `user` value set by middleware.
            ///
            /// @router /whoami [get]
            pub fn who_am_i(&mut self) {
                let user = self.base.ctx().get_str("user").unwrap_or("nobody").to_string();
                self.base.ctx_mut().text(StatusCode::OK, user);
            }

            /// @router /files [propfind]
            pub fn properties(&mut self) {
                self.base.ctx_mut().text(StatusCode::MULTI_STATUS, "<multistatus/>");
            }
        }

        impl Controller for HomeController {
            fn descriptor() -> HandlerDescriptor {
                autoroute::descriptor!(HomeController)
            }

            fn actions() -> ActionTable<Self> {
                autoroute::actions![Self;
                    Index => index,
                    WhoAmI_GET => who_am_i,
                    Properties => properties,
                ]
                .verbs([Verb::Propfind])
                .path("/files")
            }

            fn base(&mut self) -> &mut Base {
                &mut self.base
            }
        }
    }
}

/// Source text carrying the same `@router` annotations as [`controller`],
/// laid out as the comment parser expects (`controller/mod.rs`, `home.rs`).
pub const EXAMPLE_SOURCE: &str = r#"
pub struct ExampleController;

impl ExampleController {
    /// @router /hello [get]
    pub fn hello_world(&mut self) {}

    /// @router /info [put,patch]
    pub fn update_info(&mut self) {}
}
"#;

pub const HOME_SOURCE: &str = r#"
pub struct HomeController;

impl HomeController {
    /// @router / [get]
    pub fn index(&mut self) {}

    /// @router /whoami [get]
    pub fn who_am_i(&mut self) {}

    /// @router /files [propfind]
    pub fn properties(&mut self) {}
}
"#;

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A served app on an ephemeral port.
pub struct Served {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), AppError>>,
}

impl Served {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) -> Result<(), AppError> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
    }
}

pub async fn serve(app: App) -> Served {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(app.serve(listener, shutdown.clone()));

    // wait until the server task subscribed to the shutdown channel
    while shutdown.receiver_count() == 0 && !handle.is_finished() {
        tokio::task::yield_now().await;
    }

    Served { addr, shutdown, handle }
}
