//! Served over TCP with reqwest, then shut down gracefully.

mod common;

use reqwest::{Method, StatusCode};

use autoroute::config::{AppConfig, RouteSeparator};
use autoroute::middleware::{request_id, request_logger};
use autoroute::{App, RouterGroup};

use common::controller::home::HomeController;
use common::controller::ExampleController;

fn app() -> App {
    let mut config = AppConfig::default();
    config.app.router_sep = RouteSeparator::Dash;
    App::new(config).add_router_groups([
        RouterGroup::new()
            .use_middleware(request_id())
            .use_middleware(request_logger())
            .controller::<ExampleController>(),
        RouterGroup::new().prefix("/dav").controller::<HomeController>(),
    ])
}

#[tokio::test]
async fn test_serve_and_shutdown() {
    let served = common::serve(app()).await;
    let client = reqwest::Client::new();

    let res = client.get(served.url("/example/hello-world")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "hello world");

    let res = client
        .put(served.url("/example/update-info"))
        .body("42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "updated 42");

    let res = client.get(served.url("/nowhere")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    served.stop().await.unwrap();
}

#[tokio::test]
async fn test_client_request_id_round_trips() {
    let served = common::serve(app()).await;

    let res = reqwest::Client::new()
        .get(served.url("/example/request-id"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");
    assert_eq!(res.text().await.unwrap(), "trace-me");

    served.stop().await.unwrap();
}

#[tokio::test]
async fn test_webdav_verb_over_the_wire() {
    let served = common::serve(app()).await;

    let res = reqwest::Client::new()
        .request(Method::from_bytes(b"PROPFIND").unwrap(), served.url("/dav/files"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::MULTI_STATUS);

    let res = reqwest::Client::new()
        .delete(served.url("/dav/files"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "PROPFIND");

    served.stop().await.unwrap();
}

#[tokio::test]
async fn test_startup_error_surfaces_from_serve() {
    let served = common::serve(
        App::new(AppConfig::default()).add_router_groups([
            RouterGroup::new().controller::<ExampleController>(),
            RouterGroup::new().controller::<ExampleController>(),
        ]),
    )
    .await;

    let result = served.handle.await.unwrap();
    assert!(matches!(result, Err(autoroute::AppError::Route(_))));
}
