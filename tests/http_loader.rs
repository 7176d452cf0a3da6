//! Route loading over HTTP against a mock server.
//!
//! The loader uses reqwest's blocking client, so every call runs on a
//! blocking thread while the mock server lives on the test runtime.

use uts::catalog::{CatalogLoad, LOAD_FAILURE_MESSAGE};
use uts::loader::{self, RouteSource};
use uts::schema::default_route;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn routes_json() -> String {
    std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/data/routes.json")).unwrap()
}

async fn load_from(url: String) -> CatalogLoad {
    tokio::task::spawn_blocking(move || loader::load(&RouteSource::Url(url)))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_loads_json_routes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stationRoutes.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(routes_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let load = load_from(format!("{}/stationRoutes.json", mock_server.uri())).await;

    assert!(load.loaded());
    assert_eq!(load.catalog.routes().len(), 3);
    assert_eq!(load.catalog.first().id, 1);
}

#[tokio::test]
async fn test_loads_script_wrapped_routes() {
    let mock_server = MockServer::start().await;
    let body = format!("export const stationRoutes = {};\n", routes_json());
    Mock::given(method("GET"))
        .and(path("/stationRoutes.ts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let load = load_from(format!("{}/stationRoutes.ts", mock_server.uri())).await;

    assert!(load.loaded());
    assert_eq!(load.catalog.find(3).unwrap().distance, "20 km");
}

#[tokio::test]
async fn test_http_404_falls_back() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let load = load_from(format!("{}/missing.ts", mock_server.uri())).await;

    assert_eq!(load.error.as_deref(), Some(LOAD_FAILURE_MESSAGE));
    assert_eq!(load.catalog.routes(), &[default_route()]);
}

#[tokio::test]
async fn test_garbage_body_falls_back() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("[{ id: 1, source: window.location }]"),
        )
        .mount(&mock_server)
        .await;

    let load = load_from(mock_server.uri()).await;

    assert!(!load.loaded());
    assert_eq!(load.catalog.first(), &default_route());
}

#[tokio::test]
async fn test_unreachable_host_falls_back() {
    // Nothing listens on port 9 (discard) on the loopback interface.
    let load = load_from("http://127.0.0.1:9/routes.json".to_string()).await;
    assert!(!load.loaded());
}
