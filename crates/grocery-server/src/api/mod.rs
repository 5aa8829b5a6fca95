mod products;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use grocery_client::CatalogClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

pub const RELAY_FAILURE_MESSAGE: &str = "Failed to fetch products data";

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<CatalogClient>,
}

impl AppState {
    pub fn new(upstream: CatalogClient) -> Self {
        Self {
            upstream: Arc::new(upstream),
        }
    }
}

/// Body returned for every upstream failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// The relay's only failure: the upstream catalog could not be read.
#[derive(Debug)]
pub struct RelayError;

impl IntoResponse for RelayError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: RELAY_FAILURE_MESSAGE,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/products", get(products::relay_products))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for_url(url: &str) -> Router {
        let upstream =
            CatalogClient::new(url, Some(5), "grocery-test/0.1").expect("upstream client");
        build_app(AppState::new(upstream))
    }

    fn app_for(server: &MockServer) -> Router {
        app_for_url(&format!("{}/cms/products", server.uri()))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[tokio::test]
    async fn products_relays_upstream_body_verbatim() {
        let server = MockServer::start().await;
        let raw = concat!(
            r#"{"products":[{"id":"p1","name":"Milk","main_category":"Dairy","price":2.5}],"#,
            r#""z":1,"a":2}"#
        );
        Mock::given(method("GET"))
            .and(path("/cms/products"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(raw, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(get_request("/api/products"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_string(response).await, raw);
    }

    #[tokio::test]
    async fn upstream_error_status_becomes_generic_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cms/products"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway: db-7 exploded"))
            .expect(1)
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(get_request("/api/products"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(!body.contains("db-7"));
        let json: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(json, json!({"error": "Failed to fetch products data"}));
    }

    #[tokio::test]
    async fn upstream_non_json_body_becomes_generic_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cms/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(get_request("/api/products"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Failed to fetch products data"}"#
        );
    }

    #[tokio::test]
    async fn unreachable_upstream_becomes_generic_500() {
        // Bind then drop to get a local port with nothing listening.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("free local port");

        let response = app_for_url(&format!("http://{addr}/cms/products"))
            .oneshot(get_request("/api/products"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Failed to fetch products data"}"#
        );
    }

    #[tokio::test]
    async fn each_request_forwards_exactly_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cms/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
            .expect(2)
            .mount(&server)
            .await;

        let app = app_for(&server);
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(get_request("/api/products"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
            .mount(&server)
            .await;

        let request = Request::builder()
            .uri("/api/products")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .expect("request");
        let response = app_for(&server).oneshot(request).await.expect("response");

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn health_does_not_contact_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let response = app_for(&server)
            .oneshot(get_request("/api/health"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn request_id_is_echoed_or_generated() {
        let server = MockServer::start().await;
        let app = app_for(&server);

        let request = Request::builder()
            .uri("/api/health")
            .header(REQUEST_ID_HEADER, "req-42")
            .body(Body::empty())
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");

        let response = app.oneshot(get_request("/api/health")).await.expect("response");
        let generated = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .expect("generated id");
        assert_eq!(generated.len(), 36);
    }

    #[test]
    fn relay_error_maps_to_internal_server_error() {
        let response = RelayError.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
