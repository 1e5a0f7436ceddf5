use crate::config::constants::{API_HEALTH_PATH, HEALTH_PATH};
use crate::config::loader::Config;
use crate::controllers::health::__path_health;
use crate::controllers::health::__path_liveness;
use crate::controllers::health::{health, liveness};
use crate::models::context_dto::{USER_EMAIL_HEADER, USER_ID_HEADER, USER_NAME_HEADER};
use crate::models::health_dto::{
    DatabaseStatus, HealthReport, HealthStatus, Liveness, LivenessStatus,
};
use axum::http::header::{self, HeaderName, HeaderValue, InvalidHeaderValue};
use axum::http::Method;
use axum::{routing::get, Router};
use sqlx::AnyPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace;
use tower_http::trace::TraceLayer;
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub pool: AnyPool,
    pub config: Config,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        liveness,
        health
    ),
    components(
        schemas(HealthReport, HealthStatus, DatabaseStatus, Liveness, LivenessStatus)
    ),
    tags(
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;

pub fn create_routes(pool: AnyPool, config: Config) -> Result<Router, InvalidHeaderValue> {
    let cors = cors_layer(&config.frontend_url)?;
    let state = AppState { pool, config };

    let router = Router::new()
        .route(HEALTH_PATH, get(liveness))
        .route(API_HEALTH_PATH, get(health))
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    Ok(with_security_headers(router)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}

/// `*` (or nothing) allows any origin without credentials, anything else is
/// the single allowed origin and credentials are allowed.
fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(USER_NAME_HEADER),
            HeaderName::from_static(USER_EMAIL_HEADER),
        ]);

    match origin.trim() {
        "" | "*" => Ok(layer.allow_origin(Any)),
        origin => Ok(layer
            .allow_origin(HeaderValue::from_str(origin)?)
            .allow_credentials(true)),
    }
}

// helmet's defaults, minus the content security policy
const SECURITY_HEADERS: [(&str, &str); 11] = [
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS
        .iter()
        .fold(router, |router, &(name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::db::init_db;
    use axum::body::to_bytes;
    use axum::body::Body;
    use chrono::{DateTime, Utc};
    use http::{Request, StatusCode};
    use tower::ServiceExt; // for `oneshot`

    async fn setup_test_router(config: Config) -> (Router, AnyPool) {
        let pool = init_db(&config).await.unwrap();
        let router = create_routes(pool.clone(), config).unwrap();
        (router, pool)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_api_health_connected() {
        let (app, _pool) = setup_test_router(Config::default()).await;
        let before = Utc::now();

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["database"], "connected");

        let timestamp = DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap())
            .unwrap()
            .with_timezone(&Utc);
        assert!(timestamp >= before && timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_api_health_database_down_is_still_200() {
        let (app, pool) = setup_test_router(Config::default()).await;
        pool.close().await;

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["database"], "not connected");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_liveness_does_not_touch_database() {
        let (app, pool) = setup_test_router(Config::default()).await;
        pool.close().await;

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json.get("database").is_none());
        assert!(DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_security_and_request_id_headers() {
        let (app, _pool) = setup_test_router(Config::default()).await;

        let response = app.oneshot(get_request("/health")).await.unwrap();
        let headers = response.headers();

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert_eq!(headers["x-dns-prefetch-control"], "off");
        assert_eq!(headers["cross-origin-opener-policy"], "same-origin");
        assert_eq!(headers["cross-origin-resource-policy"], "same-origin");
        assert_eq!(headers["origin-agent-cluster"], "?1");
        assert_eq!(
            headers["strict-transport-security"],
            "max-age=15552000; includeSubDomains"
        );
        assert_eq!(headers["x-download-options"], "noopen");
        assert_eq!(headers["x-permitted-cross-domain-policies"], "none");
        assert_eq!(headers["x-xss-protection"], "0");
        assert!(headers.contains_key("x-request-id"));
        assert!(headers.get("content-security-policy").is_none());
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let (app, _pool) = setup_test_router(Config::default()).await;

        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-123")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-123");
    }

    #[tokio::test]
    async fn test_cors_wildcard_origin() {
        let (app, _pool) = setup_test_router(Config::default()).await;

        let request = Request::builder()
            .uri("/api/health")
            .header("origin", "https://anywhere.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(headers.get("access-control-allow-credentials").is_none());
    }

    #[tokio::test]
    async fn test_cors_configured_origin_with_credentials() {
        let config = Config {
            frontend_url: "https://app.example.com".to_string(),
            ..Config::default()
        };
        let (app, _pool) = setup_test_router(config).await;

        let request = Request::builder()
            .uri("/api/health")
            .header("origin", "https://app.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(
            headers["access-control-allow-origin"],
            "https://app.example.com"
        );
        assert_eq!(headers["access-control-allow-credentials"], "true");
    }

    #[tokio::test]
    async fn test_cors_empty_origin_allows_any() {
        let config = Config::default()
            .with_env(|key| (key == "FRONTEND_URL").then(String::new))
            .unwrap();
        assert_eq!(config.frontend_url, "*");

        // A blank origin coming from a config file behaves the same
        let config = Config {
            frontend_url: String::new(),
            ..Config::default()
        };
        let (app, _pool) = setup_test_router(config).await;

        let request = Request::builder()
            .uri("/api/health")
            .header("origin", "https://app.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert!(headers.get("access-control-allow-credentials").is_none());
    }

    #[tokio::test]
    async fn test_invalid_cors_origin_is_rejected() {
        let config = Config {
            frontend_url: "https://bad\norigin".to_string(),
            ..Config::default()
        };
        let pool = init_db(&config).await.unwrap();
        assert!(create_routes(pool, config).is_err());
    }

    #[tokio::test]
    async fn test_openapi_document_lists_health_routes() {
        let (app, _pool) = setup_test_router(Config::default()).await;

        let response = app
            .oneshot(get_request("/api-docs/openapi.json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert!(json["paths"]["/health"].is_object());
        assert!(json["paths"]["/api/health"].is_object());
    }
}
