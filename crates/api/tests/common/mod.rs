use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use ssp_api::auth::CLIENT_PRINCIPAL_HEADER;
use ssp_api::config::ServerConfig;
use ssp_api::routes;
use ssp_api::state::AppState;
use ssp_core::costcenter::{CostCenterDetails, CostCenterDirectory, LookupError};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        directory_base_url: "http://directory.invalid".to_string(),
        directory_api_key: "test-key".to_string(),
    }
}

/// In-memory stand-in for the cost-center directory.
///
/// Known codes resolve to canned details; `failing` simulates a transport
/// error on every lookup.
#[derive(Default)]
pub struct StubDirectory {
    pub entries: HashMap<String, CostCenterDetails>,
    pub failing: bool,
}

impl StubDirectory {
    pub fn with_entry(code: &str, details: CostCenterDetails) -> Self {
        let mut entries = HashMap::new();
        entries.insert(code.to_string(), details);
        StubDirectory {
            entries,
            failing: false,
        }
    }

    pub fn failing() -> Self {
        StubDirectory {
            entries: HashMap::new(),
            failing: true,
        }
    }
}

#[async_trait::async_trait]
impl CostCenterDirectory for StubDirectory {
    async fn lookup(&self, code: &str) -> Result<Option<CostCenterDetails>, LookupError> {
        if self.failing {
            return Err(LookupError("simulated directory outage".to_string()));
        }
        Ok(self.entries.get(code.trim()).cloned())
    }
}

/// Canned directory details for a resolvable cost center.
pub fn directory_details(code: &str) -> CostCenterDetails {
    CostCenterDetails {
        cost_center: code.to_string(),
        name3: "GS".to_string(),
        name4: "Payroll".to_string(),
        department: "PAY-1".to_string(),
        responsible: "R.Party".to_string(),
        responsible_org_office: "WOM-DIR".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and an empty stub directory.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_directory(pool, Arc::new(StubDirectory::default()))
}

pub fn build_test_app_with_directory(
    pool: PgPool,
    directory: Arc<dyn CostCenterDirectory>,
) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        directory,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Encode an identity assertion header value for the given user.
pub fn principal_header(name: &str, email: &str) -> String {
    let claims = serde_json::json!({
        "claims": [
            { "typ": "name", "val": name },
            {
                "typ": "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
                "val": email
            }
        ]
    });
    BASE64.encode(claims.to_string())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_as(app: Router, uri: &str, principal: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(CLIENT_PRINCIPAL_HEADER, principal)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert an Azure subscription with representative values.
pub async fn seed_azure(pool: &PgPool, id: &str, owner: &str) {
    sqlx::query(
        "INSERT INTO azure_assets \
            (subscription_id, subscription_name, management_group_oe, it_owner, \
             cost_center, cost_center_name, cost_center_responsible, \
             type_of_subscription, i_sc, person_related) \
         VALUES ($1, 'Payroll Prod', 'CI/OSD', $2, '0011111111', 'Old CC Name', \
                 'old.resp@example.com', 'Prod', 'I-SC1234', 'No')",
    )
    .bind(id)
    .bind(owner)
    .execute(pool)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn seed_it_owner_wom(pool: &PgPool, owner: &str, wom: &str) {
    sqlx::query("INSERT INTO it_owner_reference (it_owner, it_owner_wom) VALUES ($1, $2)")
        .bind(owner)
        .bind(wom)
        .execute(pool)
        .await
        .unwrap();
}
