//! api-server — HTTP API for the Coffee Catalog workspace.
//!
//! Exposes the five catalog operations (findAll, findOne, create, update,
//! delete) as a JSON-over-HTTP API backed by the in-memory repository. The
//! catalog is volatile: every record vanishes on restart, and by default it
//! is seeded with the fixed startup menu (ids 1-3).
//!
//! Run:
//! ```bash
//! # pretty logs (default); PORT optional
//! cargo run -p api-server
//!
//! # start with an empty catalog instead of the seed menu
//! SEED_MENU=false cargo run -p api-server
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.
//!

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use domain::adapters::memory_repo::InMemoryRepo;
use domain::service::CoffeeService;
use domain::validate::parse_size;
use domain::{CoffeeError, CoffeeId};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Clone)]
struct AppState {
    service: Arc<CoffeeService<InMemoryRepo>>,
}

#[tokio::main]
async fn main() {
    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cfg);

    let repo = if cfg.seed_menu {
        InMemoryRepo::with_seed_menu()
    } else {
        InMemoryRepo::new()
    };
    let state = AppState {
        service: Arc::new(CoffeeService::new(repo)),
    };

    let mut app = router(state);

    // CORS - already validated in Config::from_env()
    let cors = if cfg.cors_allow_origin == HeaderValue::from_static("*") {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([cfg.cors_allow_origin.clone()]))
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    };
    app = app.layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(%addr, "api-server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind port");
    axum::serve(listener, app).await.expect("server error");
}

// Routes plus the request-id and trace layers. CORS is applied by main on
// top of this, from validated config.
fn router(state: AppState) -> Router {
    let x_request_id = axum::http::HeaderName::from_static("x-request-id");

    Router::new()
        .route("/api/coffees", get(list_coffees).post(create_coffee))
        .route(
            "/api/coffees/:id",
            get(get_coffee).put(update_coffee).delete(delete_coffee),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .with_state(state)
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(fmt::time::SystemTime)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }
}

#[derive(Deserialize)]
struct CreateCoffeeReq {
    name: String,
    size: String,
}

#[derive(Deserialize)]
struct UpdateCoffeeReq {
    name: String,
    size: String,
}

// Path ids are parsed by hand so a bad id yields the common error envelope
// instead of the framework's default rejection.
fn parse_path_id(raw: &str) -> Option<CoffeeId> {
    raw.parse::<CoffeeId>().ok()
}

async fn list_coffees(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.find_all() {
        Ok(coffees) => (StatusCode::OK, Json(coffees)).into_response(),
        Err(e) => {
            error!(err = ?e, "list error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(http_common::json_error_with_message(
                    "internal",
                    "server error",
                )),
            )
                .into_response()
        }
    }
}

async fn get_coffee(State(state): State<AppState>, Path(id_str): Path<String>) -> impl IntoResponse {
    let Some(id) = parse_path_id(&id_str) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(http_common::json_error_with_message(
                "invalid_request",
                "invalid id",
            )),
        )
            .into_response();
    };
    match state.service.find_one(id) {
        Ok(Some(coffee)) => (StatusCode::OK, Json(coffee)).into_response(),
        Ok(None) => {
            warn!(id, "coffee not found");
            (
                StatusCode::NOT_FOUND,
                Json(http_common::json_err("not_found")),
            )
                .into_response()
        }
        Err(e) => {
            error!(id, err = ?e, "find error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(http_common::json_error_with_message(
                    "internal",
                    "server error",
                )),
            )
                .into_response()
        }
    }
}

async fn create_coffee(
    State(state): State<AppState>,
    Json(body): Json<CreateCoffeeReq>,
) -> impl IntoResponse {
    let size = match parse_size(&body.size) {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(http_common::json_error_with_message(
                    "invalid_request",
                    &format!("{}", e),
                )),
            )
                .into_response()
        }
    };
    match state.service.create(&body.name, size) {
        Ok(coffee) => {
            info!(id = coffee.id, "create ok");
            (StatusCode::CREATED, Json(coffee)).into_response()
        }
        Err(CoffeeError::InvalidName(_)) | Err(CoffeeError::InvalidSize(_)) => (
            StatusCode::BAD_REQUEST,
            Json(http_common::json_error_with_message(
                "invalid_request",
                "invalid input",
            )),
        )
            .into_response(),
        Err(e) => {
            error!(err = ?e, "create error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(http_common::json_error_with_message(
                    "internal",
                    "server error",
                )),
            )
                .into_response()
        }
    }
}

async fn update_coffee(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<UpdateCoffeeReq>,
) -> impl IntoResponse {
    let Some(id) = parse_path_id(&id_str) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(http_common::json_error_with_message(
                "invalid_request",
                "invalid id",
            )),
        )
            .into_response();
    };
    let size = match parse_size(&body.size) {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(http_common::json_error_with_message(
                    "invalid_request",
                    &format!("{}", e),
                )),
            )
                .into_response()
        }
    };
    match state.service.update(id, &body.name, size) {
        Ok(coffee) => {
            info!(id, "update ok");
            (StatusCode::OK, Json(coffee)).into_response()
        }
        Err(CoffeeError::NotFound) => {
            warn!(id, "update target not found");
            (
                StatusCode::NOT_FOUND,
                Json(http_common::json_err("not_found")),
            )
                .into_response()
        }
        Err(CoffeeError::InvalidName(_)) | Err(CoffeeError::InvalidSize(_)) => (
            StatusCode::BAD_REQUEST,
            Json(http_common::json_error_with_message(
                "invalid_request",
                "invalid input",
            )),
        )
            .into_response(),
        Err(e) => {
            error!(id, err = ?e, "update error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(http_common::json_error_with_message(
                    "internal",
                    "server error",
                )),
            )
                .into_response()
        }
    }
}

async fn delete_coffee(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> impl IntoResponse {
    let Some(id) = parse_path_id(&id_str) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(http_common::json_error_with_message(
                "invalid_request",
                "invalid id",
            )),
        )
            .into_response();
    };
    match state.service.delete(id) {
        Ok(coffee) => {
            info!(id, "delete ok");
            (StatusCode::OK, Json(coffee)).into_response()
        }
        Err(CoffeeError::NotFound) => {
            warn!(id, "delete target not found");
            (
                StatusCode::NOT_FOUND,
                Json(http_common::json_err("not_found")),
            )
                .into_response()
        }
        Err(e) => {
            error!(id, err = ?e, "delete error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(http_common::json_error_with_message(
                    "internal",
                    "server error",
                )),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(AppState {
            service: Arc::new(CoffeeService::new(InMemoryRepo::with_seed_menu())),
        })
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.expect("infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn delete_req(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn error_code(body: &Value) -> &str {
        body["error"]["code"].as_str().unwrap_or("")
    }

    #[tokio::test]
    async fn find_all_returns_seeded_menu() {
        let app = test_app();
        let (status, body) = send(app, get_req("/api/coffees")).await;
        assert_eq!(status, StatusCode::OK);
        let coffees = body.as_array().expect("array body");
        assert_eq!(coffees.len(), 3);
        assert_eq!(coffees[0]["id"], json!(1));
        assert_eq!(coffees[0]["name"], json!("Caffè Americano"));
    }

    #[tokio::test]
    async fn find_one_returns_seeded_record() {
        let app = test_app();
        let (status, body) = send(app, get_req("/api/coffees/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], json!("Caffè Americano"));
        assert_eq!(body["size"], json!("GRANDE"));
    }

    #[tokio::test]
    async fn find_one_missing_id_is_not_found() {
        let app = test_app();
        let (status, body) = send(app, get_req("/api/coffees/99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_code(&body), "not_found");
    }

    #[tokio::test]
    async fn create_allocates_fresh_id_and_grows_catalog() {
        let app = test_app();
        let (status, body) = send(
            app.clone(),
            json_req(
                "POST",
                "/api/coffees",
                json!({"name": "Caffee Latte", "size": "VENTI"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], json!(4));
        assert_eq!(body["name"], json!("Caffee Latte"));
        assert_eq!(body["size"], json!("VENTI"));

        let (status, body) = send(app, get_req("/api/coffees")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().expect("array body").len(), 4);
    }

    #[tokio::test]
    async fn update_keeps_id_and_replaces_fields() {
        let app = test_app();
        let (status, body) = send(
            app,
            json_req(
                "PUT",
                "/api/coffees/1",
                json!({"name": "Espresso Coffee", "size": "VENTI"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!(1));
        assert_eq!(body["name"], json!("Espresso Coffee"));
        assert_eq!(body["size"], json!("VENTI"));
    }

    #[tokio::test]
    async fn delete_then_find_one_is_not_found() {
        let app = test_app();
        let (status, body) = send(app.clone(), delete_req("/api/coffees/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!(1));

        let (status, body) = send(app, get_req("/api/coffees/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_code(&body), "not_found");
    }

    #[tokio::test]
    async fn mutations_on_missing_id_are_not_found() {
        let app = test_app();
        let (status, _) = send(
            app.clone(),
            json_req(
                "PUT",
                "/api/coffees/42",
                json!({"name": "Ghost", "size": "TALL"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app, delete_req("/api/coffees/42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_size_member_is_rejected() {
        let app = test_app();
        let (status, body) = send(
            app,
            json_req(
                "POST",
                "/api/coffees",
                json!({"name": "Trenta Trouble", "size": "TRENTA"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "invalid_request");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let app = test_app();
        let (status, body) = send(
            app,
            json_req("POST", "/api/coffees", json!({"name": "  ", "size": "TALL"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "invalid_request");
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let app = test_app();
        let (status, body) = send(app, get_req("/api/coffees/espresso")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "invalid_request");
    }
}
