use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

// Module for routing segregation (Public, Authenticated).
pub mod routes;
use auth::AuthUser;
use routes::{authenticated, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point.
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{MemoryPostRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application from the `#[utoipa::path]` and `ToSchema` annotations.
/// Served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_post,
        handlers::list_posts,
        handlers::get_post,
        handlers::update_post,
        handlers::delete_post,
    ),
    components(schemas(models::Post, models::PostPayload)),
    tags(
        (name = "post-board", description = "Authenticated post board API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding the application's
/// services and configuration, shared across all incoming requests. The
/// repository is the only shared mutable resource in the process; everything
/// auth-related is pure computation over the per-request header.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: abstracts post persistence.
    pub repo: RepositoryState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Allow extractors and handlers to selectively pull components from the
// shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for the authenticated routes. Attempting to
/// extract `AuthUser` runs the full decode-and-verify chain; on failure the
/// extractor rejects the request with the matching 401 before the handler
/// executes.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's routing structure, applies global and scoped
/// middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no middleware applied.
        .merge(public::public_routes())
        // Authenticated routes: protected by the auth middleware.
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        .with_state(state);

    // 3. Observability and Correlation Layers (applied outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID generation for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request tracing: wraps the request/response lifecycle in
                // a span correlated by the generated request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Return the generated x-request-id header to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS layer
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes `TraceLayer` span creation: includes the `x-request-id` header
/// in the structured logging metadata alongside the HTTP method and URI, so
/// every log line of a single request is correlated by a unique id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
