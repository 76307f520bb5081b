use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints accessible to any client, anonymous or logged-in. Post reads
/// are public by design: these handlers never touch the Authorization
/// header, so a missing or even malformed token cannot fail a read.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated liveness endpoint for monitoring and load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /posts
        // Lists all posts, newest creation first.
        .route("/posts", get(handlers::list_posts))
        // GET /posts/{id}
        // Retrieves a single post; 404 when the id is absent.
        .route("/posts/{id}", get(handlers::get_post))
}
