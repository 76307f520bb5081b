use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{post, put},
};

/// Authenticated Router Module
///
/// The mutating surface of the API. Every route here sits behind the
/// `AuthUser` extractor middleware layered on in `create_router`, so a
/// request without a decodable, validly signed, unexpired bearer token never
/// reaches a handler. Ownership/admin authorization happens afterwards, per
/// request, inside the handlers.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // POST /posts
        // Creates a post owned by the calling identity. Any authenticated
        // subject may create; no ownership check applies.
        .route("/posts", post(handlers::create_post))
        // PUT/DELETE /posts/{id}
        // Mutations on an existing post. Both run the owner-or-admin policy
        // against a freshly loaded record before touching the store.
        .route(
            "/posts/{id}",
            put(handlers::update_post).delete(handlers::delete_post),
        )
}
