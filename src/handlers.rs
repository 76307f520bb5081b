use crate::{
    AppState,
    auth::{
        AuthUser,
        policy::{self, Action},
    },
    error::ApiError,
    models::{Post, PostPayload},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

// Every mutating handler walks the same stages in order:
// token decoded -> token validated (both inside the AuthUser extractor) ->
// target loaded -> policy consulted -> mutation committed. Any stage may end
// the request with its own error kind; none is retried.

/// create_post
///
/// [Authenticated Route] Creates a new post owned by the caller.
/// Any validated identity may create; there is no ownership check to run.
/// The store assigns the id and stamps created_at == modified_at.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = PostPayload,
    responses(
        (status = 201, description = "Created", body = Post),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_post(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<PostPayload>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.repo.create_post(&user.subject, payload).await?;

    tracing::info!(post_id = post.id, owner = %post.owner, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// list_posts
///
/// [Public Route] Lists every post, newest creation first. Never consults
/// the Authorization header.
#[utoipa::path(
    get,
    path = "/posts",
    responses((status = 200, description = "All posts", body = [Post]))
)]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state.repo.list_posts().await?;
    Ok(Json(posts))
}

/// get_post
///
/// [Public Route] Retrieves a single post by id. Never consults the
/// Authorization header.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Found", body = Post),
        (status = 404, description = "No such post")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, ApiError> {
    let post = state.repo.find_post(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(post))
}

/// update_post
///
/// [Authenticated Route] Overwrites a post's title and contents and
/// refreshes its modification timestamp. The target is loaded before the
/// policy runs, so a missing id answers 404 only to callers that presented a
/// valid token; the policy then permits the owner or any admin.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    request_body = PostPayload,
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated", body = Post),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not owner and not admin"),
        (status = 404, description = "No such post")
    )
)]
pub async fn update_post(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PostPayload>,
) -> Result<Json<Post>, ApiError> {
    let post = state.repo.find_post(id).await?.ok_or(ApiError::NotFound)?;

    policy::authorize(&user, Action::Mutate, &post.owner)
        .permitted()
        .map_err(ApiError::Forbidden)?;

    // The row can only vanish here if a concurrent delete won the race;
    // answer as the lookup would have.
    let updated = state
        .repo
        .update_post(id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(post_id = updated.id, subject = %user.subject, "post updated");
    Ok(Json(updated))
}

/// delete_post
///
/// [Authenticated Route] Removes a post. Same resolution and authorization
/// sequence as update_post; a permitted delete answers 204.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not owner and not admin"),
        (status = 404, description = "No such post")
    )
)]
pub async fn delete_post(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let post = state.repo.find_post(id).await?.ok_or(ApiError::NotFound)?;

    policy::authorize(&user, Action::Mutate, &post.owner)
        .permitted()
        .map_err(ApiError::Forbidden)?;

    if !state.repo.delete_post(id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(post_id = id, subject = %user.subject, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}
