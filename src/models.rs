use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Core Application Schemas (Mapped to Database) ---

/// Post
///
/// A text post from the `posts` table. `id` is assigned by the store at
/// creation and `owner` is fixed to the creator's subject; neither changes
/// afterward. `modified_at` is refreshed on every successful update and
/// equals `created_at` for a freshly created record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, FromRow, Default)]
pub struct Post {
    pub id: i64,
    // Subject of the identity that created the post. The default authorized
    // mutator.
    pub owner: String,
    pub title: String,
    pub contents: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// --- Request Payloads (Input Schemas) ---

/// PostPayload
///
/// Body for both POST /posts and PUT /posts/{id}. An update replaces title
/// and contents wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct PostPayload {
    pub title: String,
    pub contents: String,
}
