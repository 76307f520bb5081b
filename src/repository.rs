use crate::models::{Post, PostPayload};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::{
    Mutex,
    atomic::{AtomicI64, Ordering},
};

/// PostRepository Trait
///
/// Abstract contract for post persistence, keeping handlers independent of
/// the concrete store (Postgres in production, in-memory for tests).
///
/// Authorization is not this layer's concern: the policy decides before any
/// mutating method is called, and these methods persist unconditionally.
/// Errors propagate unmodified; there is no retry and no swallow-and-default
/// anywhere in this trait.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Lookup by id; `Ok(None)` when the id is absent.
    async fn find_post(&self, id: i64) -> Result<Option<Post>, sqlx::Error>;

    /// All posts, newest creation first.
    async fn list_posts(&self) -> Result<Vec<Post>, sqlx::Error>;

    /// Persists a new post. The store assigns the id and stamps both
    /// timestamps with the same instant.
    async fn create_post(&self, owner: &str, payload: PostPayload) -> Result<Post, sqlx::Error>;

    /// Overwrites title/contents and refreshes `modified_at`. `Ok(None)` when
    /// the row vanished between the caller's lookup and this write.
    async fn update_post(&self, id: i64, payload: PostPayload)
    -> Result<Option<Post>, sqlx::Error>;

    /// Removes the record; true if a row was actually deleted.
    async fn delete_post(&self, id: i64) -> Result<bool, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn PostRepository>;

/// PostgresRepository
///
/// The production implementation, backed by the `posts` table.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresRepository {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"SELECT id, owner, title, contents, created_at, modified_at
               FROM posts WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"SELECT id, owner, title, contents, created_at, modified_at
               FROM posts ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn create_post(&self, owner: &str, payload: PostPayload) -> Result<Post, sqlx::Error> {
        // NOW() is evaluated once per statement, so created_at equals
        // modified_at on the fresh row.
        sqlx::query_as::<_, Post>(
            r#"INSERT INTO posts (owner, title, contents, created_at, modified_at)
               VALUES ($1, $2, $3, NOW(), NOW())
               RETURNING id, owner, title, contents, created_at, modified_at"#,
        )
        .bind(owner)
        .bind(payload.title)
        .bind(payload.contents)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_post(
        &self,
        id: i64,
        payload: PostPayload,
    ) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"UPDATE posts
               SET title = $2, contents = $3, modified_at = NOW()
               WHERE id = $1
               RETURNING id, owner, title, contents, created_at, modified_at"#,
        )
        .bind(id)
        .bind(payload.title)
        .bind(payload.contents)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_post(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// MemoryPostRepository
///
/// An in-process implementation of `PostRepository` used by the test suites,
/// shipped here so every test file shares one definition. Same contract as
/// the Postgres store, including id assignment and timestamp stamping.
#[derive(Default)]
pub struct MemoryPostRepository {
    posts: Mutex<HashMap<i64, Post>>,
    next_id: AtomicI64,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, sqlx::Error> {
        let posts = self.posts.lock().expect("posts mutex poisoned");
        Ok(posts.get(&id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, sqlx::Error> {
        let posts = self.posts.lock().expect("posts mutex poisoned");
        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(all)
    }

    async fn create_post(&self, owner: &str, payload: PostPayload) -> Result<Post, sqlx::Error> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let post = Post {
            id,
            owner: owner.to_string(),
            title: payload.title,
            contents: payload.contents,
            created_at: now,
            modified_at: now,
        };

        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        id: i64,
        payload: PostPayload,
    ) -> Result<Option<Post>, sqlx::Error> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        match posts.get_mut(&id) {
            Some(post) => {
                post.title = payload.title;
                post.contents = payload.contents;
                post.modified_at = Utc::now();
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_post(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut posts = self.posts.lock().expect("posts mutex poisoned");
        Ok(posts.remove(&id).is_some())
    }
}
