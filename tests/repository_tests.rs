use post_board::{
    models::PostPayload,
    repository::{MemoryPostRepository, PostRepository},
};
use std::time::Duration;

// Contract tests for the store, run against the in-memory implementation.
// The Postgres implementation honors the same contract via its SQL (id
// assignment, NOW() stamping, ORDER BY created_at DESC).

fn payload(title: &str, contents: &str) -> PostPayload {
    PostPayload {
        title: title.to_string(),
        contents: contents.to_string(),
    }
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let repo = MemoryPostRepository::new();

    let first = repo.create_post("alice", payload("a", "-")).await.unwrap();
    let second = repo.create_post("alice", payload("b", "-")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn test_create_stamps_equal_timestamps_and_owner() {
    let repo = MemoryPostRepository::new();

    let post = repo
        .create_post("alice", payload("title", "contents"))
        .await
        .unwrap();

    assert_eq!(post.owner, "alice");
    assert_eq!(post.created_at, post.modified_at);
}

#[tokio::test]
async fn test_find_returns_what_was_created() {
    let repo = MemoryPostRepository::new();

    let created = repo.create_post("alice", payload("t", "c")).await.unwrap();
    let found = repo.find_post(created.id).await.unwrap().unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.title, "t");
    assert_eq!(found.contents, "c");
}

#[tokio::test]
async fn test_find_missing_id_is_none() {
    let repo = MemoryPostRepository::new();

    assert!(repo.find_post(12345).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_orders_by_creation_descending() {
    let repo = MemoryPostRepository::new();

    for title in ["first", "second", "third"] {
        repo.create_post("alice", payload(title, "-")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let posts = repo.list_posts().await.unwrap();

    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_update_refreshes_modified_at_only() {
    let repo = MemoryPostRepository::new();

    let created = repo.create_post("alice", payload("old", "old")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = repo
        .update_post(created.id, payload("new", "new"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "new");
    assert_eq!(updated.owner, "alice");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.modified_at > created.modified_at);
}

#[tokio::test]
async fn test_update_missing_id_is_none() {
    let repo = MemoryPostRepository::new();

    let result = repo.update_post(9, payload("x", "y")).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_removes_the_record() {
    let repo = MemoryPostRepository::new();

    let created = repo.create_post("alice", payload("t", "c")).await.unwrap();

    assert!(repo.delete_post(created.id).await.unwrap());
    assert!(repo.find_post(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_id_is_false() {
    let repo = MemoryPostRepository::new();

    assert!(!repo.delete_post(77).await.unwrap());
}
