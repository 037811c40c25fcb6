use chrono::{TimeDelta, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseBackend, DbConn, MockDatabase};

use inkpost_core::domain::{Admin, Post, PostDraft, StoredSession};
use inkpost_core::error::RepoError;
use inkpost_core::ports::{AdminRepository, BaseRepository, PostRepository};

use super::entity::post;
use super::{DatabaseConfig, SqliteAdminRepository, SqlitePostRepository, connect};

async fn migrated_db() -> DbConn {
    let db = connect(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn draft(title: &str) -> PostDraft {
    PostDraft::new(title, "Content long enough to be valid.")
}

#[tokio::test]
async fn test_find_post_by_id_maps_model() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_results(vec![vec![post::Model {
            id: "1705312800000-abcdef12".to_owned(),
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            created_at: now,
        }]])
        .into_connection();

    let repo = SqlitePostRepository::new(db);

    let result: Option<Post> = repo
        .find_by_id("1705312800000-abcdef12".to_string())
        .await
        .unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.created_at, now);
}

#[tokio::test]
async fn test_insert_then_find() {
    let repo = SqlitePostRepository::new(migrated_db().await);
    let post = Post::new(draft("Hello World"));

    repo.insert(post.clone()).await.unwrap();
    let found = repo.find_by_id(post.id.clone()).await.unwrap().unwrap();

    assert_eq!(found.id, post.id);
    assert_eq!(found.title, post.title);
    assert_eq!(found.content, post.content);
    assert_eq!(
        found.created_at.timestamp_millis(),
        post.created_at.timestamp_millis()
    );
}

#[tokio::test]
async fn test_duplicate_post_id_is_a_constraint_error() {
    let repo = SqlitePostRepository::new(migrated_db().await);
    let post = Post::new(draft("Hello World"));

    repo.insert(post.clone()).await.unwrap();
    let err = repo.insert(post).await.unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn test_list_is_sorted_newest_first() {
    let repo = SqlitePostRepository::new(migrated_db().await);
    let now = Utc::now();
    for (title, days_ago) in [("middle", 2), ("newest", 0), ("oldest", 5)] {
        repo.insert(Post::at(draft(title), now - TimeDelta::days(days_ago)))
            .await
            .unwrap();
    }

    let titles: Vec<String> = repo
        .list_newest_first()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();

    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn test_update_keeps_creation_time() {
    let repo = SqlitePostRepository::new(migrated_db().await);
    let created_at = Utc::now() - TimeDelta::days(3);
    let mut post = Post::at(draft("Before"), created_at);
    repo.insert(post.clone()).await.unwrap();

    post.apply(draft("After"));
    let updated = repo.update(post).await.unwrap();

    assert_eq!(updated.title, "After");
    assert_eq!(
        updated.created_at.timestamp_millis(),
        created_at.timestamp_millis()
    );
}

#[tokio::test]
async fn test_update_unknown_post_is_not_found() {
    let repo = SqlitePostRepository::new(migrated_db().await);
    let err = repo.update(Post::new(draft("Ghost"))).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_then_find_is_none() {
    let repo = SqlitePostRepository::new(migrated_db().await);
    let post = Post::new(draft("Short lived"));
    repo.insert(post.clone()).await.unwrap();

    repo.delete(post.id.clone()).await.unwrap();

    let found: Option<Post> = repo.find_by_id(post.id.clone()).await.unwrap();
    assert!(found.is_none());
    assert!(matches!(
        repo.delete(post.id).await.unwrap_err(),
        RepoError::NotFound
    ));
}

#[tokio::test]
async fn test_insert_many_and_count() {
    let repo = SqlitePostRepository::new(migrated_db().await);
    let posts = vec![
        Post::new(draft("One")),
        Post::new(draft("Two")),
        Post::new(draft("Three")),
    ];

    repo.insert_many(posts).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_admin_session_lifecycle() {
    let repo = SqliteAdminRepository::new(migrated_db().await);
    let admin = repo
        .insert(Admin::new("admin".to_string(), "$argon2id$hash".to_string()))
        .await
        .unwrap();

    let found = repo.find_by_username("admin").await.unwrap().unwrap();
    assert_eq!(found.id, admin.id);
    assert!(found.session.is_none());

    let session = StoredSession {
        token_digest: "abc123".to_string(),
        expires_at: Utc::now() + TimeDelta::days(7),
    };
    repo.set_session(admin.id, Some(session)).await.unwrap();

    let by_digest = repo.find_by_session_digest("abc123").await.unwrap().unwrap();
    assert_eq!(by_digest.id, admin.id);
    assert_eq!(by_digest.session.unwrap().token_digest, "abc123");

    assert_eq!(repo.clear_session_by_digest("abc123").await.unwrap(), 1);
    assert_eq!(repo.clear_session_by_digest("abc123").await.unwrap(), 0);
    assert!(repo.find_by_session_digest("abc123").await.unwrap().is_none());
}

#[tokio::test]
async fn test_admin_username_is_unique() {
    let repo = SqliteAdminRepository::new(migrated_db().await);
    repo.insert(Admin::new("admin".to_string(), "h1".to_string()))
        .await
        .unwrap();

    let err = repo
        .insert(Admin::new("admin".to_string(), "h2".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_set_session_for_unknown_admin() {
    let repo = SqliteAdminRepository::new(migrated_db().await);
    let err = repo
        .set_session(uuid::Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}
