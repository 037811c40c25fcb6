//! SQLite repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use inkpost_core::domain::{Admin, Post, StoredSession};
use inkpost_core::error::RepoError;
use inkpost_core::ports::{AdminRepository, BaseRepository, PostRepository};

use super::entity::admin::{self, Entity as AdminEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::sea_base::{SeaRepository, query_err, write_err};

/// SQLite post repository.
pub type SqlitePostRepository = SeaRepository<PostEntity>;

/// SQLite admin repository.
pub type SqliteAdminRepository = SeaRepository<AdminEntity>;

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %post.id, "Inserting post");

        PostEntity::insert(post::ActiveModel::from(post.clone()))
            .exec_without_returning(&self.db)
            .await
            .map_err(write_err)?;

        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(post.title))
            .col_expr(post::Column::Content, Expr::value(post.content))
            .filter(post::Column::Id.eq(post.id.as_str()))
            .exec(&self.db)
            .await
            .map_err(write_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        self.find_by_id(post.id)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn insert_many(&self, posts: Vec<Post>) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        for post in posts {
            PostEntity::insert(post::ActiveModel::from(post))
                .exec_without_returning(&txn)
                .await
                .map_err(write_err)?;
        }

        txn.commit().await.map_err(query_err)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(query_err)
    }
}

#[async_trait]
impl AdminRepository for SqliteAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, RepoError> {
        let result = AdminEntity::find()
            .filter(admin::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_session_digest(&self, digest: &str) -> Result<Option<Admin>, RepoError> {
        let result = AdminEntity::find()
            .filter(admin::Column::SessionTokenDigest.eq(digest))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, admin: Admin) -> Result<Admin, RepoError> {
        AdminEntity::insert(admin::ActiveModel::from(admin.clone()))
            .exec_without_returning(&self.db)
            .await
            .map_err(write_err)?;

        Ok(admin)
    }

    async fn set_session(
        &self,
        id: Uuid,
        session: Option<StoredSession>,
    ) -> Result<(), RepoError> {
        let (digest, expires_at) = match session {
            Some(session) => (Some(session.token_digest), Some(session.expires_at)),
            None => (None, None),
        };

        let result = AdminEntity::update_many()
            .col_expr(admin::Column::SessionTokenDigest, Expr::value(digest))
            .col_expr(admin::Column::SessionExpiresAt, Expr::value(expires_at))
            .filter(admin::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(write_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn clear_session_by_digest(&self, digest: &str) -> Result<u64, RepoError> {
        let result = AdminEntity::update_many()
            .col_expr(
                admin::Column::SessionTokenDigest,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                admin::Column::SessionExpiresAt,
                Expr::value(Option::<chrono::DateTime<chrono::Utc>>::None),
            )
            .filter(admin::Column::SessionTokenDigest.eq(digest))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        AdminEntity::find().count(&self.db).await.map_err(query_err)
    }
}
