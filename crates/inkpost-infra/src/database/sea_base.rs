use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait, SqlErr};

use inkpost_core::error::RepoError;
use inkpost_core::ports::BaseRepository;

/// Generic SeaORM repository over one entity.
pub struct SeaRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> SeaRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Links a SeaORM entity to the domain type its rows convert into.
pub trait DomainEntity: EntityTrait {
    type Domain: From<Self::Model> + Send + Sync + 'static;
}

type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

#[async_trait]
impl<E> BaseRepository<E::Domain, PrimaryKeyOf<E>> for SeaRepository<E>
where
    E: DomainEntity,
    E::Model: Send + Sync,
    PrimaryKeyOf<E>: Send + Sync + 'static,
{
    async fn find_by_id(&self, id: PrimaryKeyOf<E>) -> Result<Option<E::Domain>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: PrimaryKeyOf<E>) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

pub(crate) fn query_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// Like [`query_err`], but reports unique-key violations as constraint errors.
pub(crate) fn write_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepoError::Constraint(detail),
        _ => query_err(err),
    }
}
