//! Admin entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use inkpost_core::domain::{Admin, StoredSession};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub session_token_digest: Option<String>,
    pub session_expires_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Admin {
    fn from(model: Model) -> Self {
        // Both session columns are written together; a half-filled pair is no session.
        let session = match (model.session_token_digest, model.session_expires_at) {
            (Some(token_digest), Some(expires_at)) => Some(StoredSession {
                token_digest,
                expires_at,
            }),
            _ => None,
        };

        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            session,
            created_at: model.created_at,
        }
    }
}

impl From<Admin> for ActiveModel {
    fn from(admin: Admin) -> Self {
        let (digest, expires_at) = match admin.session {
            Some(session) => (Some(session.token_digest), Some(session.expires_at)),
            None => (None, None),
        };

        Self {
            id: Set(admin.id),
            username: Set(admin.username),
            password_hash: Set(admin.password_hash),
            session_token_digest: Set(digest),
            session_expires_at: Set(expires_at),
            created_at: Set(admin.created_at),
        }
    }
}

impl crate::database::sea_base::DomainEntity for Entity {
    type Domain = Admin;
}
