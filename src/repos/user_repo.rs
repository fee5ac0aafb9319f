/*
 * Responsibility
 * - access middleware が使う「id からユーザーを引く」collaborator (UserRepo)
 * - Postgres 実装 (PgUserRepo) と、DB 未設定時/テスト用の InMemoryUserRepo
 * - DB エラーは RepoError で返す (拒否判断は middleware 側)
 */
use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

/// User record as the access middleware sees it.
///
/// OTP columns are not selected here; nothing downstream of the middleware reads them.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    #[sqlx(rename = "userId")]
    pub id: String,
    pub email: Option<String>,
    #[sqlx(rename = "userName")]
    pub name: Option<String>,
    pub role: Option<String>,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// `Ok(None)` when no user has this id.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, RepoError> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT "userId", "email", "userName", "role"
            FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}

/// Read-only store keyed by user id.
#[derive(Clone, Debug, Default)]
pub struct InMemoryUserRepo {
    users: HashMap<String, User>,
}

impl InMemoryUserRepo {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users.get(user_id).cloned())
    }
}
