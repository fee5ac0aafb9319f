/*
 * Responsibility
 * - unit test 共通の fixture (token 発行, ユーザー, AppState, 失敗する UserRepo)
 */
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header};

use crate::repos::{InMemoryUserRepo, User, UserRepo, error::RepoError};
use crate::services::auth::{TokenVerifier, ValidRoles};
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";

pub fn now() -> u64 {
    jsonwebtoken::get_current_timestamp()
}

pub fn mint_token(secret: &str, claims: serde_json::Value) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn user(id: &str, role: Option<&str>) -> User {
    User {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        name: None,
        role: role.map(str::to_string),
    }
}

pub fn state_with(users: Arc<dyn UserRepo>) -> AppState {
    AppState::new(
        Arc::new(TokenVerifier::new(TEST_SECRET)),
        users,
        Arc::new(ValidRoles::parse("admin,member")),
    )
}

pub fn state_with_users(users: impl IntoIterator<Item = User>) -> AppState {
    state_with(Arc::new(InMemoryUserRepo::new(users)))
}

/// Every lookup fails as if the database were unreachable.
pub struct BrokenUserRepo;

#[async_trait]
impl UserRepo for BrokenUserRepo {
    async fn find_by_id(&self, _user_id: &str) -> Result<Option<User>, RepoError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}
