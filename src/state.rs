/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - tokens: TokenVerifier, users: UserRepo, valid_roles: ValidRoles
 * - Clone 前提で持つ (内部は Arc で Clone cheap)
 * - リクエスト中に書き換えるものは置かない
 */
use std::sync::Arc;

use crate::repos::UserRepo;
use crate::services::auth::{TokenVerifier, ValidRoles};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenVerifier>,
    pub users: Arc<dyn UserRepo>,
    pub valid_roles: Arc<ValidRoles>,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenVerifier>,
        users: Arc<dyn UserRepo>,
        valid_roles: Arc<ValidRoles>,
    ) -> Self {
        Self {
            tokens,
            users,
            valid_roles,
        }
    }
}
