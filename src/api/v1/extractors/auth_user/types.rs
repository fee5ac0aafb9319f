/*
 * Responsibility
 * - Handler から見える「認証済みユーザー」の型
 * - access middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT 検証・role 判定は middleware/services 側の責務
 * - ここに届いた時点で role は ValidRoles に含まれている
 */

use crate::repos::User;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user` は UserRepo から引いたレコードそのもの
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> Option<&str> {
        self.user.role.as_deref()
    }
}
