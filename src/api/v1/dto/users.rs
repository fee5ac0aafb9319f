/*
 * Responsibility
 * - Users の response DTO
 * - repo の User をそのまま JSON にしない (列名と API のフィールド名を分ける)
 */
use serde::Serialize;

use crate::repos::User;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
        }
    }
}
