/*
 * Responsibility
 * - GET /me : access middleware が載せたユーザーを返す
 */
use axum::Json;

use crate::api::v1::{dto::users::UserResponse, extractors::AuthUserExtractor};

pub async fn me(AuthUserExtractor(auth): AuthUserExtractor) -> Json<UserResponse> {
    tracing::debug!(user_id = %auth.id(), role = ?auth.role(), "me");
    Json(UserResponse::from(&auth.user))
}
