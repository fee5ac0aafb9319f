/*
 * Responsibility
 * - AuthUser の FromRequestParts 実装 (extensions から取り出すだけ、検証はしない)
 */
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AuthError;
use crate::state::AppState;

use super::AuthUser;

/// Handler で AuthUser を受け取るための extractor
/// middleware が AuthUser を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 USER_NOT_AUTHORIZED（ミドルウェア未設定のルート）
pub struct AuthUserExtractor(pub AuthUser);

impl FromRequestParts<AppState> for AuthUserExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(AuthUserExtractor)
            .ok_or(AuthError::MissingCredential)
    }
}
