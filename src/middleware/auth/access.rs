/*
 * Responsibility
 * - access token（HS256 JWT）検証 → ユーザー解決 → role 判定 → AuthUser を extensions に入れる
 *
 * 判定順は固定で、最初に失敗したところで打ち切る:
 * 1. Authorization ヘッダがない              → 401 USER_NOT_AUTHORIZED
 * 2. `Bearer <token>` の形でない             → 401 INVALID_TOKEN
 * 3. 署名/exp の検証に失敗                   → 401 INVALID_TOKEN (期限切れは TOKEN_EXPIRED)
 * 4. claims に userId がない                 → 403 INVALID_TOKEN
 * 5. userId のユーザーが存在しない           → 403 INVALID_TOKEN
 * 6. role が ValidRoles に含まれない         → 403 USER_NOT_AUTHORIZED
 *
 * どの拒否も AuthError として同じ JSON 形で返す。
 */

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthUser;
use crate::error::AuthError;
use crate::repos::User;
use crate::services::auth::is_valid_role;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// 保護したい Router に access middleware を掛ける。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: マッチしたルートだけに掛ける (未定義パスは 404 のまま)
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authenticate(&state, req.headers()).await?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthUser::new(user));

    Ok(next.run(req).await)
}

/// Run the full check sequence against the request headers and return the resolved user.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?;
    let value = value.to_str().map_err(|_| AuthError::MalformedCredential)?;

    let token = bearer_token(value)?;

    let claims = match state.tokens.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(err.into());
        }
    };

    let user_id = claims.user_id().ok_or(AuthError::MissingClaim)?;

    let user = state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, user_id = %user_id, "user lookup failed");
            AuthError::from(err)
        })?
        .ok_or_else(|| {
            tracing::warn!(user_id = %user_id, "token subject does not exist");
            AuthError::UnknownSubject
        })?;

    if !is_valid_role(user.role.as_deref(), &state.valid_roles) {
        tracing::warn!(user_id = %user_id, role = ?user.role, "role not authorized");
        return Err(AuthError::UnauthorizedRole);
    }

    Ok(user)
}

/// `Bearer <token>`: the prefix must be exact and, once trimmed, the value must split
/// on single spaces into exactly scheme and token.
pub fn bearer_token(value: &str) -> Result<&str, AuthError> {
    if !value.starts_with(BEARER_PREFIX) {
        return Err(AuthError::MalformedCredential);
    }

    let mut segments = value.trim().split(' ');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}
