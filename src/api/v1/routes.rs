/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、/me 以下は access middleware の内側
 * - Bearer が必要な範囲は route_layer で決める (未定義パスは 401 ではなく 404)
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{health::health, me::me};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/me", get(me));
    let protected = access::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}
