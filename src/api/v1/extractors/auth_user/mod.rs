/*!
 * Authenticated user extractor
 *
 * Responsibility:
 * - access middleware が解決したユーザー（AuthUser）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AuthUser
 * - AuthUserExtractor
 */

mod core;
mod types;

pub use self::core::AuthUserExtractor;
pub use self::types::AuthUser;
