/*
 * Responsibility
 * - Config から TokenVerifier を組み立てる (JWT_SECRET の HS256 鍵)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenVerifier;

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    // Config::from_env refuses to start without a non-blank JWT_SECRET
    Arc::new(TokenVerifier::new(&config.jwt_secret))
}
