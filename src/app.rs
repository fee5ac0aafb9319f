/*
 * Responsibility
 * - tracing 初期化 → Config 読み込み → 依存生成 (TokenVerifier / UserRepo) → Router 組み立て
 * - API は Config::api_base_path (/api/<version>) の下に載せる
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api, config::Config, middleware, repos::build_user_repo, services::auth::build_token_verifier,
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG があればそれを優先
    // Ex: RUST_LOG=info,auth_gate_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the process so the panic is noticed
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        environment = %config.environment,
        addr = %config.addr,
        host = %config.host,
        base_path = %config.api_base_path,
        valid_roles = %config.valid_roles.iter().collect::<Vec<_>>().join(","),
        "starting API"
    );
    tracing::debug!(
        short = ?config.jwt_short_ttl,
        long = ?config.jwt_long_ttl,
        "token lifetimes"
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let tokens = build_token_verifier(config);
    let users = build_user_repo(config)?;
    let valid_roles = Arc::new(config.valid_roles.clone());

    Ok(AppState::new(tokens, users, valid_roles))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest(&config.api_base_path, api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, &config.http)
}
