/*
 * Responsibility
 * - 環境変数 (.env.<NODE_ENV> → .env → process env) から Config を一度だけ組み立てる
 * - 設定値のバリデーション (JWT_SECRET 未設定などは起動失敗)
 * - 全ルート共通の HTTP 制限 (HttpLimits: body サイズ上限 / タイムアウト) もここで読む
 * - 起動後は不変。middleware へは AppState 経由で渡す
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::services::auth::ValidRoles;

pub const DEFAULT_PORT: u16 = 3005;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_JWT_SHORT_EXPIRY: &str = "24h";
pub const DEFAULT_JWT_LONG_EXPIRY: &str = "7d";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_HOST: &str = "http://localhost:3005";
pub const API_BASE_URL: &str = "/api";
pub const DEFAULT_REQUEST_BODY_LIMIT_BYTES: usize = 64 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Test,
    Production,
}

impl AppEnv {
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Default)]
pub struct EmailConfig {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Limits applied to every request by `middleware::http`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpLimits {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for HttpLimits {
    fn default() -> Self {
        Self {
            body_limit_bytes: DEFAULT_REQUEST_BODY_LIMIT_BYTES,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub addr: SocketAddr,

    // Raw NODE_ENV value; also selects the `.env.<name>` file
    pub environment: String,
    pub app_env: AppEnv,

    pub database_url: Option<String>,
    pub email: EmailConfig,

    pub jwt_short_expiry: String,
    pub jwt_long_expiry: String,
    pub jwt_short_ttl: Duration,
    pub jwt_long_ttl: Duration,

    pub api_version: String,
    pub api_base_path: String,
    pub host: String,
    pub http: HttpLimits,

    pub jwt_secret: String,
    pub valid_roles: ValidRoles,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("addr", &self.addr)
            .field("environment", &self.environment)
            .field("app_env", &self.app_env)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("email", &self.email)
            .field("jwt_short_expiry", &self.jwt_short_expiry)
            .field("jwt_long_expiry", &self.jwt_long_expiry)
            .field("api_version", &self.api_version)
            .field("api_base_path", &self.api_base_path)
            .field("host", &self.host)
            .field("http", &self.http)
            .field("jwt_secret", &"<redacted>")
            .field("valid_roles", &self.valid_roles)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("NODE_ENV").unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
        load_env_files_from(Path::new("."), &environment);

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Resolve every setting through `lookup`. Blank values count as unset.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let environment = var("NODE_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let app_env = AppEnv::parse(&environment);

        let database_url = var("MONGO_URL");

        let email = EmailConfig {
            user: var("EMAIL_USER"),
            password: var("EMAIL_PASSWORD"),
        };

        let jwt_short_expiry =
            var("JWT_SHORT_EXPIRY").unwrap_or_else(|| DEFAULT_JWT_SHORT_EXPIRY.to_string());
        let jwt_short_ttl =
            parse_expiry(&jwt_short_expiry).ok_or(ConfigError::Invalid("JWT_SHORT_EXPIRY"))?;

        let jwt_long_expiry =
            var("JWT_LONG_EXPIRY").unwrap_or_else(|| DEFAULT_JWT_LONG_EXPIRY.to_string());
        let jwt_long_ttl =
            parse_expiry(&jwt_long_expiry).ok_or(ConfigError::Invalid("JWT_LONG_EXPIRY"))?;

        let api_version = var("API_VERSION")
            .map(|v| v.trim().trim_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        if api_version.is_empty() || api_version.contains('/') {
            return Err(ConfigError::Invalid("API_VERSION"));
        }
        let api_base_path = format!("{API_BASE_URL}/{api_version}");

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        url::Url::parse(&host).map_err(|_| ConfigError::Invalid("HOST"))?;

        let body_limit_bytes = match var("REQUEST_BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => DEFAULT_REQUEST_BODY_LIMIT_BYTES,
        };
        let request_timeout = parse_expiry(
            &var("REQUEST_TIMEOUT").unwrap_or_else(|| DEFAULT_REQUEST_TIMEOUT.to_string()),
        )
        .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT"))?;
        let http = HttpLimits {
            body_limit_bytes,
            request_timeout,
        };

        // No placeholder fallback: tokens signed with a well-known secret are forgeable
        let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let valid_roles = var("VALID_ROLES")
            .map(|v| ValidRoles::parse(&v))
            .unwrap_or_default();
        if valid_roles.is_empty() {
            return Err(ConfigError::Invalid("VALID_ROLES"));
        }

        Ok(Self {
            port,
            addr,
            environment,
            app_env,
            database_url,
            email,
            jwt_short_expiry,
            jwt_long_expiry,
            jwt_short_ttl,
            jwt_long_ttl,
            api_version,
            api_base_path,
            host,
            http,
            jwt_secret,
            valid_roles,
        })
    }
}

/// Merge `<dir>/.env.<environment>` and then `<dir>/.env` into the process environment.
///
/// Variables already present in the process take precedence over both files, and the
/// environment-specific file wins over `.env`. Missing files are skipped silently.
pub fn load_env_files_from(dir: &Path, environment: &str) {
    for file in [format!(".env.{environment}"), ".env".to_string()] {
        let path = dir.join(&file);
        match dotenvy::from_path(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded environment file"),
            Err(err) if err.not_found() => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "failed to load environment file")
            }
        }
    }
}

/// Parse a token lifetime such as `"24h"`, `"7d"` or `"90"` (seconds).
///
/// Units: `ms`, `s`, `m`, `h`, `d`, `w`, `y` plus their long spellings. Zero is rejected.
pub fn parse_expiry(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let amount: u64 = digits.parse().ok()?;
    if amount == 0 {
        return None;
    }

    let millis_per_unit: u64 = match unit.trim().to_ascii_lowercase().as_str() {
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1,
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1_000,
        "m" | "min" | "mins" | "minute" | "minutes" => 60_000,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000,
        "d" | "day" | "days" => 86_400_000,
        "w" | "week" | "weeks" => 604_800_000,
        "y" | "yr" | "yrs" | "year" | "years" => 31_557_600_000,
        _ => return None,
    };

    amount.checked_mul(millis_per_unit).map(Duration::from_millis)
}
