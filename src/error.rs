/*
 * Responsibility
 * - 認証まわりの拒否理由 (AuthError) と error code カタログの定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - どの拒否理由も同じ JSON 形 {message, statusCode, errorCode} で返す
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::token::TokenError;

/// Machine-readable codes returned in `errorCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UserNotAuthorized,
    InvalidToken,
    TokenExpired,
    RequestTimeout,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserNotAuthorized => "USER_NOT_AUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::RequestTimeout => "REQUEST_TIMEOUT",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::UserNotAuthorized => "User is not authorized to access this resource",
            Self::InvalidToken => "Invalid or malformed token",
            Self::TokenExpired => "Token has expired",
            Self::RequestTimeout => "Request timed out",
            Self::InternalServerError => "Internal server error",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: &'static str,
    pub status_code: u16,
    pub error_code: ErrorCode,
}

/// `{message, statusCode, errorCode}` with the catalog message for `code`.
pub fn error_response(status: StatusCode, code: ErrorCode) -> Response {
    let body = ErrorResponse {
        message: code.message(),
        status_code: status.as_u16(),
        error_code: code,
    };

    (status, Json(body)).into_response()
}

/// Every way a request can be turned away by the access middleware.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingCredential,

    #[error("malformed authorization header")]
    MalformedCredential,

    #[error(transparent)]
    TokenInvalid(#[from] TokenError),

    #[error("token carries no user id")]
    MissingClaim,

    #[error("no user for token subject")]
    UnknownSubject,

    #[error("user role is not authorized")]
    UnauthorizedRole,

    #[error("user lookup failed")]
    Lookup(#[from] RepoError),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::MalformedCredential | Self::TokenInvalid(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::MissingClaim | Self::UnknownSubject | Self::UnauthorizedRole => {
                StatusCode::FORBIDDEN
            }
            Self::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingCredential | Self::UnauthorizedRole => ErrorCode::UserNotAuthorized,
            Self::TokenInvalid(TokenError::Expired) => ErrorCode::TokenExpired,
            Self::MalformedCredential
            | Self::TokenInvalid(_)
            | Self::MissingClaim
            | Self::UnknownSubject => ErrorCode::InvalidToken,
            Self::Lookup(_) => ErrorCode::InternalServerError,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        tracing::debug!(
            status = status.as_u16(),
            code = code.as_str(),
            reason = %self,
            "request rejected"
        );

        error_response(status, code)
    }
}
