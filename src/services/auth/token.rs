/*
 * Responsibility
 * - Bearer で受け取った access token (HS256 JWT) の署名/exp 検証と claims の decode
 * - 期限切れとそれ以外の検証失敗を TokenError で区別する (middleware で error code を分ける)
 * - userId の有無判定は claims 側 (AccessClaims::user_id) に置く
 */
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by access-token verification.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("jwt verification failed: {0}")]
    Jwt(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Jwt(e),
        }
    }
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `userId` is kept as a raw JSON value; tokens in the wild carry it as a string
///   (ObjectId hex) but numbers have been seen too. `user_id()` decides what counts.
/// - `exp` is optional; when present, `Validation` rejects it once passed. The claim is not kept here.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    #[serde(default, rename = "userId")]
    pub user_id: serde_json::Value,
}

impl AccessClaims {
    /// Non-empty string or non-zero number; everything else (null, "", 0, false, objects)
    /// means the token does not name a user. Whitespace-only strings are rejected here
    /// too: no stored id is blank, so they could only ever end in an unknown subject.
    pub fn user_id(&self) -> Option<String> {
        match &self.user_id {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => {
                Some(n.to_string())
            }
            _ => None,
        }
    }
}

/// HS256 access-token verifier keyed by the shared signing secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // exp is checked when present but not required
        validation.required_spec_claims.remove("exp");
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature + `exp`, then decode the claim set.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }
}
