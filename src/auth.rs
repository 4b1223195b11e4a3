use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    repository::RepositoryState,
};

/// Claims
///
/// Represents the standard payload structure expected inside a JSON Web Token (JWT).
/// These claims are signed by the Auth provider's secret and validated upon every
/// authenticated request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): The UUID of the user. This is the primary key used to fetch
    /// the user's profile from the public.profiles table.
    pub sub: Uuid,
    /// Expiration Time (exp): Timestamp after which the JWT must not be accepted.
    pub exp: usize,
    /// Issued At (iat): Timestamp when the JWT was issued.
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of an authenticated request. Handlers take this as an
/// argument to obtain the acting user's ID; its presence alone is the session
/// gate for the admin routes.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The unique identifier of the user, mapped to auth.users.id and public.profiles.id.
    pub id: Uuid,
    /// The user's email, resolved from the profile record.
    pub email: String,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a function
/// argument in any session-gated handler. Authentication is thereby owned by the
/// router layer once, rather than re-derived inside each handler.
///
/// The process:
/// 1. Dependency Resolution: Accessing Repository and AppConfig from the application state.
/// 2. Local Bypass: Allowing development-time access using the 'x-user-id' header.
/// 3. Token Validation: Standard Bearer token extraction and JWT decoding.
/// 4. DB Lookup: Fetching the user's profile from PostgreSQL.
///
/// Rejection: Returns StatusCode::UNAUTHORIZED (401) on any failure. For the
/// browser client this is the redirect-to-login signal.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Dependency Resolution
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        // 2. Local Development Bypass Check
        // In Env::Local, a known user UUID in the 'x-user-id' header authenticates
        // the request, provided it maps to an actual profile row. Guarded by the
        // Env check so it can never activate in production.
        if config.env == Env::Local {
            if let Some(user_id_header) = parts.headers.get("x-user-id") {
                if let Ok(id_str) = user_id_header.to_str() {
                    if let Ok(user_id) = Uuid::parse_str(id_str) {
                        if let Some(user) = repo.get_user(user_id).await {
                            return Ok(AuthUser {
                                id: user.id,
                                email: user.email,
                            });
                        }
                    }
                }
            }
        }
        // If Env is Production, or the bypass failed, execution falls through to
        // the standard JWT validation flow.

        // 3. Token Extraction
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // 4. JWT Decoding Setup
        let secret = &config.jwt_secret;
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();

        // Ensure expiration time validation is always active.
        validation.validate_exp = true;

        // 5. Decode and Validate the Token
        let token_data = match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                match e.kind() {
                    // Token expired: the most common failure for a valid-but-old token.
                    ErrorKind::ExpiredSignature => return Err(StatusCode::UNAUTHORIZED),
                    // All other failure types (bad signature, malformed token, etc.).
                    _ => return Err(StatusCode::UNAUTHORIZED),
                }
            }
        };

        let user_id = token_data.claims.sub;

        // 6. Database Lookup (Final Verification)
        // Confirms the user still exists. This prevents access if the account was
        // deleted after the token was issued.
        let user = repo
            .get_user(user_id)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }
}
