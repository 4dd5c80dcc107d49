//! Request extractors: bearer authentication and JSON bodies

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use daytimer_core::{Caller, PermissionMatrix};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated caller, any role
pub struct AuthUser {
    pub caller: Caller,
    pub token: String,
}

/// An authenticated administrator
pub struct AdminUser(pub Caller);

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthenticated)?;
        let caller = state.resolve_caller(token).await?;
        Ok(Self {
            caller,
            token: token.to_string(),
        })
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser { caller, .. } = AuthUser::from_request_parts(parts, state).await?;
        PermissionMatrix::require_admin(&caller)?;
        Ok(Self(caller))
    }
}

/// JSON request body. An empty body reads as `{}`, so payloads made only of
/// optional fields may be omitted; malformed bodies are rejected with 400.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        serde_json::from_slice(body)
            .map(Payload)
            .map_err(|e| ApiError::Validation(format!("Requête invalide : {e}")))
    }
}
