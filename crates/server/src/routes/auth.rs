//! Login, token verification and logout

use axum::extract::State;
use axum::Json;
use daytimer_core::credentials::{generate_token, verify_password};
use daytimer_core::{AccountProfile, AccountRepository, AuthSession, Caller, Error};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::extract::{AuthUser, Payload};
use crate::state::{run_blocking, AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AccountProfile,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: Caller,
}

pub async fn login(
    State(state): State<AppState>,
    Payload(request): Payload<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = request.email.trim().to_string();
    let lookup = email.clone();
    let found = state
        .with_db(move |db| db.find_active_account_by_email(&lookup))
        .await?;

    let password = request.password;
    let account = run_blocking(move || {
        found
            .filter(|account| verify_password(&password, &account.password_hash))
            .ok_or(Error::Authentication(email))
    })
    .await?;

    let session = AuthSession::new(account.id, generate_token(), state.config().auth.session_hours);
    let stored = session.clone();
    state
        .with_db(move |db| {
            db.create_session(&stored)?;
            db.update_last_login(stored.account_id)
        })
        .await?;

    info!(account_id = %account.id, role = account.role.as_str(), "Login");
    Ok(Json(LoginResponse {
        token: session.token,
        user: account.profile(),
    }))
}

pub async fn verify(AuthUser { caller, .. }: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user: caller,
    })
}

pub async fn logout(
    State(state): State<AppState>,
    AuthUser { caller, token }: AuthUser,
) -> Result<Json<Value>, ApiError> {
    state.with_db(move |db| db.delete_session(&token)).await?;
    info!(account_id = %caller.id, "Logout");
    Ok(Json(json!({ "success": true })))
}
