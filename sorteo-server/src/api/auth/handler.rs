//! Authentication Handlers
//!
//! Handles admin login, session inspection and logout.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::ApiResponse;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: String,
    pub role: String,
}

/// Login handler
///
/// Verifies the admin password and returns a session token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let session = state.auth.login(&req.password)?;

    tracing::info!("Admin logged in");
    Ok(Json(ApiResponse::ok(LoginResponse {
        token: session.token,
        expires_in: session.expires_in,
    })))
}

/// Get current session info
pub async fn me(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<SessionInfo>>, AppError> {
    Ok(Json(ApiResponse::ok(SessionInfo {
        id: user.id,
        role: user.role,
    })))
}

/// Logout handler
///
/// Tokens are stateless; logout only exists so the client can log the
/// end of the session server-side.
pub async fn logout(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    tracing::info!(user_id = %user.id, "Admin logged out");
    Ok(Json(ApiResponse::ok(())))
}
