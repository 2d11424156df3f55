//! Admin login and token verification.

use axum::extract::State;
use axum::Json;
use sendloop_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
}

/// POST /api/v1/auth/login
///
/// Authenticate the admin and issue an access token. Email and password
/// failures are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let config = &state.config;

    let email_matches = input.email == config.admin_email;
    let password_matches = verify_password(&input.password, &config.admin_password_hash);

    if !email_matches || !password_matches {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Incorrect email or password".into(),
        )));
    }

    let token = generate_access_token(&input.email, &config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to sign token: {e}")))?;

    tracing::info!(email = %input.email, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        token_type: "bearer",
    }))
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub email: String,
}

/// GET /api/v1/auth/verify
///
/// Confirm the presented token is valid.
pub async fn verify(admin: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        email: admin.email,
    })
}
