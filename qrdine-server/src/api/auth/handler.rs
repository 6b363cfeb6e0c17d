//! Owner Auth API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Owner, OwnerLogin, OwnerRegister};

use crate::auth::{create_token, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, owner};

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub owner: Owner,
}

/// POST /api/auth/register - 注册商户账户
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<OwnerRegister>,
) -> AppResult<Json<AuthResponse>> {
    let email = payload.email.trim().to_lowercase();

    // Validate
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Invalid email"));
    }
    if payload.password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }
    let name = payload.name.trim();
    if name.len() < 2 {
        return Err(AppError::validation("Name must be at least 2 characters"));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hash error: {e}");
        AppError::internal("Failed to process password")
    })?;

    let created = match owner::create(&state.pool, &email, &password_hash, name).await {
        Ok(o) => o,
        Err(RepoError::Duplicate(_)) => return Err(AppError::new(ErrorCode::EmailExists)),
        Err(e) => return Err(e.into()),
    };

    let token = issue_token(&state, &created)?;
    tracing::info!(owner_id = created.id, email = %created.email, "Owner registered");

    Ok(Json(AuthResponse {
        token,
        owner: created,
    }))
}

/// POST /api/auth/login - 商户登录
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<OwnerLogin>,
) -> AppResult<Json<AuthResponse>> {
    let email = payload.email.trim().to_lowercase();

    let Some(row) = owner::find_auth_by_email(&state.pool, &email).await? else {
        return Err(AppError::invalid_credentials());
    };
    if !verify_password(&payload.password, &row.password_hash) {
        return Err(AppError::invalid_credentials());
    }

    let account: Owner = row.into();
    let token = issue_token(&state, &account)?;
    tracing::info!(owner_id = account.id, "Owner logged in");

    Ok(Json(AuthResponse {
        token,
        owner: account,
    }))
}

fn issue_token(state: &ServerState, account: &Owner) -> Result<String, AppError> {
    create_token(account.id, &account.email, &state.config.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::internal("Failed to issue token")
    })
}
