// SPDX-License-Identifier: MIT

//! Signup, login, and user listing routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::UserView;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/users", get(list_users))
}

/// Signup request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "userName is required"))]
    pub user_name: String,
    #[validate(email(message = "userEmail must be a valid email address"))]
    pub user_email: String,
    #[validate(length(min = 8, message = "userPassword must be at least 8 characters"))]
    pub user_password: String,
    #[validate(length(min = 1, message = "userPhone is required"))]
    pub user_phone: String,
}

/// Signup response: session token plus the public user view.
#[derive(Serialize)]
pub struct SignupResponse {
    pub token: String,
    pub user: UserView,
}

/// Create a new user account.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = state
        .auth_service
        .signup(
            payload.user_name,
            payload.user_email,
            payload.user_password,
            payload.user_phone,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            token: outcome.token,
            user: outcome.user,
        }),
    ))
}

/// Login request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "userEmail must be a valid email address"))]
    pub user_email: String,
    #[validate(length(min = 1, message = "userPassword is required"))]
    pub user_password: String,
}

/// Login response: session token plus the role claim (always null in this
/// data model).
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Option<String>,
}

/// Authenticate an existing user.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = state
        .auth_service
        .login(payload.user_email, payload.user_password)
        .await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        role: outcome.role,
    }))
}

/// Response for the user listing endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub user_data: Vec<UserView>,
}

/// List all users (public views only).
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<UsersResponse>> {
    let user_data = state.auth_service.list_users().await?;
    Ok(Json(UsersResponse { user_data }))
}
