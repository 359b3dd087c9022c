//! Authentication routes
//!
//! Provides endpoints for user registration and login.

use crate::error::ApiResult;
use crate::state::AppState;
use auth_api_shared::{AuthResponse, LoginRequest, RegisterRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    let response = state.auth().register(req).await?;
    Ok(Json(response))
}

/// Login with email, username or mobile
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(req) = payload?;
    let response = state.auth().login(req).await?;
    Ok(Json(response))
}
