use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AppError, AuthError};
use crate::AppState;

/// Token from an `Authorization: Bearer ...` header, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Username of the caller's live session, or `401`.
pub async fn require_user(req: &HttpRequest, state: &AppState) -> Result<String, AppError> {
    state.sessions.require(bearer_token(req)).await
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub username: Option<String>,
}

pub async fn register(
    req: web::Json<CredentialsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received sign-up request for username: {}", req.username);

    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::ValidationError(
            "username and password must not be empty".into(),
        ));
    }
    if req.username.trim() != req.username {
        return Err(AppError::ValidationError(
            "username must not start or end with whitespace".into(),
        ));
    }

    if !state.credentials.create(&req.username, &req.password).await? {
        warn!("Sign-up rejected, username already exists: {}", req.username);
        return Err(AuthError::UsernameTaken.into());
    }

    info!("Account created for username: {}", req.username);
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Account created successfully! Please log in."
    })))
}

pub async fn login(
    req: web::Json<CredentialsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match state
        .sessions
        .login(&state.credentials, &req.username, &req.password)
        .await
    {
        Ok(token) => {
            info!("Login successful for username: {}", req.username);
            Ok(HttpResponse::Ok().json(AuthResponse {
                token,
                username: req.username.clone(),
            }))
        }
        Err(e) => {
            warn!("Login failed for username: {}: {}", req.username, e);
            Err(e)
        }
    }
}

pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req).ok_or(AuthError::Unauthorized)?;

    state.sessions.logout(token).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully logged out"
    })))
}

pub async fn session(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let session = state.sessions.resolve(bearer_token(&req)).await;
    HttpResponse::Ok().json(SessionResponse {
        authenticated: session.is_authenticated(),
        username: session.username().map(str::to_string),
    })
}
