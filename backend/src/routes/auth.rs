//! Authentication routes
//!
//! Registration, login, logout, and the current-user endpoint. Login
//! stores the session token in an HTTP-only cookie and also returns it
//! in the body for non-browser clients.

use crate::auth::{CurrentUser, ACCESS_TOKEN_COOKIE};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ticketly_shared::types::{LoginRequest, LogoutResponse, RegisterRequest, UserResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Session cookie value for a freshly issued token
fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ACCESS_TOKEN_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Cookie value that clears the session
fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        ACCESS_TOKEN_COOKIE
    )
}

/// Register a new user
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = UserService::register(&state.db, &req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Response> {
    let session =
        UserService::login(&state.db, state.tokens(), &req.email, &req.password).await?;

    let cookie = session_cookie(
        &session.access_token,
        session.expires_in,
        state.config.auth.cookie_secure,
    );

    let mut response = Json(session).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| anyhow::anyhow!("Invalid cookie value: {}", e))?,
    );
    Ok(response)
}

/// Logout by clearing the session cookie
///
/// POST /api/v1/auth/logout
async fn logout() -> ApiResult<Response> {
    let mut response = Json(LogoutResponse {
        message: "Successfully logged out".to_string(),
    })
    .into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&clear_session_cookie())
            .map_err(|e| anyhow::anyhow!("Invalid cookie value: {}", e))?,
    );
    Ok(response)
}

/// Get the current authenticated user
///
/// GET /api/v1/auth/me
async fn me(current: CurrentUser) -> ApiResult<Json<UserResponse>> {
    Ok(Json(UserResponse::from(current.user().clone())))
}
