//! Request authentication extractor
//!
//! `CurrentUser` is the explicit composition of the auth pipeline for
//! axum handlers: extract credential → verify token → load user → check
//! active flag, all against the prebuilt codec in `AppState`.

use crate::auth::resolver::{resolve_identity, AuthenticatedIdentity};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::request::Parts,
};
use chrono::Utc;

/// Authenticated user for a protected handler
///
/// Resolution runs on every request; there is no session cache, so a
/// deactivated account is locked out on its next request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedIdentity);

impl CurrentUser {
    #[inline]
    pub fn user(&self) -> &ticketly_shared::models::User {
        &self.0.user
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let identity = resolve_identity(
            &app_state.db,
            app_state.tokens(),
            &parts.headers,
            Utc::now(),
        )
        .await?;

        Ok(CurrentUser(identity))
    }
}
