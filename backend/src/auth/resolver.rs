//! Per-request identity resolution
//!
//! Composes credential extraction, token verification, and a user-store
//! lookup into an authenticated identity. Runs fresh on every protected
//! request with exactly one store read and no caching, so deactivating an
//! account takes effect on the very next request.

use crate::auth::extract::{extract_token, ExtractedToken};
use crate::auth::token::{TokenCodec, TokenError};
use crate::error::ApiError;
use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use thiserror::Error;
use ticketly_shared::models::User;
use tracing::debug;

/// User lookup collaborator
///
/// The store is the only external dependency of the resolver; keeping it
/// behind a trait lets the pipeline be tested without a database.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
}

/// Identity produced for a single request. Never cached.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub user: User,
}

impl AuthenticatedIdentity {
    #[inline]
    pub fn email(&self) -> &str {
        &self.user.email
    }
}

/// Terminal failure states of the resolution pipeline
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential on the request at all
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A token was presented but did not verify. The failure kind is kept
    /// for logging; callers see one undifferentiated message so the
    /// response can't be used as an oracle.
    #[error("Could not validate credentials")]
    InvalidToken(TokenError),

    /// Token verified but its subject no longer exists (e.g. the user was
    /// deleted after issuance)
    #[error("User not found")]
    UnknownSubject,

    /// Valid identity, deactivated account
    #[error("Inactive user")]
    Inactive,

    /// The user store itself failed; an infrastructure problem, not an
    /// authentication outcome
    #[error("user store unavailable")]
    StoreUnavailable(#[source] anyhow::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => ApiError::unauthorized("Not authenticated"),
            AuthError::InvalidToken(_) => ApiError::unauthorized("Could not validate credentials"),
            AuthError::UnknownSubject => ApiError::Unauthorized {
                message: "User not found".to_string(),
                challenge: false,
            },
            AuthError::Inactive => ApiError::Forbidden("Inactive user".to_string()),
            AuthError::StoreUnavailable(e) => ApiError::Dependency(e),
        }
    }
}

/// Resolve the request's identity at time `now`
///
/// Pipeline: extract credential → verify token → look up subject → check
/// the active flag. Exactly one store read per invocation.
pub async fn resolve_identity(
    store: &dyn UserStore,
    codec: &TokenCodec,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> Result<AuthenticatedIdentity, AuthError> {
    let Some(extracted) = extract_token(headers) else {
        return Err(AuthError::NotAuthenticated);
    };

    let source = match &extracted {
        ExtractedToken::Cookie(_) => "cookie",
        ExtractedToken::Bearer(_) => "bearer",
    };

    let subject = codec
        .verify(&extracted.into_inner(), now)
        .map_err(|kind| {
            debug!(%kind, source, "token verification failed");
            AuthError::InvalidToken(kind)
        })?;

    let user = store
        .find_by_email(&subject)
        .await
        .map_err(AuthError::StoreUnavailable)?
        .ok_or(AuthError::UnknownSubject)?;

    if !user.is_active {
        return Err(AuthError::Inactive);
    }

    Ok(AuthenticatedIdentity { user })
}
