//! User service for registration and login
//!
//! Password hashing and verification run on the blocking thread pool;
//! token signing uses the pre-built codec from AppState.

use crate::auth::{PasswordService, TokenCodec};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use chrono::Utc;
use sqlx::PgPool;
use ticketly_shared::types::{SessionResponse, UserResponse};
use ticketly_shared::validation;
use validator::ValidateEmail;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user account
    ///
    /// Duplicate email is a `Conflict`, deliberately distinct from any
    /// authentication failure.
    pub async fn register(
        pool: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, ApiError> {
        if !email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
        validation::validate_password(password).map_err(ApiError::Validation)?;

        if UserRepository::email_exists(pool, email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, email, &password_hash)
            .await
            .map_err(ApiError::Internal)?;

        Ok(UserResponse {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
        })
    }

    /// Verify credentials and issue a session token
    ///
    /// Unknown email and wrong password produce the same response, so the
    /// endpoint cannot be used to probe which addresses are registered.
    pub async fn login(
        pool: &PgPool,
        codec: &TokenCodec,
        email: &str,
        password: &str,
    ) -> Result<SessionResponse, ApiError> {
        let user = UserRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?;

        let Some(user) = user else {
            return Err(ApiError::unauthorized("Incorrect email or password"));
        };

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::unauthorized("Incorrect email or password"));
        }

        if !user.is_active {
            return Err(ApiError::Forbidden("Inactive user account".to_string()));
        }

        let access_token = codec
            .issue(&user.email, Utc::now())
            .map_err(ApiError::Internal)?;

        Ok(SessionResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: codec.ttl_secs(),
            user: UserResponse {
                id: user.id,
                email: user.email,
                is_active: user.is_active,
                created_at: user.created_at,
            },
        })
    }
}
