//! Authentication and authorization subsystem
//!
//! Credential hashing, token issue/verify, request credential extraction,
//! and the per-request identity resolution pipeline.

mod extract;
mod middleware;
mod password;
mod resolver;
mod token;

pub use extract::{extract_token, ExtractedToken, ACCESS_TOKEN_COOKIE};
pub use middleware::CurrentUser;
pub use password::PasswordService;
pub use resolver::{resolve_identity, AuthError, AuthenticatedIdentity, UserStore};
pub use token::{Claims, TokenCodec, TokenError};
