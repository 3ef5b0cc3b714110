//! Request credential extraction
//!
//! Pulls a candidate session token out of a request: the `access_token`
//! cookie first, then the `Authorization: Bearer` header. When a client
//! sends both, the cookie's subject wins.

use axum::http::{header, HeaderMap};

/// Cookie name carrying the session token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// A token found on the request, tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedToken {
    Cookie(String),
    Bearer(String),
}

impl ExtractedToken {
    /// The raw token string
    pub fn into_inner(self) -> String {
        match self {
            Self::Cookie(token) | Self::Bearer(token) => token,
        }
    }
}

/// Extract a candidate token from request headers, cookie first
pub fn extract_token(headers: &HeaderMap) -> Option<ExtractedToken> {
    if let Some(token) = cookie_token(headers) {
        return Some(ExtractedToken::Cookie(token));
    }
    bearer_token(headers).map(ExtractedToken::Bearer)
}

/// Read the session token from the Cookie header, if present
fn cookie_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == ACCESS_TOKEN_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Read a bearer token from the Authorization header, if present
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
