//! Double-submit CSRF protection for state-changing endpoints.
//!
//! Clients fetch a token from `GET /api/auth/csrf`, which sets it as a cookie
//! and returns it in the body. Every unsafe request must then echo the token
//! in the `x-csrf-token` header. A missing or mismatched pair is rejected
//! with HTTP 400 and a description of what went wrong.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use loco_rs::controller::ErrorDetail;
use loco_rs::prelude::*;
use uuid::Uuid;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Extractor that proves the request carried a matching token pair.
/// Handlers guard themselves by taking a `CsrfGuard` argument.
#[derive(Debug)]
pub struct CsrfGuard;

/// Mints a fresh token for the issuing endpoint.
#[must_use]
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

fn csrf_failure(description: &str) -> Error {
    Error::CustomError(
        StatusCode::BAD_REQUEST,
        ErrorDetail::new("csrf_failure", description),
    )
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let header = parts.headers.get(axum::http::header::COOKIE)?;
    let raw = header.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

impl<S> FromRequestParts<S> for CsrfGuard
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_token = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| csrf_failure("The CSRF token is missing."))?;

        let cookie_token = cookie_value(parts, CSRF_COOKIE)
            .ok_or_else(|| csrf_failure("The CSRF session token is missing."))?;

        if header_token != cookie_token {
            return Err(csrf_failure("The CSRF tokens do not match."));
        }

        Ok(Self)
    }
}
