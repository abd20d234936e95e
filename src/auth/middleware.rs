//! Session gate applied to every route except login

use crate::auth::session::cookie_value;
use crate::auth::{validate_token, Session};
use crate::config::AuthConfig;
use crate::error::{Error, Result};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Verify the session cookie of a request
pub fn extract_session_from_request(req: &Request, auth: &AuthConfig) -> Result<Session> {
    let token = cookie_value(req.headers(), &auth.cookie_name)
        .filter(|token| !token.is_empty())
        .ok_or(Error::MissingToken)?;
    validate_token(token, auth).map(Session::from)
}

/// Middleware rejecting requests without a valid session. On success the
/// [`Session`] is attached to the request extensions.
pub async fn require_auth(
    State(auth): State<AuthConfig>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let session = extract_session_from_request(&req, &auth).inspect_err(|e| {
        tracing::debug!("Rejected {} {}: {}", req.method(), req.uri().path(), e);
    })?;
    tracing::trace!(
        "Session for {} ({}) valid until {}",
        session.username,
        session.role,
        session.expires_at
    );
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
