//! Request-scoped sessions and the session cookie

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};

use crate::auth::jwt::Claims;
use crate::error::{Error, Result};

const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// The verified caller of a request, produced by the auth gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    /// Unix timestamp the token expires at
    pub expires_at: i64,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.uid,
            username: claims.user,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

impl Session {
    /// Require the caller's role to be one of `allowed` (case-sensitive)
    pub fn authorize(&self, allowed: &[&str]) -> Result<()> {
        authorize_user(&self.role, allowed)
    }
}

pub fn authorize_user(role: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(Error::UserNotAuthorized)
    }
}

/// `Set-Cookie` value carrying a freshly issued token
pub fn session_cookie(name: &str, token: &str, ttl_secs: i64) -> String {
    let expires = Utc::now() + chrono::Duration::seconds(ttl_secs);
    build_cookie(name, token, expires, ttl_secs)
}

/// `Set-Cookie` value that clears the session on the client
pub fn expired_cookie(name: &str) -> String {
    build_cookie(name, "", DateTime::<Utc>::default(), 0)
}

fn build_cookie(name: &str, value: &str, expires: DateTime<Utc>, max_age: i64) -> String {
    format!(
        "{}={}; Path=/; Expires={}; Max-Age={}; HttpOnly; Secure; SameSite=Strict",
        name,
        value,
        expires.format(COOKIE_DATE_FORMAT),
        max_age
    )
}

/// Find a cookie by name across all `Cookie` headers
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_authorize_user() {
        assert!(authorize_user("admin", &["admin", "manager", "exec"]).is_ok());
        assert!(authorize_user("Admin", &["admin", "manager", "exec"]).is_err());
        assert!(matches!(
            authorize_user("student", &["admin"]),
            Err(Error::UserNotAuthorized)
        ));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("Bearer", "abc.def.ghi", 3600);
        assert!(cookie.starts_with("Bearer=abc.def.ghi;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_expired_cookie() {
        let cookie = expired_cookie("Bearer");
        assert!(cookie.starts_with("Bearer=;"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_cookie_value_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; Bearer=tok.en.value; other=1"),
        );
        assert_eq!(cookie_value(&headers, "Bearer"), Some("tok.en.value"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_session_from_claims() {
        let claims = Claims::new(4, "jo", "manager", 60);
        let exp = claims.exp;
        let session = Session::from(claims);
        assert_eq!(session.user_id, 4);
        assert_eq!(session.username, "jo");
        assert_eq!(session.expires_at, exp);
        assert!(session.authorize(&["manager"]).is_ok());
    }
}
