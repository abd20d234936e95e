//! HTTP API tests
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot`. Every
//! request here is rejected before the handler reaches the database, so no
//! PostgreSQL server is needed.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tower::ServiceExt;

use school_manager::api::{create_router, AppState};
use school_manager::auth::jwt::encode_claims;
use school_manager::auth::{sign_token, Claims};
use school_manager::config::{AuthConfig, Config};

fn config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "api-test-secret".to_string();
    // Unroutable, so an accidental database call fails instead of hanging on a real server
    config.database.url = "host=127.0.0.1 port=1 user=nobody dbname=none connect_timeout=1".to_string();
    config
}

fn app() -> Router {
    create_router(AppState::new(config()))
}

fn auth() -> AuthConfig {
    config().auth
}

fn cookie_for(role: &str) -> String {
    let token = sign_token(1, "tester", role, &auth()).expect("token");
    format!("Bearer={}", token)
}

fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn send(req: Request<Body>) -> Response {
    app().oneshot(req).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn assert_error(response: Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    assert_eq!(body_text(response).await, message);
}

#[tokio::test]
async fn test_missing_cookie_rejected() {
    let response = send(request(Method::GET, "/students", None, None)).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "authorization cookie is missing").await;
}

#[tokio::test]
async fn test_root_requires_session() {
    let response = send(request(Method::GET, "/", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_root_greeting() {
    let cookie = cookie_for("exec");
    let response = send(request(Method::GET, "/", Some(&cookie), None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(body_text(response).await, "Hello from the root!");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let mut claims = Claims::new(1, "tester", "admin", 60);
    claims.iat -= 7200;
    claims.exp -= 3600;
    let token = encode_claims(&claims, &auth()).unwrap();
    let cookie = format!("Bearer={}", token);

    let response = send(request(Method::GET, "/teachers", Some(&cookie), None)).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "token is expired").await;
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let response = send(request(
        Method::GET,
        "/execs",
        Some("Bearer=not.a.token"),
        None,
    ))
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "invalid login token").await;
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let other = AuthConfig {
        jwt_secret: "someone-else".to_string(),
        ..Default::default()
    };
    let token = sign_token(1, "tester", "admin", &other).unwrap();
    let cookie = format!("Bearer={}", token);

    let response = send(request(Method::GET, "/students", Some(&cookie), None)).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "invalid login token").await;
}

#[tokio::test]
async fn test_unexpected_algorithm_rejected() {
    let claims = Claims::new(1, "tester", "admin", 3600);
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(auth().jwt_secret.as_bytes()),
    )
    .unwrap();
    let cookie = format!("Bearer={}", token);

    let response = send(request(Method::GET, "/students", Some(&cookie), None)).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "unexpected signing method").await;
}

#[tokio::test]
async fn test_non_integer_id() {
    let cookie = cookie_for("exec");
    for uri in ["/students/abc", "/teachers/1.5", "/execs/x"] {
        let response = send(request(Method::GET, uri, Some(&cookie), None)).await;
        assert_error(response, StatusCode::BAD_REQUEST, "invalid ID").await;
    }
}

#[tokio::test]
async fn test_invalid_sort_parameter() {
    let cookie = cookie_for("exec");
    for uri in [
        "/students?sortby=password:asc",
        "/students/?sortby=first_name:ASC",
        "/teachers?sortby=subject",
        "/execs?sortby=password:desc",
    ] {
        let response = send(request(Method::GET, uri, Some(&cookie), None)).await;
        assert_error(
            response,
            StatusCode::BAD_REQUEST,
            "invalid sort filter parameter",
        )
        .await;
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let cookie = cookie_for("exec");
    for (method, uri) in [
        (Method::POST, "/students"),
        (Method::PATCH, "/teachers/"),
        (Method::DELETE, "/students/"),
        (Method::PUT, "/teachers/3"),
        (Method::PATCH, "/execs/3"),
    ] {
        let response = send(request(method, uri, Some(&cookie), Some("{oops"))).await;
        assert_error(response, StatusCode::BAD_REQUEST, "invalid request body").await;
    }
}

#[tokio::test]
async fn test_create_with_missing_fields() {
    let cookie = cookie_for("exec");
    let body = r#"[{"first_name":"A","last_name":"B","email":"a@b.com","class":"5A"},
                   {"first_name":"C","last_name":"","email":"c@d.com","class":"5A"}]"#;

    for uri in ["/students", "/students/"] {
        let response = send(request(Method::POST, uri, Some(&cookie), Some(body))).await;
        assert_error(
            response,
            StatusCode::BAD_REQUEST,
            "invalid request body - all fields are required",
        )
        .await;
    }
}

#[tokio::test]
async fn test_create_with_bad_email() {
    let cookie = cookie_for("exec");
    let body = r#"[{"first_name":"A","last_name":"B","email":"not-an-email","class":"5A","subject":"Math"}]"#;
    let response = send(request(Method::POST, "/teachers", Some(&cookie), Some(body))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_exec_replace_requires_profile_fields() {
    let cookie = cookie_for("admin");
    let body = r#"{"first_name":"A","last_name":"B","email":"a@b.com","username":"ab"}"#;
    let response = send(request(Method::PUT, "/execs/1", Some(&cookie), Some(body))).await;
    assert_error(
        response,
        StatusCode::BAD_REQUEST,
        "invalid request body - all fields are required",
    )
    .await;
}

#[tokio::test]
async fn test_student_count_requires_staff_role() {
    let cookie = cookie_for("student");
    let response = send(request(
        Method::GET,
        "/teachers/1/studentCount",
        Some(&cookie),
        None,
    ))
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "user not authorized").await;
}

#[tokio::test]
async fn test_student_count_role_is_case_sensitive() {
    let cookie = cookie_for("Admin");
    let response = send(request(
        Method::GET,
        "/teachers/abc/studentCount",
        Some(&cookie),
        None,
    ))
    .await;
    assert_error(response, StatusCode::UNAUTHORIZED, "user not authorized").await;
}

#[tokio::test]
async fn test_student_count_checks_id_after_role() {
    let cookie = cookie_for("manager");
    let response = send(request(
        Method::GET,
        "/teachers/abc/studentCount",
        Some(&cookie),
        None,
    ))
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "invalid ID").await;
}

#[tokio::test]
async fn test_login_is_public() {
    let response = send(request(Method::POST, "/execs/login", None, Some("{}"))).await;
    assert_error(
        response,
        StatusCode::BAD_REQUEST,
        "invalid request body - all fields are required",
    )
    .await;
}

#[tokio::test]
async fn test_login_missing_password() {
    let response = send(request(
        Method::POST,
        "/execs/login",
        None,
        Some(r#"{"username":"admin"}"#),
    ))
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let response = send(request(Method::POST, "/execs/login", None, Some("nope"))).await;
    assert_error(response, StatusCode::BAD_REQUEST, "invalid request body").await;
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let cookie = cookie_for("exec");
    let response = send(request(Method::POST, "/execs/logout", Some(&cookie), None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("Bearer=;"));
    assert!(set_cookie.contains("Max-Age=0"));
    assert!(set_cookie.contains("HttpOnly"));

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_logout_requires_session() {
    let response = send(request(Method::POST, "/execs/logout", None, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_password_requires_both_fields() {
    let cookie = cookie_for("exec");
    let response = send(request(
        Method::POST,
        "/execs/1/updatePassword",
        Some(&cookie),
        Some(r#"{"current_password":"old"}"#),
    ))
    .await;
    assert_error(
        response,
        StatusCode::BAD_REQUEST,
        "invalid request body - all fields are required",
    )
    .await;
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let cookie = cookie_for("exec");
    let responses = vec![
        send(request(Method::GET, "/", Some(&cookie), None)).await,
        send(request(Method::GET, "/students", None, None)).await,
    ];

    for response in responses {
        let headers = response.headers();
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-xss-protection"], "1; mode=block");
        assert_eq!(headers["x-dns-prefetch-control"], "off");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert_eq!(headers["content-security-policy"], "default-src 'self'");
        assert_eq!(
            headers["strict-transport-security"],
            "max-age=63072000; includeSubDomains; preload"
        );
    }
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/students")
        .header(header::ORIGIN, "https://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())
        .unwrap();
    let response = send(req).await;

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "3600");
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let req = Request::builder()
        .method(Method::GET)
        .uri("/students")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(req).await;

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_get_on_session_routes_is_method_not_allowed() {
    let cookie = cookie_for("admin");
    for uri in ["/execs/login", "/execs/logout"] {
        let response = send(request(Method::GET, uri, Some(&cookie), None)).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", uri);
    }
}
