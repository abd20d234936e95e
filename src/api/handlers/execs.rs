//! Exec routes and the login, logout and password-change flows

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use super::{
    collection_route, delete_one, get_one, list, patch_many, patch_one, replace, Resource,
};
use crate::api::response::{JsonBody, ListResponse, PathId};
use crate::api::server::AppState;
use crate::auth::models::MessageResponse;
use crate::auth::session::{expired_cookie, session_cookie};
use crate::auth::{sign_token, verify_password, LoginRequest, LoginResponse, UpdatePasswordRequest};
use crate::db::execs::{change_password, create_execs, find_by_username};
use crate::error::{Error, Result};
use crate::models::validate::require;
use crate::models::{validate_all, Exec};

impl Resource for Exec {
    const NAME: &'static str = "Exec";

    fn validate_replacement(&self) -> Result<()> {
        self.validate_profile()
    }
}

/// Every exec route except login, which must stay reachable without a session
pub fn routes() -> Router<AppState> {
    let collection = get(list::<Exec>).post(create).patch(patch_many::<Exec>);

    collection_route(Router::new(), "/execs", collection)
        .route(
            "/execs/{id}",
            get(get_one::<Exec>)
                .put(replace::<Exec>)
                .patch(patch_one::<Exec>)
                .delete(delete_one::<Exec>),
        )
        .route("/execs/logout", post(logout))
        .route("/execs/{id}/updatePassword", post(update_password))
}

async fn create(
    State(state): State<AppState>,
    JsonBody(items): JsonBody<Vec<Exec>>,
) -> Result<(StatusCode, Json<ListResponse<Exec>>)> {
    validate_all(&items)?;
    let created = create_execs(&state.db, &items).await?;
    Ok((StatusCode::CREATED, Json(ListResponse::success(created))))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(Error::MissingFields);
    }

    let user = find_by_username(&state.db, &req.username).await?;
    if user.inactive_status {
        return Err(Error::AccountInactive);
    }
    verify_password(&user.password_hash, &req.password).inspect_err(|e| {
        tracing::warn!("Failed login for {}: {}", req.username, e);
    })?;

    let auth = &state.config.auth;
    let token = sign_token(user.id, &user.username, &user.role, auth)?;
    tracing::info!("Exec {} logged in", user.username);

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&auth.cookie_name, &token, auth.token_ttl_secs()),
        )],
        Json(LoginResponse { token }),
    ))
}

async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(
            header::SET_COOKIE,
            expired_cookie(&state.config.auth.cookie_name),
        )],
        Json(MessageResponse::new("Logged out successfully")),
    )
}

async fn update_password(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(req): JsonBody<UpdatePasswordRequest>,
) -> Result<impl IntoResponse> {
    require(&[&req.current_password, &req.new_password])?;

    let user = change_password(&state.db, id, &req.current_password, &req.new_password).await?;

    let auth = &state.config.auth;
    let token = sign_token(user.id, &user.username, &user.role, auth)?;

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&auth.cookie_name, &token, auth.token_ttl_secs()),
        )],
        Json(MessageResponse {
            message: "Password updated successfully".to_string(),
            token: Some(token),
        }),
    ))
}
