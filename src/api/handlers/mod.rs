//! Request handlers
//!
//! The collection handlers are generic over [`Resource`]; each entity module
//! instantiates them in its `routes()`.

pub mod execs;
pub mod students;
pub mod teachers;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::MethodRouter,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};

use super::response::{DeletedManyResponse, DeletedResponse, JsonBody, ListResponse, PathId};
use super::server::AppState;
use crate::db::{self, Record};
use crate::error::Result;
use crate::models::{validate_all, PatchMap, Validate};

/// An entity exposed as a REST collection
pub trait Resource: Record + Validate + Serialize + DeserializeOwned + 'static {
    /// Singular name used in delete confirmations
    const NAME: &'static str;

    /// Checks applied to the body of a full-record replace
    fn validate_replacement(&self) -> Result<()> {
        self.validate()
    }
}

/// Register a collection route both with and without the trailing slash
fn collection_route(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

pub async fn root() -> &'static str {
    tracing::debug!("Responded to root request");
    "Hello from the root!"
}

pub async fn list<T: Resource>(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse<T>>> {
    let items = db::list::<T>(&state.db, &params).await?;
    Ok(Json(ListResponse::success(items)))
}

pub async fn get_one<T: Resource>(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<T>> {
    Ok(Json(db::get_by_id(&state.db, id).await?))
}

pub async fn create_many<T: Resource>(
    State(state): State<AppState>,
    JsonBody(items): JsonBody<Vec<T>>,
) -> Result<(StatusCode, Json<ListResponse<T>>)> {
    validate_all(&items)?;
    let created = db::create(&state.db, &items).await?;
    Ok((StatusCode::CREATED, Json(ListResponse::success(created))))
}

pub async fn replace<T: Resource>(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(item): JsonBody<T>,
) -> Result<Json<T>> {
    item.validate_replacement()?;
    Ok(Json(db::replace(&state.db, id, &item).await?))
}

pub async fn patch_many<T: Resource>(
    State(state): State<AppState>,
    JsonBody(updates): JsonBody<Vec<PatchMap>>,
) -> Result<StatusCode> {
    db::patch_many::<T>(&state.db, &updates).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch_one<T: Resource>(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(update): JsonBody<PatchMap>,
) -> Result<Json<T>> {
    Ok(Json(db::patch_one(&state.db, id, &update).await?))
}

pub async fn delete_one<T: Resource>(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DeletedResponse>> {
    db::delete_one::<T>(&state.db, id).await?;
    Ok(Json(DeletedResponse {
        status: format!("{} successfully deleted", T::NAME),
        id,
    }))
}

pub async fn delete_many<T: Resource>(
    State(state): State<AppState>,
    JsonBody(ids): JsonBody<Vec<i32>>,
) -> Result<Json<DeletedManyResponse>> {
    let deleted_ids = db::delete_many::<T>(&state.db, &ids).await?;
    Ok(Json(DeletedManyResponse {
        status: format!("{}(s) successfully deleted", T::NAME),
        deleted_ids,
    }))
}
