//! Response envelopes and request extractors

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{Error, Result};

pub const SUCCESS: &str = "success";

/// `{status, count, data}` for collections
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub status: String,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            status: SUCCESS.to_string(),
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub status: String,
    pub count: i64,
}

impl CountResponse {
    pub fn success(count: i64) -> Self {
        Self {
            status: SUCCESS.to_string(),
            count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub status: String,
    pub id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedManyResponse {
    pub status: String,
    pub deleted_ids: Vec<i32>,
}

/// Parse a path id the way every `/{id}` route expects it
pub fn parse_id(raw: &str) -> Result<i32> {
    raw.parse().map_err(|_| Error::InvalidId)
}

/// Integer `{id}` path segment; anything else is [`Error::InvalidId`]
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub i32);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::InvalidId)?;
        parse_id(&raw).map(PathId)
    }
}

/// JSON body decoded regardless of `Content-Type`. Malformed bodies are
/// [`Error::InvalidRequestBody`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| Error::InvalidRequestBody)?;
        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            Error::InvalidRequestBody
        })
    }
}
