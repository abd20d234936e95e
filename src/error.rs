//! Error types for the School Manager API
//!
//! Domain errors carry their own HTTP status and render as a plain-text
//! body. Everything else collapses to a generic 500 at the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

const UNKNOWN_INTERNAL_ERROR: &str = "unknown internal server error";

#[derive(Error, Debug)]
pub enum Error {
    // Request and query errors
    #[error("invalid sort filter parameter")]
    InvalidSortParameter,

    #[error("invalid ID")]
    InvalidId,

    #[error("invalid update parameters")]
    InvalidUpdateParameters,

    #[error("invalid request body - all fields are required")]
    MissingFields,

    #[error("invalid request body")]
    InvalidRequestBody,

    // Persistence errors
    #[error("error connecting to database")]
    ConnectingToDatabase,

    #[error("error database query")]
    DatabaseQuery,

    #[error("unit not found")]
    NotFound,

    #[error("unit not found: {0}")]
    NotFoundId(i32),

    #[error("unable to start transaction")]
    UnableToStartTransaction,

    #[error("error commiting the transaction")]
    CommittingTransaction,

    #[error("duplicate email - email must be unique")]
    DuplicateEmail,

    #[error("class / class teacher not found")]
    ClassTeacherNotFound,

    #[error("error encoding data")]
    EncodingData,

    // Authentication errors
    #[error("error hashing password")]
    HashingPassword,

    #[error("account is inactive")]
    AccountInactive,

    #[error("invalid encoded hash format")]
    InvalidEncodedHashFormat,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("error generating jwt token")]
    GeneratingToken,

    #[error("authorization cookie is missing")]
    MissingToken,

    #[error("token is expired")]
    TokenExpired,

    #[error("invalid login token")]
    InvalidLoginToken,

    #[error("unexpected signing method")]
    UnexpectedSigningMethod,

    #[error("user not authorized")]
    UserNotAuthorized,

    // Non-domain errors
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'school-manager init' first.")]
    ConfigNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status for domain errors, `None` for anything unanticipated
    pub fn status_code(&self) -> Option<StatusCode> {
        let status = match self {
            Error::InvalidSortParameter
            | Error::InvalidId
            | Error::InvalidUpdateParameters
            | Error::MissingFields
            | Error::InvalidRequestBody
            | Error::DuplicateEmail
            | Error::ClassTeacherNotFound => StatusCode::BAD_REQUEST,

            Error::NotFound | Error::NotFoundId(_) => StatusCode::NOT_FOUND,

            Error::ConnectingToDatabase
            | Error::DatabaseQuery
            | Error::UnableToStartTransaction
            | Error::CommittingTransaction
            | Error::EncodingData
            | Error::HashingPassword
            | Error::GeneratingToken => StatusCode::INTERNAL_SERVER_ERROR,

            Error::AccountInactive | Error::InvalidEncodedHashFormat | Error::IncorrectPassword => {
                StatusCode::FORBIDDEN
            }

            Error::MissingToken
            | Error::TokenExpired
            | Error::InvalidLoginToken
            | Error::UnexpectedSigningMethod
            | Error::UserNotAuthorized => StatusCode::UNAUTHORIZED,

            Error::Database(_)
            | Error::Config(_)
            | Error::ConfigNotFound
            | Error::Io(_)
            | Error::TomlParse(_)
            | Error::Json(_)
            | Error::Other(_) => return None,
        };
        Some(status)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.status_code() {
            Some(status) => {
                if status.is_server_error() {
                    tracing::error!("{}", self);
                }
                (status, self.to_string()).into_response()
            }
            None => {
                tracing::error!("Unhandled error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_INTERNAL_ERROR).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
