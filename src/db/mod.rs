//! PostgreSQL persistence
//!
//! Every operation opens its own connection and drops it before returning.
//! Multi-row writes run in one transaction; returning early drops the
//! uncommitted transaction, which rolls it back.

mod crud;
pub mod execs;
pub mod query;
pub mod schema;
mod students;
pub mod teachers;

pub use crud::{create, delete_many, delete_one, get_by_id, list, patch_many, patch_one, replace};
pub use query::{ListQuery, SortDirection, SortKey};

use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row, Transaction};

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::models::Patchable;

/// Connection settings for the school database
#[derive(Debug, Clone)]
pub struct Database {
    url: String,
}

impl Database {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(config.url.clone())
    }

    /// Open a connection owned by the caller. The background connection
    /// task ends once the returned client is dropped.
    pub async fn connect(&self) -> Result<Client> {
        let (client, connection) = tokio_postgres::connect(&self.url, NoTls)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to PostgreSQL: {}", e);
                Error::ConnectingToDatabase
            })?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(client)
    }
}

/// A table-backed entity
pub trait Record: Patchable + Sized + Send + Sync {
    const TABLE: &'static str;
    /// Columns read back into the entity, `id` first
    const SELECT_COLUMNS: &'static [&'static str];
    const INSERT_COLUMNS: &'static [&'static str];
    /// Columns written by a full-row update
    const UPDATE_COLUMNS: &'static [&'static str] = Self::INSERT_COLUMNS;
    /// Columns usable as collection filters and sort keys
    const QUERY_COLUMNS: &'static [&'static str];

    fn from_row(row: &Row) -> std::result::Result<Self, tokio_postgres::Error>;

    /// Values in `INSERT_COLUMNS` order
    fn insert_params(&self) -> Vec<&(dyn ToSql + Sync)>;

    /// Values in `UPDATE_COLUMNS` order
    fn update_params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.insert_params()
    }
}

/// Log and hide a failed read
pub(crate) fn query_error(e: tokio_postgres::Error) -> Error {
    tracing::error!("Database query failed: {}", e);
    Error::DatabaseQuery
}

/// Translate constraint violations on insert/update into domain errors
pub(crate) fn write_error(e: tokio_postgres::Error) -> Error {
    match e.code() {
        Some(code) if *code == SqlState::UNIQUE_VIOLATION => Error::DuplicateEmail,
        Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => Error::ClassTeacherNotFound,
        _ => query_error(e),
    }
}

pub(crate) async fn begin(client: &mut Client) -> Result<Transaction<'_>> {
    client.transaction().await.map_err(|e| {
        tracing::error!("Failed to start transaction: {}", e);
        Error::UnableToStartTransaction
    })
}

pub(crate) async fn commit(tx: Transaction<'_>) -> Result<()> {
    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit transaction: {}", e);
        Error::CommittingTransaction
    })
}
