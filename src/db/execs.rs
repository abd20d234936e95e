//! Exec accounts: records, credentials lookup and password changes

use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

use super::{crud, query_error, Database, Record};
use crate::auth::{hash_password, verify_password};
use crate::error::{Error, Result};
use crate::models::Exec;

const CREDENTIAL_COLUMNS: &str = "id, username, password, inactive_status, role";

impl Record for Exec {
    const TABLE: &'static str = "execs";
    const SELECT_COLUMNS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "username",
        "password_changed_at",
        "user_created_at",
        "inactive_status",
        "role",
    ];
    const INSERT_COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "username",
        "password",
        "role",
    ];
    const UPDATE_COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "username",
        "inactive_status",
        "role",
    ];
    const QUERY_COLUMNS: &'static [&'static str] =
        &["first_name", "last_name", "email", "username", "role"];

    fn from_row(row: &Row) -> std::result::Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            password_changed_at: row.try_get("password_changed_at")?,
            user_created_at: row.try_get("user_created_at")?,
            inactive_status: row.try_get("inactive_status")?,
            role: row.try_get("role")?,
            ..Default::default()
        })
    }

    fn insert_params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.username,
            &self.password,
            &self.role,
        ]
    }

    fn update_params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.username,
            &self.inactive_status,
            &self.role,
        ]
    }
}

/// What login and password changes need to know about an account
#[derive(Debug, Clone)]
pub struct ExecCredentials {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub inactive_status: bool,
    pub role: String,
}

impl ExecCredentials {
    fn from_row(row: &Row) -> std::result::Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password")?,
            inactive_status: row.try_get("inactive_status")?,
            role: row.try_get("role")?,
        })
    }
}

/// Insert execs, replacing each plaintext password with its hash first
pub async fn create_execs(db: &Database, execs: &[Exec]) -> Result<Vec<Exec>> {
    let hashed = execs
        .iter()
        .map(|exec| -> Result<Exec> {
            Ok(Exec {
                password: hash_password(&exec.password)?,
                ..exec.clone()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    crud::create(db, &hashed).await
}

pub async fn find_by_username(db: &Database, username: &str) -> Result<ExecCredentials> {
    let client = db.connect().await?;
    let sql = format!("SELECT {} FROM execs WHERE username = $1", CREDENTIAL_COLUMNS);
    let row = client
        .query_opt(&sql, &[&username])
        .await
        .map_err(query_error)?
        .ok_or(Error::NotFound)?;
    ExecCredentials::from_row(&row).map_err(query_error)
}

/// Verify `current` against the stored hash, then store a hash of `new`
/// and stamp `password_changed_at`.
pub async fn change_password(
    db: &Database,
    id: i32,
    current: &str,
    new: &str,
) -> Result<ExecCredentials> {
    let client = db.connect().await?;
    let sql = format!("SELECT {} FROM execs WHERE id = $1", CREDENTIAL_COLUMNS);
    let row = client
        .query_opt(&sql, &[&id])
        .await
        .map_err(query_error)?
        .ok_or(Error::NotFound)?;
    let credentials = ExecCredentials::from_row(&row).map_err(query_error)?;

    verify_password(&credentials.password_hash, current)?;
    let password_hash = hash_password(new)?;

    client
        .execute(
            "UPDATE execs SET password = $1, password_changed_at = now() WHERE id = $2",
            &[&password_hash, &id],
        )
        .await
        .map_err(query_error)?;

    tracing::info!("Password changed for exec {}", credentials.username);
    Ok(ExecCredentials {
        password_hash,
        ..credentials
    })
}
