//! Table definitions

use super::{query_error, Database};
use crate::error::Result;

pub const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS teachers (
        id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        class TEXT NOT NULL UNIQUE,
        subject TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS students (
        id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        class TEXT NOT NULL REFERENCES teachers(class) ON UPDATE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS execs (
        id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        password_changed_at TIMESTAMPTZ,
        user_created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        password_reset_token TEXT,
        password_token_expires TEXT,
        inactive_status BOOLEAN NOT NULL DEFAULT FALSE,
        role TEXT NOT NULL
    )",
];

/// Create any missing tables. Safe to run repeatedly.
pub async fn migrate(db: &Database) -> Result<()> {
    let client = db.connect().await?;
    for statement in SCHEMA {
        client.batch_execute(statement).await.map_err(query_error)?;
    }
    tracing::info!("Schema up to date ({} tables)", SCHEMA.len());
    Ok(())
}
