//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api;
use crate::auth::hash_password;
use crate::cli::{error, info, print_exec, success, warn};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::db::{self, execs::create_execs, Database};
use crate::models::{Exec, Validate};

/// Write a default school-manager.toml
pub async fn init(path: Option<&Path>) -> Result<()> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if config_path.exists() {
        warn(&format!("{} already exists", config_path.display()));
        return Ok(());
    }

    fs::write(&config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", config_path.display()));
    info("Set DATABASE_URL and JWT_SECRET, then run 'school-manager migrate'");

    Ok(())
}

/// Create the database tables
pub async fn migrate(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let db = Database::from_config(&config.database);

    info("Running migrations");
    db::schema::migrate(&db)
        .await
        .inspect_err(|e| error(&format!("Migration failed: {}", e)))?;
    success("Database schema is up to date");

    Ok(())
}

/// Create an exec account from the command line
pub async fn create_exec(path: Option<&Path>, exec: Exec) -> Result<()> {
    let config = load_config(path)?;
    let db = Database::from_config(&config.database);

    exec.validate()?;

    match create_execs(&db, std::slice::from_ref(&exec)).await {
        Ok(created) => {
            success(&format!("Created exec: {}", exec.username));
            created.iter().for_each(print_exec);
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to create exec: {}", e));
            Err(e.into())
        }
    }
}

/// Print a password hash, e.g. for seeding the execs table by hand
pub async fn hash(password: &str) -> Result<()> {
    println!("{}", hash_password(password)?);
    Ok(())
}

/// Start the HTTPS API server
pub async fn serve(path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = load_config(path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    info(&format!(
        "Starting server on https://{}:{}",
        config.server.host, config.server.port
    ));

    api::run_server(config).await?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };
    loaded.map_err(|e| anyhow::anyhow!("{}", e))
}
