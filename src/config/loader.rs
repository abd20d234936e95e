//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::Config;

pub const CONFIG_FILENAME: &str = "school-manager.toml";

/// `${NAME}` or `${NAME:-fallback}`
static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase")
});

/// Load the nearest school-manager.toml at or above the working directory
pub fn load_config() -> Result<Config> {
    let cwd = env::current_dir()?;
    let config_path = find_config_file(&cwd).ok_or(Error::ConfigNotFound)?;
    tracing::debug!("Using config {}", config_path.display());
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    parse_config(&content)
}

/// Parse configuration text, interpolating environment variables first
pub fn parse_config(content: &str) -> Result<Config> {
    let content = interpolate_env_vars(content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

/// Substitute `${NAME}` placeholders from the environment. Unset variables
/// without a fallback become empty strings.
fn interpolate_env_vars(content: &str) -> String {
    ENV_VAR_RE
        .replace_all(content, |caps: &Captures| {
            env::var(&caps[1])
                .unwrap_or_else(|_| caps.get(2).map_or("", |m| m.as_str()).to_string())
        })
        .into_owned()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# School Manager configuration

[server]
host = "0.0.0.0"
port = 3000
# TLS is mandatory; there is no plaintext listener
cert_path = "cert.pem"
key_path = "key.pem"

[database]
url = "${DATABASE_URL:-host=localhost port=5432 user=postgres password=postgres dbname=school}"

[auth]
jwt_secret = "${JWT_SECRET}"
token_ttl_hours = 24
cookie_name = "Bearer"

[cors]
allowed_origins = ["https://localhost:3000"]
"#
}
