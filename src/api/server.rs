//! HTTPS API server

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;

use super::handlers;
use super::middleware::{cors_layer, security_headers, trace_layer};
use crate::auth::require_auth;
use crate::config::Config;
use crate::db::Database;
use crate::error::{Error, Result};

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let db = Database::from_config(&config.database);
        Self {
            config: Arc::new(config),
            db,
        }
    }
}

/// Run the HTTPS API server until it fails
pub async fn run_server(config: Config) -> Result<()> {
    if config.auth.jwt_secret.trim().is_empty() {
        return Err(Error::Config(
            "auth.jwt_secret must be set (e.g. via JWT_SECRET)".to_string(),
        ));
    }

    let listen = format!("{}:{}", config.server.host, config.server.port);
    let addr = tokio::net::lookup_host(&listen)
        .await?
        .next()
        .ok_or_else(|| Error::Config(format!("cannot resolve listen address {}", listen)))?;

    let tls = RustlsConfig::from_pem_file(&config.server.cert_path, &config.server.key_path)
        .await
        .map_err(|e| {
            Error::Config(format!(
                "failed to load TLS certificate {} / key {}: {}",
                config.server.cert_path.display(),
                config.server.key_path.display(),
                e
            ))
        })?;

    let app = create_router(AppState::new(config));

    tracing::info!("Server listening on https://{}", addr);

    axum_server::bind_rustls(addr, tls)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

/// Create the router with all routes. Everything except login sits behind
/// the session gate.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(handlers::root))
        .merge(handlers::students::routes())
        .merge(handlers::teachers::routes())
        .merge(handlers::execs::routes())
        .route_layer(from_fn_with_state(
            state.config.auth.clone(),
            require_auth,
        ));

    Router::new()
        .route("/execs/login", post(handlers::execs::login))
        .merge(protected)
        .layer(from_fn(security_headers))
        .layer(cors_layer(&state.config.cors))
        .layer(trace_layer())
        .with_state(state)
}
