use std::{net::SocketAddr, num::NonZeroU32, sync::Arc};

use axum::Router;
use configs::{AppConfig, AuthConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, auth};
use service::auth::{
    password::PasswordHasher, repo::seaorm::SeaOrmCredentialStore, AuthService, CredentialStore, SigningKey,
    TokenIssuer, TokenSettings,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Assemble the auth service from `[auth]` settings over any credential store.
pub fn build_auth_service(store: Arc<dyn CredentialStore>, cfg: &AuthConfig) -> Result<auth::SharedAuth, StartupError> {
    let iterations = NonZeroU32::new(cfg.kdf_iterations)
        .ok_or_else(|| StartupError::InvalidConfig("auth.kdf_iterations must be >= 1".into()))?;
    let key = SigningKey::from_secret(&cfg.jwt_secret).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let tokens = TokenIssuer::new(key, TokenSettings { issuer: cfg.token_issuer.clone(), ttl: cfg.token_ttl() });
    if iterations.get() < 10_000 {
        tracing::warn!(iterations = iterations.get(), "low PBKDF2 iteration count configured");
    }
    Ok(Arc::new(AuthService::new(store, PasswordHasher::new(iterations), tokens)))
}

/// Router wired to the given auth service.
pub fn build_app(auth: auth::SharedAuth) -> Router {
    routes::build_router(auth::ServerState { auth }, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server with already-validated settings
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    info!(auth = ?cfg.auth, server = %cfg.server.bind_addr(), "configuration loaded");

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let store: Arc<dyn CredentialStore> = Arc::new(SeaOrmCredentialStore::new(db));
    let app = build_app(build_auth_service(store, &cfg.auth)?);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
