//! Gateward reference server.
//!
//! Wires `gateward-auth` into a runnable axum app: loads TOML
//! configuration, seeds the in-memory user store, mounts the auth
//! endpoints plus a protected demo route, and serves until ctrl-c.

mod config;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use time::OffsetDateTime;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use gateward_auth::{
    AppState, Argon2Verifier, AuthService, JwtService, MemoryUserStore, RequireAuth, User,
    authenticate,
};

use config::{ServerConfig, load_config};

#[tokio::main]
async fn main() {
    // Optional .env for local development.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = resolve_config_path();
    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            std::process::exit(2);
        }
    };
    tracing::info!(path = %config_path.display(), "Configuration loaded");

    if let Err(e) = run(config).await {
        eprintln!("Server error: {e:#}");
        std::process::exit(1);
    }
}

fn resolve_config_path() -> PathBuf {
    env::var("GATEWARD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("gateward.toml"))
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let jwt = Arc::new(JwtService::from_config(&config.auth)?);
    let verifier = Argon2Verifier::new();
    let store = Arc::new(MemoryUserStore::new());

    seed_users(&store, &verifier, &config).await?;

    let auth = AuthService::new(jwt, store, Arc::new(verifier));
    let state = AppState::new(auth, config.auth.cookie.clone());

    let app = Router::new()
        .route("/health", get(health))
        .route("/whoami", get(whoami))
        .layer(from_fn_with_state(state.auth_state.clone(), authenticate))
        .merge(gateward_auth::router(state))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    tracing::info!(listen = %config.listen, "Gateward listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Hashes seed passwords and fills the store.
async fn seed_users(
    store: &MemoryUserStore,
    verifier: &Argon2Verifier,
    config: &ServerConfig,
) -> anyhow::Result<()> {
    for seed in &config.users {
        let user = User {
            id: Uuid::new_v4(),
            email: seed.email.clone(),
            username: seed.username.clone(),
            first_name: seed.first_name.clone(),
            last_name: seed.last_name.clone(),
            roles: seed.roles.clone(),
            enabled: seed.enabled,
            password_hash: verifier.hash_password(&seed.password)?,
            created_at: OffsetDateTime::now_utc(),
        };
        tracing::info!(email = %user.email, user_id = %user.id, "Seeded user");
        store.insert(user).await;
    }
    Ok(())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Protected demo route: echoes the authenticated identity.
async fn whoami(RequireAuth(ctx): RequireAuth) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "userId": ctx.user_id,
        "authorities": ctx.authorities,
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to install ctrl-c handler");
    }
}
