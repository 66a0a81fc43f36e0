//! Process startup: logging, database preparation and the HTTP stack.

use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::auth::{JwtSessions, Pbkdf2PasswordHasher};
use crate::adapters::http::{app_router, AppState};
use crate::application::handlers::{
    BootstrapAdminCommand, BootstrapAdminHandler, SeedCatalogHandler,
};
use crate::config::{AppConfig, AuthConfig, ConfigError, ServerConfig, ValidationError};
use crate::domain::foundation::DomainError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migrations failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Startup task failed: {0}")]
    Domain(#[from] DomainError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Installs the global subscriber. JSON lines in production, human-readable
/// output elsewhere. `RUST_LOG` overrides `server.log_level`.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

/// Builds the password hasher and session adapters from the auth settings.
pub fn state_for_pool(pool: sqlx::PgPool, auth: &AuthConfig) -> AppState {
    let sessions = Arc::new(JwtSessions::new(&auth.jwt_secret, auth.token_ttl_secs));
    AppState::from_pool(
        pool,
        Arc::new(Pbkdf2PasswordHasher::new(auth.password_iterations)),
        sessions.clone(),
        sessions,
    )
}

/// Seeds the catalog and creates the first administrator, as configured.
pub async fn prepare_store(state: &AppState, config: &AppConfig) -> Result<(), DomainError> {
    if config.database.seed_catalog {
        let report = SeedCatalogHandler::new(state.catalog()).handle().await?;
        if report.is_empty() {
            tracing::debug!("Catalog already populated, nothing seeded");
        } else {
            tracing::info!(
                plans = report.plans,
                trainers = report.trainers,
                workout_plans = report.workout_plans,
                "Seeded default catalog"
            );
        }
    }

    if let Some(admin) = config.auth.bootstrap_admin() {
        let created = BootstrapAdminHandler::new(state.users.clone(), state.hasher.clone())
            .handle(BootstrapAdminCommand {
                username: admin.username.to_string(),
                email: admin.email.to_string(),
                password: SecretString::new(admin.password.expose_secret().clone()),
            })
            .await?;
        if let Some(user) = created {
            tracing::info!(user_id = %user.id, username = %user.username, "Bootstrap administrator created");
        }
    }
    Ok(())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Cross-origin access disabled");
        Vec::new()
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// The router with request tracing, CORS and the request timeout applied.
pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    app_router(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// Resolves on SIGTERM or Ctrl-C.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Shutdown signal received");
}
