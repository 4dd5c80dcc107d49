//! Daytimer - time tracking HTTP service
//!
//! Usage: `daytimer [CONFIG]`. The configuration path may also be given
//! through `DAYTIMER_CONFIG`; without either, built-in defaults apply.

use std::path::PathBuf;

use daytimer_core::config::{BootstrapAdmin, CONFIG_ENV};
use daytimer_core::credentials::{hash_password, validate_password};
use daytimer_core::{Account, AccountRepository, AccountRole, Config, Database};
use daytimer_net::GammaClient;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod dataset;
mod error;
mod extract;
mod routes;
mod state;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::open(&db_path)?;
    info!(path = %db_path.display(), schema = db.schema_version(), "Database opened");

    let purged = db.cleanup_expired_sessions()?;
    if purged > 0 {
        info!(purged, "Expired sessions removed");
    }
    if let Some(admin) = &config.bootstrap_admin {
        bootstrap_admin(&db, admin)?;
    }

    let gamma = GammaClient::new(config.gamma.api_url.clone(), config.gamma.api_key.clone())?;
    if !gamma.has_api_key() {
        warn!("No generation service API key configured; report generation will fail");
    }

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "Daytimer listening");

    let app = routes::router(state::AppState::new(db, gamma, config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Daytimer stopped");
    Ok(())
}

/// Create the configured administrator unless an active one already exists
fn bootstrap_admin(db: &Database, admin: &BootstrapAdmin) -> daytimer_core::Result<()> {
    if db.accounts().count_active(AccountRole::Admin)? > 0 {
        return Ok(());
    }
    validate_password(&admin.password)?;

    let account = Account::new(
        admin.first_name.clone(),
        admin.last_name.clone(),
        admin.email.trim().to_string(),
        hash_password(&admin.password)?,
        None,
        AccountRole::Admin,
    );
    db.create_account(&account)?;
    info!(account_id = %account.id, email = %account.email, "Bootstrap administrator created");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown requested");
}
