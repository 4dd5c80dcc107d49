//! Shared application state

use std::sync::{Arc, Mutex};

use daytimer_core::config::GammaSection;
use daytimer_core::{AccountRepository, AuthSession, Caller, Config, Database};
use daytimer_net::{GammaClient, RenderOptions};

use crate::error::ApiError;

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
    gamma: GammaClient,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, gamma: GammaClient, config: Config) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            gamma,
            config: Arc::new(config),
        }
    }

    pub fn gamma(&self) -> &GammaClient {
        &self.gamma
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a storage operation on the blocking pool.
    ///
    /// The closure holds the database lock for its whole duration.
    pub async fn with_db<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Database) -> daytimer_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db
                .lock()
                .map_err(|_| ApiError::Internal("storage lock poisoned".to_string()))?;
            op(&guard).map_err(ApiError::from)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("storage task failed: {e}")))?
    }

    /// Resolve a bearer token to the identity of an active account
    pub async fn resolve_caller(&self, token: &str) -> Result<Caller, ApiError> {
        let token = token.to_string();
        self.with_db(move |db| {
            let Some(session) = db.find_valid_session(&token)?.filter(AuthSession::is_valid) else {
                return Ok(None);
            };
            Ok(db
                .find_account_by_id(session.account_id)?
                .filter(|account| account.is_active)
                .map(|account| Caller::from(&account)))
        })
        .await?
        .ok_or(ApiError::InvalidToken)
    }

    pub fn render_options(&self) -> RenderOptions {
        render_options(&self.config.gamma)
    }
}

/// Run CPU-heavy work such as password hashing on the blocking pool,
/// without holding the database lock
pub async fn run_blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> daytimer_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Render options for the generation service, as configured
pub fn render_options(gamma: &GammaSection) -> RenderOptions {
    RenderOptions {
        text_mode: gamma.text_mode.clone(),
        format: gamma.format.clone(),
        theme_name: gamma.theme_name.clone(),
        num_cards: gamma.num_cards,
        card_split: gamma.card_split.clone(),
        export_as: gamma.export_as.clone(),
        text_amount: gamma.text_amount.clone(),
        language: gamma.language.clone(),
        image_source: gamma.image_source.clone(),
        card_dimensions: gamma.card_dimensions.clone(),
        workspace_access: gamma.workspace_access.clone(),
        external_access: gamma.external_access.clone(),
    }
}
