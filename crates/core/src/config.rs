//! Server configuration
//!
//! Loaded from a TOML document. Every field has a default, so an empty or
//! missing file still yields a runnable configuration. A handful of
//! environment variables override the file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "DAYTIMER_CONFIG";
/// Environment override for the listen address
pub const BIND_ENV: &str = "DAYTIMER_BIND";
/// Environment override for the database path
pub const DB_ENV: &str = "DAYTIMER_DB";
/// Environment override for the generation service API key
pub const GAMMA_KEY_ENV: &str = "GAMMA_API_KEY";

/// Default generation service endpoint
pub const DEFAULT_GAMMA_API_URL: &str = "https://public-api.gamma.app/v0.2/generations";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub auth: AuthSection,
    #[serde(default)]
    pub gamma: GammaSection,
    /// Administrator created at startup when none exists
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory of frontend files served outside `/api`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// SQLite file; defaults to the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSection {
    /// Lifetime of a bearer token
    #[serde(default = "default_session_hours")]
    pub session_hours: i64,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            session_hours: default_session_hours(),
        }
    }
}

/// Generation service endpoint, credentials and render options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GammaSection {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub text_mode: String,
    pub format: String,
    pub theme_name: String,
    pub num_cards: u32,
    pub card_split: String,
    pub export_as: String,
    pub text_amount: String,
    pub language: String,
    pub image_source: String,
    pub card_dimensions: String,
    pub workspace_access: String,
    pub external_access: String,
}

impl Default for GammaSection {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GAMMA_API_URL.to_string(),
            api_key: String::new(),
            text_mode: "preserve".to_string(),
            format: "document".to_string(),
            theme_name: "Night Sky".to_string(),
            num_cards: 5,
            card_split: "inputTextBreaks".to_string(),
            export_as: "pdf".to_string(),
            text_amount: "detailed".to_string(),
            language: "fr".to_string(),
            image_source: "pictographic".to_string(),
            card_dimensions: "a4".to_string(),
            workspace_access: "view".to_string(),
            external_access: "noAccess".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default = "default_admin_first_name")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_session_hours() -> i64 {
    24
}

fn default_admin_first_name() -> String {
    "Admin".to_string()
}

impl Config {
    /// Parse a configuration document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file, falling back to defaults when the file is absent
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading configuration");
                let content = std::fs::read_to_string(path)?;
                Self::from_toml_str(&content)?
            }
            Some(path) => {
                info!(path = %path.display(), "Configuration file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(bind = %bind, "Bind address overridden from environment");
            self.server.bind = bind;
        }
        if let Some(db) = lookup(DB_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(path = %db, "Database path overridden from environment");
            self.database.path = Some(PathBuf::from(db));
        }
        if let Some(key) = lookup(GAMMA_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.gamma.api_key = key;
        }
    }

    /// Resolve the database path, defaulting to the platform data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("dev", "daytimer", "daytimer").ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            )
        })?;

        Ok(dirs.data_dir().join("daytimer.db"))
    }
}
