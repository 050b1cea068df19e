use std::env;
use std::path::PathBuf;

use crate::error::EcoTrackError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Seed data; built-in demo data when unset
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, EcoTrackError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.log();
        Ok(config)
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EcoTrackError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let web_port = match lookup("WEB_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| EcoTrackError::Config(format!("WEB_PORT must be a number, got {raw:?}")))?,
            None => 5000,
        };

        Ok(Self {
            web_host: lookup("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
            seed_file: lookup("SEED_FILE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }

    fn log(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  WEB_HOST: {}", self.web_host);
        tracing::info!("  WEB_PORT: {}", self.web_port);
        match &self.seed_file {
            Some(path) => tracing::info!("  SEED_FILE: {}", path.display()),
            None => tracing::info!("  SEED_FILE: <not set>, using demo data"),
        }
    }
}
