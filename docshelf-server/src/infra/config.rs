use std::env;

use anyhow::Context;
use docshelf_core::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use tracing::warn;

const DEFAULT_TOKEN_KEY: &str = "docshelf-development-token-key";

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // Database settings
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    // CORS settings
    pub cors_allowed_origins: Vec<String>,

    // Development settings
    pub dev_mode: bool,

    // HMAC key for bearer tokens
    pub auth_token_key: String,

    // Share listing
    pub default_page_size: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("dev_mode", &self.dev_mode)
            .field("default_page_size", &self.default_page_size)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            database_url: None,
            database_max_connections: 10,
            cors_allowed_origins: Vec::new(),
            dev_mode: false,
            auth_token_key: DEFAULT_TOKEN_KEY.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let server_port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("SERVER_PORT must be a port number, got {raw:?}"))?,
            Err(_) => defaults.server_port,
        };

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().with_context(|| {
                format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}")
            })?,
            Err(_) => defaults.database_max_connections,
        };

        let default_page_size = match env::var("DEFAULT_PAGE_SIZE") {
            Ok(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DEFAULT_PAGE_SIZE must be an integer, got {raw:?}"))?
                .clamp(1, MAX_PAGE_SIZE),
            Err(_) => defaults.default_page_size,
        };

        let auth_token_key = match env::var("AUTH_TOKEN_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                warn!("AUTH_TOKEN_KEY not set; using the development token key");
                defaults.auth_token_key
            }
        };

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            dev_mode: env::var("DEV_MODE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            auth_token_key,
            default_page_size,
        })
    }

    /// Database URL, required before serving or migrating.
    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set")
    }

    pub fn uses_default_token_key(&self) -> bool {
        self.auth_token_key == DEFAULT_TOKEN_KEY
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
