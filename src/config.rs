//! Configuration management for the library console
//!
//! Read once at startup and handed to the [`Repository`](crate::repository::Repository);
//! nothing else in the crate looks at the environment.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::ResourceKind;
use crate::theme::ThemeName;

/// Resource paths relative to the API base URL
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ResourcePaths {
    pub publishers: String,
    pub categories: String,
    pub authors: String,
    pub books: String,
    pub borrows: String,
    pub book_orders: String,
}

impl ResourcePaths {
    pub fn get(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Publishers => &self.publishers,
            ResourceKind::Categories => &self.categories,
            ResourceKind::Authors => &self.authors,
            ResourceKind::Books => &self.books,
            ResourceKind::Borrows => &self.borrows,
            ResourceKind::BookOrders => &self.book_orders,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub paths: ResourcePaths,
}

impl ApiConfig {
    /// Full collection URL for a resource
    pub fn resource_url(&self, kind: ResourceKind) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.paths.get(kind).trim_start_matches('/')
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Log file; stderr when unset
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeName,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix LIBRARY__)
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override base URL from LIBRARY_APP_BASE_URL env var if present
            .set_override_option("api.base_url", env::var("LIBRARY_APP_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            publishers: ResourceKind::Publishers.default_path().to_string(),
            categories: ResourceKind::Categories.default_path().to_string(),
            authors: ResourceKind::Authors.default_path().to_string(),
            books: ResourceKind::Books.default_path().to_string(),
            borrows: ResourceKind::Borrows.default_path().to_string(),
            book_orders: ResourceKind::BookOrders.default_path().to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            timeout_secs: 30,
            paths: ResourcePaths::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}
