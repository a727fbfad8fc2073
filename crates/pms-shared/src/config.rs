//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub tenancy: TenancySettings,
    pub cors: CorsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Seconds
    pub access_token_expiry: i64,
    /// Seconds
    pub refresh_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TenancySettings {
    /// Base domains under which tenants get a subdomain, e.g. `darmanager.net`.
    /// The first entry is used when pointing users at their own portal.
    pub base_domains: Vec<String>,
    pub portal_scheme: String,
}

impl TenancySettings {
    pub fn primary_base_domain(&self) -> &str {
        self.base_domains
            .first()
            .map(String::as_str)
            .unwrap_or("localhost")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// `json` or `pretty`
    pub format: String,
    /// When set, a daily rolling log file is written here as well.
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "pms-server")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("database.run_migrations", true)?
            .set_default("jwt.access_token_expiry", crate::constants::DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("jwt.refresh_token_expiry", crate::constants::DEFAULT_REFRESH_TOKEN_EXPIRY)?
            .set_default("tenancy.base_domains", vec!["darmanager.net"])?
            .set_default("tenancy.portal_scheme", "https")?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("logging.format", "json")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("tenancy.base_domains")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
