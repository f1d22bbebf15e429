use common::storage::s3::S3Options;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared secret the external identity provider signs admin tokens with.
    pub jwt_secret: String,
    /// Emails allowed to use the dashboard. Compared case-insensitively.
    pub admin_emails: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    /// Page size used when the client does not send `limit`.
    pub default_limit: u64,
    /// Width of the default sale-end window on event listings, in days.
    pub time_window_days: i64,
    /// Category whose players are matched in addition to the requested one
    /// on the player listing (the catch-all "predictions" category).
    pub always_include_category_id: i32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            time_window_days: 90,
            always_include_category_id: 6,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: S3Options,
    #[serde(default)]
    pub listing: ListingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("storage.presign_expiry_secs", 600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., VERSUS__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("VERSUS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
