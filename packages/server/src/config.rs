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
    pub jwt_secret: String,
}

/// Tunables for the qualification pipeline.
#[derive(Debug, Deserialize, Clone)]
pub struct QualificationConfig {
    /// Minimum cover letter length to count as "has a cover letter".
    pub cover_letter_min_length: usize,
    /// Minimum profile page length to count the profile as completed.
    pub profile_page_min_length: usize,
    /// Upper bound for a participant's result percentage. Results above
    /// `max_points` are clamped to this value instead of erroring out.
    pub max_result_percent: f64,
    /// Explicit current camp year. When unset the most recently started
    /// edition is used.
    pub current_year: Option<i32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub qualification: QualificationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("qualification.cover_letter_min_length", 50)?
            .set_default("qualification.profile_page_min_length", 50)?
            .set_default("qualification.max_result_percent", 100.0)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CAMP__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("CAMP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
