use std::env;

use auth::Authenticator;
use auth::TokenLifetimes;
use chrono::TimeDelta;
use chrono::Utc;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for account-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub tokens: TokenConfig,
    pub email: EmailConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Token signing key and per-kind lifetimes.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    #[serde(default = "default_access_lifetime_minutes")]
    pub access_lifetime_minutes: i64,
    #[serde(default = "default_refresh_lifetime_days")]
    pub refresh_lifetime_days: i64,
    #[serde(default = "default_one_time_lifetime_minutes")]
    pub one_time_lifetime_minutes: i64,
}

impl TokenConfig {
    /// Convert the configured counts into durations.
    ///
    /// # Errors
    /// Returns `ConfigError::Message` if a lifetime is outside the range a
    /// duration can hold
    pub fn lifetimes(&self) -> Result<TokenLifetimes, ConfigError> {
        Ok(TokenLifetimes {
            access: lifetime(
                "tokens.access_lifetime_minutes",
                TimeDelta::try_minutes(self.access_lifetime_minutes),
            )?,
            refresh: lifetime(
                "tokens.refresh_lifetime_days",
                TimeDelta::try_days(self.refresh_lifetime_days),
            )?,
            one_time: lifetime(
                "tokens.one_time_lifetime_minutes",
                TimeDelta::try_minutes(self.one_time_lifetime_minutes),
            )?,
        })
    }

    /// Build the shared authenticator from this section.
    pub fn authenticator(&self) -> Result<Authenticator, ConfigError> {
        Ok(Authenticator::new(self.secret.as_bytes(), self.lifetimes()?))
    }
}

// Tokens stamp `exp = now + lifetime`, so the sum must stay representable.
fn lifetime(key: &str, value: Option<TimeDelta>) -> Result<TimeDelta, ConfigError> {
    value
        .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
        .ok_or_else(|| ConfigError::Message(format!("{key} is out of range")))
}

/// Outbound email configuration.
///
/// Without `smtp_host` messages go to the log instead of an SMTP relay.
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    /// Prefix for links embedded in emails.
    pub base_url: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_lifetime_minutes() -> i64 {
    5
}

fn default_refresh_lifetime_days() -> i64 {
    7
}

fn default_one_time_lifetime_minutes() -> i64 {
    3
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@localhost".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (DATABASE__URL, TOKENS__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: TOKENS__SECRET=... overrides tokens.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
