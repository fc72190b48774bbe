use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    /// Absent means todos are kept in memory.
    pub database: Option<DatabaseConfig>,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    const LIST_KEYS: &'static [&'static str] = &["cors.allowed_origins"];

    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_db_min_idle")]
    pub min_idle: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Exact origins, or `*` for any. Empty disables CORS handling.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: defaults::DEFAULT_CORS_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        }
    }
}

fn default_db_max_connections() -> u32 {
    defaults::DEFAULT_DB_MAX_CONNECTIONS
}

fn default_db_min_idle() -> u32 {
    defaults::DEFAULT_DB_MIN_IDLE
}

#[cfg(test)]
mod tests {
    use ::config as config_rs;

    use super::AppConfig;

    fn load(overrides: &[(&str, &str)]) -> Result<AppConfig, config_rs::ConfigError> {
        let mut builder = config_rs::Config::builder();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        builder.build()?.try_deserialize()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let cfg = load(&[]).expect("defaults should deserialize");

        assert_eq!(cfg.general.host, "127.0.0.1");
        assert_eq!(cfg.general.port, 8000);
        assert!(cfg.database.is_none());
        assert_eq!(cfg.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn database_section_fills_pool_defaults() {
        let cfg = load(&[("database.url", "sqlite::memory:")])
            .expect("database config should deserialize");

        let database = cfg.database.expect("database section should be present");
        assert_eq!(database.url, "sqlite::memory:");
        assert_eq!(database.max_connections, 10);
        assert_eq!(database.min_idle, 2);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(load(&[("general.hostname", "example.com")]).is_err());
    }
}
