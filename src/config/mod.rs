pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod validate;

pub use configs::{AppConfig, CorsConfig, DatabaseConfig, GeneralConfig, LoggingConfig};
pub use envconfig::EnvConfig;
