//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AssetsConfig, ConfigError, CorsConfig, DatabaseConfig, DiscordConfig,
    Environment, RateLimitConfig, ServerConfig,
};
