//! Ban appeal server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p appeal-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use appeal_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration comes first so the log format can follow APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.server.port,
        guild_id = %config.discord.guild_id,
        "Configuration loaded"
    );

    if let Err(e) = appeal_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
