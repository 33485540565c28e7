//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use appeal_common::{AppConfig, AppError, ConfigError};
use appeal_db::{apply_schema, create_pool, PgAppealConfigRepository, PgAppealRepository};
use appeal_discord::{http_client, DiscordClient, DiscordOAuth, OAuthSettings};
use appeal_service::ServiceContextBuilder;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let mut router = create_router();
    if let Some(dir) = &config.assets.static_dir {
        info!(dir = %dir, "Serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    let router = apply_middleware_with_config(
        router,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )
    .merge(health_routes());

    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = appeal_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    apply_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create repositories
    let appeal_repo = Arc::new(PgAppealRepository::new(pool.clone()));
    let config_repo = Arc::new(PgAppealConfigRepository::new(pool));

    // One HTTP client, and one bot token, for the life of the process
    let http = http_client().map_err(AppError::internal)?;
    let discord = &config.discord;
    let identity_provider = Arc::new(DiscordClient::new(
        http.clone(),
        &discord.api_base,
        discord.bot_token.clone(),
    ));
    let oauth_client = Arc::new(
        DiscordOAuth::new(
            http,
            OAuthSettings {
                client_id: discord.client_id.clone(),
                client_secret: discord.client_secret.clone(),
                redirect_uri: discord.redirect_uri.clone(),
                authorize_url: discord.authorize_url.clone(),
                api_base: discord.api_base.clone(),
            },
        )
        .map_err(AppError::internal)?,
    );

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .appeal_repo(appeal_repo)
        .config_repo(config_repo)
        .identity_provider(identity_provider)
        .oauth_client(oauth_client)
        .guild_id(discord.guild_id)
        .build()
        .map_err(AppError::internal)?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|_| ConfigError::InvalidValue("HOST", config.server.host.clone()))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
