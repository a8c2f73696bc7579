use roomcast::{
    build_router, AppConfig, AppState, InMemoryRoomRepository, RongCloudTokenIssuer, SystemClock,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional .env file
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting room registry server");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;

    // Create shared application state with dependency injection
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let token_issuer = Arc::new(RongCloudTokenIssuer::new(config.rongcloud.clone())?);
    let app_state = AppState::new(
        room_repository,
        token_issuer,
        Arc::new(SystemClock::new()),
        config.app_version,
    );

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "Server running on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
