// Library crate for the live room registry service
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod room;
pub mod shared;
pub mod user;
pub mod version;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use room::{
    clock::{Clock, SystemClock},
    models::RoomDetail,
    repository::{InMemoryRoomRepository, RoomRepository},
};
pub use shared::{AppError, AppState, ResultCode};
pub use user::{RongCloudConfig, RongCloudTokenIssuer, TokenIssuer};

/// Builds the full HTTP surface: routes, panic recovery, CORS and request tracing
pub fn build_router(state: AppState) -> Router {
    with_boundary_layers(
        Router::new()
            .route("/publish", post(room::publish))
            .route("/unpublish", post(room::unpublish))
            .route("/query", post(room::query))
            .route("/user/get_token", post(user::get_token))
            .route("/app/version", get(version::app_version)),
    )
    .with_state(state)
}

fn with_boundary_layers(router: Router<AppState>) -> Router<AppState> {
    // Any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(12 * 60 * 60));

    router
        .layer(CatchPanicLayer::custom(shared::panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
