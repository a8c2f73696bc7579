use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::RoomService,
    types::{PublishRequest, RoomIdRequest, RoomListResponse},
};
use crate::shared::{ApiJson, AppError, AppState, StatusResponse};

fn room_service(state: &AppState) -> RoomService {
    RoomService::new(
        Arc::clone(&state.room_repository),
        Arc::clone(&state.clock),
    )
}

/// HTTP handler for publishing a room
///
/// POST /publish
#[instrument(name = "publish", skip(state))]
pub async fn publish(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PublishRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let room = request.validate()?;
    info!(room_id = %room.id, "Publishing room");

    room_service(&state).publish(room).await;

    Ok(Json(StatusResponse::ok()))
}

/// HTTP handler for removing a published room
///
/// POST /unpublish
#[instrument(name = "unpublish", skip(state))]
pub async fn unpublish(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RoomIdRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let room_id = request.require_room_id()?;
    info!(room_id = %room_id, "Unpublishing room");

    room_service(&state).unpublish(&room_id).await;

    Ok(Json(StatusResponse::ok()))
}

/// HTTP handler for listing rooms or looking one up
///
/// POST /query
/// An empty or absent roomId lists every room, newest first
#[instrument(name = "query", skip(state))]
pub async fn query(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RoomIdRequest>,
) -> Result<Json<RoomListResponse>, AppError> {
    let filter = request.filter();
    let rooms = room_service(&state).query(filter.as_deref()).await;

    info!(room_count = rooms.len(), filtered = filter.is_some(), "Rooms queried");

    Ok(Json(RoomListResponse::ok(rooms)))
}
