use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use roomcast::{
    build_router, AppState, Clock, InMemoryRoomRepository, RoomRepository, SystemClock,
    TokenIssuer,
};

use super::mocks::{SteppingClock, StubTokenIssuer};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub repository: Arc<InMemoryRoomRepository>,
    pub client: ApiClient,
}

pub struct TestSetupBuilder {
    clock: Arc<dyn Clock>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SteppingClock::starting_at(1_000)),
            token_issuer: Arc::new(StubTokenIssuer),
        }
    }

    pub fn with_system_clock(mut self) -> Self {
        self.clock = Arc::new(SystemClock::new());
        self
    }

    pub fn with_token_issuer(mut self, token_issuer: Arc<dyn TokenIssuer>) -> Self {
        self.token_issuer = token_issuer;
        self
    }

    pub fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let app_state = AppState::new(
            repository.clone() as Arc<dyn RoomRepository + Send + Sync>,
            self.token_issuer,
            self.clock,
            serde_json::Map::new(),
        );

        TestSetup {
            repository,
            client: ApiClient {
                router: build_router(app_state),
            },
        }
    }
}

/// Thin JSON client over the in-process router
#[derive(Clone)]
pub struct ApiClient {
    router: Router,
}

impl ApiClient {
    pub async fn post(&self, uri: &str, body: Value) -> Value {
        self.post_as(uri, "application/json", body).await
    }

    /// Posts the JSON body under an arbitrary `Content-Type`
    pub async fn post_as(&self, uri: &str, content_type: &str, body: Value) -> Value {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn publish(&self, room_id: &str, room_name: &str) -> Value {
        self.post(
            "/publish",
            serde_json::json!({
                "roomId": room_id,
                "mcuUrl": format!("rtmp://mcu.local/{room_id}"),
                "roomName": room_name,
                "pubUserId": format!("publisher-{room_id}"),
            }),
        )
        .await
    }

    pub async fn unpublish(&self, room_id: &str) -> Value {
        self.post("/unpublish", serde_json::json!({ "roomId": room_id }))
            .await
    }

    /// Returns the room ids of a query, in response order
    pub async fn query_ids(&self, body: Value) -> Vec<String> {
        let reply = self.post("/query", body).await;
        assert_eq!(reply["code"], 0);
        reply["roomList"]
            .as_array()
            .unwrap()
            .iter()
            .map(|room| room["roomId"].as_str().unwrap().to_string())
            .collect()
    }
}
