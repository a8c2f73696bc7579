use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

use crate::room::{clock::Clock, repository::RoomRepository};
use crate::user::TokenIssuer;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_repository: Arc<dyn RoomRepository + Send + Sync>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub clock: Arc<dyn Clock>,
    pub app_version: Arc<serde_json::Map<String, serde_json::Value>>,
}

impl AppState {
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        token_issuer: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
        app_version: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            room_repository,
            token_issuer,
            clock,
            app_version: Arc::new(app_version),
        }
    }
}

/// Numeric status carried in every response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ResultCode {
    Ok,
    ParamError,
    ServerError,
    /// Success on routes whose payload sits under `result`; existing clients expect 200 there
    ResultOk,
}

impl From<ResultCode> for u8 {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Ok => 0,
            ResultCode::ParamError => 1,
            ResultCode::ServerError => 2,
            ResultCode::ResultOk => 200,
        }
    }
}

impl TryFrom<u8> for ResultCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ResultCode::Ok),
            1 => Ok(ResultCode::ParamError),
            2 => Ok(ResultCode::ServerError),
            200 => Ok(ResultCode::ResultOk),
            other => Err(format!("unknown result code {other}")),
        }
    }
}

/// Body for operations that only report success
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub code: ResultCode,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            code: ResultCode::Ok,
        }
    }
}

/// Body for operations that hand back a payload under `result`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultResponse<T> {
    pub code: ResultCode,
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            code: ResultCode::ResultOk,
            result,
        }
    }
}

/// Body returned for every failed request
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub code: ResultCode,
    pub desc: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Dependency(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn code(&self) -> ResultCode {
        match self {
            AppError::Validation(_) => ResultCode::ParamError,
            AppError::Dependency(_) | AppError::Internal => ResultCode::ServerError,
        }
    }

    /// Builds a validation error naming every missing field
    pub fn missing_fields(fields: &[&str]) -> Self {
        AppError::Validation(format!("missing required field(s): {}", fields.join(", ")))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => warn!(desc = %msg, "Rejecting request"),
            AppError::Dependency(msg) => error!(desc = %msg, "Downstream call failed"),
            AppError::Internal => error!("Internal error while handling request"),
        }

        let body = Json(ErrorResponse {
            code: self.code(),
            desc: self.to_string(),
        });

        // Clients read the outcome from `code`, so the transport status stays 200
        (StatusCode::OK, body).into_response()
    }
}

/// JSON extractor that reports binding failures as parameter errors.
/// The body is decoded as JSON whatever `Content-Type` the client sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection_to_error(rejection)),
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

/// Produces the body sent when a handler panics
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    error!("Handler panicked; answering with a generic server error");

    let body = Json(ErrorResponse {
        code: ResultCode::ServerError,
        desc: AppError::Internal.to_string(),
    });

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
