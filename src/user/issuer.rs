use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::types::IssuedToken;
use crate::shared::AppError;

/// Mints IM credentials for users through an external provider
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue_token(&self, user_id: &str) -> Result<IssuedToken, AppError>;
}

/// Provider code RongCloud uses for a successful call
const PROVIDER_SUCCESS_CODE: i64 = 200;

/// Connection settings for the RongCloud server API
#[derive(Clone)]
pub struct RongCloudConfig {
    pub app_key: String,
    pub app_secret: String,
    pub api_url: String,
    pub portrait_uri: String,
    pub timeout: Duration,
}

impl fmt::Debug for RongCloudConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RongCloudConfig")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("portrait_uri", &self.portrait_uri)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Body of a `user/getToken.json` reply, success or failure
#[derive(Debug, Deserialize)]
struct ProviderReply {
    code: i64,
    #[serde(rename = "userId")]
    user_id: Option<String>,
    token: Option<String>,
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}

/// Token issuer backed by RongCloud's user registration endpoint
pub struct RongCloudTokenIssuer {
    config: RongCloudConfig,
    http_client: reqwest::Client,
}

impl RongCloudTokenIssuer {
    pub fn new(config: RongCloudConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/user/getToken.json", self.config.api_url.trim_end_matches('/'))
    }
}

/// Hex SHA-1 of secret, nonce and timestamp, as the provider expects in `Signature`
pub fn request_signature(app_secret: &str, nonce: &str, timestamp: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(app_secret.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(timestamp.as_bytes());

    hex::encode(hasher.finalize())
}

#[async_trait]
impl TokenIssuer for RongCloudTokenIssuer {
    #[instrument(skip(self))]
    async fn issue_token(&self, user_id: &str) -> Result<IssuedToken, AppError> {
        let nonce = rand::random::<u32>().to_string();
        let timestamp = Utc::now().timestamp().to_string();
        let signature = request_signature(&self.config.app_secret, &nonce, &timestamp);

        debug!(endpoint = %self.endpoint(), "Requesting token from RongCloud");

        // The user id doubles as the display name
        let form = [
            ("userId", user_id),
            ("name", user_id),
            ("portraitUri", self.config.portrait_uri.as_str()),
        ];

        let response = self
            .http_client
            .post(self.endpoint())
            .header("App-Key", &self.config.app_key)
            .header("Nonce", &nonce)
            .header("Timestamp", &timestamp)
            .header("Signature", &signature)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "RongCloud request failed");
                AppError::Dependency(e.to_string())
            })?;

        let http_status = response.status();
        let reply: ProviderReply = response.json().await.map_err(|e| {
            warn!(%http_status, error = %e, "RongCloud reply was not readable");
            AppError::Dependency(format!("unreadable provider reply ({http_status}): {e}"))
        })?;

        if reply.code != PROVIDER_SUCCESS_CODE {
            let message = reply
                .error_message
                .unwrap_or_else(|| format!("provider rejected request with code {}", reply.code));
            warn!(provider_code = reply.code, %message, "RongCloud rejected token request");
            return Err(AppError::Dependency(message));
        }

        match (reply.user_id, reply.token) {
            (Some(user_id), Some(token)) => {
                info!("Token issued by RongCloud");
                Ok(IssuedToken { user_id, token })
            }
            _ => Err(AppError::Dependency(
                "provider reply is missing userId or token".to_string(),
            )),
        }
    }
}
