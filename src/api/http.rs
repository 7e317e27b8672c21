//! HTTP backend client built on reqwest.

use async_trait::async_trait;

use crate::error::ApiError;

use super::{BotMeta, ChatBackend, ChatReply, ChatRequest, LeadSubmission};

/// HTTP client for the hosted chat/lead backend.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/{endpoint}", self.base_url)
    }

    /// Fetch branding metadata for a bot (display name, greeting, colors).
    pub async fn fetch_meta(&self, bot_id: &str) -> Result<BotMeta, ApiError> {
        let resp = self
            .client
            .get(self.api_url("embed_meta"))
            .query(&[("public_id", bot_id)])
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: "embed_meta".to_string(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "embed_meta".to_string(),
                status: resp.status().as_u16(),
            });
        }

        resp.json().await.map_err(|e| ApiError::InvalidResponse {
            endpoint: "embed_meta".to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn reply(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        tracing::debug!(conv_id = %request.conv_id, "Forwarding message to chat backend");

        let resp = self
            .client
            .post(self.api_url("bettybot"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: "bettybot".to_string(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "bettybot".to_string(),
                status: resp.status().as_u16(),
            });
        }

        resp.json().await.map_err(|e| ApiError::InvalidResponse {
            endpoint: "bettybot".to_string(),
            reason: e.to_string(),
        })
    }

    async fn submit_lead(&self, submission: LeadSubmission) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.api_url("lead"))
            .json(&submission)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: "lead".to_string(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "lead".to_string(),
                status: resp.status().as_u16(),
            });
        }

        // Response body is ignored (fire-and-forget contract).
        Ok(())
    }
}
