//! Backend client — wire types and the `ChatBackend` seam.
//!
//! Two outbound calls: free-form chat (call A) and fire-and-forget lead
//! submission (call B), plus a branding metadata fetch used by the chat
//! surface.

pub mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::lead::Lead;
use crate::pack::Pack;

/// Role of a history entry sent to the chat backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior dialogue turn sent with a chat call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// Request body for the free-form chat call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub bot_id: String,
    pub pack: Pack,
    pub conv_id: String,
    pub history: Vec<HistoryEntry>,
    /// Current partial lead, complete or not.
    pub lead: Lead,
}

/// Response body of the free-form chat call.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Request body for the lead submission call.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    /// Free-text block summarizing all captured fields.
    pub message: String,
    pub metadata: LeadMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadMetadata {
    pub pack: Pack,
    pub bot_id: String,
}

impl LeadSubmission {
    pub fn from_lead(lead: &Lead, pack: Pack, bot_id: &str) -> Self {
        Self {
            name: lead.full_name(),
            email: lead.email.clone(),
            message: lead.summary(),
            metadata: LeadMetadata {
                pack,
                bot_id: bot_id.to_string(),
            },
        }
    }
}

/// Branding metadata for a bot, served by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BotMeta {
    pub display_name: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub greeting: Option<String>,
}

/// The remote chat/lead backend, as seen by the engine.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Forward a free-form user message and get the bot's reply.
    async fn reply(&self, request: ChatRequest) -> Result<ChatReply, ApiError>;

    /// Submit a completed lead. Callers treat failures as best-effort.
    async fn submit_lead(&self, submission: LeadSubmission) -> Result<(), ApiError>;
}
