//! Lead conversation engine.
//!
//! Owns the conversation state for one session and decides, turn by turn,
//! whether a user message is consumed by the scripted lead-capture sequence
//! or forwarded to the remote chat backend. No error is fatal: validation
//! failures become retry prompts, transport failures become one-off warning
//! bubbles, and lead-submission failures are swallowed.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::{ChatBackend, ChatRequest, HistoryEntry, LeadSubmission, Role};
use crate::config::BotConfig;
use crate::conversation::{Author, Kind, Message, Transcript};
use crate::lead::{CaptureStep, Lead, StepOutcome, advance};
use crate::payload::parse_reply;

/// Default greeting when the backend provides none.
pub const DEFAULT_GREETING: &str = "Bonjour, je suis Betty. Comment puis-je vous aider ?";

/// Warning shown when the chat call fails or its reply cannot be used.
const TRANSPORT_WARNING: &str = "Désolé, une erreur est survenue. Pouvez-vous réessayer ?";

/// Warning shown when a reply is empty once the payload block is stripped.
const EMPTY_REPLY_WARNING: &str = "Désolé, je n'ai pas pu générer de réponse.";

/// Whether a network round trip is outstanding.
///
/// The UI is expected to disable input while [`InFlight::Busy`]; input
/// submitted anyway is dropped without being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InFlight {
    Idle,
    Busy,
}

/// Mutable per-session state, only ever touched by the single active task.
#[derive(Debug, Default)]
struct Session {
    lead: Lead,
    step: CaptureStep,
    transcript: Transcript,
}

impl Session {
    /// Prior turns for the chat call, warnings excluded, capped at `limit`.
    fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .transcript
            .messages()
            .iter()
            .filter(|m| m.kind == Kind::Normal)
            .map(|m| HistoryEntry {
                role: match m.author {
                    Author::User => Role::User,
                    Author::Bot => Role::Assistant,
                },
                content: m.text.clone(),
            })
            .collect();
        let excess = entries.len().saturating_sub(limit);
        entries.drain(..excess);
        entries
    }
}

/// Drives one lead-qualification conversation.
pub struct Engine {
    config: BotConfig,
    backend: Arc<dyn ChatBackend>,
    conv_id: String,
    session: RwLock<Session>,
    in_flight: RwLock<InFlight>,
}

impl Engine {
    pub fn new(config: BotConfig, backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            config,
            backend,
            conv_id: Uuid::new_v4().to_string(),
            session: RwLock::new(Session::default()),
            in_flight: RwLock::new(InFlight::Idle),
        }
    }

    pub fn conv_id(&self) -> &str {
        &self.conv_id
    }

    pub async fn is_busy(&self) -> bool {
        *self.in_flight.read().await == InFlight::Busy
    }

    pub async fn step(&self) -> CaptureStep {
        self.session.read().await.step
    }

    pub async fn lead(&self) -> Lead {
        self.session.read().await.lead.clone()
    }

    /// Snapshot of the transcript so far.
    pub async fn messages(&self) -> Vec<Message> {
        self.session.read().await.transcript.messages().to_vec()
    }

    /// Open the session: greeting plus the first scripted prompt.
    ///
    /// Returns the appended messages.
    pub async fn start(&self, greeting: Option<&str>) -> Vec<Message> {
        let greeting = match greeting {
            Some(g) if !g.trim().is_empty() => g,
            _ => DEFAULT_GREETING,
        };
        let mut appended = vec![self.append(Message::bot(greeting)).await];
        let first_prompt = self.session.read().await.step.spec().map(|s| s.prompt);
        if let Some(prompt) = first_prompt {
            appended.push(self.append(Message::bot(prompt)).await);
        }
        appended
    }

    /// Handle one user submission.
    ///
    /// Empty input and input arriving while a prior call is in flight are
    /// dropped; otherwise the appended messages (the user's own plus the
    /// bot's response) are returned.
    pub async fn submit(&self, text: &str) -> Vec<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        {
            let mut in_flight = self.in_flight.write().await;
            if *in_flight == InFlight::Busy {
                tracing::debug!("Submission dropped: request already in flight");
                return Vec::new();
            }
            *in_flight = InFlight::Busy;
        }

        let appended = self.handle(text).await;

        *self.in_flight.write().await = InFlight::Idle;
        appended
    }

    async fn handle(&self, text: &str) -> Vec<Message> {
        let user = Message::user(text);
        let (outcome, lead, history) = {
            let mut session = self.session.write().await;
            let session = &mut *session;
            let history = session.history(self.config.history_limit);
            session.transcript.push(user.clone());
            let outcome = advance(&mut session.step, &mut session.lead, text);
            (outcome, session.lead.clone(), history)
        };
        let mut appended = vec![user];

        match outcome {
            StepOutcome::Advanced { prompt } => {
                appended.push(self.append(Message::bot(prompt)).await);
            }
            StepOutcome::Retry { warning } => {
                appended.push(self.append(Message::warning(warning)).await);
            }
            StepOutcome::Completed => {
                let submission =
                    LeadSubmission::from_lead(&lead, self.config.pack, &self.config.bot_id);
                if let Err(e) = self.backend.submit_lead(submission).await {
                    // Best-effort: never surfaced to the visitor.
                    tracing::warn!("Lead submission failed: {e}");
                }
                appended.push(
                    self.append(Message::bot(self.config.pack.first_question()))
                        .await,
                );
            }
            StepOutcome::NotApplicable => {
                let request = ChatRequest {
                    message: text.to_string(),
                    bot_id: self.config.bot_id.clone(),
                    pack: self.config.pack,
                    conv_id: self.conv_id.clone(),
                    history,
                    lead,
                };
                appended.push(self.forward(request).await);
            }
        }

        appended
    }

    /// Forward a free-form message to the chat backend and turn the result
    /// into a bot message.
    async fn forward(&self, request: ChatRequest) -> Message {
        match self.backend.reply(request).await {
            Ok(reply) => {
                let parsed = parse_reply(&reply.response);
                if let Some(payload) = &parsed.payload {
                    tracing::debug!(stage = ?payload.stage, "Reply carried a lead payload");
                }
                if parsed.display.is_empty() {
                    self.append(Message::warning(EMPTY_REPLY_WARNING)).await
                } else {
                    self.append(Message::bot(parsed.display)).await
                }
            }
            Err(e) => {
                tracing::warn!("Chat backend call failed: {e}");
                self.append(Message::warning(TRANSPORT_WARNING)).await
            }
        }
    }

    async fn append(&self, message: Message) -> Message {
        let mut session = self.session.write().await;
        session.transcript.push(message.clone());
        message
    }
}
