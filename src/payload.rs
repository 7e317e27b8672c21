//! Structured lead payload embedded in chat replies.
//!
//! The backend may append a machine-readable lead-extraction block to a
//! reply, delimited by `<LEAD_JSON>` and an optional `</LEAD_JSON>` end tag.
//! [`parse_reply`] splits a raw reply into the text safe to display and the
//! extracted payload, keeping extraction testable independent of rendering.

use serde::{Deserialize, Serialize};

/// Start marker of the embedded payload.
pub const LEAD_TAG_START: &str = "<LEAD_JSON>";
/// End marker; replies may omit it, in which case the payload runs to the
/// end of the text.
pub const LEAD_TAG_END: &str = "</LEAD_JSON>";

/// Machine-readable lead data the backend extracted from the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadPayload {
    pub reason: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub availability: Option<String>,
    /// Qualification stage reported by the backend (`collecting` or `ready`).
    pub stage: Option<String>,
}

/// A chat reply split into displayable text and extracted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// Reply text with the payload block stripped and whitespace trimmed.
    /// May be empty if the reply was nothing but the payload.
    pub display: String,
    /// The parsed payload, if present and well-formed.
    pub payload: Option<LeadPayload>,
}

/// Strip the embedded payload block from a raw reply.
///
/// A malformed JSON body is still stripped from the display text; it just
/// yields no payload.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let Some(start) = raw.find(LEAD_TAG_START) else {
        return ParsedReply {
            display: raw.trim().to_string(),
            payload: None,
        };
    };

    let after = &raw[start + LEAD_TAG_START.len()..];
    let (body, rest) = match after.find(LEAD_TAG_END) {
        Some(end) => (&after[..end], &after[end + LEAD_TAG_END.len()..]),
        None => (after, ""),
    };

    let payload = match serde_json::from_str::<LeadPayload>(body.trim()) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::debug!("Unparseable lead payload in reply: {e}");
            None
        }
    };

    let mut display = raw[..start].to_string();
    display.push_str(rest);

    ParsedReply {
        display: display.trim().to_string(),
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reply_passes_through() {
        let parsed = parse_reply("Bonjour, comment puis-je vous aider ?");
        assert_eq!(parsed.display, "Bonjour, comment puis-je vous aider ?");
        assert!(parsed.payload.is_none());
    }

    #[test]
    fn payload_is_stripped_and_parsed() {
        let raw = "Bien noté, je transmets au cabinet.\n<LEAD_JSON>{\"reason\": \"divorce\", \"name\": \"Lucie Martin\", \"stage\": \"ready\"}</LEAD_JSON>";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.display, "Bien noté, je transmets au cabinet.");
        let payload = parsed.payload.unwrap();
        assert_eq!(payload.reason.as_deref(), Some("divorce"));
        assert_eq!(payload.name.as_deref(), Some("Lucie Martin"));
        assert_eq!(payload.stage.as_deref(), Some("ready"));
        assert!(payload.email.is_none());
    }

    #[test]
    fn missing_end_tag_strips_to_end_of_text() {
        let raw = "D'accord.\n<LEAD_JSON>{\"stage\": \"collecting\"}";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.display, "D'accord.");
        assert_eq!(parsed.payload.unwrap().stage.as_deref(), Some("collecting"));
    }

    #[test]
    fn text_after_end_tag_is_kept() {
        let raw = "Avant.<LEAD_JSON>{}</LEAD_JSON> Après.";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.display, "Avant. Après.");
        assert!(parsed.payload.is_some());
    }

    #[test]
    fn malformed_json_is_still_stripped() {
        let raw = "Voilà.\n<LEAD_JSON>{not json}</LEAD_JSON>";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.display, "Voilà.");
        assert!(parsed.payload.is_none());
    }

    #[test]
    fn payload_only_reply_yields_empty_display() {
        let raw = "<LEAD_JSON>{\"stage\": \"collecting\"}</LEAD_JSON>";
        let parsed = parse_reply(raw);
        assert!(parsed.display.is_empty());
        assert!(parsed.payload.is_some());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let raw = "  Réponse utile.  \n<LEAD_JSON>{}</LEAD_JSON>\n";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.display, "Réponse utile.");
    }
}
