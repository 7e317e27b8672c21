//! Capture step machine — the scripted lead-capture sequence.
//!
//! Progresses linearly: LastName → FirstName → Phone → Email → Done.
//! Each step is described by an entry in [`STEPS`], a data-driven table of
//! (normalizer, retry warning, prompt) rather than a chain of conditionals.
//! Failed validation on phone/email is a self-loop; steps never move
//! backward.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::model::{Lead, LeadField};

/// The phases of the lead-capture conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureStep {
    LastName,
    FirstName,
    Phone,
    Email,
    Done,
}

impl CaptureStep {
    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<CaptureStep> {
        match self {
            Self::LastName => Some(Self::FirstName),
            Self::FirstName => Some(Self::Phone),
            Self::Phone => Some(Self::Email),
            Self::Email => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Whether this step is terminal (capture is complete, everything is
    /// free-form chat from here on).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Index into the step table, `None` once terminal.
    fn index(&self) -> Option<usize> {
        match self {
            Self::LastName => Some(0),
            Self::FirstName => Some(1),
            Self::Phone => Some(2),
            Self::Email => Some(3),
            Self::Done => None,
        }
    }

    /// The table entry describing this step, `None` once terminal.
    pub fn spec(&self) -> Option<&'static StepSpec> {
        self.index().map(|i| &STEPS[i])
    }
}

impl Default for CaptureStep {
    fn default() -> Self {
        Self::LastName
    }
}

impl std::fmt::Display for CaptureStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::LastName => "last_name",
            Self::FirstName => "first_name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// One entry of the capture sequence.
pub struct StepSpec {
    /// Lead field this step fills in.
    pub field: LeadField,
    /// Question Betty asks to collect this field.
    pub prompt: &'static str,
    /// Warning shown when the answer is rejected.
    pub retry: &'static str,
    /// Validate and normalize an answer; `None` rejects it.
    pub normalize: fn(&str) -> Option<String>,
}

/// The scripted capture sequence, in order.
pub static STEPS: [StepSpec; 4] = [
    StepSpec {
        field: LeadField::LastName,
        prompt: "Pour commencer, quel est votre nom de famille ?",
        retry: "Pouvez-vous m'indiquer votre nom de famille ?",
        normalize: normalize_last_name,
    },
    StepSpec {
        field: LeadField::FirstName,
        prompt: "Merci ! Et votre prénom ?",
        retry: "Pouvez-vous m'indiquer votre prénom ?",
        normalize: normalize_first_name,
    },
    StepSpec {
        field: LeadField::Phone,
        prompt: "Quel est votre numéro de téléphone ?",
        retry: "Ce numéro semble incomplet. Pouvez-vous le ressaisir (8 chiffres minimum) ?",
        normalize: normalize_phone,
    },
    StepSpec {
        field: LeadField::Email,
        prompt: "Parfait. Quelle est votre adresse e-mail ?",
        retry: "Cette adresse e-mail semble invalide. Pouvez-vous la vérifier ?",
        normalize: normalize_email,
    },
];

/// Result of offering a user answer to the capture sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Answer accepted; ask `prompt` next.
    Advanced { prompt: &'static str },
    /// Answer accepted and the lead is now complete.
    Completed,
    /// Answer rejected; show `warning` and stay on the same step.
    Retry { warning: &'static str },
    /// Capture already finished — the answer is free-form chat.
    NotApplicable,
}

/// Offer a user answer to the current capture step.
///
/// On acceptance the matching lead field is set and `step` advances; on
/// rejection both are left untouched.
pub fn advance(step: &mut CaptureStep, lead: &mut Lead, input: &str) -> StepOutcome {
    let Some(spec) = step.spec() else {
        return StepOutcome::NotApplicable;
    };
    match (spec.normalize)(input) {
        None => StepOutcome::Retry {
            warning: spec.retry,
        },
        Some(value) => {
            lead.set(spec.field, value);
            *step = step.next().unwrap_or(CaptureStep::Done);
            match step.spec() {
                Some(next) => StepOutcome::Advanced {
                    prompt: next.prompt,
                },
                None => StepOutcome::Completed,
            }
        }
    }
}

/// Any non-empty input, upper-cased.
fn normalize_last_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_uppercase())
}

/// Any non-empty input, first character capitalized.
fn normalize_first_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}

/// Keep digits and a leading `+`; require at least 8 digits.
fn normalize_phone(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let mut cleaned = String::new();
    for (i, c) in trimmed.chars().enumerate() {
        if c.is_ascii_digit() || (c == '+' && i == 0) {
            cleaned.push(c);
        }
    }
    let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 8 {
        return None;
    }
    Some(cleaned)
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // local@domain.tld — non-whitespace local part and domain, TLD ≥2 chars
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern is valid"))
}

/// `local@domain.tld` shape.
fn normalize_email(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if email_re().is_match(trimmed) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        use CaptureStep::*;
        let expected = [FirstName, Phone, Email, Done];
        let mut current = LastName;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
        assert!(current.is_terminal());
    }

    #[test]
    fn display_matches_serde() {
        use CaptureStep::*;
        for step in [LastName, FirstName, Phone, Email, Done] {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn last_name_is_uppercased_and_advances() {
        let mut step = CaptureStep::LastName;
        let mut lead = Lead::default();
        let outcome = advance(&mut step, &mut lead, "Martin");
        assert_eq!(
            outcome,
            StepOutcome::Advanced {
                prompt: STEPS[1].prompt
            }
        );
        assert_eq!(lead.last_name, "MARTIN");
        assert_eq!(step, CaptureStep::FirstName);
    }

    #[test]
    fn first_name_gets_capitalized() {
        let mut step = CaptureStep::FirstName;
        let mut lead = Lead::default();
        advance(&mut step, &mut lead, "lucie");
        assert_eq!(lead.first_name, "Lucie");
        assert_eq!(step, CaptureStep::Phone);
    }

    #[test]
    fn phone_is_stripped_to_digits() {
        let mut step = CaptureStep::Phone;
        let mut lead = Lead::default();
        advance(&mut step, &mut lead, "06 12 34 56 78");
        assert_eq!(lead.phone, "0612345678");
        assert_eq!(step, CaptureStep::Email);
    }

    #[test]
    fn phone_keeps_leading_plus() {
        let mut step = CaptureStep::Phone;
        let mut lead = Lead::default();
        advance(&mut step, &mut lead, "+33 6 12 34 56 78");
        assert_eq!(lead.phone, "+33612345678");
    }

    #[test]
    fn short_phone_is_a_self_loop() {
        let mut step = CaptureStep::Phone;
        let mut lead = Lead::default();
        let outcome = advance(&mut step, &mut lead, "abc");
        assert_eq!(
            outcome,
            StepOutcome::Retry {
                warning: STEPS[2].retry
            }
        );
        assert_eq!(step, CaptureStep::Phone);
        assert!(lead.phone.is_empty());

        // 7 digits is still too short
        let outcome = advance(&mut step, &mut lead, "06 12 34 5");
        assert!(matches!(outcome, StepOutcome::Retry { .. }));
        assert_eq!(step, CaptureStep::Phone);
    }

    #[test]
    fn minimal_email_completes_the_lead() {
        let mut step = CaptureStep::Email;
        let mut lead = Lead {
            last_name: "MARTIN".to_string(),
            first_name: "Lucie".to_string(),
            phone: "0612345678".to_string(),
            ..Default::default()
        };
        let outcome = advance(&mut step, &mut lead, "a@b.cd");
        assert_eq!(outcome, StepOutcome::Completed);
        assert_eq!(step, CaptureStep::Done);
        assert!(lead.is_complete());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["no-at-sign", "a@b", "a@b.c", "a b@c.de", "a@b c.de", "@b.cd", "a@.cd"] {
            let mut step = CaptureStep::Email;
            let mut lead = Lead::default();
            let outcome = advance(&mut step, &mut lead, bad);
            assert!(
                matches!(outcome, StepOutcome::Retry { .. }),
                "{bad} should be rejected"
            );
            assert_eq!(step, CaptureStep::Email);
            assert!(lead.email.is_empty());
        }
    }

    #[test]
    fn done_step_is_not_applicable() {
        let mut step = CaptureStep::Done;
        let mut lead = Lead::default();
        let outcome = advance(&mut step, &mut lead, "bonjour");
        assert_eq!(outcome, StepOutcome::NotApplicable);
        assert_eq!(step, CaptureStep::Done);
        assert_eq!(lead, Lead::default());
    }

    #[test]
    fn full_sequence_fills_the_lead() {
        let mut step = CaptureStep::default();
        let mut lead = Lead::default();
        for input in ["Martin", "Lucie", "06 12 34 56 78", "lucie@martin.fr"] {
            advance(&mut step, &mut lead, input);
        }
        assert_eq!(lead.last_name, "MARTIN");
        assert_eq!(lead.first_name, "Lucie");
        assert_eq!(lead.phone, "0612345678");
        assert_eq!(lead.email, "lucie@martin.fr");
        assert!(lead.is_complete());
        assert!(step.is_terminal());
    }
}
