//! Business-vertical packs.
//!
//! A pack selects the domain-specific behavior of a bot: the question Betty
//! opens the free-form conversation with once the contact details are
//! captured, and the default bot identifier used when none is configured.

use serde::{Deserialize, Serialize};

/// Supported business verticals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pack {
    Avocat,
    Medecin,
    Immo,
}

impl Pack {
    /// Human-readable French label, shown next to the bot name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Avocat => "Avocat",
            Self::Medecin => "Médecin",
            Self::Immo => "Immobilier",
        }
    }

    /// Seed bot identifier for this pack.
    pub fn default_bot_id(&self) -> &'static str {
        match self {
            Self::Avocat => "avocat-001",
            Self::Medecin => "medecin-003",
            Self::Immo => "immo-002",
        }
    }

    /// First free-form question, asked right after the lead is captured.
    pub fn first_question(&self) -> &'static str {
        match self {
            Self::Avocat => "Parfait, tout est noté ! Quel est le motif de votre demande juridique ?",
            Self::Medecin => "Parfait, tout est noté ! Quel est le motif de votre consultation ?",
            Self::Immo => "Parfait, tout est noté ! Quel est votre projet immobilier ?",
        }
    }
}

impl Default for Pack {
    fn default() -> Self {
        Self::Avocat
    }
}

impl std::fmt::Display for Pack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Avocat => "avocat",
            Self::Medecin => "medecin",
            Self::Immo => "immo",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Pack {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avocat" => Ok(Self::Avocat),
            "medecin" => Ok(Self::Medecin),
            // "immobilier" shows up in older embed snippets
            "immo" | "immobilier" => Ok(Self::Immo),
            other => Err(format!("unknown pack: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_packs() {
        assert_eq!("avocat".parse::<Pack>().unwrap(), Pack::Avocat);
        assert_eq!("medecin".parse::<Pack>().unwrap(), Pack::Medecin);
        assert_eq!("immo".parse::<Pack>().unwrap(), Pack::Immo);
        assert_eq!("Immobilier".parse::<Pack>().unwrap(), Pack::Immo);
    }

    #[test]
    fn parse_unknown_pack_fails() {
        assert!("notaire".parse::<Pack>().is_err());
    }

    #[test]
    fn display_matches_serde() {
        for pack in [Pack::Avocat, Pack::Medecin, Pack::Immo] {
            let display = format!("{pack}");
            let json = serde_json::to_string(&pack).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn every_pack_has_a_first_question() {
        for pack in [Pack::Avocat, Pack::Medecin, Pack::Immo] {
            assert!(!pack.first_question().is_empty());
            assert!(!pack.default_bot_id().is_empty());
        }
    }
}
