//! Lead data model.

use serde::{Deserialize, Serialize};

/// The contact fields collected for follow-up.
///
/// All fields start empty and are filled one at a time as the visitor
/// answers each scripted prompt. The lead is owned by the engine for the
/// duration of one session; there is no persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub email: String,
}

/// One field of a [`Lead`], used by the capture step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    LastName,
    FirstName,
    Phone,
    Email,
}

impl Lead {
    /// Whether all four fields have been captured.
    pub fn is_complete(&self) -> bool {
        !self.last_name.is_empty()
            && !self.first_name.is_empty()
            && !self.phone.is_empty()
            && !self.email.is_empty()
    }

    pub fn set(&mut self, field: LeadField, value: String) {
        match field {
            LeadField::LastName => self.last_name = value,
            LeadField::FirstName => self.first_name = value,
            LeadField::Phone => self.phone = value,
            LeadField::Email => self.email = value,
        }
    }

    /// Free-text block summarizing all captured fields, sent with the lead
    /// submission.
    pub fn summary(&self) -> String {
        format!(
            "Nom : {}\nPrénom : {}\nTéléphone : {}\nEmail : {}",
            self.last_name, self.first_name, self.phone, self.email
        )
    }

    /// "Prénom Nom" display form.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
