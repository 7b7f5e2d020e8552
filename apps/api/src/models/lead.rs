use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One prospective contact. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub linked_in_url: String,
    pub email_address: String,
}

impl LeadRecord {
    /// "First Last", trimmed. Empty when neither name part is set.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// A lead with neither title nor email is treated as absent.
    pub fn is_absent(&self) -> bool {
        self.title.trim().is_empty() && self.email_address.trim().is_empty()
    }
}

/// Personalization shared by every lead in a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationContext {
    pub investment_themes: String,
    pub impact_or_philanthropy: String,
    pub personalization_angle: String,
    pub sources_note: String,
    pub lead_type: String,
    pub location: String,
    pub website: String,
    pub status: String,
}

/// The lead form: one or two leads plus shared context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub lead_1: LeadRecord,
    pub lead_2: LeadRecord,
    pub context: PersonalizationContext,
}

impl GenerationRequest {
    pub fn has_second_lead(&self) -> bool {
        !self.lead_2.is_absent()
    }

    pub fn lead(&self, slot: LeadSlot) -> &LeadRecord {
        match slot {
            LeadSlot::First => &self.lead_1,
            LeadSlot::Second => &self.lead_2,
        }
    }
}

/// Identifies a lead inside a request and its key in the generator's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadSlot {
    #[serde(rename = "lead_1")]
    First,
    #[serde(rename = "lead_2")]
    Second,
}

impl LeadSlot {
    pub const ALL: [LeadSlot; 2] = [LeadSlot::First, LeadSlot::Second];

    #[cfg(test)]
    pub fn key(self) -> &'static str {
        match self {
            LeadSlot::First => "lead_1",
            LeadSlot::Second => "lead_2",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            LeadSlot::First => 1,
            LeadSlot::Second => 2,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field names
// ────────────────────────────────────────────────────────────────────────────

/// Every editable form field, addressed by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LeadField {
    Title1,
    FirstName1,
    LastName1,
    LinkedIn1,
    Email1,
    Title2,
    FirstName2,
    LastName2,
    LinkedIn2,
    Email2,
    InvestmentThemes,
    ImpactPhilanthropy,
    PersonalizationAngle,
    Sources,
    LeadType,
    Location,
    Website,
    Status,
}

impl LeadField {
    pub const ALL: [LeadField; 18] = [
        LeadField::Title1,
        LeadField::FirstName1,
        LeadField::LastName1,
        LeadField::LinkedIn1,
        LeadField::Email1,
        LeadField::Title2,
        LeadField::FirstName2,
        LeadField::LastName2,
        LeadField::LinkedIn2,
        LeadField::Email2,
        LeadField::InvestmentThemes,
        LeadField::ImpactPhilanthropy,
        LeadField::PersonalizationAngle,
        LeadField::Sources,
        LeadField::LeadType,
        LeadField::Location,
        LeadField::Website,
        LeadField::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::Title1 => "title1",
            LeadField::FirstName1 => "firstName1",
            LeadField::LastName1 => "lastName1",
            LeadField::LinkedIn1 => "linkedIn1",
            LeadField::Email1 => "email1",
            LeadField::Title2 => "title2",
            LeadField::FirstName2 => "firstName2",
            LeadField::LastName2 => "lastName2",
            LeadField::LinkedIn2 => "linkedIn2",
            LeadField::Email2 => "email2",
            LeadField::InvestmentThemes => "investmentThemes",
            LeadField::ImpactPhilanthropy => "impactPhilanthropy",
            LeadField::PersonalizationAngle => "personalizationAngle",
            LeadField::Sources => "sources",
            LeadField::LeadType => "leadType",
            LeadField::Location => "location",
            LeadField::Website => "website",
            LeadField::Status => "status",
        }
    }

    /// Names used by the single-lead form layout.
    fn from_alias(name: &str) -> Option<Self> {
        match name {
            "title" => Some(LeadField::Title1),
            "firstName" => Some(LeadField::FirstName1),
            "lastName" => Some(LeadField::LastName1),
            "linkedIn" => Some(LeadField::LinkedIn1),
            "impact" => Some(LeadField::ImpactPhilanthropy),
            _ => None,
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown lead field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for LeadField {
    type Err = UnknownField;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        LeadField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .or_else(|| LeadField::from_alias(name))
            .ok_or_else(|| UnknownField(name.to_string()))
    }
}

impl TryFrom<String> for LeadField {
    type Error = UnknownField;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<LeadField> for &'static str {
    fn from(field: LeadField) -> Self {
        field.as_str()
    }
}
