use serde::{Deserialize, Serialize};

use crate::models::lead::LeadSlot;

/// One generated email. The generator names the body `email`; both keys are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub subject: String,
    #[serde(alias = "email")]
    pub body: String,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// The fixed two-key reply schema of the lead-pair flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPair {
    pub lead_1: Draft,
    pub lead_2: Draft,
}

impl DraftPair {
    pub fn get(&self, slot: LeadSlot) -> &Draft {
        match slot {
            LeadSlot::First => &self.lead_1,
            LeadSlot::Second => &self.lead_2,
        }
    }
}

/// Output of one generation call, held until reset or the next generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GenerationResult {
    Message(String),
    Drafts(DraftPair),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_pair_accepts_email_key_for_body() {
        let json = r#"{
            "lead_1": {"subject": "s", "email": "Hello"},
            "lead_2": {"subject": "", "email": ""}
        }"#;
        let pair: DraftPair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.lead_1.subject, "s");
        assert_eq!(pair.lead_1.body, "Hello");
        assert!(pair.lead_2.is_empty());
    }

    #[test]
    fn test_draft_pair_requires_both_leads() {
        let json = r#"{"lead_1": {"subject": "s", "email": "Hello"}}"#;
        assert!(serde_json::from_str::<DraftPair>(json).is_err());
    }

    #[test]
    fn test_draft_serializes_body_key() {
        let draft = Draft {
            subject: "s".to_string(),
            body: "b".to_string(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["body"], "b");
        assert!(value.get("email").is_none());
    }
}
