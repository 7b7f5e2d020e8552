//! Field-level access to the lead form.

use crate::leads::patch::LeadPatch;
use crate::models::lead::{GenerationRequest, LeadField};

impl GenerationRequest {
    /// Overwrites one field. Never touches any other field.
    pub fn update_field(&mut self, field: LeadField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    #[cfg(test)]
    pub fn field(&self, field: LeadField) -> &str {
        match field {
            LeadField::Title1 => &self.lead_1.title,
            LeadField::FirstName1 => &self.lead_1.first_name,
            LeadField::LastName1 => &self.lead_1.last_name,
            LeadField::LinkedIn1 => &self.lead_1.linked_in_url,
            LeadField::Email1 => &self.lead_1.email_address,
            LeadField::Title2 => &self.lead_2.title,
            LeadField::FirstName2 => &self.lead_2.first_name,
            LeadField::LastName2 => &self.lead_2.last_name,
            LeadField::LinkedIn2 => &self.lead_2.linked_in_url,
            LeadField::Email2 => &self.lead_2.email_address,
            LeadField::InvestmentThemes => &self.context.investment_themes,
            LeadField::ImpactPhilanthropy => &self.context.impact_or_philanthropy,
            LeadField::PersonalizationAngle => &self.context.personalization_angle,
            LeadField::Sources => &self.context.sources_note,
            LeadField::LeadType => &self.context.lead_type,
            LeadField::Location => &self.context.location,
            LeadField::Website => &self.context.website,
            LeadField::Status => &self.context.status,
        }
    }

    fn field_mut(&mut self, field: LeadField) -> &mut String {
        match field {
            LeadField::Title1 => &mut self.lead_1.title,
            LeadField::FirstName1 => &mut self.lead_1.first_name,
            LeadField::LastName1 => &mut self.lead_1.last_name,
            LeadField::LinkedIn1 => &mut self.lead_1.linked_in_url,
            LeadField::Email1 => &mut self.lead_1.email_address,
            LeadField::Title2 => &mut self.lead_2.title,
            LeadField::FirstName2 => &mut self.lead_2.first_name,
            LeadField::LastName2 => &mut self.lead_2.last_name,
            LeadField::LinkedIn2 => &mut self.lead_2.linked_in_url,
            LeadField::Email2 => &mut self.lead_2.email_address,
            LeadField::InvestmentThemes => &mut self.context.investment_themes,
            LeadField::ImpactPhilanthropy => &mut self.context.impact_or_philanthropy,
            LeadField::PersonalizationAngle => &mut self.context.personalization_angle,
            LeadField::Sources => &mut self.context.sources_note,
            LeadField::LeadType => &mut self.context.lead_type,
            LeadField::Location => &mut self.context.location,
            LeadField::Website => &mut self.context.website,
            LeadField::Status => &mut self.context.status,
        }
    }

    /// Overlays every field present in `patch`, last write wins.
    /// Fields missing from the patch keep their current value.
    pub fn merge(&mut self, patch: &LeadPatch) {
        for (field, value) in patch.iter() {
            self.update_field(field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_request() -> GenerationRequest {
        let mut request = GenerationRequest::default();
        for field in LeadField::ALL {
            request.update_field(field, format!("old-{field}"));
        }
        request
    }

    #[test]
    fn test_update_field_is_a_pure_overwrite() {
        for field in LeadField::ALL {
            let before = filled_request();
            let mut after = before.clone();
            after.update_field(field, "new value");

            assert_eq!(after.field(field), "new value");
            for other in LeadField::ALL.into_iter().filter(|f| *f != field) {
                assert_eq!(after.field(other), before.field(other), "{other} changed");
            }
        }
    }

    #[test]
    fn test_update_field_accepts_empty_string() {
        let mut request = filled_request();
        request.update_field(LeadField::Email1, "");
        assert_eq!(request.lead_1.email_address, "");
    }

    #[test]
    fn test_merge_empty_patch_leaves_form_unchanged() {
        let before = filled_request();
        let mut after = before.clone();
        after.merge(&LeadPatch::default());
        assert_eq!(after, before);
    }

    #[test]
    fn test_merge_overwrites_present_fields_only() {
        let mut request = filled_request();
        let mut patch = LeadPatch::default();
        patch.set(LeadField::FirstName1, "Ada");
        patch.set(LeadField::Website, "");

        request.merge(&patch);

        assert_eq!(request.lead_1.first_name, "Ada");
        assert_eq!(request.context.website, "");
        assert_eq!(request.lead_1.last_name, "old-lastName1");
        assert_eq!(request.context.location, "old-location");
    }

    #[test]
    fn test_merge_maps_fields_onto_the_right_lead() {
        let mut request = GenerationRequest::default();
        let mut patch = LeadPatch::default();
        patch.set(LeadField::Email2, "charles@x.com");
        patch.set(LeadField::Title1, "Partner");

        request.merge(&patch);

        assert_eq!(request.lead_2.email_address, "charles@x.com");
        assert_eq!(request.lead_1.title, "Partner");
        assert_eq!(request.lead_1.email_address, "");
    }
}
