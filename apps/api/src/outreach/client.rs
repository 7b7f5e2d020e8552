//! Outreach Generation Client: turns a lead form snapshot into drafts.
//!
//! The credential is fixed at construction and checked before every call,
//! so a missing key never reaches the network.

use thiserror::Error;
use tracing::{info, warn};

use crate::leads::patch::LeadPatch;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError, ResponseFormat};
use crate::models::draft::DraftPair;
use crate::models::lead::GenerationRequest;
use crate::outreach::prompts::{
    build_lead_pair_prompt, build_lead_row_prompt, build_single_lead_prompt,
    LEAD_ROW_PARSE_SYSTEM, OUTREACH_SYSTEM,
};

#[derive(Debug, Error)]
pub enum OutreachError {
    #[error("Generation is not configured: {0}")]
    Configuration(String),

    #[error("{operation} failed: {source}")]
    Generation {
        operation: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("Lead row extraction failed: {0}")]
    ParseBestEffort(#[source] LlmError),
}

impl OutreachError {
    fn generation(operation: &'static str) -> impl FnOnce(LlmError) -> Self {
        move |source| OutreachError::Generation { operation, source }
    }

    /// Text shown to the user in place of a draft.
    pub fn user_message(&self) -> &'static str {
        match self {
            OutreachError::Configuration(_) => {
                "Generation is not configured. Please check your API key and try again."
            }
            OutreachError::Generation { .. } | OutreachError::ParseBestEffort(_) => {
                "An error occurred while generating the email. Please check your API key and try again."
            }
        }
    }
}

#[derive(Clone)]
pub struct OutreachClient {
    llm: LlmClient,
    api_key: Option<String>,
}

impl OutreachClient {
    pub fn new(llm: LlmClient, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self { llm, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn credential(&self) -> Result<&str, OutreachError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| OutreachError::Configuration("GEMINI_API_KEY is not set".to_string()))
    }

    /// Generates one free-text email for lead 1. Returned text is shown as-is.
    pub async fn generate_draft_for_single_lead(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, OutreachError> {
        let api_key = self.credential()?;
        let prompt = build_single_lead_prompt(request);

        info!("Generating single-lead draft");
        let text = self
            .llm
            .call(api_key, &prompt, OUTREACH_SYSTEM, ResponseFormat::Text)
            .await
            .map_err(OutreachError::generation("Single-lead generation"))?;

        info!("Single-lead draft generated ({} chars)", text.len());
        Ok(text)
    }

    /// Generates subject/body drafts for both leads in one call.
    /// A reply that does not match the two-key schema fails the whole call.
    pub async fn generate_drafts_for_lead_pair(
        &self,
        request: &GenerationRequest,
    ) -> Result<DraftPair, OutreachError> {
        let api_key = self.credential()?;
        let prompt = build_lead_pair_prompt(request);

        info!(
            "Generating lead-pair drafts (second lead present: {})",
            request.has_second_lead()
        );
        let drafts: DraftPair = self
            .llm
            .call_json(api_key, &prompt, OUTREACH_SYSTEM)
            .await
            .map_err(OutreachError::generation("Lead-pair generation"))?;

        info!(
            "Lead-pair drafts generated (lead_2 empty: {})",
            drafts.lead_2.is_empty()
        );
        Ok(drafts)
    }

    /// Maps pasted text onto form fields.
    ///
    /// Only a missing credential is reported. Any other failure is logged and
    /// yields an empty patch, which merges as a no-op.
    pub async fn parse_lead_row(&self, raw_text: &str) -> Result<LeadPatch, OutreachError> {
        let api_key = self.credential()?;

        match self.extract_lead_row(api_key, raw_text).await {
            Ok(patch) => {
                info!("Lead row parsed: {} fields extracted", patch.len());
                Ok(patch)
            }
            Err(e) => {
                warn!("{e}, leaving form unchanged");
                Ok(LeadPatch::default())
            }
        }
    }

    async fn extract_lead_row(&self, api_key: &str, raw_text: &str) -> Result<LeadPatch, OutreachError> {
        let prompt = build_lead_row_prompt(raw_text);
        let system = format!("{LEAD_ROW_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}");

        let value: serde_json::Value = self
            .llm
            .call_json(api_key, &prompt, &system)
            .await
            .map_err(OutreachError::ParseBestEffort)?;

        LeadPatch::from_json(value).ok_or_else(|| {
            OutreachError::ParseBestEffort(LlmError::Parse(
                <serde_json::Error as serde::de::Error>::custom("expected a JSON object of field values"),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::llm_client::testing::StubBackend;
    use crate::models::lead::LeadField;

    const ADA_REPLY: &str =
        r#"{"lead_1":{"subject":"s","email":"Hello"},"lead_2":{"subject":"","email":""}}"#;

    fn client_with(stub: Arc<StubBackend>, api_key: Option<&str>) -> OutreachClient {
        OutreachClient::new(LlmClient::new(stub), api_key.map(String::from))
    }

    fn ada_request() -> GenerationRequest {
        let mut request = GenerationRequest::default();
        request.lead_1.first_name = "Ada".to_string();
        request.lead_1.last_name = "Lovelace".to_string();
        request.lead_1.email_address = "ada@x.com".to_string();
        request.context.investment_themes = "ocean conservation".to_string();
        request
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_call() {
        let stub = StubBackend::replying(ADA_REPLY);
        let client = client_with(stub.clone(), None);
        let request = ada_request();

        let pair = client.generate_drafts_for_lead_pair(&request).await;
        assert!(matches!(pair, Err(OutreachError::Configuration(_))));

        let single = client.generate_draft_for_single_lead(&request).await;
        assert!(matches!(single, Err(OutreachError::Configuration(_))));

        let parsed = client.parse_lead_row("Ada Lovelace").await;
        assert!(matches!(parsed, Err(OutreachError::Configuration(_))));

        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_credential_counts_as_missing() {
        let stub = StubBackend::replying(ADA_REPLY);
        let client = client_with(stub.clone(), Some("   "));
        assert!(!client.is_configured());
        assert!(client.generate_drafts_for_lead_pair(&ada_request()).await.is_err());
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_lead_pair_decodes_fixed_schema() {
        let stub = StubBackend::replying(ADA_REPLY);
        let client = client_with(stub.clone(), Some("key"));

        let drafts = client
            .generate_drafts_for_lead_pair(&ada_request())
            .await
            .unwrap();

        assert_eq!(drafts.lead_1.subject, "s");
        assert_eq!(drafts.lead_1.body, "Hello");
        assert_eq!(drafts.lead_2.body, "");

        let call = stub.last_call().unwrap();
        assert_eq!(call.format, ResponseFormat::Json);
        assert_eq!(call.system, OUTREACH_SYSTEM);
        assert!(call.prompt.contains("First Name: Ada"));
    }

    #[tokio::test]
    async fn test_lead_pair_malformed_json_is_a_generation_error() {
        let stub = StubBackend::replying("Here are your emails: lead_1 ...");
        let client = client_with(stub, Some("key"));

        let err = client
            .generate_drafts_for_lead_pair(&ada_request())
            .await
            .unwrap_err();

        match err {
            OutreachError::Generation { source, .. } => {
                assert!(matches!(source, LlmError::Parse(_)))
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lead_pair_missing_second_key_is_a_generation_error() {
        let stub = StubBackend::replying(r#"{"lead_1":{"subject":"s","email":"Hello"}}"#);
        let client = client_with(stub, Some("key"));
        let result = client.generate_drafts_for_lead_pair(&ada_request()).await;
        assert!(matches!(result, Err(OutreachError::Generation { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure_preserves_cause() {
        let stub = StubBackend::failing("upstream unavailable");
        let client = client_with(stub, Some("key"));

        let err = client
            .generate_draft_for_single_lead(&ada_request())
            .await
            .unwrap_err();

        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_single_lead_returns_text_unmodified() {
        let reply = "Subject: Reefs\n\nYour work at the foundation...\n";
        let stub = StubBackend::replying(reply);
        let client = client_with(stub.clone(), Some("key"));

        let text = client
            .generate_draft_for_single_lead(&ada_request())
            .await
            .unwrap();

        assert_eq!(text, reply);
        assert_eq!(stub.last_call().unwrap().format, ResponseFormat::Text);
    }

    #[tokio::test]
    async fn test_single_lead_empty_reply_is_a_generation_error() {
        let stub = StubBackend::replying("");
        let client = client_with(stub, Some("key"));
        let result = client.generate_draft_for_single_lead(&ada_request()).await;
        assert!(matches!(
            result,
            Err(OutreachError::Generation {
                source: LlmError::EmptyContent,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_parse_lead_row_maps_known_fields() {
        let stub = StubBackend::replying(
            r#"{"firstName1":"Ada","lastName1":"Lovelace","email1":"ada@x.com","title1":""}"#,
        );
        let client = client_with(stub.clone(), Some("key"));

        let patch = client.parse_lead_row("Ada\tLovelace\tada@x.com").await.unwrap();

        assert_eq!(patch.get(LeadField::FirstName1), Some("Ada"));
        assert_eq!(patch.get(LeadField::Title1), Some(""));
        assert!(stub.last_call().unwrap().prompt.contains("Ada\tLovelace\tada@x.com"));
    }

    #[tokio::test]
    async fn test_parse_lead_row_malformed_reply_yields_empty_patch() {
        let stub = StubBackend::replying("Sorry, I could not find any fields.");
        let client = client_with(stub, Some("key"));
        let patch = client.parse_lead_row("garbage").await.unwrap();
        assert!(patch.is_empty());
    }

    #[tokio::test]
    async fn test_parse_lead_row_non_object_yields_empty_patch() {
        let stub = StubBackend::replying(r#"["Ada", "Lovelace"]"#);
        let client = client_with(stub, Some("key"));
        assert!(client.parse_lead_row("Ada Lovelace").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_parse_lead_row_backend_failure_yields_empty_patch() {
        let stub = StubBackend::failing("boom");
        let client = client_with(stub, Some("key"));
        assert!(client.parse_lead_row("Ada Lovelace").await.unwrap().is_empty());
    }

    #[test]
    fn test_user_message_points_at_api_key() {
        let err = OutreachError::Configuration("missing".to_string());
        assert!(err.user_message().contains("check your API key"));
    }
}
