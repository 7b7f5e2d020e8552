// All prompt constants for the Outreach module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_OUTPUT_RULES};
use crate::models::lead::{GenerationRequest, LeadField, LeadRecord};

/// System prompt for both draft flows.
pub const OUTREACH_SYSTEM: &str = "You are a senior outreach specialist writing high-trust, \
    high-net-worth investor outreach emails for Tai Nuare, a regenerative island real estate \
    and wellness project.";

/// System prompt for smart-paste extraction. Enforces JSON-only output.
pub const LEAD_ROW_PARSE_SYSTEM: &str = "You are a precise data extraction assistant. \
    Map unstructured lead data onto a fixed set of form fields. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Never guess a value that is not present in the input.";

/// Signature block. Must be reproduced exactly.
pub const SIGNATURE_BLOCK: &str = "\
With respect,

Chris Newberry
Founder & Steward
Tai Nuare
+1435 590-9090 WhatsApp
chris@tainuare.com";

/// Content policy shared by every draft. Replace `{grounding_instruction}` before sending.
const HARD_RULES_TEMPLATE: &str = "\
Hard rules,
{grounding_instruction}
The first paragraph must be personalized using Investment Themes or Prior Investments, Impact or Philanthropy, and Personalization Angle.
No hype, no buzzwords, no pressure, no emojis.
Do not mention money, returns, pricing, or ticket size in the first email.
Do not attach files or links unless explicitly included in input.
Keep it concise, professional, and fully formatted as an email.
Never start with \"I have been following you.\"
You may start with \"Your work at...\", \"Your leadership at...\", or the firm name directly.

Structure rules,
A. First paragraph must be 3-4 lines, direct and confident.
B. End the first paragraph with one credible alignment sentence.
C. Include a soft CTA asking if they are open to a brief overview or short intro call.
D. Signature must match exactly as provided.";

const PROJECT_CONTEXT: &str = "\
Project context for internal reference only, do not overemphasize:
405-acre rainforest peninsula in Caribbean Panama
Living coral reef systems
1-2 ultra-low-density boutique resorts
Marina, wellness center, curated event space
~20 architecturally integrated overwater residences
4,000 mature teak trees for sustainable construction
Commitment to non-invasive partnership with neighboring Indigenous communities

Do NOT use promotional adjectives.
Do NOT use the words \"exclusive\" or \"unique.\"
Do NOT overemphasize luxury.
Do NOT mention capital structure.
Do NOT repeat alignment language.";

/// Lead-pair prompt. Replace: {hard_rules}, {lead_1}, {lead_2}, {shared_fields},
/// {json_output_rules}, {signature}, {project_context}
const LEAD_PAIR_PROMPT_TEMPLATE: &str = r#"{hard_rules}

Field mapping rules,
lead_1 must use:
{lead_1}

lead_2 must use:
{lead_2}

The following fields apply to both leads:
{shared_fields}

If both Title and Email for lead_2 are empty, return lead_2 fields as empty strings.

{json_output_rules}

Return schema exactly:
{
"lead_1": {
"subject": "",
"email": ""
},
"lead_2": {
"subject": "",
"email": ""
}
}

If any field is missing, output an empty string.

Signature must be exactly:

{signature}

Do not modify signature formatting.

{project_context}"#;

/// Single-lead prompt. Replace: {hard_rules}, {lead}, {organization_fields},
/// {shared_fields}, {signature}, {project_context}
const SINGLE_LEAD_PROMPT_TEMPLATE: &str = r#"{hard_rules}

Lead details:
{lead}

Organization details:
{organization_fields}

Personalization:
{shared_fields}

Output rules,
Return plain text only. No markdown.
First line: "Subject: " followed by one subject line.
Then a blank line, then the full email ending with the signature.

Signature must be exactly:

{signature}

Do not modify signature formatting.

{project_context}"#;

/// Smart-paste extraction prompt. Replace: {field_list}, {json_output_rules}, {raw_text}
const LEAD_ROW_PARSE_PROMPT_TEMPLATE: &str = r#"Extract lead information from the pasted text below and map it onto these form fields:
{field_list}

Rules:
1. Return a JSON object containing EVERY field key listed above.
2. Use an empty string for any field not present in the input.
3. Copy values exactly as they appear. Never guess or infer a value.
4. If the row describes a second contact, use the fields ending in 2 for that contact.

{json_output_rules}

PASTED TEXT:
{raw_text}"#;

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

fn hard_rules() -> String {
    HARD_RULES_TEMPLATE.replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
}

fn lead_block(lead: &LeadRecord) -> String {
    format!(
        "Title: {}\nFirst Name: {}\nLast Name: {}\nLinkedIn: {}\nEmail: {}",
        lead.title, lead.first_name, lead.last_name, lead.linked_in_url, lead.email_address
    )
}

fn shared_fields(request: &GenerationRequest) -> String {
    let context = &request.context;
    format!(
        "Investment Themes or Prior Investments: {}\nImpact or Philanthropy: {}\nPersonalization Angle: {}\nSources: {}",
        context.investment_themes,
        context.impact_or_philanthropy,
        context.personalization_angle,
        context.sources_note
    )
}

/// Substitutes `{key}` placeholders in one pass. Inserted values are never re-scanned.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let matched = values
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));
        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Builds the two-lead JSON prompt.
pub fn build_lead_pair_prompt(request: &GenerationRequest) -> String {
    let rules = hard_rules();
    let lead_1 = lead_block(&request.lead_1);
    let lead_2 = lead_block(&request.lead_2);
    let shared = shared_fields(request);

    fill(
        LEAD_PAIR_PROMPT_TEMPLATE,
        &[
            ("hard_rules", rules.as_str()),
            ("lead_1", lead_1.as_str()),
            ("lead_2", lead_2.as_str()),
            ("shared_fields", shared.as_str()),
            ("json_output_rules", JSON_OUTPUT_RULES),
            ("signature", SIGNATURE_BLOCK),
            ("project_context", PROJECT_CONTEXT),
        ],
    )
}

/// Builds the free-text prompt for lead 1 with the organization fields.
pub fn build_single_lead_prompt(request: &GenerationRequest) -> String {
    let context = &request.context;
    let organization_fields = format!(
        "Lead Type: {}\nLocation: {}\nWebsite: {}\nStatus: {}",
        context.lead_type, context.location, context.website, context.status
    );

    let rules = hard_rules();
    let lead = lead_block(&request.lead_1);
    let shared = shared_fields(request);

    fill(
        SINGLE_LEAD_PROMPT_TEMPLATE,
        &[
            ("hard_rules", rules.as_str()),
            ("lead", lead.as_str()),
            ("organization_fields", organization_fields.as_str()),
            ("shared_fields", shared.as_str()),
            ("signature", SIGNATURE_BLOCK),
            ("project_context", PROJECT_CONTEXT),
        ],
    )
}

/// Builds the smart-paste extraction prompt listing every known field key.
pub fn build_lead_row_prompt(raw_text: &str) -> String {
    let field_list = LeadField::ALL
        .iter()
        .map(|field| format!("- {field}"))
        .collect::<Vec<_>>()
        .join("\n");

    fill(
        LEAD_ROW_PARSE_PROMPT_TEMPLATE,
        &[
            ("field_list", field_list.as_str()),
            ("json_output_rules", JSON_OUTPUT_RULES),
            ("raw_text", raw_text),
        ],
    )
}
