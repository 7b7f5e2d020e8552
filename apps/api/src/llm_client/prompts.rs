// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction embedded in every prompt that carries user-provided data.
pub const GROUNDING_INSTRUCTION: &str = "\
Use ONLY the provided lead data. Do not guess, infer, or invent.
If a detail is missing, write around it. Do not add placeholders.";

/// Output fragment appended to every JSON-mode prompt.
pub const JSON_OUTPUT_RULES: &str = "\
Output rules,
Return ONLY valid JSON.
No markdown.
No commentary.
No explanations.";
