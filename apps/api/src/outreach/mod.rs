// Outreach Generation
// Prompt construction and response decoding for draft emails and smart paste.
// All generation calls go through llm_client, never direct HTTP calls.

pub mod client;
pub mod prompts;
