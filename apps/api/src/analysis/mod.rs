// Resume analysis: skill extraction and ATS scoring via an external analyzer.
// All LLM calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod tracker;
