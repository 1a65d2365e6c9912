//! Resume analysis collaborator: a pluggable trait plus the LLM-backed default.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`. The builder never calls the
//! analyzer directly; it goes through the session's `AnalysisTracker` so blank
//! input and concurrent requests are stopped before reaching it.

use async_trait::async_trait;
use serde::Deserialize;

use crate::analysis::models::{
    AnalysisError, AnalysisMode, AnalysisResult, AtsReport, SkillExtraction,
};
use crate::analysis::prompts::{
    ATS_ANALYSIS_PROMPT, ATS_ANALYSIS_SYSTEM, SKILL_EXTRACTION_PROMPT, SKILL_EXTRACTION_SYSTEM,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json_reply, LlmClient};

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str, mode: AnalysisMode)
        -> Result<AnalysisResult, AnalysisError>;
}

/// Raw ATS reply; the score is range-checked before it becomes an `AtsReport`.
#[derive(Debug, Deserialize)]
struct AtsReply {
    score: i64,
    #[serde(default)]
    suggestions: Vec<String>,
}

pub struct LlmResumeAnalyzer(pub LlmClient);

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn analyze(
        &self,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, AnalysisError> {
        let (template, system) = match mode {
            AnalysisMode::ExtractSkills => (SKILL_EXTRACTION_PROMPT, SKILL_EXTRACTION_SYSTEM),
            AnalysisMode::AnalyzeAts => (ATS_ANALYSIS_PROMPT, ATS_ANALYSIS_SYSTEM),
        };
        let prompt = template.replace("{resume_text}", text);
        let system = format!("{system} {JSON_ONLY_SYSTEM}");

        let reply = self
            .0
            .complete(&prompt, &system)
            .await
            .map_err(|e| AnalysisError::Failed {
                mode,
                detail: e.to_string(),
            })?;

        interpret_reply(mode, &reply)
    }
}

/// Converts the model's JSON reply into a typed result for `mode`.
pub fn interpret_reply(mode: AnalysisMode, reply: &str) -> Result<AnalysisResult, AnalysisError> {
    let failed = |detail: String| AnalysisError::Failed { mode, detail };

    match mode {
        AnalysisMode::ExtractSkills => {
            let skills: SkillExtraction =
                parse_json_reply(reply).map_err(|e| failed(e.to_string()))?;
            Ok(AnalysisResult::Skills(skills))
        }
        AnalysisMode::AnalyzeAts => {
            let raw: AtsReply = parse_json_reply(reply).map_err(|e| failed(e.to_string()))?;
            AtsReport::new(raw.score, raw.suggestions)
                .map(AnalysisResult::Ats)
                .ok_or_else(|| failed(format!("ATS score {} outside 0-100", raw.score)))
        }
    }
}
