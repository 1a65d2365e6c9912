use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    ExtractSkills,
    AnalyzeAts,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::ExtractSkills => f.write_str("extract-skills"),
            AnalysisMode::AnalyzeAts => f.write_str("analyze-ats"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillExtraction {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl AtsRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => AtsRating::Excellent,
            60..=79 => AtsRating::Good,
            _ => AtsRating::NeedsImprovement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub score: u8,
    pub rating: AtsRating,
    pub suggestions: Vec<String>,
}

impl AtsReport {
    /// Builds a report from a raw score, rejecting anything outside 0..=100.
    pub fn new(score: i64, suggestions: Vec<String>) -> Option<Self> {
        let score = u8::try_from(score).ok().filter(|s| *s <= 100)?;
        Some(Self {
            score,
            rating: AtsRating::from_score(score),
            suggestions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    Skills(SkillExtraction),
    Ats(AtsReport),
}

impl AnalysisResult {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisResult::Skills(_) => AnalysisMode::ExtractSkills,
            AnalysisResult::Ats(_) => AnalysisMode::AnalyzeAts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{}", empty_input_message(.0))]
    EmptyInput(AnalysisMode),

    #[error("An analysis request is already in progress")]
    InFlight,

    /// `detail` is for logs only; the display text is the user-facing retry message.
    #[error("{}", failure_message(.mode))]
    Failed { mode: AnalysisMode, detail: String },

    #[error("Analysis result was superseded by a newer request")]
    Superseded,
}

fn empty_input_message(mode: &AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::ExtractSkills => "Please enter your resume content to extract skills.",
        AnalysisMode::AnalyzeAts => {
            "Please enter your resume content to analyze for ATS compatibility."
        }
    }
}

fn failure_message(mode: &AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::ExtractSkills => "Failed to extract skills. Please try again.",
        AnalysisMode::AnalyzeAts => "Failed to analyze resume. Please try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(
            serde_json::from_str::<AnalysisMode>("\"extract-skills\"").unwrap(),
            AnalysisMode::ExtractSkills
        );
        assert_eq!(
            serde_json::to_string(&AnalysisMode::AnalyzeAts).unwrap(),
            "\"analyze-ats\""
        );
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(AtsRating::from_score(100), AtsRating::Excellent);
        assert_eq!(AtsRating::from_score(80), AtsRating::Excellent);
        assert_eq!(AtsRating::from_score(79), AtsRating::Good);
        assert_eq!(AtsRating::from_score(60), AtsRating::Good);
        assert_eq!(AtsRating::from_score(59), AtsRating::NeedsImprovement);
        assert_eq!(AtsRating::from_score(0), AtsRating::NeedsImprovement);
    }

    #[test]
    fn test_ats_report_rejects_out_of_range_scores() {
        assert!(AtsReport::new(101, vec![]).is_none());
        assert!(AtsReport::new(-1, vec![]).is_none());
        assert_eq!(AtsReport::new(72, vec![]).unwrap().rating, AtsRating::Good);
    }

    #[test]
    fn test_failure_message_hides_detail() {
        let err = AnalysisError::Failed {
            mode: AnalysisMode::AnalyzeAts,
            detail: "HTTP 500 from upstream".into(),
        };
        assert_eq!(err.to_string(), "Failed to analyze resume. Please try again.");
    }

    #[test]
    fn test_result_is_tagged_by_kind() {
        let result = AnalysisResult::Skills(SkillExtraction {
            technical_skills: vec!["Rust".into()],
            soft_skills: vec![],
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "skills");
        assert_eq!(json["technicalSkills"][0], "Rust");
    }
}
