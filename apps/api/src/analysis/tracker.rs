use serde::Serialize;
use tracing::warn;

use crate::analysis::models::{AnalysisError, AnalysisMode, AnalysisResult};

/// Identity of one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub id: u64,
    pub mode: AnalysisMode,
}

/// What the presentation layer renders for the analysis panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStatus {
    pub in_flight: bool,
    pub pending_mode: Option<AnalysisMode>,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
}

/// In-flight guard for a session's analysis requests.
///
/// At most one ticket is outstanding. A completion is applied only when its
/// ticket is the outstanding one; anything else is discarded.
#[derive(Debug, Default)]
pub struct AnalysisTracker {
    next_id: u64,
    in_flight: Option<Ticket>,
    result: Option<AnalysisResult>,
    error: Option<String>,
}

impl AnalysisTracker {
    /// Validates the request and marks it in flight. Blank text and
    /// concurrent requests are rejected before any ticket is issued.
    pub fn begin(&mut self, text: &str, mode: AnalysisMode) -> Result<Ticket, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput(mode));
        }
        if self.in_flight.is_some() {
            return Err(AnalysisError::InFlight);
        }
        self.next_id += 1;
        let ticket = Ticket {
            id: self.next_id,
            mode,
        };
        self.in_flight = Some(ticket);
        Ok(ticket)
    }

    /// Applies the collaborator's outcome for `ticket`.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<AnalysisResult, AnalysisError> {
        if self.in_flight != Some(ticket) {
            warn!(ticket = ticket.id, "discarding stale analysis response");
            return Err(AnalysisError::Superseded);
        }
        self.in_flight = None;

        let outcome = outcome.and_then(|result| {
            if result.mode() == ticket.mode {
                Ok(result)
            } else {
                Err(AnalysisError::Failed {
                    mode: ticket.mode,
                    detail: format!(
                        "analyzer answered {} for a {} request",
                        result.mode(),
                        ticket.mode
                    ),
                })
            }
        });

        match outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                self.error = None;
                Ok(result)
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Releases `ticket` without touching the last result. Returns `false`
    /// when the ticket is no longer the outstanding one.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        warn!(ticket = ticket.id, mode = %ticket.mode, "analysis request abandoned");
        true
    }

    pub fn status(&self) -> AnalysisStatus {
        AnalysisStatus {
            in_flight: self.in_flight.is_some(),
            pending_mode: self.in_flight.map(|t| t.mode),
            result: self.result.clone(),
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::SkillExtraction;

    fn skills(names: &[&str]) -> AnalysisResult {
        AnalysisResult::Skills(SkillExtraction {
            technical_skills: names.iter().map(|s| s.to_string()).collect(),
            soft_skills: vec![],
        })
    }

    #[test]
    fn test_blank_text_never_issues_ticket() {
        let mut tracker = AnalysisTracker::default();
        let err = tracker.begin(" \n\t", AnalysisMode::ExtractSkills).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyInput(AnalysisMode::ExtractSkills));
        assert!(!tracker.status().in_flight);
    }

    #[test]
    fn test_second_request_rejected_while_in_flight() {
        let mut tracker = AnalysisTracker::default();
        tracker.begin("resume", AnalysisMode::AnalyzeAts).unwrap();
        assert_eq!(
            tracker.begin("resume", AnalysisMode::ExtractSkills),
            Err(AnalysisError::InFlight)
        );
        assert_eq!(tracker.status().pending_mode, Some(AnalysisMode::AnalyzeAts));
    }

    #[test]
    fn test_finish_applies_result_and_clears_flag() {
        let mut tracker = AnalysisTracker::default();
        let ticket = tracker.begin("resume", AnalysisMode::ExtractSkills).unwrap();
        tracker.finish(ticket, Ok(skills(&["Rust"]))).unwrap();

        let status = tracker.status();
        assert!(!status.in_flight);
        assert_eq!(status.result, Some(skills(&["Rust"])));
        assert!(status.error.is_none());
    }

    #[test]
    fn test_failure_clears_previous_result() {
        let mut tracker = AnalysisTracker::default();
        let first = tracker.begin("resume", AnalysisMode::ExtractSkills).unwrap();
        tracker.finish(first, Ok(skills(&["Rust"]))).unwrap();

        let second = tracker.begin("resume", AnalysisMode::ExtractSkills).unwrap();
        let failure = AnalysisError::Failed {
            mode: AnalysisMode::ExtractSkills,
            detail: "timeout".into(),
        };
        assert!(tracker.finish(second, Err(failure)).is_err());

        let status = tracker.status();
        assert!(status.result.is_none());
        assert_eq!(
            status.error.as_deref(),
            Some("Failed to extract skills. Please try again.")
        );
    }

    #[test]
    fn test_mismatched_result_kind_is_failure() {
        let mut tracker = AnalysisTracker::default();
        let ticket = tracker.begin("resume", AnalysisMode::AnalyzeAts).unwrap();
        let err = tracker.finish(ticket, Ok(skills(&["Rust"]))).unwrap_err();
        assert!(matches!(err, AnalysisError::Failed { .. }));
        assert!(tracker.status().result.is_none());
    }

    #[test]
    fn test_abandon_releases_only_the_outstanding_ticket() {
        let mut tracker = AnalysisTracker::default();
        let first = tracker.begin("resume", AnalysisMode::ExtractSkills).unwrap();
        tracker.finish(first, Ok(skills(&["Rust"]))).unwrap();

        let second = tracker.begin("resume", AnalysisMode::AnalyzeAts).unwrap();
        assert!(!tracker.abandon(first));
        assert!(tracker.status().in_flight);

        assert!(tracker.abandon(second));
        let status = tracker.status();
        assert!(!status.in_flight);
        assert_eq!(status.result, Some(skills(&["Rust"])));
        assert!(tracker.begin("resume", AnalysisMode::AnalyzeAts).is_ok());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut tracker = AnalysisTracker::default();
        let first = tracker.begin("resume", AnalysisMode::ExtractSkills).unwrap();
        tracker.finish(first, Ok(skills(&["First"]))).unwrap();
        let new = tracker.begin("resume v2", AnalysisMode::ExtractSkills).unwrap();
        let old = Ticket {
            id: new.id - 1,
            mode: AnalysisMode::ExtractSkills,
        };

        assert_eq!(
            tracker.finish(old, Ok(skills(&["Old"]))),
            Err(AnalysisError::Superseded)
        );
        assert!(tracker.status().in_flight);
        assert_eq!(tracker.status().result, Some(skills(&["First"])));

        tracker.finish(new, Ok(skills(&["New"]))).unwrap();
        assert_eq!(tracker.status().result, Some(skills(&["New"])));
    }
}
