use serde::{Deserialize, Serialize};

use crate::builder::models::{PersonalField, ResumeDraft};
use crate::builder::steps::Step;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Complete,
    Partial,
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepHealth {
    pub step: Step,
    pub status: StepStatus,
}

/// Per-step fill summary shown as tab badges. Informational only; it never
/// blocks navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub steps: Vec<StepHealth>,
    pub missing_personal: Vec<PersonalField>,
    pub skill_count: usize,
    pub featured_count: usize,
    pub filled_experience: usize,
    pub filled_education: usize,
}

fn status_from(filled: usize, total: usize) -> StepStatus {
    match filled {
        0 => StepStatus::Empty,
        n if n >= total => StepStatus::Complete,
        _ => StepStatus::Partial,
    }
}

pub fn compute_completion(draft: &ResumeDraft) -> CompletionReport {
    let missing_personal: Vec<PersonalField> = PersonalField::ALL
        .into_iter()
        .filter(|f| draft.field(*f).trim().is_empty())
        .collect();
    let filled_personal = PersonalField::ALL.len() - missing_personal.len();

    let filled_experience = draft.experience.iter().filter(|e| !e.is_blank()).count();
    let filled_education = draft.education.iter().filter(|e| !e.is_blank()).count();
    let history_sections = usize::from(filled_experience > 0) + usize::from(filled_education > 0);

    let steps = vec![
        // A template is always selected.
        StepHealth {
            step: Step::Template,
            status: StepStatus::Complete,
        },
        StepHealth {
            step: Step::Personal,
            status: status_from(filled_personal, PersonalField::ALL.len()),
        },
        StepHealth {
            step: Step::Skills,
            status: status_from(draft.skills.len(), 1),
        },
        StepHealth {
            step: Step::Experience,
            status: status_from(history_sections, 2),
        },
    ];

    CompletionReport {
        steps,
        missing_personal,
        skill_count: draft.skills.len(),
        featured_count: draft.featured_skills().count(),
        filled_experience,
        filled_education,
    }
}
