use serde::{Deserialize, Serialize};

use crate::builder::draft::BuilderError;
use crate::builder::models::{
    EducationField, ExperienceField, PersonalField, ResumeDraft, Skill,
};

/// One user edit to the draft, as sent by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DraftAction {
    SetField {
        field: PersonalField,
        value: String,
    },
    AddSkill {
        /// Generated when omitted.
        #[serde(default)]
        id: Option<String>,
        name: String,
        #[serde(default)]
        featured: bool,
    },
    RemoveSkill {
        id: String,
    },
    ToggleFeatured {
        id: String,
    },
    SetExperienceField {
        index: usize,
        field: ExperienceField,
        value: String,
    },
    AddExperience,
    RemoveExperience {
        index: usize,
    },
    SetEducationField {
        index: usize,
        field: EducationField,
        value: String,
    },
    AddEducation,
    RemoveEducation {
        index: usize,
    },
}

/// Reducer: `(draft, action) -> draft`. On error the caller keeps `draft`.
pub fn apply(draft: &ResumeDraft, action: DraftAction) -> Result<ResumeDraft, BuilderError> {
    match action {
        DraftAction::SetField { field, value } => Ok(draft.set_field(field, value)),
        DraftAction::AddSkill { id, name, featured } => {
            let mut skill = Skill::new(name);
            if let Some(id) = id {
                skill.id = id;
            }
            skill.featured = featured;
            draft.add_skill(skill)
        }
        DraftAction::RemoveSkill { id } => Ok(draft.remove_skill(&id)),
        DraftAction::ToggleFeatured { id } => Ok(draft.toggle_featured(&id)),
        DraftAction::SetExperienceField {
            index,
            field,
            value,
        } => draft.set_experience_field(index, field, value),
        DraftAction::AddExperience => Ok(draft.add_experience()),
        DraftAction::RemoveExperience { index } => draft.remove_experience(index),
        DraftAction::SetEducationField {
            index,
            field,
            value,
        } => draft.set_education_field(index, field, value),
        DraftAction::AddEducation => Ok(draft.add_education()),
        DraftAction::RemoveEducation { index } => draft.remove_education(index),
    }
}
