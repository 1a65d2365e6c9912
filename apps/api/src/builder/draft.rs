//! Pure draft mutations. Every operation borrows the current draft and
//! returns the next one; the caller decides whether to swap it in.

use thiserror::Error;
use tracing::debug;

use crate::builder::models::{
    EducationEntry, EducationField, ExperienceEntry, ExperienceField, PersonalField, ResumeDraft,
    Skill,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("Skill '{0}' has already been added")]
    DuplicateSkill(String),

    #[error("Skill id '{0}' is already in use")]
    DuplicateSkillId(String),

    #[error("{list} index {index} is out of range (len {len})")]
    OutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
}

impl ResumeDraft {
    pub fn set_field(&self, field: PersonalField, value: impl Into<String>) -> ResumeDraft {
        let mut next = self.clone();
        *next.field_mut(field) = value.into();
        next
    }

    /// Appends a skill unless its name is already present (any letter case).
    pub fn add_skill(&self, skill: Skill) -> Result<ResumeDraft, BuilderError> {
        if self.skills.contains_name(&skill.name) {
            debug!(name = %skill.name, "rejected duplicate skill");
            return Err(BuilderError::DuplicateSkill(skill.name));
        }
        let mut next = self.clone();
        let id = skill.id.clone();
        if !next.skills.push(skill) {
            return Err(BuilderError::DuplicateSkillId(id));
        }
        Ok(next)
    }

    pub fn remove_skill(&self, id: &str) -> ResumeDraft {
        let mut next = self.clone();
        next.skills.remove(id);
        next
    }

    pub fn toggle_featured(&self, id: &str) -> ResumeDraft {
        let mut next = self.clone();
        if let Some(skill) = next.skills.get_mut(id) {
            skill.featured = !skill.featured;
        }
        next
    }

    pub fn set_experience_field(
        &self,
        index: usize,
        field: ExperienceField,
        value: impl Into<String>,
    ) -> Result<ResumeDraft, BuilderError> {
        let mut next = self.clone();
        let len = next.experience.len();
        let entry = next.experience.get_mut(index).ok_or(BuilderError::OutOfRange {
            list: "experience",
            index,
            len,
        })?;
        entry.set(field, value.into());
        Ok(next)
    }

    pub fn add_experience(&self) -> ResumeDraft {
        let mut next = self.clone();
        next.experience.push(ExperienceEntry::default());
        next
    }

    /// Removes the entry at `index`. Removing the last remaining entry is
    /// refused and returns the draft unchanged.
    pub fn remove_experience(&self, index: usize) -> Result<ResumeDraft, BuilderError> {
        let mut next = self.clone();
        remove_keeping_one(&mut next.experience, index, "experience")?;
        Ok(next)
    }

    pub fn set_education_field(
        &self,
        index: usize,
        field: EducationField,
        value: impl Into<String>,
    ) -> Result<ResumeDraft, BuilderError> {
        let mut next = self.clone();
        let len = next.education.len();
        let entry = next.education.get_mut(index).ok_or(BuilderError::OutOfRange {
            list: "education",
            index,
            len,
        })?;
        entry.set(field, value.into());
        Ok(next)
    }

    pub fn add_education(&self) -> ResumeDraft {
        let mut next = self.clone();
        next.education.push(EducationEntry::default());
        next
    }

    pub fn remove_education(&self, index: usize) -> Result<ResumeDraft, BuilderError> {
        let mut next = self.clone();
        remove_keeping_one(&mut next.education, index, "education")?;
        Ok(next)
    }
}

fn remove_keeping_one<T>(
    list: &mut Vec<T>,
    index: usize,
    name: &'static str,
) -> Result<(), BuilderError> {
    if list.len() <= 1 {
        debug!(list = name, index, "refused to remove last entry");
        return Ok(());
    }
    if index >= list.len() {
        return Err(BuilderError::OutOfRange {
            list: name,
            index,
            len: list.len(),
        });
    }
    list.remove(index);
    Ok(())
}
