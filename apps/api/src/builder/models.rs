#![allow(dead_code)]

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Template picked on the first builder step when the caller has not chosen one.
pub const DEFAULT_TEMPLATE: &str = "minimal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub featured: bool,
}

impl Skill {
    /// Builds a skill with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            featured: false,
        }
    }

    /// Case-insensitive name comparison used for duplicate detection.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Top-level text fields of the personal info step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    Summary,
}

impl PersonalField {
    pub const ALL: [PersonalField; 6] = [
        PersonalField::FullName,
        PersonalField::Title,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Summary,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceField {
    Position,
    Company,
    Duration,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationField {
    Degree,
    Institution,
    Year,
}

impl ExperienceEntry {
    pub fn set(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::Position => self.position = value,
            ExperienceField::Company => self.company = value,
            ExperienceField::Duration => self.duration = value,
            ExperienceField::Description => self.description = value,
        }
    }

    pub fn is_blank(&self) -> bool {
        [&self.position, &self.company, &self.duration, &self.description]
            .iter()
            .all(|v| v.trim().is_empty())
    }
}

impl EducationEntry {
    pub fn set(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::Degree => self.degree = value,
            EducationField::Institution => self.institution = value,
            EducationField::Year => self.year = value,
        }
    }

    pub fn is_blank(&self) -> bool {
        [&self.degree, &self.institution, &self.year]
            .iter()
            .all(|v| v.trim().is_empty())
    }
}

/// Ordered skill collection keyed by skill id.
///
/// Keeps insertion order for display and an id index for lookups. Serialized
/// as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Skill>", into = "Vec<Skill>")]
pub struct SkillSet {
    items: Vec<Skill>,
    index: HashMap<String, usize>,
}

impl SkillSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.items.iter().any(|s| s.same_name(name))
    }

    /// Appends a skill. Callers check name uniqueness first; a repeated id
    /// replaces nothing and is reported back as `false`.
    pub(crate) fn push(&mut self, skill: Skill) -> bool {
        if self.index.contains_key(&skill.id) {
            return false;
        }
        self.index.insert(skill.id.clone(), self.items.len());
        self.items.push(skill);
        true
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Skill> {
        let pos = self.index.remove(id)?;
        let removed = self.items.remove(pos);
        self.reindex();
        Some(removed)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Skill> {
        let pos = *self.index.get(id)?;
        self.items.get_mut(pos)
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
    }
}

impl TryFrom<Vec<Skill>> for SkillSet {
    type Error = String;

    fn try_from(skills: Vec<Skill>) -> Result<Self, Self::Error> {
        let mut set = SkillSet::default();
        for skill in skills {
            if set.contains_name(&skill.name) {
                return Err(format!("duplicate skill name '{}'", skill.name));
            }
            let id = skill.id.clone();
            if !set.push(skill) {
                return Err(format!("duplicate skill id '{id}'"));
            }
        }
        Ok(set)
    }
}

impl From<SkillSet> for Vec<Skill> {
    fn from(set: SkillSet) -> Self {
        set.items
    }
}

/// The in-memory resume record edited by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDraft {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub skills: SkillSet,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

impl Default for ResumeDraft {
    /// Blank draft: no skills and one blank experience and education entry.
    fn default() -> Self {
        Self {
            full_name: String::new(),
            title: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            summary: String::new(),
            skills: SkillSet::default(),
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
        }
    }
}

impl ResumeDraft {
    pub fn field(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::FullName => &self.full_name,
            PersonalField::Title => &self.title,
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Location => &self.location,
            PersonalField::Summary => &self.summary,
        }
    }

    pub(crate) fn field_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Title => &mut self.title,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Summary => &mut self.summary,
        }
    }

    /// Skills flagged for emphasis in the preview, in list order.
    pub fn featured_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(|s| s.featured)
    }
}
