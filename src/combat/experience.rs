//! Experience checks from successful skill use

use serde::{Deserialize, Serialize};

use crate::ability::resolution::RollResult;

/// A skill as the experience check sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Skills that can only improve by study never gain a check
    #[serde(default = "can_learn_by_doing")]
    pub can_get_experience: bool,
    #[serde(default)]
    pub has_experience: bool,
}

fn can_learn_by_doing() -> bool {
    true
}

impl Skill {
    pub fn new(skill_name: impl Into<String>) -> Self {
        Self {
            skill_name: skill_name.into(),
            specialization: None,
            can_get_experience: true,
            has_experience: false,
        }
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    /// "Skill (Specialization)"
    pub fn full_name(&self) -> String {
        match &self.specialization {
            Some(specialization) => format!("{} ({})", self.skill_name, specialization),
            None => self.skill_name.clone(),
        }
    }
}

/// Whether a roll with `result` earns `skill` an experience check
pub fn grants_experience(skill: &Skill, result: RollResult) -> bool {
    result.is_success() && skill.can_get_experience && !skill.has_experience
}

/// Mark the skill after a roll, returning the notification when it gained a check
pub fn check_experience(skill: &mut Skill, result: RollResult) -> Option<String> {
    if !grants_experience(skill, result) {
        return None;
    }
    skill.has_experience = true;
    tracing::info!(skill = %skill.full_name(), %result, "Experience check gained");
    Some(format!("Yey, you got an experience check on {}!", skill.full_name()))
}
