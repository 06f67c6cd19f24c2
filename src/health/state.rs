//! Health states for hit locations and whole characters
//!
//! Both enums are ranked: variants are declared from least to most severe, so
//! `Ord` gives the severity order and `max` picks the worse of two states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Condition of a single hit location
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum HitLocationHealthState {
    /// No wounds
    #[default]
    Healthy,
    /// Damaged but working
    Wounded,
    /// Cannot hold anything or support standing
    Useless,
    /// Destroyed in play
    Severed,
    /// Removed from tracking after a reroll
    Gone,
}

impl HitLocationHealthState {
    /// Terminal states can no longer take wounds
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Severed | Self::Gone)
    }

    /// Useless or worse
    pub fn is_disabled(&self) -> bool {
        *self >= Self::Useless
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Wounded => "wounded",
            Self::Useless => "useless",
            Self::Severed => "severed",
            Self::Gone => "gone",
        }
    }
}

impl fmt::Display for HitLocationHealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate condition of a character
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ActorHealthState {
    #[default]
    Healthy,
    Wounded,
    /// Conscious but unable to act
    Shock,
    Unconscious,
    Dead,
}

impl ActorHealthState {
    /// The more severe of two states
    pub fn worst(self, other: Self) -> Self {
        self.max(other)
    }

    /// Can the character take actions at all?
    pub fn can_act(&self) -> bool {
        *self <= Self::Wounded
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Wounded => "wounded",
            Self::Shock => "shock",
            Self::Unconscious => "unconscious",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for ActorHealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
