//! Hit locations: body parts with their own wound capacity

use serde::{Deserialize, Serialize};

use crate::core::types::LocationId;
use crate::health::state::{ActorHealthState, HitLocationHealthState};

/// Which rule branch a hit location follows when wounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HitLocationCategory {
    /// Arms and legs: become useless, then severed
    Limb,
    /// Knocks out, then kills
    Head,
    /// Shock, then unconscious, then death
    Chest,
    /// Disables both legs, then unconscious, then death
    Abdomen,
    /// Anything else (wings, tails): never escalates past wounded
    Other,
}

/// Inclusive d20 range that selects a hit location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRange {
    pub from: u8,
    pub to: u8,
}

impl DieRange {
    pub fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, roll: u8) -> bool {
        (self.from..=self.to).contains(&roll)
    }
}

/// One body part of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitLocation {
    #[serde(default)]
    pub id: LocationId,
    pub name: String,
    pub category: HitLocationCategory,
    /// Legs fail together when the abdomen is badly hurt
    #[serde(default)]
    pub is_leg: bool,
    pub hit_points_max: u32,
    #[serde(default)]
    pub wounds: Vec<u32>,
    #[serde(default)]
    pub health_state: HitLocationHealthState,
    /// Impact this location currently has on the whole character
    #[serde(default)]
    pub actor_health_impact: ActorHealthState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub die_range: Option<DieRange>,
}

impl HitLocation {
    pub fn new(name: impl Into<String>, category: HitLocationCategory, hit_points_max: u32) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            category,
            is_leg: false,
            hit_points_max,
            wounds: Vec::new(),
            health_state: HitLocationHealthState::Healthy,
            actor_health_impact: ActorHealthState::Healthy,
            die_range: None,
        }
    }

    /// A limb that supports standing
    pub fn leg(name: impl Into<String>, hit_points_max: u32) -> Self {
        Self {
            is_leg: true,
            ..Self::new(name, HitLocationCategory::Limb, hit_points_max)
        }
    }

    pub fn with_die_range(mut self, from: u8, to: u8) -> Self {
        self.die_range = Some(DieRange::new(from, to));
        self
    }

    pub fn is_limb(&self) -> bool {
        self.category == HitLocationCategory::Limb
    }

    /// Sum of all recorded wounds
    pub fn wound_total(&self) -> u64 {
        self.wounds.iter().map(|&w| u64::from(w)).sum()
    }

    /// Remaining hit points, negative once wounds exceed the maximum
    pub fn hit_points_remaining(&self) -> i64 {
        i64::from(self.hit_points_max) - self.wound_total() as i64
    }
}

/// Partial update to a hit location; `None` fields are unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wounds: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_state: Option<HitLocationHealthState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_health_impact: Option<ActorHealthState>,
}

impl LocationUpdate {
    pub fn is_empty(&self) -> bool {
        self.wounds.is_none() && self.health_state.is_none() && self.actor_health_impact.is_none()
    }

    /// Update that only changes the health state
    pub fn health_state(state: HitLocationHealthState) -> Self {
        Self {
            health_state: Some(state),
            ..Self::default()
        }
    }

    /// Write the set fields into `location`
    pub fn apply_to(&self, location: &mut HitLocation) {
        if let Some(wounds) = &self.wounds {
            location.wounds.clone_from(wounds);
        }
        if let Some(state) = self.health_state {
            location.health_state = state;
        }
        if let Some(impact) = self.actor_health_impact {
            location.actor_health_impact = impact;
        }
    }
}
