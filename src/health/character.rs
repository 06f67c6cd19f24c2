//! Character-level health: hit point pool plus owned hit locations

use serde::{Deserialize, Serialize};

use crate::core::error::{DamageError, Result};
use crate::core::types::LocationId;
use crate::health::location::{HitLocation, LocationUpdate};
use crate::health::state::ActorHealthState;

/// Total hit point pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub value: u32,
    pub max: u32,
}

impl HitPoints {
    pub fn full(max: u32) -> Self {
        Self { value: max, max }
    }

    /// Lose `amount`, stopping at zero
    pub fn after_loss(&self, amount: u32) -> u32 {
        self.value.saturating_sub(amount)
    }

    /// Regain `amount`, stopping at max
    pub fn after_gain(&self, amount: u32) -> u32 {
        self.value.saturating_add(amount).min(self.max)
    }
}

/// Partial update to a character; `None` fields are unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_points_value: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<ActorHealthState>,
}

impl ActorUpdate {
    pub fn is_empty(&self) -> bool {
        self.hit_points_value.is_none() && self.health.is_none()
    }
}

/// A character's health record
///
/// Owns its hit locations outright; locations are addressed by `LocationId`
/// and never removed, so a severed limb stays on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterHealth {
    pub name: String,
    pub hit_points: HitPoints,
    #[serde(default)]
    pub health: ActorHealthState,
    #[serde(default)]
    pub locations: Vec<HitLocation>,
}

impl CharacterHealth {
    pub fn new(name: impl Into<String>, hit_points_max: u32) -> Self {
        Self {
            name: name.into(),
            hit_points: HitPoints::full(hit_points_max),
            health: ActorHealthState::Healthy,
            locations: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: HitLocation) -> Self {
        self.locations.push(location);
        self
    }

    pub fn location(&self, id: LocationId) -> Result<&HitLocation> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .ok_or(DamageError::LocationNotFound(id))
    }

    fn location_mut(&mut self, id: LocationId) -> Result<&mut HitLocation> {
        self.locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(DamageError::LocationNotFound(id))
    }

    pub fn location_by_name(&self, name: &str) -> Result<&HitLocation> {
        self.locations
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| DamageError::LocationNameNotFound(name.to_string()))
    }

    /// All legs on this character
    pub fn legs(&self) -> impl Iterator<Item = &HitLocation> {
        self.locations.iter().filter(|l| l.is_leg)
    }

    /// Re-derive aggregate health from the full current state
    ///
    /// Zero hit points is death. Any lost hit points mean at least wounded.
    /// Otherwise the worst impact any location has on the character wins.
    pub fn combined_health(&self) -> ActorHealthState {
        if self.hit_points.value == 0 {
            return ActorHealthState::Dead;
        }

        let from_pool = if self.hit_points.value < self.hit_points.max {
            ActorHealthState::Wounded
        } else {
            ActorHealthState::Healthy
        };

        self.locations
            .iter()
            .map(|l| l.actor_health_impact)
            .fold(from_pool, ActorHealthState::worst)
    }

    /// Set `health` to `combined_health()`
    pub fn refresh_health(&mut self) -> ActorHealthState {
        self.health = self.combined_health();
        self.health
    }

    /// Commit a set of partial updates as one unit
    ///
    /// Every location id is checked before anything is written, so an unknown
    /// id leaves the character untouched.
    pub fn commit<'a, I>(&mut self, actor: &ActorUpdate, locations: I) -> Result<()>
    where
        I: IntoIterator<Item = (LocationId, &'a LocationUpdate)>,
    {
        let locations: Vec<_> = locations.into_iter().collect();
        for (id, _) in &locations {
            self.location(*id)?;
        }

        for (id, update) in locations {
            update.apply_to(self.location_mut(id)?);
        }
        if let Some(value) = actor.hit_points_value {
            self.hit_points.value = value.min(self.hit_points.max);
        }
        if let Some(health) = actor.health {
            self.health = health;
        }
        Ok(())
    }
}
