//! Healing: the reverse of damage, one wound at a time

use serde::{Deserialize, Serialize};

use crate::core::error::{DamageError, Result};
use crate::core::types::LocationId;
use crate::health::character::{ActorUpdate, CharacterHealth};
use crate::health::location::{HitLocationCategory, LocationUpdate};
use crate::health::state::HitLocationHealthState;
use crate::health::tier::WoundTier;

/// Everything one heal changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealResult {
    pub location_id: LocationId,
    pub hit_location_updates: LocationUpdate,
    pub actor_updates: ActorUpdate,
    pub notification: String,
    /// Legs that work again because the abdomen healed
    pub restored_leg_updates: Vec<(LocationId, LocationUpdate)>,
}

impl HealResult {
    fn unchanged(location_id: LocationId, notification: String) -> Self {
        Self {
            location_id,
            hit_location_updates: LocationUpdate::default(),
            actor_updates: ActorUpdate::default(),
            notification,
            restored_leg_updates: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hit_location_updates.is_empty()
            && self.actor_updates.is_empty()
            && self.restored_leg_updates.is_empty()
    }

    pub fn location_updates(&self) -> impl Iterator<Item = (LocationId, &LocationUpdate)> {
        std::iter::once((self.location_id, &self.hit_location_updates))
            .filter(|(_, update)| !update.is_empty())
            .chain(self.restored_leg_updates.iter().map(|(id, update)| (*id, update)))
    }

    /// Write this result into `character` and re-derive its health
    ///
    /// Healing is the one path that can lower severity, so the aggregate is
    /// recomputed from the full state rather than carried in the result.
    pub fn commit(&self, character: &mut CharacterHealth) -> Result<()> {
        character.commit(&self.actor_updates, self.location_updates())?;
        character.refresh_health();
        Ok(())
    }
}

/// Heal up to `heal_points` from wound `wound_index` of one hit location
///
/// A wound healed to zero is removed from the list. Severed limbs lose the
/// wound but stay severed. Healing the abdomen back under its hit points lets
/// legs that are otherwise fit stand again.
pub fn heal_wound(
    heal_points: u32,
    wound_index: usize,
    location_id: LocationId,
    character: &CharacterHealth,
) -> Result<HealResult> {
    let location = character.location(location_id)?;

    if location.health_state == HitLocationHealthState::Gone {
        return Ok(HealResult::unchanged(
            location_id,
            format!("{} is gone and cannot be healed", location.name),
        ));
    }

    let wound = *location
        .wounds
        .get(wound_index)
        .ok_or(DamageError::WoundNotFound {
            location: location_id,
            index: wound_index,
            count: location.wounds.len(),
        })?;

    let healed = heal_points.min(wound);
    if healed == 0 {
        return Ok(HealResult::unchanged(location_id, String::new()));
    }

    let mut wounds = location.wounds.clone();
    wounds[wound_index] = wound - healed;
    wounds.retain(|&w| w > 0);

    let previous_total = location.wound_total();
    let total = previous_total - u64::from(healed);
    let tier = WoundTier::from_total(total, location.hit_points_max);

    let new_state = if location.health_state == HitLocationHealthState::Severed {
        HitLocationHealthState::Severed
    } else if location.is_leg && abdomen_holds_legs_down(character) {
        tier.location_state(location.category)
            .max(HitLocationHealthState::Useless)
    } else {
        tier.location_state(location.category)
    };
    let new_impact = tier.actor_impact(location.category);

    let hit_location_updates = LocationUpdate {
        wounds: Some(wounds),
        health_state: (new_state != location.health_state).then_some(new_state),
        actor_health_impact: (new_impact != location.actor_health_impact).then_some(new_impact),
    };

    let max = u64::from(location.hit_points_max);
    let restored_leg_updates = if location.category == HitLocationCategory::Abdomen
        && previous_total >= max
        && total < max
    {
        restore_legs(character)
    } else {
        Vec::new()
    };

    let hit_points_value = Some(character.hit_points.after_gain(healed))
        .filter(|value| *value != character.hit_points.value);
    let actor_updates = ActorUpdate {
        hit_points_value,
        health: None,
    };

    let notification = if new_state == HitLocationHealthState::Severed {
        format!(
            "{}'s {} is still severed. Only a 6 point heal applied within ten minutes can restore a severed limb.",
            character.name, location.name
        )
    } else if !restored_leg_updates.is_empty() {
        format!("{} can use both legs again.", character.name)
    } else {
        String::new()
    };

    tracing::debug!(
        actor = %character.name,
        location = %location.name,
        healed,
        total,
        ?tier,
        state = %new_state,
        "Healed wound"
    );

    Ok(HealResult {
        location_id,
        hit_location_updates,
        actor_updates,
        notification,
        restored_leg_updates,
    })
}

fn abdomen_holds_legs_down(character: &CharacterHealth) -> bool {
    character.locations.iter().any(|l| {
        l.category == HitLocationCategory::Abdomen
            && l.wound_total() >= u64::from(l.hit_points_max)
    })
}

/// Legs that are useless only because of the abdomen
fn restore_legs(character: &CharacterHealth) -> Vec<(LocationId, LocationUpdate)> {
    character
        .legs()
        .filter(|leg| leg.health_state == HitLocationHealthState::Useless)
        .filter(|leg| leg.wound_total() < u64::from(leg.hit_points_max))
        .map(|leg| {
            let state = WoundTier::from_total(leg.wound_total(), leg.hit_points_max)
                .location_state(leg.category);
            (leg.id, LocationUpdate::health_state(state))
        })
        .collect()
}
