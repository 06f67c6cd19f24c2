//! Damage resolution: turns one hit into wound, location and character updates
//!
//! The resolver reads the character and returns everything that changes as
//! data. Nothing is written until the owner commits the result, so one hit to
//! the abdomen lands as a single update to the abdomen, both legs and the
//! character.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::LocationId;
use crate::health::character::{ActorUpdate, CharacterHealth};
use crate::health::location::{HitLocation, HitLocationCategory, LocationUpdate};
use crate::health::state::HitLocationHealthState;
use crate::health::tier::WoundTier;

/// Everything one hit changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// The location that was hit
    pub location_id: LocationId,
    pub hit_location_updates: LocationUpdate,
    pub actor_updates: ActorUpdate,
    /// Narrative text for the table, empty when there is nothing to say
    pub notification: String,
    /// Legs disabled by this hit, keyed by location
    pub affected_leg_updates: Vec<(LocationId, LocationUpdate)>,
}

impl DamageResult {
    fn unchanged(location_id: LocationId, notification: String) -> Self {
        Self {
            location_id,
            hit_location_updates: LocationUpdate::default(),
            actor_updates: ActorUpdate::default(),
            notification,
            affected_leg_updates: Vec::new(),
        }
    }

    /// True when committing this result would change nothing
    pub fn is_empty(&self) -> bool {
        self.hit_location_updates.is_empty()
            && self.actor_updates.is_empty()
            && self.affected_leg_updates.is_empty()
    }

    /// Every location update in this result, the hit location first
    pub fn location_updates(&self) -> impl Iterator<Item = (LocationId, &LocationUpdate)> {
        std::iter::once((self.location_id, &self.hit_location_updates))
            .filter(|(_, update)| !update.is_empty())
            .chain(self.affected_leg_updates.iter().map(|(id, update)| (*id, update)))
    }

    /// Write this result into `character` as one unit
    pub fn commit(&self, character: &mut CharacterHealth) -> Result<()> {
        character.commit(&self.actor_updates, self.location_updates())
    }
}

/// Resolve `damage` against one of `character`'s hit locations
///
/// Limbs record at most twice their hit points per wound, but the tier is
/// judged on the full damage so a big enough hit still severs. When
/// `applies_to_total_hp` is false the location is wounded without touching
/// the hit point pool.
///
/// Hitting a severed or gone location is not an error: the result is empty
/// and the notification tells the player to reroll the location.
pub fn apply_damage(
    damage: u32,
    applies_to_total_hp: bool,
    location_id: LocationId,
    character: &CharacterHealth,
) -> Result<DamageResult> {
    let location = character.location(location_id)?;

    if location.health_state.is_terminal() {
        tracing::warn!(
            location = %location.name,
            state = %location.health_state,
            "Rejected damage against a destroyed hit location"
        );
        return Ok(DamageResult::unchanged(
            location_id,
            format!(
                "{} is gone and cannot be hit anymore, reroll to get a new hit location!",
                location.name
            ),
        ));
    }

    if damage == 0 {
        return Ok(DamageResult::unchanged(location_id, String::new()));
    }

    let recorded = if location.is_limb() {
        damage.min(location.hit_points_max.saturating_mul(2))
    } else {
        damage
    };

    let previous_total = location.wound_total();
    let total = previous_total + u64::from(damage);
    let tier = WoundTier::from_total(total, location.hit_points_max);

    let new_state = location
        .health_state
        .max(tier.location_state(location.category));
    let new_impact = location
        .actor_health_impact
        .worst(tier.actor_impact(location.category));

    let mut wounds = location.wounds.clone();
    wounds.push(recorded);

    let hit_location_updates = LocationUpdate {
        wounds: Some(wounds),
        health_state: (new_state != location.health_state).then_some(new_state),
        actor_health_impact: (new_impact != location.actor_health_impact).then_some(new_impact),
    };

    // Only the hit that pushes the abdomen over its hit points drops the legs
    let crossed_max = previous_total < u64::from(location.hit_points_max)
        && tier >= WoundTier::Disabling;
    let affected_leg_updates = if crossed_max && tier.disables_legs(location.category) {
        disable_legs(character)
    } else {
        Vec::new()
    };

    let hit_points_value = if applies_to_total_hp {
        Some(character.hit_points.after_loss(recorded))
            .filter(|value| *value != character.hit_points.value)
    } else {
        None
    };
    let health = character.health.worst(new_impact);
    let actor_updates = ActorUpdate {
        hit_points_value,
        health: (health != character.health).then_some(health),
    };

    let notification = describe(location, tier, crossed_max, &character.name);

    tracing::debug!(
        actor = %character.name,
        location = %location.name,
        damage,
        recorded,
        total,
        ?tier,
        state = %new_state,
        impact = %new_impact,
        "Resolved hit"
    );
    if new_state == HitLocationHealthState::Severed && location.health_state != new_state {
        tracing::info!(actor = %character.name, location = %location.name, "Limb severed");
    }
    if !affected_leg_updates.is_empty() {
        tracing::info!(
            actor = %character.name,
            legs = affected_leg_updates.len(),
            "Abdomen wound disabled legs"
        );
    }
    if health > character.health {
        tracing::info!(actor = %character.name, from = %character.health, to = %health, "Health worsened");
    }

    Ok(DamageResult {
        location_id,
        hit_location_updates,
        actor_updates,
        notification,
        affected_leg_updates,
    })
}

/// Useless-state updates for every leg that still works
fn disable_legs(character: &CharacterHealth) -> Vec<(LocationId, LocationUpdate)> {
    character
        .legs()
        .filter(|leg| !leg.health_state.is_disabled())
        .map(|leg| {
            (
                leg.id,
                LocationUpdate::health_state(HitLocationHealthState::Useless),
            )
        })
        .collect()
}

/// Narrative for the tier a hit reached
///
/// The abdomen fall text is only told on the hit that drops the legs.
fn describe(location: &HitLocation, tier: WoundTier, crossed_max: bool, actor: &str) -> String {
    use HitLocationCategory::*;
    use WoundTier::*;

    let in_shock = format!(
        "{actor} is functionally incapacitated and can no longer fight until healed, and is in shock. You may try to heal yourself."
    );
    let bleeding = format!(
        "{actor} becomes unconscious and begins to lose 1 hit point per melee round from bleeding unless healed or treated with First Aid."
    );

    match (location.category, tier) {
        (_, Unhurt | Light) | (Other, _) => String::new(),

        (Limb, Disabling) => format!(
            "{actor}'s {} is useless and cannot hold anything / support standing. You can fight with whatever limbs are still functional.",
            location.name
        ),
        (Limb, Grievous) => in_shock,
        (Limb, Mortal) => format!(
            "{actor}'s {} is severed or irrevocably maimed. Only a 6 point heal applied within ten minutes can restore a severed limb, assuming all parts are available. {in_shock}",
            location.name
        ),

        (Head, Disabling) => format!(
            "{actor} is unconscious and must be healed or treated with First Aid within five minutes (one full turn) or die"
        ),
        (Chest, Disabling) => format!(
            "{actor} falls and is too busy coughing blood to do anything. Will bleed to death in ten minutes unless the bleeding is stopped by First Aid, and cannot take any action, including healing."
        ),
        (Abdomen, Disabling) if !crossed_max => String::new(),
        (Abdomen, Disabling) => format!(
            "Both legs are useless and {actor} falls to the ground. {actor} may fight from the ground in subsequent melee rounds. Will bleed to death, if not healed or treated with First Aid within ten minutes."
        ),

        (Head | Chest | Abdomen, Grievous) => bleeding,
        (Head | Chest | Abdomen, Mortal) => format!("{actor} dies instantly."),
    }
}
