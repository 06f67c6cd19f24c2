//! Hit locations, wounds and health states
//!
//! Damage and healing are resolved against a read-only `CharacterHealth` and
//! returned as partial updates. The owner commits them, one call at a time per
//! character.

pub mod character;
pub mod damage;
pub mod healing;
pub mod location;
pub mod state;
pub mod template;
pub mod tier;

pub use character::{ActorUpdate, CharacterHealth, HitPoints};
pub use damage::{apply_damage, DamageResult};
pub use healing::{heal_wound, HealResult};
pub use location::{DieRange, HitLocation, HitLocationCategory, LocationUpdate};
pub use state::{ActorHealthState, HitLocationHealthState};
pub use template::{location_hit_points, LocationTemplate, HIT_LOCATION_DIE, HUMANOID};
pub use tier::WoundTier;

/// Re-derive a character's aggregate health from its full current state
pub fn combined_health(character: &CharacterHealth) -> ActorHealthState {
    character.combined_health()
}
