//! Hit-location templates and hit-location rolls
//!
//! Characters get their hit locations from a species template when built.
//! Each location covers a d20 range; location hit points scale with the
//! character's total hit points.

use rand::Rng;

use crate::health::character::CharacterHealth;
use crate::health::location::{HitLocation, HitLocationCategory};

/// Die size for hit-location rolls
pub const HIT_LOCATION_DIE: u8 = 20;

/// Rerolls allowed before giving up on finding a location that can be hit
const MAX_REROLLS: usize = 100;

/// One location in a species template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationTemplate {
    pub name: &'static str,
    pub category: HitLocationCategory,
    pub is_leg: bool,
    pub die_from: u8,
    pub die_to: u8,
    /// Hit points relative to the template's base location value
    pub hit_points_offset: i32,
}

impl LocationTemplate {
    const fn new(
        name: &'static str,
        category: HitLocationCategory,
        die_from: u8,
        die_to: u8,
        hit_points_offset: i32,
    ) -> Self {
        Self {
            name,
            category,
            is_leg: false,
            die_from,
            die_to,
            hit_points_offset,
        }
    }

    const fn leg(name: &'static str, die_from: u8, die_to: u8) -> Self {
        Self {
            is_leg: true,
            ..Self::new(name, HitLocationCategory::Limb, die_from, die_to, 0)
        }
    }

    /// Build the location for a character with `total_hit_points`
    pub fn build(&self, total_hit_points: u32) -> HitLocation {
        let mut location = HitLocation::new(
            self.name,
            self.category,
            location_hit_points(total_hit_points, self.hit_points_offset),
        )
        .with_die_range(self.die_from, self.die_to);
        location.is_leg = self.is_leg;
        location
    }
}

/// The standard two-armed, two-legged body
pub const HUMANOID: [LocationTemplate; 7] = [
    LocationTemplate::leg("rightLeg", 1, 4),
    LocationTemplate::leg("leftLeg", 5, 8),
    LocationTemplate::new("abdomen", HitLocationCategory::Abdomen, 9, 11, 0),
    LocationTemplate::new("chest", HitLocationCategory::Chest, 12, 12, 1),
    LocationTemplate::new("rightArm", HitLocationCategory::Limb, 13, 15, -1),
    LocationTemplate::new("leftArm", HitLocationCategory::Limb, 16, 18, -1),
    LocationTemplate::new("head", HitLocationCategory::Head, 19, 20, 0),
];

/// Hit points of one location
///
/// The base value is a third of the total (rounded up, never below 2), so
/// every 3 total hit points add one to each location. Arms sit one below the
/// base, the chest one above. No location goes below 1.
pub fn location_hit_points(total_hit_points: u32, offset: i32) -> u32 {
    let base = total_hit_points.div_ceil(3).max(2);
    let points = i64::from(base) + i64::from(offset);
    points.clamp(1, i64::from(u32::MAX)) as u32
}

impl CharacterHealth {
    /// A character with the humanoid hit locations
    pub fn humanoid(name: impl Into<String>, total_hit_points: u32) -> Self {
        Self::from_template(name, total_hit_points, &HUMANOID)
    }

    pub fn from_template(
        name: impl Into<String>,
        total_hit_points: u32,
        template: &[LocationTemplate],
    ) -> Self {
        template
            .iter()
            .fold(Self::new(name, total_hit_points), |character, location| {
                character.with_location(location.build(total_hit_points))
            })
    }

    /// The location covering a d20 roll
    pub fn location_for_roll(&self, roll: u8) -> Option<&HitLocation> {
        self.locations
            .iter()
            .find(|l| l.die_range.is_some_and(|range| range.contains(roll)))
    }

    /// Roll a d20 for a hit location
    pub fn roll_hit_location<R: Rng>(&self, rng: &mut R) -> (u8, Option<&HitLocation>) {
        let roll = rng.gen_range(1..=HIT_LOCATION_DIE);
        (roll, self.location_for_roll(roll))
    }

    /// Roll until a location that can still be hit comes up
    ///
    /// Severed and gone locations are rerolled. Returns `None` when nothing
    /// can be hit.
    pub fn roll_live_hit_location<R: Rng>(&self, rng: &mut R) -> Option<&HitLocation> {
        let any_live = self
            .locations
            .iter()
            .any(|l| l.die_range.is_some() && !l.health_state.is_terminal());
        if !any_live {
            return None;
        }

        for _ in 0..MAX_REROLLS {
            match self.roll_hit_location(rng) {
                (_, Some(location)) if !location.health_state.is_terminal() => {
                    return Some(location)
                }
                (roll, hit) => tracing::trace!(roll, hit = ?hit.map(|l| &l.name), "Rerolling hit location"),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::state::HitLocationHealthState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_location_hit_points_table() {
        // total 13-15: legs 5, chest 6, arms 4
        assert_eq!(location_hit_points(15, 0), 5);
        assert_eq!(location_hit_points(15, 1), 6);
        assert_eq!(location_hit_points(15, -1), 4);
        // total 7-9
        assert_eq!(location_hit_points(7, 0), 3);
        assert_eq!(location_hit_points(9, 0), 3);
        // total 1-6
        assert_eq!(location_hit_points(1, 0), 2);
        assert_eq!(location_hit_points(6, -1), 1);
    }

    #[test]
    fn test_humanoid_covers_every_roll_once() {
        let character = CharacterHealth::humanoid("Dummy", 15);
        for roll in 1..=HIT_LOCATION_DIE {
            let covering = character
                .locations
                .iter()
                .filter(|l| l.die_range.is_some_and(|r| r.contains(roll)))
                .count();
            assert_eq!(covering, 1, "roll {roll}");
        }
    }

    #[test]
    fn test_humanoid_has_two_legs() {
        let character = CharacterHealth::humanoid("Dummy", 15);
        assert_eq!(character.legs().count(), 2);
        assert_eq!(character.locations.len(), 7);
        assert_eq!(character.hit_points.value, 15);
    }

    #[test]
    fn test_location_for_roll() {
        let character = CharacterHealth::humanoid("Dummy", 15);
        assert_eq!(character.location_for_roll(12).unwrap().name, "chest");
        assert_eq!(character.location_for_roll(20).unwrap().name, "head");
        assert!(character.location_for_roll(0).is_none());
    }

    #[test]
    fn test_live_roll_skips_severed() {
        let mut character = CharacterHealth::humanoid("Dummy", 15);
        for location in &mut character.locations {
            if location.name != "head" {
                location.health_state = HitLocationHealthState::Severed;
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..5 {
            let hit = character.roll_live_hit_location(&mut rng);
            assert_eq!(hit.map(|l| l.name.as_str()), Some("head"));
        }
    }

    #[test]
    fn test_live_roll_none_when_everything_is_gone() {
        let mut character = CharacterHealth::humanoid("Dummy", 15);
        for location in &mut character.locations {
            location.health_state = HitLocationHealthState::Gone;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(character.roll_live_hit_location(&mut rng).is_none());
    }
}
