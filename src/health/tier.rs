//! Wound tiers: how far the wounds on one location have gone past its hit points
//!
//! Categorical, like everything else in the wound rules. A location's state and
//! its impact on the character are table lookups on (category, tier).

use serde::{Deserialize, Serialize};

use crate::health::location::HitLocationCategory;
use crate::health::state::{ActorHealthState, HitLocationHealthState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WoundTier {
    /// No wounds at all
    Unhurt,
    /// Below the location's hit points
    Light,
    /// At least the location's hit points
    Disabling,
    /// At least twice the location's hit points
    Grievous,
    /// At least three times the location's hit points
    Mortal,
}

impl WoundTier {
    /// Classify a cumulative wound total against a location's maximum
    pub fn from_total(total: u64, hit_points_max: u32) -> Self {
        let max = u64::from(hit_points_max);
        if total == 0 {
            WoundTier::Unhurt
        } else if total < max {
            WoundTier::Light
        } else if total < 2 * max {
            WoundTier::Disabling
        } else if total < 3 * max {
            WoundTier::Grievous
        } else {
            WoundTier::Mortal
        }
    }

    /// Health state of a location in this tier
    pub fn location_state(self, category: HitLocationCategory) -> HitLocationHealthState {
        use HitLocationHealthState::*;
        use WoundTier::*;

        match (category, self) {
            (_, Unhurt) => Healthy,
            (HitLocationCategory::Limb, Disabling | Grievous) => Useless,
            (HitLocationCategory::Limb, Mortal) => Severed,
            _ => Wounded,
        }
    }

    /// Impact on the whole character of a location in this tier
    pub fn actor_impact(self, category: HitLocationCategory) -> ActorHealthState {
        use ActorHealthState::*;
        use HitLocationCategory::*;

        match (category, self) {
            (_, WoundTier::Unhurt) => Healthy,
            (_, WoundTier::Light) => Wounded,
            (Other, _) => Wounded,

            (Limb, WoundTier::Disabling) => Wounded,
            (Limb, WoundTier::Grievous | WoundTier::Mortal) => Shock,

            (Head, WoundTier::Disabling) => Unconscious,
            (Chest, WoundTier::Disabling) => Shock,
            // The legs give out, the character is otherwise just wounded
            (Abdomen, WoundTier::Disabling) => Wounded,

            (Head | Chest | Abdomen, WoundTier::Grievous) => Unconscious,
            (Head | Chest | Abdomen, WoundTier::Mortal) => Dead,
        }
    }

    /// Does a location in this tier take both legs out?
    pub fn disables_legs(self, category: HitLocationCategory) -> bool {
        category == HitLocationCategory::Abdomen && self >= WoundTier::Disabling
    }
}
