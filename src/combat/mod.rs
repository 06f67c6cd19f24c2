//! Weapon damage rolls and experience checks

pub mod damage;
pub mod dice;
pub mod experience;

pub use damage::{roll_damage, CombatManeuver, DamageRoll, DamageRollType, Weapon, WeaponKind};
pub use dice::{DiceFormula, DiceTerm};
pub use experience::{check_experience, grants_experience, Skill};
