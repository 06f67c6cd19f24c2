//! Percentile ability rolls

pub mod resolution;

pub use resolution::{evaluate_result, roll_ability, AbilityRoll, RollResult};
