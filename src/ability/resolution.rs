//! Ability roll resolution
//!
//! A d100 roll against a percentage chance lands in one of seven result
//! tiers. The breakpoints are derived from the chance; the special critical
//! tiers only exist when the table enables them.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::RulesConfig;

/// Outcome of an ability roll, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RollResult {
    HyperCritical,
    SpecialCritical,
    Critical,
    Special,
    Success,
    Failure,
    Fumble,
}

impl RollResult {
    pub fn is_success(&self) -> bool {
        *self <= RollResult::Success
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RollResult::HyperCritical => "Hyper Critical",
            RollResult::SpecialCritical => "Special Critical",
            RollResult::Critical => "Critical",
            RollResult::Special => "Special",
            RollResult::Success => "Success",
            RollResult::Failure => "Failure",
            RollResult::Fumble => "Fumble",
        }
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest chance the breakpoint table distinguishes
pub const MAX_CHANCE: i32 = 100_000;

/// Integer division rounding toward positive infinity, for any sign of `a`
fn ceil_div(a: i32, b: i32) -> i32 {
    (a + b - 1).div_euclid(b)
}

/// Read a d100 `roll` against `chance`
///
/// Negative chances count as 0% and anything past `MAX_CHANCE` counts as
/// `MAX_CHANCE`. Rolls of 1-5 always succeed, however low the chance.
pub fn evaluate_result(chance: i32, roll: u32, config: &RulesConfig) -> RollResult {
    let chance = chance.clamp(0, MAX_CHANCE);
    let roll = i64::from(roll);

    let (hyper_critical, special_critical) = if config.special_crit && chance >= 100 {
        (ceil_div(chance, 500), ceil_div(chance, 100))
    } else {
        (0, 0)
    };

    let critical = (ceil_div(chance - 29, 20) + 1).max(1);
    let special = if chance == 6 || chance == 7 {
        2
    } else {
        (ceil_div(chance - 7, 5) + 1).clamp(1, 95)
    };
    let fumble = (100 - ceil_div(100 - chance - 9, 20) + 1).min(100);
    let success = chance.clamp(5, 95);
    let failure = if fumble == 96 { 95 } else { (fumble - 1).max(96) };

    let limits = [
        (hyper_critical, RollResult::HyperCritical),
        (special_critical, RollResult::SpecialCritical),
        (critical, RollResult::Critical),
        (special, RollResult::Special),
        (success, RollResult::Success),
        (failure, RollResult::Failure),
    ];

    limits
        .iter()
        .find(|(limit, _)| roll <= i64::from(*limit))
        .map_or(RollResult::Fumble, |(_, result)| *result)
}

/// A rolled ability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRoll {
    pub flavor: String,
    pub chance: i32,
    pub modifier: i32,
    pub roll: u32,
    pub result: RollResult,
}

impl AbilityRoll {
    /// Chance after the modifier
    pub fn modified_chance(&self) -> i32 {
        self.chance.saturating_add(self.modifier)
    }

    /// Chat line, e.g. "Broadsword (50+10%) Success"
    pub fn describe(&self) -> String {
        let modifier = match self.modifier {
            0 => String::new(),
            m if m > 0 => format!("+{m}"),
            m => m.to_string(),
        };
        format!("{} ({}{}%) {}", self.flavor, self.chance, modifier, self.result)
    }
}

/// Roll 1d100 against `chance + modifier`
pub fn roll_ability<R: Rng>(
    flavor: impl Into<String>,
    chance: i32,
    modifier: i32,
    config: &RulesConfig,
    rng: &mut R,
) -> AbilityRoll {
    let roll = rng.gen_range(1..=100);
    let result = evaluate_result(chance.saturating_add(modifier), roll, config);
    let ability_roll = AbilityRoll {
        flavor: flavor.into(),
        chance,
        modifier,
        roll,
        result,
    };
    tracing::debug!(roll, chance = ability_roll.modified_chance(), %result, "Ability roll");
    ability_roll
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn plain() -> RulesConfig {
        RulesConfig::default()
    }

    #[test]
    fn test_ceil_div_handles_negatives() {
        assert_eq!(ceil_div(21, 20), 2);
        assert_eq!(ceil_div(-29, 20), -1);
        assert_eq!(ceil_div(-7, 5), -1);
        assert_eq!(ceil_div(0, 5), 0);
    }

    #[test]
    fn test_fifty_percent_breakpoints() {
        let config = plain();
        assert_eq!(evaluate_result(50, 1, &config), RollResult::Critical);
        assert_eq!(evaluate_result(50, 3, &config), RollResult::Critical);
        assert_eq!(evaluate_result(50, 4, &config), RollResult::Special);
        assert_eq!(evaluate_result(50, 10, &config), RollResult::Special);
        assert_eq!(evaluate_result(50, 11, &config), RollResult::Success);
        assert_eq!(evaluate_result(50, 50, &config), RollResult::Success);
        assert_eq!(evaluate_result(50, 51, &config), RollResult::Failure);
        assert_eq!(evaluate_result(50, 97, &config), RollResult::Failure);
        assert_eq!(evaluate_result(50, 98, &config), RollResult::Fumble);
    }

    #[test]
    fn test_zero_chance_still_succeeds_on_low_rolls() {
        let config = plain();
        assert_eq!(evaluate_result(0, 1, &config), RollResult::Critical);
        assert_eq!(evaluate_result(0, 5, &config), RollResult::Success);
        assert_eq!(evaluate_result(0, 6, &config), RollResult::Failure);
        assert_eq!(evaluate_result(0, 95, &config), RollResult::Failure);
        assert_eq!(evaluate_result(0, 96, &config), RollResult::Fumble);
    }

    #[test]
    fn test_negative_chance_counts_as_zero() {
        let config = plain();
        for roll in 1..=100 {
            assert_eq!(
                evaluate_result(-50, roll, &config),
                evaluate_result(0, roll, &config)
            );
        }
    }

    #[test]
    fn test_high_chance_still_fails_on_high_rolls() {
        let config = plain();
        assert_eq!(evaluate_result(150, 95, &config), RollResult::Success);
        assert_eq!(evaluate_result(150, 96, &config), RollResult::Failure);
        assert_eq!(evaluate_result(150, 100, &config), RollResult::Fumble);
    }

    #[test]
    fn test_special_crit_only_when_enabled() {
        let on = RulesConfig { special_crit: true };
        assert_eq!(evaluate_result(100, 1, &plain()), RollResult::Critical);
        assert_eq!(evaluate_result(100, 1, &on), RollResult::HyperCritical);
        assert_eq!(evaluate_result(200, 2, &on), RollResult::SpecialCritical);
        assert_eq!(evaluate_result(200, 3, &on), RollResult::Critical);
        // Below 100% the table setting changes nothing
        assert_eq!(evaluate_result(90, 1, &on), RollResult::Critical);
    }

    #[test]
    fn test_extreme_chances_saturate() {
        let on = RulesConfig { special_crit: true };
        assert_eq!(evaluate_result(i32::MAX, 1, &on), RollResult::HyperCritical);
        assert_eq!(
            evaluate_result(i32::MAX, 150, &on),
            evaluate_result(MAX_CHANCE, 150, &on)
        );
        assert_eq!(
            evaluate_result(i32::MAX, 100, &plain()),
            evaluate_result(MAX_CHANCE, 100, &plain())
        );
        assert_eq!(evaluate_result(i32::MIN, 1, &plain()), RollResult::Critical);
        assert_eq!(evaluate_result(i32::MIN, 100, &plain()), RollResult::Fumble);
    }

    #[test]
    fn test_roll_ability_saturates_modified_chance() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let high = roll_ability("x", i32::MAX, 1, &plain(), &mut rng);
        assert_eq!(high.modified_chance(), i32::MAX);
        assert_eq!(high.result, evaluate_result(i32::MAX, high.roll, &plain()));

        let low = roll_ability("x", i32::MIN, -1, &plain(), &mut rng);
        assert_eq!(low.modified_chance(), i32::MIN);
        assert_eq!(low.result, evaluate_result(0, low.roll, &plain()));
    }

    #[test]
    fn test_six_and_seven_percent_special() {
        let config = plain();
        assert_eq!(evaluate_result(6, 2, &config), RollResult::Special);
        assert_eq!(evaluate_result(7, 2, &config), RollResult::Special);
    }

    #[test]
    fn test_results_worsen_as_roll_rises() {
        let config = plain();
        for chance in [0, 5, 25, 50, 75, 95, 120] {
            let mut previous = RollResult::HyperCritical;
            for roll in 1..=100 {
                let result = evaluate_result(chance, roll, &config);
                assert!(result >= previous, "chance {chance} roll {roll}");
                previous = result;
            }
        }
    }

    #[test]
    fn test_describe() {
        let roll = AbilityRoll {
            flavor: "Broadsword".into(),
            chance: 50,
            modifier: 10,
            roll: 12,
            result: RollResult::Success,
        };
        assert_eq!(roll.describe(), "Broadsword (50+10%) Success");

        let roll = AbilityRoll { modifier: -20, ..roll };
        assert_eq!(roll.describe(), "Broadsword (50-20%) Success");
    }

    #[test]
    fn test_roll_ability_is_deterministic_per_seed() {
        let config = plain();
        let a = roll_ability("Dodge", 40, 0, &config, &mut ChaCha8Rng::seed_from_u64(3));
        let b = roll_ability("Dodge", 40, 0, &config, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
        assert!((1..=100).contains(&a.roll));
        assert_eq!(a.result, evaluate_result(40, a.roll, &config));
    }
}
