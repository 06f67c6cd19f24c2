//! Weapon damage rolls
//!
//! A damage roll is the weapon's damage, an extra special term when the
//! attack rolled a special, and the wielder's damage bonus. The result feeds
//! `health::apply_damage`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::dice::DiceFormula;
use crate::core::error::DamageError;

/// How an attack or parry is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombatManeuver {
    Crush,
    Slash,
    Impale,
    Parry,
}

impl CombatManeuver {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatManeuver::Crush => "crush",
            CombatManeuver::Slash => "slash",
            CombatManeuver::Impale => "impale",
            CombatManeuver::Parry => "parry",
        }
    }

    pub fn is_slash_or_impale(&self) -> bool {
        matches!(self, CombatManeuver::Slash | CombatManeuver::Impale)
    }
}

impl fmt::Display for CombatManeuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombatManeuver {
    type Err = DamageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "crush" => Ok(CombatManeuver::Crush),
            "slash" => Ok(CombatManeuver::Slash),
            "impale" => Ok(CombatManeuver::Impale),
            "parry" => Ok(CombatManeuver::Parry),
            _ => Err(DamageError::UnknownName {
                kind: "combat maneuver",
                name: s.to_string(),
            }),
        }
    }
}

/// How the wielder's damage bonus applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaponKind {
    /// Full damage bonus
    #[default]
    Melee,
    /// Half the damage bonus, rounded up
    Thrown,
    /// Bows and slings, no damage bonus
    Projectile,
}

impl FromStr for WeaponKind {
    type Err = DamageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "melee" => Ok(WeaponKind::Melee),
            "thrown" => Ok(WeaponKind::Thrown),
            "projectile" => Ok(WeaponKind::Projectile),
            _ => Err(DamageError::UnknownName {
                kind: "weapon kind",
                name: s.to_string(),
            }),
        }
    }
}

/// Which damage the attack earned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageRollType {
    #[default]
    Normal,
    Special,
    /// Special damage with every die at its highest face
    MaxSpecial,
}

impl DamageRollType {
    pub fn is_special(&self) -> bool {
        !matches!(self, DamageRollType::Normal)
    }
}

impl FromStr for DamageRollType {
    type Err = DamageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(DamageRollType::Normal),
            "special" => Ok(DamageRollType::Special),
            "maxspecial" | "max-special" => Ok(DamageRollType::MaxSpecial),
            _ => Err(DamageError::UnknownName {
                kind: "damage roll type",
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: DiceFormula,
    #[serde(default)]
    pub kind: WeaponKind,
    /// Attack maneuvers the weapon supports
    pub maneuvers: Vec<CombatManeuver>,
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        damage: DiceFormula,
        kind: WeaponKind,
        maneuvers: Vec<CombatManeuver>,
    ) -> Self {
        Self {
            name: name.into(),
            damage,
            kind,
            maneuvers,
        }
    }

    pub fn has_maneuver(&self, maneuver: CombatManeuver) -> bool {
        self.maneuvers.contains(&maneuver)
    }

    /// Special damage rule for `maneuver`
    ///
    /// A parry uses the weapon's crush rule when it can crush, else its
    /// slash/impale rule. `None` when the weapon has no attack maneuver to
    /// borrow a rule from.
    pub fn special_rule(&self, maneuver: CombatManeuver) -> Option<CombatManeuver> {
        match maneuver {
            CombatManeuver::Parry => {
                if self.has_maneuver(CombatManeuver::Crush) {
                    Some(CombatManeuver::Crush)
                } else {
                    self.maneuvers
                        .iter()
                        .copied()
                        .find(CombatManeuver::is_slash_or_impale)
                }
            }
            attack => Some(attack),
        }
    }
}

/// Components of a rolled damage total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    pub maneuver: CombatManeuver,
    pub roll_type: DamageRollType,
    pub weapon: i32,
    pub special: i32,
    pub damage_bonus: i32,
}

impl DamageRoll {
    pub fn total(&self) -> i32 {
        self.weapon
            .saturating_add(self.special)
            .saturating_add(self.damage_bonus)
    }

    /// Damage to apply to a hit location, never negative
    pub fn damage(&self) -> u32 {
        self.total().max(0) as u32
    }
}

/// Half, rounded toward positive infinity
fn half_rounded_up(value: i32) -> i32 {
    value.div_euclid(2) + value.rem_euclid(2)
}

/// The wielder's damage bonus as this weapon kind uses it
fn weapon_damage_bonus<R: Rng>(
    kind: WeaponKind,
    damage_bonus: &DiceFormula,
    maximize: bool,
    rng: &mut R,
) -> i32 {
    match kind {
        WeaponKind::Melee => damage_bonus.evaluate(maximize, rng),
        WeaponKind::Thrown => half_rounded_up(damage_bonus.evaluate(maximize, rng)),
        WeaponKind::Projectile => 0,
    }
}

/// Roll damage for a hit made with `weapon`
///
/// Specials add the weapon damage again for slash and impale, and the
/// maximized damage bonus for crush. A max special maximizes every term.
pub fn roll_damage<R: Rng>(
    weapon: &Weapon,
    maneuver: CombatManeuver,
    damage_bonus: &DiceFormula,
    roll_type: DamageRollType,
    rng: &mut R,
) -> DamageRoll {
    let maximize = roll_type == DamageRollType::MaxSpecial;

    let weapon_damage = weapon.damage.evaluate(maximize, rng);

    let special = if roll_type.is_special() {
        match weapon.special_rule(maneuver) {
            Some(CombatManeuver::Crush) => {
                weapon_damage_bonus(weapon.kind, damage_bonus, true, rng)
            }
            Some(_) => weapon.damage.evaluate(maximize, rng),
            None => {
                tracing::warn!(
                    weapon = %weapon.name,
                    "Weapon has no attack maneuver, special damage skipped"
                );
                0
            }
        }
    } else {
        0
    };

    let bonus = weapon_damage_bonus(weapon.kind, damage_bonus, maximize, rng);

    let roll = DamageRoll {
        maneuver,
        roll_type,
        weapon: weapon_damage,
        special,
        damage_bonus: bonus,
    };
    tracing::debug!(
        weapon = %weapon.name,
        %maneuver,
        ?roll_type,
        total = roll.total(),
        "Damage roll"
    );
    roll
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn dice(text: &str) -> DiceFormula {
        text.parse().unwrap()
    }

    fn broadsword() -> Weapon {
        Weapon::new(
            "Broadsword",
            dice("1d8+1"),
            WeaponKind::Melee,
            vec![CombatManeuver::Slash, CombatManeuver::Impale],
        )
    }

    fn mace() -> Weapon {
        Weapon::new(
            "Light Mace",
            dice("1d6+1"),
            WeaponKind::Melee,
            vec![CombatManeuver::Crush],
        )
    }

    fn javelin() -> Weapon {
        Weapon::new(
            "Javelin",
            dice("1d10"),
            WeaponKind::Thrown,
            vec![CombatManeuver::Impale],
        )
    }

    fn self_bow() -> Weapon {
        Weapon::new(
            "Self Bow",
            dice("1d6+1"),
            WeaponKind::Projectile,
            vec![CombatManeuver::Impale],
        )
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(5)
    }

    #[test]
    fn test_half_rounded_up() {
        assert_eq!(half_rounded_up(4), 2);
        assert_eq!(half_rounded_up(3), 2);
        assert_eq!(half_rounded_up(1), 1);
        assert_eq!(half_rounded_up(0), 0);
        assert_eq!(half_rounded_up(-3), -1);
        assert_eq!(half_rounded_up(-4), -2);
    }

    #[test]
    fn test_normal_roll_has_no_special() {
        let mut rng = rng();
        for _ in 0..100 {
            let roll = roll_damage(
                &broadsword(),
                CombatManeuver::Slash,
                &dice("1d4"),
                DamageRollType::Normal,
                &mut rng,
            );
            assert_eq!(roll.special, 0);
            assert!((2..=9).contains(&roll.weapon));
            assert!((1..=4).contains(&roll.damage_bonus));
        }
    }

    #[test]
    fn test_max_special_slash_doubles_weapon_damage() {
        let roll = roll_damage(
            &broadsword(),
            CombatManeuver::Slash,
            &dice("1d4"),
            DamageRollType::MaxSpecial,
            &mut rng(),
        );
        assert_eq!(roll.weapon, 9);
        assert_eq!(roll.special, 9);
        assert_eq!(roll.damage_bonus, 4);
        assert_eq!(roll.damage(), 22);
    }

    #[test]
    fn test_special_impale_rolls_weapon_damage_again() {
        let mut rng = rng();
        for _ in 0..100 {
            let roll = roll_damage(
                &broadsword(),
                CombatManeuver::Impale,
                &DiceFormula::default(),
                DamageRollType::Special,
                &mut rng,
            );
            assert!((2..=9).contains(&roll.special));
            assert_eq!(roll.damage_bonus, 0);
        }
    }

    #[test]
    fn test_special_crush_adds_maximized_damage_bonus() {
        let mut rng = rng();
        for _ in 0..100 {
            let roll = roll_damage(
                &mace(),
                CombatManeuver::Crush,
                &dice("1d6"),
                DamageRollType::Special,
                &mut rng,
            );
            assert_eq!(roll.special, 6);
            assert!((1..=6).contains(&roll.damage_bonus));
        }
    }

    #[test]
    fn test_special_crush_without_damage_bonus_adds_nothing() {
        let roll = roll_damage(
            &mace(),
            CombatManeuver::Crush,
            &DiceFormula::default(),
            DamageRollType::MaxSpecial,
            &mut rng(),
        );
        assert_eq!(roll.special, 0);
        assert_eq!(roll.total(), 7);
    }

    #[test]
    fn test_negative_damage_bonus_never_gives_negative_damage() {
        let dagger = Weapon::new(
            "Dagger",
            dice("1d4+1"),
            WeaponKind::Melee,
            vec![CombatManeuver::Impale],
        );
        let roll = DamageRoll {
            maneuver: CombatManeuver::Impale,
            roll_type: DamageRollType::Normal,
            weapon: 2,
            special: 0,
            damage_bonus: -4,
        };
        assert_eq!(roll.total(), -2);
        assert_eq!(roll.damage(), 0);

        let maxed = roll_damage(
            &dagger,
            CombatManeuver::Impale,
            &dice("-1d4"),
            DamageRollType::MaxSpecial,
            &mut rng(),
        );
        assert_eq!(maxed.damage_bonus, -4);
        assert_eq!(maxed.total(), 6);
    }

    #[test]
    fn test_parry_prefers_crush() {
        let flail = Weapon::new(
            "Flail",
            dice("1d6"),
            WeaponKind::Melee,
            vec![CombatManeuver::Slash, CombatManeuver::Crush],
        );
        assert_eq!(flail.special_rule(CombatManeuver::Parry), Some(CombatManeuver::Crush));
        assert_eq!(
            broadsword().special_rule(CombatManeuver::Parry),
            Some(CombatManeuver::Slash)
        );

        let roll = roll_damage(
            &flail,
            CombatManeuver::Parry,
            &dice("1d4"),
            DamageRollType::Special,
            &mut rng(),
        );
        assert_eq!(roll.special, 4);
    }

    #[test]
    fn test_parry_with_shield_has_no_special() {
        let shield = Weapon::new("Buckler", dice("1d3"), WeaponKind::Melee, vec![]);
        assert_eq!(shield.special_rule(CombatManeuver::Parry), None);

        let roll = roll_damage(
            &shield,
            CombatManeuver::Parry,
            &dice("1d4"),
            DamageRollType::MaxSpecial,
            &mut rng(),
        );
        assert_eq!(roll.special, 0);
        assert_eq!(roll.total(), 3 + 4);
    }

    #[test]
    fn test_thrown_weapon_uses_half_damage_bonus() {
        let roll = roll_damage(
            &javelin(),
            CombatManeuver::Impale,
            &dice("1d6"),
            DamageRollType::MaxSpecial,
            &mut rng(),
        );
        assert_eq!(roll.weapon, 10);
        assert_eq!(roll.special, 10);
        assert_eq!(roll.damage_bonus, 3);

        let mut rng = rng();
        for _ in 0..100 {
            let roll = roll_damage(
                &javelin(),
                CombatManeuver::Impale,
                &dice("1d4"),
                DamageRollType::Normal,
                &mut rng,
            );
            assert!((1..=2).contains(&roll.damage_bonus));
        }
    }

    #[test]
    fn test_projectile_weapon_ignores_damage_bonus() {
        let roll = roll_damage(
            &self_bow(),
            CombatManeuver::Impale,
            &dice("2d6"),
            DamageRollType::MaxSpecial,
            &mut rng(),
        );
        assert_eq!(roll.damage_bonus, 0);
        assert_eq!(roll.total(), 14);
    }

    #[test]
    fn test_parse_roll_options() {
        assert_eq!("Slash".parse::<CombatManeuver>().unwrap(), CombatManeuver::Slash);
        assert_eq!("thrown".parse::<WeaponKind>().unwrap(), WeaponKind::Thrown);
        assert_eq!(
            "max-special".parse::<DamageRollType>().unwrap(),
            DamageRollType::MaxSpecial
        );
        assert!(matches!(
            "kick".parse::<CombatManeuver>(),
            Err(DamageError::UnknownName { .. })
        ));
    }
}
