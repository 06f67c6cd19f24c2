//! Dice formulas such as `1d8+1`, `2d6` or `-1d4`

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{DamageError, Result};

/// Largest number of dice a single term may roll
pub const MAX_DICE: u32 = 100;

/// Largest die a term may name
pub const MAX_SIDES: u32 = 1000;

/// One signed part of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiceTerm {
    /// `count` dice with `sides` faces, subtracted when `negative`
    Dice {
        count: u32,
        sides: u32,
        negative: bool,
    },
    Flat(i32),
}

impl DiceTerm {
    fn signed(value: u32, negative: bool) -> i32 {
        let value = value as i32;
        if negative {
            -value
        } else {
            value
        }
    }

    fn maximum(&self) -> i32 {
        match *self {
            DiceTerm::Flat(value) => value,
            DiceTerm::Dice {
                count,
                sides,
                negative,
            } => Self::signed(count * sides, negative),
        }
    }

    fn roll<R: Rng>(&self, rng: &mut R) -> i32 {
        match *self {
            DiceTerm::Flat(value) => value,
            DiceTerm::Dice {
                count,
                sides,
                negative,
            } => {
                let rolled: u32 = (0..count).map(|_| rng.gen_range(1..=sides)).sum();
                Self::signed(rolled, negative)
            }
        }
    }
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DiceTerm::Flat(value) => write!(f, "{value}"),
            DiceTerm::Dice {
                count,
                sides,
                negative,
            } => write!(f, "{}{count}d{sides}", if negative { "-" } else { "" }),
        }
    }
}

/// Sum of dice and flat terms
///
/// An empty formula (written `""` or `"0"`) always rolls 0. Maximizing a
/// formula turns every die to its highest face, so a maximized `-1d4` is -4.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceFormula {
    terms: Vec<DiceTerm>,
}

impl DiceFormula {
    pub fn new(terms: Vec<DiceTerm>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[DiceTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn roll<R: Rng>(&self, rng: &mut R) -> i32 {
        self.terms
            .iter()
            .map(|term| term.roll(rng))
            .fold(0, i32::saturating_add)
    }

    /// Every die at its highest face
    pub fn maximized(&self) -> i32 {
        self.terms
            .iter()
            .map(DiceTerm::maximum)
            .fold(0, i32::saturating_add)
    }

    /// Roll, or take the maximum when `maximize` is set
    pub fn evaluate<R: Rng>(&self, maximize: bool, rng: &mut R) -> i32 {
        if maximize {
            self.maximized()
        } else {
            self.roll(rng)
        }
    }
}

fn parse_term(text: &str, negative: bool, formula: &str) -> Result<DiceTerm> {
    let invalid = || DamageError::InvalidDice(formula.to_string());

    match text.split_once(['d', 'D']) {
        Some((count, sides)) => {
            let count = if count.is_empty() {
                1
            } else {
                count.parse::<u32>().map_err(|_| invalid())?
            };
            let sides = sides.parse::<u32>().map_err(|_| invalid())?;
            if !(1..=MAX_DICE).contains(&count) || !(1..=MAX_SIDES).contains(&sides) {
                return Err(invalid());
            }
            Ok(DiceTerm::Dice {
                count,
                sides,
                negative,
            })
        }
        None => {
            let value = text.parse::<i32>().map_err(|_| invalid())?;
            Ok(DiceTerm::Flat(if negative { -value } else { value }))
        }
    }
}

impl FromStr for DiceFormula {
    type Err = DamageError;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() || compact == "0" {
            return Ok(Self::default());
        }

        let mut terms = Vec::new();
        let mut negative = false;
        let mut current = String::new();
        for (i, c) in compact.char_indices() {
            match c {
                '+' | '-' => {
                    if i > 0 {
                        if current.is_empty() {
                            return Err(DamageError::InvalidDice(s.to_string()));
                        }
                        terms.push(parse_term(&current, negative, s)?);
                        current.clear();
                    }
                    negative = c == '-';
                }
                _ => current.push(c),
            }
        }
        if current.is_empty() {
            return Err(DamageError::InvalidDice(s.to_string()));
        }
        terms.push(parse_term(&current, negative, s)?);

        Ok(Self { terms })
    }
}

impl TryFrom<String> for DiceFormula {
    type Error = DamageError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DiceFormula> for String {
    fn from(formula: DiceFormula) -> Self {
        formula.to_string()
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            let text = term.to_string();
            if i > 0 && !text.starts_with('-') {
                f.write_str("+")?;
            }
            f.write_str(&text)?;
        }
        Ok(())
    }
}
