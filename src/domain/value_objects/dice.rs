//! Dice expressions and the level-indexed scaling tables
//!
//! Damage progresses through a hand-tuned table for the first nine levels,
//! alternating between a d4 and a d5 while the flat bonus climbs, and then
//! settles on `1d5+(level-6)`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest die count or side count `from_str` accepts
pub const MAX_DICE: u32 = 1000;

/// A dice expression of the form `NdS`, `NdS+B` or `NdS-B`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    pub count: u32,
    pub sides: u32,
    pub bonus: i32,
}

impl DiceExpression {
    pub const fn new(count: u32, sides: u32, bonus: i32) -> Self {
        Self { count, sides, bonus }
    }

    /// Lowest possible total, saturating at the `i32` bounds
    pub fn min(&self) -> i32 {
        if self.sides == 0 {
            return self.bonus;
        }
        saturate(i64::from(self.count) + i64::from(self.bonus))
    }

    /// Highest possible total, saturating at the `i32` bounds
    pub fn max(&self) -> i32 {
        let dice = i64::from(self.count).saturating_mul(i64::from(self.sides));
        saturate(dice.saturating_add(i64::from(self.bonus)))
    }

    /// Roll every die and add the flat bonus
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.sides == 0 {
            return self.bonus;
        }
        let rolled = (0..self.count).fold(i64::from(self.bonus), |total, _| {
            total.saturating_add(i64::from(rng.gen_range(1..=self.sides)))
        });
        saturate(rolled)
    }
}

fn saturate(total: i64) -> i32 {
    i32::try_from(total).unwrap_or(if total < 0 { i32::MIN } else { i32::MAX })
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.bonus > 0 {
            write!(f, "+{}", self.bonus)?;
        } else if self.bonus < 0 {
            write!(f, "{}", self.bonus)?;
        }
        Ok(())
    }
}

/// Errors produced while parsing a dice expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceParseError {
    #[error("Missing 'd' separator in dice expression: {0}")]
    MissingSeparator(String),

    #[error("Invalid number in dice expression: {0}")]
    InvalidNumber(String),

    #[error("Dice expression needs at least one die with at least one side: {0}")]
    EmptyDice(String),

    #[error("Dice expression exceeds {max} dice or {max} sides: {expression}")]
    TooLarge { expression: String, max: u32 },
}

impl FromStr for DiceExpression {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (count_str, rest) = trimmed
            .split_once(['d', 'D'])
            .ok_or_else(|| DiceParseError::MissingSeparator(s.to_string()))?;

        let (sides_str, bonus) = match rest.find(['+', '-']) {
            Some(idx) => {
                let bonus = rest[idx..]
                    .parse::<i32>()
                    .map_err(|_| DiceParseError::InvalidNumber(s.to_string()))?;
                (&rest[..idx], bonus)
            }
            None => (rest, 0),
        };

        let count = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse::<u32>()
                .map_err(|_| DiceParseError::InvalidNumber(s.to_string()))?
        };
        let sides = sides_str
            .parse::<u32>()
            .map_err(|_| DiceParseError::InvalidNumber(s.to_string()))?;

        if count == 0 || sides == 0 {
            return Err(DiceParseError::EmptyDice(s.to_string()));
        }
        if count > MAX_DICE || sides > MAX_DICE {
            return Err(DiceParseError::TooLarge {
                expression: s.to_string(),
                max: MAX_DICE,
            });
        }

        Ok(Self::new(count, sides, bonus))
    }
}

/// Damage dealt by a conjured projectile at the given mutation level
pub fn damage_for_level(level: i32) -> DiceExpression {
    match level {
        i32::MIN..=1 => DiceExpression::new(1, 3, 0),
        2 => DiceExpression::new(1, 4, 0),
        3 => DiceExpression::new(1, 5, 0),
        4 => DiceExpression::new(1, 4, 1),
        5 => DiceExpression::new(1, 5, 1),
        6 => DiceExpression::new(1, 4, 2),
        7 => DiceExpression::new(1, 5, 2),
        8 => DiceExpression::new(1, 4, 3),
        9 => DiceExpression::new(1, 5, 3),
        _ => DiceExpression::new(1, 5, level - 6),
    }
}

/// Armor penetration bonus at the given mutation level
pub fn penetration_bonus(level: i32) -> i32 {
    4 + level.saturating_sub(1) / 2
}
