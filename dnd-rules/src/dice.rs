//! Seedable dice for character generation.
//!
//! Only ability scores and hit points are ever rolled. Every roll takes a
//! caller-supplied [`Rng`] so results are reproducible under a seeded
//! generator.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for hit-dice notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice specified")]
    NoDice,
}

/// Standard D&D die types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieType {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }

    pub fn from_sides(sides: u32) -> Result<DieType, DiceError> {
        match sides {
            4 => Ok(DieType::D4),
            6 => Ok(DieType::D6),
            8 => Ok(DieType::D8),
            10 => Ok(DieType::D10),
            12 => Ok(DieType::D12),
            20 => Ok(DieType::D20),
            100 => Ok(DieType::D100),
            _ => Err(DiceError::InvalidDieSize(sides)),
        }
    }

    /// Mean roll: 3.5 for a d6.
    pub fn average(&self) -> f64 {
        (self.sides() as f64 + 1.0) / 2.0
    }

    pub fn roll<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(1..=self.sides())
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// Classic monster hit dice: `4`, `4+1`, `3-1` or `1/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDice {
    pub count: u32,
    pub modifier: i32,
    /// A half die, written `1/2`.
    #[serde(default)]
    pub half: bool,
}

impl HitDice {
    pub fn new(count: u32, modifier: i32) -> Self {
        Self {
            count,
            modifier,
            half: false,
        }
    }

    pub fn half() -> Self {
        Self {
            count: 0,
            modifier: 0,
            half: true,
        }
    }

    /// Average hit points on `die`, never below 1.
    pub fn average_hp(&self, die: DieType) -> u32 {
        if self.half {
            return ((die.average() / 2.0).round() as i64 + self.modifier as i64).max(1) as u32;
        }
        let base = (self.count as f64 * die.average()).round() as i64;
        (base + self.modifier as i64).max(1) as u32
    }

    /// Roll hit points on `die`, never below 1.
    pub fn roll<R: Rng>(&self, die: DieType, rng: &mut R) -> u32 {
        let rolled: i64 = if self.half {
            die.roll(rng).div_ceil(2) as i64
        } else {
            (0..self.count).map(|_| die.roll(rng) as i64).sum()
        };
        (rolled + self.modifier as i64).max(1) as u32
    }
}

impl FromStr for HitDice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if notation.is_empty() {
            return Err(DiceError::NoDice);
        }
        if notation == "1/2" || notation == "½" {
            return Ok(HitDice::half());
        }

        let invalid = || DiceError::InvalidNotation(s.to_string());
        let (count, modifier) = match notation.find(['+', '-']) {
            Some(pos) => {
                let (count, rest) = notation.split_at(pos);
                let value: i32 = rest[1..].parse().map_err(|_| invalid())?;
                let modifier = if rest.starts_with('-') { -value } else { value };
                (count, modifier)
            }
            None => (notation.as_str(), 0),
        };
        let count: u32 = count.parse().map_err(|_| invalid())?;
        if count == 0 {
            return Err(DiceError::NoDice);
        }
        Ok(HitDice::new(count, modifier))
    }
}

impl fmt::Display for HitDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.half {
            return write!(f, "1/2");
        }
        match self.modifier {
            0 => write!(f, "{}", self.count),
            m if m > 0 => write!(f, "{}+{}", self.count, m),
            m => write!(f, "{}{}", self.count, m),
        }
    }
}

/// How ability scores are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbilityRollMethod {
    /// Roll 4d6 and drop the lowest die.
    #[default]
    FourD6DropLowest,
    /// Roll 3d6 straight down the line.
    ThreeD6InOrder,
}

/// Roll six ability scores, in [`Ability::all`](crate::mechanics::Ability::all) order.
pub fn roll_ability_scores<R: Rng>(method: AbilityRollMethod, rng: &mut R) -> [u8; 6] {
    let mut scores = [0u8; 6];
    for score in scores.iter_mut() {
        *score = match method {
            AbilityRollMethod::FourD6DropLowest => {
                let mut rolls: Vec<u32> = (0..4).map(|_| DieType::D6.roll(rng)).collect();
                rolls.sort_unstable();
                rolls[1..].iter().sum::<u32>() as u8
            }
            AbilityRollMethod::ThreeD6InOrder => (0..3).map(|_| DieType::D6.roll(rng)).sum::<u32>() as u8,
        };
    }
    scores
}

/// Roll a character's hit points.
///
/// First level takes the die's maximum; each later level rolls. The
/// Constitution modifier applies per level and no level gains less than 1.
pub fn roll_hit_points<R: Rng>(hit_die: DieType, level: u8, con_modifier: i32, rng: &mut R) -> u32 {
    if level == 0 {
        return 0;
    }
    let first = (hit_die.sides() as i32 + con_modifier).max(1) as u32;
    let later: u32 = (1..level)
        .map(|_| (hit_die.roll(rng) as i32 + con_modifier).max(1) as u32)
        .sum();
    first + later
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_die_average() {
        assert_eq!(DieType::D6.average(), 3.5);
        assert_eq!(DieType::D8.average(), 4.5);
        assert_eq!(DieType::from_sides(12).unwrap(), DieType::D12);
        assert_eq!(DieType::from_sides(7), Err(DiceError::InvalidDieSize(7)));
    }

    #[test]
    fn test_parse_hit_dice() {
        assert_eq!("4".parse::<HitDice>().unwrap(), HitDice::new(4, 0));
        assert_eq!("4+1".parse::<HitDice>().unwrap(), HitDice::new(4, 1));
        assert_eq!("3-1".parse::<HitDice>().unwrap(), HitDice::new(3, -1));
        assert_eq!(" 8 + 2 ".parse::<HitDice>().unwrap(), HitDice::new(8, 2));
        assert_eq!("1/2".parse::<HitDice>().unwrap(), HitDice::half());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<HitDice>(), Err(DiceError::NoDice));
        assert_eq!("0".parse::<HitDice>(), Err(DiceError::NoDice));
        assert!(matches!("x+1".parse::<HitDice>(), Err(DiceError::InvalidNotation(_))));
        assert!(matches!("4+".parse::<HitDice>(), Err(DiceError::InvalidNotation(_))));
    }

    #[test]
    fn test_hit_dice_display() {
        for notation in ["4", "4+1", "3-1", "1/2"] {
            assert_eq!(notation.parse::<HitDice>().unwrap().to_string(), notation);
        }
    }

    #[test]
    fn test_average_hp() {
        assert_eq!(HitDice::new(4, 0).average_hp(DieType::D8), 18);
        assert_eq!(HitDice::new(4, 1).average_hp(DieType::D8), 19);
        assert_eq!(HitDice::new(1, -1).average_hp(DieType::D6), 3);
        assert_eq!(HitDice::half().average_hp(DieType::D8), 2);
        assert_eq!(HitDice::new(1, -5).average_hp(DieType::D4), 1);
    }

    #[test]
    fn test_roll_hit_dice_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let hp = HitDice::new(2, 1).roll(DieType::D8, &mut rng);
            assert!((3..=17).contains(&hp));
            let hp = HitDice::half().roll(DieType::D8, &mut rng);
            assert!((1..=4).contains(&hp));
        }
    }

    #[test]
    fn test_ability_score_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            for method in [AbilityRollMethod::FourD6DropLowest, AbilityRollMethod::ThreeD6InOrder] {
                let scores = roll_ability_scores(method, &mut rng);
                assert!(scores.iter().all(|s| (3..=18).contains(s)));
            }
        }
    }

    #[test]
    fn test_rolls_are_reproducible() {
        let a = roll_ability_scores(AbilityRollMethod::FourD6DropLowest, &mut StdRng::seed_from_u64(1));
        let b = roll_ability_scores(AbilityRollMethod::FourD6DropLowest, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_hit_points_max_at_first_level() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(roll_hit_points(DieType::D10, 1, 2, &mut rng), 12);
        assert_eq!(roll_hit_points(DieType::D6, 0, 2, &mut rng), 0);
        for _ in 0..50 {
            let hp = roll_hit_points(DieType::D8, 5, 1, &mut rng);
            assert!((9 + 4 * 2..=9 + 4 * 9).contains(&hp));
        }
        // a heavy penalty still yields a hit point per level
        assert_eq!(roll_hit_points(DieType::D4, 3, -5, &mut rng), 3);
    }
}
