//! Edition-neutral mechanical model.
//!
//! Every inbound adapter converts into these types and the outbound 5e
//! adapter converts out of them. Once built, a [`CoreMechanics`] only ever
//! holds ascending armor class and movement in feet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    /// Standard modifier for a score: `floor((score - 10) / 2)`.
    pub fn modifier(score: u8) -> i8 {
        ((score as i16 - 10).div_euclid(2)) as i8
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Movement rates in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Movement {
    pub ground: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fly: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swim: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burrow: Option<u32>,
}

impl Movement {
    pub fn walking(ground: u32) -> Self {
        Self {
            ground,
            ..Self::default()
        }
    }
}

/// A natural or weapon attack in neutral form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreAttack {
    pub name: String,
    /// Damage expression as printed in the source, e.g. `"1d8"` or `"2d4+2"`.
    pub damage: String,
}

impl CoreAttack {
    pub fn new(name: impl Into<String>, damage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage: damage.into(),
        }
    }
}

/// Edition-neutral combat statistics for a creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreMechanics {
    pub hit_dice: u32,
    pub hit_die_size: u8,
    /// Ascending armor class.
    pub armor_class: i32,
    pub hp_average: u32,
    pub attack_bonus: i32,
    pub attacks: Vec<CoreAttack>,
    pub movement: Movement,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_defenses: Vec<String>,
}

/// How quickly a class's attack ability improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackProgression {
    Good,
    Average,
    Poor,
}

/// Spellcasting strength of a class, in 5e slot-table terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpellcastingTier {
    Full,
    Half,
    Third,
    Pact,
    #[default]
    None,
}

impl SpellcastingTier {
    pub fn is_caster(&self) -> bool {
        *self != SpellcastingTier::None
    }
}

/// A class feature gained at a given level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFeature {
    pub level: u8,
    pub name: String,
    pub description: String,
}

impl ClassFeature {
    pub fn new(level: u8, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Normalized view of a class's progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreClassProgression {
    pub hit_die: u8,
    pub attack_progression: AttackProgression,
    pub saving_throws: Vec<Ability>,
    #[serde(default)]
    pub spellcasting: SpellcastingTier,
    #[serde(default)]
    pub armor_proficiencies: Vec<String>,
    #[serde(default)]
    pub weapon_proficiencies: Vec<String>,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
}

impl CoreClassProgression {
    /// Features unlocked at or below `level`.
    pub fn features_through(&self, level: u8) -> impl Iterator<Item = &ClassFeature> {
        self.features.iter().filter(move |f| f.level <= level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier() {
        assert_eq!(Ability::modifier(10), 0);
        assert_eq!(Ability::modifier(11), 0);
        assert_eq!(Ability::modifier(8), -1);
        assert_eq!(Ability::modifier(9), -1);
        assert_eq!(Ability::modifier(18), 4);
        assert_eq!(Ability::modifier(3), -4);
    }

    #[test]
    fn test_features_through() {
        let progression = CoreClassProgression {
            hit_die: 10,
            attack_progression: AttackProgression::Good,
            saving_throws: vec![Ability::Strength, Ability::Constitution],
            spellcasting: SpellcastingTier::None,
            armor_proficiencies: vec![],
            weapon_proficiencies: vec![],
            features: vec![
                ClassFeature::new(1, "Second Wind", "Regain hit points."),
                ClassFeature::new(2, "Action Surge", "Take an extra action."),
            ],
        };
        assert_eq!(progression.features_through(1).count(), 1);
        assert_eq!(progression.features_through(5).count(), 2);
    }

    #[test]
    fn test_movement_serializes_without_empty_modes() {
        let json = serde_json::to_value(Movement::walking(30)).unwrap();
        assert_eq!(json["ground"], 30);
        assert!(json.get("fly").is_none());
    }
}
