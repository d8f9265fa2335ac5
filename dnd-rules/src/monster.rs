//! Monster reference entities and their per-edition rule blocks.
//!
//! A [`Monster`] owns one [`EditionRule`] per edition it has stat data for.
//! Each rule keeps the mechanics and lore exactly as that edition prints
//! them; nothing in here is normalized. See [`crate::adapters`] for the
//! conversions into [`crate::mechanics::CoreMechanics`].

use crate::edition::Edition;
use crate::mechanics::{CoreAttack, Movement};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a stat block was published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub book: String,
    #[serde(default)]
    pub page: Option<u32>,
}

impl SourceCitation {
    pub fn new(book: impl Into<String>, page: u32) -> Self {
        Self {
            book: book.into(),
            page: Some(page),
        }
    }
}

/// An edition-specific rule block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule<M, L> {
    pub mechanics: M,
    pub lore: L,
    #[serde(default)]
    pub source: Option<SourceCitation>,
}

impl<M, L> Rule<M, L> {
    pub fn new(mechanics: M, lore: L) -> Self {
        Self {
            mechanics,
            lore,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SourceCitation) -> Self {
        self.source = Some(source);
        self
    }
}

// ============================================================================
// Classic editions (OD&D, Basic, BECMI, B/X, 1e, 2e)
// ============================================================================

/// Movement in tabletop inches/segments as printed in pre-3e books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassicMovement {
    pub ground: u32,
    #[serde(default)]
    pub fly: Option<u32>,
    #[serde(default)]
    pub swim: Option<u32>,
}

/// Combat statistics shared by the AD&D and Basic-line stat blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicMechanics {
    pub hit_dice: u32,
    /// The `+1` in `HD 4+1`.
    #[serde(default)]
    pub hit_die_modifier: i32,
    /// Descending armor class.
    pub armor_class: i32,
    pub thac0: i32,
    pub movement: ClassicMovement,
    #[serde(default)]
    pub attacks: Vec<CoreAttack>,
    #[serde(default)]
    pub special_defenses: Vec<String>,
}

/// OD&D stat blocks, where the hit die size depends on the supplement in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OdndMechanics {
    pub hit_dice: u32,
    #[serde(default)]
    pub hit_die_modifier: i32,
    /// d6 in the original booklets, d8 once Greyhawk is in play.
    #[serde(default)]
    pub hit_die_size: Option<u8>,
    pub armor_class: i32,
    pub thac0: i32,
    pub movement: ClassicMovement,
    #[serde(default)]
    pub attacks: Vec<CoreAttack>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OdndLore {
    #[serde(default)]
    pub xp_value: Option<u32>,
    #[serde(default)]
    pub number_appearing: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
}

/// Lore for Holmes Basic, BECMI and B/X.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BasicLore {
    #[serde(default)]
    pub xp_value: Option<u32>,
    #[serde(default)]
    pub treasure_type: Option<String>,
    #[serde(default)]
    pub morale: Option<u8>,
    #[serde(default)]
    pub alignment: Option<String>,
}

/// AD&D 1e lore. XP is a base award plus a per-hit-point award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FirstLore {
    pub base_xp: u32,
    #[serde(default)]
    pub xp_per_hp: Option<u32>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub intelligence: Option<String>,
    #[serde(default)]
    pub treasure_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SecondLore {
    #[serde(default)]
    pub xp_value: Option<u32>,
    #[serde(default)]
    pub climate_terrain: Option<String>,
    #[serde(default)]
    pub intelligence: Option<String>,
    #[serde(default)]
    pub morale: Option<String>,
}

// ============================================================================
// d20 (3e, 3.5e)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct D20Attack {
    pub name: String,
    pub bonus: i32,
    pub damage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct D20Mechanics {
    pub hit_dice: u32,
    pub hit_die_size: u8,
    pub armor_class: i32,
    pub base_attack_bonus: i32,
    /// Already in feet.
    pub speed: Movement,
    #[serde(default)]
    pub attacks: Vec<D20Attack>,
    #[serde(default)]
    pub special_qualities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct D20Lore {
    /// Printed challenge rating, e.g. `"1/3"` or `"7"`.
    #[serde(default)]
    pub challenge_rating: Option<String>,
    #[serde(default)]
    pub xp_value: Option<u32>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

// ============================================================================
// 4e
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourthPower {
    pub name: String,
    #[serde(default)]
    pub attack_bonus: Option<i32>,
    #[serde(default)]
    pub damage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourthMechanics {
    pub level: u32,
    pub role: String,
    pub hit_points: u32,
    pub armor_class: i32,
    pub fortitude: i32,
    pub reflex: i32,
    pub will: i32,
    /// Speed in squares.
    pub speed: u32,
    #[serde(default)]
    pub fly_speed: Option<u32>,
    #[serde(default)]
    pub powers: Vec<FourthPower>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FourthLore {
    #[serde(default)]
    pub xp_value: Option<u32>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

// ============================================================================
// 5e
// ============================================================================

/// 5e challenge rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ChallengeRating {
    Zero,
    Eighth,
    Quarter,
    Half,
    Whole(u8),
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeRating::Zero => write!(f, "0"),
            ChallengeRating::Eighth => write!(f, "1/8"),
            ChallengeRating::Quarter => write!(f, "1/4"),
            ChallengeRating::Half => write!(f, "1/2"),
            ChallengeRating::Whole(n) => write!(f, "{n}"),
        }
    }
}

impl From<ChallengeRating> for String {
    fn from(cr: ChallengeRating) -> Self {
        cr.to_string()
    }
}

impl TryFrom<String> for ChallengeRating {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "0" => Ok(ChallengeRating::Zero),
            "1/8" => Ok(ChallengeRating::Eighth),
            "1/4" => Ok(ChallengeRating::Quarter),
            "1/2" => Ok(ChallengeRating::Half),
            other => other
                .parse::<u8>()
                .map(ChallengeRating::Whole)
                .map_err(|_| format!("Invalid challenge rating: {value}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FifthAttack {
    pub name: String,
    pub to_hit: i32,
    pub damage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FifthMechanics {
    pub armor_class: i32,
    pub hit_points: u32,
    /// Dice expression, e.g. `"4d8"`.
    pub hit_dice: String,
    pub speed: Movement,
    pub proficiency_bonus: u32,
    #[serde(default)]
    pub attacks: Vec<FifthAttack>,
    #[serde(default)]
    pub special_defenses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FifthLore {
    pub challenge_rating: ChallengeRating,
    pub xp_value: u32,
}

pub type OdndRule = Rule<OdndMechanics, OdndLore>;
pub type BasicRule = Rule<ClassicMechanics, BasicLore>;
pub type FirstRule = Rule<ClassicMechanics, FirstLore>;
pub type SecondRule = Rule<ClassicMechanics, SecondLore>;
pub type D20Rule = Rule<D20Mechanics, D20Lore>;
pub type FourthRule = Rule<FourthMechanics, FourthLore>;
pub type FifthRule = Rule<FifthMechanics, FifthLore>;

/// A monster's stat block for one edition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edition")]
pub enum EditionRule {
    #[serde(rename = "odnd")]
    Odnd(OdndRule),
    #[serde(rename = "basic")]
    Basic(BasicRule),
    #[serde(rename = "becmi")]
    Becmi(BasicRule),
    #[serde(rename = "bx")]
    Bx(BasicRule),
    #[serde(rename = "1e")]
    First(FirstRule),
    #[serde(rename = "2e")]
    Second(SecondRule),
    #[serde(rename = "3e")]
    Third(D20Rule),
    #[serde(rename = "3.5e")]
    ThreeFive(D20Rule),
    #[serde(rename = "4e")]
    Fourth(FourthRule),
    #[serde(rename = "5e")]
    Fifth(FifthRule),
}

impl EditionRule {
    pub fn edition(&self) -> Edition {
        match self {
            EditionRule::Odnd(_) => Edition::Odnd,
            EditionRule::Basic(_) => Edition::Basic,
            EditionRule::Becmi(_) => Edition::Becmi,
            EditionRule::Bx(_) => Edition::Bx,
            EditionRule::First(_) => Edition::First,
            EditionRule::Second(_) => Edition::Second,
            EditionRule::Third(_) => Edition::Third,
            EditionRule::ThreeFive(_) => Edition::ThreeFive,
            EditionRule::Fourth(_) => Edition::Fourth,
            EditionRule::Fifth(_) => Edition::Fifth,
        }
    }

    pub fn source(&self) -> Option<&SourceCitation> {
        match self {
            EditionRule::Odnd(r) => r.source.as_ref(),
            EditionRule::Basic(r) | EditionRule::Becmi(r) | EditionRule::Bx(r) => r.source.as_ref(),
            EditionRule::First(r) => r.source.as_ref(),
            EditionRule::Second(r) => r.source.as_ref(),
            EditionRule::Third(r) | EditionRule::ThreeFive(r) => r.source.as_ref(),
            EditionRule::Fourth(r) => r.source.as_ref(),
            EditionRule::Fifth(r) => r.source.as_ref(),
        }
    }
}

/// An immutable reference monster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub edition_rules: Vec<EditionRule>,
}

impl Monster {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            edition_rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: EditionRule) -> Self {
        self.edition_rules.push(rule);
        self
    }

    /// The native rule block for `edition`, if this monster has one.
    pub fn rule_for(&self, edition: Edition) -> Option<&EditionRule> {
        self.edition_rules.iter().find(|r| r.edition() == edition)
    }

    pub fn editions(&self) -> impl Iterator<Item = Edition> + '_ {
        self.edition_rules.iter().map(EditionRule::edition)
    }
}

// ============================================================================
// Built-in bestiary
// ============================================================================

fn classic(hit_dice: u32, armor_class: i32, thac0: i32, movement: u32) -> ClassicMechanics {
    ClassicMechanics {
        hit_dice,
        hit_die_modifier: 0,
        armor_class,
        thac0,
        movement: ClassicMovement {
            ground: movement,
            ..ClassicMovement::default()
        },
        attacks: Vec::new(),
        special_defenses: Vec::new(),
    }
}

lazy_static::lazy_static! {
    /// A small bestiary covering every edition adapter.
    pub static ref MONSTERS: Vec<Monster> = vec![
        Monster::new("goblin", "Goblin")
            .with_rule(EditionRule::First(
                Rule::new(
                    ClassicMechanics {
                        attacks: vec![CoreAttack::new("Weapon", "1d6")],
                        ..classic(1, 6, 19, 60)
                    },
                    FirstLore {
                        base_xp: 10,
                        xp_per_hp: Some(1),
                        frequency: Some("Uncommon".to_string()),
                        intelligence: Some("Average (low)".to_string()),
                        treasure_type: Some("K, C".to_string()),
                    },
                )
                .with_source(SourceCitation::new("Monster Manual", 47)),
            ))
            .with_rule(EditionRule::Fifth(
                Rule::new(
                    FifthMechanics {
                        armor_class: 15,
                        hit_points: 7,
                        hit_dice: "2d6".to_string(),
                        speed: Movement::walking(30),
                        proficiency_bonus: 2,
                        attacks: vec![FifthAttack {
                            name: "Scimitar".to_string(),
                            to_hit: 4,
                            damage: "1d6+2".to_string(),
                        }],
                        special_defenses: Vec::new(),
                    },
                    FifthLore {
                        challenge_rating: ChallengeRating::Quarter,
                        xp_value: 50,
                    },
                )
                .with_source(SourceCitation::new("Monster Manual", 166)),
            )),
        Monster::new("gnoll", "Gnoll").with_rule(EditionRule::Second(
            Rule::new(
                ClassicMechanics {
                    attacks: vec![CoreAttack::new("Weapon", "2d4")],
                    ..classic(2, 5, 19, 90)
                },
                SecondLore {
                    xp_value: Some(35),
                    climate_terrain: Some("Any non-arctic".to_string()),
                    intelligence: Some("Low (5-7)".to_string()),
                    morale: Some("Steady (11)".to_string()),
                },
            )
            .with_source(SourceCitation::new("Monstrous Manual", 143)),
        )),
        Monster::new("ogre", "Ogre")
            .with_rule(EditionRule::Bx(Rule::new(
                ClassicMechanics {
                    hit_die_modifier: 1,
                    attacks: vec![CoreAttack::new("Club", "1d10")],
                    ..classic(4, 5, 15, 90)
                },
                BasicLore {
                    xp_value: Some(125),
                    treasure_type: Some("C + 1000gp".to_string()),
                    morale: Some(10),
                    alignment: Some("Chaotic".to_string()),
                },
            )))
            .with_rule(EditionRule::ThreeFive(
                Rule::new(
                    D20Mechanics {
                        hit_dice: 4,
                        hit_die_size: 8,
                        armor_class: 16,
                        base_attack_bonus: 3,
                        speed: Movement::walking(30),
                        attacks: vec![D20Attack {
                            name: "Greatclub".to_string(),
                            bonus: 8,
                            damage: "2d8+7".to_string(),
                        }],
                        special_qualities: vec!["Darkvision 60 ft.".to_string()],
                    },
                    D20Lore {
                        challenge_rating: Some("3".to_string()),
                        xp_value: Some(800),
                        environment: Some("Temperate hills".to_string()),
                        organization: Some("Solitary, pair, gang (3-4)".to_string()),
                    },
                )
                .with_source(SourceCitation::new("Monster Manual", 199)),
            )),
        Monster::new("orc", "Orc").with_rule(EditionRule::Odnd(Rule::new(
            OdndMechanics {
                hit_dice: 1,
                hit_die_modifier: 0,
                hit_die_size: Some(6),
                armor_class: 6,
                thac0: 19,
                movement: ClassicMovement {
                    ground: 90,
                    ..ClassicMovement::default()
                },
                attacks: vec![CoreAttack::new("Weapon", "1d6")],
            },
            OdndLore {
                xp_value: Some(10),
                number_appearing: Some("30-300".to_string()),
                alignment: Some("Chaotic".to_string()),
            },
        ))),
        Monster::new("young-white-dragon", "Young White Dragon").with_rule(EditionRule::Fourth(
            Rule::new(
                FourthMechanics {
                    level: 3,
                    role: "Solo Brute".to_string(),
                    hit_points: 220,
                    armor_class: 18,
                    fortitude: 17,
                    reflex: 15,
                    will: 14,
                    speed: 6,
                    fly_speed: Some(6),
                    powers: vec![FourthPower {
                        name: "Bite".to_string(),
                        attack_bonus: Some(6),
                        damage: Some("1d8+4".to_string()),
                    }],
                },
                FourthLore {
                    xp_value: Some(750),
                    origin: Some("Natural".to_string()),
                    keywords: vec!["Dragon".to_string(), "Cold".to_string()],
                },
            )
            .with_source(SourceCitation::new("Monster Manual", 90)),
        )),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_for_edition() {
        let goblin = MONSTERS.iter().find(|m| m.id == "goblin").unwrap();
        assert!(goblin.rule_for(Edition::First).is_some());
        assert!(goblin.rule_for(Edition::Fifth).is_some());
        assert!(goblin.rule_for(Edition::Second).is_none());
    }

    #[test]
    fn test_edition_rule_is_tagged_by_edition_string() {
        let ogre = MONSTERS.iter().find(|m| m.id == "ogre").unwrap();
        let json = serde_json::to_value(&ogre.edition_rules[0]).unwrap();
        assert_eq!(json["edition"], "bx");
        assert_eq!(json["mechanics"]["armorClass"], 5);

        let back: EditionRule = serde_json::from_value(json).unwrap();
        assert_eq!(back.edition(), Edition::Bx);
    }

    #[test]
    fn test_challenge_rating_strings() {
        assert_eq!(ChallengeRating::Quarter.to_string(), "1/4");
        assert_eq!(
            ChallengeRating::try_from("7".to_string()).unwrap(),
            ChallengeRating::Whole(7)
        );
        assert!(ChallengeRating::try_from("lots".to_string()).is_err());
        assert!(ChallengeRating::Half < ChallengeRating::Whole(1));
    }

    #[test]
    fn test_every_built_in_monster_has_rules() {
        for monster in MONSTERS.iter() {
            assert!(!monster.edition_rules.is_empty(), "{} has no rules", monster.id);
        }
    }
}
