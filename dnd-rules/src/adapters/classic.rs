//! Inbound adapters for the descending-AC editions: OD&D, Holmes Basic,
//! BECMI, B/X, AD&D 1e and AD&D 2e.

use super::{ascending_ac, estimate_hp, segments_to_feet, thac0_to_attack_bonus, tier_from_first_spell_level};
use crate::class_data::{ClassicClass, SaveGroup};
use crate::mechanics::{Ability, AttackProgression, CoreClassProgression, CoreMechanics, Movement};
use crate::monster::{BasicRule, ClassicMechanics, ClassicMovement, FirstRule, OdndRule, SecondRule};

/// Every classic edition except OD&D rolls d8 for monster hit dice.
const CLASSIC_HIT_DIE: u8 = 8;
const ODND_DEFAULT_HIT_DIE: u8 = 6;

fn movement(classic: &ClassicMovement) -> Movement {
    Movement {
        ground: segments_to_feet(classic.ground),
        fly: classic.fly.map(segments_to_feet),
        swim: classic.swim.map(segments_to_feet),
        burrow: None,
    }
}

fn classic_to_core(m: &ClassicMechanics) -> CoreMechanics {
    CoreMechanics {
        hit_dice: m.hit_dice,
        hit_die_size: CLASSIC_HIT_DIE,
        armor_class: ascending_ac(m.armor_class),
        hp_average: estimate_hp(m.hit_dice, CLASSIC_HIT_DIE, m.hit_die_modifier),
        attack_bonus: thac0_to_attack_bonus(m.thac0),
        attacks: m.attacks.clone(),
        movement: movement(&m.movement),
        special_defenses: m.special_defenses.clone(),
    }
}

pub fn first_to_core(rule: &FirstRule) -> CoreMechanics {
    classic_to_core(&rule.mechanics)
}

pub fn second_to_core(rule: &SecondRule) -> CoreMechanics {
    classic_to_core(&rule.mechanics)
}

/// Holmes Basic, BECMI and B/X share one stat block layout.
pub fn basic_to_core(rule: &BasicRule) -> CoreMechanics {
    classic_to_core(&rule.mechanics)
}

pub fn odnd_to_core(rule: &OdndRule) -> CoreMechanics {
    let m = &rule.mechanics;
    let hit_die_size = m.hit_die_size.unwrap_or(ODND_DEFAULT_HIT_DIE);
    CoreMechanics {
        hit_dice: m.hit_dice,
        hit_die_size,
        armor_class: ascending_ac(m.armor_class),
        hp_average: estimate_hp(m.hit_dice, hit_die_size, m.hit_die_modifier),
        attack_bonus: thac0_to_attack_bonus(m.thac0),
        attacks: m.attacks.clone(),
        movement: movement(&m.movement),
        special_defenses: Vec::new(),
    }
}

/// Normalize a pre-3e class.
///
/// THAC0 improving a point or more per level is a good progression, half a
/// point or more is average, anything slower is poor. The save group picks
/// the two abilities the normalized class is strongest at resisting with.
pub fn classic_class_to_core(class: &ClassicClass) -> CoreClassProgression {
    let attack_progression = class.attack_progression.unwrap_or_else(|| {
        let advancement = class.thac0_advancement;
        let rate = advancement.points as f64 / advancement.every_levels.max(1) as f64;
        if rate >= 1.0 {
            AttackProgression::Good
        } else if rate >= 0.5 {
            AttackProgression::Average
        } else {
            AttackProgression::Poor
        }
    });

    let saving_throws = match class.save_group {
        SaveGroup::Warrior => vec![Ability::Strength, Ability::Constitution],
        SaveGroup::Priest => vec![Ability::Wisdom, Ability::Charisma],
        SaveGroup::Rogue => vec![Ability::Dexterity, Ability::Intelligence],
        SaveGroup::Wizard => vec![Ability::Intelligence, Ability::Wisdom],
    };

    CoreClassProgression {
        hit_die: class.hit_die,
        attack_progression,
        saving_throws,
        spellcasting: tier_from_first_spell_level(class.first_spell_level),
        armor_proficiencies: Vec::new(),
        weapon_proficiencies: Vec::new(),
        features: class.features.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_data::Thac0Advancement;
    use crate::mechanics::{CoreAttack, SpellcastingTier};
    use crate::monster::{OdndLore, OdndMechanics, Rule, SecondLore};

    fn gnoll_like() -> SecondRule {
        Rule::new(
            ClassicMechanics {
                hit_dice: 4,
                hit_die_modifier: 0,
                armor_class: 5,
                thac0: 17,
                movement: ClassicMovement {
                    ground: 120,
                    fly: Some(180),
                    swim: None,
                },
                attacks: vec![CoreAttack::new("Bite", "1d8")],
                special_defenses: vec!["Immune to sleep".to_string()],
            },
            SecondLore::default(),
        )
    }

    #[test]
    fn test_second_edition_conversion() {
        let core = second_to_core(&gnoll_like());
        assert_eq!(core.armor_class, 14);
        assert_eq!(core.attack_bonus, 3);
        assert_eq!(core.hp_average, 18);
        assert_eq!(core.hit_die_size, 8);
        assert_eq!(core.movement.ground, 40);
        assert_eq!(core.movement.fly, Some(60));
        assert_eq!(core.movement.swim, None);
        assert_eq!(core.special_defenses, vec!["Immune to sleep".to_string()]);
    }

    #[test]
    fn test_odnd_uses_its_own_hit_die() {
        let mut rule = Rule::new(
            OdndMechanics {
                hit_dice: 3,
                hit_die_modifier: 0,
                hit_die_size: None,
                armor_class: 7,
                thac0: 17,
                movement: ClassicMovement {
                    ground: 90,
                    ..ClassicMovement::default()
                },
                attacks: vec![],
            },
            OdndLore::default(),
        );
        let core = odnd_to_core(&rule);
        assert_eq!(core.hit_die_size, 6);
        assert_eq!(core.hp_average, 11);

        rule.mechanics.hit_die_size = Some(8);
        let core = odnd_to_core(&rule);
        assert_eq!(core.hit_die_size, 8);
        assert_eq!(core.hp_average, 14);
        assert_eq!(core.armor_class, 12);
    }

    #[test]
    fn test_classic_class_progressions() {
        let mage = ClassicClass {
            hit_die: 4,
            thac0_advancement: Thac0Advancement {
                points: 1,
                every_levels: 3,
            },
            attack_progression: None,
            save_group: SaveGroup::Wizard,
            first_spell_level: Some(1),
            features: vec![],
        };
        let core = classic_class_to_core(&mage);
        assert_eq!(core.attack_progression, AttackProgression::Poor);
        assert_eq!(core.saving_throws, vec![Ability::Intelligence, Ability::Wisdom]);
        assert_eq!(core.spellcasting, SpellcastingTier::Full);

        let thief = ClassicClass {
            thac0_advancement: Thac0Advancement {
                points: 1,
                every_levels: 2,
            },
            save_group: SaveGroup::Rogue,
            first_spell_level: None,
            ..mage.clone()
        };
        let core = classic_class_to_core(&thief);
        assert_eq!(core.attack_progression, AttackProgression::Average);
        assert_eq!(core.spellcasting, SpellcastingTier::None);

        let overridden = ClassicClass {
            attack_progression: Some(AttackProgression::Good),
            ..thief
        };
        assert_eq!(
            classic_class_to_core(&overridden).attack_progression,
            AttackProgression::Good
        );
    }
}
