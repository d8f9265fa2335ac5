//! Inbound adapter for 4e.
//!
//! 4e prints flat hit points and no dice, so the hit-dice count is
//! back-derived purely so that 4e creatures line up with other editions on
//! screen. The attack bonus is likewise estimated from level.

use crate::class_data::{FourthClass, FourthRole, PowerSource};
use crate::mechanics::{Ability, AttackProgression, CoreAttack, CoreClassProgression, CoreMechanics, Movement, SpellcastingTier};
use crate::monster::FourthRule;

const FOURTH_HIT_DIE: u8 = 8;
const FEET_PER_SQUARE: u32 = 5;

/// `max(1, round(hit_points / 4.5))`.
pub fn estimate_hit_dice(hit_points: u32) -> u32 {
    ((hit_points as f64 / 4.5).round() as u32).max(1)
}

/// `floor(level / 2) + 3`.
pub fn estimate_attack_bonus(level: u32) -> i32 {
    (level / 2) as i32 + 3
}

pub fn fourth_to_core(rule: &FourthRule) -> CoreMechanics {
    let m = &rule.mechanics;
    CoreMechanics {
        hit_dice: estimate_hit_dice(m.hit_points),
        hit_die_size: FOURTH_HIT_DIE,
        armor_class: m.armor_class,
        hp_average: m.hit_points,
        attack_bonus: estimate_attack_bonus(m.level),
        attacks: m
            .powers
            .iter()
            .filter_map(|p| p.damage.as_ref().map(|d| CoreAttack::new(p.name.clone(), d.clone())))
            .collect(),
        movement: Movement {
            ground: m.speed * FEET_PER_SQUARE,
            fly: m.fly_speed.map(|s| s * FEET_PER_SQUARE),
            swim: None,
            burrow: None,
        },
        special_defenses: Vec::new(),
    }
}

/// Normalize a 4e class.
pub fn fourth_class_to_core(class: &FourthClass) -> CoreClassProgression {
    let attack_progression = match class.role {
        FourthRole::Defender | FourthRole::Striker => AttackProgression::Good,
        FourthRole::Leader => AttackProgression::Average,
        FourthRole::Controller => AttackProgression::Poor,
    };
    let hit_die = match class.hit_points_per_level {
        0..=4 => 6,
        5 => 8,
        6 => 10,
        _ => 12,
    };
    let spellcasting = match class.power_source {
        PowerSource::Arcane | PowerSource::Divine | PowerSource::Primal => SpellcastingTier::Full,
        PowerSource::Martial | PowerSource::Psionic | PowerSource::Shadow => SpellcastingTier::None,
    };

    let bonuses = class.defense_bonuses;
    let saving_throws = [
        (bonuses.fortitude, Ability::Constitution),
        (bonuses.reflex, Ability::Dexterity),
        (bonuses.will, Ability::Wisdom),
    ]
    .into_iter()
    .filter(|(bonus, _)| *bonus > 0)
    .map(|(_, ability)| ability)
    .collect();

    CoreClassProgression {
        hit_die,
        attack_progression,
        saving_throws,
        spellcasting,
        armor_proficiencies: Vec::new(),
        weapon_proficiencies: Vec::new(),
        features: class.features.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_data::DefenseBonuses;
    use crate::monster::{FourthLore, FourthMechanics, FourthPower, Rule};

    fn brute(level: u32, hit_points: u32) -> FourthRule {
        Rule::new(
            FourthMechanics {
                level,
                role: "Brute".to_string(),
                hit_points,
                armor_class: 17,
                fortitude: 16,
                reflex: 14,
                will: 13,
                speed: 6,
                fly_speed: None,
                powers: vec![
                    FourthPower {
                        name: "Slam".to_string(),
                        attack_bonus: Some(8),
                        damage: Some("2d6+4".to_string()),
                    },
                    FourthPower {
                        name: "Roar".to_string(),
                        attack_bonus: None,
                        damage: None,
                    },
                ],
            },
            FourthLore::default(),
        )
    }

    #[test]
    fn test_fourth_conversion() {
        let core = fourth_to_core(&brute(5, 77));
        assert_eq!(core.hit_dice, 17);
        assert_eq!(core.hp_average, 77);
        assert_eq!(core.attack_bonus, 5);
        assert_eq!(core.armor_class, 17);
        assert_eq!(core.movement.ground, 30);
        assert_eq!(core.attacks.len(), 1);
    }

    #[test]
    fn test_minion_still_has_one_hit_die() {
        let core = fourth_to_core(&brute(1, 1));
        assert_eq!(core.hit_dice, 1);
        assert_eq!(core.attack_bonus, 3);
    }

    #[test]
    fn test_fourth_class_normalization() {
        let wizard = FourthClass {
            role: FourthRole::Controller,
            power_source: PowerSource::Arcane,
            hit_points_per_level: 4,
            defense_bonuses: DefenseBonuses {
                will: 2,
                ..DefenseBonuses::default()
            },
            features: vec![],
        };
        let core = fourth_class_to_core(&wizard);
        assert_eq!(core.hit_die, 6);
        assert_eq!(core.attack_progression, AttackProgression::Poor);
        assert_eq!(core.saving_throws, vec![Ability::Wisdom]);
        assert_eq!(core.spellcasting, SpellcastingTier::Full);
    }
}
