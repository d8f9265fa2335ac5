//! Inbound adapter for 3e and 3.5e. AC and base attack bonus are already
//! on the core scale and pass straight through.

use super::{estimate_hp, tier_from_first_spell_level};
use crate::class_data::{BabProgression, D20Class, D20Save};
use crate::mechanics::{Ability, AttackProgression, CoreAttack, CoreClassProgression, CoreMechanics};
use crate::monster::D20Rule;

pub fn d20_to_core(rule: &D20Rule) -> CoreMechanics {
    let m = &rule.mechanics;
    CoreMechanics {
        hit_dice: m.hit_dice,
        hit_die_size: m.hit_die_size,
        armor_class: m.armor_class,
        hp_average: estimate_hp(m.hit_dice, m.hit_die_size, 0),
        attack_bonus: m.base_attack_bonus,
        attacks: m
            .attacks
            .iter()
            .map(|a| CoreAttack::new(a.name.clone(), a.damage.clone()))
            .collect(),
        movement: m.speed,
        special_defenses: m.special_qualities.clone(),
    }
}

pub fn d20_class_to_core(class: &D20Class) -> CoreClassProgression {
    let attack_progression = match class.base_attack {
        BabProgression::Full => AttackProgression::Good,
        BabProgression::ThreeQuarter => AttackProgression::Average,
        BabProgression::Half => AttackProgression::Poor,
    };
    let saving_throws = class
        .good_saves
        .iter()
        .map(|save| match save {
            D20Save::Fortitude => Ability::Constitution,
            D20Save::Reflex => Ability::Dexterity,
            D20Save::Will => Ability::Wisdom,
        })
        .collect();

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
