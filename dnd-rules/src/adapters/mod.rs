//! Edition adapters.
//!
//! Inbound adapters turn an edition's own stat block into
//! [`CoreMechanics`]; the single outbound adapter turns core mechanics into
//! a 5e stat block. All adapters are total: where the source is missing
//! information they fall back to the documented estimates below rather than
//! failing.

pub mod classic;
pub mod d20;
pub mod fifth;
pub mod fourth;

use crate::class_data::ClassProgression;
use crate::mechanics::{CoreClassProgression, CoreMechanics, SpellcastingTier};
use crate::monster::EditionRule;

pub use classic::{basic_to_core, first_to_core, odnd_to_core, second_to_core};
pub use d20::d20_to_core;
pub use fifth::{core_to_fifth, estimate_challenge_rating};
pub use fourth::fourth_to_core;

/// Convert descending armor class (AD&D, Basic) to the ascending scale.
pub fn ascending_ac(descending: i32) -> i32 {
    19 - descending
}

/// Inverse of [`ascending_ac`].
pub fn descending_ac(ascending: i32) -> i32 {
    19 - ascending
}

pub fn thac0_to_attack_bonus(thac0: i32) -> i32 {
    20 - thac0
}

/// Convert pre-3e movement to feet, snapped to 5-foot increments.
pub fn segments_to_feet(segments: u32) -> u32 {
    (segments as f64 / 3.0 / 5.0).round() as u32 * 5
}

/// Mean roll of a single die: 3.5 for a d6, 4.5 for a d8.
pub fn average_per_die(hit_die_size: u8) -> f64 {
    (hit_die_size as f64 + 1.0) / 2.0
}

/// Average hit points for `hit_dice` dice of `hit_die_size` plus a flat modifier:
/// `round(hit_dice * (hit_die_size + 1) / 2) + modifier`, floored at 1.
pub fn estimate_hp(hit_dice: u32, hit_die_size: u8, modifier: i32) -> u32 {
    let base = (hit_dice as f64 * average_per_die(hit_die_size)).round() as i64;
    (base + modifier as i64).max(1) as u32
}

/// Convert any non-5e rule to core mechanics. 5e has no inbound adapter.
pub fn rule_to_core(rule: &EditionRule) -> Option<CoreMechanics> {
    let core = match rule {
        EditionRule::Odnd(r) => odnd_to_core(r),
        EditionRule::Basic(r) | EditionRule::Becmi(r) | EditionRule::Bx(r) => basic_to_core(r),
        EditionRule::First(r) => first_to_core(r),
        EditionRule::Second(r) => second_to_core(r),
        EditionRule::Third(r) | EditionRule::ThreeFive(r) => d20_to_core(r),
        EditionRule::Fourth(r) => fourth_to_core(r),
        EditionRule::Fifth(_) => return None,
    };
    Some(core)
}

/// Normalize a class progression.
pub fn class_to_core(progression: &ClassProgression) -> CoreClassProgression {
    match progression {
        ClassProgression::Classic(class) => classic::classic_class_to_core(class),
        ClassProgression::D20(class) => d20::d20_class_to_core(class),
        ClassProgression::Fourth(class) => fourth::fourth_class_to_core(class),
        ClassProgression::Fifth(core) => core.clone(),
    }
}

/// Casting tier from the level a pre-5e class first gains spells.
///
/// Classes casting by 2nd level are primary casters; later starters
/// (paladins, rangers) follow the half-caster table.
pub(crate) fn tier_from_first_spell_level(first_spell_level: Option<u8>) -> SpellcastingTier {
    match first_spell_level {
        Some(level) if level <= 2 => SpellcastingTier::Full,
        Some(_) => SpellcastingTier::Half,
        None => SpellcastingTier::None,
    }
}
