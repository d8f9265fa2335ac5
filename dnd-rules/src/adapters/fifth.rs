//! Outbound adapter: core mechanics to a 5e stat block.
//!
//! 5e is the display hub, so this is the only outbound conversion. The
//! challenge rating is a display aid derived from average hit points alone;
//! it is not a balanced CR calculation.

use crate::mechanics::CoreMechanics;
use crate::monster::{ChallengeRating, EditionRule, FifthAttack, FifthLore, FifthMechanics, FifthRule, Rule};

/// Upper hit-point bound for each estimated challenge rating, lowest first.
const CR_THRESHOLDS: [(u32, ChallengeRating); 12] = [
    (6, ChallengeRating::Zero),
    (35, ChallengeRating::Quarter),
    (49, ChallengeRating::Half),
    (70, ChallengeRating::Whole(1)),
    (85, ChallengeRating::Whole(2)),
    (100, ChallengeRating::Whole(3)),
    (115, ChallengeRating::Whole(4)),
    (130, ChallengeRating::Whole(5)),
    (145, ChallengeRating::Whole(6)),
    (160, ChallengeRating::Whole(7)),
    (175, ChallengeRating::Whole(8)),
    (190, ChallengeRating::Whole(9)),
];

/// Approximate CR from average hit points. Monotonic in `hp_average`.
pub fn estimate_challenge_rating(hp_average: u32) -> ChallengeRating {
    CR_THRESHOLDS
        .iter()
        .find(|(max_hp, _)| hp_average <= *max_hp)
        .map(|(_, cr)| *cr)
        .unwrap_or(ChallengeRating::Whole(10))
}

/// `ceil(hit_dice / 4) + 1`.
pub fn proficiency_bonus(hit_dice: u32) -> u32 {
    hit_dice.div_ceil(4) + 1
}

/// XP award carried into 5e.
///
/// 1e awards a base amount plus a per-hit-point amount; every other source
/// passes its printed award through. The 1e total saturates at `u32::MAX`.
pub fn xp_value(core: &CoreMechanics, source: &EditionRule) -> u32 {
    match source {
        EditionRule::First(rule) => match rule.lore.xp_per_hp {
            Some(per_hp) => per_hp
                .saturating_mul(core.hp_average)
                .saturating_add(rule.lore.base_xp),
            None => rule.lore.base_xp,
        },
        EditionRule::Odnd(rule) => rule.lore.xp_value.unwrap_or(0),
        EditionRule::Basic(rule) | EditionRule::Becmi(rule) | EditionRule::Bx(rule) => {
            rule.lore.xp_value.unwrap_or(0)
        }
        EditionRule::Second(rule) => rule.lore.xp_value.unwrap_or(0),
        EditionRule::Third(rule) | EditionRule::ThreeFive(rule) => rule.lore.xp_value.unwrap_or(0),
        EditionRule::Fourth(rule) => rule.lore.xp_value.unwrap_or(0),
        EditionRule::Fifth(rule) => rule.lore.xp_value,
    }
}

pub fn core_to_fifth(core: &CoreMechanics, source: &EditionRule) -> FifthRule {
    let mechanics = FifthMechanics {
        armor_class: core.armor_class,
        hit_points: core.hp_average,
        hit_dice: format!("{}d{}", core.hit_dice, core.hit_die_size),
        speed: core.movement,
        proficiency_bonus: proficiency_bonus(core.hit_dice),
        attacks: core
            .attacks
            .iter()
            .map(|a| FifthAttack {
                name: a.name.clone(),
                to_hit: core.attack_bonus,
                damage: a.damage.clone(),
            })
            .collect(),
        special_defenses: core.special_defenses.clone(),
    };
    let lore = FifthLore {
        challenge_rating: estimate_challenge_rating(core.hp_average),
        xp_value: xp_value(core, source),
    };

    Rule {
        mechanics,
        lore,
        source: source.source().cloned(),
    }
}
