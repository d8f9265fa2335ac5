//! Picking the stat block to show for a monster in a campaign's edition.
//!
//! A native rule always wins. Otherwise the monster's other rules are tried
//! in stored order and the first one that converts is used. Conversion only
//! runs into 5e; there is no path out of 5e or between two other editions.

use crate::adapters::{core_to_fifth, rule_to_core};
use crate::edition::Edition;
use crate::monster::{EditionRule, Monster};
use serde::{Deserialize, Serialize};

/// A rule chosen for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRule {
    pub rule: EditionRule,
    pub converted: bool,
    /// Edition the rule was converted from, when `converted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_edition: Option<Edition>,
}

/// Convert `rule` into `target`, if a conversion path exists.
pub fn convert_edition_rule(monster: &Monster, rule: &EditionRule, target: Edition) -> Option<EditionRule> {
    if target != Edition::Fifth {
        tracing::trace!(
            monster = %monster.id,
            from = %rule.edition(),
            to = %target,
            "no conversion path"
        );
        return None;
    }
    let core = rule_to_core(rule)?;
    tracing::debug!(monster = %monster.id, from = %rule.edition(), "converted rule to 5e");
    Some(EditionRule::Fifth(core_to_fifth(&core, rule)))
}

/// Find or derive `monster`'s rule for `target`.
pub fn resolve_edition_rule(monster: &Monster, target: Edition) -> Option<ResolvedRule> {
    if let Some(rule) = monster.rule_for(target) {
        return Some(ResolvedRule {
            rule: rule.clone(),
            converted: false,
            source_edition: None,
        });
    }

    monster
        .edition_rules
        .iter()
        .filter(|rule| rule.edition() != target)
        .find_map(|rule| {
            convert_edition_rule(monster, rule, target).map(|converted| ResolvedRule {
                rule: converted,
                converted: true,
                source_edition: Some(rule.edition()),
            })
        })
}

/// Resolve every monster, keeping only those with a usable rule.
pub fn resolve_all<'a>(
    monsters: impl IntoIterator<Item = &'a Monster>,
    target: Edition,
) -> Vec<(&'a Monster, ResolvedRule)> {
    monsters
        .into_iter()
        .filter_map(|monster| resolve_edition_rule(monster, target).map(|resolved| (monster, resolved)))
        .collect()
}
