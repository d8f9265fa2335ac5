//! Experience-to-level lookups.
//!
//! 3e and later use one table for every class; earlier editions give each
//! class its own. Both directions try the class table first, then the
//! universal table, then give up with a sentinel.

use crate::catalog::Catalog;
use crate::edition::{Edition, EditionMetadata, XpEntry};

/// Historical class names and the canonical ids the tables are keyed by.
const CLASS_ALIASES: &[(&str, &str)] = &[
    ("fighting-man", "fighter"),
    ("magic-user", "wizard"),
    ("mage", "wizard"),
];

/// Map a historical class id to its canonical id. Unknown ids pass through.
pub fn resolve_class_id(class_id: &str) -> &str {
    CLASS_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(class_id))
        .map(|(_, canonical)| *canonical)
        .unwrap_or(class_id)
}

/// The table that applies to `class_id` in this edition.
fn table_for<'a>(meta: &'a EditionMetadata, class_id: Option<&str>) -> Option<&'a [XpEntry]> {
    let class_table = class_id
        .map(resolve_class_id)
        .and_then(|id| meta.class_experience.get(id))
        .filter(|table| !table.is_empty());
    if let Some(table) = class_table {
        return Some(table.as_slice());
    }
    if !meta.experience.is_empty() {
        tracing::trace!(edition = %meta.id, ?class_id, "using universal experience table");
        return Some(meta.experience.as_slice());
    }
    None
}

/// Highest level reachable with `table`: the edition cap or the table's end.
fn max_level(meta: &EditionMetadata, table: &[XpEntry]) -> u8 {
    let table_max = table.iter().map(|e| e.level).max().unwrap_or(1);
    meta.max_level.min(table_max).max(1)
}

fn threshold(table: &[XpEntry], level: u8) -> u32 {
    table
        .iter()
        .find(|e| e.level == level)
        .map(|e| e.xp)
        .unwrap_or(0)
}

/// Experience needed to reach `level`. Returns 0 when no table applies.
pub fn xp_for_level(catalog: &Catalog, level: u8, edition: Edition, class_id: Option<&str>) -> u32 {
    let Some(meta) = catalog.edition(edition) else {
        return 0;
    };
    let Some(table) = table_for(meta, class_id) else {
        return 0;
    };
    let level = level.clamp(1, max_level(meta, table));
    threshold(table, level)
}

/// Level reached with `xp` experience.
///
/// Returns 1 for any `xp` when neither a class table nor the edition's
/// universal table applies; `Catalog::validate` reports such classes.
pub fn level_for_xp(catalog: &Catalog, xp: u32, edition: Edition, class_id: Option<&str>) -> u8 {
    let Some(meta) = catalog.edition(edition) else {
        return 1;
    };
    let Some(table) = table_for(meta, class_id) else {
        return 1;
    };
    (1..=max_level(meta, table))
        .rev()
        .find(|&level| threshold(table, level) <= xp)
        .unwrap_or(1)
}

/// Experience still needed for the next level, or `None` at the cap.
pub fn xp_to_next_level(catalog: &Catalog, xp: u32, edition: Edition, class_id: Option<&str>) -> Option<u32> {
    let meta = catalog.edition(edition)?;
    let table = table_for(meta, class_id)?;
    let current = level_for_xp(catalog, xp, edition, class_id);
    if current >= max_level(meta, table) {
        return None;
    }
    Some(threshold(table, current + 1).saturating_sub(xp))
}
