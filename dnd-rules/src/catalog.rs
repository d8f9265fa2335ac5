//! Reference catalogs.
//!
//! A [`Catalog`] bundles every read-only table the engine consults: edition
//! metadata, classes, monsters, equipment, magic items and spells. The
//! built-in catalog is constructed once; callers with their own data load it
//! from JSON and overlay it on the built-ins with [`Catalog::extend`].

use crate::class_data::{ClassDefinition, CLASSES};
use crate::edition::{stepped_xp_table, xp_table, Edition, EditionMetadata, XpEntry};
use crate::items::{EquipmentItem, EQUIPMENT};
use crate::magic_items::{d20_budget, fifth_edition_budget, fourth_edition_budget, MagicItem, MAGIC_ITEMS};
use crate::monster::{Monster, MONSTERS};
use crate::spells::{Spell, SPELLS};
use crate::xp::resolve_class_id;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog has {} problem(s), first: {}", .0.len(), .0[0])]
    Invalid(Vec<CatalogIssue>),
}

/// A structural problem found by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("{edition} experience table for {table} does not increase at level {level}")]
    NonIncreasingXp {
        edition: Edition,
        table: String,
        level: u8,
    },

    #[error("{edition} class {class_id} has no experience table")]
    MissingClassTable { edition: Edition, class_id: String },

    #[error("{edition} magic-item tiers overlap at level {level}")]
    OverlappingTiers { edition: Edition, level: u8 },

    #[error("{edition} metadata appears more than once")]
    DuplicateEdition { edition: Edition },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub editions: Vec<EditionMetadata>,
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    #[serde(default)]
    pub monsters: Vec<Monster>,
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,
    #[serde(default)]
    pub magic_items: Vec<MagicItem>,
    #[serde(default)]
    pub spells: Vec<Spell>,
}

lazy_static::lazy_static! {
    static ref BUILTIN: Catalog = Catalog {
        editions: builtin_editions(),
        classes: CLASSES.clone(),
        monsters: MONSTERS.clone(),
        equipment: EQUIPMENT.clone(),
        magic_items: MAGIC_ITEMS.clone(),
        spells: SPELLS.clone(),
    };
}

/// The edition whose class records an edition reads when it has none.
fn class_edition(edition: Edition) -> Edition {
    match edition {
        Edition::Odnd | Edition::Basic | Edition::Becmi => Edition::Bx,
        Edition::Third => Edition::ThreeFive,
        other => other,
    }
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Load a catalog from JSON. Problems found by [`validate`](Self::validate)
    /// are logged and tolerated.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate();
        Ok(catalog)
    }

    /// Load a catalog from JSON, rejecting it if validation finds anything.
    pub fn from_json_strict(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        let issues = catalog.validate();
        if issues.is_empty() {
            Ok(catalog)
        } else {
            Err(CatalogError::Invalid(issues))
        }
    }

    /// The built-in catalog with `json` overlaid on it.
    pub fn builtin_with(json: &str) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::builtin().clone();
        catalog.extend(Catalog::from_json(json)?);
        Ok(catalog)
    }

    /// Overlay `other` on this catalog. Entries with the same key replace
    /// existing ones in place; new entries are appended.
    pub fn extend(&mut self, other: Catalog) {
        overlay(&mut self.editions, other.editions, |a, b| a.id == b.id);
        overlay(&mut self.classes, other.classes, |a, b| a.id == b.id && a.edition == b.edition);
        overlay(&mut self.monsters, other.monsters, |a, b| a.id == b.id);
        overlay(&mut self.equipment, other.equipment, |a, b| a.id == b.id);
        overlay(&mut self.magic_items, other.magic_items, |a, b| a.id == b.id);
        overlay(&mut self.spells, other.spells, |a, b| a.id == b.id && a.edition == b.edition);
    }

    /// Report structural problems. Each one is also logged as a warning.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for (i, meta) in self.editions.iter().enumerate() {
            if self.editions[..i].iter().any(|m| m.id == meta.id) {
                issues.push(CatalogIssue::DuplicateEdition { edition: meta.id });
            }
            if let Some(level) = first_non_increasing(&meta.experience) {
                issues.push(CatalogIssue::NonIncreasingXp {
                    edition: meta.id,
                    table: "universal".to_string(),
                    level,
                });
            }
            let mut class_ids: Vec<&String> = meta.class_experience.keys().collect();
            class_ids.sort();
            for class_id in class_ids {
                if let Some(level) = first_non_increasing(&meta.class_experience[class_id]) {
                    issues.push(CatalogIssue::NonIncreasingXp {
                        edition: meta.id,
                        table: class_id.clone(),
                        level,
                    });
                }
            }
            if meta.experience.is_empty() {
                for class in self.classes.iter().filter(|c| c.edition == meta.id) {
                    if !meta.class_experience.contains_key(resolve_class_id(&class.id)) {
                        issues.push(CatalogIssue::MissingClassTable {
                            edition: meta.id,
                            class_id: class.id.clone(),
                        });
                    }
                }
            }
            if let Some(budget) = &meta.magic_item_budget {
                let overlap = (1..=meta.max_level).find(|&level| {
                    budget
                        .tiers
                        .iter()
                        .filter(|t| t.level_range.contains(level))
                        .count()
                        > 1
                });
                if let Some(level) = overlap {
                    issues.push(CatalogIssue::OverlappingTiers {
                        edition: meta.id,
                        level,
                    });
                }
            }
        }

        for issue in &issues {
            tracing::warn!(%issue, "catalog problem");
        }
        issues
    }

    pub fn edition(&self, edition: Edition) -> Option<&EditionMetadata> {
        self.editions.iter().find(|m| m.id == edition)
    }

    /// Look up a class by id or historical alias.
    ///
    /// The Basic line reads B/X classes and 3e reads 3.5e classes when the
    /// catalog has none of their own.
    pub fn class(&self, class_id: &str, edition: Edition) -> Option<&ClassDefinition> {
        let class_id = resolve_class_id(class_id);
        let find = |edition: Edition| {
            self.classes
                .iter()
                .find(|c| c.edition == edition && resolve_class_id(&c.id) == class_id)
        };
        find(edition).or_else(|| {
            let fallback = class_edition(edition);
            (fallback != edition).then(|| find(fallback)).flatten()
        })
    }

    /// Classes available in `edition`, after fallback.
    pub fn classes_for(&self, edition: Edition) -> Vec<&ClassDefinition> {
        let own: Vec<&ClassDefinition> = self.classes.iter().filter(|c| c.edition == edition).collect();
        if !own.is_empty() {
            return own;
        }
        let fallback = class_edition(edition);
        self.classes.iter().filter(|c| c.edition == fallback).collect()
    }

    pub fn monster(&self, id: &str) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn equipment_item(&self, id: &str) -> Option<&EquipmentItem> {
        self.equipment.iter().find(|i| i.id == id)
    }

    pub fn magic_item(&self, id: &str) -> Option<&MagicItem> {
        self.magic_items.iter().find(|i| i.id == id)
    }

    pub fn spell(&self, id: &str, edition: Edition) -> Option<&Spell> {
        self.spells.iter().find(|s| s.id == id && s.edition == edition)
    }

    /// Subclass unlock level, honoring a class definition's override.
    pub fn subclass_unlock_level(&self, class_id: &str, edition: Edition) -> u8 {
        match self.class(class_id, edition) {
            Some(class) => class.unlock_level(),
            None => crate::class_data::subclass_unlock_level(class_id, edition),
        }
    }

    /// Highest level in `edition`, or 20 for editions the catalog lacks.
    pub fn max_level(&self, edition: Edition) -> u8 {
        self.edition(edition).map(|m| m.max_level).unwrap_or(20)
    }
}

fn overlay<T>(existing: &mut Vec<T>, incoming: Vec<T>, same: impl Fn(&T, &T) -> bool) {
    for item in incoming {
        match existing.iter_mut().find(|e| same(e, &item)) {
            Some(slot) => *slot = item,
            None => existing.push(item),
        }
    }
}

fn first_non_increasing(table: &[XpEntry]) -> Option<u8> {
    table
        .windows(2)
        .find(|pair| pair[1].level <= pair[0].level || pair[1].xp <= pair[0].xp)
        .map(|pair| pair[1].level)
}

// ============================================================================
// Built-in edition metadata
// ============================================================================

const CLASSIC_ALIGNMENTS: &[&str] = &["Lawful", "Neutral", "Chaotic"];
const NINE_ALIGNMENTS: &[&str] = &[
    "Lawful Good",
    "Neutral Good",
    "Chaotic Good",
    "Lawful Neutral",
    "Neutral",
    "Chaotic Neutral",
    "Lawful Evil",
    "Neutral Evil",
    "Chaotic Evil",
];
const FOURTH_ALIGNMENTS: &[&str] = &["Lawful Good", "Good", "Unaligned", "Evil", "Chaotic Evil"];

const FIFTH_XP: &[u32] = &[
    0, 300, 900, 2_700, 6_500, 14_000, 23_000, 34_000, 48_000, 64_000, 85_000, 100_000, 120_000, 140_000,
    165_000, 195_000, 225_000, 265_000, 305_000, 355_000,
];

const FOURTH_XP: &[u32] = &[
    0, 1_000, 2_250, 3_750, 5_500, 7_500, 10_000, 13_000, 16_500, 20_500, 26_000, 32_000, 39_000, 47_000,
    57_000, 69_000, 83_000, 99_000, 119_000, 143_000, 175_000, 210_000, 255_000, 310_000, 375_000,
    450_000, 550_000, 675_000, 825_000, 1_000_000,
];

/// 3e and 3.5e: 1,000 × the sum of all previous levels.
fn d20_xp(max_level: u8) -> Vec<XpEntry> {
    (1..=max_level as u32)
        .map(|level| XpEntry {
            level: level as u8,
            xp: 1_000 * level * (level - 1) / 2,
        })
        .collect()
}

fn second_edition() -> EditionMetadata {
    EditionMetadata::new(Edition::Second, 20)
        .with_class_experience(
            "fighter",
            stepped_xp_table(&[0, 2_000, 4_000, 8_000, 16_000, 32_000, 64_000, 125_000, 250_000], 250_000, 20),
        )
        .with_class_experience(
            "paladin",
            stepped_xp_table(&[0, 2_250, 4_500, 9_000, 18_000, 36_000, 75_000, 150_000, 300_000], 300_000, 20),
        )
        .with_class_experience(
            "ranger",
            stepped_xp_table(&[0, 2_250, 4_500, 9_000, 18_000, 36_000, 75_000, 150_000, 300_000], 300_000, 20),
        )
        .with_class_experience(
            "wizard",
            stepped_xp_table(
                &[0, 2_500, 5_000, 10_000, 20_000, 40_000, 60_000, 90_000, 135_000, 250_000, 375_000],
                375_000,
                20,
            ),
        )
        .with_class_experience(
            "cleric",
            stepped_xp_table(&[0, 1_500, 3_000, 6_000, 13_000, 27_500, 55_000, 110_000, 225_000], 225_000, 20),
        )
        .with_class_experience(
            "thief",
            stepped_xp_table(
                &[0, 1_250, 2_500, 5_000, 10_000, 20_000, 40_000, 70_000, 110_000, 160_000, 220_000],
                220_000,
                20,
            ),
        )
        .with_multiclassing(true, Some(3))
        .with_skills(4)
        .with_alignments(NINE_ALIGNMENTS)
}

fn first_edition() -> EditionMetadata {
    let mut meta = EditionMetadata::new(Edition::First, 20)
        .with_class_experience(
            "fighter",
            stepped_xp_table(&[0, 2_001, 4_001, 8_001, 18_001, 35_001, 70_001, 125_001, 250_001], 250_000, 20),
        )
        .with_class_experience(
            "wizard",
            stepped_xp_table(
                &[0, 2_501, 5_001, 10_001, 22_501, 40_001, 60_001, 90_001, 135_001, 250_001, 375_001],
                375_000,
                20,
            ),
        )
        .with_class_experience(
            "cleric",
            stepped_xp_table(&[0, 1_501, 3_001, 6_001, 13_001, 27_501, 55_001, 110_001, 225_001], 225_000, 20),
        )
        .with_class_experience(
            "thief",
            stepped_xp_table(
                &[0, 1_251, 2_501, 5_001, 10_001, 20_001, 42_501, 70_001, 110_001, 160_001, 220_001],
                220_000,
                20,
            ),
        )
        .with_multiclassing(true, Some(3))
        .with_alignments(NINE_ALIGNMENTS);
    meta.proficiencies.uses_skills = false;
    meta
}

/// B/X and BECMI share early thresholds; BECMI runs on to 36th level.
fn basic_line(edition: Edition, max_level: u8) -> EditionMetadata {
    EditionMetadata::new(edition, max_level)
        .with_class_experience(
            "fighter",
            stepped_xp_table(&[0, 2_000, 4_000, 8_000, 16_000, 32_000, 64_000, 120_000, 240_000], 120_000, max_level),
        )
        .with_class_experience(
            "cleric",
            stepped_xp_table(&[0, 1_500, 3_000, 6_000, 12_000, 25_000, 50_000, 100_000, 200_000], 100_000, max_level),
        )
        .with_class_experience(
            "wizard",
            stepped_xp_table(&[0, 2_500, 5_000, 10_000, 20_000, 40_000, 80_000, 150_000, 300_000], 150_000, max_level),
        )
        .with_class_experience(
            "thief",
            stepped_xp_table(&[0, 1_200, 2_400, 4_800, 9_600, 20_000, 40_000, 80_000, 160_000], 120_000, max_level),
        )
        .with_multiclassing(false, None)
        .with_alignments(CLASSIC_ALIGNMENTS)
}

fn holmes_basic() -> EditionMetadata {
    EditionMetadata::new(Edition::Basic, 3)
        .with_class_experience("fighter", xp_table(&[0, 2_000, 4_000]))
        .with_class_experience("cleric", xp_table(&[0, 1_500, 3_000]))
        .with_class_experience("wizard", xp_table(&[0, 2_500, 5_000]))
        .with_class_experience("thief", xp_table(&[0, 1_200, 2_400]))
        .with_multiclassing(false, None)
        .with_alignments(&["Lawful Good", "Lawful Evil", "Neutral", "Chaotic Good", "Chaotic Evil"])
}

fn original() -> EditionMetadata {
    EditionMetadata::new(Edition::Odnd, 20)
        .with_class_experience(
            "fighter",
            stepped_xp_table(&[0, 2_000, 4_000, 8_000, 16_000, 35_000, 70_000, 125_000, 250_000], 250_000, 20),
        )
        .with_class_experience(
            "wizard",
            stepped_xp_table(
                &[0, 2_500, 5_000, 10_000, 20_000, 35_000, 50_000, 75_000, 100_000, 200_000, 300_000],
                100_000,
                20,
            ),
        )
        .with_class_experience(
            "cleric",
            stepped_xp_table(&[0, 1_500, 3_000, 6_000, 12_000, 25_000, 50_000, 100_000], 100_000, 20),
        )
        .with_multiclassing(false, None)
        .with_alignments(CLASSIC_ALIGNMENTS)
}

fn builtin_editions() -> Vec<EditionMetadata> {
    vec![
        original(),
        holmes_basic(),
        basic_line(Edition::Becmi, 36),
        basic_line(Edition::Bx, 14),
        first_edition(),
        second_edition(),
        EditionMetadata::new(Edition::Third, 20)
            .with_experience(d20_xp(20))
            .with_multiclassing(true, None)
            .with_magic_item_budget(d20_budget())
            .with_skills(4)
            .with_alignments(NINE_ALIGNMENTS),
        EditionMetadata::new(Edition::ThreeFive, 20)
            .with_experience(d20_xp(20))
            .with_multiclassing(true, None)
            .with_magic_item_budget(d20_budget())
            .with_skills(4)
            .with_alignments(NINE_ALIGNMENTS),
        EditionMetadata::new(Edition::Fourth, 30)
            .with_experience(xp_table(FOURTH_XP))
            .with_multiclassing(true, Some(2))
            .with_magic_item_budget(fourth_edition_budget())
            .with_skills(3)
            .with_alignments(FOURTH_ALIGNMENTS),
        EditionMetadata::new(Edition::Fifth, 20)
            .with_experience(xp_table(FIFTH_XP))
            .with_multiclassing(true, None)
            .with_magic_item_budget(fifth_edition_budget())
            .with_skills(4)
            .with_alignments(NINE_ALIGNMENTS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_edition() {
        for edition in Edition::all() {
            assert!(Catalog::builtin().edition(*edition).is_some(), "{edition}");
        }
    }

    #[test]
    fn test_builtin_is_valid() {
        assert_eq!(Catalog::builtin().validate(), Vec::new());
    }

    #[test]
    fn test_d20_table() {
        let table = d20_xp(4);
        assert_eq!(table.iter().map(|e| e.xp).collect::<Vec<_>>(), vec![0, 1_000, 3_000, 6_000]);
    }

    #[test]
    fn test_class_lookup_resolves_aliases_and_fallback() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.class("magic-user", Edition::First).unwrap().name, "Magic-User");
        assert_eq!(catalog.class("fighter", Edition::Becmi).unwrap().edition, Edition::Bx);
        assert_eq!(catalog.class("rogue", Edition::Third).unwrap().edition, Edition::ThreeFive);
        assert!(catalog.class("bard", Edition::Second).is_none());
        assert_eq!(catalog.classes_for(Edition::Odnd).len(), 4);
    }

    #[test]
    fn test_subclass_unlock_uses_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.subclass_unlock_level("wizard", Edition::Fifth), 2);
        assert_eq!(catalog.subclass_unlock_level("unknown", Edition::Fourth), 11);
    }

    #[test]
    fn test_from_json_and_extend() {
        let json = r#"{
            "editions": [
                { "id": "5e", "maxLevel": 10, "experience": [{"level": 1, "xp": 0}, {"level": 2, "xp": 500}] }
            ],
            "spells": [
                { "id": "light", "name": "Light", "edition": "5e", "level": 0, "school": "evocation", "classes": ["cleric"] }
            ]
        }"#;
        let custom = Catalog::from_json(json).unwrap();
        assert_eq!(custom.editions.len(), 1);

        let merged = Catalog::builtin_with(json).unwrap();
        assert_eq!(merged.editions.len(), Catalog::builtin().editions.len());
        assert_eq!(merged.edition(Edition::Fifth).unwrap().max_level, 10);
        assert!(merged.spell("light", Edition::Fifth).is_some());
        assert_eq!(merged.spells.len(), Catalog::builtin().spells.len() + 1);
    }

    #[test]
    fn test_from_json_rejects_bad_json() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_strict_loading_reports_issues() {
        let json = r#"{
            "editions": [
                { "id": "2e", "maxLevel": 3, "classExperience": { "fighter": [{"level": 1, "xp": 0}, {"level": 2, "xp": 0}] } }
            ]
        }"#;
        let Err(CatalogError::Invalid(issues)) = Catalog::from_json_strict(json) else {
            panic!("expected validation failure");
        };
        assert_eq!(
            issues,
            vec![CatalogIssue::NonIncreasingXp {
                edition: Edition::Second,
                table: "fighter".to_string(),
                level: 2,
            }]
        );
        // tolerant loading keeps the data
        assert!(Catalog::from_json(json).is_ok());
    }

    #[test]
    fn test_validate_finds_missing_tables_and_overlaps() {
        let mut catalog = Catalog::builtin().clone();
        if let Some(meta) = catalog.editions.iter_mut().find(|m| m.id == Edition::Second) {
            meta.class_experience.remove("thief");
        }
        if let Some(meta) = catalog.editions.iter_mut().find(|m| m.id == Edition::Fifth) {
            if let Some(budget) = meta.magic_item_budget.as_mut() {
                budget.tiers[0].level_range.max = 6;
            }
        }
        let issues = catalog.validate();
        assert!(issues.contains(&CatalogIssue::MissingClassTable {
            edition: Edition::Second,
            class_id: "thief".to_string(),
        }));
        assert!(issues.contains(&CatalogIssue::OverlappingTiers {
            edition: Edition::Fifth,
            level: 5,
        }));
    }
}
