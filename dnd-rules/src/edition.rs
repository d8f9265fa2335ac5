//! Rule editions and their per-edition metadata.
//!
//! Every catalog entry and every engine call is keyed by an [`Edition`].
//! Editions serialize to the short strings used throughout the reference
//! data (`"1e"`, `"3.5e"`, `"bx"`, ...).

use crate::magic_items::MagicItemBudget;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A published rule edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Edition {
    #[serde(rename = "odnd")]
    Odnd,
    /// Holmes Basic.
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "becmi")]
    Becmi,
    #[serde(rename = "bx")]
    Bx,
    #[serde(rename = "1e")]
    First,
    #[serde(rename = "2e")]
    Second,
    #[serde(rename = "3e")]
    Third,
    #[serde(rename = "3.5e")]
    ThreeFive,
    #[serde(rename = "4e")]
    Fourth,
    #[serde(rename = "5e")]
    Fifth,
}

/// Broad rules families that share mechanical conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditionFamily {
    /// Descending AC, THAC0, movement in segments.
    Classic,
    /// 3e and 3.5e: ascending AC, base attack bonus.
    D20,
    /// 4e: flat hit points, level-based math, squares.
    Fourth,
    Fifth,
}

impl Edition {
    /// The canonical edition string.
    pub fn id(&self) -> &'static str {
        match self {
            Edition::Odnd => "odnd",
            Edition::Basic => "basic",
            Edition::Becmi => "becmi",
            Edition::Bx => "bx",
            Edition::First => "1e",
            Edition::Second => "2e",
            Edition::Third => "3e",
            Edition::ThreeFive => "3.5e",
            Edition::Fourth => "4e",
            Edition::Fifth => "5e",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Edition::Odnd => "Original D&D",
            Edition::Basic => "Holmes Basic",
            Edition::Becmi => "BECMI",
            Edition::Bx => "B/X",
            Edition::First => "AD&D 1st Edition",
            Edition::Second => "AD&D 2nd Edition",
            Edition::Third => "D&D 3rd Edition",
            Edition::ThreeFive => "D&D 3.5",
            Edition::Fourth => "D&D 4th Edition",
            Edition::Fifth => "D&D 5th Edition",
        }
    }

    pub fn family(&self) -> EditionFamily {
        match self {
            Edition::Odnd
            | Edition::Basic
            | Edition::Becmi
            | Edition::Bx
            | Edition::First
            | Edition::Second => EditionFamily::Classic,
            Edition::Third | Edition::ThreeFive => EditionFamily::D20,
            Edition::Fourth => EditionFamily::Fourth,
            Edition::Fifth => EditionFamily::Fifth,
        }
    }

    /// Whether armor class counts down from 9 or 10 in this edition.
    pub fn uses_descending_ac(&self) -> bool {
        self.family() == EditionFamily::Classic
    }

    pub fn all() -> &'static [Edition] {
        &[
            Edition::Odnd,
            Edition::Basic,
            Edition::Becmi,
            Edition::Bx,
            Edition::First,
            Edition::Second,
            Edition::Third,
            Edition::ThreeFive,
            Edition::Fourth,
            Edition::Fifth,
        ]
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Error parsing an edition string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown edition: {0}")]
pub struct UnknownEdition(pub String);

impl FromStr for Edition {
    type Err = UnknownEdition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let edition = match normalized.as_str() {
            "odnd" | "od&d" | "0e" | "original" => Edition::Odnd,
            "basic" | "holmes" => Edition::Basic,
            "becmi" | "rules-cyclopedia" => Edition::Becmi,
            "bx" | "b/x" | "b-x" => Edition::Bx,
            "1e" | "adnd1e" | "ad&d1e" => Edition::First,
            "2e" | "adnd2e" | "ad&d2e" => Edition::Second,
            "3e" | "3.0" | "3.0e" => Edition::Third,
            "3.5e" | "3.5" | "35e" => Edition::ThreeFive,
            "4e" | "4" => Edition::Fourth,
            "5e" | "5" | "5.5e" | "2024" => Edition::Fifth,
            _ => return Err(UnknownEdition(s.to_string())),
        };
        Ok(edition)
    }
}

/// One row of an experience table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpEntry {
    pub level: u8,
    pub xp: u32,
}

/// Multiclassing rules for an edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Multiclassing {
    pub allowed: bool,
    /// Upper bound on simultaneous classes; `None` means unbounded.
    #[serde(default)]
    pub max_classes: Option<usize>,
}

/// Skill/proficiency allotments for new characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProficiencyAllotment {
    /// Skills picked at character creation on top of class grants.
    #[serde(default)]
    pub skill_picks: u8,
    /// Whether the edition uses skills at all (pre-2e editions do not).
    #[serde(default)]
    pub uses_skills: bool,
}

/// Read-only reference data describing one edition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionMetadata {
    pub id: Edition,
    pub max_level: u8,
    /// Universal experience table (3e and later).
    #[serde(default)]
    pub experience: Vec<XpEntry>,
    /// Per-class experience tables (pre-3e), keyed by canonical class id.
    #[serde(default)]
    pub class_experience: HashMap<String, Vec<XpEntry>>,
    #[serde(default)]
    pub multiclassing: Multiclassing,
    #[serde(default)]
    pub magic_item_budget: Option<MagicItemBudget>,
    #[serde(default)]
    pub proficiencies: ProficiencyAllotment,
    #[serde(default)]
    pub alignments: Vec<String>,
}

impl EditionMetadata {
    /// Metadata with no tables, no multiclassing and no magic-item economy.
    pub fn new(id: Edition, max_level: u8) -> Self {
        Self {
            id,
            max_level,
            experience: Vec::new(),
            class_experience: HashMap::new(),
            multiclassing: Multiclassing::default(),
            magic_item_budget: None,
            proficiencies: ProficiencyAllotment::default(),
            alignments: Vec::new(),
        }
    }

    pub fn with_experience(mut self, experience: Vec<XpEntry>) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_class_experience(mut self, class_id: &str, table: Vec<XpEntry>) -> Self {
        self.class_experience.insert(class_id.to_string(), table);
        self
    }

    pub fn with_multiclassing(mut self, allowed: bool, max_classes: Option<usize>) -> Self {
        self.multiclassing = Multiclassing {
            allowed,
            max_classes,
        };
        self
    }

    pub fn with_magic_item_budget(mut self, budget: MagicItemBudget) -> Self {
        self.magic_item_budget = Some(budget);
        self
    }

    pub fn with_skills(mut self, skill_picks: u8) -> Self {
        self.proficiencies = ProficiencyAllotment {
            skill_picks,
            uses_skills: true,
        };
        self
    }

    pub fn with_alignments(mut self, alignments: &[&str]) -> Self {
        self.alignments = alignments.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Whether `alignment` is legal here. Editions without a list accept anything.
    pub fn allows_alignment(&self, alignment: &str) -> bool {
        self.alignments.is_empty()
            || self
                .alignments
                .iter()
                .any(|a| a.eq_ignore_ascii_case(alignment))
    }
}

/// Build an experience table from thresholds starting at level 1.
pub fn xp_table(thresholds: &[u32]) -> Vec<XpEntry> {
    thresholds
        .iter()
        .enumerate()
        .map(|(i, &xp)| XpEntry {
            level: (i + 1) as u8,
            xp,
        })
        .collect()
}

/// Build a classic per-class table: explicit thresholds, then a flat
/// increment per level up to `max_level`.
pub fn stepped_xp_table(thresholds: &[u32], step: u32, max_level: u8) -> Vec<XpEntry> {
    let mut table = xp_table(thresholds);
    let mut last = thresholds.last().copied().unwrap_or(0);
    for level in (thresholds.len() as u8 + 1)..=max_level {
        last += step;
        table.push(XpEntry { level, xp: last });
    }
    table
}
