//! Spell catalog and spell-slot budgets.
//!
//! Slot counts come from the standard casting tables, picked by the class's
//! [`SpellcastingTier`]. Cantrip and spells-known caps come from the class's
//! own [`SpellColumns`](crate::class_data::SpellColumns). A multiclass
//! character's budget is the sum of every casting class's budget.

use crate::catalog::Catalog;
use crate::character_builder::CharacterClassInfo;
use crate::class_data::{column_value, ClassDefinition};
use crate::edition::Edition;
use crate::mechanics::SpellcastingTier;
use crate::xp::resolve_class_id;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Schools of magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
}

impl SpellSchool {
    pub fn name(&self) -> &'static str {
        match self {
            SpellSchool::Abjuration => "Abjuration",
            SpellSchool::Conjuration => "Conjuration",
            SpellSchool::Divination => "Divination",
            SpellSchool::Enchantment => "Enchantment",
            SpellSchool::Evocation => "Evocation",
            SpellSchool::Illusion => "Illusion",
            SpellSchool::Necromancy => "Necromancy",
            SpellSchool::Transmutation => "Transmutation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub edition: Edition,
    pub level: u8, // 0 for cantrips
    pub school: SpellSchool,
    /// Class ids whose spell list includes this spell.
    pub classes: Vec<String>,
}

impl Spell {
    pub fn new(id: &str, name: &str, edition: Edition, level: u8, school: SpellSchool, classes: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            edition,
            level,
            school,
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    pub fn on_list_of(&self, class_id: &str) -> bool {
        let class_id = resolve_class_id(class_id);
        self.classes.iter().any(|c| c == class_id)
    }
}

/// Casting capacity at one point in a character's progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellBudget {
    pub cantrips: u32,
    /// Slots per spell level; index 0 is 1st level.
    pub slots_by_level: [u32; 9],
    /// Highest spell level with at least one slot, 0 for none.
    pub max_spell_level: u8,
    /// Overall cap for casters with a fixed list of known spells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_known: Option<u32>,
}

impl SpellBudget {
    pub fn slots_at(&self, spell_level: u8) -> u32 {
        match spell_level {
            1..=9 => self.slots_by_level[spell_level as usize - 1],
            _ => 0,
        }
    }

    pub fn is_caster(&self) -> bool {
        self.cantrips > 0 || self.max_spell_level > 0
    }

    /// Add another class's budget to this one.
    pub fn combine(mut self, other: SpellBudget) -> SpellBudget {
        self.cantrips += other.cantrips;
        for (mine, theirs) in self.slots_by_level.iter_mut().zip(other.slots_by_level) {
            *mine += theirs;
        }
        self.max_spell_level = self.max_spell_level.max(other.max_spell_level);
        self.total_known = match (self.total_known, other.total_known) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
        self
    }
}

// ============================================================================
// Slot tables
// ============================================================================

/// Full-caster slots by caster level (index 0 is level 1).
const FULL_CASTER_SLOTS: [[u32; 9]; 20] = [
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

/// Pact Magic: (slot count, slot level) by warlock level.
const PACT_SLOTS: [(u32, u8); 20] = [
    (1, 1),
    (2, 1),
    (2, 2),
    (2, 2),
    (2, 3),
    (2, 3),
    (2, 4),
    (2, 4),
    (2, 5),
    (2, 5),
    (3, 5),
    (3, 5),
    (3, 5),
    (3, 5),
    (3, 5),
    (3, 5),
    (4, 5),
    (4, 5),
    (4, 5),
    (4, 5),
];

/// Full-caster row for an effective caster level; empty below 1.
fn full_caster_row(caster_level: u8) -> [u32; 9] {
    match caster_level {
        0 => [0; 9],
        n => FULL_CASTER_SLOTS[(n.min(20) - 1) as usize],
    }
}

/// Slots for a class of `tier` at `level`.
///
/// Half casters start at 2nd level and third casters at 3rd; both then
/// follow the full-caster table at a fraction of their level, rounded up.
pub fn slots_for(tier: SpellcastingTier, level: u8) -> [u32; 9] {
    match tier {
        SpellcastingTier::Full => full_caster_row(level),
        SpellcastingTier::Half if level >= 2 => full_caster_row(level.div_ceil(2)),
        SpellcastingTier::Third if level >= 3 => full_caster_row(level.div_ceil(3)),
        SpellcastingTier::Pact if level >= 1 => {
            let (count, slot_level) = PACT_SLOTS[(level.min(20) - 1) as usize];
            let mut row = [0; 9];
            row[slot_level as usize - 1] = count;
            row
        }
        _ => [0; 9],
    }
}

fn highest_slot_level(slots: &[u32; 9]) -> u8 {
    slots
        .iter()
        .rposition(|&count| count > 0)
        .map(|i| i as u8 + 1)
        .unwrap_or(0)
}

/// Budget for one class at `level`.
pub fn class_spell_budget(class: &ClassDefinition, level: u8) -> SpellBudget {
    let tier = class.spellcasting();
    if !tier.is_caster() || level == 0 {
        return SpellBudget::default();
    }
    let slots_by_level = slots_for(tier, level);
    let (cantrips, total_known) = match &class.spell_columns {
        Some(columns) => (
            column_value(&columns.cantrips_known, level),
            columns
                .spells_known
                .as_ref()
                .map(|known| column_value(known, level)),
        ),
        None => (0, None),
    };

    SpellBudget {
        cantrips,
        slots_by_level,
        max_spell_level: highest_slot_level(&slots_by_level),
        total_known,
    }
}

/// Casting classes of a character paired with their levels.
fn casting_classes<'a>(
    catalog: &'a Catalog,
    edition: Edition,
    classes: &'a [CharacterClassInfo],
) -> impl Iterator<Item = (&'a ClassDefinition, u8)> + 'a {
    classes.iter().filter_map(move |info| {
        let class = catalog.class(info.class_id.as_deref()?, edition)?;
        class.spellcasting().is_caster().then_some((class, info.level))
    })
}

/// Summed budget across every casting class a character holds.
pub fn character_spell_budget(catalog: &Catalog, edition: Edition, classes: &[CharacterClassInfo]) -> SpellBudget {
    casting_classes(catalog, edition, classes)
        .map(|(class, level)| class_spell_budget(class, level))
        .fold(SpellBudget::default(), SpellBudget::combine)
}

/// Whether no more spells of `spell_level` may be picked.
///
/// A level is full when its own cap is met, or, for known casters, when the
/// total of leveled spells has reached `total_known`.
pub fn is_spell_level_full(budget: &SpellBudget, selected: &[&Spell], spell_level: u8) -> bool {
    let at_level = selected.iter().filter(|s| s.level == spell_level).count() as u32;
    if spell_level == 0 {
        return at_level >= budget.cantrips;
    }
    if at_level >= budget.slots_at(spell_level) {
        return true;
    }
    match budget.total_known {
        Some(known) => selected.iter().filter(|s| !s.is_cantrip()).count() as u32 >= known,
        None => false,
    }
}

/// Spells any of the character's classes could pick right now.
pub fn available_spells<'a>(
    catalog: &'a Catalog,
    edition: Edition,
    classes: &[CharacterClassInfo],
) -> Vec<&'a Spell> {
    let casters: Vec<(&ClassDefinition, SpellBudget)> = casting_classes(catalog, edition, classes)
        .map(|(class, level)| (class, class_spell_budget(class, level)))
        .collect();

    catalog
        .spells
        .iter()
        .filter(|spell| spell.edition == edition)
        .filter(|spell| {
            casters.iter().any(|(class, budget)| {
                spell.on_list_of(&class.id)
                    && if spell.is_cantrip() {
                        budget.cantrips > 0
                    } else {
                        spell.level <= budget.max_spell_level
                    }
            })
        })
        .collect()
}

// ============================================================================
// Spell database
// ============================================================================

pub static SPELLS: LazyLock<Vec<Spell>> = LazyLock::new(build_spell_database);

fn build_spell_database() -> Vec<Spell> {
    use Edition::{Fifth, Second, ThreeFive};
    use SpellSchool::*;
    vec![
        // 5e cantrips
        Spell::new("fire-bolt", "Fire Bolt", Fifth, 0, Evocation, &["sorcerer", "wizard"]),
        Spell::new("sacred-flame", "Sacred Flame", Fifth, 0, Evocation, &["cleric"]),
        Spell::new("eldritch-blast", "Eldritch Blast", Fifth, 0, Evocation, &["warlock"]),
        Spell::new("vicious-mockery", "Vicious Mockery", Fifth, 0, Enchantment, &["bard"]),
        Spell::new("guidance", "Guidance", Fifth, 0, Divination, &["cleric", "druid"]),
        Spell::new("mage-hand", "Mage Hand", Fifth, 0, Conjuration, &["bard", "sorcerer", "warlock", "wizard"]),
        // 5e leveled spells
        Spell::new("magic-missile", "Magic Missile", Fifth, 1, Evocation, &["sorcerer", "wizard"]),
        Spell::new("shield", "Shield", Fifth, 1, Abjuration, &["sorcerer", "wizard"]),
        Spell::new("cure-wounds", "Cure Wounds", Fifth, 1, Evocation, &["bard", "cleric", "druid", "paladin", "ranger"]),
        Spell::new("bless", "Bless", Fifth, 1, Enchantment, &["cleric", "paladin"]),
        Spell::new("hex", "Hex", Fifth, 1, Enchantment, &["warlock"]),
        Spell::new("hunters-mark", "Hunter's Mark", Fifth, 1, Divination, &["ranger"]),
        Spell::new("misty-step", "Misty Step", Fifth, 2, Conjuration, &["sorcerer", "warlock", "wizard"]),
        Spell::new("spiritual-weapon", "Spiritual Weapon", Fifth, 2, Evocation, &["cleric"]),
        Spell::new("hold-person", "Hold Person", Fifth, 2, Enchantment, &["bard", "cleric", "druid", "sorcerer", "warlock", "wizard"]),
        Spell::new("fireball", "Fireball", Fifth, 3, Evocation, &["sorcerer", "wizard"]),
        Spell::new("counterspell", "Counterspell", Fifth, 3, Abjuration, &["sorcerer", "warlock", "wizard"]),
        Spell::new("revivify", "Revivify", Fifth, 3, Necromancy, &["cleric", "paladin"]),
        Spell::new("polymorph", "Polymorph", Fifth, 4, Transmutation, &["bard", "druid", "sorcerer", "wizard"]),
        Spell::new("cone-of-cold", "Cone of Cold", Fifth, 5, Evocation, &["sorcerer", "wizard"]),
        Spell::new("disintegrate", "Disintegrate", Fifth, 6, Transmutation, &["sorcerer", "wizard"]),
        Spell::new("teleport", "Teleport", Fifth, 7, Conjuration, &["bard", "sorcerer", "wizard"]),
        Spell::new("power-word-stun", "Power Word Stun", Fifth, 8, Enchantment, &["bard", "sorcerer", "warlock", "wizard"]),
        Spell::new("wish", "Wish", Fifth, 9, Conjuration, &["sorcerer", "wizard"]),
        // 3.5e
        Spell::new("detect-magic", "Detect Magic", ThreeFive, 0, Divination, &["cleric", "wizard"]),
        Spell::new("magic-missile", "Magic Missile", ThreeFive, 1, Evocation, &["wizard"]),
        Spell::new("cure-light-wounds", "Cure Light Wounds", ThreeFive, 1, Conjuration, &["cleric", "paladin"]),
        Spell::new("fireball", "Fireball", ThreeFive, 3, Evocation, &["wizard"]),
        // 2e
        Spell::new("magic-missile", "Magic Missile", Second, 1, Evocation, &["wizard"]),
        Spell::new("cure-light-wounds", "Cure Light Wounds", Second, 1, Necromancy, &["cleric", "paladin"]),
        Spell::new("fireball", "Fireball", Second, 3, Evocation, &["wizard"]),
    ]
}
