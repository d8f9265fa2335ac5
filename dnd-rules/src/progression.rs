//! Progression and multiclass engine.
//!
//! The builder state changes through one pure function:
//! 1. The caller describes a change as a [`BuilderAction`]
//! 2. [`check`] judges it against the edition's rules and the catalog
//! 3. [`reduce`] returns the next state, or the same state when rejected
//!
//! Rejection is an ordinary outcome, not an error. The [`Verdict`] helpers
//! give the caller a reason to show.

use crate::catalog::Catalog;
use crate::character_builder::{CharacterBuilderState, CharacterClassInfo, Wealth};
use crate::class_data::ClassDefinition;
use crate::edition::Edition;
use crate::items::{allowed_items_for_classes, selection_cost_cp, selection_weight, EquipmentSlot};
use crate::magic_items::can_add_magic_item;
use crate::spells::{available_spells, character_spell_budget, is_spell_level_full, Spell};
use crate::xp::{level_for_xp, resolve_class_id};
use serde::{Deserialize, Serialize};

/// Whether a transition may happen, and why not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Verdict {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// A requested change to a [`CharacterBuilderState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuilderAction {
    /// Add a class slot at level 1, optionally with a class already picked
    AddClass { class_id: Option<String> },

    /// Pick the class for a slot. Clears the slot's subclass.
    SetClass { index: usize, class_id: String },

    SetClassLevel { index: usize, level: u8 },

    RemoveClass { index: usize },

    SetActiveClass { index: usize },

    /// Give every unallocated level to the active class
    AllocateRemaining,

    /// Pick or clear a subclass. Ignored below the unlock level.
    SetSubclass {
        index: usize,
        subclass: Option<String>,
    },

    SetTotalLevel { total_level: u8 },

    /// Record experience and derive the character level from it
    SetXp { xp: u32 },

    /// Switch rule editions. Classes, equipment and spells start over.
    SetEdition { edition: Edition },

    /// Buy or return a weapon, armor or gear item
    ToggleItem { item_id: String },

    ToggleMagicItem { item_id: String },

    ToggleSpell { spell_id: String },

    SetSkills { skills: Vec<String> },

    SetRace { race: Option<String> },

    SetAlignment { alignment: Option<String> },

    /// Set the starting purse that mundane purchases are paid from
    SetBaseGold { base_gp: u32 },
}

// ============================================================================
// Verdict helpers
// ============================================================================

/// Levels not yet assigned to a class.
pub fn remaining_levels(state: &CharacterBuilderState) -> u8 {
    state.remaining_levels()
}

/// Whether another class may be added.
pub fn can_add_class(state: &CharacterBuilderState, catalog: &Catalog) -> Verdict {
    let Some(meta) = catalog.edition(state.edition) else {
        return Verdict::deny(format!("No rules loaded for {}", state.edition.name()));
    };
    if !meta.multiclassing.allowed {
        return Verdict::deny(format!("{} does not allow multiclassing", state.edition.name()));
    }
    if let Some(max) = meta.multiclassing.max_classes {
        if state.classes.len() >= max {
            return Verdict::deny(format!("At most {max} classes are allowed"));
        }
    }
    if state.remaining_levels() == 0 {
        return Verdict::deny("No unallocated levels remain");
    }
    Verdict::allow()
}

/// Whether the class at `index` may be set to `level`.
pub fn can_set_class_level(state: &CharacterBuilderState, index: usize, level: u8) -> Verdict {
    if index >= state.classes.len() {
        return Verdict::deny(format!("No class at position {index}"));
    }
    if level < 1 {
        return Verdict::deny("Class level must be at least 1");
    }
    let others: u32 = state
        .classes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, c)| u32::from(c.level))
        .sum();
    if others + u32::from(level) > u32::from(state.total_level) {
        return Verdict::deny(format!(
            "Class levels would total {}, above character level {}",
            others + u32::from(level),
            state.total_level
        ));
    }
    Verdict::allow()
}

/// Whether the class at `index` may be removed.
pub fn can_remove_class(state: &CharacterBuilderState, index: usize) -> Verdict {
    if index >= state.classes.len() {
        return Verdict::deny(format!("No class at position {index}"));
    }
    if state.classes.len() <= 1 {
        return Verdict::deny("A character needs at least one class");
    }
    Verdict::allow()
}

fn class_definitions<'a>(state: &CharacterBuilderState, catalog: &'a Catalog) -> Vec<&'a ClassDefinition> {
    state
        .class_ids()
        .into_iter()
        .filter_map(|id| catalog.class(id, state.edition))
        .collect()
}

fn selected_spells<'a>(state: &CharacterBuilderState, catalog: &'a Catalog) -> Vec<&'a Spell> {
    state
        .spells
        .iter()
        .filter_map(|id| catalog.spell(id, state.edition))
        .collect()
}

/// Judge `action` against `state` without applying it.
pub fn check(state: &CharacterBuilderState, action: &BuilderAction, catalog: &Catalog) -> Verdict {
    match action {
        BuilderAction::AddClass { class_id } => {
            let verdict = can_add_class(state, catalog);
            match class_id {
                Some(id) if verdict.allowed => check_class_pick(state, None, id, catalog),
                _ => verdict,
            }
        }
        BuilderAction::SetClass { index, class_id } => {
            if *index >= state.classes.len() {
                return Verdict::deny(format!("No class at position {index}"));
            }
            check_class_pick(state, Some(*index), class_id, catalog)
        }
        BuilderAction::SetClassLevel { index, level } => can_set_class_level(state, *index, *level),
        BuilderAction::RemoveClass { index } => can_remove_class(state, *index),
        BuilderAction::SetActiveClass { index } => {
            if *index < state.classes.len() {
                Verdict::allow()
            } else {
                Verdict::deny(format!("No class at position {index}"))
            }
        }
        BuilderAction::AllocateRemaining => {
            if state.active_class().is_none() {
                Verdict::deny("No active class")
            } else if state.remaining_levels() == 0 {
                Verdict::deny("No unallocated levels remain")
            } else {
                Verdict::allow()
            }
        }
        BuilderAction::SetSubclass { index, subclass } => check_subclass(state, *index, subclass.as_deref(), catalog),
        BuilderAction::SetTotalLevel { total_level } => {
            let max = catalog.max_level(state.edition);
            if *total_level < 1 || *total_level > max {
                Verdict::deny(format!("Character level must be between 1 and {max}"))
            } else if *total_level < state.allocated_levels() {
                Verdict::deny(format!(
                    "{} levels are already assigned to classes",
                    state.allocated_levels()
                ))
            } else {
                Verdict::allow()
            }
        }
        BuilderAction::SetXp { .. } | BuilderAction::SetRace { .. } => Verdict::allow(),
        BuilderAction::SetEdition { edition } => {
            if catalog.edition(*edition).is_some() {
                Verdict::allow()
            } else {
                Verdict::deny(format!("No rules loaded for {}", edition.name()))
            }
        }
        BuilderAction::ToggleItem { item_id } => check_item(state, item_id, catalog),
        BuilderAction::ToggleMagicItem { item_id } => {
            if state.equipment.magic_items.contains(item_id) {
                return Verdict::allow();
            }
            can_add_magic_item(
                catalog,
                state.edition,
                state.total_level,
                &state.equipment.magic_items,
                item_id,
            )
        }
        BuilderAction::ToggleSpell { spell_id } => check_spell(state, spell_id, catalog),
        BuilderAction::SetSkills { skills } => {
            let Some(meta) = catalog.edition(state.edition) else {
                return Verdict::allow();
            };
            if skills.is_empty() {
                Verdict::allow()
            } else if !meta.proficiencies.uses_skills {
                Verdict::deny(format!("{} has no skills", state.edition.name()))
            } else if skills.len() > usize::from(meta.proficiencies.skill_picks) {
                Verdict::deny(format!("Pick at most {} skills", meta.proficiencies.skill_picks))
            } else {
                Verdict::allow()
            }
        }
        BuilderAction::SetAlignment { alignment } => match (alignment, catalog.edition(state.edition)) {
            (Some(alignment), Some(meta)) if !meta.allows_alignment(alignment) => {
                Verdict::deny(format!("{alignment} is not an alignment in {}", state.edition.name()))
            }
            _ => Verdict::allow(),
        },
        BuilderAction::SetBaseGold { base_gp } => {
            let spent = selection_cost_cp(catalog, &state.equipment.mundane(), state.edition);
            if spent > u64::from(*base_gp) * 100 {
                Verdict::deny("Selected equipment costs more than that")
            } else {
                Verdict::allow()
            }
        }
    }
}

fn check_class_pick(state: &CharacterBuilderState, index: Option<usize>, class_id: &str, catalog: &Catalog) -> Verdict {
    if catalog.class(class_id, state.edition).is_none() {
        return Verdict::deny(format!("{class_id} is not a class in {}", state.edition.name()));
    }
    let canonical = resolve_class_id(class_id);
    let taken = state
        .classes
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != index)
        .filter_map(|(_, c)| c.class_id.as_deref())
        .any(|id| resolve_class_id(id) == canonical);
    if taken {
        return Verdict::deny(format!("Character already has {class_id}"));
    }
    Verdict::allow()
}

fn check_subclass(state: &CharacterBuilderState, index: usize, subclass: Option<&str>, catalog: &Catalog) -> Verdict {
    let Some(info) = state.classes.get(index) else {
        return Verdict::deny(format!("No class at position {index}"));
    };
    let Some(subclass) = subclass else {
        return Verdict::allow();
    };
    let Some(class_id) = info.class_id.as_deref() else {
        return Verdict::deny("Pick a class before a subclass");
    };
    let unlock = catalog.subclass_unlock_level(class_id, state.edition);
    if info.level < unlock {
        return Verdict::deny(format!("Subclasses unlock at level {unlock}"));
    }
    if let Some(class) = catalog.class(class_id, state.edition) {
        if !class.subclasses.is_empty() && !class.subclasses.iter().any(|s| s == subclass) {
            return Verdict::deny(format!("{subclass} is not a {} subclass", class.name));
        }
    }
    Verdict::allow()
}

fn check_item(state: &CharacterBuilderState, item_id: &str, catalog: &Catalog) -> Verdict {
    let Some(item) = catalog.equipment_item(item_id) else {
        return Verdict::deny(format!("Unknown item {item_id}"));
    };
    let mundane = state.equipment.mundane();
    if mundane.iter().any(|id| id == item_id) {
        return Verdict::allow();
    }
    if item.data_for(state.edition).is_none() {
        return Verdict::deny(format!("{} is not sold in {}", item.name, state.edition.name()));
    }
    let classes = class_definitions(state, catalog);
    let proficient = allowed_items_for_classes(catalog, &classes, item.slot, state.edition)
        .iter()
        .any(|allowed| allowed.id == item.id);
    if !proficient {
        return Verdict::deny(format!("Not proficient with {}", item.name));
    }
    let spent = selection_cost_cp(catalog, &mundane, state.edition);
    let cost = item.cost_cp(state.edition).unwrap_or(0);
    if spent + cost > u64::from(state.wealth.base_gp) * 100 {
        return Verdict::deny(format!("Not enough gold for {}", item.name));
    }
    Verdict::allow()
}

fn check_spell(state: &CharacterBuilderState, spell_id: &str, catalog: &Catalog) -> Verdict {
    if state.spells.iter().any(|id| id == spell_id) {
        return Verdict::allow();
    }
    let Some(spell) = available_spells(catalog, state.edition, &state.classes)
        .into_iter()
        .find(|s| s.id == spell_id)
    else {
        return Verdict::deny(format!("{spell_id} is not available"));
    };
    let budget = character_spell_budget(catalog, state.edition, &state.classes);
    if is_spell_level_full(&budget, &selected_spells(state, catalog), spell.level) {
        return Verdict::deny(if spell.is_cantrip() {
            "No cantrips left to pick".to_string()
        } else {
            format!("No level {} spells left to pick", spell.level)
        });
    }
    Verdict::allow()
}

// ============================================================================
// Reducer
// ============================================================================

/// Apply `action` to `state`. Rejected actions return `state` unchanged.
pub fn reduce(state: &CharacterBuilderState, action: BuilderAction, catalog: &Catalog) -> CharacterBuilderState {
    let verdict = check(state, &action, catalog);
    if !verdict.allowed {
        tracing::debug!(
            ?action,
            reason = verdict.reason.as_deref().unwrap_or_default(),
            "builder action rejected"
        );
        return state.clone();
    }

    let mut next = state.clone();
    match action {
        BuilderAction::AddClass { class_id } => {
            next.classes.push(CharacterClassInfo {
                class_id,
                class_definition_id: None,
                level: 1,
            });
            next.active_class_index = next.classes.len() - 1;
            prune_spells(&mut next, catalog);
        }
        BuilderAction::SetClass { index, class_id } => {
            let info = &mut next.classes[index];
            info.class_id = Some(class_id);
            info.class_definition_id = None;
            prune_spells(&mut next, catalog);
        }
        BuilderAction::SetClassLevel { index, level } => {
            set_class_level(&mut next, index, level, catalog);
            prune_spells(&mut next, catalog);
        }
        BuilderAction::RemoveClass { index } => {
            next.classes.remove(index);
            if index < next.active_class_index {
                next.active_class_index -= 1;
            }
            next.active_class_index = next.active_class_index.min(next.classes.len() - 1);
            prune_spells(&mut next, catalog);
        }
        BuilderAction::SetActiveClass { index } => next.active_class_index = index,
        BuilderAction::AllocateRemaining => {
            let index = next.active_class_index;
            let level = next.classes[index].level + next.remaining_levels();
            set_class_level(&mut next, index, level, catalog);
            prune_spells(&mut next, catalog);
        }
        BuilderAction::SetSubclass { index, subclass } => next.classes[index].class_definition_id = subclass,
        BuilderAction::SetTotalLevel { total_level } => next.total_level = total_level,
        BuilderAction::SetXp { xp } => {
            next.xp = xp;
            let class_id = next.classes.first().and_then(|c| c.class_id.clone());
            let level = level_for_xp(catalog, xp, next.edition, class_id.as_deref());
            next.total_level = level.max(next.allocated_levels()).max(1);
        }
        BuilderAction::SetEdition { edition } => {
            tracing::debug!(from = %next.edition, to = %edition, "switching edition");
            next.edition = edition;
            next.classes = vec![CharacterClassInfo::empty()];
            next.active_class_index = 0;
            next.total_level = next.total_level.min(catalog.max_level(edition)).max(1);
            next.equipment = Default::default();
            next.spells.clear();
            next.proficiencies.skills.clear();
            next.wealth = Wealth::starting(next.wealth.base_gp);
            let keeps_alignment = match (&next.alignment, catalog.edition(edition)) {
                (Some(alignment), Some(meta)) => meta.allows_alignment(alignment),
                _ => true,
            };
            if !keeps_alignment {
                next.alignment = None;
            }
        }
        BuilderAction::ToggleItem { item_id } => {
            let slot = catalog.equipment_item(&item_id).map(|item| item.slot);
            let list = match slot {
                Some(EquipmentSlot::Weapons) => &mut next.equipment.weapons,
                Some(EquipmentSlot::Armor) => &mut next.equipment.armor,
                Some(EquipmentSlot::Gear) | None => &mut next.equipment.gear,
            };
            toggle(list, item_id);
            refresh_purse(&mut next, catalog);
        }
        BuilderAction::ToggleMagicItem { item_id } => toggle(&mut next.equipment.magic_items, item_id),
        BuilderAction::ToggleSpell { spell_id } => toggle(&mut next.spells, spell_id),
        BuilderAction::SetSkills { skills } => {
            next.proficiencies.skills.clear();
            for skill in skills {
                if !next.proficiencies.skills.contains(&skill) {
                    next.proficiencies.skills.push(skill);
                }
            }
        }
        BuilderAction::SetRace { race } => next.race = race,
        BuilderAction::SetAlignment { alignment } => next.alignment = alignment,
        BuilderAction::SetBaseGold { base_gp } => {
            next.wealth.base_gp = base_gp;
            refresh_purse(&mut next, catalog);
        }
    }
    next
}

/// Apply each action in turn.
pub fn reduce_all(
    state: &CharacterBuilderState,
    actions: impl IntoIterator<Item = BuilderAction>,
    catalog: &Catalog,
) -> CharacterBuilderState {
    actions
        .into_iter()
        .fold(state.clone(), |state, action| reduce(&state, action, catalog))
}

fn set_class_level(state: &mut CharacterBuilderState, index: usize, level: u8, catalog: &Catalog) {
    let edition = state.edition;
    let info = &mut state.classes[index];
    info.level = level;
    if let Some(class_id) = info.class_id.as_deref() {
        let unlock = catalog.subclass_unlock_level(class_id, edition);
        if unlock > level && info.class_definition_id.take().is_some() {
            tracing::debug!(class_id, level, unlock, "subclass cleared below unlock level");
        }
    }
}

fn toggle(list: &mut Vec<String>, id: String) {
    match list.iter().position(|existing| *existing == id) {
        Some(pos) => {
            list.remove(pos);
        }
        None => list.push(id),
    }
}

fn refresh_purse(state: &mut CharacterBuilderState, catalog: &Catalog) {
    let mundane = state.equipment.mundane();
    let spent = selection_cost_cp(catalog, &mundane, state.edition);
    state.wealth = Wealth::after_spending(state.wealth.base_gp, spent);
    state.equipment.weight = selection_weight(catalog, &mundane, state.edition);
}

/// Drop selected spells the character can no longer cast.
fn prune_spells(state: &mut CharacterBuilderState, catalog: &Catalog) {
    if state.spells.is_empty() {
        return;
    }
    let available: Vec<&str> = available_spells(catalog, state.edition, &state.classes)
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    state.spells.retain(|id| available.contains(&id.as_str()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static Catalog {
        Catalog::builtin()
    }

    fn fifth(classes: Vec<CharacterClassInfo>, total_level: u8) -> CharacterBuilderState {
        CharacterBuilderState::new(Edition::Fifth)
            .with_classes(classes)
            .with_total_level(total_level)
    }

    #[test]
    fn test_add_class_rejected_without_multiclassing() {
        let state = CharacterBuilderState::new(Edition::Bx)
            .with_classes(vec![CharacterClassInfo::new("fighter", 3)])
            .with_total_level(5);
        let verdict = can_add_class(&state, catalog());
        assert!(!verdict.allowed);
        assert_eq!(verdict.reason.as_deref(), Some("B/X does not allow multiclassing"));

        let next = reduce(&state, BuilderAction::AddClass { class_id: None }, catalog());
        assert_eq!(next, state);
    }

    #[test]
    fn test_add_class() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 3)], 5);
        let next = reduce(&state, BuilderAction::AddClass { class_id: Some("wizard".into()) }, catalog());
        assert_eq!(next.classes.len(), 2);
        assert_eq!(next.classes[1], CharacterClassInfo::new("wizard", 1));
        assert_eq!(next.active_class_index, 1);
        assert_eq!(next.remaining_levels(), 1);
    }

    #[test]
    fn test_add_class_needs_free_levels_and_new_class() {
        let full = fifth(vec![CharacterClassInfo::new("fighter", 5)], 5);
        assert_eq!(
            can_add_class(&full, catalog()).reason.as_deref(),
            Some("No unallocated levels remain")
        );

        let state = fifth(vec![CharacterClassInfo::new("fighter", 2)], 5);
        let dup = BuilderAction::AddClass { class_id: Some("fighter".into()) };
        assert!(!check(&state, &dup, catalog()).allowed);
        let unknown = BuilderAction::AddClass { class_id: Some("artificer".into()) };
        assert!(!check(&state, &unknown, catalog()).allowed);
    }

    #[test]
    fn test_class_cap() {
        let state = CharacterBuilderState::new(Edition::Fourth)
            .with_classes(vec![CharacterClassInfo::new("fighter", 1), CharacterClassInfo::new("rogue", 1)])
            .with_total_level(5);
        assert_eq!(
            can_add_class(&state, catalog()).reason.as_deref(),
            Some("At most 2 classes are allowed")
        );
    }

    #[test]
    fn test_set_class_level_respects_total() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 2), CharacterClassInfo::new("wizard", 1)], 5);
        assert!(can_set_class_level(&state, 0, 4).allowed);
        assert!(!can_set_class_level(&state, 0, 5).allowed);
        assert!(!can_set_class_level(&state, 0, 0).allowed);
        assert!(!can_set_class_level(&state, 7, 1).allowed);

        let next = reduce(&state, BuilderAction::SetClassLevel { index: 0, level: 4 }, catalog());
        assert_eq!(next.classes[0].level, 4);
        assert_eq!(next.remaining_levels(), 0);
    }

    #[test]
    fn test_level_drop_clears_subclass() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 3).with_subclass("champion")], 5);
        let next = reduce(&state, BuilderAction::SetClassLevel { index: 0, level: 2 }, catalog());
        assert_eq!(next.classes[0].class_definition_id, None);

        // raising the level again does not bring it back
        let next = reduce(&next, BuilderAction::SetClassLevel { index: 0, level: 4 }, catalog());
        assert_eq!(next.classes[0].class_definition_id, None);
    }

    #[test]
    fn test_subclass_gated_by_unlock_level() {
        let state = fifth(vec![CharacterClassInfo::new("wizard", 1)], 3);
        let pick = BuilderAction::SetSubclass {
            index: 0,
            subclass: Some("evocation".into()),
        };
        assert_eq!(reduce(&state, pick.clone(), catalog()), state);

        let state = reduce(&state, BuilderAction::SetClassLevel { index: 0, level: 2 }, catalog());
        let next = reduce(&state, pick, catalog());
        assert_eq!(next.classes[0].class_definition_id.as_deref(), Some("evocation"));

        let bogus = BuilderAction::SetSubclass {
            index: 0,
            subclass: Some("pyromancy".into()),
        };
        assert_eq!(reduce(&next, bogus, catalog()), next);
    }

    #[test]
    fn test_fourth_edition_paragon_path() {
        let state = CharacterBuilderState::new(Edition::Fourth)
            .with_classes(vec![CharacterClassInfo::new("fighter", 10)])
            .with_total_level(11);
        let pick = BuilderAction::SetSubclass {
            index: 0,
            subclass: Some("kensei".into()),
        };
        assert_eq!(reduce(&state, pick.clone(), catalog()), state);
        let state = reduce(&state, BuilderAction::AllocateRemaining, catalog());
        assert_eq!(state.classes[0].level, 11);
        let next = reduce(&state, pick, catalog());
        assert_eq!(next.classes[0].class_definition_id.as_deref(), Some("kensei"));
    }

    #[test]
    fn test_remove_class_shifts_active_index() {
        let state = fifth(
            vec![
                CharacterClassInfo::new("fighter", 1),
                CharacterClassInfo::new("rogue", 1),
                CharacterClassInfo::new("wizard", 1),
            ],
            3,
        );
        let state = reduce(&state, BuilderAction::SetActiveClass { index: 2 }, catalog());

        let next = reduce(&state, BuilderAction::RemoveClass { index: 0 }, catalog());
        assert_eq!(next.active_class_index, 1);
        assert_eq!(next.active_class().unwrap().class_id.as_deref(), Some("wizard"));

        let next = reduce(&state, BuilderAction::RemoveClass { index: 2 }, catalog());
        assert_eq!(next.active_class_index, 1);
        assert_eq!(next.active_class().unwrap().class_id.as_deref(), Some("rogue"));
    }

    #[test]
    fn test_cannot_remove_only_class() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 5)], 5);
        assert!(!can_remove_class(&state, 0).allowed);
        assert_eq!(reduce(&state, BuilderAction::RemoveClass { index: 0 }, catalog()), state);
    }

    #[test]
    fn test_allocate_remaining() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 2), CharacterClassInfo::new("cleric", 1)], 6);
        let state = reduce(&state, BuilderAction::SetActiveClass { index: 1 }, catalog());
        let next = reduce(&state, BuilderAction::AllocateRemaining, catalog());
        assert_eq!(next.classes[0].level, 2);
        assert_eq!(next.classes[1].level, 4);
        assert_eq!(next.remaining_levels(), 0);
        assert_eq!(reduce(&next, BuilderAction::AllocateRemaining, catalog()), next);
    }

    #[test]
    fn test_total_level_bounds() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 4)], 4);
        assert_eq!(reduce(&state, BuilderAction::SetTotalLevel { total_level: 3 }, catalog()), state);
        assert_eq!(reduce(&state, BuilderAction::SetTotalLevel { total_level: 21 }, catalog()), state);
        let next = reduce(&state, BuilderAction::SetTotalLevel { total_level: 8 }, catalog());
        assert_eq!(next.remaining_levels(), 4);
    }

    #[test]
    fn test_set_xp_derives_level() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 1)], 1);
        let next = reduce(&state, BuilderAction::SetXp { xp: 6_500 }, catalog());
        assert_eq!(next.total_level, 5);
        assert_eq!(next.xp, 6_500);

        let next = reduce(&next, BuilderAction::AllocateRemaining, catalog());
        let next = reduce(&next, BuilderAction::SetXp { xp: 0 }, catalog());
        assert_eq!(next.total_level, 5);
    }

    #[test]
    fn test_set_xp_uses_class_table() {
        let state = CharacterBuilderState::new(Edition::Second).with_classes(vec![CharacterClassInfo::new("mage", 1)]);
        let next = reduce(&state, BuilderAction::SetXp { xp: 2_400 }, catalog());
        assert_eq!(next.total_level, 1);
        let next = reduce(&state, BuilderAction::SetXp { xp: 2_500 }, catalog());
        assert_eq!(next.total_level, 2);
    }

    #[test]
    fn test_set_edition_starts_over() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 3)], 3)
            .with_base_gold(100)
            .with_alignment("Lawful Good");
        let state = reduce(&state, BuilderAction::ToggleItem { item_id: "longsword".into() }, catalog());
        assert_eq!(state.equipment.weapons, vec!["longsword".to_string()]);

        let next = reduce(&state, BuilderAction::SetEdition { edition: Edition::Bx }, catalog());
        assert_eq!(next.edition, Edition::Bx);
        assert_eq!(next.classes, vec![CharacterClassInfo::empty()]);
        assert!(next.equipment.weapons.is_empty());
        assert_eq!(next.wealth, Wealth::starting(100));
        assert_eq!(next.alignment, None);
        assert_eq!(next.id, state.id);
    }

    #[test]
    fn test_toggle_item_spends_gold() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 1)], 1).with_base_gold(50);
        let next = reduce(&state, BuilderAction::ToggleItem { item_id: "studded-leather".into() }, catalog());
        assert_eq!(next.equipment.armor, vec!["studded-leather".to_string()]);
        assert_eq!(next.wealth.gp, 5);
        assert_eq!(next.equipment.weight, 13.0);

        // 45 + 10 > 50
        let over = reduce(&next, BuilderAction::ToggleItem { item_id: "shield".into() }, catalog());
        assert_eq!(over, next);

        let back = reduce(&next, BuilderAction::ToggleItem { item_id: "studded-leather".into() }, catalog());
        assert!(back.equipment.armor.is_empty());
        assert_eq!(back.wealth, Wealth::starting(50));
    }

    #[test]
    fn test_toggle_item_needs_proficiency() {
        let state = fifth(vec![CharacterClassInfo::new("wizard", 1)], 1).with_base_gold(500);
        assert_eq!(reduce(&state, BuilderAction::ToggleItem { item_id: "plate".into() }, catalog()), state);
        let next = reduce(&state, BuilderAction::ToggleItem { item_id: "dagger".into() }, catalog());
        assert_eq!(next.equipment.weapons, vec!["dagger".to_string()]);
    }

    #[test]
    fn test_base_gold_cannot_drop_below_spending() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 1)], 1).with_base_gold(50);
        let state = reduce(&state, BuilderAction::ToggleItem { item_id: "studded-leather".into() }, catalog());
        assert_eq!(reduce(&state, BuilderAction::SetBaseGold { base_gp: 40 }, catalog()), state);
        let next = reduce(&state, BuilderAction::SetBaseGold { base_gp: 60 }, catalog());
        assert_eq!(next.wealth.gp, 15);
    }

    #[test]
    fn test_toggle_spell_respects_budget() {
        let state = fifth(vec![CharacterClassInfo::new("wizard", 1)], 1);
        let state = reduce(&state, BuilderAction::ToggleSpell { spell_id: "magic-missile".into() }, catalog());
        let state = reduce(&state, BuilderAction::ToggleSpell { spell_id: "shield".into() }, catalog());
        assert_eq!(state.spells.len(), 2);
        // a level 1 wizard cannot learn fireball
        let next = reduce(&state, BuilderAction::ToggleSpell { spell_id: "fireball".into() }, catalog());
        assert_eq!(next, state);
        // a cleric spell is not on the wizard list
        let next = reduce(&state, BuilderAction::ToggleSpell { spell_id: "bless".into() }, catalog());
        assert_eq!(next, state);
    }

    #[test]
    fn test_losing_a_caster_prunes_spells() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 1), CharacterClassInfo::new("cleric", 1)], 2);
        let state = reduce(&state, BuilderAction::ToggleSpell { spell_id: "bless".into() }, catalog());
        assert_eq!(state.spells, vec!["bless".to_string()]);
        let next = reduce(&state, BuilderAction::RemoveClass { index: 1 }, catalog());
        assert!(next.spells.is_empty());
    }

    #[test]
    fn test_skills_and_alignment() {
        let state = fifth(vec![CharacterClassInfo::new("rogue", 1)], 1);
        let skills = |n: usize| BuilderAction::SetSkills {
            skills: (0..n).map(|i| format!("skill-{i}")).collect(),
        };
        assert_eq!(reduce(&state, skills(4), catalog()).proficiencies.skills.len(), 4);
        assert_eq!(reduce(&state, skills(5), catalog()), state);

        let odd = CharacterBuilderState::new(Edition::First);
        assert_eq!(reduce(&odd, skills(1), catalog()), odd);

        let bx = CharacterBuilderState::new(Edition::Bx);
        let lawful = BuilderAction::SetAlignment {
            alignment: Some("Lawful".into()),
        };
        assert_eq!(reduce(&bx, lawful, catalog()).alignment.as_deref(), Some("Lawful"));
        let good = BuilderAction::SetAlignment {
            alignment: Some("Lawful Good".into()),
        };
        assert_eq!(reduce(&bx, good, catalog()), bx);
    }

    #[test]
    fn test_toggle_magic_item() {
        let state = fifth(vec![CharacterClassInfo::new("fighter", 3)], 3);
        let next = reduce(&state, BuilderAction::ToggleMagicItem { item_id: "weapon-plus-one".into() }, catalog());
        assert_eq!(next.equipment.magic_items, vec!["weapon-plus-one".to_string()]);
        // tier 1 allows one permanent item
        let more = reduce(&next, BuilderAction::ToggleMagicItem { item_id: "bag-of-holding".into() }, catalog());
        assert_eq!(more, next);
        let gone = reduce(&next, BuilderAction::ToggleMagicItem { item_id: "weapon-plus-one".into() }, catalog());
        assert!(gone.equipment.magic_items.is_empty());
    }

    #[test]
    fn test_actions_serialize() {
        let action = BuilderAction::SetClassLevel { index: 1, level: 3 };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"SetClassLevel":{"index":1,"level":3}}"#);
        let back: BuilderAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
