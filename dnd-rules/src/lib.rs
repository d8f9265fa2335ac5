//! Cross-edition D&D rules engine.
//!
//! This crate provides:
//! - Reference catalogs for every edition from OD&D to 5e
//! - Adapters that normalize monster stat blocks and classes into one core model
//! - Experience tables, multiclassing and subclass rules
//! - Equipment, magic-item and spell-slot budgets
//! - A pure reducer for character creation and level-up
//!
//! Every operation is a pure function over immutable catalog data.
//!
//! # Quick Start
//!
//! ```
//! use dnd_rules::{reduce, BuilderAction, Catalog, CharacterBuilderState, Edition};
//!
//! let catalog = Catalog::builtin();
//! let state = CharacterBuilderState::new(Edition::Fifth);
//! let state = reduce(
//!     &state,
//!     BuilderAction::SetClass { index: 0, class_id: "wizard".into() },
//!     catalog,
//! );
//! let state = reduce(&state, BuilderAction::SetXp { xp: 6_500 }, catalog);
//! assert_eq!(state.total_level, 5);
//! ```

pub mod adapters;
pub mod catalog;
pub mod character_builder;
pub mod class_data;
pub mod dice;
pub mod edition;
pub mod items;
pub mod magic_items;
pub mod mechanics;
pub mod monster;
pub mod progression;
pub mod resolve;
pub mod spells;
pub mod xp;

// Primary public API
pub use catalog::{Catalog, CatalogError, CatalogIssue};
pub use character_builder::{CharacterBuilderState, CharacterClassInfo};
pub use class_data::{subclass_unlock_level, ClassDefinition};
pub use dice::{roll_ability_scores, roll_hit_points, AbilityRollMethod, DiceError, DieType, HitDice};
pub use edition::{Edition, EditionMetadata};
pub use items::{allowed_items, equipment_options, EquipmentItem, EquipmentSlot};
pub use magic_items::{available_magic_items, can_add_magic_item, magic_item_budget, MagicItem, Rarity};
pub use mechanics::{CoreClassProgression, CoreMechanics};
pub use monster::{EditionRule, Monster};
pub use progression::{can_add_class, can_remove_class, can_set_class_level, reduce, BuilderAction, Verdict};
pub use resolve::{resolve_edition_rule, ResolvedRule};
pub use spells::{character_spell_budget, class_spell_budget, is_spell_level_full, SpellBudget};
pub use xp::{level_for_xp, xp_for_level};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Catalog>();
        assert_send_sync::<CharacterBuilderState>();
        assert_send_sync::<BuilderAction>();
        assert_send_sync::<Monster>();
        assert_send_sync::<ResolvedRule>();
    }

    #[test]
    fn test_builtin_catalog_round_trips_through_json() {
        let json = serde_json::to_string(Catalog::builtin()).unwrap();
        let loaded = Catalog::from_json(&json).unwrap();
        assert_eq!(loaded.classes, Catalog::builtin().classes);
        assert_eq!(loaded.spells, Catalog::builtin().spells);
        assert_eq!(loaded.editions.len(), Catalog::builtin().editions.len());
    }
}
