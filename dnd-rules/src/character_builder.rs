//! Character builder session state.
//!
//! A [`CharacterBuilderState`] is created when a character-creation or
//! level-up session starts and is changed only through
//! [`reduce`](crate::progression::reduce). The `with_*` methods exist for
//! seeding a state, e.g. from a saved character.

use crate::edition::Edition;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of a character's classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterClassInfo {
    /// `None` until the player picks a class for this slot.
    #[serde(default)]
    pub class_id: Option<String>,
    /// Chosen subclass, archetype or paragon path.
    #[serde(default)]
    pub class_definition_id: Option<String>,
    pub level: u8,
}

impl CharacterClassInfo {
    pub fn new(class_id: &str, level: u8) -> Self {
        Self {
            class_id: Some(class_id.to_string()),
            class_definition_id: None,
            level: level.max(1),
        }
    }

    /// A slot with no class picked yet, at level 1.
    pub fn empty() -> Self {
        Self {
            class_id: None,
            class_definition_id: None,
            level: 1,
        }
    }

    pub fn with_subclass(mut self, subclass: &str) -> Self {
        self.class_definition_id = Some(subclass.to_string());
        self
    }
}

/// Coins on hand. `base_gp` is the starting purse that mundane purchases
/// are paid from; `gp`, `sp` and `cp` are what remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wealth {
    pub gp: u32,
    pub sp: u32,
    pub cp: u32,
    pub base_gp: u32,
}

impl Wealth {
    /// A full purse of `base_gp`.
    pub fn starting(base_gp: u32) -> Self {
        Self {
            gp: base_gp,
            sp: 0,
            cp: 0,
            base_gp,
        }
    }

    /// What is left of the starting purse after spending `spent_cp`.
    pub fn after_spending(base_gp: u32, spent_cp: u64) -> Self {
        let remaining = (u64::from(base_gp) * 100).saturating_sub(spent_cp);
        Self {
            gp: (remaining / 100) as u32,
            sp: (remaining % 100 / 10) as u32,
            cp: (remaining % 10) as u32,
            base_gp,
        }
    }

    pub fn total_cp(&self) -> u64 {
        u64::from(self.gp) * 100 + u64::from(self.sp) * 10 + u64::from(self.cp)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSelection {
    #[serde(default)]
    pub weapons: Vec<String>,
    #[serde(default)]
    pub armor: Vec<String>,
    #[serde(default)]
    pub gear: Vec<String>,
    #[serde(default)]
    pub magic_items: Vec<String>,
    #[serde(default)]
    pub weight: f32,
}

impl EquipmentSelection {
    /// Every mundane item id, weapons then armor then gear.
    pub fn mundane(&self) -> Vec<String> {
        self.weapons
            .iter()
            .chain(&self.armor)
            .chain(&self.gear)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProficiencySelection {
    #[serde(default)]
    pub skills: Vec<String>,
}

/// In-progress character during creation or level-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterBuilderState {
    pub id: Uuid,
    pub edition: Edition,
    #[serde(default)]
    pub setting: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    pub classes: Vec<CharacterClassInfo>,
    #[serde(default)]
    pub active_class_index: usize,
    pub total_level: u8,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub wealth: Wealth,
    #[serde(default)]
    pub equipment: EquipmentSelection,
    #[serde(default)]
    pub proficiencies: ProficiencySelection,
    /// Selected spell ids.
    #[serde(default)]
    pub spells: Vec<String>,
}

impl CharacterBuilderState {
    /// A fresh level-1 character with one unpicked class slot.
    pub fn new(edition: Edition) -> Self {
        Self {
            id: Uuid::new_v4(),
            edition,
            setting: None,
            race: None,
            classes: vec![CharacterClassInfo::empty()],
            active_class_index: 0,
            total_level: 1,
            xp: 0,
            alignment: None,
            wealth: Wealth::default(),
            equipment: EquipmentSelection::default(),
            proficiencies: ProficiencySelection::default(),
            spells: Vec::new(),
        }
    }

    pub fn with_setting(mut self, setting: &str) -> Self {
        self.setting = Some(setting.to_string());
        self
    }

    pub fn with_race(mut self, race: &str) -> Self {
        self.race = Some(race.to_string());
        self
    }

    /// Replace the class list. `total_level` grows to cover the allocation.
    pub fn with_classes(mut self, classes: Vec<CharacterClassInfo>) -> Self {
        self.classes = classes;
        self.active_class_index = self.active_class_index.min(self.classes.len().saturating_sub(1));
        self.total_level = self.total_level.max(self.allocated_levels());
        self
    }

    pub fn with_total_level(mut self, total_level: u8) -> Self {
        self.total_level = total_level.max(self.allocated_levels()).max(1);
        self
    }

    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp = xp;
        self
    }

    pub fn with_alignment(mut self, alignment: &str) -> Self {
        self.alignment = Some(alignment.to_string());
        self
    }

    pub fn with_base_gold(mut self, base_gp: u32) -> Self {
        self.wealth = Wealth::starting(base_gp);
        self
    }

    /// Levels assigned to classes so far.
    pub fn allocated_levels(&self) -> u8 {
        self.classes
            .iter()
            .map(|c| u32::from(c.level))
            .sum::<u32>()
            .min(u32::from(u8::MAX)) as u8
    }

    pub fn remaining_levels(&self) -> u8 {
        self.total_level.saturating_sub(self.allocated_levels())
    }

    pub fn active_class(&self) -> Option<&CharacterClassInfo> {
        self.classes.get(self.active_class_index)
    }

    /// Ids of the classes picked so far.
    pub fn class_ids(&self) -> Vec<&str> {
        self.classes
            .iter()
            .filter_map(|c| c.class_id.as_deref())
            .collect()
    }
}
