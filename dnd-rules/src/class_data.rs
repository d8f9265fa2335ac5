//! Class reference data across editions.
//!
//! Each [`ClassDefinition`] stores its progression in the shape its edition
//! prints it ([`ClassProgression`]); [`ClassDefinition::core`] normalizes it
//! through the class adapters. Proficiency rules, spell columns and subclass
//! gating live alongside so the progression and budget resolvers can work
//! from one record.

use crate::adapters;
use crate::edition::Edition;
use crate::items::EquipmentSlot;
use crate::mechanics::{Ability, AttackProgression, ClassFeature, CoreClassProgression, SpellcastingTier};
use serde::{Deserialize, Serialize};

/// Saving-throw groupings used by the AD&D and Basic lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveGroup {
    Warrior,
    Priest,
    Rogue,
    Wizard,
}

/// THAC0 improves by `points` every `every_levels` levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thac0Advancement {
    pub points: u8,
    pub every_levels: u8,
}

/// A pre-3e class as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicClass {
    pub hit_die: u8,
    pub thac0_advancement: Thac0Advancement,
    /// Explicit attack quality where the THAC0 rate misleads (B/X fighters).
    #[serde(default)]
    pub attack_progression: Option<AttackProgression>,
    pub save_group: SaveGroup,
    /// Level at which the class first casts spells.
    #[serde(default)]
    pub first_spell_level: Option<u8>,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BabProgression {
    Full,
    ThreeQuarter,
    Half,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum D20Save {
    Fortitude,
    Reflex,
    Will,
}

/// A 3e/3.5e base class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct D20Class {
    pub hit_die: u8,
    pub base_attack: BabProgression,
    pub good_saves: Vec<D20Save>,
    #[serde(default)]
    pub first_spell_level: Option<u8>,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FourthRole {
    Defender,
    Striker,
    Leader,
    Controller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSource {
    Martial,
    Arcane,
    Divine,
    Primal,
    Psionic,
    Shadow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefenseBonuses {
    #[serde(default)]
    pub fortitude: i8,
    #[serde(default)]
    pub reflex: i8,
    #[serde(default)]
    pub will: i8,
}

/// A 4e class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourthClass {
    pub role: FourthRole,
    pub power_source: PowerSource,
    pub hit_points_per_level: u8,
    #[serde(default)]
    pub defense_bonuses: DefenseBonuses,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
}

/// A class's progression in its edition's own shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum ClassProgression {
    Classic(ClassicClass),
    D20(D20Class),
    Fourth(FourthClass),
    /// 5e classes are stored directly in normalized form.
    Fifth(CoreClassProgression),
}

/// Wildcard proficiency keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKeyword {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "allArmor")]
    AllArmor,
}

/// Allowed equipment categories: a wildcard or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategorySet {
    Keyword(CategoryKeyword),
    List(Vec<String>),
}

impl Default for CategorySet {
    fn default() -> Self {
        CategorySet::List(Vec::new())
    }
}

impl CategorySet {
    /// Whether `category` is covered in `slot`. `allArmor` covers armor only.
    pub fn contains(&self, slot: EquipmentSlot, category: &str) -> bool {
        match self {
            CategorySet::Keyword(CategoryKeyword::All) => true,
            CategorySet::Keyword(CategoryKeyword::AllArmor) => slot == EquipmentSlot::Armor,
            CategorySet::List(categories) => categories.iter().any(|c| c == category),
        }
    }
}

/// What a class may use in one equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProficiencyRule {
    #[serde(default)]
    pub categories: CategorySet,
    /// Item ids allowed regardless of category.
    #[serde(default)]
    pub items: Vec<String>,
}

impl ProficiencyRule {
    pub fn all() -> Self {
        Self {
            categories: CategorySet::Keyword(CategoryKeyword::All),
            items: Vec::new(),
        }
    }

    pub fn all_armor() -> Self {
        Self {
            categories: CategorySet::Keyword(CategoryKeyword::AllArmor),
            items: Vec::new(),
        }
    }

    pub fn categories(categories: &[&str]) -> Self {
        Self {
            categories: CategorySet::List(categories.iter().map(|c| c.to_string()).collect()),
            items: Vec::new(),
        }
    }

    pub fn items(items: &[&str]) -> Self {
        Self {
            categories: CategorySet::default(),
            items: items.iter().map(|i| i.to_string()).collect(),
        }
    }

    pub fn with_items(mut self, items: &[&str]) -> Self {
        self.items.extend(items.iter().map(|i| i.to_string()));
        self
    }

    /// Whether an item with `item_id` in `category` passes this rule in `slot`.
    pub fn allows(&self, slot: EquipmentSlot, item_id: &str, category: &str) -> bool {
        self.categories.contains(slot, category) || self.items.iter().any(|i| i == item_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassProficiencies {
    #[serde(default)]
    pub weapons: Option<ProficiencyRule>,
    #[serde(default)]
    pub armor: Option<ProficiencyRule>,
}

/// Per-level cantrip and spells-known columns. Index 0 is class level 1.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellColumns {
    #[serde(default)]
    pub cantrips_known: Vec<u32>,
    /// Present only for casters with a fixed list of known spells.
    #[serde(default)]
    pub spells_known: Option<Vec<u32>>,
}

/// Value of a per-level column at `level`, holding the last row past the end.
pub fn column_value(column: &[u32], level: u8) -> u32 {
    if column.is_empty() || level == 0 {
        return 0;
    }
    let index = (level as usize - 1).min(column.len() - 1);
    column[index]
}

/// A class as it exists in one edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    pub edition: Edition,
    pub progression: ClassProgression,
    #[serde(default)]
    pub proficiencies: ClassProficiencies,
    #[serde(default)]
    pub spell_columns: Option<SpellColumns>,
    /// Overrides the edition default from [`subclass_unlock_level`].
    #[serde(default)]
    pub subclass_unlock_level: Option<u8>,
    #[serde(default)]
    pub subclasses: Vec<String>,
}

impl ClassDefinition {
    pub fn new(id: &str, name: &str, edition: Edition, progression: ClassProgression) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            edition,
            progression,
            proficiencies: ClassProficiencies::default(),
            spell_columns: None,
            subclass_unlock_level: None,
            subclasses: Vec::new(),
        }
    }

    pub fn with_proficiencies(mut self, weapons: ProficiencyRule, armor: ProficiencyRule) -> Self {
        self.proficiencies = ClassProficiencies {
            weapons: Some(weapons),
            armor: Some(armor),
        };
        self
    }

    pub fn with_spell_columns(mut self, cantrips: Vec<u32>, known: Option<Vec<u32>>) -> Self {
        self.spell_columns = Some(SpellColumns {
            cantrips_known: cantrips,
            spells_known: known,
        });
        self
    }

    pub fn with_subclasses(mut self, subclasses: &[&str]) -> Self {
        self.subclasses = subclasses.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Normalized progression.
    pub fn core(&self) -> CoreClassProgression {
        let mut core = adapters::class_to_core(&self.progression);
        if let Some(weapons) = &self.proficiencies.weapons {
            core.weapon_proficiencies = proficiency_tags(weapons);
        }
        if let Some(armor) = &self.proficiencies.armor {
            core.armor_proficiencies = proficiency_tags(armor);
        }
        core
    }

    pub fn spellcasting(&self) -> SpellcastingTier {
        adapters::class_to_core(&self.progression).spellcasting
    }

    pub fn unlock_level(&self) -> u8 {
        self.subclass_unlock_level
            .unwrap_or_else(|| subclass_unlock_level(&self.id, self.edition))
    }
}

fn proficiency_tags(rule: &ProficiencyRule) -> Vec<String> {
    let mut tags: Vec<String> = match &rule.categories {
        CategorySet::Keyword(CategoryKeyword::All) => vec!["all".to_string()],
        CategorySet::Keyword(CategoryKeyword::AllArmor) => vec!["allArmor".to_string()],
        CategorySet::List(categories) => categories.clone(),
    };
    tags.extend(rule.items.iter().cloned());
    tags
}

/// Level at which a class may first pick a subclass in `edition`.
///
/// 5e spreads the choice across levels 1-3, 4e defers it to the paragon
/// tier, and every other edition takes kits or specialties at level 1.
pub fn subclass_unlock_level(class_id: &str, edition: Edition) -> u8 {
    match edition {
        Edition::Fifth => match crate::xp::resolve_class_id(class_id) {
            "cleric" | "sorcerer" | "warlock" => 1,
            "druid" | "wizard" => 2,
            _ => 3,
        },
        Edition::Fourth => 11,
        _ => 1,
    }
}

// ============================================================================
// Built-in classes
// ============================================================================

fn feature(level: u8, name: &str, description: &str) -> ClassFeature {
    ClassFeature::new(level, name, description)
}

/// Cantrips known for 5e casters: base through 3rd, +1 at 4th, +2 at 10th.
fn cantrip_column(base: u32) -> Vec<u32> {
    (1..=20u32)
        .map(|level| match level {
            1..=3 => base,
            4..=9 => base + 1,
            _ => base + 2,
        })
        .collect()
}

fn fifth(
    hit_die: u8,
    attack: AttackProgression,
    saves: [Ability; 2],
    spellcasting: SpellcastingTier,
    features: Vec<ClassFeature>,
) -> ClassProgression {
    ClassProgression::Fifth(CoreClassProgression {
        hit_die,
        attack_progression: attack,
        saving_throws: saves.to_vec(),
        spellcasting,
        armor_proficiencies: Vec::new(),
        weapon_proficiencies: Vec::new(),
        features,
    })
}

fn classic(
    hit_die: u8,
    points: u8,
    every_levels: u8,
    save_group: SaveGroup,
    first_spell_level: Option<u8>,
    features: Vec<ClassFeature>,
) -> ClassProgression {
    ClassProgression::Classic(ClassicClass {
        hit_die,
        thac0_advancement: Thac0Advancement {
            points,
            every_levels,
        },
        attack_progression: None,
        save_group,
        first_spell_level,
        features,
    })
}

const SIMPLE_MARTIAL: &[&str] = &["simple", "martial"];
const CASTER_WEAPONS: &[&str] = &["dagger", "dart", "sling", "quarterstaff", "light-crossbow"];
const FINESSE_EXTRAS: &[&str] = &["hand-crossbow", "longsword", "rapier", "shortsword"];

fn fifth_edition_classes() -> Vec<ClassDefinition> {
    use Ability::*;
    use AttackProgression::*;
    use SpellcastingTier as Tier;
    let e = Edition::Fifth;

    vec![
        ClassDefinition::new("barbarian", "Barbarian", e, fifth(12, Good, [Strength, Constitution], Tier::None, vec![
            feature(1, "Rage", "Enter a rage as a bonus action for advantage on Strength checks, bonus damage and resistance to physical damage."),
            feature(1, "Unarmored Defense", "Without armor, AC equals 10 + DEX modifier + CON modifier."),
            feature(2, "Reckless Attack", "Gain advantage on Strength attacks this turn; attacks against you also gain advantage."),
            feature(3, "Primal Path", "Choose a path that shapes the nature of your rage."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(SIMPLE_MARTIAL), ProficiencyRule::categories(&["light", "medium", "shield"]))
        .with_subclasses(&["berserker", "totem-warrior"]),
        ClassDefinition::new("bard", "Bard", e, fifth(8, Average, [Dexterity, Charisma], Tier::Full, vec![
            feature(1, "Bardic Inspiration", "As a bonus action, grant an ally an inspiration die to add to one check, attack or save."),
            feature(1, "Spellcasting", "Cast bard spells using Charisma."),
            feature(3, "Bard College", "Join a college of bards."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["simple"]).with_items(FINESSE_EXTRAS), ProficiencyRule::categories(&["light"]))
        .with_spell_columns(cantrip_column(2), Some(vec![4, 5, 6, 7, 8, 9, 10, 11, 12, 14, 15, 15, 16, 18, 19, 19, 20, 22, 22, 22]))
        .with_subclasses(&["lore", "valor"]),
        ClassDefinition::new("cleric", "Cleric", e, fifth(8, Average, [Wisdom, Charisma], Tier::Full, vec![
            feature(1, "Spellcasting", "Cast cleric spells using Wisdom."),
            feature(1, "Divine Domain", "Choose a domain that grants additional spells and features."),
            feature(2, "Channel Divinity", "Channel divine energy to fuel magical effects."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["simple"]), ProficiencyRule::categories(&["light", "medium", "shield"]))
        .with_spell_columns(cantrip_column(3), None)
        .with_subclasses(&["life", "light", "war"]),
        ClassDefinition::new("druid", "Druid", e, fifth(8, Average, [Intelligence, Wisdom], Tier::Full, vec![
            feature(1, "Druidic", "You know Druidic, the secret language of druids."),
            feature(1, "Spellcasting", "Cast druid spells using Wisdom."),
            feature(2, "Wild Shape", "Magically assume the shape of a beast you have seen."),
            feature(2, "Druid Circle", "Identify with a circle of druids."),
        ]))
        .with_proficiencies(
            ProficiencyRule::items(&["club", "dagger", "dart", "javelin", "mace", "quarterstaff", "scimitar", "sickle", "sling", "spear"]),
            ProficiencyRule::categories(&["light", "medium", "shield"]),
        )
        .with_spell_columns(cantrip_column(2), None)
        .with_subclasses(&["land", "moon"]),
        ClassDefinition::new("fighter", "Fighter", e, fifth(10, Good, [Strength, Constitution], Tier::None, vec![
            feature(1, "Fighting Style", "Adopt a particular style of fighting as your specialty."),
            feature(1, "Second Wind", "As a bonus action, regain 1d10 + fighter level hit points."),
            feature(2, "Action Surge", "Take one additional action on your turn."),
            feature(3, "Martial Archetype", "Choose an archetype that you strive to emulate."),
        ]))
        .with_proficiencies(ProficiencyRule::all(), ProficiencyRule::all_armor())
        .with_subclasses(&["champion", "battle-master", "eldritch-knight"]),
        ClassDefinition::new("monk", "Monk", e, fifth(8, Average, [Strength, Dexterity], Tier::None, vec![
            feature(1, "Unarmored Defense", "Without armor or shield, AC equals 10 + DEX modifier + WIS modifier."),
            feature(1, "Martial Arts", "Use DEX for unarmed strikes and monk weapons."),
            feature(2, "Ki", "Harness ki points to fuel special techniques."),
            feature(3, "Monastic Tradition", "Commit to a monastic tradition."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["simple"]).with_items(&["shortsword"]), ProficiencyRule::default())
        .with_subclasses(&["open-hand", "shadow"]),
        ClassDefinition::new("paladin", "Paladin", e, fifth(10, Good, [Wisdom, Charisma], Tier::Half, vec![
            feature(1, "Divine Sense", "Detect celestials, fiends and undead within 60 feet."),
            feature(1, "Lay on Hands", "Restore hit points from a pool with a touch."),
            feature(2, "Spellcasting", "Cast paladin spells using Charisma."),
            feature(3, "Sacred Oath", "Swear the oath that binds you as a paladin."),
        ]))
        .with_proficiencies(ProficiencyRule::all(), ProficiencyRule::all_armor())
        .with_subclasses(&["devotion", "vengeance"]),
        ClassDefinition::new("ranger", "Ranger", e, fifth(10, Good, [Strength, Dexterity], Tier::Half, vec![
            feature(1, "Favored Enemy", "Advantage on tracking and recalling lore about a chosen enemy type."),
            feature(1, "Natural Explorer", "Benefits when traveling and foraging in a favored terrain."),
            feature(2, "Spellcasting", "Cast ranger spells using Wisdom."),
            feature(3, "Ranger Archetype", "Choose an archetype to emulate."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(SIMPLE_MARTIAL), ProficiencyRule::categories(&["light", "medium", "shield"]))
        .with_spell_columns(Vec::new(), Some(vec![0, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11]))
        .with_subclasses(&["hunter", "beast-master"]),
        ClassDefinition::new("rogue", "Rogue", e, fifth(8, Average, [Dexterity, Intelligence], Tier::None, vec![
            feature(1, "Expertise", "Double proficiency bonus for two chosen skills."),
            feature(1, "Sneak Attack", "Once per turn, deal extra damage with advantage or an adjacent ally."),
            feature(1, "Thieves' Cant", "A secret mix of dialect, jargon and code."),
            feature(2, "Cunning Action", "Dash, Disengage or Hide as a bonus action."),
            feature(3, "Roguish Archetype", "Choose an archetype to emulate."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["simple"]).with_items(FINESSE_EXTRAS), ProficiencyRule::categories(&["light"]))
        .with_subclasses(&["thief", "assassin", "arcane-trickster"]),
        ClassDefinition::new("sorcerer", "Sorcerer", e, fifth(6, Poor, [Constitution, Charisma], Tier::Full, vec![
            feature(1, "Spellcasting", "Cast sorcerer spells using Charisma."),
            feature(1, "Sorcerous Origin", "Choose the source of your innate magical power."),
            feature(2, "Font of Magic", "Tap into sorcery points."),
        ]))
        .with_proficiencies(ProficiencyRule::items(CASTER_WEAPONS), ProficiencyRule::default())
        .with_spell_columns(cantrip_column(4), Some(vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 12, 13, 13, 14, 14, 15, 15, 15, 15]))
        .with_subclasses(&["draconic-bloodline", "wild-magic"]),
        ClassDefinition::new("warlock", "Warlock", e, fifth(8, Average, [Wisdom, Charisma], Tier::Pact, vec![
            feature(1, "Otherworldly Patron", "You have struck a bargain with an otherworldly being."),
            feature(1, "Pact Magic", "Cast warlock spells using Charisma; slots recover on a short rest."),
            feature(2, "Eldritch Invocations", "Learn fragments of forbidden knowledge."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["simple"]), ProficiencyRule::categories(&["light"]))
        .with_spell_columns(cantrip_column(2), Some(vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15]))
        .with_subclasses(&["archfey", "fiend", "great-old-one"]),
        ClassDefinition::new("wizard", "Wizard", e, fifth(6, Poor, [Intelligence, Wisdom], Tier::Full, vec![
            feature(1, "Spellcasting", "Cast wizard spells using Intelligence."),
            feature(1, "Arcane Recovery", "Once per day during a short rest, recover expended spell slots."),
            feature(2, "Arcane Tradition", "Choose an arcane tradition."),
        ]))
        .with_proficiencies(ProficiencyRule::items(CASTER_WEAPONS), ProficiencyRule::default())
        .with_spell_columns(cantrip_column(3), None)
        .with_subclasses(&["abjuration", "evocation", "divination"]),
    ]
}

fn second_edition_classes() -> Vec<ClassDefinition> {
    let e = Edition::Second;
    vec![
        ClassDefinition::new("fighter", "Fighter", e, classic(10, 1, 1, SaveGroup::Warrior, None, vec![
            feature(1, "Weapon Specialization", "Specialize in a single weapon for extra attacks and damage."),
            feature(9, "Followers", "Attract men-at-arms on building a stronghold."),
        ]))
        .with_proficiencies(ProficiencyRule::all(), ProficiencyRule::all_armor()),
        ClassDefinition::new("wizard", "Mage", e, classic(4, 1, 3, SaveGroup::Wizard, Some(1), vec![
            feature(1, "Spellbook", "Record and memorize wizard spells."),
        ]))
        .with_proficiencies(ProficiencyRule::items(&["dagger", "dart", "sling", "quarterstaff"]), ProficiencyRule::default())
        .with_subclasses(&["abjurer", "conjurer", "illusionist", "necromancer"]),
        ClassDefinition::new("cleric", "Cleric", e, classic(8, 2, 3, SaveGroup::Priest, Some(1), vec![
            feature(1, "Turn Undead", "Channel divine power to drive off undead."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["bludgeoning"]), ProficiencyRule::all_armor()),
        ClassDefinition::new("thief", "Thief", e, classic(6, 1, 2, SaveGroup::Rogue, None, vec![
            feature(1, "Thieving Skills", "Pick pockets, open locks, find traps, move silently and more."),
            feature(1, "Backstab", "Multiply damage when striking an unaware foe from behind."),
        ]))
        .with_proficiencies(
            ProficiencyRule::items(&["club", "dagger", "dart", "hand-crossbow", "shortbow", "sling", "longsword", "shortsword", "quarterstaff"]),
            ProficiencyRule::items(&["padded", "leather", "studded-leather"]),
        ),
        ClassDefinition::new("paladin", "Paladin", e, classic(10, 1, 1, SaveGroup::Warrior, Some(9), vec![
            feature(1, "Lay on Hands", "Heal two hit points per level once per day."),
            feature(3, "Turn Undead", "Turn undead as a cleric two levels lower."),
        ]))
        .with_proficiencies(ProficiencyRule::all(), ProficiencyRule::all_armor()),
        ClassDefinition::new("ranger", "Ranger", e, classic(10, 1, 1, SaveGroup::Warrior, Some(8), vec![
            feature(1, "Tracking", "Follow trails as a nonweapon proficiency."),
            feature(1, "Two-Weapon Style", "Fight with two weapons without penalty in light armor."),
        ]))
        .with_proficiencies(ProficiencyRule::all(), ProficiencyRule::all_armor()),
    ]
}

fn first_edition_classes() -> Vec<ClassDefinition> {
    let e = Edition::First;
    vec![
        ClassDefinition::new("fighter", "Fighter", e, classic(10, 2, 2, SaveGroup::Warrior, None, vec![
            feature(1, "Multiple Attacks", "Gain extra attacks per round against creatures under one hit die."),
        ]))
        .with_proficiencies(ProficiencyRule::all(), ProficiencyRule::all_armor()),
        ClassDefinition::new("wizard", "Magic-User", e, classic(4, 2, 5, SaveGroup::Wizard, Some(1), vec![
            feature(1, "Read Magic", "Decipher magical writings."),
        ]))
        .with_proficiencies(ProficiencyRule::items(&["dagger", "dart", "quarterstaff"]), ProficiencyRule::default()),
        ClassDefinition::new("cleric", "Cleric", e, classic(8, 2, 3, SaveGroup::Priest, Some(1), vec![
            feature(1, "Turn Undead", "Drive off or destroy undead."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["bludgeoning"]), ProficiencyRule::all_armor()),
        ClassDefinition::new("thief", "Thief", e, classic(6, 2, 4, SaveGroup::Rogue, None, vec![
            feature(1, "Thief Abilities", "Pick pockets, open locks, remove traps, climb walls."),
        ]))
        .with_proficiencies(
            ProficiencyRule::items(&["club", "dagger", "dart", "sling", "longsword", "shortsword"]),
            ProficiencyRule::items(&["leather"]),
        ),
    ]
}

fn bx_classes() -> Vec<ClassDefinition> {
    let e = Edition::Bx;
    let mut fighter = ClassDefinition::new("fighter", "Fighter", e, classic(8, 2, 3, SaveGroup::Warrior, None, vec![
        feature(9, "Stronghold", "Build a castle and become a baron."),
    ]))
    .with_proficiencies(ProficiencyRule::all(), ProficiencyRule::all_armor());
    if let ClassProgression::Classic(class) = &mut fighter.progression {
        class.attack_progression = Some(AttackProgression::Good);
    }

    vec![
        fighter,
        ClassDefinition::new("wizard", "Magic-User", e, classic(4, 2, 5, SaveGroup::Wizard, Some(1), vec![
            feature(1, "Spellbook", "Begin play with one first-level spell."),
        ]))
        .with_proficiencies(ProficiencyRule::items(&["dagger"]), ProficiencyRule::default()),
        ClassDefinition::new("cleric", "Cleric", e, classic(6, 2, 4, SaveGroup::Priest, Some(2), vec![
            feature(1, "Turn Undead", "Turn undead by level on the clerics vs. undead table."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["bludgeoning"]), ProficiencyRule::all_armor()),
        ClassDefinition::new("thief", "Thief", e, classic(4, 2, 4, SaveGroup::Rogue, None, vec![
            feature(1, "Thief Skills", "Open locks, find traps, pick pockets, move silently, climb sheer surfaces."),
        ]))
        .with_proficiencies(ProficiencyRule::all(), ProficiencyRule::items(&["leather"])),
    ]
}

fn three_five_classes() -> Vec<ClassDefinition> {
    let e = Edition::ThreeFive;
    let d20 = |hit_die, base_attack, good_saves: &[D20Save], first_spell_level, features| {
        ClassProgression::D20(D20Class {
            hit_die,
            base_attack,
            good_saves: good_saves.to_vec(),
            first_spell_level,
            features,
        })
    };
    vec![
        ClassDefinition::new("fighter", "Fighter", e, d20(10, BabProgression::Full, &[D20Save::Fortitude], None, vec![
            feature(1, "Bonus Feat", "Gain a bonus combat feat."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(SIMPLE_MARTIAL), ProficiencyRule::all_armor()),
        ClassDefinition::new("wizard", "Wizard", e, d20(4, BabProgression::Half, &[D20Save::Will], Some(1), vec![
            feature(1, "Scribe Scroll", "Gain Scribe Scroll as a bonus feat."),
            feature(1, "Summon Familiar", "Call a familiar to your side."),
        ]))
        .with_proficiencies(ProficiencyRule::items(&["club", "dagger", "heavy-crossbow", "light-crossbow", "quarterstaff"]), ProficiencyRule::default())
        .with_spell_columns(vec![3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4], None),
        ClassDefinition::new("cleric", "Cleric", e, d20(8, BabProgression::ThreeQuarter, &[D20Save::Fortitude, D20Save::Will], Some(1), vec![
            feature(1, "Turn Undead", "Channel positive energy to turn undead."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["simple"]), ProficiencyRule::categories(&["light", "medium", "shield"]))
        .with_spell_columns(vec![3, 4, 4, 5, 5, 5, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6], None),
        ClassDefinition::new("rogue", "Rogue", e, d20(6, BabProgression::ThreeQuarter, &[D20Save::Reflex], None, vec![
            feature(1, "Sneak Attack", "Deal extra damage to flat-footed or flanked foes."),
            feature(1, "Trapfinding", "Find and disarm magical traps."),
            feature(2, "Evasion", "Take no damage on a successful Reflex save."),
        ]))
        .with_proficiencies(
            ProficiencyRule::categories(&["simple"]).with_items(&["hand-crossbow", "rapier", "sap", "shortbow", "shortsword"]),
            ProficiencyRule::categories(&["light"]),
        ),
        ClassDefinition::new("paladin", "Paladin", e, d20(10, BabProgression::Full, &[D20Save::Fortitude], Some(4), vec![
            feature(1, "Smite Evil", "Add Charisma to attack and level to damage against evil."),
            feature(2, "Lay on Hands", "Heal wounds by touch."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(SIMPLE_MARTIAL), ProficiencyRule::all_armor()),
    ]
}

fn fourth_edition_classes() -> Vec<ClassDefinition> {
    let e = Edition::Fourth;
    let fourth = |role, power_source, hit_points_per_level, defense_bonuses, features| {
        ClassProgression::Fourth(FourthClass {
            role,
            power_source,
            hit_points_per_level,
            defense_bonuses,
            features,
        })
    };
    vec![
        ClassDefinition::new("fighter", "Fighter", e, fourth(FourthRole::Defender, PowerSource::Martial, 6, DefenseBonuses { fortitude: 2, ..Default::default() }, vec![
            feature(1, "Combat Challenge", "Mark every enemy you attack."),
            feature(1, "Combat Superiority", "Add Wisdom to opportunity attacks."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["simple", "military"]), ProficiencyRule::categories(&["cloth", "leather", "hide", "chain", "scale", "light-shield", "heavy-shield"])),
        ClassDefinition::new("wizard", "Wizard", e, fourth(FourthRole::Controller, PowerSource::Arcane, 4, DefenseBonuses { will: 2, ..Default::default() }, vec![
            feature(1, "Arcane Implement Mastery", "Specialize in orbs, staffs or wands."),
            feature(1, "Ritual Casting", "Master and perform rituals."),
        ]))
        .with_proficiencies(ProficiencyRule::items(&["dagger", "quarterstaff"]), ProficiencyRule::categories(&["cloth"])),
        ClassDefinition::new("cleric", "Cleric", e, fourth(FourthRole::Leader, PowerSource::Divine, 5, DefenseBonuses { will: 2, ..Default::default() }, vec![
            feature(1, "Healing Word", "Grant healing as a minor action."),
            feature(1, "Channel Divinity", "Invoke divine power once per encounter."),
        ]))
        .with_proficiencies(ProficiencyRule::categories(&["simple"]), ProficiencyRule::categories(&["cloth", "leather", "hide", "chain"])),
        ClassDefinition::new("rogue", "Rogue", e, fourth(FourthRole::Striker, PowerSource::Martial, 5, DefenseBonuses { reflex: 2, ..Default::default() }, vec![
            feature(1, "Sneak Attack", "Deal extra damage against enemies granting combat advantage."),
            feature(1, "First Strike", "Gain combat advantage against enemies that have not acted."),
        ]))
        .with_proficiencies(
            ProficiencyRule::items(&["dagger", "hand-crossbow", "shortsword", "sling", "shuriken"]),
            ProficiencyRule::categories(&["cloth", "leather"]),
        ),
    ]
}

lazy_static::lazy_static! {
    /// Built-in classes for every edition that ships class data.
    pub static ref CLASSES: Vec<ClassDefinition> = {
        let mut classes = fifth_edition_classes();
        classes.extend(second_edition_classes());
        classes.extend(first_edition_classes());
        classes.extend(bx_classes());
        classes.extend(three_five_classes());
        classes.extend(fourth_edition_classes());
        classes
    };
}
