//! Mundane equipment across editions.
//!
//! An [`EquipmentItem`] carries one [`EquipmentData`] row per edition that
//! prints it. Editions without their own equipment chapter read another
//! edition's rows through [`equipment_edition`].

use crate::catalog::Catalog;
use crate::class_data::ClassDefinition;
use crate::edition::Edition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which part of the equipment sheet an item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapons,
    Armor,
    Gear,
}

/// An item's listing in one edition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentData {
    /// Proficiency category, e.g. `"martial"` or `"light"`.
    pub category: String,
    /// Printed price, e.g. `"2 sp"` or `"1,500 gp"`.
    pub cost: String,
    #[serde(default)]
    pub weight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub editions: BTreeMap<Edition, EquipmentData>,
}

impl EquipmentItem {
    pub fn new(id: &str, name: &str, slot: EquipmentSlot) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slot,
            editions: BTreeMap::new(),
        }
    }

    pub fn weapon(id: &str, name: &str) -> Self {
        Self::new(id, name, EquipmentSlot::Weapons)
    }

    pub fn armor(id: &str, name: &str) -> Self {
        Self::new(id, name, EquipmentSlot::Armor)
    }

    pub fn gear(id: &str, name: &str) -> Self {
        Self::new(id, name, EquipmentSlot::Gear)
    }

    pub fn with_data(mut self, edition: Edition, category: &str, cost: &str, weight: f32) -> Self {
        self.editions.insert(
            edition,
            EquipmentData {
                category: category.to_string(),
                cost: cost.to_string(),
                weight,
            },
        );
        self
    }

    /// The row used when playing `edition`, after dataset fallback.
    pub fn data_for(&self, edition: Edition) -> Option<&EquipmentData> {
        self.editions.get(&equipment_edition(edition))
    }

    /// Price in copper for `edition`. Unpriced or unlisted items have none.
    pub fn cost_cp(&self, edition: Edition) -> Option<u64> {
        self.data_for(edition).and_then(|d| parse_cost_cp(&d.cost))
    }
}

/// The edition whose equipment rows an edition reads.
///
/// The Basic line and 1e borrow the 2e lists; 3e borrows 3.5e. Nothing
/// before 3e ever reads 5e rows.
pub fn equipment_edition(edition: Edition) -> Edition {
    match edition {
        Edition::Odnd | Edition::Basic | Edition::Becmi | Edition::Bx | Edition::First => Edition::Second,
        Edition::Third => Edition::ThreeFive,
        other => other,
    }
}

/// Parse a printed price into copper pieces.
///
/// Accepts an amount with optional thousands separators and an optional
/// coin suffix (`cp`, `sp`, `ep`, `gp`, `pp`); a bare number is gold.
pub fn parse_cost_cp(cost: &str) -> Option<u64> {
    let cost = cost.trim().to_lowercase();
    let split = cost
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .unwrap_or(cost.len());
    let (amount, unit) = cost.split_at(split);
    let amount: f64 = amount.replace(',', "").parse().ok()?;
    let per_unit = match unit.trim() {
        "cp" => 1.0,
        "sp" => 10.0,
        "ep" => 50.0,
        "" | "gp" => 100.0,
        "pp" => 1000.0,
        _ => return None,
    };
    Some((amount * per_unit).round() as u64)
}

fn proficiency_allows(class: &ClassDefinition, item: &EquipmentItem, data: &EquipmentData) -> bool {
    let rule = match item.slot {
        EquipmentSlot::Gear => return true,
        EquipmentSlot::Weapons => class.proficiencies.weapons.as_ref(),
        EquipmentSlot::Armor => class.proficiencies.armor.as_ref(),
    };
    rule.is_some_and(|rule| rule.allows(item.slot, &item.id, &data.category))
}

/// Items in `slot` that `class` may take when playing `edition`.
pub fn allowed_items<'a>(
    catalog: &'a Catalog,
    class: &ClassDefinition,
    slot: EquipmentSlot,
    edition: Edition,
) -> Vec<&'a EquipmentItem> {
    allowed_items_for_classes(catalog, &[class], slot, edition)
}

/// Items in `slot` that any of `classes` may take, in catalog order.
pub fn allowed_items_for_classes<'a>(
    catalog: &'a Catalog,
    classes: &[&ClassDefinition],
    slot: EquipmentSlot,
    edition: Edition,
) -> Vec<&'a EquipmentItem> {
    catalog
        .equipment
        .iter()
        .filter(|item| item.slot == slot)
        .filter(|item| match item.data_for(edition) {
            Some(data) => classes.iter().any(|class| proficiency_allows(class, item, data)),
            None => false,
        })
        .collect()
}

/// Total price of the selected item ids, in copper. Unknown ids cost nothing.
pub fn selection_cost_cp(catalog: &Catalog, selected: &[String], edition: Edition) -> u64 {
    selected
        .iter()
        .filter_map(|id| catalog.equipment_item(id))
        .filter_map(|item| item.cost_cp(edition))
        .sum()
}

/// Total weight of the selected item ids.
pub fn selection_weight(catalog: &Catalog, selected: &[String], edition: Edition) -> f32 {
    selected
        .iter()
        .filter_map(|id| catalog.equipment_item(id))
        .filter_map(|item| item.data_for(edition))
        .map(|data| data.weight)
        .sum()
}

/// One row of the purchase list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentOption<'a> {
    pub item: &'a EquipmentItem,
    pub cost_cp: u64,
    pub selected: bool,
    /// Buying this item would overspend the starting gold.
    pub disabled: bool,
}

/// Mark which of `items` can still be afforded from `base_gp`.
///
/// A selected item's own price is left out of the running total when
/// judging it, so selected items always stay toggleable.
pub fn equipment_options<'a>(
    items: &[&'a EquipmentItem],
    selected: &[String],
    base_gp: u32,
    edition: Edition,
) -> Vec<EquipmentOption<'a>> {
    let budget_cp = u64::from(base_gp) * 100;
    let total_cp: u64 = items
        .iter()
        .filter(|item| selected.contains(&item.id))
        .filter_map(|item| item.cost_cp(edition))
        .sum();

    items
        .iter()
        .map(|item| {
            let cost_cp = item.cost_cp(edition).unwrap_or(0);
            let is_selected = selected.contains(&item.id);
            let cost_without = if is_selected {
                total_cp.saturating_sub(cost_cp)
            } else {
                total_cp
            };
            EquipmentOption {
                item,
                cost_cp,
                selected: is_selected,
                disabled: !is_selected && cost_without + cost_cp > budget_cp,
            }
        })
        .collect()
}

// ============================================================================
// Built-in equipment
// ============================================================================

lazy_static::lazy_static! {
    /// Weapons, armor and adventuring gear for 2e, 3.5e, 4e and 5e.
    pub static ref EQUIPMENT: Vec<EquipmentItem> = {
        use Edition::{Fifth, Fourth, Second, ThreeFive};
        vec![
            // Weapons
            EquipmentItem::weapon("club", "Club")
                .with_data(Fifth, "simple", "1 sp", 2.0)
                .with_data(Second, "bludgeoning", "0 cp", 3.0)
                .with_data(ThreeFive, "simple", "0 gp", 3.0)
                .with_data(Fourth, "simple", "1 gp", 3.0),
            EquipmentItem::weapon("dagger", "Dagger")
                .with_data(Fifth, "simple", "2 gp", 1.0)
                .with_data(Second, "piercing", "2 gp", 1.0)
                .with_data(ThreeFive, "simple", "2 gp", 1.0)
                .with_data(Fourth, "simple", "1 gp", 1.0),
            EquipmentItem::weapon("dart", "Dart")
                .with_data(Fifth, "simple", "5 cp", 0.25)
                .with_data(Second, "piercing", "5 sp", 0.5)
                .with_data(ThreeFive, "simple", "5 sp", 0.5),
            EquipmentItem::weapon("sling", "Sling")
                .with_data(Fifth, "simple", "1 sp", 0.0)
                .with_data(Second, "bludgeoning", "5 cp", 0.0)
                .with_data(ThreeFive, "simple", "0 gp", 0.0)
                .with_data(Fourth, "simple", "1 gp", 0.0),
            EquipmentItem::weapon("quarterstaff", "Quarterstaff")
                .with_data(Fifth, "simple", "2 sp", 4.0)
                .with_data(Second, "bludgeoning", "0 cp", 4.0)
                .with_data(ThreeFive, "simple", "0 gp", 4.0)
                .with_data(Fourth, "simple", "5 gp", 4.0),
            EquipmentItem::weapon("mace", "Mace")
                .with_data(Fifth, "simple", "5 gp", 4.0)
                .with_data(Second, "bludgeoning", "8 gp", 10.0)
                .with_data(ThreeFive, "simple", "12 gp", 8.0)
                .with_data(Fourth, "simple", "5 gp", 6.0),
            EquipmentItem::weapon("spear", "Spear")
                .with_data(Fifth, "simple", "1 gp", 3.0)
                .with_data(Second, "piercing", "8 sp", 5.0)
                .with_data(ThreeFive, "simple", "2 gp", 6.0)
                .with_data(Fourth, "simple", "5 gp", 6.0),
            EquipmentItem::weapon("javelin", "Javelin")
                .with_data(Fifth, "simple", "5 sp", 2.0)
                .with_data(Second, "piercing", "5 sp", 2.0)
                .with_data(ThreeFive, "simple", "1 gp", 2.0)
                .with_data(Fourth, "simple", "5 gp", 2.0),
            EquipmentItem::weapon("sickle", "Sickle")
                .with_data(Fifth, "simple", "1 gp", 2.0)
                .with_data(ThreeFive, "simple", "6 gp", 2.0)
                .with_data(Fourth, "simple", "2 gp", 2.0),
            EquipmentItem::weapon("light-crossbow", "Light Crossbow")
                .with_data(Fifth, "simple", "25 gp", 5.0)
                .with_data(Second, "piercing", "35 gp", 7.0)
                .with_data(ThreeFive, "simple", "35 gp", 4.0),
            EquipmentItem::weapon("heavy-crossbow", "Heavy Crossbow")
                .with_data(Fifth, "martial", "50 gp", 18.0)
                .with_data(Second, "piercing", "50 gp", 14.0)
                .with_data(ThreeFive, "simple", "50 gp", 8.0),
            EquipmentItem::weapon("hand-crossbow", "Hand Crossbow")
                .with_data(Fifth, "martial", "75 gp", 3.0)
                .with_data(Second, "piercing", "300 gp", 3.0)
                .with_data(ThreeFive, "exotic", "100 gp", 2.0)
                .with_data(Fourth, "simple", "25 gp", 2.0),
            EquipmentItem::weapon("shortbow", "Shortbow")
                .with_data(Fifth, "simple", "25 gp", 2.0)
                .with_data(Second, "piercing", "30 gp", 2.0)
                .with_data(ThreeFive, "martial", "30 gp", 2.0)
                .with_data(Fourth, "military", "25 gp", 2.0),
            EquipmentItem::weapon("longbow", "Longbow")
                .with_data(Fifth, "martial", "50 gp", 2.0)
                .with_data(Second, "piercing", "75 gp", 3.0)
                .with_data(ThreeFive, "martial", "75 gp", 3.0)
                .with_data(Fourth, "military", "30 gp", 3.0),
            EquipmentItem::weapon("longsword", "Longsword")
                .with_data(Fifth, "martial", "15 gp", 3.0)
                .with_data(Second, "slashing", "15 gp", 4.0)
                .with_data(ThreeFive, "martial", "15 gp", 4.0)
                .with_data(Fourth, "military", "15 gp", 4.0),
            EquipmentItem::weapon("shortsword", "Shortsword")
                .with_data(Fifth, "martial", "10 gp", 2.0)
                .with_data(Second, "piercing", "10 gp", 3.0)
                .with_data(ThreeFive, "martial", "10 gp", 2.0)
                .with_data(Fourth, "military", "10 gp", 2.0),
            EquipmentItem::weapon("rapier", "Rapier")
                .with_data(Fifth, "martial", "25 gp", 2.0)
                .with_data(ThreeFive, "martial", "20 gp", 2.0)
                .with_data(Fourth, "military", "25 gp", 2.0),
            EquipmentItem::weapon("scimitar", "Scimitar")
                .with_data(Fifth, "martial", "25 gp", 3.0)
                .with_data(Second, "slashing", "15 gp", 4.0)
                .with_data(ThreeFive, "martial", "15 gp", 4.0)
                .with_data(Fourth, "military", "10 gp", 4.0),
            EquipmentItem::weapon("battleaxe", "Battleaxe")
                .with_data(Fifth, "martial", "10 gp", 4.0)
                .with_data(Second, "slashing", "5 gp", 7.0)
                .with_data(ThreeFive, "martial", "10 gp", 6.0)
                .with_data(Fourth, "military", "15 gp", 6.0),
            EquipmentItem::weapon("warhammer", "Warhammer")
                .with_data(Fifth, "martial", "15 gp", 2.0)
                .with_data(Second, "bludgeoning", "2 gp", 6.0)
                .with_data(ThreeFive, "martial", "12 gp", 5.0)
                .with_data(Fourth, "military", "15 gp", 5.0),
            EquipmentItem::weapon("greatsword", "Greatsword")
                .with_data(Fifth, "martial", "50 gp", 6.0)
                .with_data(Second, "slashing", "50 gp", 15.0)
                .with_data(ThreeFive, "martial", "50 gp", 8.0)
                .with_data(Fourth, "military", "30 gp", 8.0),
            EquipmentItem::weapon("sap", "Sap")
                .with_data(ThreeFive, "martial", "1 gp", 2.0),
            EquipmentItem::weapon("shuriken", "Shuriken")
                .with_data(ThreeFive, "exotic", "1 gp", 0.5)
                .with_data(Fourth, "military", "1 gp", 0.5),

            // Armor
            EquipmentItem::armor("cloth", "Cloth Armor")
                .with_data(Fourth, "cloth", "1 gp", 4.0),
            EquipmentItem::armor("padded", "Padded Armor")
                .with_data(Fifth, "light", "5 gp", 8.0)
                .with_data(Second, "light", "4 gp", 10.0)
                .with_data(ThreeFive, "light", "5 gp", 10.0),
            EquipmentItem::armor("leather", "Leather Armor")
                .with_data(Fifth, "light", "10 gp", 10.0)
                .with_data(Second, "light", "5 gp", 15.0)
                .with_data(ThreeFive, "light", "10 gp", 15.0)
                .with_data(Fourth, "leather", "25 gp", 15.0),
            EquipmentItem::armor("studded-leather", "Studded Leather")
                .with_data(Fifth, "light", "45 gp", 13.0)
                .with_data(Second, "light", "20 gp", 25.0)
                .with_data(ThreeFive, "light", "25 gp", 20.0),
            EquipmentItem::armor("hide", "Hide Armor")
                .with_data(Fifth, "medium", "10 gp", 12.0)
                .with_data(Second, "medium", "15 gp", 30.0)
                .with_data(ThreeFive, "medium", "15 gp", 25.0)
                .with_data(Fourth, "hide", "30 gp", 25.0),
            EquipmentItem::armor("chain-shirt", "Chain Shirt")
                .with_data(Fifth, "medium", "50 gp", 20.0)
                .with_data(ThreeFive, "light", "100 gp", 25.0),
            EquipmentItem::armor("scale-mail", "Scale Mail")
                .with_data(Fifth, "medium", "50 gp", 45.0)
                .with_data(Second, "medium", "120 gp", 40.0)
                .with_data(ThreeFive, "medium", "50 gp", 30.0)
                .with_data(Fourth, "scale", "45 gp", 45.0),
            EquipmentItem::armor("chain-mail", "Chain Mail")
                .with_data(Fifth, "heavy", "75 gp", 55.0)
                .with_data(Second, "medium", "75 gp", 40.0)
                .with_data(ThreeFive, "medium", "150 gp", 40.0)
                .with_data(Fourth, "chain", "40 gp", 40.0),
            EquipmentItem::armor("plate", "Plate Armor")
                .with_data(Fifth, "heavy", "1,500 gp", 65.0)
                .with_data(Second, "heavy", "600 gp", 50.0)
                .with_data(ThreeFive, "heavy", "1,500 gp", 50.0)
                .with_data(Fourth, "plate", "50 gp", 50.0),
            EquipmentItem::armor("shield", "Shield")
                .with_data(Fifth, "shield", "10 gp", 6.0)
                .with_data(Second, "shield", "7 gp", 10.0)
                .with_data(ThreeFive, "shield", "7 gp", 10.0)
                .with_data(Fourth, "heavy-shield", "10 gp", 15.0),
            EquipmentItem::armor("light-shield", "Light Shield")
                .with_data(Fourth, "light-shield", "5 gp", 6.0),

            // Adventuring gear
            EquipmentItem::gear("backpack", "Backpack")
                .with_data(Fifth, "gear", "2 gp", 5.0)
                .with_data(Second, "gear", "2 gp", 2.0)
                .with_data(ThreeFive, "gear", "2 gp", 2.0)
                .with_data(Fourth, "gear", "2 gp", 2.0),
            EquipmentItem::gear("rope", "Rope, hempen (50 feet)")
                .with_data(Fifth, "gear", "1 gp", 10.0)
                .with_data(Second, "gear", "1 gp", 20.0)
                .with_data(ThreeFive, "gear", "1 gp", 10.0)
                .with_data(Fourth, "gear", "1 gp", 10.0),
            EquipmentItem::gear("torch", "Torch")
                .with_data(Fifth, "gear", "1 cp", 1.0)
                .with_data(Second, "gear", "1 cp", 1.0)
                .with_data(ThreeFive, "gear", "1 cp", 1.0)
                .with_data(Fourth, "gear", "1 cp", 1.0),
            EquipmentItem::gear("rations", "Rations (1 week)")
                .with_data(Fifth, "gear", "3 gp", 14.0)
                .with_data(Second, "gear", "5 gp", 20.0)
                .with_data(ThreeFive, "gear", "3 gp", 7.0)
                .with_data(Fourth, "gear", "5 gp", 7.0),
            EquipmentItem::gear("thieves-tools", "Thieves' Tools")
                .with_data(Fifth, "tool", "25 gp", 1.0)
                .with_data(Second, "tool", "30 gp", 1.0)
                .with_data(ThreeFive, "tool", "30 gp", 1.0)
                .with_data(Fourth, "tool", "20 gp", 1.0),
            EquipmentItem::gear("spellbook", "Spellbook")
                .with_data(Fifth, "gear", "50 gp", 3.0)
                .with_data(Second, "gear", "50 gp", 3.0)
                .with_data(ThreeFive, "gear", "15 gp", 3.0),
            EquipmentItem::gear("holy-symbol", "Holy Symbol")
                .with_data(Fifth, "focus", "5 gp", 1.0)
                .with_data(Second, "focus", "25 gp", 0.0)
                .with_data(ThreeFive, "focus", "1 gp", 0.0)
                .with_data(Fourth, "focus", "10 gp", 0.0),
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: &str, edition: Edition) -> &'static ClassDefinition {
        Catalog::builtin().class(id, edition).unwrap()
    }

    fn ids(items: &[&EquipmentItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost_cp("2 sp"), Some(20));
        assert_eq!(parse_cost_cp("1,500 gp"), Some(150_000));
        assert_eq!(parse_cost_cp("5 cp"), Some(5));
        assert_eq!(parse_cost_cp("1 pp"), Some(1000));
        assert_eq!(parse_cost_cp("12"), Some(1200));
        assert_eq!(parse_cost_cp("0.5 gp"), Some(50));
        assert_eq!(parse_cost_cp("10GP"), Some(1000));
        assert_eq!(parse_cost_cp("priceless"), None);
        assert_eq!(parse_cost_cp("3 bananas"), None);
        assert_eq!(parse_cost_cp(""), None);
    }

    #[test]
    fn test_pre_third_editions_read_second_edition_data() {
        for edition in [Edition::Odnd, Edition::Basic, Edition::Becmi, Edition::Bx, Edition::First] {
            assert_eq!(equipment_edition(edition), Edition::Second);
        }
        assert_eq!(equipment_edition(Edition::Third), Edition::ThreeFive);
        assert_eq!(equipment_edition(Edition::Fifth), Edition::Fifth);

        let rapier = EQUIPMENT.iter().find(|i| i.id == "rapier").unwrap();
        assert!(rapier.data_for(Edition::Fifth).is_some());
        assert!(rapier.data_for(Edition::First).is_none());
    }

    #[test]
    fn test_wizard_weapons_are_explicit_items() {
        let allowed = allowed_items(Catalog::builtin(), class("wizard", Edition::Fifth), EquipmentSlot::Weapons, Edition::Fifth);
        assert_eq!(
            ids(&allowed),
            vec!["dagger", "dart", "sling", "quarterstaff", "light-crossbow"]
        );
    }

    #[test]
    fn test_class_without_armor_entry_allows_nothing() {
        let wizard = class("wizard", Edition::Fifth);
        assert!(allowed_items(Catalog::builtin(), wizard, EquipmentSlot::Armor, Edition::Fifth).is_empty());

        let mut bare = wizard.clone();
        bare.proficiencies.weapons = None;
        assert!(allowed_items(Catalog::builtin(), &bare, EquipmentSlot::Weapons, Edition::Fifth).is_empty());
    }

    #[test]
    fn test_gear_needs_no_proficiency() {
        let wizard = class("wizard", Edition::Fifth);
        let gear = allowed_items(Catalog::builtin(), wizard, EquipmentSlot::Gear, Edition::Fifth);
        assert!(gear.iter().any(|i| i.id == "thieves-tools"));
    }

    #[test]
    fn test_first_edition_cleric_uses_second_edition_categories() {
        let cleric = class("cleric", Edition::First);
        let allowed = allowed_items(Catalog::builtin(), cleric, EquipmentSlot::Weapons, Edition::First);
        assert!(allowed.iter().any(|i| i.id == "mace"));
        assert!(!allowed.iter().any(|i| i.id == "longsword"));
        // 5e-only rows never leak into a 1e list
        assert!(!allowed.iter().any(|i| i.id == "sickle"));
    }

    #[test]
    fn test_multiclass_union() {
        let wizard = class("wizard", Edition::Fifth);
        let rogue = class("rogue", Edition::Fifth);
        let union = allowed_items_for_classes(Catalog::builtin(), &[wizard, rogue], EquipmentSlot::Weapons, Edition::Fifth);
        assert!(union.iter().any(|i| i.id == "rapier"));
        assert!(union.iter().any(|i| i.id == "dart"));
        assert!(!union.iter().any(|i| i.id == "greatsword"));
    }

    #[test]
    fn test_gold_budget_keeps_selected_items_toggleable() {
        let big = EquipmentItem::gear("big", "Big").with_data(Edition::Fifth, "gear", "45 gp", 1.0);
        let small = EquipmentItem::gear("small", "Small").with_data(Edition::Fifth, "gear", "10 gp", 1.0);
        let cheap = EquipmentItem::gear("cheap", "Cheap").with_data(Edition::Fifth, "gear", "5 gp", 1.0);
        let items = [&big, &small, &cheap];

        let options = equipment_options(&items, &["big".to_string()], 50, Edition::Fifth);
        assert!(options[0].selected && !options[0].disabled);
        assert!(options[1].disabled);
        assert!(!options[2].disabled);

        let options = equipment_options(&items, &[], 50, Edition::Fifth);
        assert!(options.iter().all(|o| !o.disabled));
    }

    #[test]
    fn test_selection_totals() {
        let selected = vec!["longsword".to_string(), "shield".to_string(), "missing".to_string()];
        assert_eq!(selection_cost_cp(Catalog::builtin(), &selected, Edition::Fifth), 2500);
        assert_eq!(selection_weight(Catalog::builtin(), &selected, Edition::Fifth), 9.0);
    }
}
