//! Magic-item budgets by edition and level.
//!
//! An edition opts into a magic-item economy by carrying a
//! [`MagicItemBudget`] in its metadata. Each tier covers a level range and
//! says how many items a character may hold. Which items are eligible is
//! gated differently per edition: 5e by rarity, 4e by item level, and the
//! d20 editions by market price.

use crate::catalog::Catalog;
use crate::edition::Edition;
use crate::items::parse_cost_cp;
use crate::progression::Verdict;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 5e item rarity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    Legendary,
    Artifact,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::VeryRare => "Very Rare",
            Rarity::Legendary => "Legendary",
            Rarity::Artifact => "Artifact",
        }
    }
}

/// Inclusive character-level range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: u8,
    pub max: u8,
}

impl LevelRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, level: u8) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicItemTier {
    pub level_range: LevelRange,
    pub permanent_items: u32,
    pub consumable_items: u32,
    #[serde(default)]
    pub max_rarity: Option<Rarity>,
    #[serde(default)]
    pub max_attunement: Option<u32>,
    #[serde(default)]
    pub max_item_value_gp: Option<u64>,
}

impl MagicItemTier {
    pub fn new(min: u8, max: u8, permanent_items: u32, consumable_items: u32) -> Self {
        Self {
            level_range: LevelRange::new(min, max),
            permanent_items,
            consumable_items,
            max_rarity: None,
            max_attunement: None,
            max_item_value_gp: None,
        }
    }

    pub fn with_max_rarity(mut self, rarity: Rarity) -> Self {
        self.max_rarity = Some(rarity);
        self
    }

    pub fn with_max_attunement(mut self, slots: u32) -> Self {
        self.max_attunement = Some(slots);
        self
    }

    pub fn with_max_item_value_gp(mut self, gp: u64) -> Self {
        self.max_item_value_gp = Some(gp);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicItemBudget {
    pub tiers: Vec<MagicItemTier>,
    /// Attunement limit for tiers that do not set their own.
    #[serde(default)]
    pub max_attunement: Option<u32>,
}

impl MagicItemBudget {
    pub fn new(tiers: Vec<MagicItemTier>) -> Self {
        Self {
            tiers,
            max_attunement: None,
        }
    }

    pub fn with_max_attunement(mut self, slots: u32) -> Self {
        self.max_attunement = Some(slots);
        self
    }

    /// First tier whose range covers `level`.
    pub fn tier_for(&self, level: u8) -> Option<&MagicItemTier> {
        self.tiers.iter().find(|t| t.level_range.contains(level))
    }

    pub fn attunement_limit(&self, tier: &MagicItemTier) -> Option<u32> {
        tier.max_attunement.or(self.max_attunement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagicItemKind {
    Permanent,
    Consumable,
}

impl MagicItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            MagicItemKind::Permanent => "permanent",
            MagicItemKind::Consumable => "consumable",
        }
    }
}

/// A magic item's listing in one edition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicItemData {
    #[serde(default)]
    pub rarity: Option<Rarity>,
    /// 4e item level.
    #[serde(default)]
    pub enhancement_level: Option<u8>,
    /// Market price, e.g. `"2,315 gp"`.
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub requires_attunement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicItem {
    pub id: String,
    pub name: String,
    pub kind: MagicItemKind,
    #[serde(default)]
    pub editions: BTreeMap<Edition, MagicItemData>,
}

impl MagicItem {
    pub fn new(id: &str, name: &str, kind: MagicItemKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            editions: BTreeMap::new(),
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity, requires_attunement: bool) -> Self {
        let data = self.editions.entry(Edition::Fifth).or_default();
        data.rarity = Some(rarity);
        data.requires_attunement = requires_attunement;
        self
    }

    pub fn with_item_level(mut self, level: u8) -> Self {
        self.editions.entry(Edition::Fourth).or_default().enhancement_level = Some(level);
        self
    }

    pub fn with_price(mut self, edition: Edition, cost: &str) -> Self {
        self.editions.entry(edition).or_default().cost = Some(cost.to_string());
        self
    }

    pub fn data_for(&self, edition: Edition) -> Option<&MagicItemData> {
        self.editions.get(&edition)
    }

    pub fn requires_attunement(&self, edition: Edition) -> bool {
        self.data_for(edition).is_some_and(|d| d.requires_attunement)
    }
}

/// The budget tier for `level` in `edition`, if the edition has an economy.
pub fn magic_item_budget(catalog: &Catalog, edition: Edition, level: u8) -> Option<&MagicItemTier> {
    catalog
        .edition(edition)?
        .magic_item_budget
        .as_ref()?
        .tier_for(level)
}

fn passes_gate(data: &MagicItemData, tier: &MagicItemTier, edition: Edition, level: u8) -> bool {
    match edition {
        Edition::Fifth => match tier.max_rarity {
            Some(max) => data.rarity.unwrap_or(Rarity::Common) <= max,
            None => true,
        },
        Edition::Fourth => data.enhancement_level.unwrap_or(1) <= level,
        Edition::Third | Edition::ThreeFive => match tier.max_item_value_gp {
            Some(max_gp) => data
                .cost
                .as_deref()
                .and_then(parse_cost_cp)
                .is_some_and(|cp| cp <= max_gp.saturating_mul(100)),
            None => true,
        },
        _ => true,
    }
}

/// Magic items a character of `level` may pick in `edition`.
///
/// Editions without a budget, or levels outside every tier, get nothing.
pub fn available_magic_items(catalog: &Catalog, edition: Edition, level: u8) -> Vec<&MagicItem> {
    let Some(tier) = magic_item_budget(catalog, edition, level) else {
        tracing::trace!(%edition, level, "no magic-item budget");
        return Vec::new();
    };
    catalog
        .magic_items
        .iter()
        .filter(|item| {
            item.data_for(edition)
                .is_some_and(|data| passes_gate(data, tier, edition, level))
        })
        .collect()
}

/// Whether `item_id` can join the `selected` magic items.
pub fn can_add_magic_item(
    catalog: &Catalog,
    edition: Edition,
    level: u8,
    selected: &[String],
    item_id: &str,
) -> Verdict {
    let Some(budget) = catalog
        .edition(edition)
        .and_then(|meta| meta.magic_item_budget.as_ref())
    else {
        return Verdict::deny(format!("{} has no magic-item budget", edition.name()));
    };
    let Some(tier) = budget.tier_for(level) else {
        return Verdict::deny(format!("No magic-item tier covers level {level}"));
    };
    if selected.iter().any(|id| id == item_id) {
        return Verdict::deny("Item is already selected");
    }
    let Some(item) = available_magic_items(catalog, edition, level)
        .into_iter()
        .find(|i| i.id == item_id)
    else {
        return Verdict::deny("Item is not available at this level");
    };

    let held: Vec<&MagicItem> = selected
        .iter()
        .filter_map(|id| catalog.magic_item(id))
        .collect();
    let (limit, count) = match item.kind {
        MagicItemKind::Permanent => (
            tier.permanent_items,
            held.iter().filter(|i| i.kind == MagicItemKind::Permanent).count(),
        ),
        MagicItemKind::Consumable => (
            tier.consumable_items,
            held.iter().filter(|i| i.kind == MagicItemKind::Consumable).count(),
        ),
    };
    if count as u32 >= limit {
        return Verdict::deny(format!("Tier allows {limit} {} items", item.kind.name()));
    }

    if item.requires_attunement(edition) {
        if let Some(slots) = budget.attunement_limit(tier) {
            let attuned = held.iter().filter(|i| i.requires_attunement(edition)).count();
            if attuned as u32 >= slots {
                return Verdict::deny(format!("All {slots} attunement slots are used"));
            }
        }
    }

    Verdict::allow()
}

// ============================================================================
// Built-in budgets and items
// ============================================================================

/// 5e: rarity unlocks by tier of play, three attunement slots.
pub fn fifth_edition_budget() -> MagicItemBudget {
    MagicItemBudget::new(vec![
        MagicItemTier::new(1, 4, 1, 2).with_max_rarity(Rarity::Uncommon),
        MagicItemTier::new(5, 10, 3, 6).with_max_rarity(Rarity::Rare),
        MagicItemTier::new(11, 16, 6, 10).with_max_rarity(Rarity::VeryRare),
        MagicItemTier::new(17, 20, 9, 15).with_max_rarity(Rarity::Legendary),
    ])
    .with_max_attunement(3)
}

/// 4e: heroic, paragon and epic tiers. Item level gates eligibility.
pub fn fourth_edition_budget() -> MagicItemBudget {
    MagicItemBudget::new(vec![
        MagicItemTier::new(1, 10, 3, 2),
        MagicItemTier::new(11, 20, 4, 3),
        MagicItemTier::new(21, 30, 5, 4),
    ])
}

/// 3e/3.5e: price ceilings loosely following wealth by level.
pub fn d20_budget() -> MagicItemBudget {
    MagicItemBudget::new(vec![
        MagicItemTier::new(1, 3, 1, 3).with_max_item_value_gp(1_000),
        MagicItemTier::new(4, 7, 3, 5).with_max_item_value_gp(5_000),
        MagicItemTier::new(8, 12, 5, 8).with_max_item_value_gp(20_000),
        MagicItemTier::new(13, 20, 8, 10).with_max_item_value_gp(100_000),
    ])
}

lazy_static::lazy_static! {
    pub static ref MAGIC_ITEMS: Vec<MagicItem> = {
        use Edition::{Third, ThreeFive};
        use MagicItemKind::{Consumable, Permanent};
        vec![
            MagicItem::new("potion-of-healing", "Potion of Healing", Consumable)
                .with_rarity(Rarity::Common, false)
                .with_item_level(5)
                .with_price(Third, "50 gp")
                .with_price(ThreeFive, "50 gp"),
            MagicItem::new("spell-scroll", "Spell Scroll", Consumable)
                .with_rarity(Rarity::Uncommon, false)
                .with_price(ThreeFive, "25 gp"),
            MagicItem::new("weapon-plus-one", "+1 Weapon", Permanent)
                .with_rarity(Rarity::Uncommon, false)
                .with_item_level(1)
                .with_price(Third, "2,315 gp")
                .with_price(ThreeFive, "2,315 gp"),
            MagicItem::new("armor-plus-one", "+1 Armor", Permanent)
                .with_rarity(Rarity::Rare, false)
                .with_item_level(1)
                .with_price(ThreeFive, "1,160 gp"),
            MagicItem::new("cloak-of-protection", "Cloak of Protection", Permanent)
                .with_rarity(Rarity::Uncommon, true)
                .with_item_level(2)
                .with_price(ThreeFive, "1,000 gp"),
            MagicItem::new("bag-of-holding", "Bag of Holding", Permanent)
                .with_rarity(Rarity::Uncommon, false)
                .with_item_level(5)
                .with_price(Third, "2,500 gp")
                .with_price(ThreeFive, "2,500 gp"),
            MagicItem::new("ring-of-protection", "Ring of Protection", Permanent)
                .with_rarity(Rarity::Rare, true)
                .with_price(ThreeFive, "2,000 gp"),
            MagicItem::new("flame-tongue", "Flame Tongue", Permanent)
                .with_rarity(Rarity::Rare, true)
                .with_item_level(8)
                .with_price(ThreeFive, "8,315 gp"),
            MagicItem::new("staff-of-power", "Staff of Power", Permanent)
                .with_rarity(Rarity::VeryRare, true)
                .with_item_level(20)
                .with_price(ThreeFive, "211,000 gp"),
            MagicItem::new("vorpal-sword", "Vorpal Sword", Permanent)
                .with_rarity(Rarity::Legendary, true)
                .with_item_level(23)
                .with_price(ThreeFive, "120,315 gp"),
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&MagicItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_rarity_order() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Rare < Rarity::VeryRare);
        assert!(Rarity::Legendary < Rarity::Artifact);
        let parsed: Rarity = serde_json::from_str("\"very-rare\"").unwrap();
        assert_eq!(parsed, Rarity::VeryRare);
    }

    #[test]
    fn test_value_cap_saturates() {
        let tier = MagicItemTier::new(1, 20, 1, 1).with_max_item_value_gp(u64::MAX);
        let data = MagicItemData {
            cost: Some("2,315 gp".to_string()),
            ..Default::default()
        };
        assert!(passes_gate(&data, &tier, Edition::ThreeFive, 5));
    }

    #[test]
    fn test_tier_lookup() {
        let catalog = Catalog::builtin();
        let tier = magic_item_budget(catalog, Edition::Fifth, 7).unwrap();
        assert_eq!(tier.max_rarity, Some(Rarity::Rare));
        assert!(magic_item_budget(catalog, Edition::Fifth, 21).is_none());
        assert!(magic_item_budget(catalog, Edition::Second, 5).is_none());
    }

    #[test]
    fn test_fifth_edition_gates_by_rarity() {
        let low = ids(&available_magic_items(Catalog::builtin(), Edition::Fifth, 3));
        assert!(low.contains(&"bag-of-holding".to_string()));
        assert!(!low.contains(&"flame-tongue".to_string()));

        let high = ids(&available_magic_items(Catalog::builtin(), Edition::Fifth, 17));
        assert!(high.contains(&"vorpal-sword".to_string()));
    }

    #[test]
    fn test_fourth_edition_gates_by_item_level() {
        let items = ids(&available_magic_items(Catalog::builtin(), Edition::Fourth, 5));
        assert!(items.contains(&"bag-of-holding".to_string()));
        assert!(!items.contains(&"flame-tongue".to_string()));
        let items = ids(&available_magic_items(Catalog::builtin(), Edition::Fourth, 8));
        assert!(items.contains(&"flame-tongue".to_string()));
    }

    #[test]
    fn test_d20_gates_by_price() {
        let items = ids(&available_magic_items(Catalog::builtin(), Edition::ThreeFive, 2));
        assert_eq!(items, vec!["potion-of-healing", "spell-scroll", "cloak-of-protection"]);
        let items = ids(&available_magic_items(Catalog::builtin(), Edition::Third, 5));
        assert_eq!(items, vec!["potion-of-healing", "weapon-plus-one", "bag-of-holding"]);
    }

    #[test]
    fn test_no_budget_means_no_items() {
        assert!(available_magic_items(Catalog::builtin(), Edition::Second, 10).is_empty());
        assert!(available_magic_items(Catalog::builtin(), Edition::Bx, 1).is_empty());
    }

    #[test]
    fn test_can_add_respects_counts() {
        let catalog = Catalog::builtin();
        let verdict = can_add_magic_item(catalog, Edition::Fifth, 2, &[], "bag-of-holding");
        assert!(verdict.allowed);

        let held = vec!["bag-of-holding".to_string()];
        let verdict = can_add_magic_item(catalog, Edition::Fifth, 2, &held, "cloak-of-protection");
        assert!(!verdict.allowed);
        let verdict = can_add_magic_item(catalog, Edition::Fifth, 2, &held, "potion-of-healing");
        assert!(verdict.allowed);
    }

    #[test]
    fn test_can_add_respects_attunement() {
        let catalog = Catalog::builtin();
        let held: Vec<String> = ["cloak-of-protection", "ring-of-protection", "flame-tongue"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let verdict = can_add_magic_item(catalog, Edition::Fifth, 12, &held, "staff-of-power");
        assert!(!verdict.allowed);
        assert!(verdict.reason.unwrap().contains("attunement"));
        let verdict = can_add_magic_item(catalog, Edition::Fifth, 12, &held, "bag-of-holding");
        assert!(verdict.allowed);
    }

    #[test]
    fn test_can_add_rejects_unavailable_and_duplicate() {
        let catalog = Catalog::builtin();
        assert!(!can_add_magic_item(catalog, Edition::Fifth, 1, &[], "vorpal-sword").allowed);
        assert!(!can_add_magic_item(catalog, Edition::Second, 1, &[], "bag-of-holding").allowed);
        let held = vec!["potion-of-healing".to_string()];
        assert!(!can_add_magic_item(catalog, Edition::Fifth, 1, &held, "potion-of-healing").allowed);
    }
}
