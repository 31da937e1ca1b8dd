//! Persisted player record
//!
//! Stored as a single JSON object under one storage key and fully
//! overwritten after every economy mutation. Field names follow the
//! record's external camelCase layout; empty equip slots are written as
//! the literal string `"None"`.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Sentinel written for an empty equip slot
pub const NONE_ITEM: &str = "None";

/// Map the empty and `"None"` slot spellings to no item
pub fn slot_id(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty() && *id != NONE_ITEM)
}

/// Cosmetic item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Trail,
    Glow,
    Accessory,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [Self::Trail, Self::Glow, Self::Accessory];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Trail => "trail",
            ItemCategory::Glow => "glow",
            ItemCategory::Accessory => "accessory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trail" | "trails" => Some(ItemCategory::Trail),
            "glow" | "glows" => Some(ItemCategory::Glow),
            "accessory" | "accessories" | "acc" => Some(ItemCategory::Accessory),
            _ => None,
        }
    }

    /// Whether the category has an equip slot (accessories are always worn)
    pub fn is_equippable(&self) -> bool {
        !matches!(self, ItemCategory::Accessory)
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The player's persistent profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Path of the equipped skin; carried through untouched
    pub avatar_res: String,
    pub coins: u32,
    #[serde(with = "equip_slot")]
    pub equipped_trail: Option<String>,
    #[serde(with = "equip_slot")]
    pub equipped_glow: Option<String>,
    pub owned_trails: BTreeSet<String>,
    pub owned_glows: BTreeSet<String>,
    pub owned_accessories: BTreeSet<String>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            name: "Player1".to_string(),
            avatar_res: "res/drawable/player.png".to_string(),
            coins: 0,
            equipped_trail: None,
            equipped_glow: None,
            owned_trails: BTreeSet::new(),
            owned_glows: BTreeSet::new(),
            owned_accessories: BTreeSet::new(),
        }
    }
}

impl Player {
    pub fn owned(&self, category: ItemCategory) -> &BTreeSet<String> {
        match category {
            ItemCategory::Trail => &self.owned_trails,
            ItemCategory::Glow => &self.owned_glows,
            ItemCategory::Accessory => &self.owned_accessories,
        }
    }

    pub fn owned_mut(&mut self, category: ItemCategory) -> &mut BTreeSet<String> {
        match category {
            ItemCategory::Trail => &mut self.owned_trails,
            ItemCategory::Glow => &mut self.owned_glows,
            ItemCategory::Accessory => &mut self.owned_accessories,
        }
    }

    pub fn owns(&self, category: ItemCategory, id: &str) -> bool {
        self.owned(category).contains(id)
    }

    /// Equip slot for a category (`None` for accessories)
    pub fn equipped(&self, category: ItemCategory) -> Option<&str> {
        match category {
            ItemCategory::Trail => self.equipped_trail.as_deref(),
            ItemCategory::Glow => self.equipped_glow.as_deref(),
            ItemCategory::Accessory => None,
        }
    }

    pub(crate) fn equipped_mut(&mut self, category: ItemCategory) -> Option<&mut Option<String>> {
        match category {
            ItemCategory::Trail => Some(&mut self.equipped_trail),
            ItemCategory::Glow => Some(&mut self.equipped_glow),
            ItemCategory::Accessory => None,
        }
    }

    /// Clear any equip slot that names an item the player does not own.
    /// Returns true if anything changed.
    pub fn repair(&mut self) -> bool {
        let mut changed = false;
        for category in ItemCategory::ALL {
            let owned = self.owned(category).clone();
            if let Some(slot) = self.equipped_mut(category)
                && slot.as_ref().is_some_and(|id| !owned.contains(id))
            {
                *slot = None;
                changed = true;
            }
        }
        changed
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Load the record stored under `key`, falling back to the default
    /// player when it is missing, unreadable or malformed.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Self {
        let json = match store.get(key) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No player record found, starting fresh");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Player storage unavailable ({}), using default player", e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(mut player) => {
                if player.repair() {
                    log::warn!("Player record equipped unowned items, slots cleared");
                }
                log::info!("Loaded player {} ({} coins)", player.name, player.coins);
                player
            }
            Err(e) => {
                log::warn!("Malformed player record ({}), using default player", e);
                Self::default()
            }
        }
    }
}

/// `Option<String>` <-> `"None"` | id
mod equip_slot {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{NONE_ITEM, slot_id};

    pub fn serialize<S: Serializer>(slot: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(slot.as_deref().unwrap_or(NONE_ITEM))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(slot_id(raw.as_deref()).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_layout() {
        let mut player = Player::default();
        player.coins = 12;
        player.owned_trails.insert("trail1".to_string());
        player.equipped_trail = Some("trail1".to_string());

        let value: serde_json::Value = serde_json::to_value(&player).unwrap();
        assert_eq!(value["coins"], 12);
        assert_eq!(value["equippedTrail"], "trail1");
        assert_eq!(value["equippedGlow"], NONE_ITEM);
        assert_eq!(value["ownedTrails"], serde_json::json!(["trail1"]));
        assert_eq!(value["ownedAccessories"], serde_json::json!([]));
    }

    #[test]
    fn test_none_and_empty_slots_parse_as_unequipped() {
        let json = r#"{"id":"1","name":"P","coins":3,"equippedTrail":"None","equippedGlow":""}"#;
        let player = Player::from_json(json).unwrap();
        assert_eq!(player.coins, 3);
        assert_eq!(player.equipped_trail, None);
        assert_eq!(player.equipped_glow, None);
        // Missing sets default to empty
        assert!(player.owned_glows.is_empty());
    }

    #[test]
    fn test_load_missing_record_is_default() {
        let store = MemoryStore::new();
        assert_eq!(Player::load(&store, "player_data"), Player::default());
    }

    #[test]
    fn test_load_malformed_record_is_default() {
        let store = MemoryStore::with_entry("player_data", "{not json");
        assert_eq!(Player::load(&store, "player_data"), Player::default());

        // Negative coin counts cannot be represented
        let store = MemoryStore::with_entry("player_data", r#"{"coins":-5}"#);
        assert_eq!(Player::load(&store, "player_data"), Player::default());
    }

    #[test]
    fn test_load_repairs_unowned_equip() {
        let json = r#"{"coins":1,"equippedTrail":"trail9","equippedGlow":"glow1","ownedGlows":["glow1"]}"#;
        let store = MemoryStore::with_entry("player_data", json);
        let player = Player::load(&store, "player_data");
        assert_eq!(player.equipped_trail, None);
        assert_eq!(player.equipped_glow.as_deref(), Some("glow1"));
        assert_eq!(player.coins, 1);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(ItemCategory::from_str("Trail"), Some(ItemCategory::Trail));
        assert_eq!(ItemCategory::from_str("glows"), Some(ItemCategory::Glow));
        assert_eq!(ItemCategory::from_str("acc"), Some(ItemCategory::Accessory));
        assert_eq!(ItemCategory::from_str("skin"), None);
        assert!(!ItemCategory::Accessory.is_equippable());
    }
}
