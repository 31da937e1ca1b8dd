//! Shop catalog
//!
//! Fixed list of purchasable cosmetics. Prices are in coins.

use crate::economy::{EconomyError, PlayerStore};
use crate::player::ItemCategory;

/// A purchasable cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
    pub category: ItemCategory,
}

pub const CATALOG: &[ShopItem] = &[
    ShopItem {
        id: "trail1",
        name: "Blue Trail",
        price: 10,
        category: ItemCategory::Trail,
    },
    ShopItem {
        id: "trail2",
        name: "Red Trail",
        price: 10,
        category: ItemCategory::Trail,
    },
    ShopItem {
        id: "glow1",
        name: "Yellow Glow",
        price: 5,
        category: ItemCategory::Glow,
    },
    ShopItem {
        id: "glow2",
        name: "Cyan Glow",
        price: 5,
        category: ItemCategory::Glow,
    },
    ShopItem {
        id: "acc1",
        name: "Cool Hat",
        price: 15,
        category: ItemCategory::Accessory,
    },
    ShopItem {
        id: "acc2",
        name: "Red Scarf",
        price: 15,
        category: ItemCategory::Accessory,
    },
];

/// Look up an item by id
pub fn find(id: &str) -> Option<&'static ShopItem> {
    CATALOG.iter().find(|item| item.id == id)
}

/// Items of one category, in shop order
pub fn items_in(category: ItemCategory) -> impl Iterator<Item = &'static ShopItem> {
    CATALOG.iter().filter(move |item| item.category == category)
}

/// Buy a catalog item at its listed price. Returns the new balance.
pub fn purchase(store: &PlayerStore, item_id: &str) -> Result<u32, EconomyError> {
    let item = find(item_id).ok_or_else(|| EconomyError::UnknownItem(item_id.to_string()))?;
    store.buy_item(item.category, item.id, item.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_items_in_category() {
        let glows: Vec<_> = items_in(ItemCategory::Glow).map(|i| i.id).collect();
        assert_eq!(glows, ["glow1", "glow2"]);
    }

    #[test]
    fn test_purchase_uses_listed_price() {
        let store = PlayerStore::open(MemoryStore::new());
        store.add_coins(12);

        assert_eq!(purchase(&store, "trail2"), Ok(2));
        assert!(store.player().owns(ItemCategory::Trail, "trail2"));

        assert!(matches!(
            purchase(&store, "glow1"),
            Err(EconomyError::InsufficientCoins { balance: 2, needed: 5 })
        ));
        assert_eq!(
            purchase(&store, "skin9"),
            Err(EconomyError::UnknownItem("skin9".to_string()))
        );
        assert_eq!(store.coins(), 2);
    }
}
