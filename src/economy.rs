//! Coin economy and the shared player store
//!
//! `PlayerStore` is the one piece of state touched both by the tick loop
//! (coin pickups) and by callers outside it (shop, profile). Every mutation
//! takes the store lock, applies the change, and writes the full record
//! back to storage before the lock is released, so an observer never sees a
//! half-applied purchase.

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::persistence::KeyValueStore;
use crate::player::{ItemCategory, Player, slot_id};

/// Storage key of the player record
pub const PLAYER_KEY: &str = "player_data";

/// Reasons an economy operation was declined. A declined operation never
/// mutates the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("not enough coins: balance {balance}, needed {needed}")]
    InsufficientCoins { balance: u32, needed: u32 },

    #[error("{category} item {id:?} is not owned")]
    NotOwned { category: ItemCategory, id: String },

    #[error("{category} item {id:?} is already owned")]
    AlreadyOwned { category: ItemCategory, id: String },

    #[error("{0} items cannot be equipped")]
    NotEquippable(ItemCategory),

    #[error("unknown shop item {0:?}")]
    UnknownItem(String),
}

/// Player record plus the backend it persists to
pub struct PlayerStore {
    player: Mutex<Player>,
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl PlayerStore {
    /// Open the store, loading the record under [`PLAYER_KEY`]
    pub fn open(backend: impl KeyValueStore + 'static) -> Self {
        Self::open_with_key(backend, PLAYER_KEY)
    }

    pub fn open_with_key(backend: impl KeyValueStore + 'static, key: &str) -> Self {
        let player = Player::load(&backend, key);
        Self {
            player: Mutex::new(player),
            backend: Box::new(backend),
            key: key.to_string(),
        }
    }

    /// Copy of the current record
    pub fn player(&self) -> Player {
        self.lock().clone()
    }

    pub fn coins(&self) -> u32 {
        self.lock().coins
    }

    /// Add `amount` coins. Returns the new balance.
    pub fn add_coins(&self, amount: u32) -> u32 {
        let mut player = self.lock();
        player.coins = player.coins.saturating_add(amount);
        self.persist(&player);
        player.coins
    }

    /// Spend `amount` coins. Returns the new balance.
    pub fn spend_coins(&self, amount: u32) -> Result<u32, EconomyError> {
        let mut player = self.lock();
        debit(&mut player, amount)?;
        self.persist(&player);
        Ok(player.coins)
    }

    /// Pay `price` and add `id` to the owned set of `category`, or do
    /// neither. Returns the new balance.
    pub fn buy_item(
        &self,
        category: ItemCategory,
        id: &str,
        price: u32,
    ) -> Result<u32, EconomyError> {
        let mut player = self.lock();
        if player.owns(category, id) {
            return Err(EconomyError::AlreadyOwned {
                category,
                id: id.to_string(),
            });
        }
        debit(&mut player, price)?;
        player.owned_mut(category).insert(id.to_string());
        self.persist(&player);

        log::info!("Bought {} {} for {} coins", category, id, price);
        Ok(player.coins)
    }

    /// Equip an owned item, or clear the slot with `None` (or the
    /// `"None"` sentinel)
    pub fn equip_item(&self, category: ItemCategory, id: Option<&str>) -> Result<(), EconomyError> {
        let id = slot_id(id);
        let mut player = self.lock();
        if let Some(id) = id
            && !player.owns(category, id)
        {
            return Err(EconomyError::NotOwned {
                category,
                id: id.to_string(),
            });
        }
        let slot = player
            .equipped_mut(category)
            .ok_or(EconomyError::NotEquippable(category))?;
        *slot = id.map(str::to_string);
        self.persist(&player);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Player> {
        // A panic mid-mutation can only happen before the record is
        // touched, so the inner value is still consistent.
        self.player.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the record back. Failures are logged; the in-memory record
    /// stays authoritative.
    fn persist(&self, player: &Player) {
        let json = match player.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode player record: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.set(&self.key, &json) {
            log::warn!("Could not save player record: {}", e);
        }
    }
}

fn debit(player: &mut Player, amount: u32) -> Result<(), EconomyError> {
    if player.coins < amount {
        return Err(EconomyError::InsufficientCoins {
            balance: player.coins,
            needed: amount,
        });
    }
    player.coins -= amount;
    Ok(())
}
