//! Lane Runner - deterministic core of a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring)
//! - `economy`: Shared player store and coin economy
//! - `catalog`: Shop items and purchases
//! - `persistence`: Key-value storage backends
//! - `runner`: Fixed-cadence loop and frame-time accumulator
//! - `tuning`: Data-driven game balance

pub mod catalog;
pub mod economy;
pub mod persistence;
pub mod player;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use catalog::{CATALOG, ShopItem};
pub use economy::{EconomyError, PlayerStore};
pub use persistence::{KeyValueStore, StorageError};
pub use player::{ItemCategory, Player};
pub use runner::{FixedStep, GameLoop};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick every 17 ms, about 59 Hz)
    pub const SIM_DT: f32 = 0.017;
    /// Sleep between ticks in the self-driven loop
    pub const TICK_INTERVAL_MS: u64 = 17;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of lanes
    pub const LANE_COUNT: usize = 3;
    /// Lane the player starts in
    pub const CENTER_LANE: usize = 1;
}
