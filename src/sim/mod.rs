//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, by entity ID)
//! - No rendering or platform dependencies
//!
//! The only outside effect of a tick is crediting coins to the player store.

pub mod autopilot;
pub mod collision;
pub mod motion;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, coin_rect, obstacle_rect, player_rect};
pub use motion::{JumpPhase, PlayerMotion, SlidePhase};
pub use snapshot::{EntityView, PlayerView, Snapshot, SpriteTag};
pub use spawn::{maybe_spawn, spawn_coin_row, spawn_obstacle_row, spawn_wave};
pub use state::{Coin, DodgeAction, GamePhase, Obstacle, RunEvent, RunState, RunSummary};
pub use tick::{TickInput, tick};
