//! Data-driven game balance
//!
//! Every gameplay constant of a run lives here with its default. A tuning
//! blob can be stored as JSON under [`Tuning::STORAGE_KEY`]; missing fields
//! take their defaults and out-of-range values are clamped so a tick can
//! never stall.

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;
use crate::persistence::{self, KeyValueStore};

/// Gameplay constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lanes ===
    /// Centre x of each lane
    pub lane_positions: [f32; LANE_COUNT],
    /// Lateral distance covered per tick while changing lanes
    pub lane_switch_step: f32,

    // === World ===
    /// Distance (and obstacle/coin depth) advanced per tick. Constant for
    /// the whole run; never scaled by distance.
    pub forward_speed: u32,
    /// Distance between obstacle rows
    pub spawn_spacing: u64,
    /// Chance of a coin row accompanying an obstacle row
    pub coin_row_chance: f64,
    /// Distance per score point
    pub score_interval: u64,

    // === Jump / slide ===
    pub jump_height: f32,
    pub jump_speed: f32,
    pub slide_depth: f32,
    pub slide_speed: f32,

    // === Player sprite and hitbox ===
    pub player_width: f32,
    pub player_height: f32,
    /// Top of the player sprite when standing
    pub player_y: f32,
    pub player_margin_x: f32,
    pub player_margin_top: f32,
    pub player_margin_bottom: f32,

    // === Obstacles and coins ===
    /// Unscaled obstacle/coin sprite size
    pub sprite_width: f32,
    pub sprite_height: f32,
    /// Depth at which rows appear
    pub spawn_y: f32,
    /// Depth at which obstacles reach full size
    pub growth_end_y: f32,
    pub obstacle_spawn_scale: f32,
    pub obstacle_min_scale: f32,
    pub obstacle_scale_growth: f32,
    pub obstacle_margin: f32,
    /// Obstacles whose top passes this depth leave play
    pub obstacle_despawn_y: f32,
    pub coin_scale: f32,
    pub coin_margin: f32,
    /// Coins leave play once `y - height` passes this depth
    pub coin_despawn_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_positions: [300.0, 550.0, 900.0],
            lane_switch_step: 50.0,

            forward_speed: 1,
            spawn_spacing: 600,
            coin_row_chance: 0.6,
            score_interval: 100,

            jump_height: 300.0,
            jump_speed: 10.0,
            slide_depth: 100.0,
            slide_speed: 10.0,

            player_width: 230.0,
            player_height: 400.0,
            player_y: 1500.0,
            player_margin_x: 20.0,
            player_margin_top: 50.0,
            player_margin_bottom: 20.0,

            sprite_width: 230.0,
            sprite_height: 400.0,
            spawn_y: 1200.0,
            growth_end_y: 1784.0,
            obstacle_spawn_scale: 0.4,
            obstacle_min_scale: 0.2,
            obstacle_scale_growth: 1.2,
            obstacle_margin: 10.0,
            // Bottom edge of the standing player sprite
            obstacle_despawn_y: 1900.0,
            coin_scale: 0.25,
            coin_margin: 10.0,
            coin_despawn_y: 1884.0,
        }
    }
}

impl Tuning {
    /// Storage key for persisted tuning
    pub const STORAGE_KEY: &'static str = "lane_runner_tuning";

    /// Centre x of `lane` (clamped to the last lane)
    pub fn lane_x(&self, lane: usize) -> f32 {
        self.lane_positions[lane.min(LANE_COUNT - 1)]
    }

    /// Clamp values that would stall a motion or the spawner
    pub fn sanitize(&mut self) {
        self.forward_speed = self.forward_speed.max(1);
        self.spawn_spacing = self.spawn_spacing.max(1);
        self.score_interval = self.score_interval.max(1);
        self.coin_row_chance = self.coin_row_chance.clamp(0.0, 1.0);
        self.lane_switch_step = self.lane_switch_step.max(1.0);
        self.jump_speed = self.jump_speed.max(1.0);
        self.slide_speed = self.slide_speed.max(1.0);
        self.jump_height = self.jump_height.max(0.0);
        self.slide_depth = self.slide_depth.max(0.0);
        if self.growth_end_y <= self.spawn_y {
            self.growth_end_y = self.spawn_y + 1.0;
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut tuning: Self = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Load tuning from storage, using defaults when absent or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from storage");
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning ({}), using defaults", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default tuning");
                Self::default()
            }
            Err(e) => {
                log::warn!("Tuning storage unavailable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> persistence::Result<()> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Tuning saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"forward_speed": 3, "jump_height": 200.0}"#).unwrap();
        assert_eq!(tuning.forward_speed, 3);
        assert_eq!(tuning.jump_height, 200.0);
        assert_eq!(tuning.lane_positions, [300.0, 550.0, 900.0]);
        assert_eq!(tuning.spawn_spacing, 600);
    }

    #[test]
    fn test_sanitize_prevents_stalls() {
        let tuning =
            Tuning::from_json(r#"{"forward_speed": 0, "jump_speed": 0.0, "coin_row_chance": 7.0}"#)
                .unwrap();
        assert_eq!(tuning.forward_speed, 1);
        assert_eq!(tuning.jump_speed, 1.0);
        assert_eq!(tuning.coin_row_chance, 1.0);
    }

    #[test]
    fn test_load_save_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(Tuning::load(&store), Tuning::default());

        let mut tuning = Tuning::default();
        tuning.forward_speed = 4;
        tuning.save(&store).unwrap();
        assert_eq!(Tuning::load(&store).forward_speed, 4);

        store.set(Tuning::STORAGE_KEY, "[1, 2").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }

    #[test]
    fn test_lane_x_clamps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.lane_x(0), 300.0);
        assert_eq!(tuning.lane_x(7), 900.0);
    }
}
