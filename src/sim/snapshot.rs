//! Read-only view of a run for presentation layers
//!
//! A snapshot carries everything needed to draw one frame: positions and
//! sizes already resolved in screen space, sprite tags, and the HUD
//! numbers. It serializes to JSON for hosts that render outside Rust.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::player_origin;
use super::motion::{JumpPhase, SlidePhase};
use super::state::{DodgeAction, GamePhase, RunEvent, RunState};

/// Sprite to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteTag {
    JumpBarrier(u8),
    SlideBarrier(u8),
    Coin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Sprite top-left
    pub pos: Vec2,
    pub size: Vec2,
    pub lane: usize,
    pub jump: JumpPhase,
    pub slide: SlidePhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub lane: usize,
    /// Sprite top-left
    pub pos: Vec2,
    pub size: Vec2,
    pub scale: f32,
    pub sprite: SpriteTag,
}

/// One frame of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub distance: u64,
    /// Store balance
    pub coins: u32,
    pub player: PlayerView,
    /// Spawn order
    pub obstacles: Vec<EntityView>,
    pub pickups: Vec<EntityView>,
    pub events: Vec<RunEvent>,
}

impl Snapshot {
    /// Capture the run as it stands; `coins` is the current store balance
    pub fn capture(state: &RunState, coins: u32) -> Self {
        let tuning = &state.tuning;

        let player = PlayerView {
            pos: player_origin(&state.motion, tuning),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            lane: state.motion.lane,
            jump: state.motion.jump,
            slide: state.motion.slide,
        };

        let obstacles = state
            .obstacles
            .iter()
            .map(|o| EntityView {
                id: o.id,
                lane: o.lane,
                pos: o.origin(tuning),
                size: o.size(tuning),
                scale: o.scale,
                sprite: match o.action {
                    DodgeAction::Jump => SpriteTag::JumpBarrier(o.variant),
                    DodgeAction::Slide => SpriteTag::SlideBarrier(o.variant),
                },
            })
            .collect();

        let pickups = state
            .coins
            .iter()
            .map(|c| EntityView {
                id: c.id,
                lane: c.lane,
                pos: c.origin(tuning),
                size: c.size(tuning),
                scale: c.scale,
                sprite: SpriteTag::Coin,
            })
            .collect();

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            score: state.score,
            distance: state.distance,
            coins,
            player,
            obstacles,
            pickups,
            events: state.events.clone(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
