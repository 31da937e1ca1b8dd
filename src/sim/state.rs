//! Run state and entity types
//!
//! A `RunState` owns everything that changes during one playthrough. The
//! player store is not part of it; it outlives runs and is passed to the
//! tick by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::motion::PlayerMotion;
use super::spawn;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only an explicit reset resumes play
    GameOver,
}

/// The move that gets the player past an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DodgeAction {
    /// Low barrier, jump over it
    Jump,
    /// High barrier, slide under it
    Slide,
}

/// An obstacle approaching in one lane
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub lane: usize,
    /// Top edge depth
    pub y: f32,
    pub action: DodgeAction,
    /// Which of the two sprites for `action` to draw
    pub variant: u8,
    /// Perspective scale, recomputed from `y` every tick
    pub scale: f32,
}

impl Obstacle {
    /// New obstacle at the spawn depth
    pub fn new(id: u32, lane: usize, action: DodgeAction, variant: u8, tuning: &Tuning) -> Self {
        Self {
            id,
            lane,
            y: tuning.spawn_y,
            action,
            variant,
            scale: tuning.obstacle_spawn_scale,
        }
    }

    /// Move toward the player by `dy` and regrow
    pub fn advance(&mut self, dy: f32, tuning: &Tuning) {
        self.y += dy;
        self.scale = depth_scale(self.y, tuning);
    }

    /// Copy of this obstacle `dy` further along
    pub fn projected(&self, dy: f32, tuning: &Tuning) -> Self {
        let mut ahead = self.clone();
        ahead.advance(dy, tuning);
        ahead
    }

    /// Sprite size in whole pixels
    pub fn size(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(
            (tuning.sprite_width * self.scale).floor(),
            (tuning.sprite_height * self.scale).floor(),
        )
    }

    /// Sprite top-left, centred on the lane
    pub fn origin(&self, tuning: &Tuning) -> Vec2 {
        let half_width = (self.size(tuning).x / 2.0).floor();
        Vec2::new(tuning.lane_x(self.lane) - half_width, self.y)
    }

    /// Past the player's depth plane
    pub fn is_out_of_play(&self, tuning: &Tuning) -> bool {
        self.y > tuning.obstacle_despawn_y
    }
}

/// Perspective scale for an obstacle whose top is at depth `y`
pub fn depth_scale(y: f32, tuning: &Tuning) -> f32 {
    let t = ((y - tuning.spawn_y) / (tuning.growth_end_y - tuning.spawn_y)).clamp(0.0, 1.0);
    tuning.obstacle_min_scale + tuning.obstacle_scale_growth * t
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub id: u32,
    pub lane: usize,
    pub y: f32,
    /// Fixed for the coin's lifetime
    pub scale: f32,
}

impl Coin {
    pub fn new(id: u32, lane: usize, tuning: &Tuning) -> Self {
        Self {
            id,
            lane,
            y: tuning.spawn_y,
            scale: tuning.coin_scale,
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn size(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(
            (tuning.sprite_width * self.scale).floor(),
            (tuning.sprite_height * self.scale).floor(),
        )
    }

    pub fn origin(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(tuning.lane_x(self.lane) - self.size(tuning).x / 2.0, self.y)
    }

    pub fn is_out_of_play(&self, tuning: &Tuning) -> bool {
        self.y - self.size(tuning).y > tuning.coin_despawn_y
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    /// Player got past an obstacle with the right move
    ObstacleDodged { id: u32, action: DodgeAction },
    /// Coin picked up; `balance` is the store balance afterwards
    CoinCollected { id: u32, balance: u32 },
    /// Wrong move (or none) against an obstacle
    GameOver { score: u64, distance: u64 },
}

/// Totals for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub distance: u64,
    pub coins_collected: u32,
    pub obstacles_dodged: u32,
    pub ticks: u64,
}

/// Complete state of one run (deterministic for a given seed and inputs)
#[derive(Debug, Clone)]
pub struct RunState {
    /// Seed the run RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Total distance traveled this run
    pub distance: u64,
    /// Distance at which the last obstacle row spawned
    pub last_spawn_distance: u64,
    /// Ticks since the last reset
    pub time_ticks: u64,
    pub motion: PlayerMotion,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live coins in spawn order
    pub coins: Vec<Coin>,
    pub coins_collected: u32,
    pub obstacles_dodged: u32,
    /// Events from the most recent tick
    pub events: Vec<RunEvent>,
    next_id: u32,
}

impl RunState {
    /// New run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New run, already reset and holding its first row
    pub fn with_tuning(seed: u64, mut tuning: Tuning) -> Self {
        tuning.sanitize();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            motion: PlayerMotion::new(&tuning),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            distance: 0,
            last_spawn_distance: 0,
            time_ticks: 0,
            obstacles: Vec::new(),
            coins: Vec::new(),
            coins_collected: 0,
            obstacles_dodged: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Start a fresh run: zero distance and score, centre lane, no motion,
    /// empty lanes, then one initial spawn. The RNG keeps its stream so
    /// consecutive runs differ.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.distance = 0;
        self.last_spawn_distance = 0;
        self.time_ticks = 0;
        self.motion = PlayerMotion::new(&self.tuning);
        self.obstacles.clear();
        self.coins.clear();
        self.coins_collected = 0;
        self.obstacles_dodged = 0;
        self.events.clear();

        spawn::spawn_wave(self);
        log::info!(
            "Run reset: {} obstacles, {} coins",
            self.obstacles.len(),
            self.coins.len()
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            distance: self.distance,
            coins_collected: self.coins_collected,
            obstacles_dodged: self.obstacles_dodged,
            ticks: self.time_ticks,
        }
    }
}
