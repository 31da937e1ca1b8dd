//! Axis-aligned hitboxes for the player, obstacles and coins
//!
//! Screen space: x grows right, y grows toward the player (down the
//! screen). Every hitbox is the sprite rectangle shrunk by per-entity
//! margins, so sprites have to overlap visibly before anything counts.

use glam::Vec2;

use super::motion::PlayerMotion;
use super::state::{Coin, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Shrink each side independently
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: self.min + Vec2::new(left, top),
            max: self.max - Vec2::new(right, bottom),
        }
    }

    /// Shrink all four sides by `margin`
    pub fn inset_uniform(&self, margin: f32) -> Self {
        self.inset(margin, margin, margin, margin)
    }

    pub fn translate(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Strict overlap test; rectangles that only share an edge do not
    /// intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Top-left of the player sprite, including jump/slide offset
pub fn player_origin(motion: &PlayerMotion, tuning: &Tuning) -> Vec2 {
    player_sprite(motion, tuning).min
}

/// Player sprite rectangle: the standing sprite in the current lane,
/// shifted by the jump/slide offset
pub fn player_sprite(motion: &PlayerMotion, tuning: &Tuning) -> Rect {
    let standing = Rect::from_origin_size(
        Vec2::new(motion.x - tuning.player_width / 2.0, tuning.player_y),
        Vec2::new(tuning.player_width, tuning.player_height),
    );
    standing.translate(Vec2::new(0.0, motion.vertical_offset()))
}

/// Player hitbox
pub fn player_rect(motion: &PlayerMotion, tuning: &Tuning) -> Rect {
    player_sprite(motion, tuning).inset(
        tuning.player_margin_x,
        tuning.player_margin_top,
        tuning.player_margin_x,
        tuning.player_margin_bottom,
    )
}

/// Obstacle hitbox
pub fn obstacle_rect(obstacle: &Obstacle, tuning: &Tuning) -> Rect {
    Rect::from_origin_size(obstacle.origin(tuning), obstacle.size(tuning))
        .inset_uniform(tuning.obstacle_margin)
}

/// Coin hitbox
pub fn coin_rect(coin: &Coin, tuning: &Tuning) -> Rect {
    Rect::from_origin_size(coin.origin(tuning), coin.size(tuning)).inset_uniform(tuning.coin_margin)
}
