//! Player motion state machine
//!
//! Three independent motions, all advanced once per tick:
//! - lateral: x slides toward the target lane's centre at a fixed step
//! - jump: Idle -> Ascending -> Descending -> Idle, offset goes negative (up)
//! - slide: Idle -> Descending -> Returning -> Idle, offset goes positive (down)
//!
//! Jump and slide offsets add up into one vertical draw offset.

use serde::{Deserialize, Serialize};

use crate::consts::{CENTER_LANE, LANE_COUNT};
use crate::tuning::Tuning;

/// Jump progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Idle,
    Ascending,
    Descending,
}

/// Slide progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlidePhase {
    #[default]
    Idle,
    Descending,
    Returning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMotion {
    /// Lane the player is in (or heading to)
    pub lane: usize,
    /// Current lateral centre
    pub x: f32,
    /// Centre of `lane`
    pub target_x: f32,
    pub jump: JumpPhase,
    /// <= 0, up is negative
    pub jump_offset: f32,
    pub slide: SlidePhase,
    /// >= 0
    pub slide_offset: f32,
}

impl PlayerMotion {
    /// Standing in the centre lane
    pub fn new(tuning: &Tuning) -> Self {
        let x = tuning.lane_x(CENTER_LANE);
        Self {
            lane: CENTER_LANE,
            x,
            target_x: x,
            jump: JumpPhase::Idle,
            jump_offset: 0.0,
            slide: SlidePhase::Idle,
            slide_offset: 0.0,
        }
    }

    /// Returns false when already in the leftmost lane
    pub fn move_left(&mut self, tuning: &Tuning) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        self.target_x = tuning.lane_x(self.lane);
        true
    }

    /// Returns false when already in the rightmost lane
    pub fn move_right(&mut self, tuning: &Tuning) -> bool {
        if self.lane + 1 >= LANE_COUNT {
            return false;
        }
        self.lane += 1;
        self.target_x = tuning.lane_x(self.lane);
        true
    }

    /// Start a jump unless one is already under way
    pub fn start_jump(&mut self) -> bool {
        if self.jump != JumpPhase::Idle || self.jump_offset < 0.0 {
            return false;
        }
        self.jump = JumpPhase::Ascending;
        true
    }

    /// Start a slide unless one is already under way
    pub fn start_slide(&mut self) -> bool {
        if self.slide != SlidePhase::Idle || self.slide_offset > 0.0 {
            return false;
        }
        self.slide = SlidePhase::Descending;
        true
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jump != JumpPhase::Idle
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.slide != SlidePhase::Idle
    }

    /// Combined jump + slide offset applied to the player's y
    #[inline]
    pub fn vertical_offset(&self) -> f32 {
        self.jump_offset + self.slide_offset
    }

    /// True while x has not reached the lane centre
    pub fn is_switching_lanes(&self) -> bool {
        self.x != self.target_x
    }

    /// Advance all motions by one tick
    pub fn advance(&mut self, tuning: &Tuning) {
        self.advance_lateral(tuning.lane_switch_step);
        self.advance_jump(tuning.jump_height, tuning.jump_speed);
        self.advance_slide(tuning.slide_depth, tuning.slide_speed);
    }

    fn advance_lateral(&mut self, step: f32) {
        if self.x < self.target_x {
            self.x = (self.x + step).min(self.target_x);
        } else if self.x > self.target_x {
            self.x = (self.x - step).max(self.target_x);
        }
    }

    fn advance_jump(&mut self, height: f32, speed: f32) {
        match self.jump {
            JumpPhase::Idle => {}
            JumpPhase::Ascending => {
                self.jump_offset -= speed;
                if self.jump_offset <= -height {
                    self.jump = JumpPhase::Descending;
                }
            }
            JumpPhase::Descending => {
                self.jump_offset += speed;
                if self.jump_offset >= 0.0 {
                    self.jump_offset = 0.0;
                    self.jump = JumpPhase::Idle;
                }
            }
        }
    }

    fn advance_slide(&mut self, depth: f32, speed: f32) {
        match self.slide {
            SlidePhase::Idle => {}
            SlidePhase::Descending => {
                self.slide_offset += speed;
                if self.slide_offset >= depth {
                    self.slide = SlidePhase::Returning;
                }
            }
            SlidePhase::Returning => {
                self.slide_offset -= speed;
                if self.slide_offset <= 0.0 {
                    self.slide_offset = 0.0;
                    self.slide = SlidePhase::Idle;
                }
            }
        }
    }
}
