//! Fixed timestep simulation tick
//!
//! One tick, in order: apply intents, advance distance and score, spawn,
//! move obstacles and coins, advance player motion, resolve collisions.

use super::autopilot;
use super::collision::{coin_rect, obstacle_rect, player_rect};
use super::spawn;
use super::state::{DodgeAction, GamePhase, RunEvent, RunState};
use crate::economy::PlayerStore;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub lane_left: bool,
    pub lane_right: bool,
    pub jump: bool,
    pub slide: bool,
    /// Start a new run after game over
    pub restart: bool,
    /// Demo mode - autopilot picks the moves
    pub autopilot: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }

    pub fn slide() -> Self {
        Self {
            slide: true,
            ..Default::default()
        }
    }

    pub fn left() -> Self {
        Self {
            lane_left: true,
            ..Default::default()
        }
    }

    pub fn right() -> Self {
        Self {
            lane_right: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Score points earned moving from `old` to `new` distance
#[inline]
pub fn points_between(old: u64, new: u64, interval: u64) -> u64 {
    new / interval - old / interval
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut RunState, input: &TickInput, store: &PlayerStore) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.reset();
        }
        return;
    }

    let input = if input.autopilot {
        autopilot::choose_input(state)
    } else {
        input.clone()
    };
    apply_input(state, &input);

    state.time_ticks += 1;

    // Distance and score
    let speed = state.tuning.forward_speed;
    let old_distance = state.distance;
    state.distance += u64::from(speed);
    state.score += points_between(old_distance, state.distance, state.tuning.score_interval);

    spawn::maybe_spawn(state);

    // Move the world toward the player
    let dy = speed as f32;
    let tuning = &state.tuning;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.advance(dy, tuning);
    }
    state.obstacles.retain(|o| !o.is_out_of_play(tuning));
    for coin in state.coins.iter_mut() {
        coin.advance(dy);
    }
    state.coins.retain(|c| !c.is_out_of_play(tuning));

    state.motion.advance(&state.tuning);

    resolve_obstacles(state);
    resolve_coins(state, store);
}

fn apply_input(state: &mut RunState, input: &TickInput) {
    let tuning = &state.tuning;
    let motion = &mut state.motion;
    if input.lane_left {
        motion.move_left(tuning);
    }
    if input.lane_right {
        motion.move_right(tuning);
    }
    if input.jump {
        motion.start_jump();
    }
    if input.slide {
        motion.start_slide();
    }
}

/// Check obstacles in spawn order; the first wrong move ends the run
fn resolve_obstacles(state: &mut RunState) {
    let player = player_rect(&state.motion, &state.tuning);
    let mut dodged = Vec::new();

    for obstacle in &state.obstacles {
        if !player.intersects(&obstacle_rect(obstacle, &state.tuning)) {
            continue;
        }
        let cleared = match obstacle.action {
            DodgeAction::Jump => state.motion.is_jumping(),
            DodgeAction::Slide => state.motion.is_sliding(),
        };
        if cleared {
            dodged.push(obstacle.id);
            state.events.push(RunEvent::ObstacleDodged {
                id: obstacle.id,
                action: obstacle.action,
            });
        } else {
            state.phase = GamePhase::GameOver;
            state.events.push(RunEvent::GameOver {
                score: state.score,
                distance: state.distance,
            });
            log::info!(
                "Game over: hit {:?} obstacle {} in lane {} (score {}, distance {})",
                obstacle.action,
                obstacle.id,
                obstacle.lane,
                state.score,
                state.distance
            );
            break;
        }
    }

    if !dodged.is_empty() {
        state.obstacles_dodged += dodged.len() as u32;
        state.obstacles.retain(|o| !dodged.contains(&o.id));
    }
}

/// Every overlapping coin is collected, whatever the player is doing
fn resolve_coins(state: &mut RunState, store: &PlayerStore) {
    let player = player_rect(&state.motion, &state.tuning);
    let tuning = &state.tuning;
    let mut collected = Vec::new();

    for coin in &state.coins {
        if player.intersects(&coin_rect(coin, tuning)) {
            let balance = store.add_coins(1);
            collected.push(coin.id);
            state.events.push(RunEvent::CoinCollected {
                id: coin.id,
                balance,
            });
        }
    }

    if !collected.is_empty() {
        state.coins_collected += collected.len() as u32;
        state.coins.retain(|c| !collected.contains(&c.id));
    }
}
