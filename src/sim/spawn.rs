//! Obstacle and coin row generation
//!
//! Rows appear at the spawn depth every `spawn_spacing` units of distance.
//! All randomness comes from the run's seeded RNG.

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Coin, DodgeAction, Obstacle, RunState};
use crate::consts::LANE_COUNT;

/// Place one obstacle in every lane, minus zero or one randomly chosen
/// empty lane.
pub fn spawn_obstacle_row(state: &mut RunState) {
    let empty_count = state.rng.random_range(0..2usize);
    let mut lanes: [usize; LANE_COUNT] = std::array::from_fn(|i| i);
    lanes.shuffle(&mut state.rng);
    let empty_lanes = &lanes[..empty_count];

    for lane in 0..LANE_COUNT {
        if empty_lanes.contains(&lane) {
            continue;
        }
        let action = if state.rng.random_bool(0.5) {
            DodgeAction::Jump
        } else {
            DodgeAction::Slide
        };
        let variant = state.rng.random_range(0..2u8);
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, lane, action, variant, &state.tuning));
        log::debug!("Spawned {:?} obstacle {} in lane {}", action, id, lane);
    }
}

/// Place one coin in a random lane
pub fn spawn_coin_row(state: &mut RunState) {
    let lane = state.rng.random_range(0..LANE_COUNT);
    let id = state.next_entity_id();
    state.coins.push(Coin::new(id, lane, &state.tuning));
    log::debug!("Spawned coin {} in lane {}", id, lane);
}

/// One spawn event: an obstacle row, plus a coin row with
/// `coin_row_chance`
pub fn spawn_wave(state: &mut RunState) {
    spawn_obstacle_row(state);
    if state.rng.random_bool(state.tuning.coin_row_chance) {
        spawn_coin_row(state);
    }
    state.last_spawn_distance = state.distance;
}

/// Emit a wave if enough distance has passed since the last one
pub fn maybe_spawn(state: &mut RunState) -> bool {
    if state.distance - state.last_spawn_distance >= state.tuning.spawn_spacing {
        spawn_wave(state);
        true
    } else {
        false
    }
}
