//! Demo mode player
//!
//! Reads the run state and produces the input a reasonable player would.
//! Obstacles are predicted a few ticks ahead by replaying player motion and
//! obstacle movement; coins are chased only when the way is clear.

use super::collision::{obstacle_rect, player_rect};
use super::motion::PlayerMotion;
use super::state::{DodgeAction, Obstacle, RunState};
use super::tick::TickInput;
use crate::consts::LANE_COUNT;

/// How far ahead obstacle contact is predicted, in ticks
pub const LOOKAHEAD_TICKS: u32 = 4;

/// Vertical clearance required in a lane before moving into it
const LANE_CHANGE_CLEARANCE: f32 = 40.0;

/// Choose the input for the next tick
pub fn choose_input(state: &RunState) -> TickInput {
    let mut input = TickInput::default();

    if let Some(action) = upcoming_threat(state) {
        match action {
            DodgeAction::Jump => input.jump = true,
            DodgeAction::Slide => input.slide = true,
        }
        return input;
    }

    if let Some(target) = coin_lane(state) {
        let lane = state.motion.lane;
        let next = if target < lane {
            lane - 1
        } else if target > lane {
            lane + 1
        } else {
            return input;
        };
        if can_change_lane(state, next) {
            input.lane_left = next < lane;
            input.lane_right = next > lane;
        }
    }

    input
}

/// First obstacle (in spawn order) that will hit the player within the
/// lookahead without the move that clears it already under way
fn upcoming_threat(state: &RunState) -> Option<DodgeAction> {
    let tuning = &state.tuning;
    let speed = tuning.forward_speed as f32;
    let mut motion = state.motion.clone();

    for step in 1..=LOOKAHEAD_TICKS {
        motion.advance(tuning);
        let player = player_rect(&motion, tuning);
        for obstacle in &state.obstacles {
            let ahead = obstacle.projected(speed * step as f32, tuning);
            if player.intersects(&obstacle_rect(&ahead, tuning)) && !clears(&motion, obstacle) {
                return Some(obstacle.action);
            }
        }
    }
    None
}

fn clears(motion: &PlayerMotion, obstacle: &Obstacle) -> bool {
    match obstacle.action {
        DodgeAction::Jump => motion.is_jumping(),
        DodgeAction::Slide => motion.is_sliding(),
    }
}

/// Lane of the nearest coin still ahead of the player
fn coin_lane(state: &RunState) -> Option<usize> {
    let player = player_rect(&state.motion, &state.tuning);
    state
        .coins
        .iter()
        .filter(|c| c.y < player.max.y)
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .map(|c| c.lane)
}

/// Only step sideways from a settled stance into a lane with nothing close
fn can_change_lane(state: &RunState, lane: usize) -> bool {
    if lane >= LANE_COUNT
        || state.motion.is_switching_lanes()
        || state.motion.is_jumping()
        || state.motion.is_sliding()
    {
        return false;
    }

    let player = player_rect(&state.motion, &state.tuning);
    state
        .obstacles
        .iter()
        .filter(|o| o.lane == lane)
        .map(|o| obstacle_rect(o, &state.tuning))
        .all(|r| r.max.y <= player.min.y - LANE_CHANGE_CLEARANCE || r.min.y >= player.max.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::PlayerStore;
    use crate::persistence::MemoryStore;
    use crate::sim::state::Coin;
    use crate::sim::tick::tick;

    fn clear_state() -> RunState {
        let mut state = RunState::new(1);
        state.obstacles.clear();
        state.coins.clear();
        state
    }

    fn place_obstacle(state: &mut RunState, lane: usize, action: DodgeAction, y: f32) {
        let tuning = state.tuning.clone();
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, lane, action, 0, &tuning);
        obstacle.advance(y - tuning.spawn_y, &tuning);
        state.obstacles.push(obstacle);
    }

    #[test]
    fn test_idle_when_nothing_near() {
        let state = clear_state();
        assert!(choose_input(&state).is_empty());
    }

    #[test]
    fn test_reacts_to_obstacle_in_lane() {
        for action in [DodgeAction::Jump, DodgeAction::Slide] {
            let mut state = clear_state();
            place_obstacle(&mut state, 1, action, 1352.0);
            let input = choose_input(&state);
            assert_eq!(input.jump, action == DodgeAction::Jump);
            assert_eq!(input.slide, action == DodgeAction::Slide);
        }
    }

    #[test]
    fn test_ignores_far_and_side_obstacles() {
        let mut state = clear_state();
        place_obstacle(&mut state, 1, DodgeAction::Jump, 1250.0);
        place_obstacle(&mut state, 0, DodgeAction::Slide, 1600.0);
        assert!(choose_input(&state).is_empty());
    }

    #[test]
    fn test_chases_coin_when_clear() {
        let mut state = clear_state();
        let tuning = state.tuning.clone();
        let id = state.next_entity_id();
        state.coins.push(Coin::new(id, 2, &tuning));
        assert!(choose_input(&state).lane_right);

        // A lingering obstacle level with the player blocks the move
        place_obstacle(&mut state, 2, DodgeAction::Jump, 1700.0);
        assert!(!choose_input(&state).lane_right);
    }

    #[test]
    fn test_autopilot_survives() {
        for seed in [1, 7, 42, 1234] {
            let store = PlayerStore::open(MemoryStore::new());
            let mut state = RunState::new(seed);
            let input = TickInput {
                autopilot: true,
                ..Default::default()
            };
            for _ in 0..6000 {
                tick(&mut state, &input, &store);
                assert!(!state.is_game_over(), "seed {} died at {}", seed, state.distance);
            }
            assert!(state.obstacles_dodged >= 3);
        }
    }
}
