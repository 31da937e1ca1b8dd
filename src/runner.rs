//! Drives the simulation at a fixed cadence
//!
//! `FixedStep` turns variable frame time into whole ticks for hosts with
//! their own frame callback. `GameLoop` owns a run and the shared player
//! store and either steps on demand or runs its own sleeping loop until a
//! stop flag is raised.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::consts::{MAX_SUBSTEPS, SIM_DT, TICK_INTERVAL_MS};
use crate::economy::PlayerStore;
use crate::sim::{RunState, Snapshot, TickInput, tick};

/// Longest frame time accepted in one update (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Add `frame_dt` seconds and return how many ticks are due now.
    /// Non-finite frame times add nothing.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() {
            self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        }

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    /// Time carried over to the next frame
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }
}

/// A run plus the store it credits coins to
pub struct GameLoop {
    pub state: RunState,
    store: Arc<PlayerStore>,
    tick_interval: Duration,
}

impl GameLoop {
    pub fn new(state: RunState, store: Arc<PlayerStore>) -> Self {
        Self {
            state,
            store,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }

    /// Override the sleep between ticks in [`GameLoop::run`]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn store(&self) -> &Arc<PlayerStore> {
        &self.store
    }

    /// Run one tick and describe the result
    pub fn step(&mut self, input: &TickInput) -> Snapshot {
        tick(&mut self.state, input, &self.store);
        Snapshot::capture(&self.state, self.store.coins())
    }

    /// Run `count` ticks with the same input, returning the last snapshot
    pub fn step_many(&mut self, input: &TickInput, count: NonZeroU32) -> Snapshot {
        for _ in 1..count.get() {
            tick(&mut self.state, input, &self.store);
        }
        self.step(input)
    }

    /// Tick until `stop` is raised, sleeping the tick interval in between.
    /// `stop` is only checked between ticks. Returns the number of ticks run.
    pub fn run(
        &mut self,
        stop: &AtomicBool,
        mut input_source: impl FnMut(&RunState) -> TickInput,
        mut on_snapshot: impl FnMut(&Snapshot),
    ) -> u64 {
        let mut ticks = 0;
        log::info!("Game loop started (seed {})", self.state.seed);

        while !stop.load(Ordering::Relaxed) {
            let input = input_source(&self.state);
            let snapshot = self.step(&input);
            on_snapshot(&snapshot);
            ticks += 1;

            if !self.tick_interval.is_zero() {
                thread::sleep(self.tick_interval);
            }
        }

        log::info!("Game loop stopped after {} ticks", ticks);
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::GamePhase;

    fn game_loop(seed: u64) -> GameLoop {
        let store = Arc::new(PlayerStore::open(MemoryStore::new()));
        GameLoop::new(RunState::new(seed), store).with_tick_interval(Duration::ZERO)
    }

    #[test]
    fn test_fixed_step_caps_frame_time() {
        let mut steps = FixedStep::default();
        // A long stall counts as 0.1 s
        assert_eq!(steps.advance(5.0), 5);
        assert!(steps.remainder() < SIM_DT);
        assert_eq!(steps.advance(-1.0), 0);
    }

    #[test]
    fn test_fixed_step_limits_substeps() {
        let mut steps = FixedStep::new(0.001, 8);
        assert_eq!(steps.advance(0.1), 8);
        // The backlog is kept, not dropped
        assert!(steps.remainder() > 0.09);
        assert_eq!(steps.advance(0.0), 8);
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut steps = FixedStep::new(0.5, 8);
        assert_eq!(steps.advance(0.0625), 0);
        assert_eq!(steps.advance(0.0625), 0);
        assert_eq!(steps.advance(0.125), 0);
        assert_eq!(steps.advance(0.0625), 0);
        // 0.3125 carried
        assert_eq!(steps.advance(0.0625), 0);
        assert_eq!(steps.advance(0.0625), 0);
        assert_eq!(steps.advance(0.0625), 1);
        assert_eq!(steps.remainder(), 0.0);
    }

    #[test]
    fn test_fixed_step_counts_long_frames_as_capped() {
        let mut steps = FixedStep::new(0.35, 8);
        // Each 0.25 s frame adds only 0.1 s
        assert_eq!(steps.advance(0.25), 0);
        assert_eq!(steps.advance(0.25), 0);
        assert_eq!(steps.advance(0.25), 0);
        assert_eq!(steps.advance(0.25), 1);
        assert!((steps.remainder() - 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_fixed_step_ignores_non_finite_frames() {
        let mut steps = FixedStep::new(0.05, 8);
        assert_eq!(steps.advance(f32::NAN), 0);
        assert_eq!(steps.advance(f32::INFINITY), 0);
        assert!(steps.remainder().is_finite());
        assert_eq!(steps.advance(0.0625), 1);
        assert_eq!(steps.advance(0.0625), 1);
    }

    #[test]
    fn test_step_returns_snapshot() {
        let mut game = game_loop(3);
        let snapshot = game.step(&TickInput::default());
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.distance, 1);
        assert_eq!(snapshot.phase, GamePhase::Playing);

        let snapshot = game.step_many(&TickInput::default(), NonZeroU32::new(9).unwrap());
        assert_eq!(snapshot.tick, 10);

        let snapshot = game.step_many(&TickInput::default(), NonZeroU32::MIN);
        assert_eq!(snapshot.tick, 11);
    }

    #[test]
    fn test_run_stops_on_signal() {
        let mut game = game_loop(8);
        let stop = AtomicBool::new(false);
        let mut seen = Vec::new();

        let ticks = game.run(
            &stop,
            |_| TickInput {
                autopilot: true,
                ..Default::default()
            },
            |snapshot| {
                seen.push(snapshot.tick);
                if seen.len() == 50 {
                    stop.store(true, Ordering::Relaxed);
                }
            },
        );

        assert_eq!(ticks, 50);
        assert_eq!(seen, (1..=50).collect::<Vec<u64>>());
        assert_eq!(game.state.time_ticks, 50);
    }

    #[test]
    fn test_run_from_another_thread() {
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut game = game_loop(2).with_tick_interval(Duration::from_millis(1));
            game.run(&worker_stop, |_| TickInput::default(), |_| {})
        });

        thread::sleep(Duration::from_millis(30));
        stop.store(true, Ordering::Relaxed);
        let ticks = handle.join().unwrap();
        assert!(ticks > 0);
    }
}
