//! Lane Runner entry point
//!
//! Native builds play autopilot runs headless against a file-backed player
//! store, spending the collected coins in the shop between runs.
//!
//! Usage: `lane-runner [seed] [runs] [data-dir]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use clap::Parser;
    use thiserror::Error;

    use lane_runner::catalog::{self, CATALOG};
    use lane_runner::persistence::FileStore;
    use lane_runner::sim::{RunState, TickInput};
    use lane_runner::{GameLoop, PlayerStore, StorageError, Tuning};

    /// Runs that outlive this many ticks are stopped
    const MAX_RUN_TICKS: u64 = 60_000;

    #[derive(Debug, Error)]
    pub enum AppError {
        #[error(transparent)]
        Storage(#[from] StorageError),
    }

    /// Play autopilot runs headless and spend the coins between runs
    #[derive(Parser, Debug)]
    #[command(name = "lane-runner")]
    #[command(about = "Headless lane runner", long_about = None)]
    #[command(version)]
    struct Args {
        /// Seed of the first run; later runs use seed + 1, seed + 2, ...
        #[arg(default_value_t = 42)]
        seed: u64,

        /// Number of runs to play
        #[arg(default_value_t = 3)]
        runs: u32,

        /// Directory holding the player record and tuning
        #[arg(default_value = "save")]
        data_dir: PathBuf,
    }

    pub fn run() -> Result<(), AppError> {
        let args = Args::parse();
        let backend = FileStore::new(&args.data_dir)?;
        let tuning = Tuning::load(&backend);
        let store = Arc::new(PlayerStore::open(backend));

        log::info!(
            "Lane Runner (headless) starting: seed {}, {} runs, data in {}",
            args.seed,
            args.runs,
            args.data_dir.display()
        );
        log::info!("Balance: {} coins", store.coins());

        for run in 0..args.runs {
            let state = RunState::with_tuning(args.seed.wrapping_add(u64::from(run)), tuning.clone());
            let mut game =
                GameLoop::new(state, Arc::clone(&store)).with_tick_interval(Duration::ZERO);

            let stop = AtomicBool::new(false);
            game.run(
                &stop,
                |_| TickInput {
                    autopilot: true,
                    ..Default::default()
                },
                |snapshot| {
                    if snapshot.is_game_over() || snapshot.tick >= MAX_RUN_TICKS {
                        stop.store(true, Ordering::Relaxed);
                    }
                },
            );

            let summary = game.state.summary();
            log::info!(
                "Run {}: score {}, distance {}, {} coins, {} obstacles dodged{}",
                run + 1,
                summary.score,
                summary.distance,
                summary.coins_collected,
                summary.obstacles_dodged,
                if game.state.is_game_over() { "" } else { " (stopped)" }
            );

            go_shopping(&store);
        }

        let player = store.player();
        log::info!(
            "Done: {} coins, trail {:?}, glow {:?}",
            player.coins,
            player.equipped_trail.as_deref().unwrap_or("None"),
            player.equipped_glow.as_deref().unwrap_or("None")
        );
        Ok(())
    }

    /// Buy and equip the cheapest affordable item not yet owned
    fn go_shopping(store: &PlayerStore) {
        let player = store.player();
        let Some(item) = CATALOG
            .iter()
            .filter(|item| !player.owns(item.category, item.id) && item.price <= player.coins)
            .min_by_key(|item| item.price)
        else {
            return;
        };

        match catalog::purchase(store, item.id) {
            Ok(balance) => {
                log::info!("Bought {} ({} coins left)", item.name, balance);
                if item.category.is_equippable()
                    && let Err(e) = store.equip_item(item.category, Some(item.id))
                {
                    log::warn!("Could not equip {}: {}", item.name, e);
                }
            }
            Err(e) => log::info!("Purchase declined: {}", e),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_defaults() {
            let args = Args::try_parse_from(["lane-runner"]).unwrap();
            assert_eq!(args.seed, 42);
            assert_eq!(args.runs, 3);
            assert_eq!(args.data_dir, PathBuf::from("save"));
        }

        #[test]
        fn test_args_positional() {
            let args = Args::try_parse_from(["lane-runner", "7", "10", "/tmp/runs"]).unwrap();
            assert_eq!(args.seed, 7);
            assert_eq!(args.runs, 10);
            assert_eq!(args.data_dir, PathBuf::from("/tmp/runs"));
        }

        #[test]
        fn test_args_reject_bad_numbers() {
            assert!(Args::try_parse_from(["lane-runner", "seven"]).is_err());
            assert!(Args::try_parse_from(["lane-runner", "1", "-3"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts drive the library directly on the web
}
