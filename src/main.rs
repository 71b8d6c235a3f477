//! Scuba Dive entry point
//!
//! In the browser the page drives a [`scuba_dive::Session`]; the start entry
//! only installs the panic hook and logger. Natively this binary plays
//! headless runs with a scripted diver, which is handy for tuning config
//! files and checking the difficulty curve.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use scuba_dive::input::{Key, KeyState};
    use scuba_dive::platform::{Clock, unix_time_ms};
    use scuba_dive::sim::{GameEvent, GameState, ItemKind, tick};
    use scuba_dive::{GameConfig, HighScores};

    /// Frame interval for simulated time (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(name = "scuba-dive", version)]
    #[command(about = "Play headless Scuba Dive runs with a scripted diver")]
    pub struct Cli {
        /// JSON config file; missing keys take their defaults
        #[arg(long)]
        pub config: Option<PathBuf>,
        /// Leaderboard file the final score is recorded in
        #[arg(long, default_value = "scuba_dive_highscores.json")]
        pub scores: PathBuf,
        /// RNG seed (defaults to the current Unix time in ms)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Give up after this much game time (seconds)
        #[arg(long, default_value_t = 300.0)]
        pub seconds: f64,
        /// Name entered on the leaderboard
        #[arg(long, default_value = "Autopilot")]
        pub name: String,
        /// Sample a real clock and sleep between frames
        #[arg(long)]
        pub realtime: bool,
    }

    /// Scripted diver: dives while it has air, heads for fish, surfaces when low
    struct Autopilot {
        keys: KeyState,
        frame: u64,
    }

    impl Autopilot {
        fn new() -> Self {
            Self {
                keys: KeyState::new(),
                frame: 0,
            }
        }

        /// Keys for this frame; strokes are re-tapped every few frames
        fn steer(&mut self, state: &GameState) -> KeyState {
            self.frame += 1;
            self.keys.clear();
            // Key must be released between strokes for a new impulse
            if self.frame % 4 != 0 {
                return self.keys;
            }

            let player = &state.player;
            let center = player.body.bounds().center();

            if player.breath_fraction() > 0.35 {
                self.keys.press(Key::S);
            }

            let target = state
                .collectables
                .iter()
                .filter(|c| matches!(c.kind, ItemKind::Good { .. }))
                .map(|c| c.body.bounds().center())
                .min_by(|a, b| {
                    let (da, db) = ((*a - center).length(), (*b - center).length());
                    da.total_cmp(&db)
                });

            if let Some(item) = target {
                let dx = item.x - center.x;
                if dx > 10.0 {
                    self.keys.press(Key::D);
                } else if dx < -10.0 {
                    self.keys.press(Key::A);
                }
            }

            self.keys
        }
    }

    /// Play one run to completion (or until `max_ms`), returning the final score if it ended
    pub fn play_run(
        state: &mut GameState,
        mut now: impl FnMut() -> f64,
        max_ms: f64,
    ) -> Option<i64> {
        let mut pilot = Autopilot::new();
        let start = now();
        state.start(start);

        loop {
            let t = now();
            let keys = pilot.steer(state);
            tick(state, &keys, t);

            for event in state.drain_events() {
                match event {
                    GameEvent::ReturnedToMenu { final_score } => return Some(final_score),
                    GameEvent::PlayerDied { score } => {
                        log::info!("Diver ran out of air at {}", score)
                    }
                    GameEvent::ItemCollected { bad: true, .. } => log::debug!("Ate junk food"),
                    _ => {}
                }
            }

            if t - start >= max_ms {
                log::warn!("Time limit reached with score {}", state.score);
                return None;
            }
        }
    }

    /// Play against simulated 60 Hz timestamps
    pub fn play_simulated(state: &mut GameState, max_ms: f64) -> Option<i64> {
        let mut t = 0.0;
        play_run(
            state,
            || {
                t += FRAME_MS;
                t
            },
            max_ms,
        )
    }

    pub fn run(cli: Cli) -> ExitCode {
        let seed = cli.seed.unwrap_or_else(|| unix_time_ms() as u64);
        log::info!("Scuba Dive (headless) starting, seed {}", seed);

        let config = match &cli.config {
            Some(path) => match GameConfig::load(path) {
                Ok(config) => config,
                Err(err) => {
                    log::error!("{}", err);
                    eprintln!("scuba-dive: {}", err);
                    return ExitCode::FAILURE;
                }
            },
            None => GameConfig::default(),
        };

        let mut state = GameState::new(&config, seed, 0.0);
        let max_ms = cli.seconds * 1000.0;

        let result = if cli.realtime {
            let clock = Clock::new();
            play_run(
                &mut state,
                || {
                    std::thread::sleep(std::time::Duration::from_secs_f64(FRAME_MS / 1000.0));
                    clock.now_ms()
                },
                max_ms,
            )
        } else {
            play_simulated(&mut state, max_ms)
        };

        let Some(final_score) = result else {
            println!("Run did not finish within {} s (score {})", cli.seconds, state.score);
            return ExitCode::SUCCESS;
        };
        println!("Final score: {}", final_score);

        let mut scores = HighScores::load(&cli.scores);
        let notice = GameEvent::ReturnedToMenu { final_score };
        if let Some(rank) = scores.record(&notice, &cli.name, unix_time_ms()) {
            println!("New high score! Rank #{}", rank);
            if let Err(err) = scores.save(&cli.scores) {
                log::error!("Could not save high scores: {}", err);
                return ExitCode::FAILURE;
            }
        }
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::init();
    headless::run(headless::Cli::parse())
}

/// Browser start hook; the page constructs and drives a `Session` itself
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger was already initialised".into());
    }
    log::info!("Scuba Dive {} loaded", env!("CARGO_PKG_VERSION"));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
