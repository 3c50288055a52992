//! Color Match Rush headless runner
//!
//! Drives the engine at a fixed 60 Hz with the demo player tapping for it,
//! then prints the session summary. Browser builds use `platform::WebGame`.
//!
//! Example:
//!   RUST_LOG=info cargo run -- --seed 7 --frames 7200 --high-score-file best.json

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;

    use color_match_rush::audio::{AudioRouter, LogSink};
    use color_match_rush::persistence::{HighScoreStore, JsonFileStore, MemoryStore};
    use color_match_rush::sim::{GamePhase, choose_tap};
    use color_match_rush::{Engine, Tuning};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Run Color Match Rush headless with the demo player")]
    struct Args {
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u32,
        /// Games to play before stopping
        #[arg(long, default_value_t = 1)]
        games: u32,
        #[arg(long, default_value_t = 400.0)]
        width: f32,
        #[arg(long, default_value_t = 600.0)]
        height: f32,
        /// JSON balance overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Where to keep the high score (in memory when omitted)
        #[arg(long)]
        high_score_file: Option<PathBuf>,
        /// Silence sound cue logging
        #[arg(long)]
        mute: bool,
    }

    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run() -> Result<(), Box<dyn Error>> {
        env_logger::init();
        let args = Args::parse();

        let mut tuning = match &args.tuning {
            Some(path) => Tuning::from_json(&fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };
        tuning.playfield.width = args.width;
        tuning.playfield.height = args.height;

        let store: Box<dyn HighScoreStore> = match &args.high_score_file {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        let seed = args.seed.unwrap_or_else(rand::random);
        let mut engine = Engine::with_tuning(tuning, seed, store)?;

        let mut router = AudioRouter::new();
        router.set_enabled(!args.mute);
        let mut sink = LogSink;
        engine.add_event_listener(move |event| {
            router.route(event, &mut sink);
            log::info!("{}", event);
        });

        log::info!("Color Match Rush (headless) seed {}", seed);
        engine.start_game();

        let mut games_played = 0;
        for frame in 0..args.frames {
            let ts = frame as f64 * FRAME_MS;
            engine.frame(ts);

            match engine.phase() {
                GamePhase::Playing => {
                    if let Some(tap) = choose_tap(engine.state()) {
                        engine.submit_pointer_input(tap.x, tap.y, ts);
                    }
                }
                GamePhase::GameOver => {
                    games_played += 1;
                    report(&engine, games_played);
                    if games_played >= args.games {
                        break;
                    }
                    engine.start_game();
                }
                GamePhase::Menu | GamePhase::Paused => {}
            }
        }

        if engine.phase() == GamePhase::Playing {
            log::info!("Frame budget exhausted mid-game");
            report(&engine, games_played + 1);
        }
        engine.destroy();
        Ok(())
    }

    fn report(engine: &Engine, game: u32) {
        let stats = engine.stats();
        println!(
            "game {}: score {} level {} lives {} (high score {})",
            game, stats.score, stats.level, stats.lives, stats.high_score
        );
        for achievement in stats.achievements.iter().filter(|a| a.unlocked) {
            println!("  {} {}", achievement.icon, achievement.name);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is platform::init
}
