//! Maze Round entry point
//!
//! Runs the round controller headless at a fixed timestep with demo actors,
//! draining audio cues every tick and logging progress.

use std::path::PathBuf;

use clap::Parser;

use maze_round::audio::{AudioManager, CueSink};
use maze_round::consts::TICKS_PER_SECOND;
use maze_round::demo::classic_cast;
use maze_round::sim::{RoundController, SuspendReason};
use maze_round::{JsonFileStore, Settings};

/// Headless maze-chase round runner
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Ticks to simulate (60 per second)
    #[arg(long, default_value_t = 10 * 60 * TICKS_PER_SECOND as u64)]
    ticks: u64,

    /// Seed for the demo actors
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Settings file
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// High score file, overrides the settings
    #[arg(long)]
    high_score: Option<PathBuf>,
}

/// Progress log interval
const REPORT_TICKS: u64 = 30 * TICKS_PER_SECOND as u64;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = Settings::load(&args.settings);
    let store = JsonFileStore::new(args.high_score.unwrap_or_else(|| settings.high_score_path.clone()));
    log::info!(
        "Maze Round starting: {} ticks, seed {}, high scores in {}",
        args.ticks,
        args.seed,
        store.path().display()
    );

    let (maze, player, ghosts) = classic_cast(args.seed);
    let mut controller = RoundController::new(maze, player, ghosts, store, settings.show_intro);
    let mut audio = AudioManager::new(settings.muted);

    let mut games = 0;
    let mut was_game_over = false;

    for step in 0..args.ticks {
        controller.tick();
        audio.handle_all(controller.take_cues());

        if controller.suspension().has(SuspendReason::Intermission) {
            // No one to press start
            log::info!("Skipping instructions");
            controller.dismiss_intro();
        }

        let game_over = controller.suspension().has(SuspendReason::GameOver);
        if game_over && !was_game_over {
            games += 1;
        }
        was_game_over = game_over;

        if (step + 1) % REPORT_TICKS == 0 {
            let round = controller.round();
            log::info!(
                "[{:>6}] level {} score {} lives {} high {}",
                step + 1,
                round.level,
                round.score,
                round.lives,
                round.high_score
            );
        }
    }

    let round = controller.round();
    log::info!(
        "Done: {} games finished, current score {}, high score {}, {} cues played",
        games,
        round.score,
        round.high_score,
        audio.played()
    );
    match serde_json::to_string(controller.display()) {
        Ok(json) => log::debug!("Final display: {}", json),
        Err(err) => log::warn!("Could not serialize display state: {}", err),
    }
}
