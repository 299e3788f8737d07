//! Maze Round - round controller for a maze-chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, suspension, mode schedule, collisions)
//! - `audio`: Cue sink for fire-and-forget sound commands
//! - `highscores`: High score persistence
//! - `settings`: Host configuration
//! - `demo`: Random-walk actors for the headless runner

pub mod audio;
pub mod demo;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore, StoreError};
pub use settings::Settings;

use glam::IVec2;

/// A maze grid coordinate (column, row)
pub type Cell = IVec2;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Scores
    pub const DOT_SCORE: u32 = 10;
    pub const POWER_ITEM_SCORE: u32 = 50;
    pub const GHOST_EATEN_SCORES: [u32; 4] = [200, 400, 800, 1600];
    /// Indexed by `FruitKind as usize`
    pub const FRUIT_SCORES: [u32; 8] = [100, 300, 500, 700, 1000, 2000, 3000, 5000];

    /// Lives at the start of a game (includes the one about to be played)
    pub const START_LIVES: u32 = 3;

    /// Freeze after eating a ghost so the score sprite can show
    pub const GHOST_EATEN_FREEZE_TICKS: u32 = 60;
    /// Player death animation
    pub const PLAYER_DEATH_TICKS: u32 = 150;
    /// "READY!" countdown before play begins
    pub const READY_TICKS: u32 = 2 * TICKS_PER_SECOND;
    /// Maze flashing after the last dot
    pub const ROUND_WON_TICKS: u32 = 4 * TICKS_PER_SECOND;
    /// "GAME OVER" display before a full reset
    pub const GAME_OVER_TICKS: u32 = 3 * TICKS_PER_SECOND;
    /// Ghost frightened duration (same on every level)
    pub const FRIGHTENED_TICKS: u32 = 10 * TICKS_PER_SECOND;
    /// Frightened ghosts flash during their last second
    pub const FRIGHTENED_FLASH_TICKS: u32 = TICKS_PER_SECOND;

    /// Fruit stays on the board this long if not eaten
    pub const FRUIT_ACTIVE_TICKS: u32 = 560;
    /// Fruit score sprite display
    pub const FRUIT_EATEN_TICKS: u32 = 2 * TICKS_PER_SECOND;
    /// Total dots eaten that spawn a fruit
    pub const FRUIT_SPAWN_DOTS: [u32; 2] = [70, 170];
    /// Cell where the fruit appears (below the ghost house)
    pub const FRUIT_CELL: IVec2 = IVec2::new(14, 17);

    /// Player stalls for a tick after eating a dot, three after a power item
    pub const DOT_STALL_TICKS: u32 = 1;
    pub const POWER_ITEM_STALL_TICKS: u32 = 3;

    /// Scatter/chase windows: 10 s each, seven windows, then chase forever
    pub const SCATTER_CHASE_WINDOW_TICKS: u64 = 10 * TICKS_PER_SECOND as u64;
    pub const SCATTER_CHASE_WINDOWS: u64 = 7;

    /// Level fruit icons shown in the HUD
    pub const HUD_LEVEL_FRUITS: u32 = 7;
}
