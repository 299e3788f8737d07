//! Round state and core simulation types
//!
//! Everything the controller mutates during a tick lives here, so a round can
//! be snapshotted and compared for determinism.

use serde::{Deserialize, Serialize};

use crate::Cell;
use crate::consts::*;

/// The four ghosts. Blinky leads and is never penned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostKind {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Pinky,
        GhostKind::Inky,
        GhostKind::Clyde,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Dots eaten this round before the ghost may leave the house
    pub fn release_threshold(self) -> u32 {
        match self {
            GhostKind::Blinky => 0,
            GhostKind::Pinky => 15,
            GhostKind::Inky => 30,
            GhostKind::Clyde => 60,
        }
    }

    /// Mode a ghost has when a round starts
    pub fn start_mode(self) -> GhostMode {
        match self {
            GhostKind::Blinky => GhostMode::Scatter,
            _ => GhostMode::House,
        }
    }
}

/// Ghost behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostMode {
    /// Penned, waiting for its dot threshold
    House,
    /// Released, moving out of the pen
    LeaveHouse,
    Scatter,
    Chase,
    /// Vulnerable after a power item
    Frightened,
    /// Eaten, returning to the pen
    Eyes,
    /// Eyes arrived, dropping into the pen
    EnterHouse,
}

impl GhostMode {
    /// Scatter or chase, the modes in which a ghost catches the player
    pub fn is_hunting(self) -> bool {
        matches!(self, GhostMode::Scatter | GhostMode::Chase)
    }
}

/// Bonus fruit, one per level band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Cherries,
    Strawberry,
    Peach,
    Apple,
    Grapes,
    Galaxian,
    Bell,
    Key,
}

impl FruitKind {
    pub fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => FruitKind::Cherries,
            2 => FruitKind::Strawberry,
            3 | 4 => FruitKind::Peach,
            5 | 6 => FruitKind::Apple,
            7 | 8 => FruitKind::Grapes,
            9 | 10 => FruitKind::Galaxian,
            11 | 12 => FruitKind::Bell,
            _ => FruitKind::Key,
        }
    }

    pub fn points(self) -> u32 {
        FRUIT_SCORES[self as usize]
    }
}

/// Named audio cues; playback belongs to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Munch1,
    Munch2,
    Fruit,
    GhostEaten,
    Siren,
    PowerPellet,
    PlayerDeath,
    GameOver,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Munch1 => "munch_1",
            Cue::Munch2 => "munch_2",
            Cue::Fruit => "fruit",
            Cue::GhostEaten => "ghost_eaten",
            Cue::Siren => "siren",
            Cue::PowerPellet => "power_pellet",
            Cue::PlayerDeath => "player_death",
            Cue::GameOver => "game_over",
        }
    }
}

/// Fire-and-forget audio command emitted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueCommand {
    Play(Cue),
    Stop(Cue),
}

/// Outcome of collision resolution for one tick, applied by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A dot or power item was eaten; `total` is dots eaten this level
    DotEaten { cell: Cell, total: u32 },
    PowerItemEaten { cell: Cell },
    /// Last dot of the level eaten
    MazeCleared,
    FruitSpawned,
    FruitEaten { kind: FruitKind, points: u32 },
    GhostFrightened { ghost: GhostKind },
    /// `index` is the position in the capture chain of this frightened window
    GhostEaten {
        ghost: GhostKind,
        index: u32,
        points: u32,
    },
    PlayerCaught { by: GhostKind },
}

/// Counters owned by the round controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Master tick counter, advanced last in every tick
    pub ticks: u64,
    pub level: u32,
    pub score: u32,
    /// Best score seen, including the running game
    pub high_score: u32,
    /// Lives left, including the one in play
    pub lives: u32,
    /// Dots and power items eaten this level
    pub dots_eaten: u32,
    /// Dots and power items eaten since the last "READY!"
    pub dots_eaten_this_round: u32,
    /// Ghosts eaten since the last power item
    pub ghosts_eaten: u32,
    /// Tick play started this round, drives the scatter/chase schedule
    pub round_started_at: Option<u64>,
}

impl RoundState {
    /// Fresh game state, keeping the known high score
    pub fn new(high_score: u32) -> Self {
        Self {
            ticks: 0,
            level: 1,
            score: 0,
            high_score,
            lives: START_LIVES,
            dots_eaten: 0,
            dots_eaten_this_round: 0,
            ghosts_eaten: 0,
            round_started_at: None,
        }
    }

    /// Ticks since play began this round (zero before it begins)
    pub fn round_elapsed(&self) -> u64 {
        self.round_started_at
            .map(|start| self.ticks.saturating_sub(start))
            .unwrap_or(0)
    }

    pub fn fruit(&self) -> FruitKind {
        FruitKind::for_level(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fruit_by_level() {
        let expected = [
            (1, FruitKind::Cherries),
            (2, FruitKind::Strawberry),
            (3, FruitKind::Peach),
            (4, FruitKind::Peach),
            (5, FruitKind::Apple),
            (6, FruitKind::Apple),
            (7, FruitKind::Grapes),
            (8, FruitKind::Grapes),
            (9, FruitKind::Galaxian),
            (10, FruitKind::Galaxian),
            (11, FruitKind::Bell),
            (12, FruitKind::Bell),
            (13, FruitKind::Key),
            (99, FruitKind::Key),
        ];
        for (level, fruit) in expected {
            assert_eq!(FruitKind::for_level(level), fruit, "level {level}");
        }
    }

    #[test]
    fn test_fruit_points() {
        assert_eq!(FruitKind::Cherries.points(), 100);
        assert_eq!(FruitKind::Galaxian.points(), 2000);
        assert_eq!(FruitKind::Key.points(), 5000);
    }

    #[test]
    fn test_new_round_state() {
        let state = RoundState::new(4200);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.dots_eaten, 0);
        assert_eq!(state.dots_eaten_this_round, 0);
        assert_eq!(state.high_score, 4200);
        assert_eq!(state.round_elapsed(), 0);
    }

    #[test]
    fn test_round_elapsed() {
        let mut state = RoundState::new(0);
        state.round_started_at = Some(100);
        state.ticks = 250;
        assert_eq!(state.round_elapsed(), 150);
    }

    #[test]
    fn test_start_modes() {
        assert_eq!(GhostKind::Blinky.start_mode(), GhostMode::Scatter);
        assert_eq!(GhostKind::Clyde.start_mode(), GhostMode::House);
        assert!(GhostMode::Chase.is_hunting());
        assert!(!GhostMode::Eyes.is_hunting());
    }
}
