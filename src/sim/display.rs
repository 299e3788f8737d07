//! Cosmetic display state
//!
//! Recomputed at the end of every tick, suspended or not. Renderers read this
//! and never touch the round itself.

use serde::{Deserialize, Serialize};

use super::actors::GhostView;
use super::state::{FruitKind, GhostMode, RoundState};
use super::suspension::{SuspendReason, Suspension};
use super::timer::{TimerId, TimerSet};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerSprite {
    #[default]
    Hidden,
    /// Closed-mouth pose shown during "READY!"
    StartRound,
    Normal,
    /// Death animation, `frame` ticks in
    Dying { frame: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GhostSprite {
    #[default]
    Hidden,
    Normal,
    /// Blue ghost; `phase` alternates every 4 ticks, `flashing` near the end
    Frightened { phase: u8, flashing: bool },
    Eyes,
    /// Score sprite for the `index`-th ghost of the chain
    Score { index: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitSprite {
    Active(FruitKind),
    /// Score shown after the fruit was eaten
    Eaten(FruitKind),
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayState {
    pub player: PlayerSprite,
    pub ghosts: [GhostSprite; 4],
    pub fruit: Option<FruitSprite>,
    pub ready_text: bool,
    pub game_over_text: bool,
    /// Power items blink while play is running
    pub power_items_visible: bool,
    /// Maze alternates colors after a win
    pub maze_flash: bool,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    /// Fruit icons of the last few levels, oldest first
    pub level_fruits: Vec<FruitKind>,
}

pub fn compose(
    round: &RoundState,
    suspension: &Suspension,
    timers: &TimerSet,
    ghosts: &[GhostView],
) -> DisplayState {
    let now = round.ticks;

    let mut ghost_sprites = [GhostSprite::Hidden; 4];
    for view in ghosts {
        ghost_sprites[view.kind.index()] = ghost_sprite(round, suspension, timers, view);
    }

    let fruit = if timers.is_active(TimerId::FruitActive) {
        Some(FruitSprite::Active(round.fruit()))
    } else if timers.is_active(TimerId::FruitEaten) {
        Some(FruitSprite::Eaten(round.fruit()))
    } else {
        None
    };

    let maze_flash = suspension.has(SuspendReason::Won)
        && timers[TimerId::Ready]
            .ticks_since_started(now)
            .is_some_and(|t| t & 16 != 0);

    let first_level = round.level.saturating_sub(HUD_LEVEL_FRUITS - 1).max(1);

    DisplayState {
        player: player_sprite(suspension, timers, now),
        ghosts: ghost_sprites,
        fruit,
        ready_text: suspension.has(SuspendReason::Ready),
        game_over_text: suspension.has(SuspendReason::GameOver),
        power_items_visible: now & 8 != 0 || suspension.is_suspended(),
        maze_flash,
        score: round.score,
        high_score: round.high_score,
        lives: round.lives,
        level_fruits: (first_level..=round.level).map(FruitKind::for_level).collect(),
    }
}

fn player_sprite(suspension: &Suspension, timers: &TimerSet, now: u64) -> PlayerSprite {
    if suspension.has(SuspendReason::EatGhostPause) {
        PlayerSprite::Hidden
    } else if suspension.has(SuspendReason::Dead) {
        let frame = timers[TimerId::PlayerDeath]
            .ticks_since_started(now)
            .unwrap_or(PLAYER_DEATH_TICKS as u64);
        PlayerSprite::Dying { frame }
    } else if suspension.has(SuspendReason::Ready) {
        PlayerSprite::StartRound
    } else if suspension.has(SuspendReason::GameOver) || suspension.has(SuspendReason::Intermission)
    {
        PlayerSprite::Hidden
    } else {
        PlayerSprite::Normal
    }
}

fn ghost_sprite(
    round: &RoundState,
    suspension: &Suspension,
    timers: &TimerSet,
    view: &GhostView,
) -> GhostSprite {
    if timers.is_active(TimerId::GhostEaten(view.kind)) {
        let last = GHOST_EATEN_SCORES.len() as u32 - 1;
        return GhostSprite::Score {
            index: round.ghosts_eaten.saturating_sub(1).min(last),
        };
    }
    if suspension.has(SuspendReason::Dead) {
        // Ghosts vanish while the death animation plays
        return if timers.is_active(TimerId::PlayerDeath) {
            GhostSprite::Hidden
        } else {
            GhostSprite::Normal
        };
    }
    if suspension.has(SuspendReason::Won)
        || suspension.has(SuspendReason::GameOver)
        || suspension.has(SuspendReason::Intermission)
    {
        return GhostSprite::Hidden;
    }

    match view.mode {
        GhostMode::Frightened => {
            let t = timers[TimerId::Frightened(view.kind)]
                .ticks_since_started(round.ticks)
                .unwrap_or(0);
            let flash_from = (FRIGHTENED_TICKS - FRIGHTENED_FLASH_TICKS) as u64;
            GhostSprite::Frightened {
                phase: ((t / 4) & 1) as u8,
                flashing: t > flash_from && t & 0x10 != 0,
            }
        }
        GhostMode::Eyes | GhostMode::EnterHouse => GhostSprite::Eyes,
        _ => GhostSprite::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;
    use crate::sim::state::GhostKind;

    fn view(kind: GhostKind, mode: GhostMode) -> GhostView {
        GhostView {
            kind,
            mode,
            cell: Cell::ZERO,
        }
    }

    #[test]
    fn test_playing_display() {
        let mut round = RoundState::new(900);
        round.ticks = 8;
        round.score = 120;
        let display = compose(
            &round,
            &Suspension::new(),
            &TimerSet::new(),
            &[view(GhostKind::Blinky, GhostMode::Chase)],
        );

        assert_eq!(display.player, PlayerSprite::Normal);
        assert_eq!(display.ghosts[0], GhostSprite::Normal);
        assert_eq!(display.ghosts[1], GhostSprite::Hidden);
        assert!(display.power_items_visible);
        assert!(!display.ready_text);
        assert_eq!(display.score, 120);
        assert_eq!(display.high_score, 900);
        assert_eq!(display.level_fruits, vec![FruitKind::Cherries]);
    }

    #[test]
    fn test_ready_display() {
        let round = RoundState::new(0);
        let mut suspension = Suspension::new();
        suspension.set_exclusive(SuspendReason::Ready);
        let display = compose(&round, &suspension, &TimerSet::new(), &[]);

        assert_eq!(display.player, PlayerSprite::StartRound);
        assert!(display.ready_text);
        assert!(display.power_items_visible);
    }

    #[test]
    fn test_dying_frame_follows_death_timer() {
        let mut round = RoundState::new(0);
        let mut suspension = Suspension::new();
        let mut timers = TimerSet::new();
        suspension.add(SuspendReason::Dead);
        timers.start(TimerId::PlayerDeath, 100, None);
        round.ticks = 130;

        let display = compose(
            &round,
            &suspension,
            &timers,
            &[view(GhostKind::Inky, GhostMode::Chase)],
        );
        assert_eq!(display.player, PlayerSprite::Dying { frame: 30 });
        assert_eq!(display.ghosts[GhostKind::Inky.index()], GhostSprite::Hidden);
    }

    #[test]
    fn test_frightened_flashing_near_end() {
        let mut round = RoundState::new(0);
        let mut timers = TimerSet::new();
        let kind = GhostKind::Pinky;
        timers.start(TimerId::Frightened(kind), 0, None);

        round.ticks = 4;
        let early = compose(&round, &Suspension::new(), &timers, &[view(kind, GhostMode::Frightened)]);
        assert_eq!(
            early.ghosts[kind.index()],
            GhostSprite::Frightened {
                phase: 1,
                flashing: false
            }
        );

        round.ticks = 560;
        let late = compose(&round, &Suspension::new(), &timers, &[view(kind, GhostMode::Frightened)]);
        assert_eq!(
            late.ghosts[kind.index()],
            GhostSprite::Frightened {
                phase: 0,
                flashing: true
            }
        );
    }

    #[test]
    fn test_eaten_ghost_shows_score() {
        let mut round = RoundState::new(0);
        round.ghosts_eaten = 2;
        let mut timers = TimerSet::new();
        let mut suspension = Suspension::new();
        suspension.add(SuspendReason::EatGhostPause);
        timers.start(TimerId::GhostEaten(GhostKind::Clyde), 0, None);

        let display = compose(
            &round,
            &suspension,
            &timers,
            &[view(GhostKind::Clyde, GhostMode::Eyes)],
        );
        assert_eq!(display.player, PlayerSprite::Hidden);
        assert_eq!(
            display.ghosts[GhostKind::Clyde.index()],
            GhostSprite::Score { index: 1 }
        );
    }

    #[test]
    fn test_long_ghost_chain_keeps_last_score_sprite() {
        let mut round = RoundState::new(0);
        round.ghosts_eaten = 5;
        let mut timers = TimerSet::new();
        timers.start(TimerId::GhostEaten(GhostKind::Clyde), 0, None);

        let display = compose(
            &round,
            &Suspension::new(),
            &timers,
            &[view(GhostKind::Clyde, GhostMode::Eyes)],
        );
        assert_eq!(
            display.ghosts[GhostKind::Clyde.index()],
            GhostSprite::Score { index: 3 }
        );
    }

    #[test]
    fn test_level_fruits_window() {
        let mut round = RoundState::new(0);
        round.level = 9;
        let display = compose(&round, &Suspension::new(), &TimerSet::new(), &[]);
        assert_eq!(
            display.level_fruits,
            vec![
                FruitKind::Peach,
                FruitKind::Peach,
                FruitKind::Apple,
                FruitKind::Apple,
                FruitKind::Grapes,
                FruitKind::Grapes,
                FruitKind::Galaxian,
            ]
        );
    }

    #[test]
    fn test_fruit_sprite() {
        let round = RoundState::new(0);
        let mut timers = TimerSet::new();
        timers.start(TimerId::FruitEaten, 0, None);
        let display = compose(&round, &Suspension::new(), &timers, &[]);
        assert_eq!(display.fruit, Some(FruitSprite::Eaten(FruitKind::Cherries)));
    }
}
