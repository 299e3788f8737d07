//! Countdown timers
//!
//! Every deferred transition in a round is a timer counting down whole ticks.
//! A timer carries an optional tagged completion action; the round controller
//! interprets it when the timer fires, so timers never hold closures.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::state::GhostKind;
use crate::consts::*;

/// What the round controller does when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Initialise a round and start the "READY!" countdown
    BeginReady,
    /// Countdown done, lift the suspension and start play
    StartPlay,
    /// All dots eaten
    WinRound,
    /// Last life lost
    EndGame,
    /// Reinitialise everything for a new game
    ResetGame,
    /// Ghost score sprite shown long enough
    EndGhostPause,
}

/// A single countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    /// Duration used when `start` is called without one
    default_duration: u32,
    /// Duration of the current (or last) run
    duration: u32,
    /// Ticks left before firing, always within `0..=duration`
    remaining: u32,
    /// Tick `start` was last called on
    started_at: u64,
    active: bool,
    action: Option<TimerAction>,
}

impl Timer {
    /// Timer without a completion action
    pub fn new(default_duration: u32) -> Self {
        Self {
            default_duration,
            duration: default_duration,
            remaining: 0,
            started_at: 0,
            active: false,
            action: None,
        }
    }

    /// Timer that hands `action` to the controller when it fires
    pub fn with_action(default_duration: u32, action: TimerAction) -> Self {
        Self {
            action: Some(action),
            ..Self::new(default_duration)
        }
    }

    /// Arm the timer. Restarting an active timer begins again from the full
    /// duration; it never extends the current run.
    pub fn start(&mut self, at_tick: u64, duration: Option<u32>) {
        self.duration = duration.unwrap_or(self.default_duration);
        self.remaining = self.duration;
        self.started_at = at_tick;
        self.active = true;
    }

    /// Deactivate without firing. No-op when already inactive.
    pub fn disable(&mut self) {
        self.active = false;
    }

    /// Deactivate and forget the last run
    pub fn reset(&mut self) {
        self.active = false;
        self.duration = self.default_duration;
        self.remaining = 0;
        self.started_at = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn action(&self) -> Option<TimerAction> {
        self.action
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Ticks elapsed since the running countdown was started, `None` when inactive
    pub fn ticks_since_started(&self, current_tick: u64) -> Option<u64> {
        self.active
            .then(|| current_tick.saturating_sub(self.started_at))
    }

    /// Advance one tick. Returns true exactly once per run, on the tick the
    /// countdown reaches zero; the timer is already inactive at that point.
    ///
    /// A timer is not advanced on the tick it was started, so a zero-length
    /// timer fires on the following tick.
    pub fn tick(&mut self, current_tick: u64) -> bool {
        if !self.active || current_tick == self.started_at {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// Identifies one timer in the controller's set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerId {
    /// Player stalls one tick after a dot
    DotStall,
    /// Player stalls three ticks after a power item
    PowerStall,
    Ready,
    RoundStart,
    RoundWon,
    GameOver,
    Reset,
    FruitActive,
    FruitEaten,
    PlayerDeath,
    GhostPause,
    Frightened(GhostKind),
    GhostEaten(GhostKind),
}

/// Number of timers in a `TimerSet`
pub const TIMER_COUNT: usize = 11 + 2 * GhostKind::ALL.len();

impl TimerId {
    /// Position in the tick order
    pub fn index(self) -> usize {
        match self {
            TimerId::DotStall => 0,
            TimerId::PowerStall => 1,
            TimerId::Ready => 2,
            TimerId::RoundStart => 3,
            TimerId::RoundWon => 4,
            TimerId::GameOver => 5,
            TimerId::Reset => 6,
            TimerId::FruitActive => 7,
            TimerId::FruitEaten => 8,
            TimerId::PlayerDeath => 9,
            TimerId::GhostPause => 10,
            TimerId::Frightened(kind) => 11 + 2 * kind.index(),
            TimerId::GhostEaten(kind) => 12 + 2 * kind.index(),
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        let id = match index {
            0 => TimerId::DotStall,
            1 => TimerId::PowerStall,
            2 => TimerId::Ready,
            3 => TimerId::RoundStart,
            4 => TimerId::RoundWon,
            5 => TimerId::GameOver,
            6 => TimerId::Reset,
            7 => TimerId::FruitActive,
            8 => TimerId::FruitEaten,
            9 => TimerId::PlayerDeath,
            10 => TimerId::GhostPause,
            i if i < TIMER_COUNT => {
                let kind = GhostKind::ALL[(i - 11) / 2];
                if (i - 11) % 2 == 0 {
                    TimerId::Frightened(kind)
                } else {
                    TimerId::GhostEaten(kind)
                }
            }
            _ => return None,
        };
        Some(id)
    }

    /// All timers in tick order
    pub fn all() -> impl Iterator<Item = TimerId> {
        (0..TIMER_COUNT).filter_map(TimerId::from_index)
    }

    fn make_timer(self) -> Timer {
        match self {
            // Stall timers expire at the top of the first tick the player moves again
            TimerId::DotStall => Timer::new(DOT_STALL_TICKS + 1),
            TimerId::PowerStall => Timer::new(POWER_ITEM_STALL_TICKS + 1),
            TimerId::Ready => Timer::with_action(0, TimerAction::BeginReady),
            TimerId::RoundStart => Timer::with_action(READY_TICKS, TimerAction::StartPlay),
            TimerId::RoundWon => Timer::with_action(0, TimerAction::WinRound),
            TimerId::GameOver => Timer::with_action(0, TimerAction::EndGame),
            TimerId::Reset => Timer::with_action(GAME_OVER_TICKS, TimerAction::ResetGame),
            TimerId::FruitActive => Timer::new(FRUIT_ACTIVE_TICKS),
            TimerId::FruitEaten => Timer::new(FRUIT_EATEN_TICKS),
            TimerId::PlayerDeath => Timer::new(PLAYER_DEATH_TICKS),
            TimerId::GhostPause => {
                Timer::with_action(GHOST_EATEN_FREEZE_TICKS, TimerAction::EndGhostPause)
            }
            TimerId::Frightened(_) => Timer::new(FRIGHTENED_TICKS),
            TimerId::GhostEaten(_) => Timer::new(GHOST_EATEN_FREEZE_TICKS),
        }
    }
}

/// The controller's fixed set of timers, created once and restarted as needed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSet {
    timers: Vec<Timer>,
}

impl Default for TimerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerSet {
    pub fn new() -> Self {
        Self {
            timers: TimerId::all().map(TimerId::make_timer).collect(),
        }
    }

    pub fn start(&mut self, id: TimerId, at_tick: u64, duration: Option<u32>) {
        self[id].start(at_tick, duration);
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self[id].is_active()
    }

    pub fn disable_all(&mut self) {
        self.timers.iter_mut().for_each(Timer::disable);
    }

    pub fn reset_all(&mut self) {
        self.timers.iter_mut().for_each(Timer::reset);
    }

    /// True while any ghost's frightened countdown is running
    pub fn any_frightened(&self) -> bool {
        GhostKind::ALL
            .iter()
            .any(|&kind| self.is_active(TimerId::Frightened(kind)))
    }
}

impl Index<TimerId> for TimerSet {
    type Output = Timer;

    fn index(&self, id: TimerId) -> &Timer {
        &self.timers[id.index()]
    }
}

impl IndexMut<TimerId> for TimerSet {
    fn index_mut(&mut self, id: TimerId) -> &mut Timer {
        &mut self.timers[id.index()]
    }
}
