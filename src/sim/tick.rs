//! Fixed timestep round controller
//!
//! One call to `RoundController::tick` is one 60 Hz tick:
//! 1. advance every timer, dispatching completion actions as they fire
//! 2. fall back from the power-pellet cue to the siren once no ghost is frightened
//! 3. unless suspended, move actors and resolve collisions
//! 4. recompute display state
//! 5. advance the master tick counter

use super::actors::{Adversary, GhostView, Player};
use super::collision::{CollisionInput, resolve_collisions};
use super::display::{self, DisplayState};
use super::maze::Maze;
use super::schedule::{ModeContext, may_leave_house, scatter_chase_phase};
use super::state::{Cue, CueCommand, GameEvent, GhostKind, GhostMode, RoundState};
use super::suspension::{SuspendReason, Suspension};
use super::timer::{TimerAction, TimerId, TimerSet};
use crate::consts::*;
use crate::highscores::{HighScoreStore, load_high_score, save_high_score};

/// Drives the round lifecycle: ready, playing, pauses, won/lost, reset.
///
/// There is no terminal state. Game over always schedules a reset, which
/// schedules the next "READY!".
pub struct RoundController<M, P, G, S> {
    round: RoundState,
    suspension: Suspension,
    timers: TimerSet,
    maze: M,
    player: P,
    ghosts: [G; 4],
    store: S,
    /// Looping background cue currently playing
    ambient: Option<Cue>,
    /// Audio commands not yet drained by the host
    cues: Vec<CueCommand>,
    display: DisplayState,
    /// Best score known to be persisted
    saved_high_score: u32,
}

impl<M, P, G, S> RoundController<M, P, G, S>
where
    M: Maze,
    P: Player,
    G: Adversary,
    S: HighScoreStore,
{
    /// Load the high score and reset into a new game. With `show_intro` the
    /// game waits behind the intermission until `dismiss_intro` is called.
    pub fn new(maze: M, player: P, ghosts: [G; 4], store: S, show_intro: bool) -> Self {
        let high_score = load_high_score(&store);
        let mut controller = Self {
            round: RoundState::new(high_score),
            suspension: Suspension::new(),
            timers: TimerSet::new(),
            maze,
            player,
            ghosts,
            store,
            ambient: None,
            cues: Vec::new(),
            display: DisplayState::default(),
            saved_high_score: high_score,
        };
        controller.reset();
        if show_intro {
            controller.timers[TimerId::Ready].disable();
            controller.suspension.add(SuspendReason::Intermission);
        }
        controller
    }

    /// Advance the round by one fixed tick
    pub fn tick(&mut self) {
        self.advance_timers();
        self.update_ambient();

        if !self.suspension.is_suspended() {
            self.update_actors();
        }

        self.round.high_score = self.round.high_score.max(self.round.score);
        self.display = display::compose(
            &self.round,
            &self.suspension,
            &self.timers,
            &self.ghost_views(),
        );

        self.round.ticks += 1;
    }

    /// External reset request, valid from any state
    pub fn request_reset(&mut self) {
        self.reset();
    }

    /// Leave the instructions screen and start the first round
    pub fn dismiss_intro(&mut self) {
        if self.suspension.has(SuspendReason::Intermission) {
            self.suspension.remove(SuspendReason::Intermission);
            self.start(TimerId::Ready, None);
            log::info!("Instructions dismissed");
        }
    }

    /// Drain audio commands emitted since the last call
    pub fn take_cues(&mut self) -> Vec<CueCommand> {
        std::mem::take(&mut self.cues)
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn suspension(&self) -> &Suspension {
        &self.suspension
    }

    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn maze(&self) -> &M {
        &self.maze
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn ghosts(&self) -> &[G; 4] {
        &self.ghosts
    }

    pub fn ghosts_mut(&mut self) -> &mut [G; 4] {
        &mut self.ghosts
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // === Tick phases ===

    fn advance_timers(&mut self) {
        for id in TimerId::all() {
            // Re-read every time: a reset action rewinds the counter
            let now = self.round.ticks;
            if !self.timers[id].tick(now) {
                continue;
            }
            match self.timers[id].action() {
                Some(action) => self.dispatch(action),
                None if id == TimerId::FruitActive => log::debug!("Fruit expired uneaten"),
                None => {}
            }
        }
    }

    fn update_ambient(&mut self) {
        if self.ambient == Some(Cue::PowerPellet) && !self.timers.any_frightened() {
            self.player.set_powered_up(false);
            self.stop_ambient();
            self.play_ambient(Cue::Siren);
        }
    }

    fn update_actors(&mut self) {
        let now = self.round.ticks;

        let stalled =
            self.timers.is_active(TimerId::DotStall) || self.timers.is_active(TimerId::PowerStall);
        if !stalled {
            self.player.tick(now);
        }

        let input = CollisionInput {
            player: self.player.cell(),
            fruit_active: self.timers.is_active(TimerId::FruitActive),
        };
        let mut views = self.ghost_views();
        let events = resolve_collisions(&mut self.round, &mut self.maze, input, &mut views);
        for event in events {
            self.apply(event);
        }

        let player_cell = self.player.cell();
        let phase = scatter_chase_phase(self.round.round_elapsed());
        let views = self.ghost_views();
        for ghost in &mut self.ghosts {
            let kind = ghost.kind();
            let ctx = ModeContext {
                phase,
                frightened: self.timers.is_active(TimerId::Frightened(kind)),
                may_leave_house: may_leave_house(kind, self.round.dots_eaten_this_round),
            };
            ghost.update_mode(&ctx);
            ghost.update_target(player_cell, &views);
            ghost.tick(now);
        }
    }

    // === Timer completions ===

    fn dispatch(&mut self, action: TimerAction) {
        match action {
            TimerAction::BeginReady => {
                self.init_round();
                self.start(TimerId::RoundStart, None);
            }
            TimerAction::StartPlay => {
                self.suspension.clear();
                self.round.round_started_at = Some(self.round.ticks);
                self.stop_ambient();
                self.play_ambient(Cue::Siren);
                log::info!("Round started (level {}, lives {})", self.round.level, self.round.lives);
            }
            TimerAction::WinRound => {
                self.suspension.set_exclusive(SuspendReason::Won);
                // A capture on the clearing tick must not end the game
                self.timers[TimerId::GameOver].disable();
                self.start(TimerId::Ready, Some(ROUND_WON_TICKS));
                self.stop_ambient();
                log::info!("Level {} cleared, score {}", self.round.level, self.round.score);
            }
            TimerAction::EndGame => {
                self.timers.disable_all();
                self.suspension.set_exclusive(SuspendReason::GameOver);
                self.stop_ambient();
                self.play(Cue::GameOver);
                self.persist_high_score();
                self.start(TimerId::Reset, None);
                log::info!("Game over, final score {}", self.round.score);
            }
            TimerAction::ResetGame => self.reset(),
            TimerAction::EndGhostPause => self.suspension.remove(SuspendReason::EatGhostPause),
        }
    }

    /// New "READY!" round, after a lost life or a cleared maze
    fn init_round(&mut self) {
        self.timers.disable_all();
        self.reset_actors();
        self.suspension.set_exclusive(SuspendReason::Ready);

        if self.round.dots_eaten >= self.maze.total_dots() {
            self.round.dots_eaten = 0;
            self.round.level += 1;
            self.maze.reset();
            log::info!("Advancing to level {}", self.round.level);
        } else {
            self.round.lives = self.round.lives.saturating_sub(1);
        }

        self.round.dots_eaten_this_round = 0;
        self.round.round_started_at = None;
        log::debug!("Ready: level {}, lives {}", self.round.level, self.round.lives);
    }

    fn reset(&mut self) {
        self.round = RoundState::new(self.round.high_score);
        self.stop_ambient();
        self.timers.reset_all();
        self.reset_actors();
        self.maze.reset();
        self.suspension.set_exclusive(SuspendReason::ResetGuard);
        self.start(TimerId::Ready, None);
        log::info!("New game (high score {})", self.round.high_score);
    }

    fn reset_actors(&mut self) {
        self.player.set_start_state();
        self.player.set_powered_up(false);
        for ghost in &mut self.ghosts {
            ghost.set_start_state();
        }
    }

    fn persist_high_score(&mut self) {
        if self.round.score > self.saved_high_score {
            self.saved_high_score = self.round.score;
            save_high_score(&mut self.store, self.round.score);
        }
    }

    // === Collision events ===

    fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::DotEaten { total, .. } => {
                self.start(TimerId::DotStall, None);
                self.play(if total % 2 == 1 { Cue::Munch1 } else { Cue::Munch2 });
            }
            GameEvent::PowerItemEaten { cell } => {
                self.start(TimerId::PowerStall, None);
                self.stop_ambient();
                self.play_ambient(Cue::PowerPellet);
                self.player.set_powered_up(true);
                log::debug!("Power item eaten at {cell}");
            }
            GameEvent::MazeCleared => self.start(TimerId::RoundWon, None),
            GameEvent::FruitSpawned => {
                self.start(TimerId::FruitActive, None);
                log::debug!("Fruit spawned after {} dots", self.round.dots_eaten);
            }
            GameEvent::FruitEaten { kind, points } => {
                self.timers[TimerId::FruitActive].disable();
                self.start(TimerId::FruitEaten, None);
                self.play(Cue::Fruit);
                log::debug!("{kind:?} eaten for {points}");
            }
            GameEvent::GhostFrightened { ghost } => {
                self.start(TimerId::Frightened(ghost), None);
                self.set_ghost_mode(ghost, GhostMode::Frightened);
            }
            GameEvent::GhostEaten {
                ghost,
                index,
                points,
            } => {
                self.set_ghost_mode(ghost, GhostMode::Eyes);
                self.timers[TimerId::Frightened(ghost)].disable();
                self.suspension.add(SuspendReason::EatGhostPause);
                self.start(TimerId::GhostPause, None);
                self.start(TimerId::GhostEaten(ghost), None);
                self.play(Cue::GhostEaten);
                log::debug!("{ghost:?} eaten (#{}) for {points}", index + 1);
            }
            GameEvent::PlayerCaught { by } => {
                self.player.set_powered_up(false);
                self.suspension.add(SuspendReason::Dead);
                self.start(TimerId::PlayerDeath, None);
                let next = if self.round.lives >= 1 {
                    TimerId::Ready
                } else {
                    TimerId::GameOver
                };
                self.start(next, Some(PLAYER_DEATH_TICKS));
                self.stop_ambient();
                self.play(Cue::PlayerDeath);
                log::info!("Caught by {by:?}, {} lives left", self.round.lives);
            }
        }
    }

    // === Helpers ===

    fn start(&mut self, id: TimerId, duration: Option<u32>) {
        self.timers.start(id, self.round.ticks, duration);
    }

    fn set_ghost_mode(&mut self, kind: GhostKind, mode: GhostMode) {
        if let Some(ghost) = self.ghosts.iter_mut().find(|g| g.kind() == kind) {
            ghost.set_mode(mode);
        }
    }

    fn ghost_views(&self) -> [GhostView; 4] {
        self.ghosts.each_ref().map(|g| g.view())
    }

    fn play(&mut self, cue: Cue) {
        self.cues.push(CueCommand::Play(cue));
    }

    fn play_ambient(&mut self, cue: Cue) {
        self.play(cue);
        self.ambient = Some(cue);
    }

    fn stop_ambient(&mut self) {
        self.cues.push(CueCommand::Stop(Cue::Siren));
        self.cues.push(CueCommand::Stop(Cue::PowerPellet));
        self.ambient = None;
    }
}
