//! Deterministic simulation module
//!
//! All round logic lives here. This module must be pure and deterministic:
//! - Fixed 60 Hz tick only
//! - Waiting is expressed as timer countdowns, never as blocking
//! - Stable iteration order (timer list order, ghost identity order)
//! - No rendering, audio or platform dependencies

pub mod actors;
pub mod collision;
pub mod display;
pub mod maze;
pub mod schedule;
pub mod state;
pub mod suspension;
pub mod tick;
pub mod timer;

pub use actors::{Adversary, GhostView, Player};
pub use collision::{CollisionInput, ghost_eaten_score, resolve_collisions};
pub use display::{DisplayState, FruitSprite, GhostSprite, PlayerSprite};
pub use maze::{CLASSIC_LAYOUT, Maze, Tile, TileGrid};
pub use schedule::{ModeContext, Phase, may_leave_house, resolve_mode, scatter_chase_phase};
pub use state::{Cue, CueCommand, FruitKind, GameEvent, GhostKind, GhostMode, RoundState};
pub use suspension::{SuspendReason, Suspension};
pub use tick::RoundController;
pub use timer::{Timer, TimerAction, TimerId, TimerSet};
