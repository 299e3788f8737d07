//! Actor collaborators
//!
//! Movement, input and pathfinding are owned by the host. The controller only
//! drives actors through these traits.

use serde::{Deserialize, Serialize};

use super::schedule::{ModeContext, resolve_mode};
use super::state::{GhostKind, GhostMode};
use crate::Cell;

/// The player actor
pub trait Player {
    /// Apply queued input and move
    fn tick(&mut self, now: u64);
    fn cell(&self) -> Cell;
    fn set_start_state(&mut self);
    /// Drives the powered-up overlay
    fn set_powered_up(&mut self, powered: bool);
}

/// One ghost
pub trait Adversary {
    fn kind(&self) -> GhostKind;
    fn mode(&self) -> GhostMode;
    fn set_mode(&mut self, mode: GhostMode);
    fn cell(&self) -> Cell;
    fn set_start_state(&mut self);

    /// Pick this tick's mode from the schedule
    fn update_mode(&mut self, ctx: &ModeContext) {
        let next = resolve_mode(self.mode(), ctx);
        if next != self.mode() {
            self.set_mode(next);
        }
    }

    /// Choose a target cell (pathfinding is the ghost's own business)
    fn update_target(&mut self, player: Cell, ghosts: &[GhostView]);

    fn tick(&mut self, now: u64);

    fn view(&self) -> GhostView {
        GhostView {
            kind: self.kind(),
            mode: self.mode(),
            cell: self.cell(),
        }
    }
}

/// Read-only snapshot of a ghost, what the collision engine and other ghosts see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostView {
    pub kind: GhostKind,
    pub mode: GhostMode,
    pub cell: Cell,
}
