//! Collision and scoring
//!
//! Runs once per unsuspended tick, after the player has moved and before the
//! ghosts pick targets. It reads the player's cell, eats whatever is there,
//! resolves player/ghost contacts, and reports what happened as events. It
//! mutates only the round counters, the maze and the ghost snapshots; timers,
//! suspension and audio are the controller's job.

use super::actors::GhostView;
use super::maze::{Maze, Tile};
use super::state::{GameEvent, GhostMode, RoundState};
use crate::Cell;
use crate::consts::*;

/// Per-tick inputs owned by the controller
#[derive(Debug, Clone, Copy)]
pub struct CollisionInput {
    pub player: Cell,
    /// Fruit timer is running
    pub fruit_active: bool,
}

/// Score for the `index`-th ghost eaten in one frightened window.
/// Chains longer than the table keep scoring the last entry.
pub fn ghost_eaten_score(index: u32) -> u32 {
    let last = GHOST_EATEN_SCORES.len() - 1;
    GHOST_EATEN_SCORES[(index as usize).min(last)]
}

/// Resolve this tick's collisions in order: maze item, fruit, ghosts.
///
/// Ghost snapshots are updated in place (Frightened after a power item, Eyes
/// when eaten) so later steps of the same tick see the new modes.
pub fn resolve_collisions<M: Maze + ?Sized>(
    round: &mut RoundState,
    maze: &mut M,
    input: CollisionInput,
    ghosts: &mut [GhostView],
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let cell = input.player;

    match maze.tile(cell) {
        Tile::Dot => {
            maze.set_tile(cell, Tile::Empty);
            round.score += DOT_SCORE;
            count_dot(round, maze.total_dots(), cell, &mut events);
        }
        Tile::PowerItem => {
            maze.set_tile(cell, Tile::Empty);
            round.score += POWER_ITEM_SCORE;
            round.ghosts_eaten = 0;
            events.push(GameEvent::PowerItemEaten { cell });
            for ghost in ghosts.iter_mut().filter(|g| g.mode.is_hunting()) {
                ghost.mode = GhostMode::Frightened;
                events.push(GameEvent::GhostFrightened { ghost: ghost.kind });
            }
            count_dot(round, maze.total_dots(), cell, &mut events);
        }
        Tile::Empty => {}
    }

    if input.fruit_active && cell == FRUIT_CELL {
        let kind = round.fruit();
        let points = kind.points();
        round.score += points;
        events.push(GameEvent::FruitEaten { kind, points });
    }

    // One capture per tick, but frightened ghosts later in order still get eaten
    let mut caught = false;
    for ghost in ghosts.iter_mut().filter(|g| g.cell == cell) {
        if ghost.mode == GhostMode::Frightened {
            let index = round.ghosts_eaten;
            let points = ghost_eaten_score(index);
            ghost.mode = GhostMode::Eyes;
            round.score += points;
            round.ghosts_eaten += 1;
            events.push(GameEvent::GhostEaten {
                ghost: ghost.kind,
                index,
                points,
            });
        } else if ghost.mode.is_hunting() && !caught {
            caught = true;
            events.push(GameEvent::PlayerCaught { by: ghost.kind });
        }
    }

    events
}

fn count_dot(round: &mut RoundState, total_dots: u32, cell: Cell, events: &mut Vec<GameEvent>) {
    round.dots_eaten += 1;
    round.dots_eaten_this_round += 1;
    events.push(GameEvent::DotEaten {
        cell,
        total: round.dots_eaten,
    });

    // Equality, so the level is cleared exactly once
    if round.dots_eaten == total_dots {
        events.push(GameEvent::MazeCleared);
    }
    if FRUIT_SPAWN_DOTS.contains(&round.dots_eaten) {
        events.push(GameEvent::FruitSpawned);
    }
}
