//! Demo actors for the headless runner
//!
//! A random-walk player and ghosts that steer greedily toward a target cell
//! at every junction. Enough to drive a round end to end; not arcade-accurate
//! movement.

use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Cell;
use crate::sim::{Adversary, GhostKind, GhostMode, GhostView, Maze, Player, TileGrid};

/// Up, left, down, right: the order ties are broken in
const DIRECTIONS: [Cell; 4] = [Cell::NEG_Y, Cell::NEG_X, Cell::Y, Cell::X];

/// Ticks between moves
pub const PLAYER_STEP_TICKS: u64 = 8;
pub const GHOST_STEP_TICKS: u64 = 9;
pub const FRIGHTENED_STEP_TICKS: u64 = 16;
pub const EYES_STEP_TICKS: u64 = 4;

/// Open floor right outside the ghost house on the classic layout
pub const HOUSE_EXIT: Cell = Cell::new(12, 11);

/// Clyde gives up the chase inside this many cells of the player
const CLYDE_SHY_DISTANCE: i32 = 8;

/// Directions out of `cell` that don't hit a wall or reverse `heading`.
/// A dead end allows reversing.
fn open_moves(layout: &TileGrid, cell: Cell, heading: Cell) -> Vec<Cell> {
    let moves: Vec<Cell> = DIRECTIONS
        .into_iter()
        .filter(|&dir| dir != -heading || heading == Cell::ZERO)
        .filter(|&dir| !layout.is_wall(layout.wrap(cell + dir)))
        .collect();
    if moves.is_empty() && heading != Cell::ZERO {
        vec![-heading]
    } else {
        moves
    }
}

/// Player that turns at random at every junction
pub struct WanderingPlayer {
    layout: Rc<TileGrid>,
    rng: Pcg32,
    start: Cell,
    cell: Cell,
    heading: Cell,
    powered: bool,
}

impl WanderingPlayer {
    pub fn new(layout: Rc<TileGrid>, seed: u64) -> Self {
        let start = layout.player_start().unwrap_or_default();
        Self {
            layout,
            rng: Pcg32::seed_from_u64(seed),
            start,
            cell: start,
            heading: Cell::ZERO,
            powered: false,
        }
    }

    pub fn is_powered_up(&self) -> bool {
        self.powered
    }
}

impl Player for WanderingPlayer {
    fn tick(&mut self, now: u64) {
        if now % PLAYER_STEP_TICKS != 0 {
            return;
        }
        let moves = open_moves(&self.layout, self.cell, self.heading);
        if moves.is_empty() {
            return;
        }
        self.heading = moves[self.rng.random_range(0..moves.len())];
        self.cell = self.layout.wrap(self.cell + self.heading);
    }

    fn cell(&self) -> Cell {
        self.cell
    }

    fn set_start_state(&mut self) {
        self.cell = self.start;
        self.heading = Cell::ZERO;
    }

    fn set_powered_up(&mut self, powered: bool) {
        self.powered = powered;
    }
}

/// Ghost chasing a per-personality target cell
pub struct WanderingGhost {
    kind: GhostKind,
    layout: Rc<TileGrid>,
    rng: Pcg32,
    mode: GhostMode,
    cell: Cell,
    heading: Cell,
    target: Cell,
}

impl WanderingGhost {
    pub fn new(kind: GhostKind, layout: Rc<TileGrid>, seed: u64) -> Self {
        let mut ghost = Self {
            kind,
            layout,
            rng: Pcg32::seed_from_u64(seed.wrapping_add(kind.index() as u64 + 1)),
            mode: kind.start_mode(),
            cell: Cell::ZERO,
            heading: Cell::ZERO,
            target: Cell::ZERO,
        };
        ghost.set_start_state();
        ghost
    }

    /// Pen position, spread across the house
    fn home(&self) -> Cell {
        Cell::new(11 + 2 * (self.kind.index() as i32 % 3), 14)
    }

    fn scatter_corner(&self) -> Cell {
        let (w, h) = (self.layout.width(), self.layout.height());
        match self.kind {
            GhostKind::Blinky => Cell::new(w - 2, 1),
            GhostKind::Pinky => Cell::new(1, 1),
            GhostKind::Inky => Cell::new(w - 2, h - 2),
            GhostKind::Clyde => Cell::new(1, h - 2),
        }
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    fn step(&mut self) {
        let moves = open_moves(&self.layout, self.cell, self.heading);
        let next = if self.mode == GhostMode::Frightened {
            (!moves.is_empty()).then(|| moves[self.rng.random_range(0..moves.len())])
        } else {
            let target = self.target;
            let cell = self.cell;
            moves
                .into_iter()
                .min_by_key(|&dir| (cell + dir - target).length_squared())
        };
        if let Some(dir) = next {
            self.heading = dir;
            self.cell = self.layout.wrap(self.cell + dir);
        }
    }
}

impl Adversary for WanderingGhost {
    fn kind(&self) -> GhostKind {
        self.kind
    }

    fn mode(&self) -> GhostMode {
        self.mode
    }

    fn set_mode(&mut self, mode: GhostMode) {
        // Ghosts turn around when they become frightened
        if mode == GhostMode::Frightened && self.mode.is_hunting() {
            self.heading = -self.heading;
        }
        self.mode = mode;
    }

    fn cell(&self) -> Cell {
        self.cell
    }

    fn set_start_state(&mut self) {
        self.mode = self.kind.start_mode();
        self.heading = Cell::ZERO;
        self.cell = match self.mode {
            GhostMode::House => self.home(),
            _ => HOUSE_EXIT,
        };
    }

    fn update_target(&mut self, player: Cell, ghosts: &[GhostView]) {
        self.target = match self.mode {
            GhostMode::Scatter => self.scatter_corner(),
            GhostMode::Eyes => HOUSE_EXIT,
            GhostMode::Chase => match self.kind {
                GhostKind::Inky => {
                    // Reflect Blinky through the player
                    let blinky = ghosts
                        .iter()
                        .find(|g| g.kind == GhostKind::Blinky)
                        .map(|g| g.cell)
                        .unwrap_or(player);
                    player * 2 - blinky
                }
                GhostKind::Clyde
                    if (self.cell - player).length_squared()
                        < CLYDE_SHY_DISTANCE * CLYDE_SHY_DISTANCE =>
                {
                    self.scatter_corner()
                }
                _ => player,
            },
            _ => self.target,
        };
    }

    fn tick(&mut self, now: u64) {
        match self.mode {
            GhostMode::House => {}
            GhostMode::LeaveHouse => {
                if now % GHOST_STEP_TICKS == 0 {
                    self.cell = HOUSE_EXIT;
                    self.heading = Cell::ZERO;
                    // Next mode update puts it on the schedule
                    self.mode = GhostMode::Scatter;
                }
            }
            GhostMode::Eyes => {
                if now % EYES_STEP_TICKS != 0 {
                    return;
                }
                if self.cell == HOUSE_EXIT {
                    self.cell = self.home();
                    self.mode = GhostMode::EnterHouse;
                } else {
                    self.step();
                }
            }
            GhostMode::EnterHouse => {
                if now % EYES_STEP_TICKS == 0 {
                    self.mode = GhostMode::House;
                }
            }
            GhostMode::Frightened => {
                if now % FRIGHTENED_STEP_TICKS == 0 {
                    self.step();
                }
            }
            GhostMode::Scatter | GhostMode::Chase => {
                if now % GHOST_STEP_TICKS == 0 {
                    self.step();
                }
            }
        }
    }
}

/// Classic layout with a full cast of demo actors
pub fn classic_cast(seed: u64) -> (TileGrid, WanderingPlayer, [WanderingGhost; 4]) {
    let maze = TileGrid::classic();
    let layout = Rc::new(maze.clone());
    let player = WanderingPlayer::new(Rc::clone(&layout), seed);
    let ghosts = GhostKind::ALL.map(|kind| WanderingGhost::new(kind, Rc::clone(&layout), seed));
    (maze, player, ghosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::{RoundController, SuspendReason};

    #[test]
    fn test_player_stays_on_floor() {
        let (maze, mut player, _) = classic_cast(7);
        for now in 0..5_000 {
            player.tick(now);
            assert!(!maze.is_wall(player.cell()), "player in wall at {}", player.cell());
        }
    }

    #[test]
    fn test_same_seed_same_walk() {
        let (_, mut a, _) = classic_cast(42);
        let (_, mut b, _) = classic_cast(42);
        for now in 0..2_000 {
            a.tick(now);
            b.tick(now);
            assert_eq!(a.cell(), b.cell());
        }
    }

    #[test]
    fn test_chasing_ghost_closes_in() {
        let (maze, _, [mut blinky, ..]) = classic_cast(1);
        blinky.set_mode(GhostMode::Chase);
        let player = Cell::new(1, 29);
        let start = (blinky.cell() - player).length_squared();

        for now in 0..GHOST_STEP_TICKS * 20 {
            blinky.update_target(player, &[]);
            blinky.tick(now);
            assert!(!maze.is_wall(blinky.cell()));
        }
        assert_eq!(blinky.target(), player);
        assert!((blinky.cell() - player).length_squared() < start);
    }

    #[test]
    fn test_eyes_return_and_reenter_house() {
        let (_, _, [_, mut pinky, ..]) = classic_cast(3);
        pinky.set_mode(GhostMode::LeaveHouse);
        pinky.tick(0);
        assert_eq!(pinky.cell(), HOUSE_EXIT);
        assert_eq!(pinky.mode(), GhostMode::Scatter);

        pinky.set_mode(GhostMode::Eyes);
        pinky.tick(0);
        assert_eq!(pinky.mode(), GhostMode::EnterHouse);
        pinky.tick(EYES_STEP_TICKS);
        assert_eq!(pinky.mode(), GhostMode::House);
    }

    #[test]
    fn test_demo_game_runs_through_game_over() {
        let (maze, player, ghosts) = classic_cast(11);
        let mut controller = RoundController::new(maze, player, ghosts, MemoryStore::new(0), false);

        let mut saw_game_over = false;
        for _ in 0..200_000 {
            controller.tick();
            controller.take_cues();
            let round = controller.round();
            assert!(round.lives <= 3);
            assert!(round.high_score >= round.score);
            if controller.suspension().has(SuspendReason::GameOver) {
                saw_game_over = true;
                break;
            }
        }
        assert!(saw_game_over);
    }
}
