//! Maze tile grid
//!
//! The controller only needs the tile-kind contract of `Maze`: read a tile,
//! clear it, reset the level, and know how many dots a level has.
//! `TileGrid` is the reference grid parsed from ASCII art.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Cell;

/// Collectible contents of a maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Dot,
    PowerItem,
}

/// Maze collaborator read by the collision engine and written once per tick
pub trait Maze {
    /// Tile at `cell`; cells off the grid are empty
    fn tile(&self, cell: Cell) -> Tile;
    fn set_tile(&mut self, cell: Cell, tile: Tile);
    /// Restore every dot and power item
    fn reset(&mut self);
    /// Dots plus power items in a full level
    fn total_dots(&self) -> u32;
    fn width(&self) -> i32;
    fn height(&self) -> i32;
}

/// Classic 28x31 layout: 240 dots and 4 power items.
///
/// `.` dot, `o` power item, `#` wall, `=` ghost door, `T` tunnel mouth,
/// `X` player start, space empty floor.
pub const CLASSIC_LAYOUT: [&str; 31] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##    ==    ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "T     .   ########   .     T",
    "######.## ######## ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......X .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze layout has no rows")]
    Empty,
    #[error("maze row {row} is {width} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },
}

/// Tile grid with walls, parsed from ASCII
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    /// Tiles as loaded, restored by `reset`
    initial: Vec<Tile>,
    tiles: Vec<Tile>,
    walls: Vec<bool>,
    total_dots: u32,
    player_start: Option<Cell>,
}

impl TileGrid {
    pub fn parse(rows: &[&str]) -> Result<Self, MazeError> {
        let expected = rows.first().ok_or(MazeError::Empty)?.chars().count();
        let mut initial = Vec::with_capacity(expected * rows.len());
        let mut walls = Vec::with_capacity(expected * rows.len());
        let mut player_start = None;

        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != expected {
                return Err(MazeError::Ragged {
                    row: y,
                    width,
                    expected,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '.' => Tile::Dot,
                    'o' => Tile::PowerItem,
                    _ => Tile::Empty,
                };
                if ch == 'X' {
                    player_start = Some(Cell::new(x as i32, y as i32));
                }
                initial.push(tile);
                walls.push(matches!(ch, '#' | '='));
            }
        }

        let total_dots = initial.iter().filter(|t| **t != Tile::Empty).count() as u32;
        Ok(Self {
            width: expected as i32,
            height: rows.len() as i32,
            tiles: initial.clone(),
            initial,
            walls,
            total_dots,
            player_start,
        })
    }

    pub fn classic() -> Self {
        Self::parse(&CLASSIC_LAYOUT).unwrap_or_else(|_| unreachable!("built-in layout is rectangular"))
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let in_bounds = (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y);
        in_bounds.then(|| (cell.y * self.width + cell.x) as usize)
    }

    /// Walls and the ghost door; cells off the grid are open (tunnels)
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.index(cell).map(|i| self.walls[i]).unwrap_or(false)
    }

    /// Wrap a cell horizontally through the tunnel
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.width), cell.y)
    }

    pub fn player_start(&self) -> Option<Cell> {
        self.player_start
    }

    /// Dots and power items still on the board
    pub fn remaining(&self) -> u32 {
        self.tiles.iter().filter(|t| **t != Tile::Empty).count() as u32
    }
}

impl Maze for TileGrid {
    fn tile(&self, cell: Cell) -> Tile {
        self.index(cell).map(|i| self.tiles[i]).unwrap_or_default()
    }

    fn set_tile(&mut self, cell: Cell, tile: Tile) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
        }
    }

    fn reset(&mut self) {
        self.tiles.clone_from(&self.initial);
    }

    fn total_dots(&self) -> u32 {
        self.total_dots
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }
}
