//! Deterministic maze generation.
//!
//! A maze is carved from an identifier string: the identifier is fingerprinted
//! into a [`SeedPair`], which seeds a [`SeededRandom`], which drives an
//! iterative randomized depth-first search over an `N×N` grid. The result is a
//! perfect maze (a spanning tree over the cells).

use crate::prng::SeededRandom;
use crate::seed::{derive_seeds, SeedPair};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze size must be a positive integer")]
    InvalidSize,
    #[error("maze size {size} exceeds the maximum of {max}", max = MAX_SIZE)]
    TooLarge { size: usize },
    #[error("expected {expected} cells for the grid, got {actual}")]
    CellCount { expected: usize, actual: usize },
}

/// Largest accepted side length.
pub const MAX_SIZE: usize = 4096;

/// Wall direction, in the fixed order used for indexing a cell's walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// `(d + 2) mod 4`.
    #[inline]
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// `(row, col)` offset of the neighbour in this direction.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One maze cell: four wall flags indexed by [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub walls: [bool; 4],
}

impl Cell {
    pub const CLOSED: Cell = Cell { walls: [true; 4] };

    #[inline]
    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    /// Bit `d` set when wall `d` stands (1=top, 2=right, 4=bottom, 8=left).
    pub fn wall_mask(&self) -> u8 {
        self.walls
            .iter()
            .enumerate()
            .fold(0u8, |m, (i, &w)| if w { m | (1 << i) } else { m })
    }

    pub fn from_wall_mask(mask: u8) -> Self {
        Self {
            walls: core::array::from_fn(|i| mask & (1 << i) != 0),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::CLOSED
    }
}

/// Square grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A fully walled `size×size` grid.
    pub fn closed(size: usize) -> Result<Self, MazeError> {
        if size == 0 {
            return Err(MazeError::InvalidSize);
        }
        if size > MAX_SIZE {
            return Err(MazeError::TooLarge { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::CLOSED; size * size],
        })
    }

    /// Rebuild a grid from per-cell wall masks (see [`Cell::wall_mask`]).
    pub fn from_wall_masks(size: usize, masks: &[u8]) -> Result<Self, MazeError> {
        let mut grid = Self::closed(size)?;
        if masks.len() != grid.cells.len() {
            return Err(MazeError::CellCount {
                expected: grid.cells.len(),
                actual: masks.len(),
            });
        }
        for (cell, &m) in grid.cells.iter_mut().zip(masks) {
            *cell = Cell::from_wall_mask(m);
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            Some(&self.cells[self.idx(pos)])
        } else {
            None
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Out-of-bounds positions are treated as fully walled.
    pub fn has_wall(&self, pos: Position, dir: Direction) -> bool {
        self.cell(pos).map_or(true, |c| c.has_wall(dir))
    }

    /// The in-bounds neighbour of `pos` in direction `dir`, if any.
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.offset();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position { row, col };
        self.contains(next).then_some(next)
    }

    /// Bottom-right cell.
    pub fn goal(&self) -> Position {
        Position::new(self.size - 1, self.size - 1)
    }

    pub fn wall_masks(&self) -> Vec<u8> {
        self.cells.iter().map(Cell::wall_mask).collect()
    }

    pub fn standing_walls(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.walls.iter().filter(|&&w| w).count())
            .sum()
    }

    /// Number of open passages between adjacent cells.
    ///
    /// Each passage clears two wall slots, one per side.
    pub fn open_passages(&self) -> usize {
        (4 * self.cells.len() - self.standing_walls()) / 2
    }

    /// True when every cleared wall has a cleared counterpart on the other side
    /// and no boundary wall is open.
    pub fn openings_are_symmetric(&self) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Position { row, col };
                for dir in Direction::ALL {
                    if self.has_wall(pos, dir) {
                        continue;
                    }
                    match self.neighbor(pos, dir) {
                        Some(n) if !self.has_wall(n, dir.opposite()) => {}
                        _ => return false,
                    }
                }
            }
        }
        true
    }

    /// Count of cells reachable from `start` through open walls.
    pub fn reachable_from(&self, start: Position) -> usize {
        if !self.contains(start) {
            return 0;
        }
        let mut seen = vec![false; self.cells.len()];
        let mut stack = vec![start];
        seen[self.idx(start)] = true;
        let mut count = 0;
        while let Some(pos) = stack.pop() {
            count += 1;
            for dir in Direction::ALL {
                if self.has_wall(pos, dir) {
                    continue;
                }
                if let Some(n) = self.neighbor(pos, dir) {
                    let i = self.idx(n);
                    if !seen[i] {
                        seen[i] = true;
                        stack.push(n);
                    }
                }
            }
        }
        count
    }

    /// Connected, symmetric and with exactly `N²−1` passages: a spanning tree.
    pub fn is_perfect(&self) -> bool {
        self.openings_are_symmetric()
            && self.open_passages() == self.cells.len() - 1
            && self.reachable_from(Position::ORIGIN) == self.cells.len()
    }

    #[inline]
    fn idx(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    fn carve_between(&mut self, pos: Position, dir: Direction, next: Position) {
        let (a, b) = (self.idx(pos), self.idx(next));
        self.cells[a].walls[dir.index()] = false;
        self.cells[b].walls[dir.opposite().index()] = false;
    }
}

/// Build the `size×size` maze for `identifier`.
pub fn build_maze(identifier: &str, size: usize) -> Result<Grid, MazeError> {
    build_maze_from_seeds(derive_seeds(identifier), size)
}

/// Build a maze from an already derived seed pair.
///
/// Each call owns a fresh generator.
pub fn build_maze_from_seeds(seeds: SeedPair, size: usize) -> Result<Grid, MazeError> {
    let mut grid = Grid::closed(size)?;
    let mut rng = SeededRandom::new(seeds);
    carve(&mut grid, &mut rng);
    Ok(grid)
}

fn carve(grid: &mut Grid, rng: &mut SeededRandom) {
    let mut visited = vec![false; grid.cells.len()];

    let mut stack: Vec<Position> = vec![Position::ORIGIN];
    visited[0] = true;

    while let Some(&pos) = stack.last() {
        // Unvisited neighbours in Direction::ALL order.
        let mut candidates = [(Direction::Top, pos); 4];
        let mut n = 0usize;
        for dir in Direction::ALL {
            if let Some(next) = grid.neighbor(pos, dir) {
                if !visited[grid.idx(next)] {
                    candidates[n] = (dir, next);
                    n += 1;
                }
            }
        }

        if n == 0 {
            stack.pop();
            continue;
        }

        let (dir, next) = candidates[rng.pick_index(n)];
        grid.carve_between(pos, dir, next);
        visited[grid.idx(next)] = true;
        stack.push(next);
    }
}
