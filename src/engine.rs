use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::ops::Index;

use crate::error::GridError;

/// Side length of the canonical board.
pub const GRID_SIZE: usize = 4;

/// Chance that a freshly spawned tile is a 4 instead of a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// A cell value: 0 for empty, otherwise a power of two >= 2.
pub type Tile = u32;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// How merged tiles behave for the rest of a move.
///
/// `Single` is classic 2048: a tile produced by a merge cannot merge again
/// during the same move, so `[2, 2, 4, 0]` slid left becomes `[4, 4, 0, 0]`.
/// `Chained` keeps the plain single-pass behaviour where the merged tile stays
/// eligible, so the same line becomes `[8, 0, 0, 0]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MergeRule {
    #[default]
    Single,
    Chained,
}

/// A `(row, col)` coordinate, both in `0..size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

/// Square board of tiles stored row-major.
///
/// The grid is a plain value: the move engine, spawner and detector are free
/// functions taking it by reference, so it can be driven without any display.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// An all-empty `size` x `size` grid.
    pub fn new(size: usize) -> Self {
        Grid { size, cells: vec![0; size * size] }
    }

    /// Build a grid from explicit rows, checking shape and tile values.
    ///
    /// ```
    /// use game_2048::engine::{Grid, Position};
    /// let g = Grid::from_rows(&[[2u32, 0], [0, 4]][..]).unwrap();
    /// assert_eq!(g[Position::new(1, 1)], 4);
    /// assert!(Grid::from_rows(&[[3u32, 0], [0, 0]][..]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != size {
                return Err(GridError::NotSquare { row, len: line.len(), expected: size });
            }
            for (col, &value) in line.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(GridError::InvalidTile { value, row, col });
                }
            }
            cells.extend_from_slice(line);
        }
        Ok(Grid { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Overwrite one cell. Callers are responsible for keeping values powers of two.
    #[inline]
    pub fn set(&mut self, pos: Position, value: Tile) {
        let idx = self.offset(pos);
        self.cells[idx] = value;
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(<[Tile]>::to_vec).collect()
    }

    /// Positions of all empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(idx, _)| Position::new(idx / self.size, idx % self.size))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Sum of every tile on the board. Merges preserve it; spawns add 2 or 4.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Return the highest tile value (e.g., 2048) present on the board, 0 if empty.
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Reset every cell to empty, keeping the size.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Method form of [`shift`].
    #[inline]
    pub fn shift(&mut self, dir: Move) -> bool {
        shift(self, dir)
    }

    /// Method form of [`is_game_over`].
    #[inline]
    pub fn is_game_over(&self) -> bool {
        is_game_over(self)
    }

    #[inline]
    fn offset(&self, pos: Position) -> usize {
        assert!(
            pos.row < self.size && pos.col < self.size,
            "position ({}, {}) outside {}x{} grid",
            pos.row,
            pos.col,
            self.size,
            self.size
        );
        pos.row * self.size + pos.col
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(GRID_SIZE)
    }
}

impl Index<Position> for Grid {
    type Output = Tile;

    fn index(&self, pos: Position) -> &Tile {
        &self.cells[self.offset(pos)]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({}x{}, {:?})", self.size, self.size, self.to_rows())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(self.size * (CELL_WIDTH + 1));
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f, "{separator}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_tile(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

pub(crate) const CELL_WIDTH: usize = 7;

/// Center a tile value in a fixed-width cell; empty tiles render as blanks.
pub(crate) fn format_tile(value: Tile) -> String {
    match value {
        0 => " ".repeat(CELL_WIDTH),
        v => format!("{:^width$}", v, width = CELL_WIDTH),
    }
}

#[inline]
fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// The doubled value when two tiles may merge.
///
/// `None` for unequal tiles and for a pair of `1 << 31` tiles, whose sum does
/// not fit a [`Tile`]; such a pair stays put like any other unequal pair.
#[inline]
fn merged_value(a: Tile, b: Tile) -> Option<Tile> {
    if a == b { a.checked_mul(2) } else { None }
}

/// Slide/merge tiles in `dir` with the classic single-merge rule. No randomness.
///
/// Returns true when any cell changed.
pub fn shift(grid: &mut Grid, dir: Move) -> bool {
    shift_with_rule(grid, dir, MergeRule::default())
}

pub fn move_up(grid: &mut Grid) -> bool {
    shift(grid, Move::Up)
}

pub fn move_down(grid: &mut Grid) -> bool {
    shift(grid, Move::Down)
}

pub fn move_left(grid: &mut Grid) -> bool {
    shift(grid, Move::Left)
}

pub fn move_right(grid: &mut Grid) -> bool {
    shift(grid, Move::Right)
}

/// Slide/merge tiles in `dir` under an explicit [`MergeRule`].
///
/// Every line (a column for vertical moves, a row for horizontal ones) is
/// processed on its own. Line position 0 is the edge tiles travel toward, and
/// tiles are visited from that edge outward so each one lands against tiles
/// that have already settled.
pub fn shift_with_rule(grid: &mut Grid, dir: Move, rule: MergeRule) -> bool {
    let n = grid.size;
    let mut changed = false;
    let mut merged = vec![false; n];
    for line in 0..n {
        merged.fill(false);
        for i in 1..n {
            let from = cell_index(n, dir, line, i);
            let value = grid.cells[from];
            if value == 0 {
                continue;
            }
            let mut k = i;
            while k > 0 && grid.cells[cell_index(n, dir, line, k - 1)] == 0 {
                k -= 1;
            }
            if k > 0 {
                let target = cell_index(n, dir, line, k - 1);
                let may_merge = rule == MergeRule::Chained || !merged[k - 1];
                let doubled = merged_value(grid.cells[target], value).filter(|_| may_merge);
                if let Some(doubled) = doubled {
                    grid.cells[target] = doubled;
                    grid.cells[from] = 0;
                    merged[k - 1] = true;
                    changed = true;
                    continue;
                }
            }
            if k < i {
                grid.cells[cell_index(n, dir, line, k)] = value;
                grid.cells[from] = 0;
                changed = true;
            }
        }
    }
    trace!("shift {dir} ({rule:?}): changed={changed}");
    changed
}

/// Map a position along a line to its row-major cell index.
///
/// `pos` counts from the edge tiles slide toward.
#[inline(always)]
fn cell_index(size: usize, dir: Move, line: usize, pos: usize) -> usize {
    let far = size - 1 - pos;
    match dir {
        Move::Up => pos * size + line,
        Move::Down => far * size + line,
        Move::Left => line * size + pos,
        Move::Right => line * size + far,
    }
}

/// Insert a random 2 (90%) or 4 (10%) tile into a random empty cell, using the provided RNG.
///
/// Returns `None` without touching the grid when no cell is empty.
///
/// ```
/// use game_2048::engine::{spawn_tile, Grid};
/// use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut g = Grid::default();
/// let pos = spawn_tile(&mut g, &mut rng).unwrap();
/// assert!(g[pos] == 2 || g[pos] == 4);
/// assert_eq!(g.count_empty(), 15);
/// ```
pub fn spawn_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<Position> {
    spawn_tile_with_odds(grid, rng, FOUR_PROBABILITY)
}

/// Like [`spawn_tile`] with a custom chance of spawning a 4.
pub fn spawn_tile_with_odds<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    four_probability: f64,
) -> Option<Position> {
    let empty = grid.empty_cells();
    let Some(&pos) = empty.choose(rng) else {
        debug!("no empty cells to spawn a tile");
        return None;
    };
    let value = generate_random_tile(rng, four_probability);
    grid.set(pos, value);
    debug!("spawned {value} at ({}, {})", pos.row, pos.col);
    Some(pos)
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R, four_probability: f64) -> Tile {
    if rng.gen::<f64>() < four_probability { 4 } else { 2 }
}

/// True iff the grid is full and no two orthogonally adjacent tiles can merge.
pub fn is_game_over(grid: &Grid) -> bool {
    let n = grid.size;
    for row in 0..n {
        for col in 0..n {
            let value = grid.cells[row * n + col];
            if value == 0 {
                return false;
            }
            if col + 1 < n && merged_value(value, grid.cells[row * n + col + 1]).is_some() {
                return false;
            }
            if row + 1 < n && merged_value(value, grid.cells[(row + 1) * n + col]).is_some() {
                return false;
            }
        }
    }
    true
}
