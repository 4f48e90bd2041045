use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::tiles::{generate_tile, SpawnBias, SpawnTable, Tile, TileType};
use crate::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Square board, row-major. `None` cells are placeholders left behind while the
/// board collapses and are never selectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    pub fn generate(size: usize, rng: &mut GameRng, table: &SpawnTable, bias: &SpawnBias) -> Self {
        let cells = (0..size * size)
            .map(|_| Some(generate_tile(rng, table, bias)))
            .collect();
        Self { size, cells }
    }

    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, tiles) in rows.into_iter().enumerate() {
            if tiles.len() != size {
                return Err(GridError::NotSquare { row, len: tiles.len(), size });
            }
            cells.extend(tiles.into_iter().map(Some));
        }
        Ok(Self { size, cells })
    }

    /// All-`Normal` board from one string per row, e.g. `["CATS", "DOGE", ..]`.
    pub fn from_letters(rows: &[&str]) -> Result<Self, GridError> {
        Self::from_rows(
            rows.iter()
                .map(|r| r.chars().map(Tile::normal).collect())
                .collect(),
        )
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, at: Coord) -> Option<usize> {
        (at.row < self.size && at.col < self.size).then_some(at.row * self.size + at.col)
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        self.index(at).is_some()
    }

    /// `None` for out-of-range coordinates and placeholders alike.
    pub fn get(&self, at: Coord) -> Option<&Tile> {
        self.index(at).and_then(|i| self.cells[i].as_ref())
    }

    pub fn is_placeholder(&self, at: Coord) -> bool {
        self.index(at).is_some_and(|i| self.cells[i].is_none())
    }

    /// Changes a tile's type in place; the letter is untouched.
    pub fn set_kind(&mut self, at: Coord, kind: TileType) -> bool {
        match self.index(at).and_then(|i| self.cells[i].as_mut()) {
            Some(tile) => {
                tile.kind = kind;
                true
            }
            None => false,
        }
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .map(move |(i, _)| Coord::new(i / size, i % size))
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|t| (Coord::new(i / size, i % size), t)))
    }

    pub fn count_kind(&self, kind: TileType) -> usize {
        self.tiles().filter(|(_, t)| t.kind == kind).count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn word_for(&self, selection: &[Coord]) -> String {
        selection.iter().filter_map(|at| self.get(*at)).map(|t| t.ch).collect()
    }

    /// Turns up to `count` random tiles not already of `target` into `target`.
    /// Returns how many were converted; running out of eligible tiles is not an error.
    pub fn convert_random_tiles(&mut self, target: TileType, count: usize, rng: &mut GameRng) -> usize {
        let mut pool: Vec<Coord> = self
            .tiles()
            .filter(|(_, t)| t.kind != target)
            .map(|(at, _)| at)
            .collect();
        if pool.is_empty() || count == 0 {
            return 0;
        }
        rng.shuffle(&mut pool);
        let n = count.min(pool.len());
        for at in &pool[..n] {
            self.set_kind(*at, target);
        }
        n
    }

    /// Removes the used tiles and lets each column fall, keeping order. The freed cells
    /// at the top of each column become placeholders until [`Grid::refill`].
    pub fn collapse(&mut self, used: &[Coord]) {
        let used: HashSet<Coord> = used.iter().copied().filter(|at| self.in_bounds(*at)).collect();
        let size = self.size;
        for col in 0..size {
            let kept: Vec<Option<Tile>> = (0..size)
                .map(|row| Coord::new(row, col))
                .filter(|at| !used.contains(at))
                .map(|at| self.cells[at.row * size + at.col])
                .filter(|c| c.is_some())
                .collect();
            let start = size - kept.len();
            for row in 0..start {
                self.cells[row * size + col] = None;
            }
            for (offset, cell) in kept.into_iter().enumerate() {
                self.cells[(start + offset) * size + col] = cell;
            }
        }
    }

    /// Fills every placeholder with a freshly generated tile; returns the filled cells.
    pub fn refill(&mut self, rng: &mut GameRng, table: &SpawnTable, bias: &SpawnBias) -> Vec<Coord> {
        let mut filled = Vec::new();
        for i in 0..self.cells.len() {
            if self.cells[i].is_none() {
                self.cells[i] = Some(generate_tile(rng, table, bias));
                filled.push(Coord::new(i / self.size, i % self.size));
            }
        }
        filled
    }

    pub fn replace_used(
        &mut self,
        used: &[Coord],
        rng: &mut GameRng,
        table: &SpawnTable,
        bias: &SpawnBias,
    ) -> Vec<Coord> {
        self.collapse(used);
        self.refill(rng, table, bias)
    }

    /// Discards every tile and draws a fresh board.
    pub fn regenerate(&mut self, rng: &mut GameRng, table: &SpawnTable, bias: &SpawnBias) {
        *self = Self::generate(self.size, rng, table, bias);
    }

    /// One string per row; placeholders render as `.`, special tiles in lowercase.
    pub fn render_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        None => '.',
                        Some(t) if t.kind == TileType::Normal => t.ch,
                        Some(t) => t.ch.to_ascii_lowercase(),
                    })
                    .collect()
            })
            .collect()
    }
}
