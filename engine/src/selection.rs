use serde::{Deserialize, Serialize};

use crate::error::SelectError;
use crate::grid::{Coord, Grid};

/// Insertion-ordered set of picked cells; the order spells the word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    picked: Vec<Coord>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `at`, or removes it if already picked. Returns whether it is picked afterwards.
    pub fn toggle(&mut self, grid: &Grid, at: Coord) -> Result<bool, SelectError> {
        if !grid.in_bounds(at) {
            return Err(SelectError::OutOfRange(at));
        }
        if grid.is_placeholder(at) {
            return Err(SelectError::Placeholder(at));
        }
        if let Some(pos) = self.picked.iter().position(|c| *c == at) {
            self.picked.remove(pos);
            Ok(false)
        } else {
            self.picked.push(at);
            Ok(true)
        }
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.picked.contains(&at)
    }

    pub fn coords(&self) -> &[Coord] {
        &self.picked
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    pub fn clear(&mut self) {
        self.picked.clear();
    }
}
