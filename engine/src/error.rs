use thiserror::Error;

use crate::grid::Coord;

/// Rejected submissions. None of these mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("select at least {min} letters")]
    TooShort { min: usize },
    #[error("\"{0}\" is not in the dictionary")]
    NotInDictionary(String),
    #[error("dictionary is still loading")]
    DictionaryNotReady,
    #[error("the encounter is over")]
    EncounterOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("cell ({}, {}) is outside the grid", .0.row, .0.col)]
    OutOfRange(Coord),
    #[error("cell ({}, {}) is empty", .0.row, .0.col)]
    Placeholder(Coord),
    #[error("the encounter is over")]
    EncounterOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has {len} tiles, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("enemy roster is empty")]
    EmptyRoster,
    #[error("the encounter is still in progress")]
    EncounterInProgress,
    #[error("shop choice already made")]
    ShopClosed,
    #[error("no shop offer at slot {0}")]
    NoSuchOffer(usize),
    #[error(transparent)]
    Rules(#[from] RulesError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulesError {
    #[error("grid size must be at least 1")]
    ZeroGrid,
    #[error("player needs at least one heart")]
    NoHearts,
    #[error("spawn probability for {kind} is negative ({value})")]
    NegativeProbability { kind: &'static str, value: f64 },
    #[error("long-word multiplier must be non-negative, got {0}")]
    NegativeMultiplier(f64),
    #[error("minimum word length must be at least 2, got {0}")]
    MinWordTooShort(usize),
}
