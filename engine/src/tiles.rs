use serde::{Deserialize, Serialize};

use crate::{letters::random_letter, GameRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    #[default]
    Normal,
    Red,
    Green,
    Gray,
    Fire,
    Poison,
    Cursed,
    Frozen,
}

impl TileType {
    /// Special types in draw order; `Normal` takes whatever probability is left.
    pub const SPECIAL: [TileType; 7] = [
        TileType::Red,
        TileType::Green,
        TileType::Gray,
        TileType::Fire,
        TileType::Poison,
        TileType::Cursed,
        TileType::Frozen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TileType::Normal => "normal",
            TileType::Red => "red",
            TileType::Green => "green",
            TileType::Gray => "gray",
            TileType::Fire => "fire",
            TileType::Poison => "poison",
            TileType::Cursed => "cursed",
            TileType::Frozen => "frozen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub ch: char,
    pub kind: TileType,
}

impl Tile {
    pub fn new(ch: char, kind: TileType) -> Self {
        Self { ch: ch.to_ascii_uppercase(), kind }
    }

    pub fn normal(ch: char) -> Self {
        Self::new(ch, TileType::Normal)
    }
}

/// Base spawn probability per special type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTable {
    pub red: f64,
    pub green: f64,
    pub gray: f64,
    pub fire: f64,
    pub poison: f64,
    pub cursed: f64,
    pub frozen: f64,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            red: 0.05,
            green: 0.05,
            gray: 0.05,
            fire: 0.04,
            poison: 0.04,
            cursed: 0.04,
            frozen: 0.04,
        }
    }
}

impl SpawnTable {
    /// Every tile spawns as `Normal`.
    pub fn plain() -> Self {
        Self { red: 0.0, green: 0.0, gray: 0.0, fire: 0.0, poison: 0.0, cursed: 0.0, frozen: 0.0 }
    }

    pub fn base(&self, kind: TileType) -> f64 {
        match kind {
            TileType::Red => self.red,
            TileType::Green => self.green,
            TileType::Gray => self.gray,
            TileType::Fire => self.fire,
            TileType::Poison => self.poison,
            TileType::Cursed => self.cursed,
            TileType::Frozen => self.frozen,
            TileType::Normal => 0.0,
        }
    }
}

/// Per-type spawn multipliers set by equipment; 1.0 means unbiased.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBias {
    multipliers: [f64; 7],
}

impl Default for SpawnBias {
    fn default() -> Self {
        Self { multipliers: [1.0; 7] }
    }
}

impl SpawnBias {
    fn slot(kind: TileType) -> Option<usize> {
        TileType::SPECIAL.iter().position(|k| *k == kind)
    }

    pub fn get(&self, kind: TileType) -> f64 {
        Self::slot(kind).map(|i| self.multipliers[i]).unwrap_or(1.0)
    }

    /// Negative multipliers are stored as 0. `Normal` has no bias slot.
    pub fn set(&mut self, kind: TileType, multiplier: f64) {
        if let Some(i) = Self::slot(kind) {
            self.multipliers[i] = multiplier.max(0.0);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Effective per-type probabilities after bias. When the weighted sum reaches 1 the
/// segments are rescaled to fill the unit interval and `Normal` gets nothing.
pub fn weighted_probabilities(table: &SpawnTable, bias: &SpawnBias) -> [(TileType, f64); 7] {
    let mut out = TileType::SPECIAL.map(|k| (k, (table.base(k) * bias.get(k)).max(0.0)));
    let sum: f64 = out.iter().map(|(_, p)| p).sum();
    if sum > 1.0 {
        for (_, p) in out.iter_mut() {
            *p /= sum;
        }
    }
    out
}

pub fn random_type(rng: &mut GameRng, table: &SpawnTable, bias: &SpawnBias) -> TileType {
    let probs = weighted_probabilities(table, bias);
    let r = rng.unit();
    let mut edge = 0.0;
    for (kind, p) in probs {
        edge += p;
        if r < edge {
            return kind;
        }
    }
    // Float drift after rescaling must not leak probability back to Normal.
    if edge >= 1.0 - 1e-9 {
        if let Some((kind, _)) = probs.iter().rev().find(|(_, p)| *p > 0.0) {
            return *kind;
        }
    }
    TileType::Normal
}

/// Letter first, then type; the two draws are independent.
pub fn generate_tile(rng: &mut GameRng, table: &SpawnTable, bias: &SpawnBias) -> Tile {
    let ch = random_letter(rng);
    let kind = random_type(rng, table, bias);
    Tile::new(ch, kind)
}
