use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod content;
pub mod dictionary;
pub mod effects;
pub mod enemies;
pub mod error;
pub mod formula;
pub mod grid;
pub mod hazards;
pub mod letters;
pub mod life;
pub mod rules;
pub mod scheduler;
pub mod selection;
pub mod shop;
pub mod stats;
pub mod telemetry;
pub mod tiles;
pub mod turn;

pub use effects::{ActiveEffects, EffectTag, ItemKey, Loadout};
pub use error::{SelectError, SessionError, SubmitError};
pub use formula::{compute_attack, AttackOutcome};
pub use grid::{Coord, Grid};
pub use life::Combatant;
pub use rules::{Difficulty, Rules};
pub use tiles::{SpawnBias, Tile, TileType};
pub use turn::{GameSession, TurnReport, TurnState};

#[derive(Debug, Clone)]
enum Source {
    Seeded(ChaCha8Rng),
    Scripted { values: Vec<f64>, next: usize },
}

/// The single random source shared by tile generation, shuffles, debuff rolls and shop offers.
#[derive(Debug, Clone)]
pub struct GameRng {
    source: Source,
}

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    /// Replays `values` in a loop. Values are clamped into `[0, 1)`; an empty script always yields 0.
    pub fn from_scripted(values: Vec<f64>) -> Self {
        Self { source: Source::Scripted { values, next: 0 } }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(0.0..1.0),
            Source::Scripted { values, next } => {
                if values.is_empty() {
                    return 0.0;
                }
                let v = values[*next % values.len()];
                *next += 1;
                v.clamp(0.0, 1.0 - f64::EPSILON)
            }
        }
    }

    /// Uniform index in `0..n`; `n == 0` yields 0.
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.unit() * n as f64) as usize).min(n - 1)
    }

    /// Succeeds with probability `chance`, clamped to `[0, 1]`.
    pub fn roll(&mut self, chance: f64) -> bool {
        self.unit() < chance.clamp(0.0, 1.0)
    }

    /// In-place Fisher–Yates, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
