use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::tiles::{SpawnTable, TileType};

/// Words longer than `threshold` get `1 + per_extra_multiplier × extra letters`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongWordScaling {
    pub threshold: usize,
    pub per_extra_multiplier: f64,
}

impl Default for LongWordScaling {
    fn default() -> Self {
        Self { threshold: 6, per_extra_multiplier: 0.125 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub grid_size: usize,
    pub player_max_hearts: i32,
    pub min_word_len: usize,
    pub long_word: LongWordScaling,
    pub spawn: SpawnTable,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            grid_size: 4,
            player_max_hearts: 6,
            min_word_len: 2,
            long_word: LongWordScaling::default(),
            spawn: SpawnTable::default(),
        }
    }
}

impl Rules {
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let rules: Rules = serde_yaml::from_str(text)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let rules: Rules = serde_json::from_str(text)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.grid_size == 0 {
            return Err(RulesError::ZeroGrid);
        }
        if self.player_max_hearts < 1 {
            return Err(RulesError::NoHearts);
        }
        if self.min_word_len < 2 {
            return Err(RulesError::MinWordTooShort(self.min_word_len));
        }
        for kind in TileType::SPECIAL {
            let value = self.spawn.base(kind);
            if value < 0.0 {
                return Err(RulesError::NegativeProbability { kind: kind.as_str(), value });
            }
        }
        if self.long_word.per_extra_multiplier < 0.0 {
            return Err(RulesError::NegativeMultiplier(self.long_word.per_extra_multiplier));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn hp_multiplier(self) -> f64 {
        match self {
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
            Difficulty::Extreme => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}
