use serde::{Deserialize, Serialize};

use crate::life::Combatant;
use crate::rules::Difficulty;
use crate::tiles::TileType;

/// Tile conversion an enemy can inflict on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileAction {
    GrayTiles,
    FireTiles,
}

impl TileAction {
    pub fn target(self) -> TileType {
        match self {
            TileAction::GrayTiles => TileType::Gray,
            TileAction::FireTiles => TileType::Fire,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            TileAction::GrayTiles => "gray",
            TileAction::FireTiles => "fire",
        }
    }
}

fn one() -> u32 {
    1
}

fn unit_multiplier() -> f64 {
    1.0
}

/// Rolled independently every enemy turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebuffSpec {
    #[serde(rename = "type")]
    pub action: TileAction,
    pub chance: f64,
    #[serde(default = "one")]
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialAction {
    #[serde(rename = "type")]
    pub action: TileAction,
    #[serde(default = "one")]
    pub count: u32,
}

/// Fixed-cadence turn: every `every` enemy turns, damage is multiplied and all actions run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialSpec {
    pub every: u32,
    #[serde(default = "unit_multiplier")]
    pub damage_multiplier: f64,
    #[serde(default)]
    pub actions: Vec<SpecialAction>,
}

/// Static roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub name: String,
    pub kind: String,
    pub max_hearts: i32,
    pub damage_halves_per_turn: i32,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub debuffs: Vec<DebuffSpec>,
    #[serde(default)]
    pub special: Option<SpecialSpec>,
}

/// A live opponent, created fresh for each encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub kind: String,
    pub life: Combatant,
    pub damage_per_turn: i32,
    pub debuffs: Vec<DebuffSpec>,
    pub special: Option<SpecialSpec>,
}

impl Enemy {
    /// Difficulty scales max hearts, rounded up.
    pub fn from_def(def: &EnemyDef, difficulty: Difficulty) -> Self {
        let hearts = (def.max_hearts as f64 * difficulty.hp_multiplier()).ceil() as i32;
        Self {
            name: def.name.clone(),
            kind: def.kind.clone(),
            life: Combatant::new(hearts.max(1)),
            damage_per_turn: def.damage_halves_per_turn.max(0),
            debuffs: def.debuffs.clone(),
            special: def.special.clone(),
        }
    }
}

pub fn parse_roster(json: &str) -> Result<Vec<EnemyDef>, serde_json::Error> {
    serde_json::from_str(json)
}
