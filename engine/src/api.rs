use std::{cmp::Reverse, fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::content::{builtin_rosters, builtin_rules};
use crate::dictionary::Dictionary;
use crate::effects::ItemKey;
use crate::enemies::{parse_roster, EnemyDef};
use crate::formula::compute_attack;
use crate::grid::Coord;
use crate::rules::{Difficulty, Rules};
use crate::shop::ShopChoice;
use crate::stats::RunStats;
use crate::turn::{GameSession, TurnState};
use crate::GameRng;

const DEFAULT_ROSTER: &str = "classic";
const DEFAULT_MAX_TURNS: u32 = 400;

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunConfig {
    #[serde(default)]
    pub roster_id: Option<String>,
    #[serde(default)]
    pub roster_path: Option<String>,
    #[serde(default)]
    pub rules_path: Option<String>,
    #[serde(default)]
    pub words_path: Option<String>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Items equipped before the first encounter.
    #[serde(default)]
    pub loadout: Vec<ItemKey>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            roster_id: None,
            roster_path: None,
            rules_path: None,
            words_path: None,
            seed: 0,
            difficulty: Difficulty::Normal,
            max_turns: DEFAULT_MAX_TURNS,
            loadout: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Victory,
    Defeat,
    Timeout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RunResult {
    pub outcome: RunOutcome,
    pub encounters_won: u32,
    pub turns: u32,
    pub player_hp_end: i32,
    pub stats: RunStats,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub samples: u32,
    pub victories: u32,
    pub defeats: u32,
    pub timeouts: u32,
    pub encounters_won: u32,
}

pub fn load_roster(cfg: &RunConfig) -> Result<Vec<EnemyDef>> {
    let roster = if let Some(path) = cfg.roster_path.as_deref() {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster JSON: {}", path))?;
        parse_roster(&text).with_context(|| format!("failed to parse roster JSON: {}", path))?
    } else {
        let id = cfg.roster_id.as_deref().unwrap_or(DEFAULT_ROSTER);
        let rosters = builtin_rosters();
        let Some(text) = rosters.get(id) else {
            bail!("unknown builtin roster '{}'", id);
        };
        parse_roster(text).with_context(|| format!("failed to parse builtin roster '{}'", id))?
    };
    if roster.is_empty() {
        bail!("enemy roster is empty");
    }
    Ok(roster)
}

/// YAML for `.yaml`/`.yml`, JSON otherwise. `None` loads the builtin defaults.
pub fn load_rules(path: Option<&str>) -> Result<Rules> {
    let Some(path) = path else {
        let builtins = builtin_rules();
        let text = builtins.get("default").context("builtin rules missing")?;
        return Rules::from_yaml_str(text).context("failed to parse builtin rules");
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read rules: {}", path))?;
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "yaml" | "yml" => Rules::from_yaml_str(&text),
        _ => Rules::from_json_str(&text),
    }
    .with_context(|| format!("invalid rules file: {}", path))
}

pub fn load_dictionary(path: Option<&str>) -> Result<Dictionary> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read word list: {}", path))?;
            Ok(Dictionary::from_word_list(&text))
        }
        None => Ok(Dictionary::starter()),
    }
}

/// Maps each letter of `word` to the first unused grid cell holding it.
pub fn cells_for_word(session: &GameSession, word: &str) -> Option<Vec<Coord>> {
    let mut picked: Vec<Coord> = Vec::with_capacity(word.len());
    for ch in word.chars().map(|c| c.to_ascii_uppercase()) {
        let at = session
            .grid()
            .tiles()
            .find(|(at, t)| t.ch == ch && !picked.contains(at))
            .map(|(at, _)| at)?;
        picked.push(at);
    }
    Some(picked)
}

/// Greedy pick: the dictionary word with the highest attack that the board can spell.
/// Ties go to more healing, then more letters, then alphabetical order.
pub fn best_play(session: &GameSession, dict: &Dictionary) -> Option<Vec<Coord>> {
    let cells = session.grid().coords().count();
    let min = session.rules().min_word_len;
    dict.words()
        .filter(|w| w.len() >= min && w.len() <= cells)
        .filter_map(|w| cells_for_word(session, w).map(|coords| (w, coords)))
        .map(|(w, coords)| {
            let outcome = compute_attack(
                &coords,
                session.grid(),
                &session.loadout().effects,
                session.status(),
                &session.rules().long_word,
            );
            let key = (outcome.attack_halves, outcome.heal_halves, outcome.letter_count, Reverse(w));
            (key, coords)
        })
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, coords)| coords)
}

/// Everything a run reads but never changes. Load once, play many seeds.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub roster: Vec<EnemyDef>,
    pub rules: Rules,
    pub dictionary: Dictionary,
}

pub fn load_inputs(cfg: &RunConfig) -> Result<RunInputs> {
    Ok(RunInputs {
        roster: load_roster(cfg)?,
        rules: load_rules(cfg.rules_path.as_deref())?,
        dictionary: load_dictionary(cfg.words_path.as_deref())?,
    })
}

/// Plays one seeded run with the greedy bot until defeat, final victory or the turn cap.
pub fn simulate_run(cfg: RunConfig) -> Result<RunResult> {
    let inputs = load_inputs(&cfg)?;
    play_run(&inputs, &cfg)
}

pub fn play_run(inputs: &RunInputs, cfg: &RunConfig) -> Result<RunResult> {
    let dict = &inputs.dictionary;
    let mut session = GameSession::new(
        inputs.rules.clone(),
        inputs.roster.clone(),
        cfg.difficulty,
        GameRng::from_seed(cfg.seed),
    )?;
    for key in &cfg.loadout {
        session.equip(*key);
    }

    let mut log = Vec::new();
    let mut turns = 0u32;
    let mut encounters_won = 0u32;

    let outcome = loop {
        match session.state() {
            TurnState::Lost => break RunOutcome::Defeat,
            TurnState::Won => {
                encounters_won += 1;
                if session.is_final_encounter() {
                    break RunOutcome::Victory;
                }
                let mut shop = session.open_shop()?;
                let player = session.player();
                let choice = if player.hp * 2 < player.max_hp() {
                    ShopChoice::Heal
                } else if shop.offers().is_empty() {
                    ShopChoice::Skip
                } else {
                    ShopChoice::Equip(0)
                };
                session.shop_choose(&mut shop, choice)?;
                session.next_encounter()?;
            }
            _ if turns >= cfg.max_turns => break RunOutcome::Timeout,
            _ => {
                turns += 1;
                let report = match best_play(&session, dict) {
                    Some(coords) => {
                        for at in coords {
                            session.toggle(at)?;
                        }
                        session.submit(dict)?
                    }
                    None => session.shuffle()?,
                };
                log.extend(report.log);
            }
        }
    };

    log.push(format!(
        "[RUN] outcome={:?} encounters_won={} turns={} player_hp={}",
        outcome,
        encounters_won,
        turns,
        session.player().hp
    ));

    Ok(RunResult {
        outcome,
        encounters_won,
        turns,
        player_hp_end: session.player().hp,
        stats: session.stats().clone(),
        log,
    })
}

/// Runs `samples` simulations on seeds `seed, seed + 1, ..`.
pub fn simulate_run_many(cfg: RunConfig, samples: u32) -> Result<RunSummary> {
    let inputs = load_inputs(&cfg)?;
    let mut summary = RunSummary { samples, victories: 0, defeats: 0, timeouts: 0, encounters_won: 0 };
    for i in 0..samples {
        let run_cfg = RunConfig { seed: cfg.seed.wrapping_add(i as u64), ..cfg.clone() };
        let result = play_run(&inputs, &run_cfg)?;
        match result.outcome {
            RunOutcome::Victory => summary.victories += 1,
            RunOutcome::Defeat => summary.defeats += 1,
            RunOutcome::Timeout => summary.timeouts += 1,
        }
        summary.encounters_won += result.encounters_won;
    }
    Ok(summary)
}
