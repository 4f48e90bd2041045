use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tilestrike::api::{self, RunConfig};
use tilestrike::enemies::Enemy;
use tilestrike::hazards::RunStatus;
use tilestrike::life::format_hearts;
use tilestrike::rules::LongWordScaling;
use tilestrike::{compute_attack, ActiveEffects, Coord, Grid, ItemKey, Loadout, Tile, TileType};

#[derive(Copy, Clone, ValueEnum)]
enum Diff {
    Normal,
    Hard,
    Extreme,
}

#[derive(Subcommand)]
enum Cmd {
    /// Let the greedy bot play one seeded run and print the combat log
    Play {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = Diff::Normal)]
        difficulty: Diff,
        /// Enemy roster JSON (defaults to the builtin classic roster)
        #[arg(long)]
        roster: Option<PathBuf>,
        /// Rules file, YAML or JSON by extension
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Word list, one word per line
        #[arg(long)]
        words: Option<PathBuf>,
        /// Safety cap on player turns
        #[arg(long, default_value_t = 400)]
        max_turns: u32,
        /// Item equipped before the first encounter (repeatable), e.g. holy_vowel
        #[arg(long = "item")]
        items: Vec<String>,
        /// Print the run result as JSON instead of the log
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Score a single word on a fixed board, no dictionary check
    Score {
        #[arg(long)]
        word: String,
        /// One tile code per letter: n normal, r red, g green, x gray, f fire, p poison, c cursed, z frozen
        #[arg(long)]
        types: Option<String>,
        /// Equipped item (repeatable), e.g. scrabbler
        #[arg(long = "item")]
        items: Vec<String>,
        /// Crimson Echo streak carried into this word
        #[arg(long, default_value_t = 0)]
        chain: u32,
    },
    /// List the enemy roster as it would spawn
    Enemies {
        #[arg(long)]
        roster: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Diff::Normal)]
        difficulty: Diff,
    },
    /// List the equipment catalog
    Items,
}

#[derive(Parser)]
#[command(name = "tilestrike")]
#[command(about = "Tilestrike word-combat harness")]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_difficulty(d: Diff) -> tilestrike::Difficulty {
    match d {
        Diff::Normal => tilestrike::Difficulty::Normal,
        Diff::Hard => tilestrike::Difficulty::Hard,
        Diff::Extreme => tilestrike::Difficulty::Extreme,
    }
}

fn parse_item(name: &str) -> anyhow::Result<ItemKey> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .with_context(|| format!("unknown item '{}'", name))
}

fn tile_type(code: char) -> anyhow::Result<TileType> {
    Ok(match code.to_ascii_lowercase() {
        'n' => TileType::Normal,
        'r' => TileType::Red,
        'g' => TileType::Green,
        'x' => TileType::Gray,
        'f' => TileType::Fire,
        'p' => TileType::Poison,
        'c' => TileType::Cursed,
        'z' => TileType::Frozen,
        other => bail!("unknown tile code '{}'", other),
    })
}

fn path_str(p: Option<PathBuf>) -> Option<String> {
    p.map(|p| p.to_string_lossy().into_owned())
}

/// Lays the word out row by row on the smallest square board, padding with normal `E` tiles.
fn board_for(word: &str, kinds: &[TileType]) -> anyhow::Result<(Grid, Vec<Coord>)> {
    let letters: Vec<char> = word.chars().collect();
    let mut size = 1;
    while size * size < letters.len() {
        size += 1;
    }
    let mut rows = vec![Vec::with_capacity(size); size];
    for i in 0..size * size {
        let tile = match letters.get(i) {
            Some(ch) => Tile::new(*ch, kinds.get(i).copied().unwrap_or_default()),
            None => Tile::normal('E'),
        };
        rows[i / size].push(tile);
    }
    let grid = Grid::from_rows(rows)?;
    let picked = (0..letters.len()).map(|i| Coord::new(i / size, i % size)).collect();
    Ok((grid, picked))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tilestrike::telemetry::init(cli.verbose);
    match cli.cmd {
        Cmd::Play {
            seed,
            difficulty,
            roster,
            rules,
            words,
            max_turns,
            items,
            json,
        } => {
            let loadout = items.iter().map(|s| parse_item(s)).collect::<anyhow::Result<Vec<_>>>()?;
            let cfg = RunConfig {
                roster_path: path_str(roster),
                rules_path: path_str(rules),
                words_path: path_str(words),
                seed,
                difficulty: to_difficulty(difficulty),
                max_turns,
                loadout,
                ..RunConfig::default()
            };
            let result = api::simulate_run(cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for line in &result.log {
                    println!("{}", line);
                }
                for line in result.stats.summary_lines() {
                    println!("{}", line);
                }
            }
        }
        Cmd::Score {
            word,
            types,
            items,
            chain,
        } => {
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("word must be non-empty and alphabetic, got '{}'", word);
            }
            let kinds = types
                .as_deref()
                .unwrap_or("")
                .chars()
                .map(tile_type)
                .collect::<anyhow::Result<Vec<_>>>()?;
            let mut loadout = Loadout::default();
            let mut scratch = tilestrike::Combatant::new(1);
            for name in &items {
                loadout.equip(parse_item(name)?, &mut scratch);
            }
            let effects: ActiveEffects = loadout.effects;
            let status = RunStatus { red_echo_chain: chain, ..RunStatus::default() };
            let (grid, picked) = board_for(&word, &kinds)?;
            let out = compute_attack(&picked, &grid, &effects, &status, &LongWordScaling::default());
            let tags: Vec<&str> = out.effects.iter().map(|t| t.as_str()).collect();
            println!(
                "word={} raw={:.3} attack={} ({}) heal={} effects=[{}]",
                out.word,
                out.raw_attack,
                out.attack_halves,
                format_hearts(out.attack_halves),
                out.heal_halves,
                tags.join(",")
            );
        }
        Cmd::Enemies { roster, difficulty } => {
            let cfg = RunConfig { roster_path: path_str(roster), ..RunConfig::default() };
            let defs = api::load_roster(&cfg)?;
            for def in &defs {
                let enemy = Enemy::from_def(def, to_difficulty(difficulty));
                let special = match &enemy.special {
                    Some(s) => format!(" special every {} turns", s.every),
                    None => String::new(),
                };
                println!(
                    "{:<14} hp={:<10} hits={:<10}{}  {}",
                    enemy.name,
                    format_hearts(enemy.life.max_hp()),
                    format_hearts(enemy.damage_per_turn),
                    special,
                    def.desc
                );
            }
        }
        Cmd::Items => {
            for key in ItemKey::ALL {
                let item = key.item();
                println!("{:<22} {}", item.name, item.desc);
            }
        }
    }
    Ok(())
}
