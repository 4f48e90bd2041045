use anyhow::{bail, Context};
use clap::Parser;
use encoding_rs::Encoding;
use std::{fs, path::PathBuf};
use tilestrike::api::{self, RunConfig, RunOutcome};
use tilestrike::dictionary::Dictionary;
use tilestrike::enemies::parse_roster;
use tilestrike::{Difficulty, ItemKey};

#[derive(Parser)]
#[command(name = "simulate-runs")]
#[command(about = "Monte Carlo sim: many greedy-bot runs over consecutive seeds")]
struct Args {
    /// Number of runs
    #[arg(long, default_value_t = 200)]
    trials: u32,

    /// Safety cap on player turns per run
    #[arg(long, default_value_t = 400)]
    max_turns: u32,

    /// RNG base seed (run i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Difficulty: normal | hard | extreme
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Optional enemy roster JSON (falls back to the builtin classic roster)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Optional rules file (YAML or JSON)
    #[arg(long)]
    rules: Option<String>,

    /// Optional word list; UTF-8 or UTF-16 with BOM
    #[arg(long)]
    words: Option<PathBuf>,

    /// Starting items, comma separated snake_case keys
    #[arg(long, value_delimiter = ',')]
    items: Vec<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn to_difficulty(s: &str) -> Difficulty {
    match s.to_lowercase().as_str() {
        "hard" => Difficulty::Hard,
        "extreme" => Difficulty::Extreme,
        _ => Difficulty::Normal,
    }
}

fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tilestrike::telemetry::init(args.verbose);

    let loadout = args
        .items
        .iter()
        .map(|s| {
            serde_json::from_value::<ItemKey>(serde_json::Value::String(s.trim().to_string()))
                .with_context(|| format!("unknown item '{}'", s))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let base = RunConfig {
        rules_path: args.rules.clone(),
        seed: args.seed,
        difficulty: to_difficulty(&args.difficulty),
        max_turns: args.max_turns,
        loadout,
        ..RunConfig::default()
    };

    let mut inputs = api::load_inputs(&base)?;
    if let Some(path) = &args.roster {
        let text = read_text_auto(path)?;
        inputs.roster = parse_roster(&text)
            .with_context(|| format!("failed to parse roster JSON: {}", path.display()))?;
        if inputs.roster.is_empty() {
            bail!("enemy roster is empty: {}", path.display());
        }
    }
    if let Some(path) = &args.words {
        inputs.dictionary = Dictionary::from_word_list(&read_text_auto(path)?);
    }

    let mut victories = 0u32;
    let mut defeats = 0u32;
    let mut timeouts = 0u32;
    let mut encounters: Vec<u32> = Vec::with_capacity(args.trials as usize);
    let mut turns_total = 0u64;
    let mut best_word = String::new();
    let mut best_attack = 0i32;

    for i in 0..args.trials {
        let cfg = RunConfig { seed: args.seed.wrapping_add(i as u64), ..base.clone() };
        let result = api::play_run(&inputs, &cfg)?;
        match result.outcome {
            RunOutcome::Victory => victories += 1,
            RunOutcome::Defeat => defeats += 1,
            RunOutcome::Timeout => timeouts += 1,
        }
        encounters.push(result.encounters_won);
        turns_total += result.turns as u64;
        if result.stats.highest_attack_halves > best_attack {
            best_attack = result.stats.highest_attack_halves;
            best_word = result.stats.highest_attack_word.clone();
        }
    }

    encounters.sort_unstable();
    let trials_f = args.trials.max(1) as f64;
    let avg_encounters = encounters.iter().map(|&e| e as u64).sum::<u64>() as f64 / trials_f;
    let median_encounters = if encounters.is_empty() {
        0
    } else {
        let m = encounters.len() / 2;
        if encounters.len() % 2 == 1 {
            encounters[m]
        } else {
            (encounters[m - 1] + encounters[m]) / 2
        }
    };

    println!("simulate-runs results");
    println!("---------------------");
    println!("trials:               {}", args.trials);
    println!("difficulty:           {}", base.difficulty.label());
    println!();
    println!("victory rate:         {:.1}%", victories as f64 / trials_f * 100.0);
    println!("defeat rate:          {:.1}%", defeats as f64 / trials_f * 100.0);
    println!("timeouts:             {}", timeouts);
    println!("avg encounters won:   {:.2}", avg_encounters);
    println!("median encounters:    {}", median_encounters);
    println!("avg turns per run:    {:.1}", turns_total as f64 / trials_f);
    if !best_word.is_empty() {
        println!("best word:            {} ({} half-hearts)", best_word.to_uppercase(), best_attack);
    }

    Ok(())
}
