//! Attack/heal resolution for a spelled word.
//!
//! The order of the whole-word adjustments is part of the game's balance: each step
//! sees the running total left by the previous one, so moving a step changes results.

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, warn};

use crate::effects::{ActiveEffects, EffectTag};
use crate::grid::{Coord, Grid};
use crate::hazards::RunStatus;
use crate::letters::{base_damage, is_heavy, is_vowel, VOWELS};
use crate::rules::LongWordScaling;
use crate::tiles::TileType;

/// Scrabbler doubles words of at least this many letters.
pub const SCRABBLER_MIN_LETTERS: usize = 7;
const SUFFIXES: [&str; 3] = ["ING", "ED", "ER"];

/// How many tiles of each type the word used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TileUsage {
    pub red: usize,
    pub green: usize,
    pub gray: usize,
    pub fire: usize,
    pub poison: usize,
    pub cursed: usize,
    pub frozen: usize,
}

impl TileUsage {
    fn record(&mut self, kind: TileType) {
        match kind {
            TileType::Red => self.red += 1,
            TileType::Green => self.green += 1,
            TileType::Gray => self.gray += 1,
            TileType::Fire => self.fire += 1,
            TileType::Poison => self.poison += 1,
            TileType::Cursed => self.cursed += 1,
            TileType::Frozen => self.frozen += 1,
            TileType::Normal => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackOutcome {
    pub word: String,
    /// Unrounded total after every adjustment.
    pub raw_attack: f64,
    pub attack_halves: i32,
    pub heal_halves: i32,
    pub letter_count: usize,
    pub effects: IndexSet<EffectTag>,
    pub usage: TileUsage,
}

impl AttackOutcome {
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }
}

/// Ties round up (`2.5 → 3`). The total is never negative, so away-from-zero is the same thing.
pub fn round_attack(raw: f64) -> i32 {
    raw.max(0.0).round() as i32
}

/// Resolves the selected tiles into attack and heal values. Pure: reads only its arguments.
///
/// Coordinates that do not name a tile are skipped with a warning; the selection layer
/// refuses them, so reaching that branch means a caller bypassed it.
pub fn compute_attack(
    selection: &[Coord],
    grid: &Grid,
    effects: &ActiveEffects,
    status: &RunStatus,
    long_word: &LongWordScaling,
) -> AttackOutcome {
    let fx = effects;
    let mut attack = 0.0_f64;
    let mut heal = 0_i32;
    let mut usage = TileUsage::default();
    let mut word = String::with_capacity(selection.len());
    let mut used_holy_vowel = false;

    for at in selection {
        let Some(tile) = grid.get(*at) else {
            warn!(row = at.row, col = at.col, "selection names an empty or out-of-range cell");
            continue;
        };
        word.push(tile.ch);
        let contribution = base_damage(tile.ch) as f64 / 2.0;
        let vowel = is_vowel(tile.ch);
        let heavy = is_heavy(tile.ch);

        let mut mult = if tile.kind == TileType::Red { 2.0 } else { 1.0 };
        if tile.kind == TileType::Red && fx.red_enhanced {
            mult *= 2.0;
        }
        if fx.holy_vowel && vowel {
            mult *= 2.0;
            used_holy_vowel = true;
        }
        if fx.jqzx_expert && heavy {
            mult *= 3.0;
        }

        usage.record(tile.kind);
        match tile.kind {
            TileType::Gray => {
                if fx.gray_goggles {
                    attack += contribution * mult * 0.5;
                }
            }
            TileType::Green => {
                attack += contribution * mult;
                heal += if fx.healing_staff { 2 } else { 1 };
            }
            _ => attack += contribution * mult,
        }
    }

    let letter_count = word.chars().count();
    let mut tags: IndexSet<EffectTag> = IndexSet::new();

    if usage.cursed > 0 {
        if usage.cursed % 2 == 1 {
            attack *= 0.5;
            tags.insert(EffectTag::CursedOdd);
        } else {
            attack *= 1.5;
            tags.insert(EffectTag::CursedEven);
        }
        tags.insert(EffectTag::Cursed);
    }

    if fx.fire_war_axe {
        let on_field = grid.count_kind(TileType::Fire);
        if on_field > 0 {
            tags.insert(EffectTag::FireWarAxe);
        }
        attack += on_field as f64;
    }

    let extra = letter_count.saturating_sub(long_word.threshold);
    if extra > 0 {
        attack *= 1.0 + long_word.per_extra_multiplier * extra as f64;
        tags.insert(EffectTag::LongWordScaling);
    }

    if fx.scrabbler && letter_count >= SCRABBLER_MIN_LETTERS {
        attack *= 2.0;
        tags.insert(EffectTag::Scrabbler);
    }

    let upper = word.to_ascii_uppercase();
    let chars: Vec<char> = upper.chars().collect();

    if fx.doubling_doubloon && chars.windows(2).any(|w| w[0] == w[1]) {
        attack += 1.0;
        tags.insert(EffectTag::DoublingDoubloon);
    }

    if fx.palindromer && is_palindrome(&chars) {
        attack *= 1.5;
        tags.insert(EffectTag::Palindromer);
    }

    if fx.mirror_edge && chars.len() >= 2 && chars.first() == chars.last() {
        attack += 1.0;
        tags.insert(EffectTag::MirrorEdge);
    }

    if fx.vowel_suite && distinct_vowels(&chars) >= 4 {
        attack *= 1.5;
        tags.insert(EffectTag::VowelSuite);
    }

    if fx.suffix_specialist && SUFFIXES.iter().any(|s| upper.ends_with(s)) {
        attack *= 1.25;
        tags.insert(EffectTag::SuffixSpecialist);
    }

    if fx.grayscale_gambit && usage.gray > 0 {
        attack += 1.0;
        tags.insert(EffectTag::GrayscaleGambit);
    }

    // Echo lands before the frozen penalty, so frozen halves it too.
    if fx.crimson_echo && status.red_echo_chain > 0 {
        attack += status.red_echo_chain as f64;
        tags.insert(EffectTag::CrimsonEcho);
    }

    if usage.frozen > 0 {
        if !fx.ignore_frozen_penalty {
            attack *= 0.5;
        }
        tags.insert(EffectTag::Frozen);
    }

    if fx.herbal_surge && usage.green >= 2 {
        heal += 2;
        tags.insert(EffectTag::HerbalSurge);
    }

    if usage.red > 0 {
        tags.insert(EffectTag::Red);
        if fx.red_enhanced {
            tags.insert(EffectTag::RedEnhanced);
        }
    }
    if usage.gray > 0 {
        tags.insert(EffectTag::Gray);
        if fx.gray_goggles {
            tags.insert(EffectTag::GrayGoggles);
        }
    }
    if usage.fire > 0 {
        tags.insert(EffectTag::Fire);
    }
    if usage.poison > 0 {
        tags.insert(EffectTag::Poison);
    }
    if used_holy_vowel {
        tags.insert(EffectTag::HolyVowel);
    }

    let attack_halves = round_attack(attack);
    debug!(%word, raw = attack, attack_halves, heal, "word resolved");

    AttackOutcome {
        word,
        raw_attack: attack,
        attack_halves,
        heal_halves: heal,
        letter_count,
        effects: tags,
        usage,
    }
}

fn is_palindrome(chars: &[char]) -> bool {
    chars.len() >= 2 && chars.iter().eq(chars.iter().rev())
}

fn distinct_vowels(chars: &[char]) -> usize {
    chars
        .iter()
        .filter(|c| VOWELS.contains(c))
        .collect::<HashSet<_>>()
        .len()
}
