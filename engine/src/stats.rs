use serde::{Deserialize, Serialize};

use crate::life::format_hearts;

/// Best-of records for the current run. Ties keep the earlier word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub longest_word: String,
    pub longest_len: usize,
    pub highest_attack_word: String,
    pub highest_attack_halves: i32,
    pub most_effects_word: String,
    pub most_effects_count: usize,
    pub words_played: u32,
}

impl RunStats {
    pub fn record(&mut self, word: &str, attack_halves: i32, effect_count: usize) {
        if word.is_empty() {
            return;
        }
        self.words_played += 1;
        let len = word.chars().count();
        if len > self.longest_len {
            self.longest_len = len;
            self.longest_word = word.to_string();
        }
        if attack_halves > self.highest_attack_halves {
            self.highest_attack_halves = attack_halves;
            self.highest_attack_word = word.to_string();
        }
        if effect_count > self.most_effects_count {
            self.most_effects_count = effect_count;
            self.most_effects_word = word.to_string();
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let or_none = |w: &str| {
            if w.is_empty() {
                "(none)".to_string()
            } else {
                w.to_uppercase()
            }
        };
        vec![
            format!("Longest word: {} ({})", or_none(&self.longest_word), self.longest_len),
            format!(
                "Highest attack: {} ({})",
                or_none(&self.highest_attack_word),
                format_hearts(self.highest_attack_halves)
            ),
            format!(
                "Most effects: {} ({})",
                or_none(&self.most_effects_word),
                self.most_effects_count
            ),
        ]
    }
}
