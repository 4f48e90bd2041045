use crate::GameRng;

/// Scrabble-like letter weights. Drives both spawn frequency and damage tier.
const FREQUENCY: &[(char, u32)] = &[
    ('E', 12), ('A', 9), ('I', 9), ('O', 8), ('N', 6), ('R', 6), ('T', 6), ('L', 4), ('S', 4),
    ('U', 4), ('D', 4), ('G', 3), ('B', 2), ('C', 2), ('M', 2), ('P', 2), ('F', 2), ('H', 2),
    ('V', 2), ('W', 2), ('Y', 2), ('K', 1), ('J', 1), ('X', 1), ('Q', 1), ('Z', 1),
];

pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];
pub const HEAVY_LETTERS: [char; 4] = ['J', 'Q', 'Z', 'X'];

fn weight_of(letter: char) -> u32 {
    let up = letter.to_ascii_uppercase();
    FREQUENCY
        .iter()
        .find(|(ch, _)| *ch == up)
        .map(|(_, w)| *w)
        .unwrap_or(1)
}

/// Damage tier in half-hearts: rarer letters hit harder.
pub fn base_damage(letter: char) -> u32 {
    match weight_of(letter) {
        w if w >= 8 => 1,
        w if w >= 4 => 2,
        w if w >= 2 => 3,
        _ => 4,
    }
}

pub fn is_vowel(letter: char) -> bool {
    VOWELS.contains(&letter.to_ascii_uppercase())
}

pub fn is_heavy(letter: char) -> bool {
    HEAVY_LETTERS.contains(&letter.to_ascii_uppercase())
}

/// Draw a letter from the weighted distribution.
pub fn random_letter(rng: &mut GameRng) -> char {
    let total: u32 = FREQUENCY.iter().map(|(_, w)| w).sum();
    let mut pick = rng.below(total as usize) as u32;
    for (ch, w) in FREQUENCY {
        if pick < *w {
            return *ch;
        }
        pick -= w;
    }
    'E'
}
