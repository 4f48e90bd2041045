use proptest::prelude::*;
use tilestrike::formula::round_attack;
use tilestrike::hazards::RunStatus;
use tilestrike::rules::LongWordScaling;
use tilestrike::tiles::SpawnTable;
use tilestrike::{
    compute_attack, ActiveEffects, AttackOutcome, Coord, EffectTag, GameRng, Grid, SpawnBias, Tile,
    TileType,
};

/// Lays `tiles` out row by row on the smallest square board (padding with normal `E`)
/// and selects them in order.
fn score(tiles: &[Tile], fx: &ActiveEffects, status: &RunStatus) -> AttackOutcome {
    let mut size = 1;
    while size * size < tiles.len() {
        size += 1;
    }
    let rows: Vec<Vec<Tile>> = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| tiles.get(r * size + c).copied().unwrap_or(Tile::normal('E')))
                .collect::<Vec<_>>()
        })
        .collect();
    let grid = Grid::from_rows(rows).expect("square grid");
    let picked: Vec<Coord> = (0..tiles.len()).map(|i| Coord::new(i / size, i % size)).collect();
    compute_attack(&picked, &grid, fx, status, &LongWordScaling::default())
}

fn plain(word: &str) -> Vec<Tile> {
    word.chars().map(Tile::normal).collect()
}

fn none() -> ActiveEffects {
    ActiveEffects::default()
}

#[test]
fn ties_round_up() {
    assert_eq!(round_attack(2.5), 3);
    assert_eq!(round_attack(2.49), 2);
    assert_eq!(round_attack(0.5), 1);
    assert_eq!(round_attack(-3.0), 0);

    let out = score(&plain("EEAAO"), &none(), &RunStatus::default());
    assert_eq!(out.raw_attack, 2.5);
    assert_eq!(out.attack_halves, 3);
}

#[test]
fn two_common_letters_deal_one_half_heart() {
    let out = score(&plain("EA"), &none(), &RunStatus::default());
    assert_eq!(out.word, "EA");
    assert_eq!(out.attack_halves, 1);
    assert_eq!(out.heal_halves, 0);
    assert_eq!(out.letter_count, 2);
    assert!(out.effects.is_empty());
}

#[test]
fn cursed_parity_halves_or_boosts() {
    let odd = vec![Tile::new('E', TileType::Cursed), Tile::normal('A'), Tile::normal('T')];
    let out = score(&odd, &none(), &RunStatus::default());
    assert_eq!(out.raw_attack, 1.0);
    assert!(out.effects.contains(&EffectTag::CursedOdd));
    assert!(out.effects.contains(&EffectTag::Cursed));

    let even = vec![
        Tile::new('E', TileType::Cursed),
        Tile::new('A', TileType::Cursed),
        Tile::normal('T'),
    ];
    let out = score(&even, &none(), &RunStatus::default());
    assert_eq!(out.raw_attack, 3.0);
    assert!(out.effects.contains(&EffectTag::CursedEven));
}

#[test]
fn ten_letter_word_scales_by_one_and_a_half() {
    let out = score(&plain("EEEEEAAAAI"), &none(), &RunStatus::default());
    assert_eq!(out.raw_attack, 7.5);
    assert_eq!(out.attack_halves, 8);
    assert!(out.effects.contains(&EffectTag::LongWordScaling));
}

#[test]
fn frozen_penalty_also_halves_the_echo() {
    let fx = ActiveEffects { crimson_echo: true, ..none() };
    let status = RunStatus { red_echo_chain: 2, ..RunStatus::default() };
    let tiles = vec![Tile::new('E', TileType::Frozen), Tile::normal('A')];

    let out = score(&tiles, &fx, &status);
    assert_eq!(out.raw_attack, 1.5);
    assert_eq!(out.attack_halves, 2);
    let echo = out.effects.get_index_of(&EffectTag::CrimsonEcho).expect("echo tag");
    let frozen = out.effects.get_index_of(&EffectTag::Frozen).expect("frozen tag");
    assert!(echo < frozen);
}

#[test]
fn thermal_gloves_skip_the_penalty_but_keep_the_tag() {
    let fx = ActiveEffects { ignore_frozen_penalty: true, ..none() };
    let tiles = vec![Tile::new('E', TileType::Frozen), Tile::normal('A')];
    let out = score(&tiles, &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 1.0);
    assert!(out.effects.contains(&EffectTag::Frozen));
    assert_eq!(out.usage.frozen, 1);
}

#[test]
fn red_doubles_and_enhancement_doubles_again() {
    let tiles = vec![Tile::new('E', TileType::Red), Tile::normal('A')];
    let out = score(&tiles, &none(), &RunStatus::default());
    assert_eq!(out.raw_attack, 1.5);
    assert!(out.effects.contains(&EffectTag::Red));

    let fx = ActiveEffects { red_enhanced: true, ..none() };
    let out = score(&tiles, &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 2.5);
    assert_eq!(out.attack_halves, 3);
    assert!(out.effects.contains(&EffectTag::RedEnhanced));
}

#[test]
fn gray_needs_goggles_to_score() {
    let tiles = vec![Tile::new('E', TileType::Gray), Tile::normal('A')];
    let out = score(&tiles, &none(), &RunStatus::default());
    assert_eq!(out.raw_attack, 0.5);
    assert!(out.effects.contains(&EffectTag::Gray));
    assert!(!out.effects.contains(&EffectTag::GrayGoggles));

    let fx = ActiveEffects { gray_goggles: true, grayscale_gambit: true, ..none() };
    let out = score(&tiles, &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 1.75);
    assert!(out.effects.contains(&EffectTag::GrayGoggles));
    assert!(out.effects.contains(&EffectTag::GrayscaleGambit));
}

#[test]
fn green_tiles_heal() {
    let tiles = vec![
        Tile::new('E', TileType::Green),
        Tile::new('A', TileType::Green),
        Tile::normal('T'),
    ];
    assert_eq!(score(&tiles, &none(), &RunStatus::default()).heal_halves, 2);

    let fx = ActiveEffects { healing_staff: true, herbal_surge: true, ..none() };
    let out = score(&tiles, &fx, &RunStatus::default());
    assert_eq!(out.heal_halves, 6);
    assert!(out.effects.contains(&EffectTag::HerbalSurge));
    assert_eq!(out.raw_attack, 2.0);
}

#[test]
fn heavy_letters_triple_with_the_expert() {
    let fx = ActiveEffects { jqzx_expert: true, ..none() };
    let out = score(&plain("QI"), &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 6.5);
    assert_eq!(out.attack_halves, 7);
    assert!(out.effects.is_empty());
}

#[test]
fn holy_vowel_doubles_vowels_only() {
    let fx = ActiveEffects { holy_vowel: true, ..none() };
    let out = score(&plain("AT"), &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 2.0);
    assert!(out.effects.contains(&EffectTag::HolyVowel));
}

#[test]
fn fire_war_axe_counts_fire_on_the_whole_board() {
    let fx = ActiveEffects { fire_war_axe: true, ..none() };
    let tiles = vec![
        Tile::normal('E'),
        Tile::normal('A'),
        Tile::new('T', TileType::Fire),
        Tile::new('S', TileType::Fire),
    ];
    let grid = Grid::from_rows(vec![tiles[..2].to_vec(), tiles[2..].to_vec()]).expect("grid");
    let out = compute_attack(
        &[Coord::new(0, 0), Coord::new(0, 1)],
        &grid,
        &fx,
        &RunStatus::default(),
        &LongWordScaling::default(),
    );
    assert_eq!(out.raw_attack, 3.0);
    assert!(out.effects.contains(&EffectTag::FireWarAxe));
    assert!(!out.effects.contains(&EffectTag::Fire));
}

#[test]
fn scrabbler_applies_after_long_word_scaling() {
    let fx = ActiveEffects { scrabbler: true, ..none() };
    let out = score(&plain("EEEAAAI"), &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 7.875);
    assert_eq!(out.attack_halves, 8);

    let short = score(&plain("EEEAAA"), &fx, &RunStatus::default());
    assert!(!short.effects.contains(&EffectTag::Scrabbler));
}

#[test]
fn word_shape_bonuses() {
    let fx = ActiveEffects {
        doubling_doubloon: true,
        palindromer: true,
        mirror_edge: true,
        ..none()
    };
    // ANNA: 3.0, +1 doubled, ×1.5 palindrome, +1 mirror
    let out = score(&plain("ANNA"), &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 7.0);
    let tags: Vec<_> = out.effects.iter().copied().collect();
    assert_eq!(
        tags,
        vec![EffectTag::DoublingDoubloon, EffectTag::Palindromer, EffectTag::MirrorEdge]
    );

    let single = score(&plain("A"), &fx, &RunStatus::default());
    assert!(single.effects.is_empty());
}

#[test]
fn vowel_suite_and_suffix() {
    let fx = ActiveEffects { vowel_suite: true, suffix_specialist: true, ..none() };
    let out = score(&plain("AEIOU"), &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 4.5);

    let out = score(&plain("EATER"), &fx, &RunStatus::default());
    assert_eq!(out.raw_attack, 4.375);
    assert_eq!(out.attack_halves, 4);
    assert!(out.effects.contains(&EffectTag::SuffixSpecialist));
}

#[test]
fn missing_cells_are_skipped() {
    let grid = Grid::from_letters(&["EA", "TS"]).expect("grid");
    let out = compute_attack(
        &[Coord::new(0, 0), Coord::new(5, 5), Coord::new(0, 1)],
        &grid,
        &none(),
        &RunStatus::default(),
        &LongWordScaling::default(),
    );
    assert_eq!(out.word, "EA");
    assert_eq!(out.attack_halves, 1);
}

proptest! {
    #[test]
    fn same_inputs_same_outcome(seed in any::<u64>(), picks in proptest::collection::vec(0usize..16, 0..10), chain in 0u32..4) {
        let mut rng = GameRng::from_seed(seed);
        let grid = Grid::generate(4, &mut rng, &SpawnTable::default(), &SpawnBias::default());
        let mut picked: Vec<Coord> = Vec::new();
        for i in picks {
            let at = Coord::new(i / 4, i % 4);
            if !picked.contains(&at) {
                picked.push(at);
            }
        }
        let fx = ActiveEffects { crimson_echo: true, fire_war_axe: true, palindromer: true, ..ActiveEffects::default() };
        let status = RunStatus { red_echo_chain: chain, ..RunStatus::default() };
        let long = LongWordScaling::default();
        let a = compute_attack(&picked, &grid, &fx, &status, &long);
        let b = compute_attack(&picked, &grid, &fx, &status, &long);
        prop_assert_eq!(&a, &b);
        prop_assert!(a.attack_halves >= 0);
    }
}
