use tilestrike::dictionary::{Dictionary, WordOracle};
use tilestrike::error::RulesError;
use tilestrike::rules::{Difficulty, Rules};
use tilestrike::tiles::SpawnTable;

#[test]
fn builtin_rules_match_defaults() {
    let builtins = tilestrike::content::builtin_rules();
    let rules = Rules::from_yaml_str(builtins["default"]).expect("builtin rules");
    assert_eq!(rules, Rules::default());
}

#[test]
fn partial_yaml_keeps_defaults() {
    let rules = Rules::from_yaml_str("grid_size: 5\nspawn:\n  red: 0.2\n").expect("rules");
    assert_eq!(rules.grid_size, 5);
    assert_eq!(rules.player_max_hearts, 6);
    assert_eq!(rules.spawn.red, 0.2);
    assert_eq!(rules.spawn.green, SpawnTable::default().green);
}

#[test]
fn json_rules_load_too() {
    let rules = Rules::from_json_str(r#"{"min_word_len": 3, "long_word": {"threshold": 5, "per_extra_multiplier": 0.25}}"#)
        .expect("rules");
    assert_eq!(rules.min_word_len, 3);
    assert_eq!(rules.long_word.threshold, 5);
}

#[test]
fn invalid_rules_are_rejected() {
    let zero = Rules { grid_size: 0, ..Rules::default() };
    assert_eq!(zero.validate(), Err(RulesError::ZeroGrid));

    let negative = Rules {
        spawn: SpawnTable { fire: -0.1, ..SpawnTable::default() },
        ..Rules::default()
    };
    assert_eq!(
        negative.validate(),
        Err(RulesError::NegativeProbability { kind: "fire", value: -0.1 })
    );

    assert!(Rules::from_yaml_str("player_max_hearts: 0\n").is_err());
}

#[test]
fn words_need_at_least_two_letters() {
    for len in [0, 1] {
        let rules = Rules { min_word_len: len, ..Rules::default() };
        assert_eq!(rules.validate(), Err(RulesError::MinWordTooShort(len)));
    }
    assert!(Rules::from_yaml_str("min_word_len: 0\n").is_err());
    assert!(Rules { min_word_len: 2, ..Rules::default() }.validate().is_ok());
}

#[test]
fn difficulty_labels() {
    assert_eq!(Difficulty::default(), Difficulty::Normal);
    assert_eq!(Difficulty::Hard.hp_multiplier(), 1.5);
    assert_eq!(Difficulty::Extreme.label(), "Extreme");
}

#[test]
fn loading_dictionary_rejects_everything() {
    let dict = Dictionary::default();
    assert!(!dict.is_ready());
    assert!(!dict.contains("cat"));
    assert!(dict.is_empty());
}

#[test]
fn word_list_filters_and_lowercases() {
    let dict = Dictionary::from_word_list("Cat\n a \ndog's\n  tree  \nx\nNO\n");
    assert!(dict.is_ready());
    assert_eq!(dict.len(), 3);
    assert!(dict.contains("CAT"));
    assert!(dict.contains("tree"));
    assert!(dict.contains("no"));
    assert!(!dict.contains("dog's"));
}

#[test]
fn starter_list_is_usable() {
    let dict = Dictionary::starter();
    assert!(dict.len() > 1000);
    assert!(dict.words().all(|w| w.len() >= 2));
}
