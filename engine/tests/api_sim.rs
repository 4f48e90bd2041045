use tilestrike::api::{
    best_play, cells_for_word, load_roster, load_rules, simulate_run, simulate_run_many, RunConfig,
    RunOutcome,
};
use tilestrike::dictionary::Dictionary;
use tilestrike::tiles::SpawnTable;
use tilestrike::{Coord, Difficulty, GameRng, GameSession, Grid, ItemKey, Rules};

fn content_path(rel: &str) -> String {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("content")
        .join(rel)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn run_api_smoke() {
    let cfg = RunConfig {
        roster_path: Some(content_path("enemies/classic.json")),
        rules_path: Some(content_path("rules/default.yaml")),
        seed: 2025,
        max_turns: 60,
        loadout: vec![ItemKey::HolyVowel],
        ..RunConfig::default()
    };
    let res = simulate_run(cfg).expect("run");
    assert!(res.turns > 0 && res.turns <= 60);
    assert!(res.stats.words_played > 0);
    assert!(res.log.last().is_some_and(|l| l.starts_with("[RUN]")));
    if res.outcome == RunOutcome::Defeat {
        assert_eq!(res.player_hp_end, 0);
    }
}

#[test]
fn same_seed_same_run() {
    let cfg = RunConfig { seed: 77, max_turns: 40, ..RunConfig::default() };
    let a = simulate_run(cfg.clone()).expect("run a");
    let b = simulate_run(cfg).expect("run b");
    assert_eq!(a.log, b.log);
    assert_eq!(a.outcome, b.outcome);
}

#[test]
fn many_runs_add_up() {
    let cfg = RunConfig { seed: 10, max_turns: 30, difficulty: Difficulty::Hard, ..RunConfig::default() };
    let summary = simulate_run_many(cfg, 3).expect("runs");
    assert_eq!(summary.victories + summary.defeats + summary.timeouts, 3);
}

#[test]
fn unknown_content_is_an_error() {
    let cfg = RunConfig { roster_id: Some("nope".to_string()), ..RunConfig::default() };
    let err = load_roster(&cfg).expect_err("unknown roster");
    assert!(err.to_string().contains("nope"));

    assert!(load_rules(Some("/definitely/missing.yaml")).is_err());
    assert_eq!(load_rules(None).expect("builtin"), Rules::default());
}

#[test]
fn bot_picks_the_strongest_spellable_word() {
    let rules = Rules { spawn: SpawnTable::plain(), ..Rules::default() };
    let roster = load_roster(&RunConfig::default()).expect("roster");
    let mut s = GameSession::new(rules, roster, Difficulty::Normal, GameRng::from_seed(1)).expect("session");
    s.set_grid(Grid::from_letters(&["EATS", "RING", "LOUD", "MAPS"]).expect("grid"));

    let dict = Dictionary::from_words(["at", "eats", "zebra"]);
    assert_eq!(cells_for_word(&s, "zebra"), None);
    assert_eq!(
        best_play(&s, &dict),
        Some(vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2), Coord::new(0, 3)])
    );
    assert_eq!(best_play(&s, &Dictionary::Loading), None);
}
