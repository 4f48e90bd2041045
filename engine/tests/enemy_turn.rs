use tilestrike::enemies::{parse_roster, DebuffSpec, Enemy, EnemyDef, SpecialAction, SpecialSpec, TileAction};
use tilestrike::hazards::*;
use tilestrike::scheduler::{plan_turn, Cadence};
use tilestrike::{ActiveEffects, Combatant, Difficulty, GameRng, Grid, TileType};

fn noop_log(_: String) {}

fn def(damage: i32, special: Option<SpecialSpec>, debuffs: Vec<DebuffSpec>) -> EnemyDef {
    EnemyDef {
        name: "Dummy".to_string(),
        kind: "dummy".to_string(),
        max_hearts: 5,
        damage_halves_per_turn: damage,
        desc: String::new(),
        debuffs,
        special,
    }
}

fn enemy(damage: i32) -> Enemy {
    Enemy::from_def(&def(damage, None, vec![]), Difficulty::Normal)
}

fn fire_special(every: u32, multiplier: f64) -> SpecialSpec {
    SpecialSpec {
        every,
        damage_multiplier: multiplier,
        actions: vec![SpecialAction { action: TileAction::FireTiles, count: 1 }],
    }
}

fn board_with(kind: TileType, count: usize) -> Grid {
    let mut grid = Grid::from_letters(&["EATS", "RING", "LOUD", "MAPS"]).expect("grid");
    for at in grid.coords().take(count).collect::<Vec<_>>() {
        grid.set_kind(at, kind);
    }
    grid
}

#[test]
fn difficulty_scales_hearts_rounding_up() {
    let d = def(1, None, vec![]);
    assert_eq!(Enemy::from_def(&d, Difficulty::Normal).life.max_hearts, 5);
    assert_eq!(Enemy::from_def(&d, Difficulty::Hard).life.max_hearts, 8);
    assert_eq!(Enemy::from_def(&d, Difficulty::Extreme).life.max_hearts, 10);
}

#[test]
fn cadence_counts_down_and_rearms() {
    let e = Enemy::from_def(&def(1, Some(fire_special(3, 2.0)), vec![]), Difficulty::Normal);
    let mut c = Cadence::for_enemy(&e);
    assert_eq!(c.countdown, Some(3));
    assert!(!c.is_special_turn());
    c.advance();
    c.advance();
    assert!(c.is_special_turn());
    let plan = plan_turn(&e, &c);
    assert!(plan.special);
    assert_eq!(plan.damage_multiplier, 2.0);
    c.advance();
    assert_eq!(c.countdown, Some(3));
}

#[test]
fn zero_cadence_means_every_turn() {
    let e = Enemy::from_def(&def(1, Some(fire_special(0, 1.0)), vec![]), Difficulty::Normal);
    let mut c = Cadence::for_enemy(&e);
    for _ in 0..3 {
        assert!(c.is_special_turn());
        c.advance();
    }
}

#[test]
fn enemies_without_special_never_plan_one() {
    let e = enemy(2);
    let mut c = Cadence::for_enemy(&e);
    c.advance();
    assert_eq!(c, Cadence::default());
    let plan = plan_turn(&e, &c);
    assert!(!plan.special);
    assert_eq!(plan.damage_multiplier, 1.0);
}

#[test]
fn poison_halves_once_and_floors() {
    let e = enemy(5);
    let grid = board_with(TileType::Normal, 0);
    let mut status = RunStatus { next_enemy_attack_halved: true, ..RunStatus::default() };

    let first = direct_attack_damage(&e, 1.0, &mut status, &ActiveEffects::default(), &grid, noop_log);
    assert!(first.poisoned);
    assert_eq!(first.damage, 2);
    assert!(!status.next_enemy_attack_halved);

    let second = direct_attack_damage(&e, 1.0, &mut status, &ActiveEffects::default(), &grid, noop_log);
    assert_eq!(second.damage, 5);
}

#[test]
fn special_multiplier_is_floored() {
    let e = enemy(3);
    let grid = board_with(TileType::Normal, 0);
    let mut status = RunStatus::default();
    let hit = direct_attack_damage(&e, 1.5, &mut status, &ActiveEffects::default(), &grid, noop_log);
    assert_eq!(hit.base, 4);
    assert_eq!(hit.damage, 4);
}

#[test]
fn frozen_armor_blocks_per_frozen_tile() {
    let grid = board_with(TileType::Frozen, 2);
    let fx = ActiveEffects { frozen_armor: true, ..ActiveEffects::default() };
    let mut status = RunStatus::default();

    let hit = direct_attack_damage(&enemy(3), 1.0, &mut status, &fx, &grid, noop_log);
    assert_eq!((hit.damage, hit.armor_blocked), (1, 2));

    let hit = direct_attack_damage(&enemy(1), 1.0, &mut status, &fx, &grid, noop_log);
    assert_eq!((hit.damage, hit.armor_blocked), (0, 1));
}

#[test]
fn fire_tiles_burn_and_fireproof_halves() {
    let grid = board_with(TileType::Fire, 3);
    let mut player = Combatant::new(6);
    assert_eq!(apply_fire_hazard(&mut player, &grid, &ActiveEffects::default(), noop_log), 3);
    assert_eq!(player.hp, 9);

    let fx = ActiveEffects { fireproof: true, ..ActiveEffects::default() };
    assert_eq!(apply_fire_hazard(&mut player, &grid, &fx, noop_log), 1);

    let single = board_with(TileType::Fire, 1);
    let mut lines = Vec::new();
    assert_eq!(apply_fire_hazard(&mut player, &single, &fx, |m| lines.push(m)), 0);
    assert!(lines.is_empty());
    assert_eq!(player.hp, 8);
}

#[test]
fn special_actions_convert_at_least_one_tile() {
    let mut grid = board_with(TileType::Normal, 0);
    let mut rng = GameRng::from_seed(4);
    let actions = [SpecialAction { action: TileAction::GrayTiles, count: 0 }];
    assert_eq!(apply_special_actions(&actions, &mut grid, &mut rng, noop_log), 1);
    assert_eq!(grid.count_kind(TileType::Gray), 1);
}

#[test]
fn debuff_rolls_respect_chance_bounds() {
    let mut grid = board_with(TileType::Normal, 0);
    let mut rng = GameRng::from_scripted(vec![0.0]);
    let never = [DebuffSpec { action: TileAction::FireTiles, chance: 0.0, count: 3 }];
    assert!(apply_debuffs(&never, &mut grid, &mut rng, noop_log).is_empty());

    let always = [DebuffSpec { action: TileAction::GrayTiles, chance: 1.0, count: 2 }];
    let fired = apply_debuffs(&always, &mut grid, &mut rng, noop_log);
    assert_eq!(fired, vec![(TileAction::GrayTiles, 2)]);
    assert_eq!(grid.count_kind(TileType::Gray), 2);
}

#[test]
fn enemy_turn_runs_attack_then_tiles_then_fire() {
    let e = Enemy::from_def(&def(1, Some(fire_special(1, 2.0)), vec![]), Difficulty::Normal);
    let mut cadence = Cadence::for_enemy(&e);
    let mut status = RunStatus::default();
    let mut grid = board_with(TileType::Normal, 0);
    let mut player = Combatant::new(6);
    let mut rng = GameRng::from_seed(8);
    let mut lines = Vec::new();

    let report = resolve_enemy_turn(
        &e,
        &mut cadence,
        &mut status,
        &ActiveEffects::default(),
        &mut grid,
        &mut player,
        &mut rng,
        |m| lines.push(m),
    );

    assert!(report.special);
    assert_eq!(report.dealt, 2);
    assert_eq!(report.special_converted, 1);
    assert_eq!(report.fire_damage, 1);
    assert!(!report.player_dead);
    assert_eq!(player.hp, 9);
    assert!(cadence.is_special_turn());

    let pos = |tag: &str| lines.iter().position(|l| l.starts_with(tag)).expect(tag);
    assert!(pos("[SPECIAL][Dummy]") < pos("[SPECIAL] 1 tile"));
    assert!(pos("[SPECIAL] 1 tile") < pos("[FIRE]"));
}

#[test]
fn debuffs_still_roll_on_special_turns() {
    let hex = vec![DebuffSpec { action: TileAction::GrayTiles, chance: 1.0, count: 2 }];
    let e = Enemy::from_def(&def(1, Some(fire_special(1, 1.0)), hex), Difficulty::Normal);
    let mut cadence = Cadence::for_enemy(&e);
    let mut status = RunStatus::default();
    let mut grid = board_with(TileType::Normal, 0);
    let mut player = Combatant::new(6);
    let mut rng = GameRng::from_seed(5);
    let mut lines = Vec::new();

    let report = resolve_enemy_turn(
        &e,
        &mut cadence,
        &mut status,
        &ActiveEffects::default(),
        &mut grid,
        &mut player,
        &mut rng,
        |m| lines.push(m),
    );

    assert!(report.special);
    assert_eq!(report.special_converted, 1);
    assert_eq!(report.debuffs, vec![(TileAction::GrayTiles, 2)]);
    assert_eq!(grid.count_kind(TileType::Gray), 2);

    let pos = |tag: &str| lines.iter().position(|l| l.starts_with(tag)).expect(tag);
    assert!(pos("[SPECIAL] 1 tile") < pos("[HEX] 2 tiles"));
}

#[test]
fn forecast_text() {
    let e = Enemy::from_def(&def(2, Some(fire_special(1, 2.0)), vec![]), Difficulty::Normal);
    let cadence = Cadence::for_enemy(&e);
    let f = forecast(&e, &cadence, &RunStatus::default());
    insta::assert_snapshot!(f.describe(), @"Will deal 2 hearts next turn + turn 1 tile fire");

    let poisoned = RunStatus { next_enemy_attack_halved: true, ..RunStatus::default() };
    let f = forecast(&enemy(3), &Cadence::default(), &poisoned);
    insta::assert_snapshot!(f.describe(), @"Will deal ½ heart next turn");
}

#[test]
fn builtin_roster_parses() {
    let rosters = tilestrike::content::builtin_rosters();
    let roster = parse_roster(rosters["classic"]).expect("classic roster");
    assert_eq!(roster.len(), 10);
    assert_eq!(roster[0].name, "Slime");
    assert!(roster.iter().filter(|d| d.special.is_some()).count() >= 3);
}
