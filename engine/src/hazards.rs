use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::ActiveEffects;
use crate::enemies::{DebuffSpec, Enemy, SpecialAction, TileAction};
use crate::grid::Grid;
use crate::life::{apply_damage, format_hearts, Combatant};
use crate::scheduler::{plan_turn, Cadence};
use crate::tiles::TileType;
use crate::GameRng;

/// Statuses carried between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStatus {
    /// Set by a word that used a Poison tile; consumed by the next enemy direct attack.
    pub next_enemy_attack_halved: bool,
    /// Consecutive resolved words that used a Red tile.
    pub red_echo_chain: u32,
}

/// Breakdown of one enemy direct attack, before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectAttack {
    pub base: i32,
    pub poisoned: bool,
    pub armor_blocked: i32,
    pub damage: i32,
}

/// Computes the direct attack. Clears the poison flag when it is used.
pub fn direct_attack_damage(
    enemy: &Enemy,
    damage_multiplier: f64,
    status: &mut RunStatus,
    effects: &ActiveEffects,
    grid: &Grid,
    mut log: impl FnMut(String),
) -> DirectAttack {
    let base = (enemy.damage_per_turn as f64 * damage_multiplier).floor().max(0.0) as i32;
    let mut dmg = base;

    let poisoned = status.next_enemy_attack_halved;
    if poisoned {
        dmg = dmg.div_euclid(2);
        status.next_enemy_attack_halved = false;
        log(format!(
            "[POISON][{}] attack halved from {} to {}",
            enemy.name,
            format_hearts(base),
            format_hearts(dmg)
        ));
    }

    let mut armor_blocked = 0;
    if effects.frozen_armor {
        let frozen = grid.count_kind(TileType::Frozen) as i32;
        if frozen > 0 {
            let before = dmg;
            dmg = (dmg - frozen).max(0);
            armor_blocked = before - dmg;
            if armor_blocked > 0 {
                log(format!("[ARMOR] Frozen Armor blocks {}", format_hearts(armor_blocked)));
            }
        }
    }

    DirectAttack { base, poisoned, armor_blocked, damage: dmg }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Runs every special action; each converts `max(1, count)` tiles. Returns tiles converted.
pub fn apply_special_actions(
    actions: &[SpecialAction],
    grid: &mut Grid,
    rng: &mut GameRng,
    mut log: impl FnMut(String),
) -> usize {
    let mut total = 0;
    for a in actions {
        let n = grid.convert_random_tiles(a.action.target(), a.count.max(1) as usize, rng);
        if n > 0 {
            log(format!("[SPECIAL] {} tile{} turned {}", n, plural(n), a.action.verb()));
        }
        total += n;
    }
    total
}

/// Rolls each debuff independently; returns the ones that fired with their conversion counts.
pub fn apply_debuffs(
    debuffs: &[DebuffSpec],
    grid: &mut Grid,
    rng: &mut GameRng,
    mut log: impl FnMut(String),
) -> Vec<(TileAction, usize)> {
    let mut fired = Vec::new();
    for d in debuffs {
        if !rng.roll(d.chance) {
            continue;
        }
        let n = grid.convert_random_tiles(d.action.target(), d.count as usize, rng);
        if n > 0 {
            log(format!("[HEX] {} tile{} turned {}", n, plural(n), d.action.verb()));
        }
        fired.push((d.action, n));
    }
    fired
}

/// Fire tiles on the board burn the player for one half-heart each (halved, floored,
/// with Fireproof). Returns the damage dealt.
pub fn apply_fire_hazard(
    player: &mut Combatant,
    grid: &Grid,
    effects: &ActiveEffects,
    mut log: impl FnMut(String),
) -> i32 {
    let count = grid.count_kind(TileType::Fire) as i32;
    if count <= 0 {
        return 0;
    }
    let halves = if effects.fireproof { count.div_euclid(2) } else { count };
    if halves <= 0 {
        return 0;
    }
    log(format!("[FIRE] {} burning tile{} scorch you", count, plural(count as usize)));
    apply_damage("Player", player, halves, log)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyTurnReport {
    pub special: bool,
    pub attack: DirectAttack,
    pub dealt: i32,
    pub special_converted: usize,
    pub debuffs: Vec<(TileAction, usize)>,
    pub fire_damage: i32,
    pub player_dead: bool,
}

/// One full enemy turn: direct attack, special actions, debuffs, fire, cadence.
#[allow(clippy::too_many_arguments)]
pub fn resolve_enemy_turn(
    enemy: &Enemy,
    cadence: &mut Cadence,
    status: &mut RunStatus,
    effects: &ActiveEffects,
    grid: &mut Grid,
    player: &mut Combatant,
    rng: &mut GameRng,
    mut log: impl FnMut(String),
) -> EnemyTurnReport {
    let plan = plan_turn(enemy, cadence);
    let attack = direct_attack_damage(enemy, plan.damage_multiplier, status, effects, grid, &mut log);

    if plan.special && plan.damage_multiplier != 1.0 {
        log(format!("[SPECIAL][{}] special strike for {}", enemy.name, format_hearts(attack.damage)));
    } else {
        log(format!("[ATTACK][{}] strikes for {}", enemy.name, format_hearts(attack.damage)));
    }
    let dealt = apply_damage("Player", player, attack.damage, &mut log);

    let special_converted = if plan.special {
        apply_special_actions(&plan.actions, grid, rng, &mut log)
    } else {
        0
    };
    let debuffs = apply_debuffs(&enemy.debuffs, grid, rng, &mut log);
    let fire_damage = apply_fire_hazard(player, grid, effects, &mut log);
    cadence.advance();

    debug!(special = plan.special, dealt, fire_damage, hp = player.hp, "enemy turn resolved");

    EnemyTurnReport {
        special: plan.special,
        attack,
        dealt,
        special_converted,
        debuffs,
        fire_damage,
        player_dead: player.is_dead(),
    }
}

/// What the enemy will do next turn, for display. Frozen Armor is left out: it depends on
/// the board at the moment of the attack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyForecast {
    pub damage_halves: i32,
    pub special_next: bool,
    pub actions: Vec<SpecialAction>,
}

impl EnemyForecast {
    pub fn describe(&self) -> String {
        let mut msg = format!("Will deal {} next turn", format_hearts(self.damage_halves));
        for a in &self.actions {
            let n = a.count.max(1) as usize;
            msg.push_str(&format!(" + turn {} tile{} {}", n, plural(n), a.action.verb()));
        }
        msg
    }
}

pub fn forecast(enemy: &Enemy, cadence: &Cadence, status: &RunStatus) -> EnemyForecast {
    let plan = plan_turn(enemy, cadence);
    let mut dmg = (enemy.damage_per_turn as f64 * plan.damage_multiplier).floor().max(0.0) as i32;
    if status.next_enemy_attack_halved {
        dmg = dmg.div_euclid(2);
    }
    EnemyForecast { damage_halves: dmg, special_next: plan.special, actions: plan.actions }
}
