//! Turn state machine and the session aggregate that owns all combat state.

use serde::Serialize;
use tracing::{debug, info};

use crate::dictionary::WordOracle;
use crate::effects::{ItemKey, Loadout};
use crate::enemies::{Enemy, EnemyDef};
use crate::error::{SelectError, SessionError, SubmitError};
use crate::formula::{compute_attack, AttackOutcome};
use crate::grid::{Coord, Grid};
use crate::hazards::{forecast, resolve_enemy_turn, EnemyForecast, EnemyTurnReport, RunStatus};
use crate::life::{apply_damage, heal, Combatant};
use crate::rules::{Difficulty, Rules};
use crate::scheduler::Cadence;
use crate::selection::Selection;
use crate::shop::{Shop, ShopChoice};
use crate::stats::RunStats;
use crate::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Selecting,
    Resolving,
    EnemyActing,
    Won,
    Lost,
}

impl TurnState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnState::Won | TurnState::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Submit,
    /// Shuffling the board gives the turn to the enemy.
    Forfeit,
    Resolved { enemy_dead: bool, frozen_used: bool },
    EnemyDone { player_dead: bool },
    NextEncounter,
}

/// Pure transition table. Pairs not listed leave the state unchanged.
pub fn transition(state: TurnState, event: TurnEvent) -> TurnState {
    use TurnEvent::*;
    use TurnState::*;
    match (state, event) {
        (Selecting, Submit) => Resolving,
        (Selecting, Forfeit) => EnemyActing,
        (Resolving, Resolved { enemy_dead: true, .. }) => Won,
        (Resolving, Resolved { frozen_used: true, .. }) => Selecting,
        (Resolving, Resolved { .. }) => EnemyActing,
        (EnemyActing, EnemyDone { player_dead: true }) => Lost,
        (EnemyActing, EnemyDone { player_dead: false }) => Selecting,
        (Won, NextEncounter) => Selecting,
        (s, _) => s,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum EnemyPhase {
    /// The enemy died before it could act.
    NotReached,
    /// A Frozen tile was used.
    Skipped,
    Acted(EnemyTurnReport),
}

/// Everything the presentation layer needs after a turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    /// `None` when the turn was forfeited by shuffling.
    pub outcome: Option<AttackOutcome>,
    pub enemy_damage: i32,
    pub player_healed: i32,
    pub enemy_phase: EnemyPhase,
    pub state: TurnState,
    pub player_hp: i32,
    pub enemy_hp: i32,
    pub forecast: EnemyForecast,
    pub log: Vec<String>,
}

/// Owns the whole run: combatants, board, equipment, statuses and the random source.
#[derive(Debug, Clone)]
pub struct GameSession {
    rules: Rules,
    roster: Vec<EnemyDef>,
    difficulty: Difficulty,
    encounter: usize,
    player: Combatant,
    enemy: Enemy,
    cadence: Cadence,
    grid: Grid,
    selection: Selection,
    status: RunStatus,
    loadout: Loadout,
    stats: RunStats,
    state: TurnState,
    rng: GameRng,
    log: Vec<String>,
}

impl GameSession {
    pub fn new(
        rules: Rules,
        roster: Vec<EnemyDef>,
        difficulty: Difficulty,
        mut rng: GameRng,
    ) -> Result<Self, SessionError> {
        rules.validate()?;
        let first = roster.first().ok_or(SessionError::EmptyRoster)?;
        let enemy = Enemy::from_def(first, difficulty);
        let cadence = Cadence::for_enemy(&enemy);
        let loadout = Loadout::default();
        let grid = Grid::generate(rules.grid_size, &mut rng, &rules.spawn, &loadout.bias);
        let player = Combatant::new(rules.player_max_hearts);
        let mut session = Self {
            rules,
            roster,
            difficulty,
            encounter: 0,
            player,
            enemy,
            cadence,
            grid,
            selection: Selection::new(),
            status: RunStatus::default(),
            loadout,
            stats: RunStats::default(),
            state: TurnState::Selecting,
            rng,
            log: Vec::new(),
        };
        session.push_log(format!("[START] Enemy: {}", session.enemy.name));
        info!(enemy = %session.enemy.name, difficulty = difficulty.label(), "run started");
        Ok(session)
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
    }

    /* ---------------- selection ---------------- */

    pub fn toggle(&mut self, at: Coord) -> Result<bool, SelectError> {
        if self.state != TurnState::Selecting {
            return Err(SelectError::EncounterOver);
        }
        self.selection.toggle(&self.grid, at)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn current_word(&self) -> String {
        self.grid.word_for(self.selection.coords())
    }

    /// Live attack preview for the current selection. Mutates nothing.
    pub fn preview(&self) -> AttackOutcome {
        compute_attack(
            self.selection.coords(),
            &self.grid,
            &self.loadout.effects,
            &self.status,
            &self.rules.long_word,
        )
    }

    /* ---------------- turns ---------------- */

    /// Validates and resolves the current selection. Rejections leave the session untouched.
    pub fn submit(&mut self, oracle: &impl WordOracle) -> Result<TurnReport, SubmitError> {
        if self.state != TurnState::Selecting {
            return Err(SubmitError::EncounterOver);
        }
        let word = self.current_word();
        if word.chars().count() < self.rules.min_word_len {
            return Err(SubmitError::TooShort { min: self.rules.min_word_len });
        }
        if !oracle.is_ready() {
            return Err(SubmitError::DictionaryNotReady);
        }
        if !oracle.contains(&word) {
            return Err(SubmitError::NotInDictionary(word.to_uppercase()));
        }

        let mark = self.log.len();
        self.state = transition(self.state, TurnEvent::Submit);

        let used = self.selection.coords().to_vec();
        let outcome = compute_attack(
            &used,
            &self.grid,
            &self.loadout.effects,
            &self.status,
            &self.rules.long_word,
        );
        self.stats.record(&outcome.word, outcome.attack_halves, outcome.effect_count());

        if outcome.usage.poison > 0 {
            self.status.next_enemy_attack_halved = true;
            self.push_log("[POISON] the enemy's next attack will be halved".to_string());
        }
        if outcome.usage.red > 0 {
            self.status.red_echo_chain += 1;
        } else {
            self.status.red_echo_chain = 0;
        }

        self.selection.clear();
        self.push_log(format!("[WORD] {} for attack {}", outcome.word, outcome.attack_halves));
        let log = &mut self.log;
        let enemy_damage =
            apply_damage(&self.enemy.name, &mut self.enemy.life, outcome.attack_halves, |m| log.push(m));
        let player_healed = heal("Player", &mut self.player, outcome.heal_halves, |m| log.push(m));
        self.grid.replace_used(&used, &mut self.rng, &self.rules.spawn, &self.loadout.bias);

        self.state = transition(
            self.state,
            TurnEvent::Resolved {
                enemy_dead: self.enemy.life.is_dead(),
                frozen_used: outcome.usage.frozen > 0,
            },
        );

        let enemy_phase = match self.state {
            TurnState::Won => {
                info!(enemy = %self.enemy.name, "encounter won");
                self.push_log(format!("[END] {} defeated", self.enemy.name));
                if self.is_final_encounter() {
                    info!(difficulty = self.difficulty.label(), "run won");
                    for line in self.stats.summary_lines() {
                        self.push_log(format!("[STATS] {}", line));
                    }
                }
                EnemyPhase::NotReached
            }
            TurnState::Selecting => {
                self.push_log("[FROZEN] the enemy skips their turn".to_string());
                EnemyPhase::Skipped
            }
            _ => EnemyPhase::Acted(self.run_enemy_turn()),
        };

        Ok(self.report(Some(outcome), enemy_damage, player_healed, enemy_phase, mark))
    }

    /// Discards the board for a fresh one and passes the turn to the enemy.
    pub fn shuffle(&mut self) -> Result<TurnReport, SubmitError> {
        if self.state != TurnState::Selecting {
            return Err(SubmitError::EncounterOver);
        }
        let mark = self.log.len();
        self.selection.clear();
        self.grid.regenerate(&mut self.rng, &self.rules.spawn, &self.loadout.bias);
        self.status.red_echo_chain = 0;
        self.push_log("[SHUFFLE] letters shuffled, passing the turn".to_string());
        self.state = transition(self.state, TurnEvent::Forfeit);
        let report = self.run_enemy_turn();
        Ok(self.report(None, 0, 0, EnemyPhase::Acted(report), mark))
    }

    fn run_enemy_turn(&mut self) -> EnemyTurnReport {
        let log = &mut self.log;
        let report = resolve_enemy_turn(
            &self.enemy,
            &mut self.cadence,
            &mut self.status,
            &self.loadout.effects,
            &mut self.grid,
            &mut self.player,
            &mut self.rng,
            |m| log.push(m),
        );
        self.state = transition(self.state, TurnEvent::EnemyDone { player_dead: report.player_dead });
        if self.state == TurnState::Lost {
            info!(enemy = %self.enemy.name, difficulty = self.difficulty.label(), "run lost");
            self.push_log(format!("[END] defeated by {} ({} mode)", self.enemy.name, self.difficulty.label()));
            for line in self.stats.summary_lines() {
                self.push_log(format!("[STATS] {}", line));
            }
        }
        report
    }

    fn report(
        &self,
        outcome: Option<AttackOutcome>,
        enemy_damage: i32,
        player_healed: i32,
        enemy_phase: EnemyPhase,
        mark: usize,
    ) -> TurnReport {
        TurnReport {
            outcome,
            enemy_damage,
            player_healed,
            enemy_phase,
            state: self.state,
            player_hp: self.player.hp,
            enemy_hp: self.enemy.life.hp,
            forecast: self.forecast(),
            log: self.log[mark..].to_vec(),
        }
    }

    pub fn forecast(&self) -> EnemyForecast {
        forecast(&self.enemy, &self.cadence, &self.status)
    }

    /* ---------------- encounters & runs ---------------- */

    pub fn is_final_encounter(&self) -> bool {
        self.encounter + 1 == self.roster.len()
    }

    pub fn open_shop(&mut self) -> Result<Shop, SessionError> {
        if self.state != TurnState::Won {
            return Err(SessionError::EncounterInProgress);
        }
        Ok(Shop::open(&mut self.rng, &self.loadout))
    }

    pub fn shop_choose(&mut self, shop: &mut Shop, choice: ShopChoice) -> Result<(), SessionError> {
        let log = &mut self.log;
        shop.choose(choice, &mut self.loadout, &mut self.player, |m| log.push(m))
    }

    /// Equipment change from outside the shop flow.
    pub fn equip(&mut self, key: ItemKey) {
        self.loadout.equip(key, &mut self.player);
        debug!(?key, "item equipped");
    }

    /// Moves on to the next roster entry after a win. Player health and equipment carry over.
    pub fn next_encounter(&mut self) -> Result<(), SessionError> {
        if self.state != TurnState::Won {
            return Err(SessionError::EncounterInProgress);
        }
        self.encounter = (self.encounter + 1) % self.roster.len();
        self.start_encounter();
        self.state = transition(self.state, TurnEvent::NextEncounter);
        info!(enemy = %self.enemy.name, encounter = self.encounter, "encounter started");
        self.push_log(format!("[START] Enemy: {}", self.enemy.name));
        Ok(())
    }

    /// Full restart: stats, equipment and player health reset; back to the first enemy.
    pub fn new_run(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.stats.clear();
        self.loadout.reset();
        self.player = Combatant::new(self.rules.player_max_hearts);
        self.encounter = 0;
        self.start_encounter();
        self.state = TurnState::Selecting;
        self.log.clear();
        info!(enemy = %self.enemy.name, difficulty = difficulty.label(), "run started");
        self.push_log(format!("[START] Enemy: {}", self.enemy.name));
    }

    fn start_encounter(&mut self) {
        self.enemy = Enemy::from_def(&self.roster[self.encounter], self.difficulty);
        self.cadence = Cadence::for_enemy(&self.enemy);
        self.status = RunStatus::default();
        self.selection.clear();
        self.grid.regenerate(&mut self.rng, &self.rules.spawn, &self.loadout.bias);
    }

    /* ---------------- accessors ---------------- */

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn encounter_index(&self) -> usize {
        self.encounter
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replaces the board (the selection is cleared since its cells may no longer exist).
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut RunStatus {
        &mut self.status
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn loadout_mut(&mut self) -> &mut Loadout {
        &mut self.loadout
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Hands the buffered combat log to the caller and empties the buffer.
    pub fn drain_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}
