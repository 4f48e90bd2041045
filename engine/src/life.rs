use serde::{Deserialize, Serialize};

/// Half-hearts per displayed heart.
pub const HALF: i32 = 2;

/// A hit-point container. Health is stored in half-heart units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub hp: i32,
    pub max_hearts: i32,
}

impl Combatant {
    /// Starts at full health.
    pub fn new(max_hearts: i32) -> Self {
        let max_hearts = max_hearts.max(0);
        Self { hp: max_hearts.saturating_mul(HALF), max_hearts }
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hearts.saturating_mul(HALF)
    }

    /// Negative amounts count as zero. Never drops below 0.
    pub fn take_damage(&mut self, halves: i32) {
        self.hp = self.hp.saturating_sub(halves.max(0)).max(0);
    }

    /// Negative amounts count as zero. Never exceeds `max_hp`.
    pub fn heal(&mut self, halves: i32) {
        self.hp = self.hp.saturating_add(halves.max(0)).min(self.max_hp());
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Permanent max-heart change; current health is clamped to the new ceiling.
    pub fn set_max_hearts(&mut self, max_hearts: i32) {
        self.max_hearts = max_hearts.max(0);
        self.hp = self.hp.min(self.max_hp());
    }

    pub fn add_max_hearts(&mut self, extra: i32) {
        self.set_max_hearts(self.max_hearts.saturating_add(extra));
    }
}

/// Damage with a log line. Returns the half-hearts actually removed.
pub fn apply_damage(name: &str, who: &mut Combatant, halves: i32, mut log: impl FnMut(String)) -> i32 {
    let before = who.hp;
    who.take_damage(halves);
    let dealt = before - who.hp;
    log(format!("[DMG][{}] {} → {} (−{})", name, before, who.hp, format_hearts(dealt)));
    if before > 0 && who.is_dead() {
        log(format!("[STATE][{}] drops to 0 hearts", name));
    }
    dealt
}

/// Healing with a log line. Returns the half-hearts actually restored; silent when nothing changed.
pub fn heal(name: &str, who: &mut Combatant, halves: i32, mut log: impl FnMut(String)) -> i32 {
    let before = who.hp;
    who.heal(halves);
    let healed = who.hp - before;
    if healed > 0 {
        log(format!("[HEAL][{}] +{} ({} → {})", name, format_hearts(healed), before, who.hp));
    }
    healed
}

/// "½ heart", "1 heart", "3 hearts", "1.5 hearts".
pub fn format_hearts(halves: i32) -> String {
    match halves {
        1 => "½ heart".to_string(),
        2 => "1 heart".to_string(),
        h if h % HALF == 0 => format!("{} hearts", h / HALF),
        h => format!("{} hearts", h as f64 / HALF as f64),
    }
}
