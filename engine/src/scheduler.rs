use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::enemies::{Enemy, SpecialAction};

/// Countdown toward the enemy's next special turn. Both fields are `None` for enemies
/// without a special.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cadence {
    pub every: Option<u32>,
    pub countdown: Option<u32>,
}

impl Cadence {
    /// Armed at `every` (at least 1) for a freshly created enemy.
    pub fn for_enemy(enemy: &Enemy) -> Self {
        match &enemy.special {
            Some(special) => {
                let every = special.every.max(1);
                Self { every: Some(every), countdown: Some(every) }
            }
            None => Self::default(),
        }
    }

    /// Whether the upcoming enemy turn is a special turn.
    pub fn is_special_turn(&self) -> bool {
        matches!(self.countdown, Some(n) if n <= 1)
    }

    /// Called once at the end of each enemy turn that actually ran: re-arm after a special,
    /// otherwise count down.
    pub fn advance(&mut self) {
        let (Some(every), Some(countdown)) = (self.every, self.countdown) else {
            return;
        };
        let next = if countdown <= 1 { every } else { countdown - 1 };
        debug!(countdown, next, "cadence advanced");
        self.countdown = Some(next);
    }
}

/// What the scheduler decided for one enemy turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnPlan {
    pub special: bool,
    pub damage_multiplier: f64,
    pub actions: Vec<SpecialAction>,
}

pub fn plan_turn(enemy: &Enemy, cadence: &Cadence) -> TurnPlan {
    match &enemy.special {
        Some(special) if cadence.is_special_turn() => TurnPlan {
            special: true,
            damage_multiplier: special.damage_multiplier,
            actions: special.actions.clone(),
        },
        _ => TurnPlan { special: false, damage_multiplier: 1.0, actions: Vec::new() },
    }
}
