use serde::Serialize;

use crate::effects::{Item, ItemKey, Loadout};
use crate::error::SessionError;
use crate::life::{heal, Combatant};
use crate::GameRng;

pub const OFFER_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopChoice {
    Heal,
    Equip(usize),
    Skip,
}

/// Between-encounter shop: one choice per visit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shop {
    offers: Vec<Item>,
    chosen: Option<ShopChoice>,
}

impl Shop {
    /// Offers distinct random items the player does not own yet; falls back to the
    /// whole catalog once everything is owned.
    pub fn open(rng: &mut GameRng, loadout: &Loadout) -> Self {
        let mut pool: Vec<ItemKey> = ItemKey::ALL
            .iter()
            .copied()
            .filter(|k| !loadout.owns(*k))
            .collect();
        if pool.is_empty() {
            pool = ItemKey::ALL.to_vec();
        }
        rng.shuffle(&mut pool);
        let offers = pool.into_iter().take(OFFER_SIZE).map(ItemKey::item).collect();
        Self { offers, chosen: None }
    }

    pub fn offers(&self) -> &[Item] {
        &self.offers
    }

    pub fn chosen(&self) -> Option<ShopChoice> {
        self.chosen
    }

    pub fn choose(
        &mut self,
        choice: ShopChoice,
        loadout: &mut Loadout,
        player: &mut Combatant,
        mut log: impl FnMut(String),
    ) -> Result<(), SessionError> {
        if self.chosen.is_some() {
            return Err(SessionError::ShopClosed);
        }
        match choice {
            ShopChoice::Heal => {
                let full = player.max_hp();
                let healed = heal("Player", player, full, &mut log);
                if healed == 0 {
                    log("[SHOP] already at full health".to_string());
                }
            }
            ShopChoice::Equip(slot) => {
                let item = *self.offers.get(slot).ok_or(SessionError::NoSuchOffer(slot))?;
                loadout.equip(item.key, player);
                log(format!("[SHOP] equipped {}", item.name));
            }
            ShopChoice::Skip => log("[SHOP] skipped".to_string()),
        }
        self.chosen = Some(choice);
        Ok(())
    }
}
