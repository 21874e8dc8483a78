//! Host-side equipment bookkeeping: the re-equip pass and forcible removal.
//! This module exists so the recovery-pending flag has a concrete consumer.
//! It does not own recovery decisions; goals and `recovery` push those.

use std::collections::BTreeMap;

use super::*;
use crate::scoring::score_for;

impl World {
    /// Equips the best-scoring carried item per slot in priority order and clears the pending flag.
    pub fn reequip(&mut self, agent: EntityId) {
        let Some(actor) = self.actors.get(agent) else {
            return;
        };
        let inventory = actor.inventory.clone();
        let mut chosen: BTreeMap<EquipSlot, ItemId> = BTreeMap::new();
        for slot in EquipSlot::PRIORITY {
            let mut best: Option<(ItemId, f64)> = None;
            for &item in &inventory {
                if chosen.values().any(|&used| used == item) {
                    continue;
                }
                let score = score_for(self, item, agent, slot);
                if score > 0.0 && best.is_none_or(|(_, top)| score > top) {
                    best = Some((item, score));
                }
            }
            if let Some((item, _)) = best {
                chosen.insert(slot, item);
            }
        }

        let actor = &mut self.actors[agent];
        actor.recovery_pending = false;
        let changed: Vec<(EquipSlot, ItemId)> = chosen
            .iter()
            .filter(|(slot, item)| actor.equipped.get(slot) != Some(item))
            .map(|(&slot, &item)| (slot, item))
            .collect();
        actor.equipped = chosen;
        for (slot, item) in changed {
            tracing::debug!(?agent, ?slot, ?item, "re-equipped");
            self.record(LogEvent::Reequipped { agent, slot, item });
        }
    }

    /// Knocks the item out of `slot` onto the first free neighbouring floor cell, or the agent's
    /// own cell. Natural weapons stay put.
    pub fn disarm(&mut self, agent: EntityId, slot: EquipSlot) -> Option<ItemId> {
        let actor = self.actors.get(agent)?;
        let item = *actor.equipped.get(&slot)?;
        if self.items.get(item).is_none_or(|entry| entry.natural) {
            return None;
        }
        let origin = actor.pos;
        let landing = neighbors(origin)
            .into_iter()
            .find(|&cell| self.map.is_walkable(cell) && self.actor_at(cell).is_none())
            .unwrap_or(origin);
        self.place_item(item, landing);
        self.record(LogEvent::ItemDropped { agent, item, pos: landing });
        tracing::debug!(?agent, ?slot, ?item, ?landing, "disarmed");
        Some(item)
    }

    /// Every carried item in `slot` falls to the floor, as under a magnetic pulse.
    pub fn strip_slot(&mut self, agent: EntityId, slot: EquipSlot) -> Vec<ItemId> {
        let mut lost = Vec::new();
        while let Some(item) = self.disarm(agent, slot) {
            lost.push(item);
            self.reequip_slot_only(agent, slot, &lost);
        }
        lost
    }

    fn reequip_slot_only(&mut self, agent: EntityId, slot: EquipSlot, skip: &[ItemId]) {
        let Some(actor) = self.actors.get(agent) else {
            return;
        };
        let next = actor.inventory.iter().copied().find(|&item| {
            !skip.contains(&item)
                && !actor.equipped.values().any(|&used| used == item)
                && self.items.get(item).is_some_and(|entry| entry.fits(slot) && !entry.natural)
        });
        if let Some(item) = next {
            self.actors[agent].equipped.insert(slot, item);
        }
    }
}
