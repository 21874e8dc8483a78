use super::*;
use crate::scoring::fallback_slot;

/// Get a specific lost item back, or go looking for something like it.
#[derive(Debug)]
pub struct ReequipOrFindNew {
    inner: EquipObject,
    fallback: Option<EquipSlot>,
}

impl ReequipOrFindNew {
    /// Records which slot the lost item served so a failed recovery can search for a substitute.
    pub fn new(target: ItemId, agent: EntityId, world: &World) -> Self {
        let fallback = world.item(target).and_then(|item| fallback_slot(item, world.actor(agent)));
        Self { inner: EquipObject::new(target), fallback }
    }

    pub fn target(&self) -> ItemId {
        self.inner.target()
    }

    pub fn fallback(&self) -> Option<EquipSlot> {
        self.fallback
    }
}

impl Goal for ReequipOrFindNew {
    fn name(&self) -> &'static str {
        "ReequipOrFindNew"
    }

    fn can_run(&self, agent: EntityId, world: &World) -> bool {
        EquipObject::eligible(agent, world)
    }

    fn is_finished(&self, agent: EntityId, world: &World) -> bool {
        self.inner.is_finished(agent, world)
    }

    fn can_fight(&self) -> bool {
        false
    }

    fn take_action(&mut self, cx: &mut GoalContext<'_>) -> Step {
        self.inner.step(cx)
    }

    fn on_fail(&mut self, _cx: &mut GoalContext<'_>) -> Option<Box<dyn Goal>> {
        let slot = self.fallback?;
        Some(Box::new(SearchForWeapon::new(slot)))
    }
}
