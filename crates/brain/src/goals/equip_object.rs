use super::*;

/// Movement failures tolerated before an equip attempt gives up.
pub const EQUIP_RETRY_BUDGET: u8 = 3;
/// Agents below this Intelligence never try to recover equipment.
pub const MIN_EQUIP_INTELLIGENCE: i32 = 7;

/// Walk to an item and pick it up.
///
/// The target is a weak reference: every poll re-checks that it still exists, can be carried,
/// and is not in someone else's hands.
#[derive(Debug)]
pub struct EquipObject {
    target: ItemId,
    retries_left: u8,
}

impl EquipObject {
    pub fn new(target: ItemId) -> Self {
        Self { target, retries_left: EQUIP_RETRY_BUDGET }
    }

    pub fn target(&self) -> ItemId {
        self.target
    }

    pub fn retries_left(&self) -> u8 {
        self.retries_left
    }

    pub(super) fn eligible(agent: EntityId, world: &World) -> bool {
        world.actor(agent).is_some_and(|actor| {
            actor.mobile && actor.stat(Stat::Intelligence) >= MIN_EQUIP_INTELLIGENCE
        })
    }

    pub(super) fn step(&mut self, cx: &mut GoalContext<'_>) -> Step {
        let item = self.target;
        let Some((takeable, location)) =
            cx.world.item(item).map(|entry| (entry.takeable, entry.location))
        else {
            cx.think(Thought::TargetGone);
            return Step::Fail(GoalFailure::TargetInvalid);
        };
        if !takeable {
            cx.think(Thought::CannotEquip { item });
            return Step::Fail(GoalFailure::TargetInvalid);
        }
        let cell = match location {
            ItemLocation::InInventoryOf(owner) if owner == cx.agent => {
                cx.think(Thought::AlreadyHave { item });
                return Step::Pop;
            }
            ItemLocation::InInventoryOf(_) => {
                cx.think(Thought::SomeoneElseHolds { item });
                return Step::Fail(GoalFailure::TargetUnavailable);
            }
            ItemLocation::Invalid => {
                cx.think(Thought::TargetGone);
                return Step::Fail(GoalFailure::TargetInvalid);
            }
            ItemLocation::OnGround(cell) => cell,
        };
        let Some(here) = cx.world.position(cx.agent) else {
            return Step::Fail(GoalFailure::TargetInvalid);
        };

        if cx.world.adjacent_or_same(here, cell) {
            cx.think(Thought::GoingToTake { item });
            return Step::push(TakeItem::new(item));
        }

        cx.think(Thought::MovingTo { item });
        if cx.world.move_towards(cx.agent, cell) {
            return Step::Continue;
        }
        self.retries_left = self.retries_left.saturating_sub(1);
        if self.retries_left > 0 {
            cx.think(Thought::BlockedRetrying { item, remaining: self.retries_left });
            Step::Continue
        } else {
            cx.think(Thought::BlockedGivingUp { item });
            Step::Fail(GoalFailure::TargetUnreachable)
        }
    }
}

impl Goal for EquipObject {
    fn name(&self) -> &'static str {
        "EquipObject"
    }

    fn can_run(&self, agent: EntityId, world: &World) -> bool {
        Self::eligible(agent, world)
    }

    fn is_finished(&self, agent: EntityId, world: &World) -> bool {
        world.item_exists(self.target) && world.holds(agent, self.target)
    }

    fn can_fight(&self) -> bool {
        false
    }

    fn take_action(&mut self, cx: &mut GoalContext<'_>) -> Step {
        self.step(cx)
    }
}
