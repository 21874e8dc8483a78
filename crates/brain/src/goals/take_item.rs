use super::*;

/// Atomic pickup of an adjacent or co-located item. Acts once and pops, handing the walk back to
/// its parent if the item has moved out of reach since it was pushed.
#[derive(Debug)]
pub struct TakeItem {
    target: ItemId,
}

impl TakeItem {
    pub fn new(target: ItemId) -> Self {
        Self { target }
    }
}

impl Goal for TakeItem {
    fn name(&self) -> &'static str {
        "TakeItem"
    }

    fn is_finished(&self, _agent: EntityId, _world: &World) -> bool {
        false
    }

    fn can_fight(&self) -> bool {
        false
    }

    fn take_action(&mut self, cx: &mut GoalContext<'_>) -> Step {
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
        match location {
            ItemLocation::InInventoryOf(owner) if owner == cx.agent => return Step::Pop,
            ItemLocation::InInventoryOf(_) => {
                cx.think(Thought::SomeoneElseHolds { item });
                return Step::Fail(GoalFailure::TargetUnavailable);
            }
            ItemLocation::Invalid => {
                cx.think(Thought::TargetGone);
                return Step::Fail(GoalFailure::TargetInvalid);
            }
            ItemLocation::OnGround(cell) => {
                let within_reach = cx
                    .world
                    .position(cx.agent)
                    .is_some_and(|here| cx.world.adjacent_or_same(here, cell));
                if !within_reach {
                    // The parent walks over again on its next poll.
                    cx.think(Thought::OutOfReach { item });
                    return Step::Pop;
                }
            }
        }

        if !cx.world.take_item(cx.agent, item) {
            cx.think(Thought::SomeoneElseHolds { item });
            return Step::Fail(GoalFailure::TargetUnavailable);
        }
        if let Some(actor) = cx.world.actors.get_mut(cx.agent) {
            actor.recovery_pending = true;
        }
        Step::Pop
    }
}
