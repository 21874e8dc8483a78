use tracing::debug;

use super::*;
use crate::scoring::{best_held_score, score_for};

/// Scan the surroundings for something better than what the agent holds for `slot`.
///
/// Makes exactly one attempt: it hands the best candidate to an `EquipObject` and fails on the
/// next poll whatever became of it.
#[derive(Debug)]
pub struct SearchForWeapon {
    slot: EquipSlot,
    delegated: bool,
}

impl SearchForWeapon {
    pub fn new(slot: EquipSlot) -> Self {
        Self { slot, delegated: false }
    }

    pub fn slot(&self) -> EquipSlot {
        self.slot
    }
}

/// Takeable items for `slot` that `agent` can see and walk to within `radius`, scoring above
/// `floor`, best first. Equal scores keep row-major scan order.
pub fn rank_candidates(
    world: &World,
    agent: EntityId,
    radius: u32,
    slot: EquipSlot,
    floor: f64,
) -> Vec<(ItemId, f64)> {
    let Some(origin) = world.position(agent) else {
        return Vec::new();
    };
    let cells = world.flood_visible(origin, radius);
    let mut candidates: Vec<(ItemId, f64)> = world
        .items_on_ground_in(&cells)
        .into_iter()
        .filter(|&item| world.item(item).is_some_and(|entry| entry.takeable && entry.fits(slot)))
        .filter(|&item| match world.item_location(item) {
            ItemLocation::OnGround(cell) => {
                world.path_distance(origin, cell).is_some_and(|steps| steps <= radius)
            }
            _ => false,
        })
        .map(|item| (item, score_for(world, item, agent, slot)))
        .filter(|&(_, score)| score > floor)
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
}

impl Goal for SearchForWeapon {
    fn name(&self) -> &'static str {
        "SearchForWeapon"
    }

    fn is_finished(&self, _agent: EntityId, _world: &World) -> bool {
        false
    }

    fn can_fight(&self) -> bool {
        false
    }

    fn take_action(&mut self, cx: &mut GoalContext<'_>) -> Step {
        let slot = self.slot;
        if self.delegated {
            cx.think(Thought::DoneSearching { slot });
            return Step::Fail(GoalFailure::AttemptSpent);
        }
        let Some((min, max)) =
            cx.world.actor(cx.agent).map(|actor| (actor.min_kill_radius, actor.max_kill_radius))
        else {
            return Step::Fail(GoalFailure::TargetInvalid);
        };

        cx.think(Thought::LookingForReplacement { slot });
        let radius = cx.world.roll_range(min, max);
        let floor = best_held_score(cx.world, cx.agent, slot);
        let candidates = rank_candidates(cx.world, cx.agent, radius, slot, floor);
        debug!(
            agent = ?cx.agent,
            ?slot,
            radius,
            floor,
            found = candidates.len(),
            "searched for replacement"
        );

        let Some(&(best, _)) = candidates.first() else {
            if let Some(actor) = cx.world.actors.get_mut(cx.agent) {
                actor.recovery_pending = true;
            }
            cx.think(Thought::NoReplacement { slot });
            return Step::Fail(GoalFailure::NoCandidateFound);
        };
        self.delegated = true;
        cx.think(Thought::FoundReplacement { item: best });
        Step::push(EquipObject::new(best))
    }
}
