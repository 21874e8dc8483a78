//! Reaction to an agent losing a piece of equipment it was using.
//! This module exists to turn host-reported losses into recovery goals under the right switches.
//! It does not own the loss itself; the host disarms, pulses or destroys and then reports here.

use tracing::debug;

use crate::goals::{EquipObject, ReequipOrFindNew};
use crate::options::{Options, keys};
use crate::planner::{Goal, Planner};
use crate::types::*;
use crate::world::World;

/// Switch gating recovery for each way of losing an item.
pub fn recovery_switch(cause: LossCause) -> &'static str {
    match cause {
        LossCause::Disarmed => keys::DISARM_REEQUIP,
        LossCause::MagneticPulse => keys::PULSE_REEQUIP,
    }
}

/// Pushes a goal to win `item` back after `agent` lost it to `cause`. Returns whether one was
/// pushed.
pub fn on_equipment_lost(
    planner: &mut Planner,
    world: &mut World,
    options: &Options,
    agent: EntityId,
    item: ItemId,
    cause: LossCause,
) -> bool {
    if !options.is_enabled(recovery_switch(cause)) {
        return false;
    }
    let Some(actor) = world.actor(agent) else {
        return false;
    };
    if cause == LossCause::MagneticPulse && actor.kind == ActorKind::Player {
        return false;
    }

    let goal: Box<dyn Goal> = if options.is_enabled(keys::REEQUIP_SEARCH) {
        Box::new(ReequipOrFindNew::new(item, agent, world))
    } else {
        Box::new(EquipObject::new(item))
    };
    debug!(?agent, ?item, ?cause, goal = goal.name(), "equipment lost");
    planner.push_goal(agent, goal, world)
}
