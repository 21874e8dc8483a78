//! Small melee-side decisions: stand-off distance, pass-by targets and tonic priority.
//! This module exists to keep switch-gated combat tweaks out of the goal implementations.
//! It does not own attacks or movement; it only answers questions the host asks while fighting.

use tracing::debug;

use crate::goals::Retreat;
use crate::options::{Options, keys};
use crate::planner::Planner;
use crate::types::*;
use crate::world::World;

/// Returned when the agent has decided to flee instead of closing in.
pub const NEVER_ADVANCE: u32 = u32::MAX;

const TERRIFYING_CON: f64 = 4.0;
const WORTHY_CON: f64 = 0.8;
const STAND_OFF: u32 = 2;
const PATIENCE_TURNS: u32 = 5;
const RETREAT_TURNS: (u32, u32) = (30, 50);

const NORMAL_TONIC_PRIORITY: u32 = 100;
const LOW_TONIC_PRIORITY: u32 = 1;

/// How close `agent` wants to get to `target` before swinging.
///
/// A far stronger target may scare the agent into a `Retreat`; a comparable one is circled at
/// arm's length until the agent runs out of patience.
pub fn stop_distance(
    world: &mut World,
    planner: &mut Planner,
    options: &Options,
    agent: EntityId,
    target: EntityId,
    turns_since_attacked: u32,
) -> u32 {
    if !options.is_enabled(keys::META_MELEE) {
        return 1;
    }
    let (Some(me), Some(them)) = (world.actor(agent), world.actor(target)) else {
        return 1;
    };
    let con = f64::from(them.level) / f64::from(me.level.max(1));

    if con >= TERRIFYING_CON && !world.make_save(agent, Stat::Willpower, (con * 2.0) as i32) {
        let turns = world.roll_range(RETREAT_TURNS.0, RETREAT_TURNS.1);
        debug!(?agent, ?target, con, turns, "too scared to engage");
        world.think(agent, Thought::TooScared { threat: target });
        planner.push_goal(agent, Box::new(Retreat::new(target, turns)), world);
        return NEVER_ADVANCE;
    }
    if con >= WORTHY_CON {
        // The save is rolled even while patience is not yet in question.
        let steady = world.make_save(agent, Stat::Willpower, (turns_since_attacked / 10) as i32);
        if turns_since_attacked > PATIENCE_TURNS && !steady {
            world.think(agent, Thought::LosingPatience { target });
            return 1;
        }
        return STAND_OFF;
    }
    1
}

/// A hostile combatant standing on the next step towards `target_pos`, to be attacked in passing.
pub fn pass_by_blocker(
    world: &mut World,
    options: &Options,
    agent: EntityId,
    target_pos: Pos,
) -> Option<EntityId> {
    if !options.is_enabled(keys::PASS_BY) {
        return None;
    }
    let blocker = world.blocker_towards(agent, target_pos)?;
    let hostile = world.relationship(agent, blocker) == Relationship::Hostile;
    if !hostile || !world.actor(blocker).is_some_and(|actor| actor.combat) {
        return None;
    }
    world.think(agent, Thought::InMyWay { blocker });
    Some(blocker)
}

pub fn tonic_priority(options: &Options) -> u32 {
    if options.is_enabled(keys::LOW_TONIC_PRIORITY) {
        LOW_TONIC_PRIORITY
    } else {
        NORMAL_TONIC_PRIORITY
    }
}
