//! Pre-attack vetoes for area hazards and point-blank bursts.
//! This module exists so throws and explosive shots never catch protected agents in the blast.
//! It does not own the attack itself; the host asks first and acts on the verdict.

use tracing::debug;

use crate::bystander::classify;
use crate::hazard::Hazard;
use crate::options::{Options, keys};
use crate::types::*;
use crate::world::{World, neighbors};

/// Scans every combat agent within the hazard's radius of `target_cell`.
///
/// The thrower counts as its own bystander, so it will not lob a grenade at its own feet.
pub fn blast_scan(
    world: &World,
    hazard: &impl Hazard,
    thrower: EntityId,
    target_cell: Pos,
) -> Safety {
    let radius = hazard.danger_radius();
    if radius == 0 {
        return Safety::Safe;
    }
    let cells = world.flood_visible(target_cell, radius);
    for agent in world.combat_actors_in(&cells) {
        let Some(actor) = world.actor(agent) else {
            continue;
        };
        if classify(world, thrower, agent, true).is_protected() && hazard.can_endanger(actor) {
            debug!(?thrower, bystander = ?agent, radius, ?target_cell, "area attack vetoed");
            return Safety::Vetoed { bystander: agent };
        }
    }
    Safety::Safe
}

/// Whether `thrower` may throw `thrown` at `target_cell`.
pub fn area_safety_check(
    world: &World,
    options: &Options,
    thrown: ItemId,
    thrower: EntityId,
    target_cell: Pos,
) -> Safety {
    if !options.is_enabled(keys::SAFE_GRENADES) {
        return Safety::Safe;
    }
    let Some(grenade) = world.item(thrown).and_then(|item| item.grenade) else {
        return Safety::Safe;
    };
    blast_scan(world, &grenade, thrower, target_cell)
}

/// Whether `shooter` may fire `weapon` at `target_cell` given where its projectile bursts.
pub fn missile_safety_check(
    world: &World,
    options: &Options,
    weapon: ItemId,
    shooter: EntityId,
    target_cell: Pos,
) -> Safety {
    if !options.is_enabled(keys::SAFE_MISSILES) {
        return Safety::Safe;
    }
    let Some(missile) = world.item(weapon).and_then(|item| item.missile) else {
        return Safety::Safe;
    };
    blast_scan(world, &missile.projectile, shooter, target_cell)
}

/// Whether `agent` may fire its radius-one quill burst right now.
///
/// Any adjacent combat agent that is not hostile and lacks quills of its own would be caught.
/// With nowhere for the quills to go the burst is never worth it.
pub fn may_burst_quills(world: &World, options: &Options, agent: EntityId) -> bool {
    if !options.is_enabled(keys::SAFE_QUILLS) {
        return true;
    }
    let Some(actor) = world.actor(agent) else {
        return false;
    };
    let adjacent: Vec<Pos> = neighbors(actor.pos)
        .into_iter()
        .filter(|&cell| world.map.in_bounds(cell) && world.map.tile_at(cell) != TileKind::Wall)
        .collect();
    if adjacent.is_empty() {
        return false;
    }
    let endangered = world.combat_actors_in(&adjacent).into_iter().find(|&other| {
        world.relationship(agent, other) != Relationship::Hostile
            && world.actor(other).is_some_and(|neighbour| !neighbour.has_quills)
    });
    if let Some(bystander) = endangered {
        debug!(?agent, ?bystander, "quill burst held");
        return false;
    }
    true
}
