//! Firing cone resolution: how far a shot may stray and which cells it can land in.
//! This module exists so the drawn footprint of a shot and the ally veto agree on the cells.
//! It does not own hit resolution; the host still rolls where the shot actually goes.

use std::collections::BTreeSet;

use tracing::debug;

use crate::bystander::classify;
use crate::options::{Options, keys};
use crate::state::stat_modifier;
use crate::types::*;
use crate::world::{World, chebyshev};

/// Shooters below this Intelligence fire along the plain line.
pub const MIN_CONE_INTELLIGENCE: i32 = 12;
/// Shooters at or above this Intelligence always compensate for variance.
pub const COMPENSATION_INTELLIGENCE: i32 = 18;

const VARIANCE_MEAN: f64 = 6.65;
const VARIANCE_STD_DEV: f64 = 4.72;
const SKILLED_BONUS: f64 = 2.0;
const MARKED_TARGET_BONUS: f64 = 3.0;
const UNSKILLED_DIVISOR: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimAssessment {
    pub penalty: f64,
    pub skilled: bool,
    pub compensating: bool,
}

impl AimAssessment {
    /// Full cone width in degrees, both sides of the centreline.
    pub fn spread_degrees(&self) -> i32 {
        (self.penalty * 2.0) as i32
    }
}

/// Models the aim error of `shooter` firing `weapon` at `target`, if it is a missile weapon.
pub fn aim_penalty(
    world: &World,
    shooter: EntityId,
    target: Option<EntityId>,
    weapon: ItemId,
) -> Option<AimAssessment> {
    let actor = world.actor(shooter)?;
    let item = world.item(weapon)?;
    let missile = item.missile?;

    let skilled = missile.skill.is_some_and(|skill| actor.has_skill(skill));
    let compensating = skilled
        || actor.stat(Stat::Intelligence) >= COMPENSATION_INTELLIGENCE
        || actor.has_skill(Skill::Tactics)
        || actor.role == Role::Artillery;
    let divisor = if compensating || item.natural { 1.0 } else { UNSKILLED_DIVISOR };

    let mut penalty = -f64::from(stat_modifier(actor.stat(missile.modifier)));
    penalty += f64::from(missile.accuracy) / divisor;
    penalty -= f64::from(item.accuracy_bonus) / divisor;
    if skilled {
        penalty -= SKILLED_BONUS;
    }
    if let Some(target) = target.and_then(|id| world.actor(id)) {
        penalty += f64::from(target.incoming_aim_modifier);
        if target.marked_by == Some(shooter) {
            penalty -= MARKED_TARGET_BONUS;
        }
    }
    penalty -= f64::from(missile.aim_variance_bonus);
    penalty -= f64::from(actor.accuracy_bonus);
    if compensating {
        penalty += VARIANCE_MEAN + VARIANCE_STD_DEV;
    }

    debug!(?shooter, ?weapon, penalty, skilled, compensating, "aim penalty");
    Some(AimAssessment { penalty, skilled, compensating })
}

/// Every cell `shooter` might hit when firing `weapon` at `target_cell`.
///
/// Falls back to the straight line whenever the cone is off, the shooter is too dim to model
/// it, or the spread truncates to nothing.
pub fn firing_cone(
    world: &World,
    options: &Options,
    shooter: EntityId,
    target_cell: Pos,
    weapon: ItemId,
) -> Vec<Pos> {
    let Some(origin) = world.position(shooter) else {
        return Vec::new();
    };
    if !options.is_enabled(keys::FIRING_CONE)
        || world.stat(shooter, Stat::Intelligence) < MIN_CONE_INTELLIGENCE
    {
        return world.line(origin, target_cell);
    }
    let target = world.actor_at(target_cell);
    let Some(aim) = aim_penalty(world, shooter, target, weapon) else {
        return world.line(origin, target_cell);
    };
    let length = chebyshev(origin, target_cell) + 1;
    cone_cells(world, origin, target_cell, length, aim.spread_degrees())
}

/// Cells within `length` of `origin` whose bearing lies within half of `spread_degrees` of the
/// bearing to `target`, always including the straight line itself. Row-major.
pub fn cone_cells(
    world: &World,
    origin: Pos,
    target: Pos,
    length: u32,
    spread_degrees: i32,
) -> Vec<Pos> {
    let centreline = world.line(origin, target);
    if origin == target || spread_degrees <= 0 {
        return centreline;
    }
    let half_angle = f64::from(spread_degrees) / 2.0;
    let aim = bearing(origin, target);
    let span = world.map.internal_width.max(world.map.internal_height);
    let reach = i32::try_from(length.min(u32::try_from(span).unwrap_or(u32::MAX)))
        .unwrap_or(i32::MAX);

    let mut cells: BTreeSet<Pos> = centreline.into_iter().collect();
    for y in origin.y.saturating_sub(reach)..=origin.y.saturating_add(reach) {
        for x in origin.x.saturating_sub(reach)..=origin.x.saturating_add(reach) {
            let p = Pos { y, x };
            if p == origin || !world.map.in_bounds(p) || chebyshev(origin, p) > length {
                continue;
            }
            if angular_distance(bearing(origin, p), aim) <= half_angle {
                cells.insert(p);
            }
        }
    }
    cells.into_iter().collect()
}

fn bearing(from: Pos, to: Pos) -> f64 {
    f64::from(to.y - from.y).atan2(f64::from(to.x - from.x)).to_degrees()
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Vetoes a shot whose cone sweeps over anyone the shooter protects. The shooter itself is ignored.
pub fn cone_safety_check(world: &World, shooter: EntityId, cells: &[Pos]) -> Safety {
    for agent in world.combat_actors_in(cells) {
        if classify(world, shooter, agent, false).is_protected() {
            debug!(?shooter, bystander = ?agent, "shot vetoed by firing cone");
            return Safety::Vetoed { bystander: agent };
        }
    }
    Safety::Safe
}

/// Text rendering of the map with the cone marked, when the debug switch is on.
pub fn debug_overlay(
    world: &World,
    options: &Options,
    shooter: EntityId,
    cells: &[Pos],
) -> Option<String> {
    if !options.is_enabled(keys::FIRING_CONE_DEBUG) {
        return None;
    }
    Some(render_overlay(world, shooter, cells))
}

pub fn render_overlay(world: &World, shooter: EntityId, cells: &[Pos]) -> String {
    let swept: BTreeSet<Pos> = cells.iter().copied().collect();
    let shooter_pos = world.position(shooter);
    let mut text = String::new();
    for y in 0..world.map.internal_height {
        for x in 0..world.map.internal_width {
            let p = Pos { y: y as i32, x: x as i32 };
            let c = if Some(p) == shooter_pos {
                '@'
            } else if world.actor_at(p).is_some() {
                if swept.contains(&p) { 'X' } else { 'a' }
            } else if world.map.tile_at(p) == TileKind::Wall {
                '#'
            } else if world.map.tile_at(p) == TileKind::ClosedDoor {
                '+'
            } else if swept.contains(&p) {
                '*'
            } else {
                '.'
            };
            text.push(c);
        }
        text.push('\n');
    }
    text
}
