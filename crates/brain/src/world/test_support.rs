//! Shared fixtures for the crate's unit test suites.
//! This module exists to avoid repeating map, actor and item setup across many tests.
//! It does not own production logic.

use super::*;
use crate::content::ContentPack;
use crate::state::{Actor, Item};

pub(crate) const TEST_SEED: u64 = 0x5eed;

pub(crate) fn open_arena(width: usize, height: usize) -> World {
    World::new(TEST_SEED, Map::new(width, height))
}

pub(crate) fn add_creature(world: &mut World, name: &str, pos: Pos) -> EntityId {
    add_actor(world, Actor::new(name, "villagers", pos))
}

pub(crate) fn add_actor(world: &mut World, actor: Actor) -> EntityId {
    world.spawn_actor(actor)
}

/// A clever, mobile fighter with fixed engagement radii.
pub(crate) fn add_soldier(world: &mut World, name: &str, faction: &str, pos: Pos) -> EntityId {
    let mut actor = Actor::new(name, faction, pos);
    actor.stats.intelligence = 14;
    actor.min_kill_radius = 6;
    actor.max_kill_radius = 6;
    world.spawn_actor(actor)
}

pub(crate) fn template(id: &str) -> Item {
    ContentPack::build_default().item(id).unwrap_or_else(|| panic!("unknown template {id}"))
}

pub(crate) fn drop_template(world: &mut World, id: &str, pos: Pos) -> ItemId {
    let item = world.spawn_item(template(id));
    world.place_item(item, pos);
    item
}

pub(crate) fn give_template(world: &mut World, agent: EntityId, id: &str) -> ItemId {
    let item = world.spawn_item(template(id));
    world.give_item(agent, item);
    item
}

pub(crate) fn make_allies(world: &mut World, a: EntityId, b: EntityId) {
    world.actors[a].relationships.insert(b, Relationship::Allied);
    world.actors[b].relationships.insert(a, Relationship::Allied);
}

pub(crate) fn make_enemies(world: &mut World, a: EntityId, b: EntityId) {
    world.actors[a].relationships.insert(b, Relationship::Hostile);
    world.actors[b].relationships.insert(a, Relationship::Hostile);
}

pub(crate) fn wall_occlusion_fixture() -> (Map, Pos) {
    let mut map = Map::new(11, 11);
    for y in 1..10 {
        for x in 1..10 {
            map.set_tile(Pos { y, x }, TileKind::Wall);
        }
    }
    for x in 1..10 {
        map.set_tile(Pos { y: 5, x }, TileKind::Floor);
    }
    map.set_tile(Pos { y: 5, x: 6 }, TileKind::Wall);
    (map, Pos { y: 5, x: 3 })
}

/// A one-wide east-west corridor on row 5 with a closed door at x = 5.
pub(crate) fn door_corridor_fixture() -> (Map, Pos, Pos) {
    let mut map = Map::new(10, 10);
    for y in 0..10 {
        for x in 0..10 {
            let corridor = y == 5 && (1..=8).contains(&x);
            let tile = if corridor { TileKind::Floor } else { TileKind::Wall };
            map.set_tile(Pos { y, x }, tile);
        }
    }
    let door = Pos { y: 5, x: 5 };
    map.set_tile(door, TileKind::ClosedDoor);
    (map, Pos { y: 5, x: 2 }, door)
}

/// Walls in a ring of radius one around `center`, leaving it reachable by nobody.
pub(crate) fn wall_in(world: &mut World, center: Pos) {
    for cell in neighbors(center) {
        world.map.set_tile(cell, TileKind::Wall);
    }
}
