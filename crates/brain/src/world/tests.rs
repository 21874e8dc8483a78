use super::test_support::*;
use super::*;
use crate::content::keys;

#[test]
fn faction_fallback_and_explicit_table() {
    let mut world = open_arena(12, 12);
    let guard = add_soldier(&mut world, "guard", "guards", Pos { y: 2, x: 2 });
    let captain = add_soldier(&mut world, "captain", "guards", Pos { y: 2, x: 4 });
    let farmer = add_creature(&mut world, "farmer", Pos { y: 4, x: 4 });
    let wolf = add_creature(&mut world, "wolf", Pos { y: 6, x: 6 });
    world.actors[wolf].faction = "beasts".to_string();
    world.actors[wolf].hostile_by_default = true;

    assert_eq!(world.relationship(guard, guard), Relationship::Allied);
    assert_eq!(world.relationship(guard, captain), Relationship::Allied);
    assert_eq!(world.relationship(guard, farmer), Relationship::Neutral);
    assert_eq!(world.relationship(guard, wolf), Relationship::Hostile);
    assert_eq!(world.relationship(farmer, wolf), Relationship::Hostile);

    world.actors[guard].relationships.insert(farmer, Relationship::Allied);
    assert_eq!(world.relationship(guard, farmer), Relationship::Allied);
    assert_eq!(world.relationship(farmer, guard), Relationship::Neutral, "tables are per observer");
}

#[test]
fn move_towards_takes_one_step_and_respects_occupants() {
    let mut world = open_arena(12, 12);
    let walker = add_creature(&mut world, "walker", Pos { y: 5, x: 2 });
    assert!(world.move_towards(walker, Pos { y: 5, x: 8 }));
    assert_eq!(world.actors[walker].pos, Pos { y: 5, x: 3 });

    let (map, start, _) = door_corridor_fixture();
    let mut corridor = World::new(TEST_SEED, map);
    let walker = add_creature(&mut corridor, "walker", start);
    add_creature(&mut corridor, "stander", Pos { y: 5, x: 3 });
    assert!(!corridor.move_towards(walker, Pos { y: 5, x: 4 }));
    assert_eq!(corridor.actors[walker].pos, start);
}

#[test]
fn immobile_agents_never_move() {
    let mut world = open_arena(8, 8);
    let turret = add_creature(&mut world, "turret", Pos { y: 3, x: 3 });
    world.actors[turret].mobile = false;
    assert!(!world.move_towards(turret, Pos { y: 3, x: 5 }));
    assert!(!world.step_away_from(turret, Pos { y: 3, x: 4 }));
}

#[test]
fn path_distance_counts_diagonal_steps_once() {
    let world = open_arena(12, 12);
    assert_eq!(world.path_distance(Pos { y: 1, x: 1 }, Pos { y: 4, x: 6 }), Some(5));
    assert_eq!(world.path_distance(Pos { y: 1, x: 1 }, Pos { y: 0, x: 0 }), None);
}

#[test]
fn take_item_is_atomic_and_refuses_other_peoples_things() {
    let mut world = open_arena(10, 10);
    let a = add_creature(&mut world, "a", Pos { y: 3, x: 3 });
    let b = add_creature(&mut world, "b", Pos { y: 3, x: 5 });
    let dagger = drop_template(&mut world, keys::BRONZE_DAGGER, Pos { y: 3, x: 4 });

    assert!(world.take_item(a, dagger));
    assert!(world.holds(a, dagger));
    assert!(!world.take_item(b, dagger));
    assert!(world.holds(a, dagger));
    assert_eq!(world.item_location(dagger), ItemLocation::InInventoryOf(a));
}

#[test]
fn destroyed_items_read_as_invalid() {
    let mut world = open_arena(10, 10);
    let a = add_creature(&mut world, "a", Pos { y: 3, x: 3 });
    let dagger = give_template(&mut world, a, keys::BRONZE_DAGGER);
    world.destroy_item(dagger);
    assert!(!world.item_exists(dagger));
    assert_eq!(world.item_location(dagger), ItemLocation::Invalid);
    assert!(world.actors[a].inventory.is_empty());
}

#[test]
fn removed_actor_leaves_its_gear_behind() {
    let mut world = open_arena(10, 10);
    let a = add_creature(&mut world, "a", Pos { y: 3, x: 3 });
    let dagger = give_template(&mut world, a, keys::BRONZE_DAGGER);
    world.remove_actor(a);
    assert_eq!(world.item_location(dagger), ItemLocation::OnGround(Pos { y: 3, x: 3 }));
}

#[test]
fn roll_range_stays_in_bounds_and_is_seeded() {
    let mut first = open_arena(5, 5);
    let mut second = open_arena(5, 5);
    for _ in 0..200 {
        let roll = first.roll_range(5, 15);
        assert!((5..=15).contains(&roll));
        assert_eq!(roll, second.roll_range(5, 15));
    }
    assert_eq!(first.roll_range(7, 7), 7);
    assert_eq!(first.roll_range(9, 3), 9);
}

#[test]
fn step_away_increases_distance() {
    let mut world = open_arena(12, 12);
    let coward = add_creature(&mut world, "coward", Pos { y: 5, x: 5 });
    let threat = Pos { y: 5, x: 4 };
    assert!(world.step_away_from(coward, threat));
    assert_eq!(chebyshev(world.actors[coward].pos, threat), 2);
}

#[test]
fn blocker_towards_reports_whoever_stands_on_the_next_step() {
    let (map, start, _) = door_corridor_fixture();
    let mut world = World::new(TEST_SEED, map);
    let walker = add_creature(&mut world, "walker", start);
    let blocker = add_creature(&mut world, "blocker", Pos { y: 5, x: 3 });
    assert_eq!(world.blocker_towards(walker, Pos { y: 5, x: 4 }), Some(blocker));
    assert_eq!(world.blocker_towards(blocker, Pos { y: 5, x: 4 }), None);
}

#[test]
fn snapshot_hash_tracks_positions() {
    let mut world = open_arena(10, 10);
    let a = add_creature(&mut world, "a", Pos { y: 3, x: 3 });
    let before = world.snapshot_hash();
    assert_eq!(before, world.snapshot_hash());
    world.move_towards(a, Pos { y: 3, x: 6 });
    assert_ne!(before, world.snapshot_hash());
}

#[test]
fn walls_block_sight_and_alliances_cross_factions() {
    let (map, origin) = wall_occlusion_fixture();
    let mut world = World::new(TEST_SEED, map);
    assert!(world.has_line_of_sight(origin, Pos { y: 5, x: 5 }));
    assert!(!world.has_line_of_sight(origin, Pos { y: 5, x: 8 }));

    let scout = add_creature(&mut world, "scout", origin);
    let drifter = add_creature(&mut world, "drifter", Pos { y: 5, x: 1 });
    world.actors[drifter].faction = "drifters".to_string();
    assert_eq!(world.relationship(scout, drifter), Relationship::Neutral);
    make_allies(&mut world, scout, drifter);
    assert_eq!(world.relationship(scout, drifter), Relationship::Allied);
    assert_eq!(world.relationship(drifter, scout), Relationship::Allied);
}
