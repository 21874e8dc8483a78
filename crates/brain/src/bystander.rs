//! Who an acting agent must not hurt.
//! This module exists as the single relationship-to-protection rule shared by every safety check.
//! It does not own relationship storage; `World::relationship` answers that.

use crate::types::*;
use crate::world::World;

/// Classifies `subject` from `observer`'s point of view.
///
/// Allies are always protected. Observers that are not hostile by nature also protect neutral
/// agents. With `include_self` off, the observer never protects itself.
pub fn classify(
    world: &World,
    observer: EntityId,
    subject: EntityId,
    include_self: bool,
) -> Classification {
    if observer == subject && !include_self {
        return Classification::FairTarget;
    }
    match world.relationship(observer, subject) {
        Relationship::Allied => Classification::Ally,
        Relationship::Neutral if !world.is_hostile_by_default(observer) => {
            Classification::Bystander
        }
        Relationship::Neutral | Relationship::Hostile => Classification::FairTarget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::test_support::*;

    #[test]
    fn allies_are_protected_even_by_hostile_observers() {
        let mut world = open_arena(10, 10);
        let raider = add_soldier(&mut world, "raider", "raiders", Pos { y: 2, x: 2 });
        let mate = add_soldier(&mut world, "mate", "raiders", Pos { y: 2, x: 4 });
        world.actors[raider].hostile_by_default = true;
        assert_eq!(classify(&world, raider, mate, true), Classification::Ally);
    }

    #[test]
    fn neutrals_are_bystanders_only_for_peaceful_observers() {
        let mut world = open_arena(10, 10);
        let guard = add_soldier(&mut world, "guard", "guards", Pos { y: 2, x: 2 });
        let farmer = add_creature(&mut world, "farmer", Pos { y: 4, x: 4 });
        assert_eq!(classify(&world, guard, farmer, true), Classification::Bystander);

        world.actors[guard].hostile_by_default = true;
        // Explicit neutrality keeps the faction fallback from turning them hostile.
        world.actors[guard].relationships.insert(farmer, Relationship::Neutral);
        assert_eq!(classify(&world, guard, farmer, true), Classification::FairTarget);
    }

    #[test]
    fn enemies_are_fair_targets() {
        let mut world = open_arena(10, 10);
        let guard = add_soldier(&mut world, "guard", "guards", Pos { y: 2, x: 2 });
        let bandit = add_soldier(&mut world, "bandit", "bandits", Pos { y: 5, x: 5 });
        make_enemies(&mut world, guard, bandit);
        assert_eq!(classify(&world, guard, bandit, true), Classification::FairTarget);
    }

    #[test]
    fn self_protection_follows_include_self() {
        let mut world = open_arena(10, 10);
        let guard = add_soldier(&mut world, "guard", "guards", Pos { y: 2, x: 2 });
        assert_eq!(classify(&world, guard, guard, true), Classification::Ally);
        assert_eq!(classify(&world, guard, guard, false), Classification::FairTarget);
    }
}
