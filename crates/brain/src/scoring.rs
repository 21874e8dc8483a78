//! Effectiveness scores for equipment in a given slot and wielder.
//! This module exists so recovery, search and the host re-equip pass rank items the same way.
//! It does not own which slot an item ends up in; callers decide that.

use crate::state::{Actor, Armor, Item, MeleeWeapon, MissileWeapon, Shield};
use crate::types::*;
use crate::world::World;

const PENETRATION_WEIGHT: f64 = 1.5;
const STAT_BONUS_WEIGHT: f64 = 0.5;
const ACCURACY_WEIGHT: f64 = 0.25;
const SKILLED_MULTIPLIER: f64 = 1.25;
const ARMOR_VALUE_WEIGHT: f64 = 2.0;

/// How well `item` serves in `slot`. Zero when it does not fit the slot at all.
pub fn score(item: &Item, wielder: Option<&Actor>, slot: EquipSlot) -> f64 {
    match slot {
        EquipSlot::MeleeWeapon => item.melee.map_or(0.0, |weapon| melee_score(&weapon, wielder)),
        EquipSlot::MissileWeapon => {
            item.missile.map_or(0.0, |weapon| missile_score(item, &weapon, wielder))
        }
        EquipSlot::Armor => item.armor.map_or(0.0, |armor| armor_score(&armor)),
        EquipSlot::Shield => item.shield.map_or(0.0, |shield| shield_score(&shield, wielder)),
    }
}

pub fn score_for(world: &World, item: ItemId, wielder: EntityId, slot: EquipSlot) -> f64 {
    world.item(item).map_or(0.0, |entry| score(entry, world.actor(wielder), slot))
}

/// Best score among everything `agent` carries for `slot`, or zero with nothing suitable.
pub fn best_held_score(world: &World, agent: EntityId, slot: EquipSlot) -> f64 {
    let Some(actor) = world.actor(agent) else {
        return 0.0;
    };
    actor
        .inventory
        .iter()
        .map(|&item| score_for(world, item, agent, slot))
        .fold(0.0, f64::max)
}

/// First slot in priority order where the item scores above zero for this wielder.
pub fn fallback_slot(item: &Item, wielder: Option<&Actor>) -> Option<EquipSlot> {
    EquipSlot::PRIORITY.into_iter().find(|&slot| score(item, wielder, slot) > 0.0)
}

fn skill_multiplier(skill: Option<Skill>, wielder: Option<&Actor>) -> f64 {
    match (skill, wielder) {
        (Some(skill), Some(actor)) if actor.has_skill(skill) => SKILLED_MULTIPLIER,
        _ => 1.0,
    }
}

fn melee_score(weapon: &MeleeWeapon, wielder: Option<&Actor>) -> f64 {
    let average = weapon.damage.average();
    if average <= 0.0 {
        return 0.0;
    }
    let stat_bonus = wielder.map_or(0, |actor| actor.stats.modifier(weapon.stat).max(0));
    let raw = average
        + f64::from(weapon.penetration.max(0)) * PENETRATION_WEIGHT
        + f64::from(stat_bonus) * STAT_BONUS_WEIGHT;
    raw * skill_multiplier(weapon.skill, wielder)
}

fn missile_score(item: &Item, weapon: &MissileWeapon, wielder: Option<&Actor>) -> f64 {
    let volley = weapon.damage.average() * f64::from(weapon.shots);
    if volley <= 0.0 {
        return 0.0;
    }
    let steadiness = weapon.aim_variance_bonus + item.accuracy_bonus - weapon.accuracy;
    let raw = volley + f64::from(steadiness) * ACCURACY_WEIGHT;
    (raw * skill_multiplier(weapon.skill, wielder)).max(0.0)
}

fn armor_score(armor: &Armor) -> f64 {
    f64::from(armor.av) * ARMOR_VALUE_WEIGHT + f64::from(armor.dv)
}

fn shield_score(shield: &Shield, wielder: Option<&Actor>) -> f64 {
    let trained = wielder.is_some_and(|actor| actor.has_skill(Skill::Shield));
    let training = if trained { 1.0 } else { 0.0 };
    f64::from(shield.av) * ARMOR_VALUE_WEIGHT + f64::from(shield.dv) + training
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentPack, keys};

    fn wielder() -> Actor {
        Actor::new("wielder", "guards", Pos { y: 1, x: 1 })
    }

    #[test]
    fn items_score_zero_outside_their_slot() {
        let content = ContentPack::build_default();
        let dagger = content.item(keys::BRONZE_DAGGER).unwrap();
        assert!(score(&dagger, None, EquipSlot::MeleeWeapon) > 0.0);
        assert_eq!(score(&dagger, None, EquipSlot::MissileWeapon), 0.0);
        assert_eq!(score(&dagger, None, EquipSlot::Armor), 0.0);
        assert_eq!(score(&dagger, None, EquipSlot::Shield), 0.0);
    }

    #[test]
    fn skill_raises_a_weapon_score() {
        let content = ContentPack::build_default();
        let sword = content.item(keys::IRON_LONG_SWORD).unwrap();
        let mut actor = wielder();
        let untrained = score(&sword, Some(&actor), EquipSlot::MeleeWeapon);
        actor.skills.insert(Skill::LongBlade);
        let trained = score(&sword, Some(&actor), EquipSlot::MeleeWeapon);
        assert!(trained > untrained);
    }

    #[test]
    fn fallback_prefers_missile_over_melee() {
        let mut bayonet_rifle = Item::new("bayonet rifle");
        bayonet_rifle.melee = Some(MeleeWeapon {
            damage: Dice::new(1, 4, 0),
            penetration: 1,
            stat: Stat::Strength,
            skill: None,
        });
        let rifle = ContentPack::build_default().item(keys::HUNTING_RIFLE).unwrap();
        bayonet_rifle.missile = rifle.missile;
        assert_eq!(fallback_slot(&bayonet_rifle, None), Some(EquipSlot::MissileWeapon));
    }

    #[test]
    fn fallback_is_none_without_any_positive_score() {
        let mut rag = Item::new("torn rag");
        rag.armor = Some(Armor { av: 0, dv: -1 });
        assert_eq!(fallback_slot(&rag, None), None);
        assert_eq!(fallback_slot(&Item::new("pebble"), None), None);
    }

    #[test]
    fn wildly_inaccurate_launcher_never_goes_negative() {
        let mut junk = ContentPack::build_default().item(keys::HUNTING_RIFLE).unwrap();
        if let Some(missile) = junk.missile.as_mut() {
            missile.damage = Dice::new(1, 2, 0);
            missile.accuracy = 40;
        }
        assert_eq!(score(&junk, None, EquipSlot::MissileWeapon), 0.0);
    }
}
