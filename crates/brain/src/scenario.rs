//! JSON description of a starting skirmish: terrain, actors, items and scheduled disruptions.
//! This module exists so tools and tests can set up worlds from data instead of code.
//! It does not own simulation; `build` hands back a ready `Skirmish`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::content::ContentPack;
use crate::error::LoadError;
use crate::skirmish::Skirmish;
use crate::state::{Actor, Map, Physiology, Stats};
use crate::types::*;
use crate::world::World;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub walls: Vec<Pos>,
    #[serde(default)]
    pub doors: Vec<Pos>,
    #[serde(default)]
    pub actors: Vec<ActorSpec>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub disruptions: Vec<DisruptionSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActorSpec {
    pub name: String,
    pub faction: String,
    pub pos: Pos,
    #[serde(default)]
    pub kind: ActorKind,
    #[serde(default)]
    pub hostile_by_default: bool,
    #[serde(default = "yes")]
    pub mobile: bool,
    #[serde(default = "yes")]
    pub combat: bool,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub skills: BTreeSet<Skill>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub physiology: Physiology,
    #[serde(default)]
    pub has_quills: bool,
    /// Overrides the default search radius range as `[min, max]`.
    #[serde(default)]
    pub kill_radius: Option<(u32, u32)>,
    #[serde(default)]
    pub allies: Vec<String>,
    #[serde(default)]
    pub enemies: Vec<String>,
}

/// An item built from a content template, placed on the ground or handed to a named actor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemSpec {
    pub template: String,
    #[serde(default)]
    pub at: Option<Pos>,
    #[serde(default)]
    pub carried_by: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisruptionSpec {
    pub tick: u64,
    pub actor: String,
    #[serde(flatten)]
    pub disruption: Disruption,
}

fn yes() -> bool {
    true
}

fn first_level() -> u32 {
    1
}

/// A built scenario together with the name of every actor it spawned.
pub struct Loaded {
    pub skirmish: Skirmish,
    pub names: BTreeMap<String, EntityId>,
}

impl Loaded {
    pub fn actor(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }
}

impl Scenario {
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&content)
    }

    pub fn build(&self) -> Result<Loaded, LoadError> {
        let content = ContentPack::build_default();
        let mut map = Map::new(self.width, self.height);
        for &cell in &self.walls {
            self.check_bounds(&map, cell)?;
            map.set_tile(cell, TileKind::Wall);
        }
        for &cell in &self.doors {
            self.check_bounds(&map, cell)?;
            map.set_tile(cell, TileKind::ClosedDoor);
        }
        let mut world = World::new(self.seed, map);

        let mut names = BTreeMap::new();
        for spec in &self.actors {
            self.check_bounds(&world.map, spec.pos)?;
            if names.contains_key(&spec.name) {
                return Err(LoadError::DuplicateActor(spec.name.clone()));
            }
            let id = world.spawn_actor(spec.to_actor());
            names.insert(spec.name.clone(), id);
        }
        let lookup = |name: &String| {
            names.get(name).copied().ok_or_else(|| LoadError::UnknownActor(name.clone()))
        };

        for spec in &self.actors {
            let id = lookup(&spec.name)?;
            for (others, relationship) in
                [(&spec.allies, Relationship::Allied), (&spec.enemies, Relationship::Hostile)]
            {
                for other in others {
                    let other = lookup(other)?;
                    world.actors[id].relationships.insert(other, relationship);
                    world.actors[other].relationships.insert(id, relationship);
                }
            }
        }

        for spec in &self.items {
            let item = content
                .item(&spec.template)
                .ok_or_else(|| LoadError::UnknownTemplate(spec.template.clone()))?;
            let item = world.spawn_item(item);
            if let Some(owner) = &spec.carried_by {
                world.give_item(lookup(owner)?, item);
            } else if let Some(cell) = spec.at {
                self.check_bounds(&world.map, cell)?;
                world.place_item(item, cell);
            }
        }
        let owners: Vec<EntityId> = names.values().copied().collect();
        for owner in owners {
            world.reequip(owner);
        }

        let mut skirmish = Skirmish::new(world);
        for spec in &self.disruptions {
            skirmish.schedule(spec.tick, lookup(&spec.actor)?, spec.disruption);
        }
        info!(actors = names.len(), items = self.items.len(), seed = self.seed, "scenario built");
        Ok(Loaded { skirmish, names })
    }

    fn check_bounds(&self, map: &Map, cell: Pos) -> Result<(), LoadError> {
        if map.in_bounds(cell) { Ok(()) } else { Err(LoadError::OutOfBounds(cell)) }
    }
}

impl ActorSpec {
    fn to_actor(&self) -> Actor {
        let mut actor = Actor::new(self.name.clone(), self.faction.clone(), self.pos);
        actor.kind = self.kind;
        actor.hostile_by_default = self.hostile_by_default;
        actor.mobile = self.mobile;
        actor.combat = self.combat;
        actor.level = self.level;
        actor.stats = self.stats;
        actor.skills = self.skills.clone();
        actor.role = self.role;
        actor.physiology = self.physiology;
        actor.has_quills = self.has_quills;
        if let Some((min, max)) = self.kill_radius {
            actor.min_kill_radius = min;
            actor.max_kill_radius = max;
        }
        actor
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const ARMORY: &str = r#"{
        "seed": 7,
        "width": 12,
        "height": 8,
        "walls": [{ "y": 3, "x": 6 }],
        "doors": [{ "y": 4, "x": 6 }],
        "actors": [
            { "name": "guard", "faction": "guards", "pos": { "y": 2, "x": 2 },
              "stats": { "intelligence": 14 }, "skills": ["LongBlade"], "kill_radius": [4, 6],
              "enemies": ["raider"] },
            { "name": "raider", "faction": "raiders", "pos": { "y": 5, "x": 9 },
              "hostile_by_default": true }
        ],
        "items": [
            { "template": "iron_long_sword", "carried_by": "guard" },
            { "template": "steel_axe", "at": { "y": 6, "x": 2 } }
        ],
        "disruptions": [
            { "tick": 3, "actor": "guard", "kind": "disarm", "slot": "MeleeWeapon" }
        ]
    }"#;

    #[test]
    fn builds_terrain_actors_and_equipment() {
        let loaded = Scenario::from_json_str(ARMORY).unwrap().build().unwrap();
        let world = &loaded.skirmish.world;
        assert_eq!(world.seed(), 7);
        assert_eq!(world.map.tile_at(Pos { y: 3, x: 6 }), TileKind::Wall);
        assert_eq!(world.map.tile_at(Pos { y: 4, x: 6 }), TileKind::ClosedDoor);

        let guard = loaded.actor("guard").unwrap();
        let raider = loaded.actor("raider").unwrap();
        assert_eq!(world.relationship(guard, raider), Relationship::Hostile);
        assert_eq!(world.stat(guard, Stat::Intelligence), 14);
        assert_eq!(world.stat(guard, Stat::Strength), 16);
        assert_eq!(world.actors[guard].min_kill_radius, 4);
        assert!(world.actors[guard].equipped.contains_key(&EquipSlot::MeleeWeapon));
        assert_eq!(world.items_on_ground_in(&[Pos { y: 6, x: 2 }]).len(), 1);

        let schedule = loaded.skirmish.pending_disruptions();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].disruption, Disruption::Disarm { slot: EquipSlot::MeleeWeapon });
    }

    #[test]
    fn rejects_dangling_references() {
        let mut scenario = Scenario::from_json_str(ARMORY).unwrap();
        scenario.items[0].carried_by = Some("ghost".into());
        assert!(matches!(scenario.build(), Err(LoadError::UnknownActor(name)) if name == "ghost"));

        let mut scenario = Scenario::from_json_str(ARMORY).unwrap();
        scenario.items[1].template = "vorpal_spoon".into();
        assert!(matches!(scenario.build(), Err(LoadError::UnknownTemplate(_))));

        let mut scenario = Scenario::from_json_str(ARMORY).unwrap();
        scenario.actors[1].name = "guard".into();
        assert!(matches!(scenario.build(), Err(LoadError::DuplicateActor(_))));

        let mut scenario = Scenario::from_json_str(ARMORY).unwrap();
        scenario.walls.push(Pos { y: 30, x: 1 });
        assert!(matches!(scenario.build(), Err(LoadError::OutOfBounds(_))));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ARMORY.as_bytes()).unwrap();
        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.actors.len(), 2);

        let missing = Scenario::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(LoadError::Io { .. })));
        assert!(matches!(Scenario::from_json_str("{"), Err(LoadError::Json(_))));
    }
}
