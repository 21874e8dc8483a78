use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::hazard::{Grenade, Projectile};
use crate::types::*;

pub const DEFAULT_MIN_KILL_RADIUS: u32 = 5;
pub const DEFAULT_MAX_KILL_RADIUS: u32 = 15;

/// Raw attribute scores. 16 is the baseline with a modifier of zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub strength: i32,
    pub agility: i32,
    pub toughness: i32,
    pub intelligence: i32,
    pub willpower: i32,
    pub ego: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self { strength: 16, agility: 16, toughness: 16, intelligence: 16, willpower: 16, ego: 16 }
    }
}

impl Stats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Agility => self.agility,
            Stat::Toughness => self.toughness,
            Stat::Intelligence => self.intelligence,
            Stat::Willpower => self.willpower,
            Stat::Ego => self.ego,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        match stat {
            Stat::Strength => self.strength = value,
            Stat::Agility => self.agility = value,
            Stat::Toughness => self.toughness = value,
            Stat::Intelligence => self.intelligence = value,
            Stat::Willpower => self.willpower = value,
            Stat::Ego => self.ego = value,
        }
    }

    pub fn modifier(&self, stat: Stat) -> i32 {
        stat_modifier(self.get(stat))
    }
}

pub fn stat_modifier(score: i32) -> i32 {
    (score - 16).div_euclid(2)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physiology {
    pub breathes: bool,
    pub gas_immune: bool,
    pub emp_sensitive: bool,
}

impl Default for Physiology {
    fn default() -> Self {
        Self { breathes: true, gas_immune: false, emp_sensitive: false }
    }
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub kind: ActorKind,
    pub name: String,
    pub pos: Pos,
    pub faction: String,
    pub hostile_by_default: bool,
    pub mobile: bool,
    /// Takes part in fights. Scenery and furniture do not.
    pub combat: bool,
    pub level: u32,
    pub stats: Stats,
    pub skills: BTreeSet<Skill>,
    pub role: Role,
    pub physiology: Physiology,
    pub accuracy_bonus: i32,
    pub incoming_aim_modifier: i32,
    pub marked_by: Option<EntityId>,
    pub has_quills: bool,
    pub relationships: BTreeMap<EntityId, Relationship>,
    /// Everything carried, equipped or not.
    pub inventory: Vec<ItemId>,
    pub equipped: BTreeMap<EquipSlot, ItemId>,
    /// Set when the host should run an equipment pass before this agent's next turn.
    pub recovery_pending: bool,
    pub min_kill_radius: u32,
    pub max_kill_radius: u32,
}

impl Actor {
    pub fn new(name: impl Into<String>, faction: impl Into<String>, pos: Pos) -> Self {
        Self {
            id: EntityId::default(),
            kind: ActorKind::Creature,
            name: name.into(),
            pos,
            faction: faction.into(),
            hostile_by_default: false,
            mobile: true,
            combat: true,
            level: 1,
            stats: Stats::default(),
            skills: BTreeSet::new(),
            role: Role::Minion,
            physiology: Physiology::default(),
            accuracy_bonus: 0,
            incoming_aim_modifier: 0,
            marked_by: None,
            has_quills: false,
            relationships: BTreeMap::new(),
            inventory: Vec::new(),
            equipped: BTreeMap::new(),
            recovery_pending: false,
            min_kill_radius: DEFAULT_MIN_KILL_RADIUS,
            max_kill_radius: DEFAULT_MAX_KILL_RADIUS,
        }
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats.get(stat)
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.contains(&skill)
    }

    pub fn holds(&self, item: ItemId) -> bool {
        self.inventory.contains(&item)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeleeWeapon {
    pub damage: Dice,
    #[serde(default)]
    pub penetration: i32,
    #[serde(default = "default_melee_stat")]
    pub stat: Stat,
    #[serde(default)]
    pub skill: Option<Skill>,
}

fn default_melee_stat() -> Stat {
    Stat::Strength
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissileWeapon {
    pub damage: Dice,
    #[serde(default = "default_shots")]
    pub shots: u32,
    /// Stat whose modifier steadies the aim.
    #[serde(default = "default_missile_stat")]
    pub modifier: Stat,
    /// Inherent inaccuracy. Higher is worse.
    #[serde(default)]
    pub accuracy: i32,
    #[serde(default)]
    pub aim_variance_bonus: i32,
    #[serde(default)]
    pub skill: Option<Skill>,
    #[serde(default)]
    pub projectile: Projectile,
}

fn default_shots() -> u32 {
    1
}

fn default_missile_stat() -> Stat {
    Stat::Agility
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub av: i32,
    #[serde(default)]
    pub dv: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shield {
    pub av: i32,
    #[serde(default)]
    pub dv: i32,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub location: ItemLocation,
    pub takeable: bool,
    /// Body parts like fists and claws. They never leave their owner.
    pub natural: bool,
    pub accuracy_bonus: i32,
    pub melee: Option<MeleeWeapon>,
    pub missile: Option<MissileWeapon>,
    pub armor: Option<Armor>,
    pub shield: Option<Shield>,
    pub grenade: Option<Grenade>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::default(),
            name: name.into(),
            location: ItemLocation::Invalid,
            takeable: true,
            natural: false,
            accuracy_bonus: 0,
            melee: None,
            missile: None,
            armor: None,
            shield: None,
            grenade: None,
        }
    }

    pub fn has_category(&self, category: ItemCategory) -> bool {
        match category {
            ItemCategory::MeleeWeapon => self.melee.is_some(),
            ItemCategory::MissileWeapon => self.missile.is_some(),
            ItemCategory::Armor => self.armor.is_some(),
            ItemCategory::Shield => self.shield.is_some(),
            ItemCategory::Grenade => self.grenade.is_some(),
            ItemCategory::ExplosiveProjectile => {
                self.missile.is_some_and(|missile| missile.projectile.is_explosive())
            }
        }
    }

    pub fn fits(&self, slot: EquipSlot) -> bool {
        self.has_category(slot.into())
    }
}

#[derive(Clone)]
pub struct Map {
    pub internal_width: usize,
    pub internal_height: usize,
    pub tiles: Vec<TileKind>,
}

impl Map {
    /// An open floor bordered by walls.
    pub fn new(width: usize, height: usize) -> Self {
        let mut tiles = vec![TileKind::Floor; width * height];
        for x in 0..width {
            tiles[x] = TileKind::Wall;
            tiles[(height - 1) * width + x] = TileKind::Wall;
        }
        for y in 0..height {
            tiles[y * width] = TileKind::Wall;
            tiles[y * width + (width - 1)] = TileKind::Wall;
        }
        Self { internal_width: width, internal_height: height, tiles }
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.internal_width
            && (pos.y as usize) < self.internal_height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Floor
    }

    pub fn is_opaque(&self, pos: Pos) -> bool {
        matches!(self.tile_at(pos), TileKind::Wall | TileKind::ClosedDoor)
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.internal_width + (pos.x as usize)
    }
}
