use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use slotmap::SlotMap;

use crate::state::{Actor, Item, Map};
use crate::types::*;

mod equipment;
mod hash;
mod pathfinding;
mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

pub use pathfinding::{chebyshev, neighbors};

/// The simulation the decision layer runs against: terrain, actors, items and the shared dice.
pub struct World {
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    pub map: Map,
    pub actors: SlotMap<EntityId, Actor>,
    pub items: SlotMap<ItemId, Item>,
    log: Vec<LogEvent>,
}

impl World {
    pub fn new(seed: u64, map: Map) -> Self {
        Self {
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            map,
            actors: SlotMap::with_key(),
            items: SlotMap::with_key(),
            log: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn record(&mut self, event: LogEvent) {
        self.log.push(event);
    }

    pub fn think(&mut self, agent: EntityId, thought: Thought) {
        tracing::trace!(?agent, ?thought, "thought");
        self.log.push(LogEvent::Thought { agent, thought });
    }

    pub fn spawn_actor(&mut self, actor: Actor) -> EntityId {
        let id = self.actors.insert(actor);
        self.actors[id].id = id;
        id
    }

    /// Removes an agent and drops everything it carried where it stood.
    pub fn remove_actor(&mut self, agent: EntityId) -> Option<Actor> {
        let actor = self.actors.remove(agent)?;
        for &item in &actor.inventory {
            if let Some(entry) = self.items.get_mut(item) {
                entry.location = ItemLocation::OnGround(actor.pos);
            }
        }
        Some(actor)
    }

    pub fn spawn_item(&mut self, item: Item) -> ItemId {
        let id = self.items.insert(item);
        self.items[id].id = id;
        self.items[id].location = ItemLocation::Invalid;
        id
    }

    pub fn place_item(&mut self, item: ItemId, pos: Pos) {
        self.detach_item(item);
        if let Some(entry) = self.items.get_mut(item) {
            entry.location = ItemLocation::OnGround(pos);
        }
    }

    pub fn give_item(&mut self, agent: EntityId, item: ItemId) {
        if !self.actors.contains_key(agent) || !self.items.contains_key(item) {
            return;
        }
        self.detach_item(item);
        self.items[item].location = ItemLocation::InInventoryOf(agent);
        self.actors[agent].inventory.push(item);
    }

    /// Destroys an item outright. Goals still holding its id see it as gone.
    pub fn destroy_item(&mut self, item: ItemId) {
        self.detach_item(item);
        self.items.remove(item);
    }

    fn detach_item(&mut self, item: ItemId) {
        let Some(ItemLocation::InInventoryOf(owner)) = self.items.get(item).map(|i| i.location)
        else {
            return;
        };
        if let Some(actor) = self.actors.get_mut(owner) {
            actor.inventory.retain(|&carried| carried != item);
            actor.equipped.retain(|_, equipped| *equipped != item);
        }
    }

    pub fn actor(&self, agent: EntityId) -> Option<&Actor> {
        self.actors.get(agent)
    }

    pub fn item(&self, item: ItemId) -> Option<&Item> {
        self.items.get(item)
    }

    pub fn position(&self, agent: EntityId) -> Option<Pos> {
        self.actors.get(agent).map(|actor| actor.pos)
    }

    /// How `a` regards `b`. An explicit entry in `a`'s table wins over faction defaults.
    pub fn relationship(&self, a: EntityId, b: EntityId) -> Relationship {
        if a == b {
            return Relationship::Allied;
        }
        let (Some(observer), Some(subject)) = (self.actors.get(a), self.actors.get(b)) else {
            return Relationship::Neutral;
        };
        if let Some(&explicit) = observer.relationships.get(&b) {
            return explicit;
        }
        if observer.faction == subject.faction {
            Relationship::Allied
        } else if observer.hostile_by_default || subject.hostile_by_default {
            Relationship::Hostile
        } else {
            Relationship::Neutral
        }
    }

    pub fn is_hostile_by_default(&self, agent: EntityId) -> bool {
        self.actors.get(agent).is_some_and(|actor| actor.hostile_by_default)
    }

    pub fn stat(&self, agent: EntityId, stat: Stat) -> i32 {
        self.actors.get(agent).map_or(0, |actor| actor.stat(stat))
    }

    pub fn has_skill(&self, agent: EntityId, skill: Skill) -> bool {
        self.actors.get(agent).is_some_and(|actor| actor.has_skill(skill))
    }

    pub fn item_exists(&self, item: ItemId) -> bool {
        self.items.contains_key(item)
    }

    pub fn item_location(&self, item: ItemId) -> ItemLocation {
        self.items.get(item).map_or(ItemLocation::Invalid, |entry| entry.location)
    }

    pub fn item_has_category(&self, item: ItemId, category: ItemCategory) -> bool {
        self.items.get(item).is_some_and(|entry| entry.has_category(category))
    }

    pub fn agent_has_category(&self, agent: EntityId, category: ItemCategory) -> bool {
        self.actors.get(agent).is_some_and(|actor| {
            actor.inventory.iter().any(|&item| self.item_has_category(item, category))
        })
    }

    pub fn holds(&self, agent: EntityId, item: ItemId) -> bool {
        self.item_location(item) == ItemLocation::InInventoryOf(agent)
    }

    pub fn adjacent_or_same(&self, a: Pos, b: Pos) -> bool {
        chebyshev(a, b) <= 1
    }

    /// Steps along the shortest passable route, ignoring agents in the way.
    pub fn path_distance(&self, from: Pos, to: Pos) -> Option<u32> {
        pathfinding::astar_path(&self.map, from, to, &[])
            .map(|path| u32::try_from(path.len()).unwrap_or(u32::MAX))
    }

    pub fn flood_visible(&self, origin: Pos, radius: u32) -> Vec<Pos> {
        visibility::flood_visible(&self.map, origin, radius)
    }

    pub fn line(&self, from: Pos, to: Pos) -> Vec<Pos> {
        visibility::line(from, to)
    }

    pub fn has_line_of_sight(&self, from: Pos, to: Pos) -> bool {
        visibility::has_direct_line_of_sight(&self.map, from, to)
    }

    pub fn actor_at(&self, pos: Pos) -> Option<EntityId> {
        self.actors.iter().find(|(_, actor)| actor.pos == pos).map(|(id, _)| id)
    }

    /// Combat-capable agents standing in `cells`, in cell order.
    pub fn combat_actors_in(&self, cells: &[Pos]) -> Vec<EntityId> {
        cells
            .iter()
            .flat_map(|&cell| {
                self.actors
                    .iter()
                    .filter(move |(_, actor)| actor.combat && actor.pos == cell)
                    .map(|(id, _)| id)
            })
            .collect()
    }

    /// Items lying on `cells`, in cell order.
    pub fn items_on_ground_in(&self, cells: &[Pos]) -> Vec<ItemId> {
        cells
            .iter()
            .flat_map(|&cell| {
                self.items
                    .iter()
                    .filter(move |(_, item)| item.location == ItemLocation::OnGround(cell))
                    .map(|(id, _)| id)
            })
            .collect()
    }

    fn occupied_cells(&self, except: EntityId) -> Vec<Pos> {
        self.actors.iter().filter(|(id, _)| *id != except).map(|(_, actor)| actor.pos).collect()
    }

    /// The first cell of a route to `target` that avoids other agents, if any.
    fn next_step(&self, agent: EntityId, target: Pos) -> Option<Pos> {
        let actor = self.actors.get(agent)?;
        let occupied = self.occupied_cells(agent);
        let path = pathfinding::astar_path(&self.map, actor.pos, target, &occupied)?;
        path.first().copied()
    }

    /// One step toward `target`. False when immobile, already there, or boxed in.
    pub fn move_towards(&mut self, agent: EntityId, target: Pos) -> bool {
        if !self.actors.get(agent).is_some_and(|actor| actor.mobile) {
            return false;
        }
        let Some(step) = self.next_step(agent, target) else {
            return false;
        };
        if self.actor_at(step).is_some() {
            return false;
        }
        self.actors[agent].pos = step;
        true
    }

    /// The agent standing on the next cell of the direct route to `target`, when one blocks it.
    pub fn blocker_towards(&self, agent: EntityId, target: Pos) -> Option<EntityId> {
        let actor = self.actors.get(agent)?;
        let path = pathfinding::astar_path(&self.map, actor.pos, target, &[])?;
        let step = *path.first()?;
        self.actor_at(step).filter(|&blocker| blocker != agent)
    }

    /// Steps to the free neighbour that increases distance from `threat` the most.
    pub fn step_away_from(&mut self, agent: EntityId, threat: Pos) -> bool {
        let Some(actor) = self.actors.get(agent) else {
            return false;
        };
        if !actor.mobile {
            return false;
        }
        let here = chebyshev(actor.pos, threat);
        let mut best: Option<(u32, Pos)> = None;
        for cell in neighbors(actor.pos) {
            if !self.map.is_walkable(cell) || self.actor_at(cell).is_some() {
                continue;
            }
            let distance = chebyshev(cell, threat);
            if distance > here && best.is_none_or(|(d, _)| distance > d) {
                best = Some((distance, cell));
            }
        }
        let Some((_, cell)) = best else {
            return false;
        };
        self.actors[agent].pos = cell;
        true
    }

    /// Atomic pickup. Fails if the item is gone or somebody else already has it.
    pub fn take_item(&mut self, agent: EntityId, item: ItemId) -> bool {
        match self.item_location(item) {
            ItemLocation::OnGround(_) => {
                self.give_item(agent, item);
                self.record(LogEvent::ItemTaken { agent, item });
                true
            }
            ItemLocation::InInventoryOf(owner) => owner == agent,
            ItemLocation::Invalid => false,
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Uniform integer in `min..=max`.
    pub fn roll_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (self.rng.next_u64() % span) as u32
    }

    /// d20 plus the stat modifier against `difficulty`.
    pub fn make_save(&mut self, agent: EntityId, stat: Stat, difficulty: i32) -> bool {
        let modifier = self.actors.get(agent).map_or(0, |actor| actor.stats.modifier(stat));
        let roll = self.roll_range(1, 20) as i32;
        roll + modifier >= difficulty
    }
}

#[cfg(test)]
mod tests;
