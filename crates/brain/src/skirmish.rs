//! Deterministic turn driver pairing a `World` with its `Planner`.
//! This module exists so tools and tests run the decision layer the way a host would.
//! It does not own combat; agents only pursue the goals they were given.

use std::hash::Hasher;

use tracing::{debug, info};
use xxhash_rust::xxh3::Xxh3;

use crate::options::Options;
use crate::planner::{Goal, Planner};
use crate::recovery::on_equipment_lost;
use crate::types::*;
use crate::world::World;

const PULSED_SLOTS: [EquipSlot; 2] = [EquipSlot::MissileWeapon, EquipSlot::MeleeWeapon];

/// A disruption the driver applies once the world reaches `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledDisruption {
    pub tick: u64,
    pub agent: EntityId,
    pub disruption: Disruption,
}

pub struct Skirmish {
    pub world: World,
    pub planner: Planner,
    schedule: Vec<ScheduledDisruption>,
}

impl Skirmish {
    pub fn new(world: World) -> Self {
        Self { world, planner: Planner::new(), schedule: Vec::new() }
    }

    pub fn push_goal(&mut self, agent: EntityId, goal: impl Goal + 'static) -> bool {
        self.planner.push_goal(agent, Box::new(goal), &mut self.world)
    }

    pub fn schedule(&mut self, tick: u64, agent: EntityId, disruption: Disruption) {
        self.schedule.push(ScheduledDisruption { tick, agent, disruption });
        self.schedule.sort_by_key(|entry| entry.tick);
    }

    pub fn pending_disruptions(&self) -> &[ScheduledDisruption] {
        &self.schedule
    }

    /// Knocks equipment loose and reports every lost item to the recovery trigger.
    pub fn disrupt(
        &mut self,
        options: &Options,
        agent: EntityId,
        disruption: Disruption,
    ) -> Vec<ItemId> {
        let lost: Vec<ItemId> = match disruption {
            Disruption::Disarm { slot } => self.world.disarm(agent, slot).into_iter().collect(),
            Disruption::MagneticPulse => PULSED_SLOTS
                .into_iter()
                .flat_map(|slot| self.world.strip_slot(agent, slot))
                .collect(),
        };
        for &item in &lost {
            on_equipment_lost(
                &mut self.planner,
                &mut self.world,
                options,
                agent,
                item,
                disruption.cause(),
            );
        }
        lost
    }

    /// Nothing left to do: no goals, no pending re-equips, nothing scheduled.
    pub fn is_settled(&self) -> bool {
        self.schedule.is_empty()
            && self.planner.busy_agents().is_empty()
            && self.world.actors.values().all(|actor| !actor.recovery_pending)
    }

    /// Runs up to `max_ticks` ticks. Each tick applies due disruptions, then gives every agent one
    /// turn in key order: the re-equip pass if flagged, then one poll of its goal stack.
    pub fn advance(&mut self, options: &Options, max_ticks: u32) -> AdvanceResult {
        let mut ticks = 0;
        while ticks < max_ticks {
            self.apply_due(options);
            if self.is_settled() {
                debug!(tick = self.world.current_tick(), "skirmish settled");
                return AdvanceResult {
                    simulated_ticks: ticks,
                    stop_reason: AdvanceStopReason::AllIdle,
                };
            }

            let agents: Vec<EntityId> = self.world.actors.keys().collect();
            for agent in agents {
                if self.world.actor(agent).is_some_and(|actor| actor.recovery_pending) {
                    self.world.reequip(agent);
                }
                self.planner.poll(agent, &mut self.world, options);
            }
            self.world.advance_tick();
            ticks += 1;
        }
        info!(ticks, "skirmish stopped at its tick budget");
        AdvanceResult { simulated_ticks: ticks, stop_reason: AdvanceStopReason::BudgetExhausted }
    }

    /// World snapshot plus every agent's goal-stack depth.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        self.world.write_snapshot(&mut hasher);
        for agent in self.world.actors.keys() {
            hasher.write_usize(self.planner.depth(agent));
        }
        hasher.finish()
    }

    fn apply_due(&mut self, options: &Options) {
        let now = self.world.current_tick();
        let due = self.schedule.iter().take_while(|entry| entry.tick <= now).count();
        let batch: Vec<ScheduledDisruption> = self.schedule.drain(..due).collect();
        for entry in batch {
            debug!(agent = ?entry.agent, disruption = ?entry.disruption, "disruption applied");
            self.disrupt(options, entry.agent, entry.disruption);
        }
    }
}
