//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own goal-stack state; the skirmish driver mixes that in.

use std::hash::Hasher;

use slotmap::Key;
use xxhash_rust::xxh3::Xxh3;

use super::*;

impl World {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        self.write_snapshot(&mut hasher);
        hasher.finish()
    }

    pub(crate) fn write_snapshot(&self, hasher: &mut Xxh3) {
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        for (id, actor) in &self.actors {
            hasher.write_u64(id.data().as_ffi());
            hasher.write_i32(actor.pos.y);
            hasher.write_i32(actor.pos.x);
            hasher.write_u8(u8::from(actor.recovery_pending));
            hasher.write_usize(actor.inventory.len());
            for item in &actor.inventory {
                hasher.write_u64(item.data().as_ffi());
            }
            for (slot, item) in &actor.equipped {
                hasher.write_u8(*slot as u8);
                hasher.write_u64(item.data().as_ffi());
            }
        }
        for (id, item) in &self.items {
            hasher.write_u64(id.data().as_ffi());
            match item.location {
                ItemLocation::InInventoryOf(owner) => {
                    hasher.write_u8(0);
                    hasher.write_u64(owner.data().as_ffi());
                }
                ItemLocation::OnGround(pos) => {
                    hasher.write_u8(1);
                    hasher.write_i32(pos.y);
                    hasher.write_i32(pos.x);
                }
                ItemLocation::Invalid => hasher.write_u8(2),
            }
        }
    }
}
