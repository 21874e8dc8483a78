//! Concrete goal behaviors for equipment recovery and disengagement.
//! This module exists to collect the goals the decision layer itself pushes.
//! It does not own stack mechanics; see `planner`.

use crate::planner::{Goal, GoalContext, Step};
use crate::types::*;
use crate::world::World;

mod equip_object;
mod reequip;
mod retreat;
mod search;
mod take_item;

pub use equip_object::{EQUIP_RETRY_BUDGET, EquipObject, MIN_EQUIP_INTELLIGENCE};
pub use reequip::ReequipOrFindNew;
pub use retreat::Retreat;
pub use search::{SearchForWeapon, rank_candidates};
pub use take_item::TakeItem;
