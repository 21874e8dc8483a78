pub mod bystander;
pub mod cone;
pub mod content;
pub mod error;
pub mod goals;
pub mod hazard;
pub mod options;
pub mod planner;
pub mod recovery;
pub mod safety;
pub mod scenario;
pub mod scoring;
pub mod skirmish;
pub mod state;
pub mod tactics;
pub mod types;
pub mod world;

pub use bystander::classify;
pub use cone::{cone_safety_check, firing_cone};
pub use content::ContentPack;
pub use error::LoadError;
pub use goals::{EquipObject, ReequipOrFindNew, Retreat, SearchForWeapon, TakeItem};
pub use hazard::{Grenade, Hazard, Projectile};
pub use options::Options;
pub use planner::{Goal, GoalContext, Planner, PollOutcome, Step};
pub use recovery::on_equipment_lost;
pub use safety::{area_safety_check, missile_safety_check};
pub use scenario::Scenario;
pub use skirmish::Skirmish;
pub use state::{Actor, Item, Map};
pub use types::*;
pub use world::World;
