//! Danger radius resolution for thrown and fired hazards.
//! This module exists to map every hazard category to how far it reaches and whom it can hurt.
//! It does not own the scan for bystanders inside that reach; see `safety`.

use serde::{Deserialize, Serialize};

use crate::state::Actor;
use crate::types::Dice;

/// Something that can hurt agents around an impact cell.
pub trait Hazard {
    /// Cells within this Chebyshev distance of the impact are affected. Zero means harmless.
    fn danger_radius(&self) -> u32;
    fn can_endanger(&self, target: &Actor) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasKind {
    Poison,
    Stun,
    Sleep,
    Corrosive,
    Emp,
    Other,
}

impl GasKind {
    pub fn affects(self, target: &Actor) -> bool {
        if target.physiology.gas_immune {
            return false;
        }
        match self {
            GasKind::Poison | GasKind::Stun | GasKind::Sleep => target.physiology.breathes,
            GasKind::Emp => target.physiology.emp_sensitive,
            GasKind::Corrosive | GasKind::Other => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Grenade {
    Gas { gas: GasKind },
    Thermal,
    Flashbang { radius: u32 },
    Emp { radius: u32 },
    Deployment { radius: u32, loyal_to_thrower: bool },
    Sunder { radius: u32 },
    Gravity { radius: u32 },
    Phase { radius: Dice },
    TimeDilation,
    HighExplosive { force: u32 },
    Unknown,
}

impl Hazard for Grenade {
    fn danger_radius(&self) -> u32 {
        match *self {
            Grenade::Gas { .. } | Grenade::Thermal => 1,
            Grenade::Flashbang { radius }
            | Grenade::Emp { radius }
            | Grenade::Sunder { radius }
            | Grenade::Gravity { radius } => radius,
            Grenade::Deployment { radius, loyal_to_thrower } => {
                if loyal_to_thrower {
                    0
                } else {
                    radius
                }
            }
            Grenade::Phase { radius } => u32::try_from(radius.max()).unwrap_or(0),
            // Slows time in the area but hurts nobody.
            Grenade::TimeDilation => 0,
            Grenade::HighExplosive { force } => explosion_radius(force),
            Grenade::Unknown => 0,
        }
    }

    fn can_endanger(&self, target: &Actor) -> bool {
        match *self {
            Grenade::Gas { gas } => gas.affects(target),
            Grenade::Emp { .. } => target.physiology.emp_sensitive,
            Grenade::Deployment { loyal_to_thrower, .. } => !loyal_to_thrower,
            Grenade::TimeDilation => false,
            Grenade::Thermal
            | Grenade::Flashbang { .. }
            | Grenade::Sunder { .. }
            | Grenade::Gravity { .. }
            | Grenade::Phase { .. }
            | Grenade::HighExplosive { .. }
            | Grenade::Unknown => true,
        }
    }
}

/// What a missile weapon fires, as far as splash damage is concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Projectile {
    /// A grenade carried as the warhead, like a launcher round.
    pub payload: Option<Grenade>,
    /// Force of the blast when the projectile explodes on impact.
    pub explode_force: Option<u32>,
}

impl Projectile {
    pub fn is_explosive(&self) -> bool {
        self.payload.is_some() || self.explode_force.is_some()
    }
}

impl Hazard for Projectile {
    fn danger_radius(&self) -> u32 {
        let payload = self.payload.map_or(0, |grenade| grenade.danger_radius());
        let blast = self.explode_force.map_or(0, explosion_radius);
        payload.max(blast)
    }

    fn can_endanger(&self, target: &Actor) -> bool {
        self.payload.is_some_and(|grenade| grenade.can_endanger(target))
            || self.explode_force.is_some()
    }
}

/// Blast radius of a force-scaled explosion: `floor(sqrt(force / 100))` with integer division.
pub fn explosion_radius(force: u32) -> u32 {
    (f64::from(force / 100)).sqrt() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;

    fn bystander() -> Actor {
        Actor::new("bystander", "villagers", Pos { y: 1, x: 1 })
    }

    #[test]
    fn force_scaled_explosions_use_floor_of_square_root() {
        assert_eq!(explosion_radius(2000), 4);
        assert_eq!(explosion_radius(7000), 8);
        assert_eq!(explosion_radius(15000), 12);
        assert_eq!(explosion_radius(99), 0);
        assert_eq!(explosion_radius(399), 1);
    }

    #[test]
    fn radius_table_covers_every_category() {
        let cases = [
            (Grenade::Gas { gas: GasKind::Poison }, 1),
            (Grenade::Thermal, 1),
            (Grenade::Flashbang { radius: 3 }, 3),
            (Grenade::Emp { radius: 2 }, 2),
            (Grenade::Deployment { radius: 2, loyal_to_thrower: false }, 2),
            (Grenade::Deployment { radius: 2, loyal_to_thrower: true }, 0),
            (Grenade::Sunder { radius: 1 }, 1),
            (Grenade::Gravity { radius: 4 }, 4),
            (Grenade::Phase { radius: Dice::new(1, 4, 1) }, 5),
            (Grenade::TimeDilation, 0),
            (Grenade::HighExplosive { force: 7000 }, 8),
            (Grenade::Unknown, 0),
        ];
        for (grenade, expected) in cases {
            assert_eq!(grenade.danger_radius(), expected, "{grenade:?}");
        }
    }

    #[test]
    fn gas_affectedness_depends_on_physiology() {
        let mut target = bystander();
        assert!(GasKind::Poison.affects(&target));
        assert!(!GasKind::Emp.affects(&target));

        target.physiology.breathes = false;
        assert!(!GasKind::Sleep.affects(&target));
        assert!(GasKind::Corrosive.affects(&target));

        target.physiology.emp_sensitive = true;
        assert!(GasKind::Emp.affects(&target));

        target.physiology.gas_immune = true;
        assert!(!GasKind::Corrosive.affects(&target));
        assert!(!Grenade::Gas { gas: GasKind::Other }.can_endanger(&target));
    }

    #[test]
    fn loyal_deployables_never_endanger() {
        let target = bystander();
        assert!(Grenade::Deployment { radius: 2, loyal_to_thrower: false }.can_endanger(&target));
        assert!(!Grenade::Deployment { radius: 2, loyal_to_thrower: true }.can_endanger(&target));
    }

    #[test]
    fn projectile_takes_the_larger_of_payload_and_blast() {
        let target = bystander();
        let shell = Projectile {
            payload: Some(Grenade::Flashbang { radius: 2 }),
            explode_force: Some(2000),
        };
        assert_eq!(shell.danger_radius(), 4);
        assert!(shell.can_endanger(&target));

        let inert = Projectile::default();
        assert_eq!(inert.danger_radius(), 0);
        assert!(!inert.can_endanger(&target));
        assert!(!inert.is_explosive());

        let dilation = Projectile { payload: Some(Grenade::TimeDilation), explode_force: None };
        assert!(dilation.is_explosive());
        assert!(!dilation.can_endanger(&target));
    }
}
