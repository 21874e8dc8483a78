use crate::hazard::{GasKind, Grenade, Projectile};
use crate::state::{Armor, Item, MeleeWeapon, MissileWeapon, Shield};
use crate::types::{Dice, Skill, Stat};

pub mod keys {
    pub const FISTS: &str = "fists";
    pub const BRONZE_DAGGER: &str = "bronze_dagger";
    pub const IRON_LONG_SWORD: &str = "iron_long_sword";
    pub const STEEL_AXE: &str = "steel_axe";
    pub const IRON_MACE: &str = "iron_mace";

    pub const SHORT_BOW: &str = "short_bow";
    pub const HUNTING_RIFLE: &str = "hunting_rifle";
    pub const LASER_PISTOL: &str = "laser_pistol";
    pub const GRENADE_LAUNCHER: &str = "grenade_launcher";
    pub const MISSILE_LAUNCHER: &str = "missile_launcher";

    pub const LEATHER_ARMOR: &str = "leather_armor";
    pub const CHAIN_MAIL: &str = "chain_mail";
    pub const BUCKLER: &str = "buckler";
    pub const TOWER_SHIELD: &str = "tower_shield";

    pub const HE_GRENADE: &str = "he_grenade";
    pub const POISON_GAS_GRENADE: &str = "poison_gas_grenade";
    pub const SLEEP_GAS_GRENADE: &str = "sleep_gas_grenade";
    pub const NAPALM_GRENADE: &str = "napalm_grenade";
    pub const FLASHBANG: &str = "flashbang";
    pub const EMP_GRENADE: &str = "emp_grenade";
    pub const TURRET_DEPLOYER: &str = "turret_deployer";
    pub const LOYAL_TURRET_DEPLOYER: &str = "loyal_turret_deployer";
    pub const PHASE_GRENADE: &str = "phase_grenade";
    pub const TIME_DILATION_GRENADE: &str = "time_dilation_grenade";
}

pub struct ItemTemplate {
    pub id: &'static str,
    pub item: Item,
}

/// Stock equipment used by scenarios, fuzzing and tests.
pub struct ContentPack {
    pub items: Vec<ItemTemplate>,
}

impl ContentPack {
    pub fn build_default() -> Self {
        let items = vec![
            template(keys::FISTS, "fists", |item| {
                item.takeable = false;
                item.natural = true;
                item.melee = Some(melee(Dice::new(1, 2, 0), 0, None));
            }),
            template(keys::BRONZE_DAGGER, "bronze dagger", |item| {
                item.melee = Some(melee(Dice::new(1, 4, 0), 1, Some(Skill::ShortBlade)));
            }),
            template(keys::IRON_LONG_SWORD, "iron long sword", |item| {
                item.melee = Some(melee(Dice::new(1, 8, 0), 2, Some(Skill::LongBlade)));
            }),
            template(keys::STEEL_AXE, "steel battle axe", |item| {
                item.melee = Some(melee(Dice::new(1, 10, 0), 1, Some(Skill::Axe)));
            }),
            template(keys::IRON_MACE, "iron mace", |item| {
                item.melee = Some(melee(Dice::new(2, 3, 0), 2, Some(Skill::Cudgel)));
            }),
            template(keys::SHORT_BOW, "short bow", |item| {
                item.missile =
                    Some(missile(Dice::new(1, 4, 0), 3, Skill::Bow, Projectile::default()));
            }),
            template(keys::HUNTING_RIFLE, "hunting rifle", |item| {
                item.missile =
                    Some(missile(Dice::new(1, 8, 0), 5, Skill::Rifle, Projectile::default()));
            }),
            template(keys::LASER_PISTOL, "laser pistol", |item| {
                item.missile =
                    Some(missile(Dice::new(1, 6, 0), 2, Skill::Pistol, Projectile::default()));
            }),
            template(keys::GRENADE_LAUNCHER, "grenade launcher", |item| {
                let shell = Projectile {
                    payload: Some(Grenade::HighExplosive { force: 2000 }),
                    explode_force: None,
                };
                item.missile = Some(missile(Dice::new(1, 6, 0), 8, Skill::HeavyWeapons, shell));
            }),
            template(keys::MISSILE_LAUNCHER, "missile launcher", |item| {
                let rocket = Projectile { payload: None, explode_force: Some(7000) };
                item.missile = Some(missile(Dice::new(2, 6, 0), 10, Skill::HeavyWeapons, rocket));
            }),
            template(keys::LEATHER_ARMOR, "leather armor", |item| {
                item.armor = Some(Armor { av: 2, dv: 0 });
            }),
            template(keys::CHAIN_MAIL, "chain mail", |item| {
                item.armor = Some(Armor { av: 4, dv: -1 });
            }),
            template(keys::BUCKLER, "buckler", |item| {
                item.shield = Some(Shield { av: 1, dv: 1 });
            }),
            template(keys::TOWER_SHIELD, "tower shield", |item| {
                item.shield = Some(Shield { av: 4, dv: -2 });
            }),
            grenade(keys::HE_GRENADE, "high-explosive grenade", Grenade::HighExplosive {
                force: 2000,
            }),
            grenade(keys::POISON_GAS_GRENADE, "poison gas grenade", Grenade::Gas {
                gas: GasKind::Poison,
            }),
            grenade(keys::SLEEP_GAS_GRENADE, "sleep gas grenade", Grenade::Gas {
                gas: GasKind::Sleep,
            }),
            grenade(keys::NAPALM_GRENADE, "napalm grenade", Grenade::Thermal),
            grenade(keys::FLASHBANG, "flashbang", Grenade::Flashbang { radius: 2 }),
            grenade(keys::EMP_GRENADE, "EMP grenade", Grenade::Emp { radius: 3 }),
            grenade(keys::TURRET_DEPLOYER, "turret deployer", Grenade::Deployment {
                radius: 1,
                loyal_to_thrower: false,
            }),
            grenade(keys::LOYAL_TURRET_DEPLOYER, "keyed turret deployer", Grenade::Deployment {
                radius: 1,
                loyal_to_thrower: true,
            }),
            grenade(keys::PHASE_GRENADE, "phase grenade", Grenade::Phase {
                radius: Dice::new(1, 3, 0),
            }),
            grenade(keys::TIME_DILATION_GRENADE, "time dilation grenade", Grenade::TimeDilation),
        ];
        Self { items }
    }

    /// A fresh copy of the template, not yet placed in any world.
    pub fn item(&self, id: &str) -> Option<Item> {
        self.items.iter().find(|template| template.id == id).map(|template| template.item.clone())
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}

fn template(id: &'static str, name: &str, configure: impl FnOnce(&mut Item)) -> ItemTemplate {
    let mut item = Item::new(name);
    configure(&mut item);
    ItemTemplate { id, item }
}

fn grenade(id: &'static str, name: &str, kind: Grenade) -> ItemTemplate {
    template(id, name, |item| item.grenade = Some(kind))
}

fn melee(damage: Dice, penetration: i32, skill: Option<Skill>) -> MeleeWeapon {
    MeleeWeapon { damage, penetration, stat: Stat::Strength, skill }
}

fn missile(damage: Dice, accuracy: i32, skill: Skill, projectile: Projectile) -> MissileWeapon {
    MissileWeapon {
        damage,
        shots: 1,
        modifier: Stat::Agility,
        accuracy,
        aim_variance_bonus: 0,
        skill: Some(skill),
        projectile,
    }
}
