use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
    pub struct ItemId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    ClosedDoor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    #[default]
    Creature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Relationship {
    Allied,
    Neutral,
    Hostile,
}

/// How an observer regards another agent when deciding whether an attack may hurt it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Ally,
    Bystander,
    FairTarget,
}

impl Classification {
    pub fn is_protected(self) -> bool {
        matches!(self, Classification::Ally | Classification::Bystander)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    Strength,
    Agility,
    Toughness,
    Intelligence,
    Willpower,
    Ego,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Tactics,
    Rifle,
    Bow,
    Pistol,
    HeavyWeapons,
    Axe,
    ShortBlade,
    LongBlade,
    Cudgel,
    Shield,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Minion,
    Leader,
    Skirmisher,
    Artillery,
}

/// Equipment slot categories, declared in recovery priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    MissileWeapon,
    MeleeWeapon,
    Armor,
    Shield,
}

impl EquipSlot {
    pub const PRIORITY: [EquipSlot; 4] =
        [EquipSlot::MissileWeapon, EquipSlot::MeleeWeapon, EquipSlot::Armor, EquipSlot::Shield];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    MeleeWeapon,
    MissileWeapon,
    Armor,
    Shield,
    Grenade,
    ExplosiveProjectile,
}

impl From<EquipSlot> for ItemCategory {
    fn from(slot: EquipSlot) -> Self {
        match slot {
            EquipSlot::MissileWeapon => ItemCategory::MissileWeapon,
            EquipSlot::MeleeWeapon => ItemCategory::MeleeWeapon,
            EquipSlot::Armor => ItemCategory::Armor,
            EquipSlot::Shield => ItemCategory::Shield,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemLocation {
    InInventoryOf(EntityId),
    OnGround(Pos),
    Invalid,
}

/// `count`d`sides` + `bonus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
    #[serde(default)]
    pub bonus: i32,
}

impl Dice {
    pub const fn new(count: u32, sides: u32, bonus: i32) -> Self {
        Self { count, sides, bonus }
    }

    pub fn average(self) -> f64 {
        f64::from(self.count) * (f64::from(self.sides) + 1.0) / 2.0 + f64::from(self.bonus)
    }

    pub fn max(self) -> i32 {
        (self.count * self.sides) as i32 + self.bonus
    }
}

/// Why a goal gave up. Every variant is local to the failing agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GoalFailure {
    /// The target was destroyed, vanished, or can never be picked up.
    TargetInvalid,
    /// Movement toward the target kept failing until the retry budget ran out.
    TargetUnreachable,
    /// Someone else is holding the target.
    TargetUnavailable,
    /// A replacement search found nothing worth taking.
    NoCandidateFound,
    /// A search already handed its one candidate to an equip attempt.
    AttemptSpent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossCause {
    Disarmed,
    MagneticPulse,
}

/// Something the host does to an agent that knocks equipment loose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Disruption {
    Disarm { slot: EquipSlot },
    MagneticPulse,
}

impl Disruption {
    pub fn cause(self) -> LossCause {
        match self {
            Disruption::Disarm { .. } => LossCause::Disarmed,
            Disruption::MagneticPulse => LossCause::MagneticPulse,
        }
    }
}

/// In-world narration an agent emits about its own reasoning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Thought {
    TargetGone,
    CannotEquip { item: ItemId },
    AlreadyHave { item: ItemId },
    SomeoneElseHolds { item: ItemId },
    GoingToTake { item: ItemId },
    OutOfReach { item: ItemId },
    MovingTo { item: ItemId },
    BlockedRetrying { item: ItemId, remaining: u8 },
    BlockedGivingUp { item: ItemId },
    LookingForReplacement { slot: EquipSlot },
    FoundReplacement { item: ItemId },
    NoReplacement { slot: EquipSlot },
    DoneSearching { slot: EquipSlot },
    TooScared { threat: EntityId },
    LosingPatience { target: EntityId },
    InMyWay { blocker: EntityId },
    Retreating { threat: EntityId },
    Cornered { threat: EntityId },
    HoldingFire { bystander: EntityId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    Thought { agent: EntityId, thought: Thought },
    GoalPushed { agent: EntityId, goal: &'static str },
    GoalRejected { agent: EntityId, goal: &'static str },
    GoalPopped { agent: EntityId, goal: &'static str },
    GoalFailed { agent: EntityId, goal: &'static str, failure: GoalFailure },
    ItemTaken { agent: EntityId, item: ItemId },
    ItemDropped { agent: EntityId, item: ItemId, pos: Pos },
    Reequipped { agent: EntityId, slot: EquipSlot, item: ItemId },
}

/// Verdict of a pre-attack safety check. A veto is not a goal failure: the
/// attack is simply skipped this turn and re-evaluated at the next chance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Safety {
    Safe,
    Vetoed { bystander: EntityId },
}

impl Safety {
    pub fn is_safe(self) -> bool {
        matches!(self, Safety::Safe)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    AllIdle,
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}
