use brain::options::keys;
use brain::scenario::Loaded;
use brain::{
    AdvanceStopReason, Disruption, EquipSlot, GoalFailure, ItemId, ItemLocation, LogEvent,
    Options, Scenario,
};

const OUTPOST: &str = r#"{
    "seed": 11,
    "width": 14,
    "height": 9,
    "actors": [
        { "name": "guard", "faction": "guards", "pos": { "y": 2, "x": 2 },
          "stats": { "intelligence": 14 }, "kill_radius": [4, 6] },
        { "name": "raider", "faction": "raiders", "pos": { "y": 7, "x": 12 },
          "hostile_by_default": true }
    ],
    "items": [
        { "template": "iron_long_sword", "carried_by": "guard" },
        { "template": "hunting_rifle", "carried_by": "guard" },
        { "template": "steel_axe", "at": { "y": 2, "x": 6 } }
    ]
}"#;

fn outpost() -> Loaded {
    Scenario::from_json_str(OUTPOST)
        .expect("scenario parses")
        .build()
        .expect("scenario builds")
}

fn equipped(loaded: &Loaded, slot: EquipSlot) -> Option<ItemId> {
    let guard = loaded.actor("guard").expect("guard exists");
    loaded.skirmish.world.actors[guard].equipped.get(&slot).copied()
}

#[test]
fn disarmed_guard_recovers_the_same_sword() {
    let mut loaded = outpost();
    let guard = loaded.actor("guard").unwrap();
    let sword = equipped(&loaded, EquipSlot::MeleeWeapon).expect("sword starts equipped");
    let options = Options::from_toml_str(r#"DisarmReequip = "Yes""#).unwrap();

    loaded.skirmish.schedule(1, guard, Disruption::Disarm { slot: EquipSlot::MeleeWeapon });
    let result = loaded.skirmish.advance(&options, 40);

    assert_eq!(result.stop_reason, AdvanceStopReason::AllIdle);
    assert_eq!(equipped(&loaded, EquipSlot::MeleeWeapon), Some(sword));
    let world = &loaded.skirmish.world;
    assert!(world.log().contains(&LogEvent::ItemTaken { agent: guard, item: sword }));
    let axe_on_ground = world.items.values().any(|item| {
        item.name == "steel battle axe" && matches!(item.location, ItemLocation::OnGround(_))
    });
    assert!(axe_on_ground, "plain recovery never goes shopping");
}

#[test]
fn destroyed_sword_is_replaced_by_the_nearby_axe() {
    let mut loaded = outpost();
    let guard = loaded.actor("guard").unwrap();
    let options = Options::new()
        .with(keys::DISARM_REEQUIP, "Yes")
        .with(keys::REEQUIP_SEARCH, "Yes");

    let lost = loaded.skirmish.disrupt(&options, guard, Disruption::Disarm {
        slot: EquipSlot::MeleeWeapon,
    });
    assert_eq!(lost.len(), 1);
    loaded.skirmish.world.destroy_item(lost[0]);

    let result = loaded.skirmish.advance(&options, 60);
    assert_eq!(result.stop_reason, AdvanceStopReason::AllIdle);

    let axe = equipped(&loaded, EquipSlot::MeleeWeapon).expect("a melee weapon is equipped again");
    assert_eq!(loaded.skirmish.world.item(axe).unwrap().name, "steel battle axe");
    let log = loaded.skirmish.world.log();
    assert!(log.contains(&LogEvent::GoalFailed {
        agent: guard,
        goal: "ReequipOrFindNew",
        failure: GoalFailure::TargetInvalid,
    }));
    assert!(log.contains(&LogEvent::GoalFailed {
        agent: guard,
        goal: "SearchForWeapon",
        failure: GoalFailure::AttemptSpent,
    }));
}

#[test]
fn fruitless_search_leaves_the_reequip_flag_for_the_host() {
    let mut scenario = Scenario::from_json_str(OUTPOST).unwrap();
    scenario.items.retain(|item| item.template != "steel_axe");
    let mut loaded = scenario.build().unwrap();
    let guard = loaded.actor("guard").unwrap();
    let options = Options::all_enabled();

    let lost = loaded.skirmish.disrupt(&options, guard, Disruption::Disarm {
        slot: EquipSlot::MeleeWeapon,
    });
    loaded.skirmish.world.destroy_item(lost[0]);
    loaded.skirmish.advance(&options, 2);

    assert!(loaded.skirmish.world.log().contains(&LogEvent::GoalFailed {
        agent: guard,
        goal: "SearchForWeapon",
        failure: GoalFailure::NoCandidateFound,
    }));
    assert!(loaded.skirmish.world.actors[guard].recovery_pending);
    let result = loaded.skirmish.advance(&options, 5);
    assert_eq!(result.stop_reason, AdvanceStopReason::AllIdle);
    assert!(!loaded.skirmish.world.actors[guard].recovery_pending);
}

#[test]
fn magnetic_pulse_recovers_everything_it_knocked_loose() {
    let mut loaded = outpost();
    let guard = loaded.actor("guard").unwrap();
    let rifle = equipped(&loaded, EquipSlot::MissileWeapon).expect("rifle starts equipped");
    let sword = equipped(&loaded, EquipSlot::MeleeWeapon).expect("sword starts equipped");
    let options = Options::new().with(keys::PULSE_REEQUIP, "Yes");

    loaded.skirmish.schedule(0, guard, Disruption::MagneticPulse);
    let result = loaded.skirmish.advance(&options, 40);

    assert_eq!(result.stop_reason, AdvanceStopReason::AllIdle);
    assert_eq!(equipped(&loaded, EquipSlot::MissileWeapon), Some(rifle));
    assert_eq!(equipped(&loaded, EquipSlot::MeleeWeapon), Some(sword));
}

#[test]
fn magnetic_pulse_never_drives_the_player() {
    let json = OUTPOST.replacen(
        r#""faction": "guards","#,
        r#""faction": "guards", "kind": "Player","#,
        1,
    );
    let mut loaded = Scenario::from_json_str(&json).unwrap().build().unwrap();
    let guard = loaded.actor("guard").unwrap();
    let options = Options::all_enabled();

    let lost = loaded.skirmish.disrupt(&options, guard, Disruption::MagneticPulse);
    assert_eq!(lost.len(), 2);
    assert!(loaded.skirmish.planner.is_idle(guard));
    loaded.skirmish.advance(&options, 20);
    for item in lost {
        assert!(matches!(loaded.skirmish.world.item_location(item), ItemLocation::OnGround(_)));
    }
}
