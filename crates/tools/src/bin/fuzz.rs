use anyhow::Result;
use brain::content::{ContentPack, keys as items};
use brain::options::keys;
use brain::{
    Actor, AdvanceStopReason, Disruption, EquipSlot, ItemLocation, Map, Options, Pos, Skirmish,
    TileKind, World,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    /// Number of independent skirmishes to run
    #[arg(short, long, default_value_t = 50)]
    runs: u32,
}

const TEMPLATES: [&str; 7] = [
    items::BRONZE_DAGGER,
    items::IRON_LONG_SWORD,
    items::STEEL_AXE,
    items::SHORT_BOW,
    items::HUNTING_RIFLE,
    items::CHAIN_MAIL,
    items::TOWER_SHIELD,
];

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn coin(rng: &mut ChaCha8Rng, one_in: u64) -> bool {
    rng.next_u64() % one_in == 0
}

fn build(seed: u64, rng: &mut ChaCha8Rng) -> Skirmish {
    let width = 12 + (rng.next_u64() % 10) as usize;
    let height = 10 + (rng.next_u64() % 6) as usize;
    let mut map = Map::new(width, height);
    let mut floor = Vec::new();
    for y in 1..height as i32 - 1 {
        for x in 1..width as i32 - 1 {
            if coin(rng, 8) {
                map.set_tile(Pos { y, x }, TileKind::Wall);
            } else {
                floor.push(Pos { y, x });
            }
        }
    }
    let mut world = World::new(seed, map);
    let content = ContentPack::build_default();

    let actors = 2 + rng.next_u64() % 4;
    for n in 0..actors {
        if floor.is_empty() {
            break;
        }
        let pos = floor.swap_remove(rng.next_u64() as usize % floor.len());
        let faction = choose(rng, &["guards", "raiders"]);
        let mut actor = Actor::new(format!("actor{n}"), faction, pos);
        actor.stats.intelligence = 4 + (rng.next_u64() % 16) as i32;
        let agent = world.spawn_actor(actor);
        for _ in 0..rng.next_u64() % 3 {
            if let Some(item) = content.item(choose(rng, &TEMPLATES)) {
                let item = world.spawn_item(item);
                world.give_item(agent, item);
            }
        }
        world.reequip(agent);
    }
    for _ in 0..rng.next_u64() % 6 {
        if floor.is_empty() {
            break;
        }
        let pos = floor[rng.next_u64() as usize % floor.len()];
        if let Some(item) = content.item(choose(rng, &TEMPLATES)) {
            let item = world.spawn_item(item);
            world.place_item(item, pos);
        }
    }

    let mut skirmish = Skirmish::new(world);
    let agents: Vec<_> = skirmish.world.actors.keys().collect();
    for agent in agents {
        let disruption = if coin(rng, 2) {
            Disruption::MagneticPulse
        } else {
            Disruption::Disarm { slot: choose(rng, &EquipSlot::PRIORITY) }
        };
        skirmish.schedule(rng.next_u64() % 30, agent, disruption);
    }
    skirmish
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seed {} for {} runs of max {} ticks...",
        args.seed, args.runs, args.ticks
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let seed = rng.next_u64();
        let mut options = Options::new();
        for key in keys::ALL {
            options.set(key, if coin(&mut rng, 2) { "Yes" } else { "No" });
        }
        let mut skirmish = build(seed, &mut rng);

        let mut total_steps = 0;
        while total_steps < args.ticks {
            let result = skirmish.advance(&options, 10);
            total_steps += result.simulated_ticks;

            let world = &skirmish.world;
            for (id, actor) in &world.actors {
                assert!(world.map.is_walkable(actor.pos), "Invariant failed: actor in terrain");
                for item in actor.equipped.values() {
                    assert!(actor.inventory.contains(item), "Invariant failed: equipped item lost");
                }
                for &item in &actor.inventory {
                    assert_eq!(
                        world.item_location(item),
                        ItemLocation::InInventoryOf(id),
                        "Invariant failed: inventory out of sync"
                    );
                }
            }
            if result.stop_reason == AdvanceStopReason::AllIdle {
                break;
            }
        }
        println!("run {run} (seed {seed}): {total_steps} ticks, hash {}", skirmish.snapshot_hash());
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
