use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use brain::cone::{cone_safety_check, debug_overlay, firing_cone};
use brain::{EntityId, EquipSlot, LogEvent, Options, Scenario};
use clap::Parser;
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario JSON file
    #[arg(short, long)]
    scenario: PathBuf,
    /// Path to a TOML table of Yes/No switches
    #[arg(short, long)]
    options: Option<PathBuf>,
    #[arg(short, long, default_value_t = 500)]
    ticks: u32,
    /// After the run, resolve a shot from this actor...
    #[arg(long, requires = "cone_to")]
    cone_from: Option<String>,
    /// ...at this actor
    #[arg(long, requires = "cone_from")]
    cone_to: Option<String>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    ticks: u32,
    stop_reason: String,
    snapshot_hash: u64,
    thoughts: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("Failed to load scenario: {}", args.scenario.display()))?;
    let options = match &args.options {
        Some(path) => Options::load(path)
            .with_context(|| format!("Failed to load options: {}", path.display()))?,
        None => Options::new(),
    };
    let mut loaded = scenario.build().context("Scenario does not describe a valid world")?;
    let names: BTreeMap<EntityId, String> =
        loaded.names.iter().map(|(name, &id)| (id, name.clone())).collect();

    let result = loaded.skirmish.advance(&options, args.ticks);
    info!(ticks = result.simulated_ticks, "skirmish finished");

    let thoughts = loaded
        .skirmish
        .world
        .log()
        .iter()
        .filter_map(|event| match event {
            LogEvent::Thought { agent, thought } => {
                let name = names.get(agent).map_or("?", String::as_str);
                Some(format!("{name}: {thought:?}"))
            }
            _ => None,
        })
        .collect();
    let summary = Summary {
        ticks: result.simulated_ticks,
        stop_reason: format!("{:?}", result.stop_reason),
        snapshot_hash: loaded.skirmish.snapshot_hash(),
        thoughts,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in &summary.thoughts {
            println!("{line}");
        }
        println!("Ticks: {}", summary.ticks);
        println!("Stopped: {}", summary.stop_reason);
        println!("Snapshot Hash: {}", summary.snapshot_hash);
    }

    if let (Some(from), Some(to)) = (&args.cone_from, &args.cone_to) {
        let Some(shooter) = loaded.actor(from) else {
            bail!("No actor named {from}");
        };
        let Some(target) = loaded.actor(to) else {
            bail!("No actor named {to}");
        };
        let world = &loaded.skirmish.world;
        let Some(&weapon) = world.actors[shooter].equipped.get(&EquipSlot::MissileWeapon) else {
            bail!("{from} has no missile weapon equipped");
        };
        let cells = firing_cone(world, &options, shooter, world.actors[target].pos, weapon);
        println!("Cone cells: {}", cells.len());
        println!("Verdict: {:?}", cone_safety_check(world, shooter, &cells));
        if let Some(overlay) = debug_overlay(world, &options, shooter, &cells) {
            print!("{overlay}");
        }
    }

    Ok(())
}
