//! Site-plan placement CLI

mod input;

use clap::{Parser, Subcommand};
use input::{load_config, SiteFile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use siteplan_core::{BoundedObject, ObstacleId, PlacementResult};
use siteplan_placement::{CollisionEvaluator, SitePlanner};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "siteplan")]
#[command(about = "Collision-free placement of buildings on a settlement site plan")]
#[command(version)]
struct Cli {
    /// Log search passes (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a position for a new building
    Place {
        /// Site file (JSON)
        #[arg(short, long)]
        site: PathBuf,

        /// Name of the building type to place
        #[arg(short, long)]
        building_type: String,

        /// Random seed; omit for a different result on every run
        #[arg(long)]
        seed: Option<u64>,

        /// Placement configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check whether a position is free
    Check {
        /// Site file (JSON)
        #[arg(short, long)]
        site: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        #[arg(long)]
        width: f64,

        #[arg(long)]
        length: f64,

        /// Degrees clockwise from north
        #[arg(long, default_value = "0")]
        facing: f64,

        /// Ignore this obstacle (the structure being moved)
        #[arg(long)]
        exclude: Option<String>,
    },
}

#[derive(Serialize)]
struct PlaceReport {
    building_type: String,
    seed: Option<u64>,
    result: PlacementResult,
}

#[derive(Serialize)]
struct CheckReport {
    bounds: BoundedObject,
    open: bool,
    blocked_by_movable_only: bool,
    blocked_by_immovable: bool,
    collisions: Vec<ObstacleId>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Place {
            site,
            building_type,
            seed,
            config,
        } => {
            let file = SiteFile::from_json_file(&site)?;
            let config = load_config(config.as_deref())?;
            let building_type = file.building_type(&building_type)?;

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let planner = SitePlanner::new(config);
            let result = planner.place(building_type, &file.site, &mut rng)?;

            let report = PlaceReport {
                building_type: building_type.name.clone(),
                seed,
                result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Check {
            site,
            x,
            y,
            width,
            length,
            facing,
            exclude,
        } => {
            let file = SiteFile::from_json_file(&site)?;
            let candidate = BoundedObject::new(x, y, width, length, facing);
            candidate.validate()?;

            let evaluator = CollisionEvaluator::from_index(&file.site)?;
            let exclude = exclude.map(ObstacleId::new);
            let hits = evaluator.collisions(&candidate, exclude.as_ref());

            let report = CheckReport {
                bounds: candidate,
                open: hits.is_empty(),
                blocked_by_movable_only: !hits.is_empty() && hits.iter().all(|o| o.is_movable()),
                blocked_by_immovable: hits.iter().any(|o| !o.is_movable()),
                collisions: hits.iter().map(|o| o.id.clone()).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
