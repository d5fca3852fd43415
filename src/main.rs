use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use epiworld::{
    pipeline,
    profile::{BuildProfile, ProfileLoader},
    series::RunDirectory,
    writer::load_world,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Builds simulator world files from regional data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a world document from a region CSV
    Build(BuildArgs),
    /// Summarize a simulator run against its world document
    Summarize(SummarizeArgs),
}

#[derive(Debug, clap::Args)]
struct BuildArgs {
    /// Path to a build profile YAML file
    #[arg(long, conflicts_with_all = ["input", "map", "name"])]
    profile: Option<PathBuf>,

    /// Region CSV (required without --profile)
    #[arg(long, requires_all = ["map", "name"])]
    input: Option<PathBuf>,

    /// Map number written to the world document
    #[arg(long)]
    map: Option<u32>,

    /// Output file stem, written as <worlds-dir>/<name>.json
    #[arg(long)]
    name: Option<String>,

    /// Override the output directory
    #[arg(long)]
    worlds_dir: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, clap::Args)]
struct SummarizeArgs {
    /// World document the run was simulated on
    #[arg(long)]
    world: PathBuf,

    /// Directory holding agg.csv and node_<i>.csv
    #[arg(long)]
    run_dir: PathBuf,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => build(args),
        Command::Summarize(args) => {
            init_tracing("info");
            summarize(args)
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("epiworld={default_level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build(args: BuildArgs) -> Result<()> {
    let mut profile = match (args.profile, args.input, args.map, args.name) {
        (Some(path), _, _, _) => ProfileLoader::new(".").load(path)?,
        (None, Some(input), Some(map), Some(name)) => {
            let profile = BuildProfile::new(name, map, input);
            profile.validate()?;
            profile
        }
        _ => anyhow::bail!("either --profile or all of --input, --map and --name are required"),
    };
    if let Some(dir) = args.worlds_dir {
        profile.worlds_dir = dir;
    }
    profile.pretty |= args.pretty;

    init_tracing(&profile.logging.level);
    let summary = pipeline::run(&profile)
        .with_context(|| format!("Failed to build world from {}", profile.input.display()))?;
    println!(
        "World '{}' written to {}: {} nodes, {} edges, population {}, daily travellers {}",
        profile.name,
        summary.path.display(),
        summary.nodes,
        summary.edges,
        summary.total_population,
        summary.total_edge_population
    );
    Ok(())
}

fn summarize(args: SummarizeArgs) -> Result<()> {
    let world = load_world(&args.world)
        .with_context(|| format!("Failed to load world {}", args.world.display()))?;
    let summaries = RunDirectory::new(&args.run_dir)
        .summarize(&world.node_names())
        .with_context(|| format!("Failed to read run {}", args.run_dir.display()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            print!("{summary}");
        }
    }
    Ok(())
}
