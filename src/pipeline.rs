use std::path::PathBuf;

use tracing::info;

use crate::{
    error::Result,
    profile::BuildProfile,
    region::read_regions_from_path,
    world::{WorldBuilder, WorldDocument},
    writer::WorldWriter,
};

#[derive(Debug)]
pub struct BuildSummary {
    pub path: PathBuf,
    pub nodes: usize,
    pub edges: usize,
    pub total_population: u64,
    pub total_edge_population: u64,
}

/// Parse, assemble and write one world. Any failure aborts before the
/// output file is created.
pub fn run(profile: &BuildProfile) -> Result<BuildSummary> {
    info!(input = %profile.input.display(), map = profile.map, "building world");
    let world = build(profile)?;
    let total_population = world.total_population()?;
    let total_edge_population = world.total_edge_population()?;
    let path = WorldWriter::new(&profile.worlds_dir)
        .pretty(profile.pretty)
        .write(&profile.name, &world)?;
    Ok(BuildSummary {
        path,
        nodes: world.nodes.len(),
        edges: world.edges.len(),
        total_population,
        total_edge_population,
    })
}

pub fn build(profile: &BuildProfile) -> Result<WorldDocument> {
    let regions = read_regions_from_path(&profile.input)?;
    WorldBuilder::new(profile.map)
        .with_edge_interactivity(profile.edge_interactivity)
        .build(&regions)
}
