use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    demographics::{AgeBands, DemographicProfile},
    error::{checked_total, Result, WorldError},
    gravity::GravityModel,
    region::RegionRecord,
    virus::VirusParameters,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldNode {
    pub population: u64,
    pub interactivity: AgeBands,
    pub name: String,
    pub position: Position,
    pub demographics: AgeBands,
    pub gdp: i64,
    pub testing_capacity: u64,
}

impl WorldNode {
    pub fn from_record(record: &RegionRecord) -> Self {
        let profile = DemographicProfile::from_record(record);
        Self {
            population: record.population,
            interactivity: profile.interactivity,
            name: record.name.clone(),
            position: Position::default(),
            demographics: profile.demographics,
            gdp: record.gdp,
            testing_capacity: record.testing_capacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEdge {
    pub name: String,
    pub left: usize,
    pub right: usize,
    pub population: u64,
    pub interactivity: f64,
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldDocument {
    pub map: u32,
    pub virus: VirusParameters,
    pub nodes: Vec<WorldNode>,
    pub edges: Vec<WorldEdge>,
}

impl WorldDocument {
    /// Nodes are identified by position; every edge must point at two
    /// distinct existing nodes.
    pub fn assemble(
        map: u32,
        virus: VirusParameters,
        nodes: Vec<WorldNode>,
        edges: Vec<WorldEdge>,
    ) -> Result<Self> {
        let node_count = nodes.len();
        if let Some(edge) = edges
            .iter()
            .find(|e| e.left >= node_count || e.right >= node_count || e.left == e.right)
        {
            return Err(WorldError::EdgeOutOfRange {
                left: edge.left,
                right: edge.right,
                node_count,
            });
        }
        Ok(Self {
            map,
            virus,
            nodes,
            edges,
        })
    }

    pub fn total_population(&self) -> Result<u64> {
        checked_total("node population", self.nodes.iter().map(|n| n.population))
    }

    pub fn total_edge_population(&self) -> Result<u64> {
        checked_total("edge population", self.edges.iter().map(|e| e.population))
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    pub fn edges_for(&self, index: usize) -> impl Iterator<Item = &WorldEdge> {
        self.edges
            .iter()
            .filter(move |e| e.left == index || e.right == index)
    }

    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }
}

pub struct WorldBuilder {
    map: u32,
    virus: VirusParameters,
    edge_interactivity: f64,
}

impl WorldBuilder {
    pub fn new(map: u32) -> Self {
        Self {
            map,
            virus: VirusParameters::standard(),
            edge_interactivity: crate::gravity::DEFAULT_EDGE_INTERACTIVITY,
        }
    }

    pub fn with_virus(mut self, virus: VirusParameters) -> Self {
        self.virus = virus;
        self
    }

    pub fn with_edge_interactivity(mut self, interactivity: f64) -> Self {
        self.edge_interactivity = interactivity;
        self
    }

    pub fn build(self, regions: &[RegionRecord]) -> Result<WorldDocument> {
        let model = GravityModel::from_regions(regions)?
            .with_edge_interactivity(self.edge_interactivity);
        let nodes: Vec<WorldNode> = regions.iter().map(WorldNode::from_record).collect();
        let edges = model.edges();
        let world = WorldDocument::assemble(self.map, self.virus, nodes, edges)?;
        info!(
            map = world.map,
            nodes = world.nodes.len(),
            edges = world.edges.len(),
            population = world.total_population()?,
            passengers = model.total_passengers(),
            "world assembled"
        );
        Ok(world)
    }
}
