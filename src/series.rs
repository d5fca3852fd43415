//! Simulator time series and their summaries.
//!
//! A run directory holds `agg.csv`, one row per step with the number of
//! infected nodes followed by the seven infection-state counts, and one
//! `node_<i>.csv` per world node holding the seven state counts only. Neither
//! has a header row.

use std::{
    fmt,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;
use serde::Serialize;

use crate::error::{Result, WorldError};

pub const STATE_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InfectionState {
    Uninfected,
    AsymptomaticNotInfectious,
    AsymptomaticInfectious,
    Symptomatic,
    Serious,
    Dead,
    Recovered,
}

impl InfectionState {
    /// Column order used by the simulator.
    pub const ALL: [InfectionState; STATE_COUNT] = [
        InfectionState::Uninfected,
        InfectionState::AsymptomaticNotInfectious,
        InfectionState::AsymptomaticInfectious,
        InfectionState::Symptomatic,
        InfectionState::Serious,
        InfectionState::Dead,
        InfectionState::Recovered,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InfectionState::Uninfected => "Uninfected",
            InfectionState::AsymptomaticNotInfectious => "Asymptomatic Not Infectious",
            InfectionState::AsymptomaticInfectious => "Asymptomatic Infectious",
            InfectionState::Symptomatic => "Symptomatic",
            InfectionState::Serious => "Serious Infection",
            InfectionState::Dead => "Dead",
            InfectionState::Recovered => "Recovered",
        }
    }
}

impl fmt::Display for InfectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateCounts(pub [f64; STATE_COUNT]);

impl StateCounts {
    pub fn get(&self, state: InfectionState) -> f64 {
        self.0[state as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    /// Present only for the aggregate series.
    pub infected_nodes: Option<Vec<f64>>,
    pub steps: Vec<StateCounts>,
}

impl Series {
    pub fn read_aggregate(path: impl AsRef<Path>) -> Result<Self> {
        read_series_path(path.as_ref(), true)
    }

    pub fn read_node(path: impl AsRef<Path>) -> Result<Self> {
        read_series_path(path.as_ref(), false)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn summarize(&self, label: impl Into<String>) -> SeriesSummary {
        let states = InfectionState::ALL
            .iter()
            .map(|state| {
                let values: Vec<f64> = self.steps.iter().map(|s| s.get(*state)).collect();
                let (peak_step, peak) = peak(&values).unwrap_or((0, 0.0));
                StateSummary {
                    state: *state,
                    peak,
                    peak_step,
                    last: values.last().copied().unwrap_or(0.0),
                }
            })
            .collect();
        SeriesSummary {
            label: label.into(),
            steps: self.steps.len(),
            peak_infected_nodes: self
                .infected_nodes
                .as_deref()
                .and_then(peak)
                .map(|(_, value)| value),
            states,
        }
    }
}

/// First step holding the maximum value.
fn peak(values: &[f64]) -> Option<(usize, f64)> {
    values.iter().copied().enumerate().fold(None, |best, (step, value)| match best {
        Some((_, top)) if top >= value => best,
        _ => Some((step, value)),
    })
}

pub fn read_series<R: Read>(source: R, path: &Path, aggregate: bool) -> Result<Series> {
    let expected = if aggregate { STATE_COUNT + 1 } else { STATE_COUNT };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut series = Series {
        infected_nodes: aggregate.then(Vec::new),
        steps: Vec::new(),
    };
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 1;
        if record.len() < expected {
            return Err(WorldError::Series {
                path: path.to_path_buf(),
                line,
                reason: format!("expected {expected} columns, found {}", record.len()),
            });
        }
        let mut values = [0.0; STATE_COUNT + 1];
        for (slot, raw) in values.iter_mut().zip(record.iter()) {
            *slot = raw.parse::<f64>().map_err(|_| WorldError::Series {
                path: path.to_path_buf(),
                line,
                reason: format!("'{raw}' is not a number"),
            })?;
        }
        let offset = usize::from(aggregate);
        let mut counts = [0.0; STATE_COUNT];
        counts.copy_from_slice(&values[offset..offset + STATE_COUNT]);
        if let Some(nodes) = series.infected_nodes.as_mut() {
            nodes.push(values[0]);
        }
        series.steps.push(StateCounts(counts));
    }
    Ok(series)
}

fn read_series_path(path: &Path, aggregate: bool) -> Result<Series> {
    let file = File::open(path).map_err(|err| WorldError::io(path, err))?;
    read_series(file, path, aggregate)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub state: InfectionState,
    pub peak: f64,
    pub peak_step: usize,
    pub last: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub label: String,
    pub steps: usize,
    pub peak_infected_nodes: Option<f64>,
    pub states: Vec<StateSummary>,
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} steps)", self.label, self.steps)?;
        if let Some(nodes) = self.peak_infected_nodes {
            writeln!(f, "  {:<28} peak {:>12}", "Infected Nodes", nodes)?;
        }
        for state in &self.states {
            writeln!(
                f,
                "  {:<28} peak {:>12} at step {:<6} final {:>12}",
                state.state.label(),
                state.peak,
                state.peak_step,
                state.last
            )?;
        }
        Ok(())
    }
}

/// File layout of one simulator run.
pub struct RunDirectory {
    base: PathBuf,
}

impl RunDirectory {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    pub fn aggregate_path(&self) -> PathBuf {
        self.base.join("agg.csv")
    }

    pub fn node_path(&self, index: usize) -> PathBuf {
        self.base.join(format!("node_{index}.csv"))
    }

    /// Aggregate summary first, then one summary per named node.
    pub fn summarize(&self, node_names: &[String]) -> Result<Vec<SeriesSummary>> {
        let mut summaries = Vec::with_capacity(node_names.len() + 1);
        summaries.push(Series::read_aggregate(self.aggregate_path())?.summarize("Aggregate"));
        for (index, name) in node_names.iter().enumerate() {
            let series = Series::read_node(self.node_path(index))?;
            summaries.push(series.summarize(name.clone()));
        }
        Ok(summaries)
    }
}
