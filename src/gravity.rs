//! Travel edges inferred from daily passenger counts.
//!
//! Each region's outbound traffic is apportioned across every other region by
//! that region's share of global traffic, then divided by 365.25. The
//! estimate for a pair `(i, j)` with `i < j` is computed once in that
//! direction and stored as a single undirected weight; the reverse direction
//! is never evaluated.

use tracing::debug;

use crate::{
    error::{checked_total, Result, WorldError},
    geo::Coordinate,
    region::RegionRecord,
    world::WorldEdge,
};

pub const DAYS_PER_YEAR: f64 = 365.25;
pub const DEFAULT_EDGE_INTERACTIVITY: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TravelSample {
    pub name: String,
    pub passengers: u64,
    pub location: Coordinate,
}

impl From<&RegionRecord> for TravelSample {
    fn from(record: &RegionRecord) -> Self {
        Self {
            name: record.name.clone(),
            passengers: record.daily_passengers,
            location: record.location,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GravityModel {
    samples: Vec<TravelSample>,
    total_passengers: u64,
    edge_interactivity: f64,
}

impl GravityModel {
    pub fn new(samples: Vec<TravelSample>) -> Result<Self> {
        let total_passengers =
            checked_total("daily passengers", samples.iter().map(|s| s.passengers))?;
        if total_passengers == 0 {
            return Err(WorldError::ZeroTotalPassengers);
        }
        Ok(Self {
            samples,
            total_passengers,
            edge_interactivity: DEFAULT_EDGE_INTERACTIVITY,
        })
    }

    pub fn from_regions(regions: &[RegionRecord]) -> Result<Self> {
        Self::new(regions.iter().map(TravelSample::from).collect())
    }

    pub fn with_edge_interactivity(mut self, interactivity: f64) -> Self {
        self.edge_interactivity = interactivity;
        self
    }

    pub fn total_passengers(&self) -> u64 {
        self.total_passengers
    }

    pub fn edges(&self) -> Vec<WorldEdge> {
        let mut edges = Vec::new();
        for (i, left) in self.samples.iter().enumerate() {
            for (offset, right) in self.samples[i + 1..].iter().enumerate() {
                let j = i + 1 + offset;
                let population = estimate(left.passengers, right.passengers, self.total_passengers);
                if population == 0 {
                    continue;
                }
                edges.push(WorldEdge {
                    name: format!("{}<->{}", left.name, right.name),
                    left: i,
                    right: j,
                    population,
                    interactivity: self.edge_interactivity,
                    distance: left.location.distance_km(&right.location),
                });
            }
        }
        let n = self.samples.len();
        debug!(
            pairs = n * n.saturating_sub(1) / 2,
            kept = edges.len(),
            "gravity scan complete"
        );
        edges
    }
}

/// `floor(origin * (destination / total) / 365.25)`. `total` must be non-zero.
pub fn estimate(origin: u64, destination: u64, total: u64) -> u64 {
    let share = destination as f64 / total as f64;
    (origin as f64 * share / DAYS_PER_YEAR) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(name: &str, passengers: u64) -> TravelSample {
        TravelSample {
            name: name.into(),
            passengers,
            location: Coordinate::new(0.0, 0.0),
        }
    }

    #[test]
    fn busy_origin_keeps_edge() {
        assert_eq!(estimate(500_000, 1_000, 1_000_000), 1);
    }

    #[test]
    fn quiet_pair_is_dropped() {
        assert_eq!(estimate(1_000, 1_000, 1_000_000), 0);
    }

    #[test]
    fn estimate_uses_origin_times_destination_share() {
        let model = GravityModel::new(vec![sample("A", 730_500), sample("B", 1_000)]).unwrap();
        let edges = model.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].population, estimate(730_500, 1_000, 731_500));
        assert_eq!(edges[0].population, 2);
    }

    #[test]
    fn edges_follow_upper_triangle() {
        let model = GravityModel::new(vec![
            sample("A", 10_000_000),
            sample("B", 10_000_000),
            sample("C", 10_000_000),
        ])
        .unwrap();
        let pairs: Vec<(usize, usize)> = model.edges().iter().map(|e| (e.left, e.right)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(model.edges()[0].name, "A<->B");
        assert_eq!(model.edges()[0].interactivity, DEFAULT_EDGE_INTERACTIVITY);
    }

    #[test]
    fn zero_total_is_fatal() {
        let result = GravityModel::new(vec![sample("A", 0), sample("B", 0)]);
        assert!(matches!(result, Err(WorldError::ZeroTotalPassengers)));
    }

    #[test]
    fn passenger_total_overflow_is_fatal() {
        let result = GravityModel::new(vec![
            sample("A", 10_000_000_000_000_000_000),
            sample("B", 10_000_000_000_000_000_000),
        ]);
        assert!(matches!(
            result,
            Err(WorldError::CountOverflow {
                quantity: "daily passengers"
            })
        ));
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(matches!(
            GravityModel::new(Vec::new()),
            Err(WorldError::ZeroTotalPassengers)
        ));
    }

    #[test]
    fn distance_uses_coordinates() {
        let model = GravityModel::new(vec![
            TravelSample {
                name: "London".into(),
                passengers: 50_000_000,
                location: Coordinate::new(51.5074, -0.1278),
            },
            TravelSample {
                name: "Paris".into(),
                passengers: 50_000_000,
                location: Coordinate::new(48.8566, 2.3522),
            },
        ])
        .unwrap();
        assert_eq!(model.edges()[0].distance, 343);
    }

    proptest! {
        #[test]
        fn edge_iff_estimate_at_least_one(
            passengers in proptest::collection::vec(0u64..5_000_000, 2..8)
        ) {
            prop_assume!(passengers.iter().sum::<u64>() > 0);
            let total: u64 = passengers.iter().sum();
            let samples = passengers
                .iter()
                .enumerate()
                .map(|(i, p)| sample(&format!("R{i}"), *p))
                .collect();
            let model = GravityModel::new(samples).unwrap();
            let edges = model.edges();
            for i in 0..passengers.len() {
                for j in i + 1..passengers.len() {
                    let expected = estimate(passengers[i], passengers[j], total);
                    let found = edges.iter().find(|e| e.left == i && e.right == j);
                    prop_assert_eq!(found.is_some(), expected >= 1);
                    if let Some(edge) = found {
                        prop_assert_eq!(edge.population, expected);
                    }
                }
            }
        }
    }
}
