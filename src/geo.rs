//! Geographic coordinates and great-circle distance.

use crate::error::{Result, WorldError};

pub const EARTH_RADIUS_KM: f64 = 6373.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn distance_km(&self, other: &Coordinate) -> u32 {
        distance(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Parse a hemisphere-suffixed degree string such as `"51.5N"` or `"0.1W"`.
pub fn parse_coordinate(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let invalid = |reason| WorldError::InvalidCoordinate {
        value: raw.to_string(),
        reason,
    };
    let hemisphere = trimmed.chars().last().ok_or_else(|| invalid("empty value"))?;
    let sign = match hemisphere {
        'N' | 'E' => 1.0,
        'S' | 'W' => -1.0,
        _ => return Err(invalid("hemisphere must be one of N, S, E, W")),
    };
    let magnitude = trimmed[..trimmed.len() - 1]
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid("degrees are not a number"))?;
    if !magnitude.is_finite() {
        return Err(invalid("degrees are not finite"));
    }
    Ok(sign * magnitude)
}

/// Haversine distance in kilometres, unrounded.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = lon2.to_radians() - lon1.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Great-circle distance truncated to whole kilometres.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> u32 {
    haversine_km(lat1, lon1, lat2, lon2) as u32
}
