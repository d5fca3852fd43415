//! Region rows read from the input CSV.
//!
//! Columns are mapped by position, never by header name. The header row is
//! skipped and only its presence matters.

use std::{fs::File, io::Read, path::Path, str::FromStr};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::{
    demographics::{AgeBands, AGE_BAND_COUNT},
    error::{Result, WorldError},
    geo::{parse_coordinate, Coordinate},
};

const COL_NAME: usize = 1;
const COL_POPULATION: usize = 2;
const COL_FIRST_BAND: usize = 3;
const COL_GDP: usize = 12;
const COL_TESTING_CAPACITY: usize = 13;
const COL_PASSENGERS: usize = 14;
const COL_LATITUDE: usize = 15;
const COL_LONGITUDE: usize = 16;
const COL_INTERACTIVITY: usize = 17;

pub const REQUIRED_COLUMNS: usize = COL_INTERACTIVITY + 1;

const BAND_COLUMNS: [&str; AGE_BAND_COUNT] = [
    "underFive",
    "fiveToSeventeen",
    "eighteenToTwentyNine",
    "thirtyToThirtyNine",
    "fourtyToFourtyNine",
    "fiftyToSixtyFour",
    "sixtyFiveToSeventyFour",
    "seventyFiveToEightyFour",
    "overEightyFive",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    pub name: String,
    pub population: u64,
    pub demographics: AgeBands,
    pub gdp: i64,
    pub testing_capacity: u64,
    pub daily_passengers: u64,
    pub location: Coordinate,
    pub interactivity: f64,
}

pub fn read_regions_from_path(path: impl AsRef<Path>) -> Result<Vec<RegionRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| WorldError::io(path, err))?;
    read_regions(file)
}

pub fn read_regions<R: Read>(source: R) -> Result<Vec<RegionRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut regions = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        regions.push(parse_row(index + 1, &row)?);
    }
    debug!(rows = regions.len(), "parsed region rows");
    Ok(regions)
}

/// `row` is the 1-based data row, excluding the header.
pub fn parse_row(row: usize, record: &StringRecord) -> Result<RegionRecord> {
    if record.len() < REQUIRED_COLUMNS {
        return Err(WorldError::MissingColumns {
            row,
            found: record.len(),
            expected: REQUIRED_COLUMNS,
        });
    }
    let field = |index: usize| record.get(index).unwrap_or_default();

    let name = field(COL_NAME).to_string();
    let population: u64 = parse_field(row, "population", field(COL_POPULATION))?;
    if population == 0 {
        return Err(WorldError::ZeroPopulation { row, name });
    }

    let mut bands = [0.0; AGE_BAND_COUNT];
    for (offset, (slot, column)) in bands.iter_mut().zip(BAND_COLUMNS).enumerate() {
        *slot = finite_field(row, column, field(COL_FIRST_BAND + offset))?;
    }

    Ok(RegionRecord {
        name,
        population,
        demographics: AgeBands::from_array(bands),
        gdp: parse_field(row, "gdp", field(COL_GDP))?,
        testing_capacity: parse_field(row, "testingCapacity", field(COL_TESTING_CAPACITY))?,
        daily_passengers: parse_field(row, "passengers", field(COL_PASSENGERS))?,
        location: Coordinate::new(
            coordinate_field(row, "latitude", field(COL_LATITUDE))?,
            coordinate_field(row, "longitude", field(COL_LONGITUDE))?,
        ),
        interactivity: finite_field(row, "interactivity", field(COL_INTERACTIVITY))?,
    })
}

fn parse_field<T>(row: usize, column: &'static str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|err| WorldError::InvalidField {
            row,
            column,
            value: value.to_string(),
            reason: err.to_string(),
        })
}

/// JSON has no representation for NaN or infinity.
fn finite_field(row: usize, column: &'static str, value: &str) -> Result<f64> {
    let parsed: f64 = parse_field(row, column, value)?;
    if !parsed.is_finite() {
        return Err(WorldError::InvalidField {
            row,
            column,
            value: value.to_string(),
            reason: "value is not finite".to_string(),
        });
    }
    Ok(parsed)
}

fn coordinate_field(row: usize, column: &'static str, value: &str) -> Result<f64> {
    parse_coordinate(value).map_err(|err| match err {
        WorldError::InvalidCoordinate { reason, .. } => WorldError::InvalidField {
            row,
            column,
            value: value.to_string(),
            reason: reason.to_string(),
        },
        other => other,
    })
}
