//! Epidemic parameters written into every world.

use serde::{Deserialize, Serialize};

use crate::demographics::AgeBands;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirusParameters {
    pub infectivity: AgeBands,
    pub fatality: AgeBands,
    pub reinfectivity: AgeBands,
    pub symptomaticity: AgeBands,
    pub serious_rate: AgeBands,
}

impl VirusParameters {
    /// The table shipped with every generated world.
    pub const fn standard() -> Self {
        Self {
            infectivity: AgeBands::from_array([0.01, 0.02, 0.04, 0.04, 0.04, 0.04, 0.02, 0.02, 0.04]),
            fatality: AgeBands::from_array([
                0.0001, 0.0001, 0.001, 0.0045, 0.0130, 0.044, 0.130, 0.320, 0.87,
            ]),
            reinfectivity: AgeBands::uniform(0.001),
            symptomaticity: AgeBands::uniform(0.5),
            serious_rate: AgeBands::from_array([0.02, 0.01, 0.06, 0.1, 0.15, 0.25, 0.4, 0.65, 0.95]),
        }
    }
}

impl Default for VirusParameters {
    fn default() -> Self {
        Self::standard()
    }
}
