//! Age-banded values and the per-region demographic profile.
//!
//! Every table in a world document (demographics, interactivity and the five
//! virus tables) is keyed by the same nine age bands. The serialized key names
//! are fixed by the simulator, including its spelling of "fourty".

use serde::{Deserialize, Serialize};

use crate::region::RegionRecord;

pub const AGE_BAND_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBands {
    pub under_five: f64,
    pub five_to_seventeen: f64,
    pub eighteen_to_twenty_nine: f64,
    pub thirty_to_thirty_nine: f64,
    #[serde(rename = "fourtyToFourtyNine")]
    pub forty_to_forty_nine: f64,
    pub fifty_to_sixty_four: f64,
    pub sixty_five_to_seventy_four: f64,
    pub seventy_five_to_eighty_four: f64,
    pub over_eighty_five: f64,
}

impl AgeBands {
    /// Bands in ascending age order.
    pub const fn from_array(values: [f64; AGE_BAND_COUNT]) -> Self {
        Self {
            under_five: values[0],
            five_to_seventeen: values[1],
            eighteen_to_twenty_nine: values[2],
            thirty_to_thirty_nine: values[3],
            forty_to_forty_nine: values[4],
            fifty_to_sixty_four: values[5],
            sixty_five_to_seventy_four: values[6],
            seventy_five_to_eighty_four: values[7],
            over_eighty_five: values[8],
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::from_array([value; AGE_BAND_COUNT])
    }

    pub fn to_array(&self) -> [f64; AGE_BAND_COUNT] {
        [
            self.under_five,
            self.five_to_seventeen,
            self.eighteen_to_twenty_nine,
            self.thirty_to_thirty_nine,
            self.forty_to_forty_nine,
            self.fifty_to_sixty_four,
            self.sixty_five_to_seventy_four,
            self.seventy_five_to_eighty_four,
            self.over_eighty_five,
        ]
    }
}

/// Demographic fractions and interactivity for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicProfile {
    pub demographics: AgeBands,
    pub interactivity: AgeBands,
}

impl DemographicProfile {
    /// Fractions are copied as given and never renormalized; the single
    /// interactivity coefficient is spread across all bands.
    pub fn from_record(record: &RegionRecord) -> Self {
        Self {
            demographics: record.demographics,
            interactivity: AgeBands::uniform(record.interactivity),
        }
    }
}
