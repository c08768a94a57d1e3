//! Demographic and geographic partitions used to index baseline expenditure
//! data and tax schedules.
//!
//! Every enum here has a canonical label (the string used by BLS tables and
//! calibration files). Labels round-trip through [`std::fmt::Display`] and
//! [`std::str::FromStr`], and serde uses the same labels, so unknown keys are
//! rejected when a table or calibration file is loaded rather than at every
//! call site.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a label does not name a known variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseLabelError {
    #[error("unknown age group '{0}'")]
    AgeGroup(String),

    #[error("unknown region '{0}'")]
    Region(String),

    /// The state name is not a U.S. state or the District of Columbia.
    #[error("unknown jurisdiction '{0}'")]
    State(String),

    #[error("unknown expenditure category '{0}'")]
    Category(String),
}

/// Implements `Display`, `FromStr` and the `String` conversions serde uses,
/// all in terms of the type's `label` and `parse` functions.
macro_rules! impl_label_conversions {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(
                &self,
                f: &mut std::fmt::Formatter<'_>,
            ) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::models::ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = $crate::models::ParseLabelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                <$ty>::parse(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.label().to_string()
            }
        }
    };
}

pub(crate) use impl_label_conversions;

/// BLS Consumer Expenditure Survey age bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgeGroup {
    Under25,
    From25To34,
    From35To44,
    From45To54,
    From55To64,
    From65To74,
    From75,
}

impl AgeGroup {
    /// All bands in ascending age order.
    pub const ALL: [AgeGroup; 7] = [
        Self::Under25,
        Self::From25To34,
        Self::From35To44,
        Self::From45To54,
        Self::From55To64,
        Self::From65To74,
        Self::From75,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Under25 => "Under 25",
            Self::From25To34 => "25-34",
            Self::From35To44 => "35-44",
            Self::From45To54 => "45-54",
            Self::From55To64 => "55-64",
            Self::From65To74 => "65-74",
            Self::From75 => "75 and older",
        }
    }

    /// Inclusive age bounds of the band. The top band ends at 999.
    pub fn bounds(&self) -> (i32, i32) {
        match self {
            Self::Under25 => (0, 24),
            Self::From25To34 => (25, 34),
            Self::From35To44 => (35, 44),
            Self::From45To54 => (45, 54),
            Self::From55To64 => (55, 64),
            Self::From65To74 => (65, 74),
            Self::From75 => (75, 999),
        }
    }

    pub fn parse(s: &str) -> Result<Self, ParseLabelError> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|group| group.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError::AgeGroup(s.to_string()))
    }
}

impl_label_conversions!(AgeGroup);

/// BLS census regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    Northeast,
    Midwest,
    South,
    West,
}

impl Region {
    pub const ALL: [Region; 4] = [Self::Northeast, Self::Midwest, Self::South, Self::West];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Northeast => "Northeast",
            Self::Midwest => "Midwest",
            Self::South => "South",
            Self::West => "West",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ParseLabelError> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|region| region.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError::Region(s.to_string()))
    }
}

impl_label_conversions!(Region);

/// The fifty U.S. states and the District of Columbia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum State {
    Alabama,
    Alaska,
    Arizona,
    Arkansas,
    California,
    Colorado,
    Connecticut,
    Delaware,
    DistrictOfColumbia,
    Florida,
    Georgia,
    Hawaii,
    Idaho,
    Illinois,
    Indiana,
    Iowa,
    Kansas,
    Kentucky,
    Louisiana,
    Maine,
    Maryland,
    Massachusetts,
    Michigan,
    Minnesota,
    Mississippi,
    Missouri,
    Montana,
    Nebraska,
    Nevada,
    NewHampshire,
    NewJersey,
    NewMexico,
    NewYork,
    NorthCarolina,
    NorthDakota,
    Ohio,
    Oklahoma,
    Oregon,
    Pennsylvania,
    RhodeIsland,
    SouthCarolina,
    SouthDakota,
    Tennessee,
    Texas,
    Utah,
    Vermont,
    Virginia,
    Washington,
    WestVirginia,
    Wisconsin,
    Wyoming,
}

impl State {
    pub const ALL: [State; 51] = [
        Self::Alabama,
        Self::Alaska,
        Self::Arizona,
        Self::Arkansas,
        Self::California,
        Self::Colorado,
        Self::Connecticut,
        Self::Delaware,
        Self::DistrictOfColumbia,
        Self::Florida,
        Self::Georgia,
        Self::Hawaii,
        Self::Idaho,
        Self::Illinois,
        Self::Indiana,
        Self::Iowa,
        Self::Kansas,
        Self::Kentucky,
        Self::Louisiana,
        Self::Maine,
        Self::Maryland,
        Self::Massachusetts,
        Self::Michigan,
        Self::Minnesota,
        Self::Mississippi,
        Self::Missouri,
        Self::Montana,
        Self::Nebraska,
        Self::Nevada,
        Self::NewHampshire,
        Self::NewJersey,
        Self::NewMexico,
        Self::NewYork,
        Self::NorthCarolina,
        Self::NorthDakota,
        Self::Ohio,
        Self::Oklahoma,
        Self::Oregon,
        Self::Pennsylvania,
        Self::RhodeIsland,
        Self::SouthCarolina,
        Self::SouthDakota,
        Self::Tennessee,
        Self::Texas,
        Self::Utah,
        Self::Vermont,
        Self::Virginia,
        Self::Washington,
        Self::WestVirginia,
        Self::Wisconsin,
        Self::Wyoming,
    ];

    /// Full state name, e.g. `"New York"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alabama => "Alabama",
            Self::Alaska => "Alaska",
            Self::Arizona => "Arizona",
            Self::Arkansas => "Arkansas",
            Self::California => "California",
            Self::Colorado => "Colorado",
            Self::Connecticut => "Connecticut",
            Self::Delaware => "Delaware",
            Self::DistrictOfColumbia => "District of Columbia",
            Self::Florida => "Florida",
            Self::Georgia => "Georgia",
            Self::Hawaii => "Hawaii",
            Self::Idaho => "Idaho",
            Self::Illinois => "Illinois",
            Self::Indiana => "Indiana",
            Self::Iowa => "Iowa",
            Self::Kansas => "Kansas",
            Self::Kentucky => "Kentucky",
            Self::Louisiana => "Louisiana",
            Self::Maine => "Maine",
            Self::Maryland => "Maryland",
            Self::Massachusetts => "Massachusetts",
            Self::Michigan => "Michigan",
            Self::Minnesota => "Minnesota",
            Self::Mississippi => "Mississippi",
            Self::Missouri => "Missouri",
            Self::Montana => "Montana",
            Self::Nebraska => "Nebraska",
            Self::Nevada => "Nevada",
            Self::NewHampshire => "New Hampshire",
            Self::NewJersey => "New Jersey",
            Self::NewMexico => "New Mexico",
            Self::NewYork => "New York",
            Self::NorthCarolina => "North Carolina",
            Self::NorthDakota => "North Dakota",
            Self::Ohio => "Ohio",
            Self::Oklahoma => "Oklahoma",
            Self::Oregon => "Oregon",
            Self::Pennsylvania => "Pennsylvania",
            Self::RhodeIsland => "Rhode Island",
            Self::SouthCarolina => "South Carolina",
            Self::SouthDakota => "South Dakota",
            Self::Tennessee => "Tennessee",
            Self::Texas => "Texas",
            Self::Utah => "Utah",
            Self::Vermont => "Vermont",
            Self::Virginia => "Virginia",
            Self::Washington => "Washington",
            Self::WestVirginia => "West Virginia",
            Self::Wisconsin => "Wisconsin",
            Self::Wyoming => "Wyoming",
        }
    }

    /// BLS region the state belongs to.
    pub fn region(&self) -> Region {
        match self {
            Self::Connecticut
            | Self::Maine
            | Self::Massachusetts
            | Self::NewHampshire
            | Self::RhodeIsland
            | Self::Vermont
            | Self::NewJersey
            | Self::NewYork
            | Self::Pennsylvania => Region::Northeast,

            Self::Illinois
            | Self::Indiana
            | Self::Michigan
            | Self::Ohio
            | Self::Wisconsin
            | Self::Iowa
            | Self::Kansas
            | Self::Minnesota
            | Self::Missouri
            | Self::Nebraska
            | Self::NorthDakota
            | Self::SouthDakota => Region::Midwest,

            Self::Delaware
            | Self::Florida
            | Self::Georgia
            | Self::Maryland
            | Self::NorthCarolina
            | Self::SouthCarolina
            | Self::Virginia
            | Self::WestVirginia
            | Self::DistrictOfColumbia
            | Self::Alabama
            | Self::Kentucky
            | Self::Mississippi
            | Self::Tennessee
            | Self::Arkansas
            | Self::Louisiana
            | Self::Oklahoma
            | Self::Texas => Region::South,

            Self::Arizona
            | Self::Colorado
            | Self::Idaho
            | Self::Montana
            | Self::Nevada
            | Self::NewMexico
            | Self::Utah
            | Self::Wyoming
            | Self::Alaska
            | Self::California
            | Self::Hawaii
            | Self::Oregon
            | Self::Washington => Region::West,
        }
    }

    /// Parses a full state name. Matching ignores ASCII case and surrounding
    /// whitespace.
    pub fn parse(s: &str) -> Result<Self, ParseLabelError> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError::State(s.to_string()))
    }
}

impl_label_conversions!(State);
