use crate::error::{DetectionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A geographic or administrative entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    /// Stable knowledge-graph identifier (e.g., "geoId/06")
    pub dcid: String,

    /// Display name (e.g., "California")
    pub name: String,

    /// Own administrative type, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<PlaceType>,
}

impl Place {
    pub fn new(dcid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            dcid: dcid.into(),
            name: name.into(),
            place_type: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, place_type: PlaceType) -> Self {
        self.place_type = Some(place_type);
        self
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.dcid)
    }
}

/// Administrative place types a containment query can scope to.
///
/// Names match the knowledge graph's type names, so `"County"` round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceType {
    Continent,
    Country,
    State,
    County,
    City,
    Town,
    Village,
    Borough,
    CensusZipCodeTabulationArea,
    SchoolDistrict,
    CongressionalDistrict,
    Province,
    Department,
    District,
    Region,
    AdministrativeArea1,
    AdministrativeArea2,
    AdministrativeArea3,
    EurostatNUTS1,
    EurostatNUTS2,
    EurostatNUTS3,
}

impl PlaceType {
    pub const ALL: [PlaceType; 21] = [
        Self::Continent,
        Self::Country,
        Self::State,
        Self::County,
        Self::City,
        Self::Town,
        Self::Village,
        Self::Borough,
        Self::CensusZipCodeTabulationArea,
        Self::SchoolDistrict,
        Self::CongressionalDistrict,
        Self::Province,
        Self::Department,
        Self::District,
        Self::Region,
        Self::AdministrativeArea1,
        Self::AdministrativeArea2,
        Self::AdministrativeArea3,
        Self::EurostatNUTS1,
        Self::EurostatNUTS2,
        Self::EurostatNUTS3,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continent => "Continent",
            Self::Country => "Country",
            Self::State => "State",
            Self::County => "County",
            Self::City => "City",
            Self::Town => "Town",
            Self::Village => "Village",
            Self::Borough => "Borough",
            Self::CensusZipCodeTabulationArea => "CensusZipCodeTabulationArea",
            Self::SchoolDistrict => "SchoolDistrict",
            Self::CongressionalDistrict => "CongressionalDistrict",
            Self::Province => "Province",
            Self::Department => "Department",
            Self::District => "District",
            Self::Region => "Region",
            Self::AdministrativeArea1 => "AdministrativeArea1",
            Self::AdministrativeArea2 => "AdministrativeArea2",
            Self::AdministrativeArea3 => "AdministrativeArea3",
            Self::EurostatNUTS1 => "EurostatNUTS1",
            Self::EurostatNUTS2 => "EurostatNUTS2",
            Self::EurostatNUTS3 => "EurostatNUTS3",
        }
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceType {
    type Err = DetectionError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|pt| pt.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DetectionError::UnknownPlaceType(raw.to_string()))
    }
}
