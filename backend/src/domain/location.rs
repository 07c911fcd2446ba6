//! Campus locations and the college they belong to.
//!
//! Locations are read-only reference data: the store is rebuilt from the seed
//! list on every boot and handlers only ever read it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::slug::is_valid_slug;

/// Validation errors raised while constructing location values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationValidationError {
    #[error("location id must be a lowercase slug, got {0:?}")]
    InvalidId(String),
    #[error("location name must not be empty")]
    EmptyName,
    #[error("unknown compass direction {0:?}")]
    UnknownDirection(String),
    #[error("coordinates out of range: lat {lat}, lng {lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
    #[error("college id must be {expected}, got {0}", expected = College::SINGLETON_ID)]
    UnexpectedCollegeId(i32),
}

/// Stable slug identifying a location.
///
/// The id doubles as a matching token when classifying queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationId(String);

impl LocationId {
    /// Validate and wrap a slug.
    pub fn new(id: impl Into<String>) -> Result<Self, LocationValidationError> {
        let id = id.into();
        if is_valid_slug(&id) {
            Ok(Self(id))
        } else {
            Err(LocationValidationError::InvalidId(id))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LocationId> for String {
    fn from(value: LocationId) -> Self {
        value.0
    }
}

impl TryFrom<String> for LocationId {
    type Error = LocationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Coarse compass label describing where a location sits on campus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Northern,
    Southern,
    Eastern,
    Western,
    Northeastern,
    Northwestern,
    Southeastern,
    Southwestern,
    Central,
}

impl Direction {
    /// Lowercase word used in storage, JSON, and reply text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Northern => "northern",
            Self::Southern => "southern",
            Self::Eastern => "eastern",
            Self::Western => "western",
            Self::Northeastern => "northeastern",
            Self::Northwestern => "northwestern",
            Self::Southeastern => "southeastern",
            Self::Southwestern => "southwestern",
            Self::Central => "central",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = LocationValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let direction = match s {
            "northern" => Self::Northern,
            "southern" => Self::Southern,
            "eastern" => Self::Eastern,
            "western" => Self::Western,
            "northeastern" => Self::Northeastern,
            "northwestern" => Self::Northwestern,
            "southeastern" => Self::Southeastern,
            "southwestern" => Self::Southwestern,
            "central" => Self::Central,
            other => return Err(LocationValidationError::UnknownDirection(other.to_owned())),
        };
        Ok(direction)
    }
}

fn check_coordinates(lat: f64, lng: f64) -> Result<(), LocationValidationError> {
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Ok(())
    } else {
        Err(LocationValidationError::InvalidCoordinates { lat, lng })
    }
}

/// Named campus point of interest.
///
/// Serialises as `{ id, name, lat, lng, direction }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "LocationFields")]
pub struct Location {
    #[schema(value_type = String, example = "canteen")]
    id: LocationId,
    #[schema(example = "Canteen")]
    name: String,
    #[schema(example = 21.0052)]
    lat: f64,
    #[schema(example = 79.048)]
    lng: f64,
    direction: Direction,
}

#[derive(Deserialize)]
struct LocationFields {
    id: LocationId,
    name: String,
    lat: f64,
    lng: f64,
    direction: Direction,
}

impl TryFrom<LocationFields> for Location {
    type Error = LocationValidationError;

    fn try_from(fields: LocationFields) -> Result<Self, Self::Error> {
        Self::new(fields.id, fields.name, fields.lat, fields.lng, fields.direction)
    }
}

impl Location {
    /// Build a location after checking the name and coordinates.
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        lat: f64,
        lng: f64,
        direction: Direction,
    ) -> Result<Self, LocationValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LocationValidationError::EmptyName);
        }
        check_coordinates(lat, lng)?;
        Ok(Self {
            id,
            name,
            lat,
            lng,
            direction,
        })
    }

    pub fn id(&self) -> &LocationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// The college hosting the campus. There is exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "CollegeFields")]
pub struct College {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "St. Vincent Pallotti College of Engineering and Technology")]
    name: String,
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct CollegeFields {
    id: i32,
    name: String,
    lat: f64,
    lng: f64,
}

impl TryFrom<CollegeFields> for College {
    type Error = LocationValidationError;

    fn try_from(fields: CollegeFields) -> Result<Self, Self::Error> {
        if fields.id != Self::SINGLETON_ID {
            return Err(LocationValidationError::UnexpectedCollegeId(fields.id));
        }
        Self::new(fields.name, fields.lat, fields.lng)
    }
}

impl College {
    /// Row id of the singleton college record.
    pub const SINGLETON_ID: i32 = 1;

    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Result<Self, LocationValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LocationValidationError::EmptyName);
        }
        check_coordinates(lat, lng)?;
        Ok(Self {
            id: Self::SINGLETON_ID,
            name,
            lat,
            lng,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}
