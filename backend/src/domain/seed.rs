//! Fixed campus data written to the location store on every boot.
//!
//! Order matters: the classifier returns the first location whose id or name
//! appears in a query, so earlier entries win ties.

use super::location::{College, Direction, Location, LocationId, LocationValidationError};

struct SeedLocation {
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    direction: Direction,
}

const SEED_LOCATIONS: &[SeedLocation] = &[
    SeedLocation {
        id: "canteen",
        name: "Canteen",
        lat: 21.0052,
        lng: 79.0480,
        direction: Direction::Northern,
    },
    SeedLocation {
        id: "library",
        name: "Library",
        lat: 21.0045,
        lng: 79.0482,
        direction: Direction::Eastern,
    },
    SeedLocation {
        id: "auditorium",
        name: "Auditorium",
        lat: 21.0040,
        lng: 79.0478,
        direction: Direction::Southern,
    },
    SeedLocation {
        id: "sports-complex",
        name: "Sports Complex",
        lat: 21.0055,
        lng: 79.0470,
        direction: Direction::Northwestern,
    },
    SeedLocation {
        id: "admin-block",
        name: "Admin Block",
        lat: 21.0048,
        lng: 79.0473,
        direction: Direction::Central,
    },
];

const COLLEGE_NAME: &str = "St. Vincent Pallotti College of Engineering and Technology";
const COLLEGE_LAT: f64 = 21.0047;
const COLLEGE_LNG: f64 = 79.0476;

/// Everything a reseed writes: the ordered location list and the college.
#[derive(Debug, Clone, PartialEq)]
pub struct CampusSeed {
    pub locations: Vec<Location>,
    pub college: College,
}

impl CampusSeed {
    /// The built-in campus.
    pub fn builtin() -> Result<Self, LocationValidationError> {
        let locations = SEED_LOCATIONS
            .iter()
            .map(|entry| {
                Location::new(
                    LocationId::new(entry.id)?,
                    entry.name,
                    entry.lat,
                    entry.lng,
                    entry.direction,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let college = College::new(COLLEGE_NAME, COLLEGE_LAT, COLLEGE_LNG)?;
        Ok(Self { locations, college })
    }
}
