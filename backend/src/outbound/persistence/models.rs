//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, college, locations};
use crate::domain::{Account, College, Direction, Email, Location, LocationId, UserId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub direction: String,
}

impl LocationRow {
    pub(crate) fn into_domain(self) -> Result<Location, String> {
        let id = LocationId::new(self.id).map_err(|err| err.to_string())?;
        let direction: Direction = self
            .direction
            .parse()
            .map_err(|err| format!("location {id}: {err}"))?;
        Location::new(id, self.name, self.lat, self.lng, direction).map_err(|err| err.to_string())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = locations)]
pub(crate) struct NewLocationRow<'a> {
    pub id: &'a str,
    pub position: i32,
    pub name: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub direction: &'static str,
}

impl<'a> NewLocationRow<'a> {
    pub(crate) fn from_domain(position: i32, location: &'a Location) -> Self {
        Self {
            id: location.id().as_str(),
            position,
            name: location.name(),
            lat: location.lat(),
            lng: location.lng(),
            direction: location.direction().as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = college)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CollegeRow {
    pub id: i32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl CollegeRow {
    pub(crate) fn from_domain(college: &College) -> Self {
        Self {
            id: college.id(),
            name: college.name().to_owned(),
            lat: college.lat(),
            lng: college.lng(),
        }
    }

    pub(crate) fn into_domain(self) -> Result<College, String> {
        College::new(self.name, self.lat, self.lng).map_err(|err| err.to_string())
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AccountRow {
    pub(crate) fn into_domain(self) -> Result<Account, String> {
        let email = Email::new(&self.email).map_err(|err| err.to_string())?;
        Ok(Account {
            id: UserId::from_uuid(self.id),
            email,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Account> for NewAccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            id: *account.id.as_uuid(),
            email: account.email.as_ref(),
            password_hash: account.password_hash.as_str(),
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(direction: &str) -> LocationRow {
        LocationRow {
            id: "library".to_owned(),
            name: "Library".to_owned(),
            lat: 21.0045,
            lng: 79.0482,
            direction: direction.to_owned(),
        }
    }

    #[rstest]
    fn location_row_converts_to_domain() {
        let location = row("eastern").into_domain().expect("valid row");
        assert_eq!(location.direction(), Direction::Eastern);
        assert_eq!(location.id().as_str(), "library");
    }

    #[rstest]
    fn unknown_direction_is_reported() {
        let error = row("up").into_domain().expect_err("invalid direction");
        assert!(error.contains("library"));
        assert!(error.contains("\"up\""));
    }

    #[rstest]
    fn new_row_preserves_position() {
        let location = row("eastern").into_domain().expect("valid row");
        let new_row = NewLocationRow::from_domain(3, &location);
        assert_eq!(new_row.position, 3);
        assert_eq!(new_row.direction, "eastern");
    }

    #[rstest]
    fn account_row_rejects_malformed_email() {
        let row = AccountRow {
            id: Uuid::new_v4(),
            email: "broken".to_owned(),
            password_hash: "x".to_owned(),
            created_at: Utc::now(),
        };
        assert!(row.into_domain().is_err());
    }
}
