//! PostgreSQL-backed location store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::info;

use crate::domain::ports::{LocationRepository, LocationRepositoryError};
use crate::domain::{CampusSeed, College, Location};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CollegeRow, LocationRow, NewLocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{college, locations};

/// Diesel implementation of [`LocationRepository`].
#[derive(Clone)]
pub struct DieselLocationRepository {
    pool: DbPool,
}

impl DieselLocationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> LocationRepositoryError {
    map_pool_error(error, LocationRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> LocationRepositoryError {
    map_diesel_error(
        error,
        LocationRepositoryError::query,
        LocationRepositoryError::connection,
    )
}

#[async_trait]
impl LocationRepository for DieselLocationRepository {
    async fn list_locations(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<LocationRow> = locations::table
            .order(locations::position.asc())
            .select(LocationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(LocationRepositoryError::query))
            .collect()
    }

    async fn get_college(&self) -> Result<Option<College>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<CollegeRow> = college::table
            .find(College::SINGLETON_ID)
            .select(CollegeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(|row| row.into_domain().map_err(LocationRepositoryError::query))
            .transpose()
    }

    async fn reseed(&self, seed: &CampusSeed) -> Result<(), LocationRepositoryError> {
        let location_rows = seed
            .locations
            .iter()
            .enumerate()
            .map(|(index, location)| {
                i32::try_from(index)
                    .map(|position| NewLocationRow::from_domain(position, location))
                    .map_err(|_| LocationRepositoryError::query("too many seed locations"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let college_row = CollegeRow::from_domain(&seed.college);
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let inserted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(locations::table).execute(conn).await?;
                    let inserted = diesel::insert_into(locations::table)
                        .values(&location_rows)
                        .execute(conn)
                        .await?;
                    diesel::insert_into(college::table)
                        .values(&college_row)
                        .on_conflict(college::id)
                        .do_update()
                        .set((
                            college::name.eq(excluded(college::name)),
                            college::lat.eq(excluded(college::lat)),
                            college::lng.eq(excluded(college::lng)),
                        ))
                        .execute(conn)
                        .await?;
                    Ok(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        info!(locations = inserted, "location store reseeded");
        Ok(())
    }
}
