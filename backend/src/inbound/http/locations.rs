//! Read-only campus data.
//!
//! ```text
//! GET /api/locations
//! GET /api/college
//! ```

use actix_web::{get, web};

use crate::domain::{College, Error, Location};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Every campus location in seed order.
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Campus locations", body = [Location]),
        (status = 500, description = "Location store failure or internal error", body = Error)
    ),
    tags = ["campus"],
    operation_id = "listLocations"
)]
#[get("/locations")]
pub async fn list_locations(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Location>>> {
    state.guide.locations().await.map(web::Json)
}

/// The college record, or `null` before seeding.
#[utoipa::path(
    get,
    path = "/api/college",
    responses(
        (status = 200, description = "College record or null", body = Option<College>),
        (status = 500, description = "Location store failure or internal error", body = Error)
    ),
    tags = ["campus"],
    operation_id = "getCollege"
)]
#[get("/college")]
pub async fn get_college(state: web::Data<HttpState>) -> ApiResult<web::Json<Option<College>>> {
    state.guide.college().await.map(web::Json)
}
