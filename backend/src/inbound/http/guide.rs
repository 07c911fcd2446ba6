//! Conversational endpoint.
//!
//! ```text
//! POST /api/campus-guide {"query":"where is the canteen"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, GuideQuery, GuideQueryError, GuideReply};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/campus-guide`.
///
/// `query` is optional at the schema level so a missing field produces the
/// same error as a blank one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GuideRequest {
    #[serde(default)]
    #[schema(example = "How do I get to the canteen?")]
    pub query: Option<String>,
}

impl TryFrom<GuideRequest> for GuideQuery {
    type Error = GuideQueryError;

    fn try_from(value: GuideRequest) -> Result<Self, Self::Error> {
        GuideQuery::new(value.query.unwrap_or_default())
    }
}

fn map_query_error(err: GuideQueryError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": "query" }))
}

/// Answer a campus question.
///
/// Completion failures are absorbed into canned replies, so the only error
/// paths are validation and the location store.
#[utoipa::path(
    post,
    path = "/api/campus-guide",
    request_body = GuideRequest,
    responses(
        (status = 200, description = "Guide reply", body = GuideReply),
        (status = 400, description = "Query is required", body = Error),
        (status = 500, description = "Location store failure or internal error", body = Error)
    ),
    tags = ["campus"],
    operation_id = "askCampusGuide"
)]
#[post("/campus-guide")]
pub async fn ask(
    state: web::Data<HttpState>,
    payload: web::Json<GuideRequest>,
) -> ApiResult<web::Json<GuideReply>> {
    let query = GuideQuery::try_from(payload.into_inner()).map_err(map_query_error)?;
    state.guide.answer(&query).await.map(web::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::CampusSeed;
    use crate::domain::ports::{MockAccountCommand, MockCampusGuideQuery};
    use crate::inbound::http::error::json_error_handler;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    async fn post(guide: MockCampusGuideQuery, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let state = web::Data::new(HttpState::new(
            Arc::new(guide),
            Arc::new(MockAccountCommand::new()),
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .service(web::scope("/api").service(ask)),
        )
        .await;
        let res = actix_test::call_service(&app, request.uri("/api/campus-guide").to_request()).await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[rstest]
    #[case(json!({ "query": "" }))]
    #[case(json!({ "query": "   " }))]
    #[case(json!({}))]
    #[case(json!({ "query": null }))]
    #[actix_web::test]
    async fn blank_queries_are_rejected(#[case] body: Value) {
        let mut guide = MockCampusGuideQuery::new();
        guide.expect_answer().never();

        let (status, body) = post(guide, actix_test::TestRequest::post().set_json(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["message"], "Query is required");
        assert_eq!(body["details"]["field"], "query");
    }

    #[actix_web::test]
    async fn non_json_bodies_are_rejected() {
        let mut guide = MockCampusGuideQuery::new();
        guide.expect_answer().never();
        let request = actix_test::TestRequest::post()
            .insert_header(("content-type", "application/json"))
            .set_payload("query=canteen");

        let (status, body) = post(guide, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn forwards_the_trimmed_query() {
        let canteen = CampusSeed::builtin()
            .expect("seed is valid")
            .locations
            .into_iter()
            .find(|location| location.id().as_str() == "canteen")
            .expect("canteen seeded");
        let mut guide = MockCampusGuideQuery::new();
        guide
            .expect_answer()
            .withf(|query| query.as_str() == "where is the canteen")
            .times(1)
            .returning(move |_| {
                Ok(GuideReply {
                    message: "Head north.".to_owned(),
                    show_map: true,
                    location: Some(canteen.clone()),
                })
            });

        let (status, body) = post(
            guide,
            actix_test::TestRequest::post().set_json(json!({ "query": "  where is the canteen  " })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Head north.");
        assert_eq!(body["showMap"], true);
        assert_eq!(body["location"]["id"], "canteen");
    }

    #[actix_web::test]
    async fn replies_without_location_omit_the_field() {
        let mut guide = MockCampusGuideQuery::new();
        guide.expect_answer().returning(|_| {
            Ok(GuideReply {
                message: "Hello!".to_owned(),
                show_map: false,
                location: None,
            })
        });

        let (_, body) = post(guide, actix_test::TestRequest::post().set_json(json!({ "query": "hi" }))).await;

        assert_eq!(body["showMap"], false);
        assert!(body.get("location").is_none());
    }
}
