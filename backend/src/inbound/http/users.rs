//! Signed-in account lookup.
//!
//! ```text
//! GET /api/users/me
//! ```

use actix_web::{get, web};

use crate::domain::{AccountProfile, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Profile of the account behind the session cookie.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current account", body = AccountProfile),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountProfile>> {
    let id = session.require_user_id()?;
    let account = state.accounts.profile(&id).await?;
    Ok(web::Json(AccountProfile::from(&account)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::ports::{MockAccountCommand, MockCampusGuideQuery};
    use crate::domain::{Account, Email, UserId};
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use chrono::Utc;
    use serde_json::Value;

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn app_state(accounts: MockAccountCommand) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(MockCampusGuideQuery::new()),
            Arc::new(accounts),
        ))
    }

    #[actix_web::test]
    async fn anonymous_callers_are_unauthorised() {
        let mut accounts = MockAccountCommand::new();
        accounts.expect_profile().never();
        let app = actix_test::init_service(
            App::new()
                .app_data(app_state(accounts))
                .wrap(test_session_middleware())
                .service(web::scope("/api").service(current_user)),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/api/users/me").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn returns_the_session_account() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_profile()
            .withf(|id| id.to_string() == FIXTURE_ID)
            .times(1)
            .returning(|id| {
                Ok(Account {
                    id: *id,
                    email: Email::new("me@campus.edu").expect("valid email"),
                    password_hash: "pbkdf2-sha256$1$00$00".to_owned(),
                    created_at: Utc::now(),
                })
            });
        let app = actix_test::init_service(
            App::new()
                .app_data(app_state(accounts))
                .wrap(test_session_middleware())
                .route(
                    "/sign-in",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::new(FIXTURE_ID).expect("fixture id");
                        session.persist_user(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .service(web::scope("/api").service(current_user)),
        )
        .await;
        let signed_in =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/sign-in").to_request()).await;
        let cookie = signed_in
            .response()
            .cookies()
            .next()
            .map(|cookie| cookie.into_owned())
            .expect("session cookie");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["id"], FIXTURE_ID);
        assert_eq!(body["email"], "me@campus.edu");
    }
}
