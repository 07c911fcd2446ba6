//! Account sign-up and sign-in.
//!
//! ```text
//! POST /api/auth/register {"email":"student@campus.edu","password":"correct horse"}
//! POST /api/auth/login    {"email":"student@campus.edu","password":"correct horse"}
//! POST /api/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{AccountProfile, Credentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body shared by register and login.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "student@campus.edu")]
    pub email: String,
    #[schema(value_type = String, example = "correct horse")]
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::Email(_) => "email",
        CredentialsValidationError::EmptyPassword
        | CredentialsValidationError::PasswordTooShort { .. } => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = AccountProfile,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid email or password", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::for_registration(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let account = state.accounts.register(&credentials).await?;
    session.persist_user(&account.id)?;
    Ok(HttpResponse::Created().json(AccountProfile::from(&account)))
}

/// Sign in with an existing account.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = AccountProfile,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<AccountProfile>> {
    let credentials = Credentials::for_login(&payload.email, &payload.password)
        .map_err(map_credentials_error)?;
    let account = state.accounts.verify(&credentials).await?;
    session.persist_user(&account.id)?;
    Ok(web::Json(AccountProfile::from(&account)))
}

/// Forget the session. Succeeds whether or not anyone was signed in.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::ports::{MockAccountCommand, MockCampusGuideQuery};
    use crate::domain::{Account, Email, UserId};
    use crate::inbound::http::session::SESSION_COOKIE_NAME;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::Value;

    fn account(email: &str) -> Account {
        Account {
            id: UserId::random(),
            email: Email::new(email).expect("valid email"),
            password_hash: "pbkdf2-sha256$1$00$00".to_owned(),
            created_at: Utc::now(),
        }
    }

    async fn call(accounts: MockAccountCommand, uri: &str, body: Value) -> ServiceResponse {
        let state = web::Data::new(HttpState::new(
            Arc::new(MockCampusGuideQuery::new()),
            Arc::new(accounts),
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .wrap(test_session_middleware())
                .service(
                    web::scope("/api/auth")
                        .service(register)
                        .service(login)
                        .service(logout),
                ),
        )
        .await;
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri(uri).set_json(body).to_request(),
        )
        .await
    }

    fn has_session_cookie(res: &ServiceResponse) -> bool {
        res.response()
            .cookies()
            .any(|cookie| cookie.name() == SESSION_COOKIE_NAME && !cookie.value().is_empty())
    }

    #[actix_web::test]
    async fn register_creates_account_and_session() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_register()
            .withf(|credentials| credentials.email().as_ref() == "new@campus.edu")
            .times(1)
            .returning(|credentials| Ok(account(credentials.email().as_ref())));

        let res = call(
            accounts,
            "/api/auth/register",
            json!({ "email": "New@Campus.edu", "password": "long enough" }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        assert!(has_session_cookie(&res));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["email"], "new@campus.edu");
        assert!(body.get("passwordHash").is_none());
        assert!(body.get("password_hash").is_none());
    }

    #[rstest]
    #[case(json!({ "email": "", "password": "long enough" }), "email")]
    #[case(json!({ "email": "nobody", "password": "long enough" }), "email")]
    #[case(json!({ "email": "a@b.c", "password": "short" }), "password")]
    #[case(json!({ "email": "a@b.c", "password": "" }), "password")]
    #[actix_web::test]
    async fn register_validates_before_the_store(#[case] body: Value, #[case] field: &str) {
        let mut accounts = MockAccountCommand::new();
        accounts.expect_register().never();

        let res = call(accounts, "/api/auth/register", body).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn duplicate_registration_conflicts() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_register()
            .returning(|_| Err(Error::conflict("email is already registered")));

        let res = call(
            accounts,
            "/api/auth/register",
            json!({ "email": "dup@campus.edu", "password": "long enough" }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert!(!has_session_cookie(&res));
    }

    #[actix_web::test]
    async fn login_accepts_short_existing_passwords() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_verify()
            .withf(|credentials| credentials.password() == "short")
            .returning(|credentials| Ok(account(credentials.email().as_ref())));

        let res = call(
            accounts,
            "/api/auth/login",
            json!({ "email": "old@campus.edu", "password": "short" }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(has_session_cookie(&res));
    }

    #[actix_web::test]
    async fn bad_credentials_are_unauthorised() {
        let mut accounts = MockAccountCommand::new();
        accounts
            .expect_verify()
            .returning(|_| Err(Error::unauthorized("invalid credentials")));

        let res = call(
            accounts,
            "/api/auth/login",
            json!({ "email": "old@campus.edu", "password": "wrong password" }),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "invalid credentials");
    }

    #[actix_web::test]
    async fn logout_without_session_is_no_content() {
        let res = call(MockAccountCommand::new(), "/api/auth/logout", json!({})).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
