//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every handler's `utoipa::path` annotation. Swagger UI
//! serves it in debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{AccountProfile, College, Direction, Error, ErrorCode, GuideReply, Location};
use crate::inbound::http::auth::CredentialsRequest;
use crate::inbound::http::guide::GuideRequest;
use crate::inbound::http::health::HealthStatus;

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login or /api/auth/register.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus Guide API",
        description = "Campus location lookup, conversational guide replies, and account sessions."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::locations::list_locations,
        crate::inbound::http::locations::get_college,
        crate::inbound::http::guide::ask,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::current_user,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Location,
        Direction,
        College,
        GuideRequest,
        GuideReply,
        CredentialsRequest,
        AccountProfile,
        HealthStatus,
    )),
    tags(
        (name = "campus", description = "Campus locations and the guide chat"),
        (name = "auth", description = "Registration and sign-in"),
        (name = "users", description = "Signed-in account"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;
