//! Browser origin allow-list.
//!
//! Origins are parsed up front so a typo in configuration fails at startup
//! instead of silently blocking the web client.

use actix_cors::Cors;
use actix_web::http::{Method, header};
use tracing::warn;
use url::Url;

const MAX_AGE_SECS: usize = 60 * 60;

/// Error raised for an origin that is not a bare `scheme://host[:port]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CORS origin '{origin}': {reason}")]
pub struct OriginError {
    pub origin: String,
    pub reason: String,
}

/// Normalise configured origins into `scheme://host[:port]` form.
pub fn parse_origins<I, S>(raw: I) -> Result<Vec<String>, OriginError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|entry| entry.as_ref().trim().to_owned())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = |reason: &str| OriginError {
                origin: entry.clone(),
                reason: reason.to_owned(),
            };
            let url = Url::parse(&entry).map_err(|err| invalid(&err.to_string()))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(invalid("scheme must be http or https"));
            }
            if url.host_str().is_none() {
                return Err(invalid("missing host"));
            }
            if url.path() != "/" || url.query().is_some() {
                return Err(invalid("origins carry no path or query"));
            }
            Ok(url.origin().ascii_serialization())
        })
        .collect()
}

/// CORS middleware for the given normalised origins.
///
/// Only `GET` and `POST` with `Content-Type` and `Authorization` headers are
/// allowed, and cookies are forwarded.
pub fn cors_middleware(origins: &[String]) -> Cors {
    if origins.is_empty() {
        warn!("no CORS origins configured; browser clients will be rejected");
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([Method::GET, Method::POST])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(MAX_AGE_SECS)
}
