//! Middleware that scopes every request to a [`TraceId`].
//!
//! An inbound `trace-id` header holding a valid UUID is reused so callers can
//! correlate their own logs; otherwise a fresh identifier is minted. The
//! identifier is echoed on the response and installed as the task-local
//! [`TraceId::current`] for the lifetime of the handler.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Trace middleware factory.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use campus_guide::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn inbound_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_trace_id(&req).unwrap_or_else(TraceId::generate);
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = {
            let _entered = span.enter();
            self.service.call(req)
        };
        Box::pin(TraceId::scope(
            trace_id,
            async move {
                let mut res = fut.await?;
                debug!(status = res.status().as_u16(), "request completed");
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => warn!(%error, "trace identifier is not a valid header value"),
                }
                Ok(res)
            }
            .instrument(span),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    async fn call_with<F, Fut, Res>(
        handler: F,
        inbound: Option<&str>,
    ) -> (ServiceResponse<actix_web::body::BoxBody>, String)
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: std::future::Future<Output = Res> + 'static,
        Res: actix_web::Responder + 'static,
    {
        let app =
            actix_test::init_service(App::new().wrap(Trace).route("/", web::get().to(handler))).await;
        let mut req = actix_test::TestRequest::get().uri("/");
        if let Some(value) = inbound {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header")
            .to_owned();
        (res, header)
    }

    #[actix_web::test]
    async fn handler_sees_the_echoed_identifier() {
        let (res, header) = call_with(
            || async {
                let id = TraceId::current().expect("trace id in scope");
                HttpResponse::Ok().body(id.to_string())
            },
            None,
        )
        .await;
        let body = actix_test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8"), header);
    }

    #[actix_web::test]
    async fn reuses_valid_inbound_identifier() {
        let inbound = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let (_, header) = call_with(|| async { HttpResponse::Ok().finish() }, Some(inbound)).await;
        assert_eq!(header, inbound);
    }

    #[actix_web::test]
    async fn replaces_malformed_inbound_identifier() {
        let (_, header) = call_with(|| async { HttpResponse::Ok().finish() }, Some("nope")).await;
        assert_ne!(header, "nope");
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn errors_carry_the_request_identifier() {
        let (res, header) = call_with(
            || async { Err::<HttpResponse, _>(DomainError::not_found("missing")) },
            None,
        )
        .await;
        let body: DomainError = actix_test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(header.as_str()));
    }
}
