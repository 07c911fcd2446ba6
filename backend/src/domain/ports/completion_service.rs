//! Port for the external text-completion service.
//!
//! Replies that embed generated text go through this port. Every failure is
//! typed so the guide service can log the cause before falling back to canned
//! text; none of them ever reach the client.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised while requesting a completion.
    pub enum CompletionServiceError {
        /// The request could not be sent or the connection dropped.
        Transport { message: String } => "completion transport failed: {message}",
        /// The request exceeded its deadline.
        Timeout { message: String } => "completion request timed out: {message}",
        /// The provider rejected the request for quota or rate reasons.
        RateLimited { message: String } => "completion provider rate limited the request: {message}",
        /// The provider returned an unexpected HTTP status.
        Status { status: u16, message: String } =>
            "completion provider returned status {status}: {message}",
        /// The provider response could not be interpreted.
        Decode { message: String } => "completion response could not be decoded: {message}",
        /// No provider is configured.
        Disabled => "completion service is disabled",
    }
}

/// Generates free text for a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Produce a completion for `prompt`. Performs at most one upstream call.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionServiceError>;
}

/// Completion service used when no provider credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCompletionService;

#[async_trait]
impl CompletionService for DisabledCompletionService {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionServiceError> {
        Err(CompletionServiceError::disabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_service_always_fails() {
        let result = DisabledCompletionService.complete("anything").await;
        assert_eq!(result, Err(CompletionServiceError::Disabled));
    }

    #[test]
    fn status_errors_render_code() {
        let err = CompletionServiceError::status(503_u16, "busy");
        assert_eq!(
            err.to_string(),
            "completion provider returned status 503: busy"
        );
    }
}
