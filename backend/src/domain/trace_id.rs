//! Correlation identifier carried by every request.
//!
//! The identifier lives in Tokio task-local storage so domain code can attach
//! it to errors and log lines without threading it through signatures. Task
//! locals do not follow `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] to keep the identifier visible.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Request-scoped trace identifier.
///
/// # Examples
/// ```
/// use campus_guide::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The identifier in scope for the running task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Borrow the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` installed as the current identifier.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn current_is_none_outside_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn scope_exposes_identifier() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn nested_scope_shadows_outer() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let observed = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;
        assert_eq!(observed, (Some(inner), Some(outer)));
    }

    #[rstest]
    #[case("00000000-0000-0000-0000-000000000000")]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn parses_and_displays_canonical_form(#[case] raw: &str) {
        let id: TraceId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    fn rejects_non_uuid_input() {
        assert!("not-a-trace".parse::<TraceId>().is_err());
    }

    #[rstest]
    fn from_uuid_keeps_value() {
        let uuid = Uuid::new_v4();
        assert_eq!(TraceId::from_uuid(uuid).as_uuid(), &uuid);
    }
}
