//! Correlation id attached to each request.
//!
//! The [`Trace`](crate::Trace) middleware mints one per request and keeps it
//! in a tokio task-local, where [`Error`](crate::domain::Error) constructors
//! and log lines read it back. A task started with `tokio::spawn` starts with
//! no id; wrap its future in [`TraceId::scope`] to carry the id over.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// UUID v4 shared by the logs, the `trace-id` response header and error
/// bodies of one request.
///
/// ```
/// use site_backend::TraceId;
///
/// fn log_submission(position: &str) {
///     let trace = TraceId::current().map(|id| id.to_string());
///     tracing::info!(position, trace_id = ?trace, "application received");
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the request being served, or `None` outside a request.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Runs `fut` with `trace_id` visible to [`TraceId::current`].
    ///
    /// ```
    /// use site_backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
