use std::num::NonZeroU32;
use std::time::Duration;

/// Timing and retry policy for the schedule download loop.
///
/// The defaults reproduce the production contract: a fixed 20-second wait
/// between retries of a failed schedule request, no retry ceiling (the fetch
/// keeps trying until the service answers), a 1-second pause between
/// processed dates, and a 30-second per-request HTTP timeout. Tests shrink
/// the delays; callers that want bounded retries set `max_attempts`.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Wait between attempts after a transport failure on a schedule request.
    pub retry_delay: Duration,
    /// Pause after each processed date, to avoid hammering the service.
    pub request_delay: Duration,
    /// Retry ceiling per schedule request. `None` retries indefinitely.
    pub max_attempts: Option<NonZeroU32>,
    /// Per-request HTTP timeout. A timeout counts as a transport failure.
    pub http_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(20),
            request_delay: Duration::from_secs(1),
            max_attempts: None,
            http_timeout: Duration::from_secs(30),
        }
    }
}
