use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Client-side outbound budget applied before every upstream attempt.
///
/// Waits for a permit rather than failing, so it only ever delays a call.
#[derive(Clone)]
pub struct OutboundThrottle {
    limiter: Arc<DirectRateLimiter>,
    clock: DefaultClock,
    per_minute: u32,
}

impl std::fmt::Debug for OutboundThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundThrottle")
            .field("per_minute", &self.per_minute)
            .finish()
    }
}

impl OutboundThrottle {
    /// Allows `per_minute` calls per minute with a burst of the same size.
    pub fn per_minute(per_minute: NonZeroU32) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
            clock: DefaultClock::default(),
            per_minute: per_minute.get(),
        }
    }

    pub const fn limit_per_minute(&self) -> u32 {
        self.per_minute
    }

    /// Returns immediately when budget is available, otherwise the wait it would take.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        self.limiter
            .check()
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    pub async fn acquire(&self) {
        if let Err(wait) = self.try_acquire() {
            tracing::debug!(
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "outbound throttle engaged"
            );
            self.limiter.until_ready().await;
        }
    }
}
