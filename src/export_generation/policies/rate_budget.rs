use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Requests allowed per window by the registry API
pub const DEFAULT_MAX_REQUESTS: u32 = 600;

/// Length of the registry API's rate-limit window
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(300);

/// How many times `acquire` sleeps for a free slot before giving up
const MAX_BUDGET_WAITS: u32 = 2;

/// Limit and window length of a [`RateBudget`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

/// RateBudget policy tracking outbound calls over a rolling window
///
/// One budget is shared (through `Arc`) by every client using the same API
/// key, so concurrent exports throttle each other. Each counted call is kept
/// until it is a full window old, so no span of `window` length ever holds
/// more than `max_requests` calls.
///
/// The internal mutex is only held while counting, never across a sleep.
#[derive(Debug)]
pub struct RateBudget {
    settings: RateLimitSettings,
    issued: Mutex<VecDeque<Instant>>,
}

impl RateBudget {
    pub fn new(settings: RateLimitSettings) -> Self {
        Self {
            settings,
            issued: Mutex::new(VecDeque::new()),
        }
    }

    pub fn settings(&self) -> RateLimitSettings {
        self.settings
    }

    /// Requests still counted against the budget
    pub fn used(&self) -> u32 {
        u32::try_from(self.lock().len()).unwrap_or(u32::MAX)
    }

    /// Counts one request at `now` if the budget allows it
    ///
    /// # Returns
    /// `Ok(())` when the request was counted, or `Err(wait)` with the time
    /// left until the oldest counted request leaves the window
    pub fn try_acquire_at(&self, now: Instant) -> Result<(), Duration> {
        let mut issued = self.lock();
        let window = self.settings.window;

        while let Some(&oldest) = issued.front() {
            if now.saturating_duration_since(oldest) < window {
                break;
            }
            issued.pop_front();
        }

        if issued.len() >= self.settings.max_requests as usize {
            let wait = issued
                .front()
                .map(|&oldest| (oldest + window).saturating_duration_since(now))
                .unwrap_or(window);
            return Err(wait);
        }

        issued.push_back(now);
        Ok(())
    }

    /// Counts one request, sleeping until a slot frees up when exhausted
    ///
    /// # Returns
    /// `Err(wait)` if the budget is still exhausted after `MAX_BUDGET_WAITS`
    /// sleeps (other exports took the freed slots)
    pub async fn acquire(&self) -> Result<(), Duration> {
        let mut waits = 0;

        loop {
            let wait = match self.try_acquire_at(Instant::now()) {
                Ok(()) => return Ok(()),
                Err(wait) => wait,
            };

            if waits >= MAX_BUDGET_WAITS {
                return Err(wait);
            }
            waits += 1;

            tracing::warn!(
                limit = self.settings.max_requests,
                wait_secs = wait.as_secs_f64(),
                "Rate budget exhausted, waiting for a free slot"
            );
            tokio::time::sleep(wait).await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Instant>> {
        self.issued.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RateBudget {
    fn default() -> Self {
        Self::new(RateLimitSettings::default())
    }
}
