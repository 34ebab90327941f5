mod rate_budget;

pub use rate_budget::{RateBudget, RateLimitSettings, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};
