/// Network adapters for the registry REST API
mod companies_house_officers;
mod companies_house_search;
mod rate_limited_client;
mod reqwest_transport;

pub use companies_house_officers::{CompaniesHouseOfficers, OFFICERS_PAGE_SIZE};
pub use companies_house_search::{
    CompaniesHouseSearch, DEFAULT_MAX_RESULTS, DEFAULT_PAGE_SIZE, SEARCH_ENDPOINT,
};
pub use rate_limited_client::{RateLimitedClient, DEFAULT_RETRY_BACKOFF};
pub use reqwest_transport::{ReqwestTransport, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
