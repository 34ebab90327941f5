/// Web adapter: the axum HTTP front end
mod error_response;
mod routes;

pub use error_response::ApiError;
pub use routes::{router, AppState, EXPORT_ROWS_HEADER, EXPORT_TRUNCATED_HEADER};
