//! Request dispatch and the response envelope.

mod dispatch;
mod http_mapping;
mod types;

pub use dispatch::{dispatch, reject, Dispatched, Route, EMAIL_PARAM};
pub use http_mapping::{error_status_code, success_status_code};
pub use types::{ApiRequest, ApiResponse, ErrorBody};
