//! HTTP transport module.
//!
//! Performs one HTTP call per invocation and hands back the status code
//! together with the decoded JSON body, leaving interpretation to the
//! response handler.

mod api;
mod http;
mod options;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTransport, Transport};
#[allow(clippy::module_name_repetitions)]
pub use http::HttpTransport;
pub use options::{ApiResponse, HttpMethod, RequestOptions};
