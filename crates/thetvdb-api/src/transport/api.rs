//! `Transport` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::Result;

use super::options::{ApiResponse, HttpMethod, RequestOptions};

/// Transport trait.
///
/// Abstracts the HTTP call so extensions can be exercised against a stub.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Performs an API call and decodes the body as JSON.
    ///
    /// The body is decoded regardless of the status code because error
    /// responses are JSON as well.
    ///
    /// # Errors
    ///
    /// - `RequestFailed` if the call cannot complete.
    /// - `InvalidJsonInResponse` if a successful response is not JSON.
    /// - `Unauthorized` / `RequestFailed` for non-2xx responses when
    ///   `options.http_errors` is set, or when the body is not JSON.
    async fn call_json(
        &self,
        method: HttpMethod,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse>;
}
