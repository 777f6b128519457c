//! Per-resource-group API operations.
//!
//! Each extension borrows a transport and exposes the endpoints of one
//! resource group. Requests are sent with `http_errors(false)` so that the
//! [`ResponseHandler`] sees every body and classifies failures in one place.

mod authentication;
mod episodes;
mod languages;
mod search;
mod series;
mod updates;
mod users;

pub use authentication::AuthenticationExtension;
pub use episodes::EpisodesExtension;
pub use languages::LanguagesExtension;
pub use search::SearchExtension;
pub use series::SeriesExtension;
pub use updates::UpdatesExtension;
pub use users::UsersExtension;

use crate::error::Result;
use crate::response::{ApiMethod, ResponseHandler};
use crate::transport::{ApiResponse, HttpMethod, LocalTransport, RequestOptions};

/// Sends a request with HTTP error handling left to the response handler.
async fn send<T: LocalTransport>(
    transport: &T,
    method: HttpMethod,
    path: &str,
    options: RequestOptions,
) -> Result<ApiResponse> {
    transport
        .call_json(method, path, &options.http_errors(false))
        .await
}

/// Sends a request and decodes it with `tag`.
async fn fetch<T: LocalTransport, M: ApiMethod>(
    transport: &T,
    method: HttpMethod,
    path: &str,
    options: RequestOptions,
    tag: M,
) -> Result<M::Output> {
    let response = send(transport, method, path, options).await?;
    ResponseHandler::from_response(response, tag).handle()
}
