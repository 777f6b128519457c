//! Typed client library for TheTVDB API v2.
//!
//! Every call follows the same path: an extension method builds request
//! options, the [`transport`] performs the HTTP call, and the
//! [`response::ResponseHandler`] turns the JSON envelope into a model or a
//! typed [`Error`].

/// Client facade and builder.
pub mod client;
/// Error taxonomy.
pub mod error;
/// Per-resource-group API operations.
pub mod extension;
/// Response models.
pub mod model;
/// Envelope interpretation and per-method payload decoding.
pub mod response;
/// HTTP transport.
pub mod transport;

pub use client::{TvdbClient, TvdbClientBuilder};
pub use error::{Error, ErrorKind, FieldError, Result};
