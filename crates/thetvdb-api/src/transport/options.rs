//! Request options and the raw response handed to the response handler.

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Per-request options.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// Query string pairs, in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON request body.
    pub json: Option<Value>,
    /// Header overrides applied after the default headers.
    pub headers: Vec<(String, String)>,
    /// Fail on non-2xx responses inside the transport (default: `true`).
    pub http_errors: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            query: Vec::new(),
            json: None,
            headers: Vec::new(),
            http_errors: true,
        }
    }
}

impl RequestOptions {
    /// Creates empty options with `http_errors` enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query pair.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Adds a header override.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Enables or disables failing on non-2xx inside the transport.
    #[must_use]
    pub const fn http_errors(mut self, enabled: bool) -> Self {
        self.http_errors = enabled;
        self
    }

    /// Returns the value of the first query pair named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and decoded body of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Decoded JSON body (`Value::Null` for an empty body).
    pub body: Value,
}

impl ApiResponse {
    /// Creates a response.
    #[must_use]
    pub const fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}
