//! Response interpretation.
//!
//! [`ResponseHandler`] validates the envelope every endpoint shares and
//! maps API-reported failures to typed errors. Payload decoding is left
//! to the [`method`] tag, so endpoint-specific shapes stay out of the
//! envelope checks.

pub mod method;

use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::error::{Error, FieldError, Result};
use crate::transport::ApiResponse;

pub use method::ApiMethod;

/// Envelope key carrying an API error string.
const ERROR_KEY: &str = "Error";

/// Envelope key carrying field-level validation errors.
const ERRORS_KEY: &str = "errors";

/// Single-shot interpreter for one API response.
#[derive(Debug, Clone)]
pub struct ResponseHandler<M> {
    body: Value,
    status: StatusCode,
    method: M,
}

impl<M: ApiMethod> ResponseHandler<M> {
    /// Creates a handler for a decoded body, assuming HTTP 200.
    pub const fn create(body: Value, method: M) -> Self {
        Self {
            body,
            status: StatusCode::OK,
            method,
        }
    }

    /// Creates a handler from a transport response, keeping its status.
    pub fn from_response(response: ApiResponse, method: M) -> Self {
        Self {
            body: response.body,
            status: response.status,
            method,
        }
    }

    /// Overrides the HTTP status used for classification.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Classifies the response and decodes the payload.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` on HTTP 401.
    /// - `InvalidJsonInResponse` if the body is not an object, the payload
    ///   field is missing, or the payload does not fit the method's shape.
    /// - `RequestFailed` if the body has an `Error` field or the status is
    ///   not 2xx.
    /// - `InvalidArgument` if the body has a non-empty `errors` field.
    pub fn handle(self) -> Result<M::Output> {
        let tag = M::TAG;

        if self.status == StatusCode::UNAUTHORIZED {
            let reason = api_error_message(&self.body).unwrap_or_else(|| String::from("HTTP 401"));
            tracing::warn!(method = tag, %reason, "TheTVDB API refused authorization");
            return Err(Error::unauthorized(reason));
        }

        let mut envelope = match self.body {
            Value::Object(envelope) => envelope,
            other => {
                return Err(Error::invalid_json_in_response(format!(
                    "{tag}: expected a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        if let Some(reason) = error_field(&envelope) {
            tracing::warn!(method = tag, status = %self.status, %reason, "TheTVDB API error");
            return Err(Error::request_failed(reason));
        }

        let field_errors = envelope.get(ERRORS_KEY).map(parse_field_errors).unwrap_or_default();
        if !field_errors.is_empty() {
            tracing::warn!(
                method = tag,
                status = %self.status,
                count = field_errors.len(),
                "TheTVDB API rejected arguments"
            );
            return Err(Error::invalid_fields(field_errors));
        }

        if !self.status.is_success() {
            tracing::warn!(method = tag, status = %self.status, "TheTVDB API error status");
            return Err(Error::request_failed(format!("HTTP {}", self.status)));
        }

        let Some(payload) = envelope.remove(M::PAYLOAD_KEY) else {
            return Err(Error::invalid_json_in_response(format!(
                "{tag}: missing `{}` field",
                M::PAYLOAD_KEY
            )));
        };

        let output = self.method.decode(payload, &envelope)?;
        tracing::debug!(method = tag, "TheTVDB API response decoded");
        Ok(output)
    }
}

/// Returns the `Error` string of an envelope, if any.
pub(crate) fn api_error_message(body: &Value) -> Option<String> {
    body.as_object().and_then(error_field)
}

/// A `null` `Error` field means no error.
fn error_field(envelope: &Map<String, Value>) -> Option<String> {
    envelope
        .get(ERROR_KEY)
        .filter(|value| !value.is_null())
        .map(error_string)
}

/// Renders an `Error` value; non-strings are kept as compact JSON.
fn error_string(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), String::from)
}

/// Flattens the shapes the API uses for `errors` into field/message pairs.
///
/// Accepts `[{"field", "message"}]`, `{"field": "msg" | ["msg", ...]}` and
/// bare strings. Nothing is dropped except `null`.
fn parse_field_errors(value: &Value) -> Vec<FieldError> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().flat_map(parse_field_error_item).collect(),
        Value::Object(map) => parse_field_error_map(map),
        other => vec![FieldError::new("", error_string(other))],
    }
}

/// One element of an `errors` array.
fn parse_field_error_item(item: &Value) -> Vec<FieldError> {
    match item {
        Value::Null => Vec::new(),
        Value::Object(map) if map.contains_key("message") || map.contains_key("field") => {
            let field = map.get("field").map(error_string).unwrap_or_default();
            let message = map.get("message").map(error_string).unwrap_or_default();
            vec![FieldError::new(field, message)]
        }
        Value::Object(map) => parse_field_error_map(map),
        other => vec![FieldError::new("", error_string(other))],
    }
}

/// An `errors` object keyed by field name.
fn parse_field_error_map(map: &Map<String, Value>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (field, messages) in map {
        match messages {
            Value::Null => {}
            Value::Array(list) => errors.extend(
                list.iter()
                    .filter(|m| !m.is_null())
                    .map(|m| FieldError::new(field.as_str(), error_string(m))),
            ),
            other => errors.push(FieldError::new(field.as_str(), error_string(other))),
        }
    }
    errors
}

/// JSON type name for error messages.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
