//! `HttpTransport` - reqwest-backed transport implementation.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::LocalTransport;
use super::options::{ApiResponse, HttpMethod, RequestOptions};
use crate::error::{Error, Result};
use crate::model::Token;
use crate::response::api_error_message;

/// Number of body characters kept in error messages.
const BODY_PREVIEW_CHARS: usize = 200;

/// HTTP transport holding the connection pool and session headers.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct HttpTransport {
    /// HTTP client (shared connection pool).
    http_client: Client,
    /// Base URL, always ending in `/`.
    base_url: Url,
    /// Bearer token, if authenticated.
    token: Option<Token>,
    /// `Accept-Language` value.
    language: String,
    /// API version placed in the `Accept` media type.
    api_version: String,
}

impl HttpTransport {
    /// Creates a transport.
    pub(crate) const fn new(
        http_client: Client,
        base_url: Url,
        token: Option<Token>,
        language: String,
        api_version: String,
    ) -> Self {
        Self {
            http_client,
            base_url,
            token,
            language,
            api_version,
        }
    }

    /// Returns a transport sharing this connection pool but carrying `token`.
    #[must_use]
    pub fn with_token(&self, token: Token) -> Self {
        Self {
            token: Some(token),
            ..self.clone()
        }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Bearer token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Language sent as `Accept-Language`.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// `Accept` media type selecting the API version.
    fn accept_header(&self) -> String {
        format!("application/vnd.thetvdb.v{}", self.api_version)
    }

    /// Builds the request, applying session headers first and overrides last.
    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        options: &RequestOptions,
    ) -> Result<reqwest::Request> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::invalid_argument(format!("invalid request path {path}: {e}")))?;

        let mut builder = self
            .http_client
            .request(method.into(), url)
            .header(ACCEPT, self.accept_header())
            .header(ACCEPT_LANGUAGE, self.language.as_str());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.as_str());
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = &options.json {
            builder = builder.json(body);
        }

        let mut request = builder
            .build()
            .map_err(|e| Error::request_failed(format!("failed to build request {method} {path}: {e}")))?;

        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::invalid_argument(format!("invalid header name {name}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_argument(format!("invalid value for header {name}: {e}")))?;
            request.headers_mut().insert(header_name, header_value);
        }

        Ok(request)
    }
}

/// Decodes a response body, tolerating empty bodies.
fn decode_body(status: StatusCode, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) if status == StatusCode::UNAUTHORIZED => {
            Err(Error::unauthorized(format!("HTTP {status}")))
        }
        Err(_) if !status.is_success() => Err(Error::request_failed(format!(
            "HTTP {status}: {}",
            body_preview(text)
        ))),
        Err(e) => Err(Error::invalid_json_in_response(format!(
            "{e} (len={}): {}",
            text.len(),
            body_preview(text)
        ))),
    }
}

/// Maps a non-2xx response to an error when the caller asked for it.
fn status_error(status: StatusCode, body: &Value) -> Error {
    let reason = api_error_message(body).unwrap_or_else(|| format!("HTTP {status}"));
    if status == StatusCode::UNAUTHORIZED {
        Error::unauthorized(reason)
    } else {
        Error::request_failed(reason)
    }
}

/// First characters of a body for error messages.
fn body_preview(text: &str) -> String {
    text.chars().take(BODY_PREVIEW_CHARS).collect()
}

impl LocalTransport for HttpTransport {
    #[instrument(skip_all)]
    async fn call_json(
        &self,
        method: HttpMethod,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse> {
        let request = self.build_request(method, path, options)?;

        tracing::debug!(%method, url = %request.url(), "TheTVDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| Error::request_failed(format!("request failed: {method} {path}: {e}")))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            Error::request_failed(format!("failed to read response body: {method} {path}: {e}"))
        })?;

        tracing::debug!(%status, body_len = text.len(), "TheTVDB API response");

        let body = decode_body(status, &text)?;

        if options.http_errors && !status.is_success() {
            return Err(status_error(status, &body));
        }

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::ErrorKind;

    fn transport_for(server: &wiremock::MockServer, token: Option<&str>) -> HttpTransport {
        let base_url = format!("{}/", server.uri());
        HttpTransport::new(
            Client::new(),
            base_url.parse().unwrap(),
            token.map(Token::new),
            String::from("en"),
            String::from("2.2.0"),
        )
    }

    #[test]
    fn test_decode_body_empty_is_null() {
        // Arrange & Act
        let value = decode_body(StatusCode::OK, "  ").unwrap();

        // Assert
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_decode_body_invalid_json_on_success() {
        // Arrange & Act
        let err = decode_body(StatusCode::OK, "<html>oops</html>").unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::InvalidJsonInResponse);
        assert!(err.to_string().contains("<html>oops</html>"));
    }

    #[test]
    fn test_decode_body_invalid_json_on_server_error() {
        // Arrange & Act
        let err = decode_body(StatusCode::BAD_GATEWAY, "Bad gateway").unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_decode_body_invalid_json_on_unauthorized() {
        // Arrange & Act
        let err = decode_body(StatusCode::UNAUTHORIZED, "Not Authorized").unwrap_err();

        // Assert
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_body_preview_truncates_on_char_boundary() {
        // Arrange
        let text = "é".repeat(500);

        // Act
        let preview = body_preview(&text);

        // Assert
        assert_eq!(preview.chars().count(), BODY_PREVIEW_CHARS);
    }

    #[tokio::test]
    async fn test_call_sends_session_headers() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/languages"))
            .and(wiremock::matchers::header("Authorization", "Bearer my-secret-token"))
            .and(wiremock::matchers::header("Accept", "application/vnd.thetvdb.v2.2.0"))
            .and(wiremock::matchers::header("Accept-Language", "en"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
            .expect(1)
            .mount(&mock_server)
            .await;
        let transport = transport_for(&mock_server, Some("my-secret-token"));

        // Act
        let response = transport
            .call_json(HttpMethod::Get, "/languages", &RequestOptions::new())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, serde_json::json!({"data": []}));
    }

    #[tokio::test]
    async fn test_call_without_token_sends_no_authorization() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::header_exists("Authorization"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
            .mount(&mock_server)
            .await;
        let transport = transport_for(&mock_server, None);

        // Act
        let response = transport
            .call_json(HttpMethod::Get, "languages", &RequestOptions::new())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_call_sends_query_body_and_header_override() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/login"))
            .and(wiremock::matchers::query_param("x", "1"))
            .and(wiremock::matchers::header("Accept-Language", "nl"))
            .and(wiremock::matchers::body_json(serde_json::json!({"apikey": "abc"})))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(r#"{"token":"t"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;
        let transport = transport_for(&mock_server, None);
        let options = RequestOptions::new()
            .query("x", "1")
            .json(serde_json::json!({"apikey": "abc"}))
            .header("Accept-Language", "nl");

        // Act
        let response = transport
            .call_json(HttpMethod::Post, "/login", &options)
            .await
            .unwrap();

        // Assert
        assert_eq!(response.body["token"], "t");
    }

    #[tokio::test]
    async fn test_error_body_is_returned_when_http_errors_disabled() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(404)
                    .set_body_string(r#"{"Error":"Resource not found"}"#),
            )
            .mount(&mock_server)
            .await;
        let transport = transport_for(&mock_server, None);

        // Act
        let response = transport
            .call_json(
                HttpMethod::Get,
                "/series/1",
                &RequestOptions::new().http_errors(false),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["Error"], "Resource not found");
    }

    #[tokio::test]
    async fn test_error_status_fails_when_http_errors_enabled() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(404)
                    .set_body_string(r#"{"Error":"Resource not found"}"#),
            )
            .mount(&mock_server)
            .await;
        let transport = transport_for(&mock_server, None);

        // Act
        let err = transport
            .call_json(HttpMethod::Get, "/series/1", &RequestOptions::new())
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.to_string(), "Resource not found");
    }

    #[tokio::test]
    async fn test_unauthorized_status_fails_when_http_errors_enabled() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(401).set_body_string(r#"{"Error":"Not authorized"}"#),
            )
            .mount(&mock_server)
            .await;
        let transport = transport_for(&mock_server, Some("expired"));

        // Act
        let err = transport
            .call_json(HttpMethod::Get, "/user", &RequestOptions::new())
            .await
            .unwrap_err();

        // Assert
        assert!(err.is_unauthorized());
        assert_eq!(err.reason(), "Not authorized");
    }

    #[tokio::test]
    async fn test_connection_failure_is_request_failed() {
        // Arrange
        let transport = HttpTransport::new(
            Client::new(),
            "http://127.0.0.1:1/".parse().unwrap(),
            None,
            String::from("en"),
            String::from("2.2.0"),
        );

        // Act
        let err = transport
            .call_json(HttpMethod::Get, "/languages", &RequestOptions::new())
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert!(err.to_string().contains("request failed"));
    }

    #[test]
    fn test_with_token_keeps_session_settings() {
        // Arrange
        let transport = HttpTransport::new(
            Client::new(),
            "https://api.thetvdb.com/".parse().unwrap(),
            None,
            String::from("de"),
            String::from("2.2.0"),
        );

        // Act
        let authed = transport.with_token(Token::new("abc"));

        // Assert
        assert!(transport.token().is_none());
        assert_eq!(authed.token().map(Token::as_str), Some("abc"));
        assert_eq!(authed.language(), "de");
        assert_eq!(authed.base_url(), transport.base_url());
    }
}
