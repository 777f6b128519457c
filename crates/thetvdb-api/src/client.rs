//! `TvdbClient` - entry point bundling the transport and the extensions.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::error::{Error, Result};
use crate::extension::{
    AuthenticationExtension, EpisodesExtension, LanguagesExtension, SearchExtension,
    SeriesExtension, UpdatesExtension, UsersExtension,
};
use crate::model::{Credentials, Token};
use crate::transport::HttpTransport;

/// Default base URL for TheTVDB API v2.
const DEFAULT_BASE_URL: &str = "https://api.thetvdb.com/";

/// Default API version placed in the `Accept` header.
const DEFAULT_API_VERSION: &str = "2.2.0";

/// Default `Accept-Language`.
const DEFAULT_LANGUAGE: &str = "en";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TheTVDB API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TvdbClient {
    transport: HttpTransport,
}

/// Builder for `TvdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TvdbClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    language: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    token: Option<Token>,
}

impl TvdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            language: None,
            api_version: None,
            timeout: None,
            token: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (default: `thetvdb-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the `Accept-Language` (default: `en`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the API version (default: `2.2.0`).
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Starts with a token obtained earlier.
    #[must_use]
    pub fn token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the language or API version is empty.
    /// - `RequestFailed` if the `reqwest::Client` build fails.
    pub fn build(self) -> Result<TvdbClient> {
        let language = self.language.unwrap_or_else(|| String::from(DEFAULT_LANGUAGE));
        if language.trim().is_empty() {
            return Err(Error::invalid_argument("language must not be empty"));
        }
        let api_version = self
            .api_version
            .unwrap_or_else(|| String::from(DEFAULT_API_VERSION));
        if api_version.trim().is_empty() {
            return Err(Error::invalid_argument("API version must not be empty"));
        }

        let base_url = if let Some(url) = self.base_url {
            with_trailing_slash(url)
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| Error::invalid_argument(format!("invalid default base URL: {e}")))?
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("thetvdb-api/{}", env!("CARGO_PKG_VERSION")));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .map_err(|e| Error::request_failed(format!("failed to build HTTP client: {e}")))?;

        tracing::debug!(%base_url, %language, %api_version, "TheTVDB client built");

        Ok(TvdbClient {
            transport: HttpTransport::new(http_client, base_url, self.token, language, api_version),
        })
    }
}

/// Paths are joined onto the base URL, so it must end in `/` to keep its
/// last segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl TvdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TvdbClientBuilder {
        TvdbClientBuilder::new()
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Current bearer token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.transport.token()
    }

    /// Returns a client sharing this connection pool but carrying `token`.
    #[must_use]
    pub fn with_token(&self, token: Token) -> Self {
        Self {
            transport: self.transport.with_token(token),
        }
    }

    /// Logs in and returns a client carrying the issued token.
    ///
    /// # Errors
    ///
    /// As [`AuthenticationExtension::login`].
    #[instrument(skip_all)]
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Self> {
        let token = self.authentication().login(credentials).await?;
        tracing::debug!("TheTVDB login succeeded");
        Ok(self.with_token(token))
    }

    /// `/login` and `/refresh_token`.
    #[must_use]
    pub const fn authentication(&self) -> AuthenticationExtension<'_, HttpTransport> {
        AuthenticationExtension::new(&self.transport)
    }

    /// `/search/series`.
    #[must_use]
    pub const fn search(&self) -> SearchExtension<'_, HttpTransport> {
        SearchExtension::new(&self.transport)
    }

    /// `/series/{id}`.
    #[must_use]
    pub const fn series(&self) -> SeriesExtension<'_, HttpTransport> {
        SeriesExtension::new(&self.transport)
    }

    /// `/episodes/{id}`.
    #[must_use]
    pub const fn episodes(&self) -> EpisodesExtension<'_, HttpTransport> {
        EpisodesExtension::new(&self.transport)
    }

    /// `/languages`.
    #[must_use]
    pub const fn languages(&self) -> LanguagesExtension<'_, HttpTransport> {
        LanguagesExtension::new(&self.transport)
    }

    /// `/updated/query`.
    #[must_use]
    pub const fn updates(&self) -> UpdatesExtension<'_, HttpTransport> {
        UpdatesExtension::new(&self.transport)
    }

    /// `/user`.
    #[must_use]
    pub const fn users(&self) -> UsersExtension<'_, HttpTransport> {
        UsersExtension::new(&self.transport)
    }
}
