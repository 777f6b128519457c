//! `/search/series`.

use tracing::instrument;

use super::fetch;
use crate::error::{Error, Result};
use crate::model::SeriesData;
use crate::response::method;
use crate::transport::{HttpMethod, LocalTransport, RequestOptions};

/// The single filter a series search is sent with.
#[derive(Debug, Clone, Copy)]
enum SearchQuery<'q> {
    Name(&'q str),
    ImdbId(&'q str),
    Zap2itId(&'q str),
}

impl<'q> SearchQuery<'q> {
    const fn key(self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::ImdbId(_) => "imdbId",
            Self::Zap2itId(_) => "zap2itId",
        }
    }

    const fn value(self) -> &'q str {
        match self {
            Self::Name(v) | Self::ImdbId(v) | Self::Zap2itId(v) => v,
        }
    }
}

/// Series search.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchExtension<'a, T> {
    transport: &'a T,
}

impl<'a, T: LocalTransport> SearchExtension<'a, T> {
    /// Creates the extension over `transport`.
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Finds a series by name.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty name; otherwise as for any call
    /// (`RequestFailed` when nothing matches).
    #[instrument(skip_all)]
    pub async fn series_by_name(&self, name: &str) -> Result<SeriesData> {
        self.series(SearchQuery::Name(name)).await
    }

    /// Finds a series by IMDb ID.
    ///
    /// # Errors
    ///
    /// As [`Self::series_by_name`].
    #[instrument(skip_all)]
    pub async fn series_by_imdb_id(&self, imdb_id: &str) -> Result<SeriesData> {
        self.series(SearchQuery::ImdbId(imdb_id)).await
    }

    /// Finds a series by Zap2it ID.
    ///
    /// # Errors
    ///
    /// As [`Self::series_by_name`].
    #[instrument(skip_all)]
    pub async fn series_by_zap2it_id(&self, zap2it_id: &str) -> Result<SeriesData> {
        self.series(SearchQuery::Zap2itId(zap2it_id)).await
    }

    /// Lists the accepted search parameters.
    ///
    /// # Errors
    ///
    /// As for any call.
    #[instrument(skip_all)]
    pub async fn params(&self) -> Result<Vec<String>> {
        fetch(
            self.transport,
            HttpMethod::Get,
            "/search/series/params",
            RequestOptions::new(),
            method::SearchSeriesParams,
        )
        .await
    }

    async fn series(&self, query: SearchQuery<'_>) -> Result<SeriesData> {
        let value = query.value();
        if value.trim().is_empty() {
            return Err(Error::invalid_argument(format!(
                "search value for `{}` must not be empty",
                query.key()
            )));
        }

        tracing::debug!(key = query.key(), value, "searching series");

        fetch(
            self.transport,
            HttpMethod::Get,
            "/search/series",
            RequestOptions::new().query(query.key(), value),
            method::SearchSeries,
        )
        .await
    }
}
