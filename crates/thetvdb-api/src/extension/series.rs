//! `/series/{id}` and its sub-resources.

use tracing::instrument;

use super::fetch;
use crate::error::{Error, Result};
use crate::model::{
    ActorData, EpisodeQuery, EpisodesPage, EpisodesSummary, ImageData, ImageQuery,
    ImageQueryParam, ImageStatistics, SeriesData,
};
use crate::response::method;
use crate::transport::{HttpMethod, LocalTransport, RequestOptions};

/// Series records, actors, episodes and images.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct SeriesExtension<'a, T> {
    transport: &'a T,
}

impl<'a, T: LocalTransport> SeriesExtension<'a, T> {
    /// Creates the extension over `transport`.
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetches a series.
    ///
    /// # Errors
    ///
    /// `RequestFailed` if the series does not exist; otherwise as for any call.
    #[instrument(skip_all, fields(series_id = id))]
    pub async fn get(&self, id: u64) -> Result<SeriesData> {
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/series/{id}"),
            RequestOptions::new(),
            method::Series,
        )
        .await
    }

    /// Lists the actors of a series.
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    #[instrument(skip_all, fields(series_id = id))]
    pub async fn actors(&self, id: u64) -> Result<Vec<ActorData>> {
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/series/{id}/actors"),
            RequestOptions::new(),
            method::SeriesActors,
        )
        .await
    }

    /// Fetches one page (1-based) of a series' episodes.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for page 0; otherwise as [`Self::get`].
    #[instrument(skip_all, fields(series_id = id, page = page))]
    pub async fn episodes(&self, id: u64, page: u32) -> Result<EpisodesPage> {
        check_page(Some(page))?;
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/series/{id}/episodes"),
            RequestOptions::new().query("page", page.to_string()),
            method::SeriesEpisodes,
        )
        .await
    }

    /// Fetches the episodes matching `query`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for page 0, or when the API rejects a filter;
    /// otherwise as [`Self::get`].
    #[instrument(skip_all, fields(series_id = id))]
    pub async fn episodes_with_query(
        &self,
        id: u64,
        query: &EpisodeQuery,
    ) -> Result<EpisodesPage> {
        check_page(query.page)?;
        let options = query
            .to_query()
            .into_iter()
            .fold(RequestOptions::new(), |options, (key, value)| {
                options.query(key, value)
            });
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/series/{id}/episodes/query"),
            options,
            method::SeriesEpisodesQuery,
        )
        .await
    }

    /// Fetches season and episode counts.
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    #[instrument(skip_all, fields(series_id = id))]
    pub async fn episodes_summary(&self, id: u64) -> Result<EpisodesSummary> {
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/series/{id}/episodes/summary"),
            RequestOptions::new(),
            method::SeriesEpisodesSummary,
        )
        .await
    }

    /// Fetches image counts per key type.
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    #[instrument(skip_all, fields(series_id = id))]
    pub async fn images(&self, id: u64) -> Result<ImageStatistics> {
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/series/{id}/images"),
            RequestOptions::new(),
            method::SeriesImages,
        )
        .await
    }

    /// Fetches the images matching `query`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key type or a filter the API rejects;
    /// otherwise as [`Self::get`].
    #[instrument(skip_all, fields(series_id = id))]
    pub async fn images_with_query(&self, id: u64, query: &ImageQuery) -> Result<Vec<ImageData>> {
        if query.key_type.trim().is_empty() {
            return Err(Error::invalid_argument("image key type must not be empty"));
        }
        let options = query
            .to_query()
            .into_iter()
            .fold(RequestOptions::new(), |options, (key, value)| {
                options.query(key, value)
            });
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/series/{id}/images/query"),
            options,
            method::SeriesImagesQuery,
        )
        .await
    }

    /// Lists the filter values accepted by [`Self::images_with_query`].
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    #[instrument(skip_all, fields(series_id = id))]
    pub async fn images_query_params(&self, id: u64) -> Result<Vec<ImageQueryParam>> {
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/series/{id}/images/query/params"),
            RequestOptions::new(),
            method::SeriesImagesQueryParams,
        )
        .await
    }
}

/// Pages are 1-based.
fn check_page(page: Option<u32>) -> Result<()> {
    if page == Some(0) {
        return Err(Error::invalid_argument("page numbers start at 1"));
    }
    Ok(())
}
