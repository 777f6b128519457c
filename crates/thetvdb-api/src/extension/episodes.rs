//! `/episodes/{id}`.

use tracing::instrument;

use super::fetch;
use crate::error::Result;
use crate::model::EpisodeData;
use crate::response::method;
use crate::transport::{HttpMethod, LocalTransport, RequestOptions};

/// Single episode records.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct EpisodesExtension<'a, T> {
    transport: &'a T,
}

impl<'a, T: LocalTransport> EpisodesExtension<'a, T> {
    /// Creates the extension over `transport`.
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetches an episode.
    ///
    /// # Errors
    ///
    /// `RequestFailed` if the episode does not exist; otherwise as for any call.
    #[instrument(skip_all, fields(episode_id = id))]
    pub async fn get(&self, id: u64) -> Result<EpisodeData> {
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/episodes/{id}"),
            RequestOptions::new(),
            method::Episode,
        )
        .await
    }
}
