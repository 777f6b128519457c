//! Series and actor records.

use serde::Deserialize;

use super::null_as_default;

/// One series, as returned by `/search/series` and `/series/{id}`.
///
/// Search results carry a subset of the fields; the rest stay `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesData {
    /// TheTVDB series ID.
    pub id: u64,
    /// Series name.
    pub series_name: Option<String>,
    /// Alternative names.
    #[serde(default, deserialize_with = "null_as_default")]
    pub aliases: Vec<String>,
    /// Banner image path.
    pub banner: Option<String>,
    /// Legacy series ID.
    pub series_id: Option<String>,
    /// Status (e.g., "Continuing", "Ended").
    pub status: Option<String>,
    /// First aired date (YYYY-MM-DD).
    pub first_aired: Option<String>,
    /// Network name.
    pub network: Option<String>,
    /// Network ID.
    pub network_id: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<String>,
    /// Genres.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: Vec<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Last update (Unix timestamp).
    pub last_updated: Option<i64>,
    /// Day of the week the series airs.
    pub airs_day_of_week: Option<String>,
    /// Time of day the series airs.
    pub airs_time: Option<String>,
    /// Content rating (e.g., "TV-MA").
    pub rating: Option<String>,
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// Zap2it ID.
    pub zap2it_id: Option<String>,
    /// Date the series was added.
    pub added: Option<String>,
    /// ID of the user who added the series.
    pub added_by: Option<u64>,
    /// Site rating average.
    pub site_rating: Option<f64>,
    /// Number of site ratings.
    pub site_rating_count: Option<u32>,
    /// URL slug.
    pub slug: Option<String>,
}

/// An actor credited on a series.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorData {
    /// Actor ID.
    pub id: u64,
    /// Series the role belongs to.
    pub series_id: Option<u64>,
    /// Actor name.
    pub name: Option<String>,
    /// Role played.
    pub role: Option<String>,
    /// Billing order.
    pub sort_order: Option<i32>,
    /// Image path.
    pub image: Option<String>,
    /// ID of the user who uploaded the image.
    pub image_author: Option<u64>,
    /// Upload timestamp of the image.
    pub image_added: Option<String>,
    /// Last update timestamp.
    pub last_updated: Option<String>,
}
