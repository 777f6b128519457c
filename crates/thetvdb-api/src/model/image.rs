//! Series image records and image query parameters.

use serde::Deserialize;

use super::null_as_default;

/// Image counts per key type for a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ImageStatistics {
    /// Fan art.
    pub fanart: Option<u32>,
    /// Posters.
    pub poster: Option<u32>,
    /// Season posters.
    pub season: Option<u32>,
    /// Season-wide banners.
    pub seasonwide: Option<u32>,
    /// Series banners.
    pub series: Option<u32>,
}

/// Rating summary of an image.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ImageRatingsInfo {
    /// Average rating.
    pub average: Option<f64>,
    /// Number of ratings.
    pub count: Option<u32>,
}

/// One image from `/series/{id}/images/query`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    /// Image ID.
    pub id: u64,
    /// Key type (e.g., "poster", "fanart").
    pub key_type: Option<String>,
    /// Sub key (e.g., season number).
    pub sub_key: Option<String>,
    /// Image path.
    pub file_name: Option<String>,
    /// Resolution (e.g., "1920x1080").
    pub resolution: Option<String>,
    /// Ratings.
    pub ratings_info: Option<ImageRatingsInfo>,
    /// Thumbnail path.
    pub thumbnail: Option<String>,
}

/// Allowed filter values for one key type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageQueryParam {
    /// Key type.
    pub key_type: Option<String>,
    /// Language ID.
    pub language_id: Option<String>,
    /// Available resolutions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resolution: Vec<String>,
    /// Available sub keys.
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_key: Vec<String>,
}

/// Filters for `/series/{id}/images/query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    /// Key type (required).
    pub key_type: String,
    /// Resolution filter.
    pub resolution: Option<String>,
    /// Sub key filter.
    pub sub_key: Option<String>,
}

impl ImageQuery {
    /// Creates a query for the given key type.
    pub fn new(key_type: impl Into<String>) -> Self {
        Self {
            key_type: key_type.into(),
            resolution: None,
            sub_key: None,
        }
    }

    /// Filters by resolution.
    #[must_use]
    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    /// Filters by sub key.
    #[must_use]
    pub fn sub_key(mut self, sub_key: impl Into<String>) -> Self {
        self.sub_key = Some(sub_key.into());
        self
    }

    /// Query pairs for the set filters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&str, String)> = vec![("keyType", self.key_type.clone())];
        if let Some(ref resolution) = self.resolution {
            query.push(("resolution", resolution.clone()));
        }
        if let Some(ref sub_key) = self.sub_key {
            query.push(("subKey", sub_key.clone()));
        }
        query
    }
}
