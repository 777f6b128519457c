//! Response models.
//!
//! Plain records decoded from the `data` payload. Fields the API may omit
//! are `Option` (or empty collections) and are never filled in locally.

mod auth;
mod episode;
mod image;
mod language;
mod series;
mod update;
mod user;

pub use auth::{Credentials, Token};
pub use episode::{EpisodeData, EpisodeQuery, EpisodesPage, EpisodesSummary, PageLinks};
pub use image::{ImageData, ImageQuery, ImageQueryParam, ImageRatingsInfo, ImageStatistics};
pub use language::LanguageData;
pub use series::{ActorData, SeriesData};
pub use update::UpdateData;
pub use user::{RatingType, UserData, UserFavoritesData, UserRatingData};

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default (empty list, etc.).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
