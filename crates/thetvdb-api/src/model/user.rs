//! User account records.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// User name.
    pub user_name: Option<String>,
    /// Preferred language abbreviation.
    pub language: Option<String>,
    /// Favorites display mode.
    pub favorites_displaymode: Option<String>,
}

/// Series IDs in the user's favorites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFavoritesData {
    /// Favorite series IDs.
    #[serde(default, deserialize_with = "favorite_ids")]
    pub favorites: Vec<u64>,
}

/// Accepts IDs as numbers or numeric strings; empty strings are skipped.
fn favorite_ids<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut ids = Vec::with_capacity(raw.len());
    for value in raw {
        match value {
            Value::Number(n) => ids.push(
                n.as_u64()
                    .ok_or_else(|| D::Error::custom(format!("invalid favorite id: {n}")))?,
            ),
            Value::String(s) if s.trim().is_empty() => {}
            Value::String(s) => ids.push(
                s.trim()
                    .parse()
                    .map_err(|_| D::Error::custom(format!("invalid favorite id: {s}")))?,
            ),
            other => {
                return Err(D::Error::custom(format!("invalid favorite id: {other}")));
            }
        }
    }
    Ok(ids)
}

/// A rating the user gave.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRatingData {
    /// Rated item type.
    pub rating_type: Option<String>,
    /// Rated item ID.
    pub rating_item_id: Option<u64>,
    /// Rating value.
    pub rating: Option<u32>,
}

/// Item types that can be rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingType {
    /// A series.
    Series,
    /// An episode.
    Episode,
    /// An image.
    Image,
}

impl RatingType {
    /// Path/query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Episode => "episode",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for RatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
