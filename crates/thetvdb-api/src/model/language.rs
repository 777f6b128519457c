//! Language record.

use serde::Deserialize;

/// A language supported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageData {
    /// Language ID.
    pub id: u64,
    /// Two-letter abbreviation (used as `Accept-Language`).
    pub abbreviation: Option<String>,
    /// Native name.
    pub name: Option<String>,
    /// English name.
    pub english_name: Option<String>,
}
