//! Episode records and episode query parameters.

use serde::Deserialize;

use super::null_as_default;

/// One episode, as returned by `/episodes/{id}` and the series episode lists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeData {
    /// Episode ID.
    pub id: u64,
    /// Aired season number.
    pub aired_season: Option<u32>,
    /// Aired season ID.
    #[serde(rename = "airedSeasonID")]
    pub aired_season_id: Option<u64>,
    /// Aired episode number within the season.
    pub aired_episode_number: Option<u32>,
    /// Episode name.
    pub episode_name: Option<String>,
    /// First aired date (YYYY-MM-DD).
    pub first_aired: Option<String>,
    /// Guest stars.
    #[serde(default, deserialize_with = "null_as_default")]
    pub guest_stars: Vec<String>,
    /// Directors.
    #[serde(default, deserialize_with = "null_as_default")]
    pub directors: Vec<String>,
    /// Writers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub writers: Vec<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Production code.
    pub production_code: Option<String>,
    /// Show URL.
    pub show_url: Option<String>,
    /// Last update (Unix timestamp).
    pub last_updated: Option<i64>,
    /// DVD disc ID.
    #[serde(rename = "dvdDiscid")]
    pub dvd_disc_id: Option<String>,
    /// DVD season number.
    pub dvd_season: Option<u32>,
    /// DVD episode number (may be fractional).
    pub dvd_episode_number: Option<f64>,
    /// DVD chapter.
    pub dvd_chapter: Option<i64>,
    /// Absolute episode number.
    pub absolute_number: Option<u32>,
    /// Image file name.
    pub filename: Option<String>,
    /// Parent series ID.
    pub series_id: Option<u64>,
    /// Airs after this season (specials).
    pub airs_after_season: Option<u32>,
    /// Airs before this season (specials).
    pub airs_before_season: Option<u32>,
    /// Airs before this episode (specials).
    pub airs_before_episode: Option<u32>,
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// Site rating average.
    pub site_rating: Option<f64>,
    /// Number of site ratings.
    pub site_rating_count: Option<u32>,
}

/// Pagination links from the envelope of a paged episode list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageLinks {
    /// First page.
    pub first: Option<u32>,
    /// Last page.
    pub last: Option<u32>,
    /// Next page, if any.
    pub next: Option<u32>,
    /// Previous page, if any.
    pub prev: Option<u32>,
}

/// One page of a series' episodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodesPage {
    /// Episodes on this page.
    pub episodes: Vec<EpisodeData>,
    /// Pagination links.
    pub links: PageLinks,
}

/// Season and episode counts for a series.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodesSummary {
    /// Aired season numbers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub aired_seasons: Vec<String>,
    /// Number of aired episodes.
    pub aired_episodes: Option<String>,
    /// DVD season numbers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dvd_seasons: Vec<String>,
    /// Number of DVD episodes.
    pub dvd_episodes: Option<String>,
}

/// Filters for `/series/{id}/episodes/query`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeQuery {
    /// Absolute episode number.
    pub absolute_number: Option<u32>,
    /// Aired season.
    pub aired_season: Option<u32>,
    /// Aired episode.
    pub aired_episode: Option<u32>,
    /// DVD season.
    pub dvd_season: Option<u32>,
    /// DVD episode.
    pub dvd_episode: Option<u32>,
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// Result page (1-based).
    pub page: Option<u32>,
}

impl EpisodeQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by aired season.
    #[must_use]
    pub const fn aired_season(mut self, season: u32) -> Self {
        self.aired_season = Some(season);
        self
    }

    /// Filters by aired episode.
    #[must_use]
    pub const fn aired_episode(mut self, episode: u32) -> Self {
        self.aired_episode = Some(episode);
        self
    }

    /// Filters by absolute number.
    #[must_use]
    pub const fn absolute_number(mut self, number: u32) -> Self {
        self.absolute_number = Some(number);
        self
    }

    /// Filters by DVD season.
    #[must_use]
    pub const fn dvd_season(mut self, season: u32) -> Self {
        self.dvd_season = Some(season);
        self
    }

    /// Filters by DVD episode.
    #[must_use]
    pub const fn dvd_episode(mut self, episode: u32) -> Self {
        self.dvd_episode = Some(episode);
        self
    }

    /// Filters by IMDb ID.
    #[must_use]
    pub fn imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self
    }

    /// Selects the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Query pairs for the set filters, in a stable order.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let numeric = [
            ("absoluteNumber", self.absolute_number),
            ("airedSeason", self.aired_season),
            ("airedEpisode", self.aired_episode),
            ("dvdSeason", self.dvd_season),
            ("dvdEpisode", self.dvd_episode),
        ];
        let mut query: Vec<(&str, String)> = numeric
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
            .collect();
        if let Some(ref imdb_id) = self.imdb_id {
            query.push(("imdbId", imdb_id.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_episode_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/thetvdb/episode_3254641.json");
        let envelope: serde_json::Value = serde_json::from_str(json).unwrap();

        // Act
        let episode: EpisodeData = serde_json::from_value(envelope["data"].clone()).unwrap();

        // Assert
        assert_eq!(episode.id, 3_254_641);
        assert_eq!(episode.episode_name.as_deref(), Some("Winter Is Coming"));
        assert_eq!(episode.aired_season, Some(1));
        assert_eq!(episode.aired_season_id, Some(364_731));
        assert_eq!(episode.aired_episode_number, Some(1));
        assert_eq!(episode.dvd_disc_id.as_deref(), Some(""));
        assert_eq!(episode.series_id, Some(121_361));
        assert!(episode.directors.contains(&String::from("Tim Van Patten")));
        assert!(episode.guest_stars.is_empty());
    }

    #[test]
    fn test_parse_summary() {
        // Arrange
        let json = r#"{"airedSeasons":["1","0","2"],"airedEpisodes":"73","dvdSeasons":[],"dvdEpisodes":"0"}"#;

        // Act
        let summary: EpisodesSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(summary.aired_seasons, vec!["1", "0", "2"]);
        assert_eq!(summary.aired_episodes.as_deref(), Some("73"));
        assert!(summary.dvd_seasons.is_empty());
    }

    #[test]
    fn test_episode_query_only_set_filters() {
        // Arrange
        let query = EpisodeQuery::new().aired_season(2).aired_episode(5).page(1);

        // Act
        let pairs = query.to_query();

        // Assert
        assert_eq!(
            pairs,
            vec![
                ("airedSeason", String::from("2")),
                ("airedEpisode", String::from("5")),
                ("page", String::from("1")),
            ]
        );
    }

    #[test]
    fn test_empty_episode_query() {
        // Arrange & Act
        let pairs = EpisodeQuery::new().to_query();

        // Assert
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_episode_query_imdb_id() {
        // Arrange & Act
        let pairs = EpisodeQuery::new().imdb_id("tt1480055").to_query();

        // Assert
        assert_eq!(pairs, vec![("imdbId", String::from("tt1480055"))]);
    }
}
