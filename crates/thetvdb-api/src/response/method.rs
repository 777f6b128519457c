//! Method tags: one unit struct per endpoint, each owning its payload decoder.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{
    ActorData, EpisodeData, EpisodesPage, EpisodesSummary, ImageData, ImageQueryParam,
    ImageStatistics, LanguageData, PageLinks, SeriesData, Token, UpdateData, UserData,
    UserFavoritesData, UserRatingData,
};

/// An API endpoint whose payload decodes into [`ApiMethod::Output`].
pub trait ApiMethod {
    /// Decoded payload type.
    type Output;

    /// Name used in logs and error messages.
    const TAG: &'static str;

    /// Envelope key holding the payload.
    const PAYLOAD_KEY: &'static str = "data";

    /// Decodes the payload. `envelope` holds the remaining top-level keys.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJsonInResponse` if the payload has the wrong shape.
    fn decode(&self, payload: Value, envelope: &Map<String, Value>) -> Result<Self::Output>;
}

/// Deserializes a payload, reporting serde failures with the method tag.
fn decode_value<T: DeserializeOwned>(tag: &str, payload: Value) -> Result<T> {
    serde_json::from_value(payload)
        .map_err(|e| Error::invalid_json_in_response(format!("{tag}: {e}")))
}

/// Declares tags whose payload deserializes directly into the output type.
macro_rules! plain_methods {
    ($($(#[$doc:meta])* $name:ident => $tag:literal, $output:ty;)+) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl ApiMethod for $name {
                type Output = $output;
                const TAG: &'static str = $tag;

                fn decode(&self, payload: Value, _envelope: &Map<String, Value>) -> Result<Self::Output> {
                    decode_value(Self::TAG, payload)
                }
            }
        )+
    };
}

plain_methods! {
    /// `GET /series/{id}`.
    Series => "series", SeriesData;
    /// `GET /series/{id}/actors`.
    SeriesActors => "series_actors", Vec<ActorData>;
    /// `GET /series/{id}/episodes/summary`.
    SeriesEpisodesSummary => "series_episodes_summary", EpisodesSummary;
    /// `GET /series/{id}/images`.
    SeriesImages => "series_images", ImageStatistics;
    /// `GET /series/{id}/images/query`.
    SeriesImagesQuery => "series_images_query", Vec<ImageData>;
    /// `GET /series/{id}/images/query/params`.
    SeriesImagesQueryParams => "series_images_query_params", Vec<ImageQueryParam>;
    /// `GET /episodes/{id}`.
    Episode => "episode", EpisodeData;
    /// `GET /languages`.
    Languages => "languages", Vec<LanguageData>;
    /// `GET /languages/{id}`.
    Language => "language", LanguageData;
    /// `GET /user`.
    User => "user", UserData;
    /// `GET`, `PUT` and `DELETE` on `/user/favorites`.
    UserFavorites => "user_favorites", UserFavoritesData;
    /// `GET /user/ratings/query`.
    UserRatingsQuery => "user_ratings_query", Vec<UserRatingData>;
}

/// `GET /user/ratings`, and rating updates. `null` means no ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserRatings;

impl ApiMethod for UserRatings {
    type Output = Vec<UserRatingData>;
    const TAG: &'static str = "user_ratings";

    fn decode(&self, payload: Value, _envelope: &Map<String, Value>) -> Result<Self::Output> {
        if payload.is_null() {
            return Ok(Vec::new());
        }
        decode_value(Self::TAG, payload)
    }
}

/// `POST /login`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Login;

impl ApiMethod for Login {
    type Output = Token;
    const TAG: &'static str = "login";
    const PAYLOAD_KEY: &'static str = "token";

    fn decode(&self, payload: Value, _envelope: &Map<String, Value>) -> Result<Token> {
        decode_token(Self::TAG, payload)
    }
}

/// `GET /refresh_token`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshToken;

impl ApiMethod for RefreshToken {
    type Output = Token;
    const TAG: &'static str = "refresh_token";
    const PAYLOAD_KEY: &'static str = "token";

    fn decode(&self, payload: Value, _envelope: &Map<String, Value>) -> Result<Token> {
        decode_token(Self::TAG, payload)
    }
}

fn decode_token(tag: &str, payload: Value) -> Result<Token> {
    match payload {
        Value::String(token) if !token.is_empty() => Ok(Token::new(token)),
        Value::String(_) => Err(Error::invalid_json_in_response(format!("{tag}: empty token"))),
        other => Err(Error::invalid_json_in_response(format!(
            "{tag}: token is not a string: {other}"
        ))),
    }
}

/// `GET /search/series`.
///
/// The API answers with a list of matches; the first one is returned. A single
/// object is accepted as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSeries;

impl ApiMethod for SearchSeries {
    type Output = SeriesData;
    const TAG: &'static str = "search_series";

    fn decode(&self, payload: Value, _envelope: &Map<String, Value>) -> Result<SeriesData> {
        match payload {
            Value::Array(matches) => {
                let first = matches.into_iter().next().ok_or_else(|| {
                    Error::invalid_json_in_response(format!("{}: no series in result", Self::TAG))
                })?;
                decode_value(Self::TAG, first)
            }
            other => decode_value(Self::TAG, other),
        }
    }
}

/// `GET /search/series/params`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSeriesParams;

impl ApiMethod for SearchSeriesParams {
    type Output = Vec<String>;
    const TAG: &'static str = "search_series_params";

    fn decode(&self, payload: Value, _envelope: &Map<String, Value>) -> Result<Vec<String>> {
        decode_params(Self::TAG, payload)
    }
}

/// `GET /user/ratings/query/params`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserRatingsQueryParams;

impl ApiMethod for UserRatingsQueryParams {
    type Output = Vec<String>;
    const TAG: &'static str = "user_ratings_query_params";

    fn decode(&self, payload: Value, _envelope: &Map<String, Value>) -> Result<Vec<String>> {
        decode_params(Self::TAG, payload)
    }
}

/// Parameter lists come either bare or wrapped as `{"params": [...]}`.
fn decode_params(tag: &str, payload: Value) -> Result<Vec<String>> {
    match payload {
        Value::Object(mut map) => {
            let params = map.remove("params").ok_or_else(|| {
                Error::invalid_json_in_response(format!("{tag}: missing `params` field"))
            })?;
            decode_value(tag, params)
        }
        other => decode_value(tag, other),
    }
}

/// `GET /series/{id}/episodes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesEpisodes;

impl ApiMethod for SeriesEpisodes {
    type Output = EpisodesPage;
    const TAG: &'static str = "series_episodes";

    fn decode(&self, payload: Value, envelope: &Map<String, Value>) -> Result<EpisodesPage> {
        decode_episodes_page(Self::TAG, payload, envelope)
    }
}

/// `GET /series/{id}/episodes/query`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesEpisodesQuery;

impl ApiMethod for SeriesEpisodesQuery {
    type Output = EpisodesPage;
    const TAG: &'static str = "series_episodes_query";

    fn decode(&self, payload: Value, envelope: &Map<String, Value>) -> Result<EpisodesPage> {
        decode_episodes_page(Self::TAG, payload, envelope)
    }
}

fn decode_episodes_page(
    tag: &str,
    payload: Value,
    envelope: &Map<String, Value>,
) -> Result<EpisodesPage> {
    let episodes = decode_value(tag, payload)?;
    let links = match envelope.get("links") {
        None | Some(Value::Null) => PageLinks::default(),
        Some(links) => decode_value(tag, links.clone())?,
    };
    Ok(EpisodesPage { episodes, links })
}

/// `GET /updated/query`. `null` means nothing changed in the interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Updates;

impl ApiMethod for Updates {
    type Output = Vec<UpdateData>;
    const TAG: &'static str = "updates";

    fn decode(&self, payload: Value, _envelope: &Map<String, Value>) -> Result<Vec<UpdateData>> {
        if payload.is_null() {
            return Ok(Vec::new());
        }
        decode_value(Self::TAG, payload)
    }
}
