//! `/user`: account, favorites and ratings. Requires a user-bound token.

use std::ops::RangeInclusive;

use tracing::instrument;

use super::{fetch, send};
use crate::error::{Error, Result};
use crate::model::{RatingType, UserData, UserFavoritesData, UserRatingData};
use crate::response::{ApiMethod, ResponseHandler, method};
use crate::transport::{HttpMethod, LocalTransport, RequestOptions};

/// Ratings accepted by the API.
const RATING_RANGE: RangeInclusive<u32> = 1..=10;

/// The authenticated user's account.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct UsersExtension<'a, T> {
    transport: &'a T,
}

impl<'a, T: LocalTransport> UsersExtension<'a, T> {
    /// Creates the extension over `transport`.
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetches the account.
    ///
    /// # Errors
    ///
    /// `Unauthorized` without a user-bound token; otherwise as for any call.
    #[instrument(skip_all)]
    pub async fn get(&self) -> Result<UserData> {
        fetch(
            self.transport,
            HttpMethod::Get,
            "/user",
            RequestOptions::new(),
            method::User,
        )
        .await
    }

    /// Lists favorite series.
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    #[instrument(skip_all)]
    pub async fn favorites(&self) -> Result<UserFavoritesData> {
        fetch(
            self.transport,
            HttpMethod::Get,
            "/user/favorites",
            RequestOptions::new(),
            method::UserFavorites,
        )
        .await
    }

    /// Adds a series to the favorites and returns the updated list.
    ///
    /// # Errors
    ///
    /// `CouldNotAddFavorite` if the API refuses; `Unauthorized`,
    /// `InvalidJsonInResponse` and transport failures are passed through.
    #[instrument(skip_all, fields(series_id = series_id))]
    pub async fn add_favorite(&self, series_id: u64) -> Result<UserFavoritesData> {
        self.action(
            HttpMethod::Put,
            &format!("/user/favorites/{series_id}"),
            method::UserFavorites,
            Error::could_not_add_favorite,
        )
        .await
    }

    /// Removes a series from the favorites and returns the updated list.
    ///
    /// # Errors
    ///
    /// `CouldNotRemoveFavorite` if the API refuses; otherwise as
    /// [`Self::add_favorite`].
    #[instrument(skip_all, fields(series_id = series_id))]
    pub async fn remove_favorite(&self, series_id: u64) -> Result<UserFavoritesData> {
        self.action(
            HttpMethod::Delete,
            &format!("/user/favorites/{series_id}"),
            method::UserFavorites,
            Error::could_not_remove_favorite,
        )
        .await
    }

    /// Lists every rating the user gave.
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    #[instrument(skip_all)]
    pub async fn ratings(&self) -> Result<Vec<UserRatingData>> {
        fetch(
            self.transport,
            HttpMethod::Get,
            "/user/ratings",
            RequestOptions::new(),
            method::UserRatings,
        )
        .await
    }

    /// Lists the ratings for one item type.
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    #[instrument(skip_all, fields(item_type = %item_type))]
    pub async fn ratings_with_query(&self, item_type: RatingType) -> Result<Vec<UserRatingData>> {
        fetch(
            self.transport,
            HttpMethod::Get,
            "/user/ratings/query",
            RequestOptions::new().query("itemType", item_type.as_str()),
            method::UserRatingsQuery,
        )
        .await
    }

    /// Lists the item types accepted by [`Self::ratings_with_query`].
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    #[instrument(skip_all)]
    pub async fn ratings_query_params(&self) -> Result<Vec<String>> {
        fetch(
            self.transport,
            HttpMethod::Get,
            "/user/ratings/query/params",
            RequestOptions::new(),
            method::UserRatingsQueryParams,
        )
        .await
    }

    /// Rates an item (1 to 10).
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a rating outside `1..=10` (no request is sent).
    /// - `CouldNotAddOrUpdateUserRating` if the API refuses.
    /// - `Unauthorized`, `InvalidJsonInResponse` and transport failures are
    ///   passed through.
    #[instrument(skip_all, fields(item_type = %item_type, item_id = item_id, rating = rating))]
    pub async fn add_rating(
        &self,
        item_type: RatingType,
        item_id: u64,
        rating: u32,
    ) -> Result<Vec<UserRatingData>> {
        if !RATING_RANGE.contains(&rating) {
            return Err(Error::invalid_argument(format!(
                "rating must be between {} and {}, got {rating}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            )));
        }
        self.action(
            HttpMethod::Put,
            &format!("/user/ratings/{item_type}/{item_id}/{rating}"),
            method::UserRatings,
            Error::could_not_add_or_update_user_rating,
        )
        .await
    }

    /// Changes an existing rating. The API treats this the same as adding.
    ///
    /// # Errors
    ///
    /// As [`Self::add_rating`].
    #[instrument(skip_all, fields(item_type = %item_type, item_id = item_id, rating = rating))]
    pub async fn update_rating(
        &self,
        item_type: RatingType,
        item_id: u64,
        rating: u32,
    ) -> Result<Vec<UserRatingData>> {
        self.add_rating(item_type, item_id, rating).await
    }

    /// Removes a rating.
    ///
    /// # Errors
    ///
    /// `CouldNotRemoveUserRating` if the API refuses; otherwise as
    /// [`Self::add_rating`].
    #[instrument(skip_all, fields(item_type = %item_type, item_id = item_id))]
    pub async fn remove_rating(&self, item_type: RatingType, item_id: u64) -> Result<()> {
        self.action(
            HttpMethod::Delete,
            &format!("/user/ratings/{item_type}/{item_id}"),
            method::UserRatings,
            Error::could_not_remove_user_rating,
        )
        .await?;
        Ok(())
    }

    /// Sends a state-changing request and relabels API refusals with `remap`.
    async fn action<M: ApiMethod>(
        &self,
        http_method: HttpMethod,
        path: &str,
        tag: M,
        remap: fn(String) -> Error,
    ) -> Result<M::Output> {
        let response = send(self.transport, http_method, path, RequestOptions::new()).await?;
        ResponseHandler::from_response(response, tag)
            .handle()
            .map_err(|e| e.remap_action(remap))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::extension::mock::MockTransport;

    #[tokio::test]
    async fn test_get_user() {
        // Arrange
        let transport = MockTransport::ok(json!({
            "data": {"userName": "alice", "language": "en", "favoritesDisplaymode": "banners"}
        }));

        // Act
        let user = UsersExtension::new(&transport).get().await.unwrap();

        // Assert
        assert_eq!(user.user_name.as_deref(), Some("alice"));
        assert_eq!(transport.single_call().path, "/user");
    }

    #[tokio::test]
    async fn test_get_user_without_token() {
        // Arrange
        let transport =
            MockTransport::replying(StatusCode::UNAUTHORIZED, json!({"Error": "Not authorized"}));

        // Act
        let err = UsersExtension::new(&transport).get().await.unwrap_err();

        // Assert
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_favorites() {
        // Arrange
        let transport = MockTransport::ok(json!({"data": {"favorites": ["121361", "80379"]}}));

        // Act
        let favorites = UsersExtension::new(&transport).favorites().await.unwrap();

        // Assert
        assert_eq!(favorites.favorites, vec![121_361, 80_379]);
    }

    #[tokio::test]
    async fn test_add_favorite() {
        // Arrange
        let transport = MockTransport::ok(json!({"data": {"favorites": ["121361"]}}));

        // Act
        let favorites = UsersExtension::new(&transport)
            .add_favorite(121_361)
            .await
            .unwrap();

        // Assert
        assert_eq!(favorites.favorites, vec![121_361]);
        let call = transport.single_call();
        assert_eq!(call.method, HttpMethod::Put);
        assert_eq!(call.path, "/user/favorites/121361");
        assert!(!call.options.http_errors);
    }

    #[tokio::test]
    async fn test_add_favorite_refused() {
        // Arrange
        let transport = MockTransport::replying(
            StatusCode::CONFLICT,
            json!({"Error": "Series already in favorites"}),
        );

        // Act
        let err = UsersExtension::new(&transport)
            .add_favorite(121_361)
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::CouldNotAddFavorite);
        assert_eq!(
            err.to_string(),
            "Could not add favorite: Series already in favorites"
        );
    }

    #[tokio::test]
    async fn test_add_favorite_unauthorized_passes_through() {
        // Arrange
        let transport =
            MockTransport::replying(StatusCode::UNAUTHORIZED, json!({"Error": "Not authorized"}));

        // Act
        let err = UsersExtension::new(&transport)
            .add_favorite(121_361)
            .await
            .unwrap_err();

        // Assert
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_add_favorite_transport_failure_passes_through() {
        // Arrange
        let transport = MockTransport::failing(Error::request_failed("connection reset"));

        // Act
        let err = UsersExtension::new(&transport)
            .add_favorite(121_361)
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.to_string(), "connection reset");
    }

    #[tokio::test]
    async fn test_remove_favorite() {
        // Arrange
        let transport = MockTransport::ok(json!({"data": {"favorites": [""]}}));

        // Act
        let favorites = UsersExtension::new(&transport)
            .remove_favorite(121_361)
            .await
            .unwrap();

        // Assert
        assert!(favorites.favorites.is_empty());
        let call = transport.single_call();
        assert_eq!(call.method, HttpMethod::Delete);
        assert_eq!(call.path, "/user/favorites/121361");
    }

    #[tokio::test]
    async fn test_remove_favorite_refused() {
        // Arrange
        let transport = MockTransport::replying(StatusCode::NOT_FOUND, json!({"data": null}));

        // Act
        let err = UsersExtension::new(&transport)
            .remove_favorite(1)
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::CouldNotRemoveFavorite);
        assert_eq!(err.reason(), "HTTP 404 Not Found");
    }

    #[tokio::test]
    async fn test_ratings_with_query() {
        // Arrange
        let transport = MockTransport::ok(json!({
            "data": [{"ratingType": "series", "ratingItemId": 121361, "rating": 10}]
        }));

        // Act
        let ratings = UsersExtension::new(&transport)
            .ratings_with_query(RatingType::Series)
            .await
            .unwrap();

        // Assert
        assert_eq!(ratings[0].rating, Some(10));
        let call = transport.single_call();
        assert_eq!(call.path, "/user/ratings/query");
        assert_eq!(call.options.query_value("itemType"), Some("series"));
    }

    #[tokio::test]
    async fn test_ratings_and_params() {
        // Arrange
        let transport = MockTransport::ok(json!({"data": null}));
        transport.push(Ok(crate::transport::ApiResponse::new(
            StatusCode::OK,
            json!({"data": ["series", "episode", "image"]}),
        )));
        let users = UsersExtension::new(&transport);

        // Act
        let ratings = users.ratings().await.unwrap();
        let params = users.ratings_query_params().await.unwrap();

        // Assert
        assert!(ratings.is_empty());
        assert_eq!(params, vec!["series", "episode", "image"]);
        let paths: Vec<String> = transport.calls().into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["/user/ratings", "/user/ratings/query/params"]);
    }

    #[tokio::test]
    async fn test_add_rating_path() {
        // Arrange
        let transport = MockTransport::ok(json!({
            "data": [{"ratingType": "episode", "ratingItemId": 3254641, "rating": 8}]
        }));

        // Act
        let ratings = UsersExtension::new(&transport)
            .update_rating(RatingType::Episode, 3_254_641, 8)
            .await
            .unwrap();

        // Assert
        assert_eq!(ratings.len(), 1);
        let call = transport.single_call();
        assert_eq!(call.method, HttpMethod::Put);
        assert_eq!(call.path, "/user/ratings/episode/3254641/8");
    }

    #[tokio::test]
    async fn test_update_rating_opens_span() {
        // Arrange
        let (subscriber, handle) = tracing_mock::subscriber::mock()
            .new_span(tracing_mock::expect::span().named("update_rating"))
            .run_with_handle();
        let transport = MockTransport::ok(json!({"data": []}));

        // Act
        {
            let _guard = tracing::subscriber::set_default(subscriber);
            UsersExtension::new(&transport)
                .update_rating(RatingType::Series, 121_361, 9)
                .await
                .unwrap();
        }

        // Assert
        handle.assert_finished();
    }

    #[tokio::test]
    async fn test_rating_out_of_range_sends_nothing() {
        // Arrange
        let transport = MockTransport::default();
        let users = UsersExtension::new(&transport);

        // Act
        let zero = users.add_rating(RatingType::Series, 1, 0).await.unwrap_err();
        let eleven = users.add_rating(RatingType::Series, 1, 11).await.unwrap_err();

        // Assert
        assert_eq!(zero.kind(), ErrorKind::InvalidArgument);
        assert_eq!(eleven.kind(), ErrorKind::InvalidArgument);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_rating_refused_keeps_field_errors() {
        // Arrange
        let transport = MockTransport::replying(
            StatusCode::BAD_REQUEST,
            json!({"errors": [{"field": "itemId", "message": "unknown item"}]}),
        );

        // Act
        let err = UsersExtension::new(&transport)
            .add_rating(RatingType::Image, 42, 5)
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::CouldNotAddOrUpdateUserRating);
        assert_eq!(err.field_errors()[0].field, "itemId");
    }

    #[tokio::test]
    async fn test_remove_rating() {
        // Arrange
        let transport = MockTransport::ok(json!({"data": []}));

        // Act
        UsersExtension::new(&transport)
            .remove_rating(RatingType::Series, 121_361)
            .await
            .unwrap();

        // Assert
        let call = transport.single_call();
        assert_eq!(call.method, HttpMethod::Delete);
        assert_eq!(call.path, "/user/ratings/series/121361");
    }

    #[tokio::test]
    async fn test_remove_rating_refused() {
        // Arrange
        let transport =
            MockTransport::replying(StatusCode::NOT_FOUND, json!({"Error": "Rating not found"}));

        // Act
        let err = UsersExtension::new(&transport)
            .remove_rating(RatingType::Series, 121_361)
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::CouldNotRemoveUserRating);
        assert_eq!(err.to_string(), "Could not remove user rating: Rating not found");
    }

    #[tokio::test]
    async fn test_remove_rating_malformed_response_passes_through() {
        // Arrange
        let transport = MockTransport::ok(json!(["not", "an", "envelope"]));

        // Act
        let err = UsersExtension::new(&transport)
            .remove_rating(RatingType::Series, 1)
            .await
            .unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::InvalidJsonInResponse);
    }
}
