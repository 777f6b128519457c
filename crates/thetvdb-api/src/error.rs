//! `Error` - typed failures surfaced by every API call.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Network failure, or the API reported an `Error` string.
    RequestFailed,
    /// HTTP 401: the token is missing, invalid or expired.
    Unauthorized,
    /// The API rejected fields (`errors`), or the caller passed an argument
    /// the API does not accept.
    InvalidArgument,
    /// The body is not JSON of the expected shape.
    InvalidJsonInResponse,
    /// Authentication was refused.
    CouldNotLogin,
    /// A series could not be added to the user's favorites.
    CouldNotAddFavorite,
    /// A series could not be removed from the user's favorites.
    CouldNotRemoveFavorite,
    /// A user rating could not be stored.
    CouldNotAddOrUpdateUserRating,
    /// A user rating could not be removed.
    CouldNotRemoveUserRating,
}

impl ErrorKind {
    /// Prefix placed in front of the reason, if any.
    const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::RequestFailed => None,
            Self::Unauthorized => Some("Unauthorized"),
            Self::InvalidArgument => Some("Invalid argument"),
            Self::InvalidJsonInResponse => Some("Invalid JSON in response"),
            Self::CouldNotLogin => Some("Could not login"),
            Self::CouldNotAddFavorite => Some("Could not add favorite"),
            Self::CouldNotRemoveFavorite => Some("Could not remove favorite"),
            Self::CouldNotAddOrUpdateUserRating => Some("Could not add or update user rating"),
            Self::CouldNotRemoveUserRating => Some("Could not remove user rating"),
        }
    }
}

/// A single field-level validation message reported in `errors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name (empty when the API did not name one).
    pub field: String,
    /// Validation message.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Error returned by every fallible operation in this crate.
///
/// Construct it through the named constructors so that messages are
/// formatted the same way everywhere, and branch on [`Error::kind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    reason: String,
    message: String,
    field_errors: Vec<FieldError>,
}

impl Error {
    fn new(kind: ErrorKind, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let message = kind
            .prefix()
            .map_or_else(|| reason.clone(), |prefix| format!("{prefix}: {reason}"));
        Self {
            kind,
            reason,
            message,
            field_errors: Vec::new(),
        }
    }

    /// The request could not complete, or the API answered with an `Error`
    /// string. The reason is used verbatim as the message.
    pub fn request_failed(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestFailed, reason)
    }

    /// The API answered HTTP 401.
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, reason)
    }

    /// An argument was rejected.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, reason)
    }

    /// The API rejected one or more fields. Every pair is kept, in order.
    #[must_use]
    pub fn invalid_fields(field_errors: Vec<FieldError>) -> Self {
        let summary = field_errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        let mut error = Self::new(ErrorKind::InvalidArgument, summary);
        error.field_errors = field_errors;
        error
    }

    /// The body could not be interpreted.
    pub fn invalid_json_in_response(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidJsonInResponse, reason)
    }

    /// Authentication was refused.
    pub fn could_not_login(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::CouldNotLogin, reason)
    }

    /// Adding a favorite failed.
    pub fn could_not_add_favorite(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::CouldNotAddFavorite, reason)
    }

    /// Removing a favorite failed.
    pub fn could_not_remove_favorite(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::CouldNotRemoveFavorite, reason)
    }

    /// Storing a rating failed.
    pub fn could_not_add_or_update_user_rating(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::CouldNotAddOrUpdateUserRating, reason)
    }

    /// Removing a rating failed.
    pub fn could_not_remove_user_rating(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::CouldNotRemoveUserRating, reason)
    }

    /// Failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Reason without the kind prefix.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Formatted message (same as `Display`).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field-level messages for `InvalidArgument` errors built from `errors`.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Returns `true` for HTTP 401 failures; the caller must re-authenticate.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// Re-labels an action failure while keeping transport, authorization
    /// and decoding failures as they are.
    pub(crate) fn remap_action(self, to: fn(String) -> Self) -> Self {
        match self.kind {
            ErrorKind::RequestFailed | ErrorKind::InvalidArgument if self.field_errors.is_empty() => {
                to(self.reason)
            }
            ErrorKind::InvalidArgument => {
                let mut remapped = to(self.reason);
                remapped.field_errors = self.field_errors;
                remapped
            }
            _ => self,
        }
    }
}
