//! Authentication types.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Bearer token issued by `/login` or `/refresh_token`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wraps a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Login credentials. The user name and user key travel together.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key (required).
    pub api_key: String,
    /// Account user name.
    pub username: Option<String>,
    /// Account unique key.
    pub user_key: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("username", &self.username)
            .field("user_key", &self.user_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    /// Credentials with an API key only.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            username: None,
            user_key: None,
        }
    }

    /// Adds a user account.
    #[must_use]
    pub fn user(mut self, username: impl Into<String>, user_key: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.user_key = Some(user_key.into());
        self
    }

    /// Builds the `/login` request body.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the API key is empty or only one of
    /// user name and user key is set.
    pub fn to_login_body(&self) -> Result<Value> {
        if self.api_key.trim().is_empty() {
            return Err(Error::invalid_argument("api key must not be empty"));
        }

        let mut body = Map::new();
        body.insert(String::from("apikey"), Value::from(self.api_key.as_str()));
        match (&self.username, &self.user_key) {
            (Some(username), Some(user_key)) => {
                body.insert(String::from("username"), Value::from(username.as_str()));
                body.insert(String::from("userkey"), Value::from(user_key.as_str()));
            }
            (None, None) => {}
            _ => {
                return Err(Error::invalid_argument(
                    "username and user key must be given together",
                ));
            }
        }

        Ok(Value::Object(body))
    }
}
