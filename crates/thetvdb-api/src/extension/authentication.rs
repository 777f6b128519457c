//! `/login` and `/refresh_token`.

use tracing::instrument;

use super::{fetch, send};
use crate::error::{Error, ErrorKind, Result};
use crate::model::{Credentials, Token};
use crate::response::{ResponseHandler, method};
use crate::transport::{HttpMethod, LocalTransport, RequestOptions};

/// Token acquisition.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct AuthenticationExtension<'a, T> {
    transport: &'a T,
}

impl<'a, T: LocalTransport> AuthenticationExtension<'a, T> {
    /// Creates the extension over `transport`.
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for incomplete credentials (no request is sent).
    /// - `CouldNotLogin` if the API refuses the credentials.
    /// - `RequestFailed` / `InvalidJsonInResponse` as for any call.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: &Credentials) -> Result<Token> {
        let body = credentials.to_login_body()?;
        let response = send(
            self.transport,
            HttpMethod::Post,
            "/login",
            RequestOptions::new().json(body),
        )
        .await?;

        ResponseHandler::from_response(response, method::Login)
            .handle()
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidJsonInResponse => e,
                _ => Error::could_not_login(e.reason()),
            })
    }

    /// Exchanges the current token for a fresh one.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the current token is missing or expired.
    /// - `RequestFailed` / `InvalidJsonInResponse` as for any call.
    #[instrument(skip_all)]
    pub async fn refresh_token(&self) -> Result<Token> {
        fetch(
            self.transport,
            HttpMethod::Get,
            "/refresh_token",
            RequestOptions::new(),
            method::RefreshToken,
        )
        .await
    }
}
