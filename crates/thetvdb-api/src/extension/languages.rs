//! `/languages`.

use tracing::instrument;

use super::fetch;
use crate::error::Result;
use crate::model::LanguageData;
use crate::response::method;
use crate::transport::{HttpMethod, LocalTransport, RequestOptions};

/// Supported languages.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct LanguagesExtension<'a, T> {
    transport: &'a T,
}

impl<'a, T: LocalTransport> LanguagesExtension<'a, T> {
    /// Creates the extension over `transport`.
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Lists every language.
    ///
    /// # Errors
    ///
    /// As for any call.
    #[instrument(skip_all)]
    pub async fn all(&self) -> Result<Vec<LanguageData>> {
        fetch(
            self.transport,
            HttpMethod::Get,
            "/languages",
            RequestOptions::new(),
            method::Languages,
        )
        .await
    }

    /// Fetches one language by ID.
    ///
    /// # Errors
    ///
    /// `RequestFailed` if the language does not exist; otherwise as for any call.
    #[instrument(skip_all, fields(language_id = id))]
    pub async fn get(&self, id: u64) -> Result<LanguageData> {
        fetch(
            self.transport,
            HttpMethod::Get,
            &format!("/languages/{id}"),
            RequestOptions::new(),
            method::Language,
        )
        .await
    }
}
