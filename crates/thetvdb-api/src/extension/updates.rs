//! `/updated/query`.

use chrono::{DateTime, Utc};
use tracing::instrument;

use super::fetch;
use crate::error::{Error, Result};
use crate::model::UpdateData;
use crate::response::method;
use crate::transport::{HttpMethod, LocalTransport, RequestOptions};

/// Series changed within a time interval.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct UpdatesExtension<'a, T> {
    transport: &'a T,
}

impl<'a, T: LocalTransport> UpdatesExtension<'a, T> {
    /// Creates the extension over `transport`.
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Lists series updated between `from` and `to` (or the API's default
    /// interval length when `to` is `None`).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `to` is before `from`; otherwise as for any call.
    #[instrument(skip_all)]
    pub async fn query(
        &self,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<UpdateData>> {
        let mut options = RequestOptions::new().query("fromTime", from.timestamp().to_string());
        if let Some(to) = to {
            if to < from {
                return Err(Error::invalid_argument(format!(
                    "toTime ({to}) is before fromTime ({from})"
                )));
            }
            options = options.query("toTime", to.timestamp().to_string());
        }

        tracing::debug!(from = %from, to = ?to, "querying updates");

        fetch(
            self.transport,
            HttpMethod::Get,
            "/updated/query",
            options,
            method::Updates,
        )
        .await
    }
}
