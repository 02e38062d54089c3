//! Response helpers for HTTP handlers.

use std::fmt::Display;

use salvo::{
    http::header::LOCATION,
    prelude::{Response, StatusCode, StatusError},
};
use tracing::error;

/// Helpers for shaping handler responses.
pub(crate) trait ResponseExt {
    /// Mark the response `201 Created` with a `Location` pointing at the new resource.
    fn respond_created(&mut self, location: impl Display) -> Result<&mut Self, StatusError>;
}

impl ResponseExt for Response {
    fn respond_created(&mut self, location: impl Display) -> Result<&mut Self, StatusError> {
        let location = location.to_string();

        self.add_header(LOCATION, location.as_str(), true)
            .map_err(|error| {
                error!(%location, %error, "invalid location header");

                StatusError::internal_server_error()
            })?
            .status_code(StatusCode::CREATED);

        Ok(self)
    }
}
