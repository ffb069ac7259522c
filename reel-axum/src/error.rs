use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use reel_core::{ErrorKind, ReelError};
use reel_media::{unsatisfied_content_range, MediaError};
use serde_json::json;
use tracing::{debug, error};

#[derive(Debug)]
pub struct ReelAxumError(pub anyhow::Error);

impl From<anyhow::Error> for ReelAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<ReelError> for ReelAxumError {
    fn from(e: ReelError) -> Self {
        Self(e.into_anyhow())
    }
}

impl From<MediaError> for ReelAxumError {
    fn from(e: MediaError) -> Self {
        media_error(e).into()
    }
}

/// Classify a streaming failure into a status-carrying error
pub fn media_error(e: MediaError) -> ReelError {
    match e {
        MediaError::MissingRange | MediaError::MalformedRange { .. } => ReelError::bad_request(e.to_string()),
        MediaError::RangeNotSatisfiable { total } => {
            ReelError::range_not_satisfiable("Range Not Satisfiable").with_data(json!({ "total": total }))
        }
        MediaError::NotFound { .. } => ReelError::not_found("Media not found").with_source(e.into()),
        MediaError::Io { .. } => ReelError::general_error(e.to_string()).with_source(e.into()),
    }
}

impl IntoResponse for ReelAxumError {
    fn into_response(self) -> Response {
        // Look through anyhow contexts for the ReelError, if any
        let found = self
            .0
            .chain()
            .find_map(|e| e.downcast_ref::<ReelError>())
            .map(ReelError::sanitize_for_client);

        if found.as_ref().map_or(true, |reel| reel.kind.is_server_error()) {
            error!("request failed: {:#}", self.0);
        }

        let reel = match found {
            Some(reel) => reel,
            None => ReelError::normalize(self.0).sanitize_for_client(),
        };

        if !reel.kind.is_server_error() {
            debug!(code = reel.code(), message = %reel.message, "request rejected");
        }

        let status = StatusCode::from_u16(reel.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut res = (status, reel.message).into_response();

        if reel.kind == ErrorKind::RangeNotSatisfiable {
            let total = reel.data.as_ref().and_then(|d| d["total"].as_u64());
            if let Some(value) = total.and_then(|t| HeaderValue::from_str(&unsatisfied_content_range(t)).ok()) {
                res.headers_mut().insert(header::CONTENT_RANGE, value);
            }
        }
        res
    }
}
