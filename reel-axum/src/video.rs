use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Response,
};

use crate::{ReelAxumError, ReelAxumState};

/// `GET /video.mp4`: one partial-content window of the media file.
///
/// A request without `Range` is rejected with 400; a full 200 body is never sent.
/// Non-UTF-8 bytes in the header read as non-digits.
pub async fn stream_video(
    State(state): State<ReelAxumState>,
    headers: HeaderMap,
) -> Result<Response, ReelAxumError> {
    let range = headers
        .get(header::RANGE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()));

    let opened = state.streamer.handle(range.as_deref()).await?;

    let res = Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(header::CONTENT_RANGE, opened.content_range())
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CONTENT_LENGTH, opened.content_length())
        .header(header::CONTENT_TYPE, opened.content_type.as_str())
        .body(Body::from_stream(opened.body))
        .map_err(anyhow::Error::from)?;

    Ok(res)
}
