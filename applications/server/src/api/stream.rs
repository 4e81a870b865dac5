/// Audio streaming API
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use std::io::SeekFrom;
use tingting_core::{AudioFormat, TrackId};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

/// Size of each streamed chunk
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// GET /api/tracks/:id/stream
/// Stream audio file with range request support
pub async fn stream_track(
    Path(track_id): Path<TrackId>,
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response> {
    let track = app_state
        .db
        .get_track(track_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Track not found".to_string()))?;

    // A catalog row can outlive its file
    let metadata = match tokio::fs::metadata(&track.file_path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(ServerError::NotFound("File not found".to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ServerError::NotFound("File not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    let file_size = metadata.len();

    let mime_type = AudioFormat::from_extension(&track.file_type)
        .map_or(AudioFormat::DEFAULT_MIME_TYPE, |format| format.mime_type());

    let range = headers
        .get(header::RANGE)
        .map(|range| {
            range
                .to_str()
                .map_err(|_| ServerError::BadRequest("Invalid Range header".to_string()))
        })
        .transpose()?
        .and_then(|range| parse_range(range, file_size));

    let mut file = File::open(&track.file_path).await?;

    if let Some((start, end)) = range {
        file.seek(SeekFrom::Start(start)).await?;

        let content_length = end - start + 1;
        let reader = ReaderStream::with_capacity(file.take(content_length), CHUNK_SIZE);

        return Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::CONTENT_TYPE, mime_type)
            .header(header::CONTENT_LENGTH, content_length)
            .header(
                header::CONTENT_RANGE,
                format!("bytes {}-{}/{}", start, end, file_size),
            )
            .header(header::ACCEPT_RANGES, "bytes")
            .body(Body::from_stream(reader))
            .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)));
    }

    // No usable range - stream entire file
    let reader = ReaderStream::with_capacity(file, CHUNK_SIZE);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_type)
        .header(header::CONTENT_LENGTH, file_size)
        .header(header::ACCEPT_RANGES, "bytes")
        .body(Body::from_stream(reader))
        .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)))
}

/// Parse HTTP Range header
/// Format: "bytes=start-end"
fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    let range = range.strip_prefix("bytes=")?;

    if let Some((start_str, end_str)) = range.split_once('-') {
        let start: u64 = start_str.parse().ok()?;
        let end: u64 = if end_str.is_empty() {
            file_size.checked_sub(1)?
        } else {
            end_str.parse::<u64>().ok()?.min(file_size.checked_sub(1)?)
        };

        if start <= end && end < file_size {
            return Some((start, end));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("bytes=0-999", 10000), Some((0, 999)));
        assert_eq!(parse_range("bytes=1000-", 10000), Some((1000, 9999)));
        assert_eq!(parse_range("bytes=0-9999", 10000), Some((0, 9999)));
        assert_eq!(parse_range("bytes=10000-", 10000), None); // Out of bounds
        assert_eq!(parse_range("invalid", 10000), None);
    }

    #[test]
    fn test_parse_range_clamps_end_and_rejects_empty_file() {
        assert_eq!(parse_range("bytes=10-50000", 100), Some((10, 99)));
        assert_eq!(parse_range("bytes=0-", 0), None);
        assert_eq!(parse_range("bytes=50-10", 100), None);
    }
}
