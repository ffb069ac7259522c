//! `Range` header parsing and chunk window resolution.

use crate::{MediaError, MediaResult, RangeMode, RangeRequest, RangeWindow};

/// Parse a raw `Range` header value according to `mode`.
pub fn parse_range(value: &str, mode: RangeMode) -> MediaResult<RangeRequest> {
    match mode {
        RangeMode::Permissive => Ok(parse_permissive(value)),
        RangeMode::Strict => parse_strict(value),
    }
}

/// Keep only ASCII digits and read them as the start offset.
///
/// No digits at all reads as 0. A digit run too large for `u64` saturates,
/// which later resolves as unsatisfiable.
pub fn parse_permissive(value: &str) -> RangeRequest {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = if digits.is_empty() {
        0
    } else {
        digits.parse::<u64>().unwrap_or(u64::MAX)
    };
    RangeRequest::from_start(start)
}

/// Single range in the `bytes` unit: `bytes=<start>-[<end>]` or `bytes=-<suffix>`.
pub fn parse_strict(value: &str) -> MediaResult<RangeRequest> {
    let malformed = || MediaError::malformed(value);

    let spec = value
        .trim()
        .strip_prefix("bytes=")
        .ok_or_else(malformed)?
        .trim();

    if spec.is_empty() || spec.contains(',') {
        return Err(malformed());
    }

    let (start, end) = spec.split_once('-').ok_or_else(malformed)?;
    let (start, end) = (start.trim(), end.trim());

    if start.is_empty() {
        let length = parse_offset(end).ok_or_else(malformed)?;
        return Ok(RangeRequest::Suffix { length });
    }

    let start = parse_offset(start).ok_or_else(malformed)?;
    if end.is_empty() {
        return Ok(RangeRequest::from_start(start));
    }

    let end = parse_offset(end).ok_or_else(malformed)?;
    if end < start {
        return Err(malformed());
    }
    Ok(RangeRequest::bounded(start, end))
}

fn parse_offset(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Resolve a request against the resource size, capping the window at `chunk_size` bytes.
pub fn resolve_window(request: RangeRequest, total: u64, chunk_size: u64) -> MediaResult<RangeWindow> {
    let chunk_size = chunk_size.max(1);
    let unsatisfiable = MediaError::RangeNotSatisfiable { total };

    let (start, requested_end) = match request {
        RangeRequest::FromStart { start, end } => (start, end),
        RangeRequest::Suffix { length } => {
            if length == 0 {
                return Err(unsatisfiable);
            }
            (total.saturating_sub(length), None)
        }
    };

    if start >= total {
        return Err(unsatisfiable);
    }

    let last = total - 1;
    let chunk_end = start.saturating_add(chunk_size - 1);
    let end = requested_end.unwrap_or(u64::MAX).min(chunk_end).min(last);

    Ok(RangeWindow { start, end, total })
}
