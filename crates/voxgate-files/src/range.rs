use http::HeaderValue;

use crate::error::{FileError, Result};

/// An inclusive byte range within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub const fn length(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Interpret a `Range` header against a file of `size` bytes
///
/// Only a single `bytes=` range is honored. Missing, malformed or
/// multi-range headers yield `Ok(None)` and the whole file is served.
/// A well-formed range that starts past the end is an error.
pub fn parse_range(header: Option<&HeaderValue>, size: u64) -> Result<Option<ByteRange>> {
    let Some(spec) = header
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().strip_prefix("bytes="))
    else {
        return Ok(None);
    };

    if spec.contains(',') {
        return Ok(None);
    }

    let Some((start, end)) = spec.trim().split_once('-') else {
        return Ok(None);
    };

    let range = match (start.trim(), end.trim()) {
        ("", "") => return Ok(None),
        // Suffix range: the last N bytes
        ("", suffix) => {
            let Ok(suffix) = suffix.parse::<u64>() else {
                return Ok(None);
            };
            if suffix == 0 || size == 0 {
                return Err(FileError::RangeNotSatisfiable { size });
            }
            ByteRange {
                start: size.saturating_sub(suffix),
                end: size - 1,
            }
        }
        (start, end) => {
            let Ok(start) = start.parse::<u64>() else {
                return Ok(None);
            };
            let end = if end.is_empty() {
                u64::MAX
            } else {
                let Ok(end) = end.parse::<u64>() else {
                    return Ok(None);
                };
                end
            };
            if end < start {
                return Ok(None);
            }
            if start >= size {
                return Err(FileError::RangeNotSatisfiable { size });
            }
            ByteRange {
                start,
                end: end.min(size - 1),
            }
        }
    };

    Ok(Some(range))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &'static str, size: u64) -> Result<Option<ByteRange>> {
        parse_range(Some(&HeaderValue::from_static(value)), size)
    }

    #[test]
    fn absent_header_serves_everything() {
        assert_eq!(parse_range(None, 100).unwrap(), None);
    }

    #[test]
    fn closed_range() {
        assert_eq!(parse("bytes=0-9", 100).unwrap(), Some(ByteRange { start: 0, end: 9 }));
        assert_eq!(parse("bytes=90-200", 100).unwrap(), Some(ByteRange { start: 90, end: 99 }));
    }

    #[test]
    fn open_ended_range() {
        let range = parse("bytes=40-", 100).unwrap().unwrap();
        assert_eq!(range, ByteRange { start: 40, end: 99 });
        assert_eq!(range.length(), 60);
    }

    #[test]
    fn suffix_range() {
        assert_eq!(parse("bytes=-10", 100).unwrap(), Some(ByteRange { start: 90, end: 99 }));
        assert_eq!(parse("bytes=-500", 100).unwrap(), Some(ByteRange { start: 0, end: 99 }));
    }

    #[test]
    fn start_past_end_is_unsatisfiable() {
        assert!(matches!(
            parse("bytes=100-", 100),
            Err(FileError::RangeNotSatisfiable { size: 100 })
        ));
        assert!(matches!(
            parse("bytes=-0", 100),
            Err(FileError::RangeNotSatisfiable { .. })
        ));
    }

    #[test]
    fn malformed_and_multi_ranges_are_ignored() {
        assert_eq!(parse("bytes=abc-def", 100).unwrap(), None);
        assert_eq!(parse("bytes=9-1", 100).unwrap(), None);
        assert_eq!(parse("items=0-1", 100).unwrap(), None);
        assert_eq!(parse("bytes=0-1,5-6", 100).unwrap(), None);
    }
}
