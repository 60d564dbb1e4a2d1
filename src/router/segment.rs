//! Path segmentation
//!
//! Splits a request path into the segment sequence used as the trie key.
//!
//! Rules (literal, no normalization):
//! - `"/"` is the single segment `["/"]`
//! - every other segment starts at a `/` and runs up to the next `/`
//! - the first segment always starts at index 0, whatever the first byte is
//! - the empty path has no segments
//!
//! There is no percent-decoding, no collapsing of repeated separators and
//! no trailing-slash stripping, so `"/a/"` and `"/a"` are different routes.
//! Concatenating the segments always reproduces the input path.

const SEPARATOR: u8 = b'/';

/// Split `path` into borrowed segments
///
/// # Examples
///
/// ```
/// use segroute::router::segment;
///
/// assert_eq!(segment("/"), vec!["/"]);
/// assert_eq!(segment("/api/v1/data"), vec!["/api", "/v1", "/data"]);
/// ```
pub fn segment(path: &str) -> Vec<&str> {
    if path == "/" {
        return vec![path];
    }

    let bytes = path.as_bytes();
    let mut segments = Vec::with_capacity(8);
    let mut start = 0;

    // Index 0 never opens a new segment; it belongs to the first one.
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if b == SEPARATOR {
            segments.push(&path[start..i]);
            start = i;
        }
    }

    if start < path.len() {
        segments.push(&path[start..]);
    }

    segments
}
