//! Signature validation against real bytes.

use crate::traits::ByteSource;
use crate::types::{FileSignature, Pattern};
use std::io;
use tracing::trace;

/// Checks whether `source` carries `signature`'s header and trailer.
///
/// A source too short to hold a pattern is a non-match, not an error; only
/// genuine read failures are returned as `Err`. A signature with neither a
/// header nor a trailer never matches. The position of any cursor inside
/// `source` is unspecified afterwards.
pub fn validate<S>(signature: &FileSignature, source: &mut S) -> io::Result<bool>
where
    S: ByteSource + ?Sized,
{
    if !signature.has_content_pattern() {
        return Ok(false);
    }

    if let Some(header) = signature.header() {
        if !pattern_at(source, signature.header_offset(), header)? {
            trace!(signature = signature.description(), "header mismatch");
            return Ok(false);
        }
    }

    if let Some(trailer) = signature.trailer() {
        let Some(offset) = source.size().checked_sub(trailer.len() as u64) else {
            return Ok(false);
        };
        if !pattern_at(source, offset, trailer)? {
            trace!(signature = signature.description(), "trailer mismatch");
            return Ok(false);
        }
    }

    trace!(signature = signature.description(), "matched");
    Ok(true)
}

fn pattern_at<S>(source: &mut S, offset: u64, pattern: &Pattern) -> io::Result<bool>
where
    S: ByteSource + ?Sized,
{
    let mut buffer = vec![0u8; pattern.len()];
    if !source.read_exact_at(offset, &mut buffer)? {
        return Ok(false);
    }
    Ok(pattern.matches(&buffer))
}
