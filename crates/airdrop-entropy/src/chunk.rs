use airdrop_core::error::AirdropError;
use tracing::debug;

use crate::digest::DigitStream;

/// Slice a digit stream into consecutive width-`width` pieces.
///
/// A trailing remainder shorter than `width` is discarded, as is any piece
/// that is not pure ASCII digits. A zero width yields nothing.
pub fn chunks(stream: &str, width: usize) -> Vec<&str> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(stream.len() / width);
    let mut dropped = 0usize;
    for piece in stream.as_bytes().chunks_exact(width) {
        match std::str::from_utf8(piece) {
            Ok(text) if text.bytes().all(|b| b.is_ascii_digit()) => out.push(text),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(width, dropped, "malformed chunks skipped");
    }
    out
}

/// Parse chunk text as a base-10 integer, skipping leading zeros.
///
/// `"000045"` is 45 and `"000000"` is 0. Empty, non-digit, or overflowing
/// text is a `MalformedChunk` error.
pub fn parse_chunk(text: &str) -> Result<u64, AirdropError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AirdropError::MalformedChunk(text.to_string()));
    }
    match text.find(|c: char| c != '0') {
        None => Ok(0),
        Some(start) => text[start..]
            .parse::<u64>()
            .map_err(|_| AirdropError::MalformedChunk(text.to_string())),
    }
}

/// Reverse the digit order of a chunk. Leading zeros produced by the reversal
/// are dropped when the result is parsed, so a double reversal does not always
/// round-trip through `parse_chunk`.
pub fn reverse_chunk(text: &str) -> String {
    text.chars().rev().collect()
}

/// Parsed width-`width` chunks of the stream, in stream order.
pub fn chunk_values(stream: &DigitStream, width: usize) -> Vec<u64> {
    chunks(stream.as_str(), width)
        .into_iter()
        .filter_map(|c| parse_chunk(c).ok())
        .collect()
}

/// Parsed width-`width` chunks with each chunk's digits reversed first.
pub fn reversed_chunk_values(stream: &DigitStream, width: usize) -> Vec<u64> {
    chunks(stream.as_str(), width)
        .into_iter()
        .filter_map(|c| parse_chunk(&reverse_chunk(c)).ok())
        .collect()
}
