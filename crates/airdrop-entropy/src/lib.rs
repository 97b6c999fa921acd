//! airdrop-entropy
//!
//! Turns a block's witness signature into reproducible integer material:
//! optional hashing, digit mapping, and fixed-width chunk parsing.

pub mod chunk;
pub mod digest;

pub use chunk::{chunk_values, chunks, parse_chunk, reverse_chunk, reversed_chunk_values};
pub use digest::{digitize, hash_signature, DigitStream, HashMode};
