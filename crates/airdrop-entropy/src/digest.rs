use std::fmt;
use std::str::FromStr;

use airdrop_core::error::AirdropError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use tracing::debug;

/// Optional pre-hash applied to the raw signature before digit mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashMode {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "sha512", alias = "hash-512")]
    Sha512,
    #[serde(rename = "sha256", alias = "hash-256")]
    Sha256,
}

impl HashMode {
    pub fn as_str(self) -> &'static str {
        match self {
            HashMode::None => "none",
            HashMode::Sha512 => "sha512",
            HashMode::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashMode {
    type Err = AirdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(HashMode::None),
            "sha512" | "hash-512" => Ok(HashMode::Sha512),
            "sha256" | "hash-256" => Ok(HashMode::Sha256),
            other => Err(AirdropError::UnknownHashMode(other.to_string())),
        }
    }
}

/// Apply the configured hash to the raw signature bytes, returning lowercase hex.
/// `HashMode::None` returns the signature unchanged.
pub fn hash_signature(signature: &str, mode: HashMode) -> String {
    match mode {
        HashMode::None => signature.to_string(),
        HashMode::Sha512 => hex::encode(Sha512::digest(signature.as_bytes())),
        HashMode::Sha256 => hex::encode(Sha256::digest(signature.as_bytes())),
    }
}

/// Map every non-digit character to the decimal string of its code point.
///
/// `digitize("a1b") == "971198"`.
pub fn digitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else {
            out.push_str(&u32::from(c).to_string());
        }
    }
    out
}

/// Canonical decimal digit stream derived from a block signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigitStream(String);

impl DigitStream {
    pub fn from_signature(signature: &str, mode: HashMode) -> Self {
        let hashed = hash_signature(signature, mode);
        let digits = digitize(&hashed);
        debug!(
            hash = %mode,
            signature_len = signature.len(),
            digits = digits.len(),
            "signature digitized"
        );
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DigitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digitize_maps_letters_to_char_codes() {
        assert_eq!(digitize("a1b"), "971198");
        assert_eq!(digitize("0123"), "0123");
        assert_eq!(digitize(""), "");
    }

    #[test]
    fn digit_stream_is_never_shorter_and_all_digits() {
        let sig = "1f2e3d4c5b6a-_XYZ€";
        let stream = DigitStream::from_signature(sig, HashMode::None);
        assert!(stream.len() >= sig.chars().count());
        assert!(stream.as_str().chars().all(|c| c.is_ascii_digit()));
        // '€' is U+20AC.
        assert!(stream.as_str().ends_with("8364"));
    }

    #[test]
    fn sha256_digest_is_lowercase_hex() {
        let hashed = hash_signature("abc", HashMode::Sha256);
        assert_eq!(
            hashed,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha512_digest_has_128_hex_chars() {
        let hashed = hash_signature("abc", HashMode::Sha512);
        assert_eq!(hashed.len(), 128);
        assert!(hashed.starts_with("ddaf35a193617aba"));
    }

    #[test]
    fn hash_mode_parsing() {
        assert_eq!("hash-512".parse::<HashMode>().unwrap(), HashMode::Sha512);
        assert_eq!("SHA256".parse::<HashMode>().unwrap(), HashMode::Sha256);
        assert_eq!("none".parse::<HashMode>().unwrap(), HashMode::None);
        assert!(matches!(
            "md5".parse::<HashMode>(),
            Err(AirdropError::UnknownHashMode(_))
        ));
    }

    #[test]
    fn same_input_same_stream() {
        let a = DigitStream::from_signature("deadbeef", HashMode::Sha512);
        let b = DigitStream::from_signature("deadbeef", HashMode::Sha512);
        assert_eq!(a, b);
        assert_ne!(a, DigitStream::from_signature("deadbeef", HashMode::Sha256));
    }
}
