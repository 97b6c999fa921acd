//! JSON-file backed collaborators.
//!
//! The chain-facing fetchers write their results to disk; these readers feed
//! them back into the lottery core.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use airdrop_core::error::AirdropError;
use airdrop_core::source::{SignatureSource, TicketSource};
use airdrop_core::types::{AccountId, LeaderboardEntry, LedgerEntry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AirdropError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AirdropError::Io(format!("reading {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| AirdropError::Serialization(format!("parsing {}: {e}", path.display())))
}

/// Write `value` as 4-space indented JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AirdropError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| AirdropError::Serialization(e.to_string()))?;
    std::fs::write(path, out)
        .map_err(|e| AirdropError::Io(format!("writing {}: {e}", path.display())))
}

/// `tickets.json`: an array of raw ticket records.
pub struct TicketFile {
    path: PathBuf,
}

impl TicketFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TicketSource for TicketFile {
    fn tickets(&self) -> Result<Vec<LedgerEntry>, AirdropError> {
        read_json(&self.path)
    }
}

/// A JSON object mapping block numbers to witness signatures.
pub struct SignatureFile {
    blocks: BTreeMap<u64, String>,
}

impl SignatureFile {
    pub fn open(path: &Path) -> Result<Self, AirdropError> {
        Ok(Self {
            blocks: read_json(path)?,
        })
    }
}

impl SignatureSource for SignatureFile {
    fn block_signature(&self, block_number: u64) -> Result<String, AirdropError> {
        self.blocks.block_signature(block_number)
    }
}

#[derive(Deserialize)]
struct NamedAccount {
    id: AccountId,
    name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameFile {
    Map(BTreeMap<AccountId, String>),
    List(Vec<NamedAccount>),
}

/// Account names, either `{"1.2.3": "alice"}` or `[{"id": "1.2.3", "name": "alice"}]`.
pub fn load_names(path: &Path) -> Result<BTreeMap<AccountId, String>, AirdropError> {
    Ok(match read_json::<NameFile>(path)? {
        NameFile::Map(map) => map,
        NameFile::List(list) => list.into_iter().map(|a| (a.id, a.name)).collect(),
    })
}

pub fn load_leaderboard(path: &Path) -> Result<Vec<LeaderboardEntry>, AirdropError> {
    read_json(path)
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AirdropError> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("airdrop_sources_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn names_in_both_shapes() {
        let dir = scratch("names");
        let map = dir.join("map.json");
        let list = dir.join("list.json");
        std::fs::write(&map, r#"{"1.2.3": "alice"}"#).unwrap();
        std::fs::write(&list, r#"[{"id": "1.2.3", "name": "alice"}]"#).unwrap();
        assert_eq!(load_names(&map).unwrap(), load_names(&list).unwrap());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn signature_file_by_block() {
        let dir = scratch("sigs");
        let path = dir.join("blocks.json");
        std::fs::write(&path, r#"{"100": "abcdef", "101": "012345"}"#).unwrap();
        let file = SignatureFile::open(&path).unwrap();
        assert_eq!(file.block_signature(101).unwrap(), "012345");
        assert_eq!(
            file.block_signature(5),
            Err(AirdropError::SignatureUnavailable(5))
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TicketFile::new("/nonexistent/tickets.json").tickets().unwrap_err();
        assert!(matches!(err, AirdropError::Io(_)));
    }

    #[test]
    fn written_json_reads_back() {
        let dir = scratch("roundtrip");
        let path = dir.join("out.json");
        let names: BTreeMap<String, String> =
            [("1.2.3".to_string(), "bob".to_string())].into_iter().collect();
        write_json(&path, &names).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("    \"1.2.3\": \"bob\""));
        assert_eq!(load_names(&path).unwrap(), names);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
