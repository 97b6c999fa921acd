//! Drives the `airdrop` binary through its file-based workflow.
//!
//! Run with:
//!   cargo test -p airdrop-cli --test cli

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

struct Workdir(PathBuf);

impl Workdir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("airdrop_cli_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.0.join(file)
    }
}

impl Drop for Workdir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn airdrop(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_airdrop"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn airdrop binary")
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    serde_json::from_str(&text).expect("valid JSON")
}

const TICKETS: &str = r#"[
    {"id": "1.18.0", "account": "1.2.100", "current_type": "lock_360_days",
     "amount": {"amount": "2500000", "asset_id": "1.3.0"}},
    {"id": "1.18.1", "account": "1.2.200", "current_type": "lock_180_days",
     "amount": {"amount": "1000000", "asset_id": "1.3.0"}},
    {"id": "1.18.2", "account": "1.2.300", "current_type": "liquid",
     "amount": {"amount": "99900000", "asset_id": "1.3.0"}},
    {"id": "1.18.1", "account": "1.2.200", "current_type": "lock_180_days",
     "amount": {"amount": "1000000", "asset_id": "1.3.0"}}
]"#;

#[test]
fn leaderboard_then_airdrop() {
    let dir = Workdir::new("flow");
    std::fs::write(dir.path("tickets.json"), TICKETS).unwrap();
    std::fs::write(dir.path("names.json"), r#"[{"id": "1.2.100", "name": "alice"}]"#).unwrap();

    let leaderboard = dir.path("leaderboard.json");
    let locked = dir.path("locked.json");
    let out = airdrop(&[
        "leaderboard",
        "--tickets",
        dir.path("tickets.json").to_str().unwrap(),
        "--names",
        dir.path("names.json").to_str().unwrap(),
        "--out",
        leaderboard.to_str().unwrap(),
        "--locked-out",
        locked.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let board = read_json(&leaderboard);
    assert_eq!(board.as_array().unwrap().len(), 2);
    assert_eq!(board[0]["id"], "1.2.100");
    assert_eq!(board[0]["name"], "alice");
    assert_eq!(board[0]["range"]["to"], 100);
    assert_eq!(board[1]["name"], "???");
    assert_eq!(board[1]["range"]["from"], 101);
    assert_eq!(board[1]["range"]["to"], 121);
    assert_eq!(read_json(&locked).as_array().unwrap().len(), 2);

    let result = dir.path("airdrop.json");
    let out = airdrop(&[
        "airdrop",
        "--leaderboard",
        leaderboard.to_str().unwrap(),
        "--block",
        "4242",
        "--signature",
        "000000050000000150999999999",
        "--methods",
        "forward",
        "--normalization",
        "strict",
        "--reward-pool",
        "300",
        "--out",
        result.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let artifact = read_json(&result);
    assert_eq!(artifact["block_number"], 4242);
    assert_eq!(artifact["generation_methods"][0], "forward");
    assert_eq!(artifact["total_draws"], 3);
    assert_eq!(artifact["result"][0]["id"], "1.2.100");
    assert_eq!(artifact["result"][0]["numbers"][0], 50);
    assert_eq!(artifact["result"][0]["percent"], 33.33333);
    assert_eq!(artifact["result"][0]["reward"], 99.99999);
}

#[test]
fn signature_file_and_config_file() {
    let dir = Workdir::new("config");
    std::fs::write(dir.path("tickets.json"), TICKETS).unwrap();
    std::fs::write(dir.path("blocks.json"), r#"{"7": "1f2e3d4c5b6a7980"}"#).unwrap();
    std::fs::write(
        dir.path("config.json"),
        r#"{"hash": "sha512", "methods": ["cubed", "alien_blood"], "reward_pool": 10}"#,
    )
    .unwrap();

    let leaderboard = dir.path("leaderboard.json");
    let out = airdrop(&[
        "leaderboard",
        "--tickets",
        dir.path("tickets.json").to_str().unwrap(),
        "--out",
        leaderboard.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let result = dir.path("airdrop.json");
    let out = airdrop(&[
        "airdrop",
        "--leaderboard",
        leaderboard.to_str().unwrap(),
        "--block",
        "7",
        "--signatures",
        dir.path("blocks.json").to_str().unwrap(),
        "--config",
        dir.path("config.json").to_str().unwrap(),
        "--out",
        result.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let artifact = read_json(&result);
    assert_eq!(artifact["hash"], "sha512");
    assert_eq!(artifact["normalization"], "wraparound");
    assert_eq!(artifact["generation_methods"][1], "alien_blood");

    // Unknown block in the signature file fails the whole run.
    let out = airdrop(&[
        "airdrop",
        "--leaderboard",
        leaderboard.to_str().unwrap(),
        "--block",
        "8",
        "--signatures",
        dir.path("blocks.json").to_str().unwrap(),
        "--out",
        dir.path("unused.json").to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("signature unavailable for block 8"));
}

#[test]
fn unknown_method_is_rejected() {
    let out = airdrop(&["draws", "--block", "1", "--signature", "abc", "--methods", "tubes"]);
    assert!(!out.status.success());
}

#[test]
fn methods_lists_registry() {
    let out = airdrop(&["methods"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    for name in ["forward", "reverse_pi", "bouncing_ball", "fish_splinter_slow"] {
        assert!(text.contains(name), "missing {name}");
    }
}
