//! End-to-end tests for the `dex` binary. Nothing here needs the live API; each test
//! gets its own data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn dex(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dex").unwrap();
    cmd.env("DEX_DATA_DIR", data_dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("DEX_API_BASE");
    cmd
}

const TEAM_JSON: &str = r#"[
  {
    "id": 25,
    "name": "pikachu",
    "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": ""}},
              {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": ""}}],
    "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}],
    "abilities": [],
    "sprites": {}
  },
  {
    "id": 1,
    "name": "bulbasaur",
    "types": [{"slot": 1, "type": {"name": "grass", "url": ""}},
              {"slot": 2, "type": {"name": "poison", "url": ""}}]
  }
]"#;

#[test]
fn test_help_lists_commands() {
    let temp = tempfile::tempdir().unwrap();
    dex(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("filter"))
        .stdout(predicate::str::contains("team"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn test_empty_team_has_six_empty_slots() {
    let temp = tempfile::tempdir().unwrap();
    let output = dex(temp.path()).arg("team").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("Team (0/6)"));
    assert_eq!(stdout.matches("Empty").count(), 6);
    assert!(stdout.contains("  6. Empty"));
}

#[test]
fn test_seeded_team_renders_offline() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("team.json"), TEAM_JSON).unwrap();

    let output = dex(temp.path()).arg("team").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("Team (2/6)"));
    assert!(stdout.contains("1. pikachu"));
    assert!(stdout.contains("2. bulbasaur"));
    assert!(stdout.contains("grass/poison"));
    assert_eq!(stdout.matches("Empty").count(), 4);
}

#[test]
fn test_team_rm_and_clear() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("team.json"), TEAM_JSON).unwrap();

    dex(temp.path())
        .args(["team", "rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed pikachu from slot 1"))
        .stdout(predicate::str::contains("1. bulbasaur"));

    dex(temp.path())
        .args(["team", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team cleared"));

    let saved = std::fs::read_to_string(temp.path().join("team.json")).unwrap();
    assert_eq!(saved.trim(), "[]");
}

#[test]
fn test_team_rm_of_an_empty_slot_fails() {
    let temp = tempfile::tempdir().unwrap();
    dex(temp.path())
        .args(["team", "rm", "3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid input: team slot 3 is empty"));

    dex(temp.path())
        .args(["team", "rm", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("team slots start at 1"));
}

#[test]
fn test_empty_favorites() {
    let temp = tempfile::tempdir().unwrap();
    dex(temp.path())
        .arg("fav")
        .assert()
        .success()
        .stdout(predicate::str::contains("Favorites (0/30)"))
        .stdout(predicate::str::contains("No favorites yet"));
}

#[test]
fn test_unverifiable_favorite_is_not_saved() {
    let temp = tempfile::tempdir().unwrap();

    // Nothing listens on the discard port, so the existence check fails.
    dex(temp.path())
        .env("DEX_API_BASE", "http://127.0.0.1:9/api/v2")
        .args(["fav", "toggle", "99999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Network error"));

    assert!(!temp.path().join("favorites.json").exists());
}

#[test]
fn test_favorites_by_id_remove_offline() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("favorites.json"), "[25, 1]").unwrap();

    dex(temp.path())
        .args(["fav", "toggle", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed #25 from favorites"));

    let saved = std::fs::read_to_string(temp.path().join("favorites.json")).unwrap();
    let ids: Vec<u32> = serde_json::from_str(&saved).unwrap();
    assert_eq!(ids, vec![1]);

    dex(temp.path())
        .args(["fav", "rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed #1 from favorites"));

    dex(temp.path())
        .args(["fav", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 0 favorites"));
}

#[test]
fn test_full_favorites_warns_but_succeeds() {
    let temp = tempfile::tempdir().unwrap();
    let ids: Vec<u32> = (1..=30).collect();
    std::fs::write(
        temp.path().join("favorites.json"),
        serde_json::to_string(&ids).unwrap(),
    )
    .unwrap();

    dex(temp.path())
        .args(["fav", "toggle", "31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Limit reached: at most 30 favorites"));

    let saved = std::fs::read_to_string(temp.path().join("favorites.json")).unwrap();
    let after: Vec<u32> = serde_json::from_str(&saved).unwrap();
    assert_eq!(after, ids);
}

#[test]
fn test_config_shows_defaults_and_file_values() {
    let temp = tempfile::tempdir().unwrap();
    dex(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("api_base = https://pokeapi.co/api/v2"))
        .stdout(predicate::str::contains("page_size = 30"))
        .stdout(predicate::str::contains("team_limit = 6"));

    std::fs::write(
        temp.path().join("config.json"),
        r#"{"catalog_ceiling": 1010, "team_limit": 4}"#,
    )
    .unwrap();
    dex(temp.path())
        .arg("config")
        .env("DEX_API_BASE", "http://localhost:8080/api/v2")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog_ceiling = 1010"))
        .stdout(predicate::str::contains("team_limit = 4"))
        .stdout(predicate::str::contains("api_base = http://localhost:8080/api/v2"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("config.json"), r#"{"page_size": 0}"#).unwrap();
    dex(temp.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size must be at least 1"));
}

#[test]
fn test_filter_input_is_validated_before_any_request() {
    let temp = tempfile::tempdir().unwrap();
    dex(temp.path())
        .args(["filter", "--ev", "luck"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown stat 'luck'"));

    dex(temp.path())
        .args(["filter", "-t", "grass", "-t", "poison", "-t", "fire"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 2 types"));
}
