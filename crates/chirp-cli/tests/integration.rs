use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn chirp(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chirp").unwrap();
    cmd.current_dir(dir.path())
        .env("CHIRP_STATE_DIR", dir.path());
    cmd
}

// ---------------------------------------------------------------------------
// chirp parse
// ---------------------------------------------------------------------------

#[test]
fn parse_paired_writes_corpus_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("raw.txt"),
        "Chapter A\nV1 first verse:V2 second verse:\nChapter B\nV1 third verse:\n",
    )
    .unwrap();

    chirp(&dir)
        .args(["parse", "paired", "raw.txt", "corpus.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 major units"))
        .stdout(predicate::str::contains("3 minor units"));

    let data = std::fs::read_to_string(dir.path().join("corpus.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(json[0]["label"], "A");
    assert_eq!(json[0]["units"][0]["text"], "first verse");
    assert_eq!(json[0]["units"][1]["label"], "V2");
    assert_eq!(json[1]["units"][0]["text"], "third verse");
}

#[test]
fn parse_paired_custom_keys() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("raw.txt"), "Chapter A\nV1 a verse:\n").unwrap();

    chirp(&dir)
        .args([
            "parse",
            "paired",
            "raw.txt",
            "corpus.json",
            "--minor-list-key",
            "verses",
            "--text-key",
            "verse_text",
            "--major-label-key",
            "chapter_label",
            "--minor-label-key",
            "verse_label",
        ])
        .assert()
        .success();

    let data = std::fs::read_to_string(dir.path().join("corpus.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(json[0]["chapter_label"], "A");
    assert_eq!(json[0]["verses"][0]["verse_text"], "a verse");
    assert_eq!(json[0]["verses"][0]["verse_label"], "V1");
}

#[test]
fn parse_marked_groups_lines_under_markers() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("raw.txt"),
        "TABLET I\nline one\nline two\nTABLET II\nline three\n",
    )
    .unwrap();

    chirp(&dir)
        .args([
            "parse", "marked", "raw.txt", "corpus.json", "--marker", "TABLET ",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 major units"));

    let data = std::fs::read_to_string(dir.path().join("corpus.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(json[0]["label"], "I");
    assert_eq!(json[0]["units"][1]["text"], "line two");
    // No per-line labels in marked corpora
    assert!(json[0]["units"][0].get("label").is_none());
}

#[test]
fn parse_paired_dangling_header_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("raw.txt"),
        "Chapter A\nV1 verse:\nChapter B\n",
    )
    .unwrap();

    chirp(&dir)
        .args(["parse", "paired", "raw.txt", "corpus.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alternate header and body"));
}

#[test]
fn parse_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["parse", "paired", "missing.txt", "corpus.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn parse_json_summary() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("raw.txt"), "Chapter A\nV1 a verse:\n").unwrap();

    let out = chirp(&dir)
        .args(["--json", "parse", "paired", "raw.txt", "corpus.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["major_units"], 1);
    assert_eq!(json["minor_units"], 1);
}

// ---------------------------------------------------------------------------
// chirp override
// ---------------------------------------------------------------------------

#[test]
fn override_list_empty() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["override", "--bot", "bibi_quit", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no overrides scheduled"));
}

#[test]
fn override_add_then_list() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args([
            "override",
            "--bot",
            "bibi_quit",
            "add",
            "2030-05-01",
            "Special phrase",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2030-05-01"));

    chirp(&dir)
        .args(["override", "--bot", "bibi_quit", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2030-05-01"))
        .stdout(predicate::str::contains("Special phrase"));
}

#[test]
fn override_add_replaces_existing_date() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["override", "--bot", "b", "add", "2030-05-01", "First"])
        .assert()
        .success();
    chirp(&dir)
        .args(["override", "--bot", "b", "add", "2030-05-01", "Second"])
        .assert()
        .success();

    chirp(&dir)
        .args(["override", "--bot", "b", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Second"))
        .stdout(predicate::str::contains("First").not());
}

#[test]
fn override_add_rejects_garbage_date() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["override", "--bot", "b", "add", "not-a-date", "Phrase"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-date"));
}

#[test]
fn override_remove() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["override", "--bot", "b", "add", "2030-05-01", "Phrase"])
        .assert()
        .success();
    chirp(&dir)
        .args(["override", "--bot", "b", "remove", "2030-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));
    chirp(&dir)
        .args(["override", "--bot", "b", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no overrides scheduled"));
}

#[test]
fn override_remove_nonexistent_fails() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["override", "--bot", "b", "remove", "2030-05-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no override found"));
}

#[test]
fn override_list_json() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["override", "--bot", "b", "add", "2030-05-01", "One"])
        .assert()
        .success();
    chirp(&dir)
        .args(["override", "--bot", "b", "add", "2030-06-01", "Two"])
        .assert()
        .success();

    let out = chirp(&dir)
        .args(["--json", "override", "--bot", "b", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["2030-05-01"], "One");
    assert_eq!(json["2030-06-01"], "Two");
}

#[test]
fn overrides_are_scoped_per_bot() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["override", "--bot", "alpha", "add", "2030-05-01", "Alpha"])
        .assert()
        .success();

    chirp(&dir)
        .args(["override", "--bot", "beta", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no overrides scheduled"));
}

// ---------------------------------------------------------------------------
// chirp killswitch
// ---------------------------------------------------------------------------

#[test]
fn killswitch_defaults_to_enabled() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["killswitch", "--bot", "bibi_quit", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bibi_quit is enabled"));
}

#[test]
fn killswitch_disable_then_enable() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["killswitch", "--bot", "b", "disable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));
    chirp(&dir)
        .args(["killswitch", "--bot", "b", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b is disabled"));

    chirp(&dir)
        .args(["killswitch", "--bot", "b", "enable"])
        .assert()
        .success();
    chirp(&dir)
        .args(["killswitch", "--bot", "b", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b is enabled"));
}

#[test]
fn killswitch_status_json() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["killswitch", "--bot", "b", "disable"])
        .assert()
        .success();

    let out = chirp(&dir)
        .args(["--json", "killswitch", "--bot", "b", "status"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["enabled"], false);
}

// ---------------------------------------------------------------------------
// chirp run — config errors surface before any network call
// ---------------------------------------------------------------------------

#[test]
fn run_sequential_missing_env_fails() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["run", "sequential", "--prefix", "NOSUCHBOT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOSUCHBOT_"));
}

#[test]
fn run_phrase_rejects_bad_hour() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["run", "phrase", "--prefix", "BADHOUR"])
        .env("BADHOUR_CONSUMER_KEY", "ck")
        .env("BADHOUR_CONSUMER_SECRET", "cs")
        .env("BADHOUR_ACCESS_TOKEN", "at")
        .env("BADHOUR_ACCESS_TOKEN_SECRET", "ats")
        .env("BADHOUR_PHRASE", "hello")
        .env("BADHOUR_TIMEZONE", "Asia/Jerusalem")
        .env("BADHOUR_HOUR", "25")
        .assert()
        .failure()
        .stderr(predicate::str::contains("BADHOUR_HOUR"));
}

#[test]
fn run_phrase_rejects_bad_timezone() {
    let dir = TempDir::new().unwrap();
    chirp(&dir)
        .args(["run", "phrase", "--prefix", "BADTZ"])
        .env("BADTZ_CONSUMER_KEY", "ck")
        .env("BADTZ_CONSUMER_SECRET", "cs")
        .env("BADTZ_ACCESS_TOKEN", "at")
        .env("BADTZ_ACCESS_TOKEN_SECRET", "ats")
        .env("BADTZ_PHRASE", "hello")
        .env("BADTZ_TIMEZONE", "Mars/Olympus")
        .env("BADTZ_HOUR", "21")
        .assert()
        .failure()
        .stderr(predicate::str::contains("BADTZ_TIMEZONE"));
}
