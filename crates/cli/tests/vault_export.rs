use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

const SQUARE: &str = "0,0\n1,0\n1,1\n0,1\n0,0\n";

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Vault with one good and one bad drawing of `runes/fire`, and a
/// destination alphabet whose `fire` symbol is trained on a square.
fn setup() -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_file(&root.join("vault/alphabets/runes/symbols/fire/drawings/a.csv"), SQUARE);
    write_file(&root.join("vault/alphabets/runes/symbols/fire/drawings_bad/b.csv"), "0,0\n5,0\n");
    write_file(&root.join("abcs/runes/symbols/fire/drawings/ref.csv"), SQUARE);

    let cfg = root.join("woplab.toml");
    write_file(
        &cfg,
        &format!(
            r#"
version = 1

[profiles.default]
vault_path = "{}"
alphabets_dir = "{}"
"#,
            root.join("vault").display(),
            root.join("abcs").display()
        ),
    );
    (tmp, cfg)
}

fn woplab(cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("woplab"));
    cmd.env_remove("WOPLAB_VAULT_PATH")
        .env_remove("WOPLAB_ALPHABETS_DIR")
        .env_remove("WOPLAB_PROFILE")
        .arg("--config")
        .arg(cfg);
    cmd
}

fn dest(tmp: &TempDir, name: &str) -> PathBuf {
    tmp.path().join("abcs/runes/symbols/fire/drawings").join(name)
}

#[test]
fn export_writes_new_drawings_then_reports_existing() {
    let (tmp, cfg) = setup();

    woplab(&cfg)
        .args(["vault", "export", "--drawings-tag", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GOOD tag:"))
        .stdout(predicate::str::contains("NEW a.csv: 1.000 (excellent)"))
        .stdout(predicate::str::contains("1 NEW (1 | 100 % GOOD, 0 | 0 % BAD)"))
        .stdout(predicate::str::contains("1 EXPORTED"));
    assert!(dest(&tmp, "a.csv").is_file());
    assert!(!dest(&tmp, "b.csv").exists());

    woplab(&cfg)
        .args(["vault", "export", "-t", "good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXISTS a.csv"))
        .stdout(predicate::str::contains("1 EXISTING"))
        .stdout(predicate::str::contains("NEW a.csv").not());
}

#[test]
fn export_bad_score_is_not_written() {
    let (tmp, cfg) = setup();

    woplab(&cfg)
        .args(["vault", "export", "-t", "bad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BAD SCORE b.csv"))
        .stdout(predicate::str::contains("1 BAD SCORE (0 | 0 % GOOD, 1 | 100 % BAD)"));
    assert!(!dest(&tmp, "b.csv").exists());

    woplab(&cfg).args(["vault", "export", "-t", "bad", "-m", "0"]).assert().success();
    assert!(dest(&tmp, "b.csv").is_file());
}

#[test]
fn export_dry_run_writes_nothing() {
    let (tmp, cfg) = setup();

    woplab(&cfg)
        .args(["vault", "export", "--dry-run", "-m", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN: EXPORT: a.csv"))
        .stdout(predicate::str::contains("2 NEW"));
    assert!(!dest(&tmp, "a.csv").exists());
    assert!(!dest(&tmp, "b.csv").exists());
}

#[test]
fn export_only_new_hides_other_items() {
    let (_tmp, cfg) = setup();

    woplab(&cfg)
        .args(["vault", "export", "--dry-run", "--only-new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NEW a.csv"))
        .stdout(predicate::str::contains("BAD SCORE b.csv").not())
        .stdout(predicate::str::contains("DRY RUN").not());
}

#[test]
fn export_fails_on_missing_destination_alphabet() {
    let (tmp, cfg) = setup();
    write_file(&tmp.path().join("vault/alphabets/glyphs/symbols/x/drawings/c.csv"), SQUARE);

    woplab(&cfg)
        .args(["vault", "export", "-a", "glyphs"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ERROR: destination alphabet not found: user:glyphs"));
}

#[test]
fn export_fails_on_missing_destination_symbol() {
    let (tmp, cfg) = setup();
    write_file(&tmp.path().join("vault/alphabets/runes/symbols/water/drawings/c.csv"), SQUARE);

    woplab(&cfg)
        .args(["vault", "export", "--symbol", "water"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR: destination symbol not found: water"));
}

#[test]
fn export_fails_without_alphabets_dir() {
    let (tmp, cfg) = setup();
    fs::remove_dir_all(tmp.path().join("abcs")).unwrap();

    woplab(&cfg)
        .args(["vault", "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alphabets directory not found"));
}
