use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_drawing(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "0,0\n1,1\n").unwrap();
}

#[test]
fn report_renders_index_and_css() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    write_drawing(&vault, "alphabets/runes/symbols/fire/drawings/1.csv");
    write_drawing(&vault, "alphabets/runes/symbols/fire/drawings_bad/2.csv");
    write_drawing(&vault, "alphabets/runes/symbols/water/drawings/3.csv");
    let out = tmp.path().join("out");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("woplab"));
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("WOPLAB_VAULT_PATH")
        .arg("--vault")
        .arg(&vault)
        .args(["vault", "report", "-O"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("rendering vault report"))
        .stdout(predicate::str::contains("Hour (UTC)"))
        .stdout(predicate::str::contains("vault report index:"))
        .stdout(predicate::str::contains("index.html"));

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("<svg"));
    assert!(html.contains("amount of drawings per symbol"));
    assert!(html.contains("water"));
    assert!(out.join("css/style.css").is_file());
}

#[test]
fn report_defaults_to_vault_report_dir() {
    let tmp = tempdir().unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("woplab"));
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".config"))
        .env_remove("WOPLAB_VAULT_PATH")
        .arg("--vault")
        .arg(tmp.path().join("empty"))
        .args(["vault", "report"])
        .assert()
        .success();

    assert!(tmp.path().join("vault-report/index.html").is_file());
    assert!(tmp.path().join("vault-report/css/style.css").is_file());
}
