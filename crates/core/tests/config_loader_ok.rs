use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;
use woplab_core::config::{ConfigLoader, ConfigOverrides};

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("woplab.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_path = "/tmp/vault"
alphabets_dir = "{{vault_path}}/abcs"

[export]
min_score = 0.7
max_score = 0.99
norm = false

[logging]
level = "warn"
file = "{{vault_path}}/woplab.log"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load_with_env(Some(&cfg_path), &ConfigOverrides::default(), |_| None)
        .expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.vault_path.display().to_string(), "/tmp/vault");
    assert_eq!(rc.alphabets_dir.display().to_string(), "/tmp/vault/abcs");
    assert_eq!(rc.alphabet_tag, "user");
    assert_eq!(rc.export.min_score, 0.7);
    assert_eq!(rc.export.max_score, 0.99);
    assert!(!rc.export.norm);
    assert_eq!(rc.logging.level, "warn");
    assert_eq!(rc.logging.file, Some(PathBuf::from("/tmp/vault/woplab.log")));
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("woplab/woplab.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_path = "/tmp/def"
alphabets_dir = "{{vault_path}}/abcs"

[profiles.lab]
vault_path = "/tmp/lab"
alphabets_dir = "/tmp/lab-abcs"
alphabet_tag = "lab"
"#;
    write_file(&cfg_path, toml);

    let overrides = ConfigOverrides { profile: Some("lab".to_string()), ..Default::default() };
    let rc = ConfigLoader::load_with_env(Some(&cfg_path), &overrides, |_| None)
        .expect("should load");
    assert_eq!(rc.active_profile, "lab");
    assert_eq!(rc.vault_path.display().to_string(), "/tmp/lab");
    assert_eq!(rc.alphabet_tag, "lab");
    // [export] section missing: built-in defaults apply
    assert_eq!(rc.export.min_score, 0.65);
    assert!(rc.export.max_score.is_infinite());
}

#[test]
fn infinite_max_score_parses() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("woplab.toml");
    write_file(
        &cfg_path,
        r#"
version = 1
[profiles.default]
vault_path = "/v"
alphabets_dir = "/a"

[export]
max_score = inf
"#,
    );

    let rc = ConfigLoader::load_with_env(Some(&cfg_path), &ConfigOverrides::default(), |_| None)
        .expect("should load");
    assert!(rc.export.max_score.is_infinite());
}
