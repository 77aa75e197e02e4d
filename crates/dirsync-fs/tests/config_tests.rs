use dirsync_fs::{ConfigStore, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    block_size: usize,
    parallel: bool,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dirsync.toml");
    fs::write(&path, "block_size = 4096\nparallel = true\n").unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();

    assert_eq!(config.block_size, 4096);
    assert!(config.parallel);
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dirsync.json");
    fs::write(&path, r#"{"block_size": 1024, "parallel": false}"#).unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();

    assert_eq!(config.block_size, 1024);
    assert!(!config.parallel);
}

#[test]
fn test_load_yaml_with_yml_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dirsync.yml");
    fs::write(&path, "block_size: 8\nparallel: true").unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();

    assert_eq!(config, TestConfig { block_size: 8, parallel: true });
}

#[test]
fn test_save_then_load_each_format() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::new();
    let original = TestConfig {
        block_size: 65536,
        parallel: true,
    };

    for name in ["c.toml", "c.json", "c.yaml"] {
        let path = temp.path().join(name);
        store.save(&path, &original).unwrap();
        let loaded: TestConfig = store.load(&path).unwrap();
        assert_eq!(loaded, original, "format of {name}");
    }
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dirsync.ini");
    fs::write(&path, "block_size=1").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);

    assert!(matches!(result, Err(Error::UnsupportedFormat { extension }) if extension == "ini"));
}

#[test]
fn test_parse_error_names_format_and_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "block_size = [").unwrap();

    let err = ConfigStore::new().load::<TestConfig>(&path).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("TOML"), "got: {message}");
    assert!(message.contains("broken.toml"), "got: {message}");
}
