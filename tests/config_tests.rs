//! Config store and asset resolution against a `CLAI_HOME` data root

use clai::config::{Config, CONFIG_FILE_NAME, HOME_ENV};
use clai::{AssetKind, AssetStore, ModelId};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

struct HomeGuard {
    _dir: TempDir,
}

impl HomeGuard {
    fn new() -> (Self, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();
        std::env::set_var(HOME_ENV, &path);
        (Self { _dir: dir }, path)
    }
}

impl Drop for HomeGuard {
    fn drop(&mut self) {
        std::env::remove_var(HOME_ENV);
    }
}

#[test]
#[serial]
fn test_missing_config_loads_defaults() {
    let (_guard, root) = HomeGuard::new();

    let config = Config::load_or_default().unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(
        Config::config_path().unwrap(),
        root.join("config").join(CONFIG_FILE_NAME)
    );
    assert!(!Config::config_path().unwrap().exists());
}

#[test]
#[serial]
fn test_set_model_persists() {
    let (_guard, _root) = HomeGuard::new();

    let mut config = Config::load_or_default().unwrap();
    config.model = "gemma-3-4b-it-q6".parse().unwrap();
    config.save().unwrap();

    let reloaded = Config::load_or_default().unwrap();
    assert_eq!(reloaded.model, ModelId::Gemma3_4B);
    let raw = fs::read_to_string(Config::config_path().unwrap()).unwrap();
    assert!(raw.contains("model: gemma-3-4b-it-q6.llamafile"));
}

#[test]
#[serial]
fn test_broken_config_is_an_error() {
    let (_guard, root) = HomeGuard::new();
    let path = root.join("config").join(CONFIG_FILE_NAME);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "model: [not, a, model]\n").unwrap();

    let err = Config::load_or_default().unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid config"));
}

#[test]
#[serial]
fn test_asset_store_uses_data_root() {
    let (_guard, root) = HomeGuard::new();
    let config = Config::default();
    let store = AssetStore::from_config(&config).unwrap();

    assert_eq!(store.root(), root.as_path());
    assert!(store.resolve(AssetKind::Engine).is_err());

    let model = root.join("models").join(config.model.filename());
    fs::create_dir_all(model.parent().unwrap()).unwrap();
    fs::write(&model, b"weights").unwrap();
    assert_eq!(store.resolve(AssetKind::Model(config.model)).unwrap(), model);
}
