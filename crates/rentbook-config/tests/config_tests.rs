use std::fs;

use rentbook_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert!(cfg.payments_per_page > 0);
}

#[test]
fn load_without_file_returns_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::at_home(dir.path()).expect("manager");
    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(manager.backups_dir().is_dir());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.set("currency", "DKK").expect("currency");
    cfg.set("payments_per_page", "5").expect("per page");

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "DKK");
    assert_eq!(loaded.payments_per_page, 5);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn backups_restore_and_list_newest_first() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::at_home(dir.path()).expect("manager");

    let mut cfg = Config::default();
    cfg.locale = "da-DK".into();
    let name = manager.backup(&cfg, Some("Before move")).expect("backup");
    assert!(name.starts_with("config_"));
    assert!(name.ends_with("_before-move.json"));

    fs::write(
        manager.backups_dir().join("config_20000101_000000.json"),
        serde_json::to_string(&Config::default()).expect("json"),
    )
    .expect("write old backup");

    let listed = manager.list_backups().expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0], name);

    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.locale, "da-DK");

    assert!(matches!(
        manager.restore("config_missing.json"),
        Err(ConfigError::BackupNotFound(_))
    ));
}
