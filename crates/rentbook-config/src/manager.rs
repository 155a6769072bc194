use std::{
    cmp::Reverse,
    env, fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::{Config, ConfigError};

/// Overrides the directory holding configuration and backups.
pub const HOME_ENV_VAR: &str = "RENTBOOK_HOME";

const CONFIG_FILE: &str = "config.json";
const BACKUP_PREFIX: &str = "config_";
const BACKUP_EXTENSION: &str = ".json";
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const STAMP_LEN: usize = 15;

/// Base directory for Rentbook state: `$RENTBOOK_HOME`, else `~/.rentbook`.
pub fn resolve_home() -> PathBuf {
    if let Some(dir) = env::var_os(HOME_ENV_VAR).filter(|value| !value.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rentbook")
}

/// Loads and saves [`Config`] and keeps timestamped copies of it.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf, backups_dir: PathBuf) -> Self {
        Self {
            config_path,
            backups_dir,
        }
    }

    /// Lays out `<home>/config.json` and `<home>/backups/`, creating both directories.
    pub fn at_home(home: &Path) -> Result<Self, ConfigError> {
        let backups_dir = home.join("backups");
        fs::create_dir_all(&backups_dir)?;
        Ok(Self::new(home.join(CONFIG_FILE), backups_dir))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Reads the stored configuration, or the defaults when nothing was saved yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }
        read_config(&self.config_path)
    }

    /// Writes through a temporary sibling file renamed into place.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let staging = staging_path(&self.config_path);
        write_json(&staging, config)?;
        fs::rename(&staging, &self.config_path)?;
        debug!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }

    /// Stores a copy as `config_<stamp>[_<note>].json` and returns the file name.
    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String, ConfigError> {
        let mut name = format!("{BACKUP_PREFIX}{}", Utc::now().format(STAMP_FORMAT));
        if let Some(label) = note.and_then(sanitize_note) {
            name.push('_');
            name.push_str(&label);
        }
        name.push_str(BACKUP_EXTENSION);
        write_json(&self.backups_dir.join(&name), config)?;
        info!(backup = %name, "configuration backup written");
        Ok(name)
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config, ConfigError> {
        let path = self.backups_dir.join(backup_name);
        if !path.is_file() {
            return Err(ConfigError::BackupNotFound(backup_name.to_string()));
        }
        read_config(&path)
    }

    /// Backup file names, newest first. Unrecognised names sort last.
    pub fn list_backups(&self) -> Result<Vec<String>, ConfigError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_EXTENSION) {
                names.push(name);
            }
        }
        names.sort_by_key(|name| Reverse((backup_stamp(name), name.clone())));
        Ok(names)
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
}

fn write_json(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(config).map_err(|err| ConfigError::Serde(err.to_string()))?;
    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Lowercase alphanumerics joined by single dashes; `None` when nothing usable remains.
fn sanitize_note(note: &str) -> Option<String> {
    let words: Vec<String> = note
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join("-"))
    }
}

fn backup_stamp(name: &str) -> Option<NaiveDateTime> {
    let stamp = name.strip_prefix(BACKUP_PREFIX)?.get(..STAMP_LEN)?;
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()
}
