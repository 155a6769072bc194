use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use rentbook_domain::{Portfolio, CURRENT_SCHEMA_VERSION};

use crate::errors::PersistenceError;

/// Writes the portfolio as pretty JSON, staging to `<file name>.tmp` first.
pub fn save_portfolio_to_file(portfolio: &Portfolio, path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = staging_path(path);
    let json = serde_json::to_string_pretty(portfolio)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), "portfolio saved");
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

/// Loads a portfolio, refusing files written by a newer schema.
pub fn load_portfolio_from_file(path: &Path) -> Result<Portfolio, PersistenceError> {
    let data = fs::read_to_string(path)?;
    let portfolio: Portfolio = serde_json::from_str(&data)?;
    if portfolio.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedSchema {
            found: portfolio.schema_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    Ok(portfolio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_keeps_the_full_file_name() {
        let json = staging_path(Path::new("data/a.json"));
        let backup = staging_path(Path::new("data/a.bak"));
        assert_eq!(json, Path::new("data/a.json.tmp"));
        assert_eq!(backup, Path::new("data/a.bak.tmp"));
        assert_ne!(json, backup);
    }
}
