// Budget data directory resolution.
//
// Precedence: --data-dir flag, then TAXFLOW_DATA_DIR, then the optional
// config file at <config-dir>/taxflow/config.toml, then ./data/budgets.
use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

pub const DATA_DIR_ENV: &str = "TAXFLOW_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data/budgets";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taxflow").join("config.toml"))
}

fn load_file_config() -> FileConfig {
    let Some(path) = config_file_path() else {
        return FileConfig::default();
    };
    let Ok(raw) = fs::read_to_string(&path) else {
        return FileConfig::default();
    };
    // A malformed config file shouldn't block the tool; fall back to defaults.
    toml::from_str(&raw).unwrap_or_default()
}

/// Resolve the directory that holds `budget-<year>.json` tables.
pub fn resolve_data_dir(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = cli_override {
        return dir;
    }
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Some(dir) = load_file_config().data_dir {
        return dir;
    }
    PathBuf::from(DEFAULT_DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/budgets")));
        assert_eq!(dir, PathBuf::from("/tmp/budgets"));
    }

    #[test]
    fn file_config_parses() {
        let cfg: FileConfig = toml::from_str("data_dir = \"/srv/budgets\"").unwrap();
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/srv/budgets")));
    }

    #[test]
    fn empty_config_is_default() {
        let cfg: FileConfig = toml::from_str("").unwrap();
        assert!(cfg.data_dir.is_none());
    }
}
