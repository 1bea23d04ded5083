use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const STORE_ENV: &str = "FINLEDGER_FILE";
pub(crate) const STORE_FILE_NAME: &str = "finance_data.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) store_path: PathBuf,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let override_path = std::env::var(STORE_ENV).ok();
        let data_dir = directories::ProjectDirs::from("com", "finledger", "finledger")
            .map(|dirs| dirs.data_dir().to_path_buf());
        let config = Self::resolve(override_path.as_deref(), data_dir.as_deref())?;
        log::debug!("store path: {}", config.store_path.display());
        Ok(config)
    }

    /// Pick the store location: explicit override, then the platform data
    /// directory, then the working directory.
    pub(crate) fn resolve(override_path: Option<&str>, data_dir: Option<&Path>) -> Result<Self> {
        let store_path = match override_path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => PathBuf::from(expand_home(p)),
            None => match data_dir {
                Some(dir) => {
                    std::fs::create_dir_all(dir).with_context(|| {
                        format!("Failed to create data directory: {}", dir.display())
                    })?;
                    dir.join(STORE_FILE_NAME)
                }
                None => PathBuf::from(STORE_FILE_NAME),
            },
        };
        Ok(Self { store_path })
    }
}

/// Expand a leading `~/` against `$HOME`.
fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => format!("{home}/{rest}"),
        (Some(rest), Err(_)) => format!("./{rest}"),
        (None, _) => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(Some("/tmp/mine.csv"), Some(dir.path())).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/mine.csv"));
    }

    #[test]
    fn test_blank_override_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(Some("   "), Some(dir.path())).unwrap();
        assert_eq!(config.store_path, dir.path().join(STORE_FILE_NAME));
    }

    #[test]
    fn test_data_dir_created() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("share").join("finledger");
        let config = Config::resolve(None, Some(&data_dir)).unwrap();
        assert!(data_dir.is_dir());
        assert_eq!(config.store_path, data_dir.join(STORE_FILE_NAME));
    }

    #[test]
    fn test_override_expands_home() {
        let config = Config::resolve(Some("~/money/ledger.csv"), None).unwrap();
        let path = config.store_path.display().to_string();
        assert!(!path.starts_with('~'), "{path}");
        assert!(path.ends_with("/money/ledger.csv"), "{path}");
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/tmp/ledger.csv"), "/tmp/ledger.csv");
        assert_eq!(expand_home("ledger.csv"), "ledger.csv");
        assert_eq!(expand_home("a/~/b.csv"), "a/~/b.csv");
    }

    #[test]
    fn test_falls_back_to_working_directory() {
        let config = Config::resolve(None, None).unwrap();
        assert_eq!(config.store_path, PathBuf::from(STORE_FILE_NAME));
    }
}
