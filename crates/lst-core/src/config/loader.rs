//! Configuration file discovery and loading

use super::lst_config::LstConfig;
use crate::error::{LstError, Result};
use std::path::{Path, PathBuf};

/// File names searched for, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["lst.toml", ".lst.toml", "lst.yaml"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    ///
    /// Starts from the given directory and moves up the directory tree until
    /// a config is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| LstError::config(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load config from a path or auto-discover it
    ///
    /// An explicit path must exist. Without one, the search starts at
    /// `start_dir` (or the current directory) and falls back to defaults
    /// when nothing is found.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<LstConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(LstError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return LstConfig::load(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => LstConfig::load(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(LstConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn discovers_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("modules/network");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp_dir.path().join("lst.toml"),
            "[format]\nindent-size = 4\n",
        )
        .unwrap();

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert!(found.is_some());

        let config = ConfigLoader::load(None, Some(&nested)).unwrap();
        assert_eq!(config.format.indent_size, 4);
    }

    #[test]
    fn yaml_config_is_discovered() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("lst.yaml"),
            "parser:\n  strict-delimiters: true\n",
        )
        .unwrap();

        let config = ConfigLoader::load(None, Some(temp_dir.path())).unwrap();
        assert!(config.parser.strict_delimiters);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = ConfigLoader::load(Some(Path::new("does-not-exist.toml")), None);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[parser]\nrequire-print-equals-input = false\n").unwrap();

        let config = ConfigLoader::load(Some(&path), None).unwrap();
        assert!(!config.parser.require_print_equals_input);
    }
}
