//! INI file configuration adapter.
//!
//! Section and key lookups are case-insensitive, so `[Prices] ETH = 2000`
//! is read back with `get_string("prices", "eth")`.

use crate::domain::error::LendsimError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
    source: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LendsimError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| LendsimError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn from_string(content: &str) -> Result<Self, LendsimError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| LendsimError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// Empty configuration: every lookup misses and defaults apply.
    pub fn empty() -> Self {
        Self {
            config: Ini::new(),
            source: None,
        }
    }

    /// File the configuration was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}
