//! Sectioned configuration files.
//!
//! A config file is a TOML document whose top-level tables are sections:
//!
//! ```toml
//! [default]
//! hostname = "0.0.0.0:8080"
//!
//! [jobs]
//! dbHost = "localhost:27017"
//! dbName = "scheduler"
//! ```
//!
//! Lookups are by `(section, key)`. Required lookups fail with
//! [`ConfigError::MissingKey`] so the binary can abort with a message that
//! names the offending section.

use std::path::Path;

use toml::{Table, Value};

use crate::ConfigError;

/// Parsed, read-only configuration file.
#[derive(Clone, Debug, Default)]
pub struct ConfigFile {
    table: Table,
}

impl ConfigFile {
    /// Read and parse the file at `path`.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let table = contents.parse::<Table>()?;
        Ok(Self { table })
    }

    /// Names of every section (top-level table), in sorted order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.table
            .iter()
            .filter(|(_, value)| value.is_table())
            .map(|(name, _)| name.as_str())
    }

    fn value(&self, section: &str, key: &str) -> Option<&Value> {
        self.table.get(section)?.as_table()?.get(key)
    }

    /// Optional string value. Empty strings count as absent.
    pub fn get_string(&self, section: &str, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.value(section, key) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                details: format!("expected a string, found {}", other.type_str()),
            }),
        }
    }

    /// Required string value.
    pub fn required_string(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.get_string(section, key)?
            .ok_or_else(|| ConfigError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Optional boolean value.
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.value(section, key) {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                details: format!("expected a boolean, found {}", other.type_str()),
            }),
        }
    }
}
