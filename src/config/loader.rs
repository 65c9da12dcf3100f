//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading mock generator
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{MockError, MockResult};

use super::types::MockConfig;

/// Loads and validates a [`MockConfig`] from YAML.
///
/// Keys missing from the file keep their defaults.
///
/// # Example
///
/// ```no_run
/// use absence_mocks::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/absence_mocks.yaml")?;
/// println!("Overtime share: {}", loader.config().probabilities.overtime_reduction);
/// # Ok::<(), absence_mocks::error::MockError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: MockConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`MockError::ConfigNotFound`] if the file cannot be read
    /// - [`MockError::ConfigParseError`] if it is not valid YAML for [`MockConfig`]
    /// - any error from [`MockConfig::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> MockResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| MockError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, "Loaded mock configuration");
        Ok(loader)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Example
    ///
    /// ```
    /// use absence_mocks::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::from_yaml_str("users_id: 7\n").unwrap();
    /// assert_eq!(loader.config().users_id, 7);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> MockResult<Self> {
        Self::parse(yaml, "<inline>")
    }

    fn parse(yaml: &str, path: &str) -> MockResult<Self> {
        let config: MockConfig =
            serde_yaml::from_str(yaml).map_err(|e| MockError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> MockConfig {
        self.config
    }
}
