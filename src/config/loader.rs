//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for reading a
//! [`ParserConfig`] from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{ParserError, ParserResult};

use super::types::ParserConfig;

/// Loads parser configuration from YAML.
///
/// # Example
///
/// ```
/// use shift_report_parser::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::from_yaml_str("max_plausible_hours: 24", "inline").unwrap();
/// assert_eq!(config.max_plausible_hours, Decimal::new(24, 0));
/// // Keys that are not given keep their defaults
/// assert!(!config.noise_patterns.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration file at `path`.
    ///
    /// # Returns
    ///
    /// Returns the configuration on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value fails validation (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> ParserResult<ParserConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ParserError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Loads `path` when given, otherwise returns the validated defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> ParserResult<ParserConfig> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let config = ParserConfig::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parses and validates configuration from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> ParserResult<ParserConfig> {
        // An empty document deserializes to unit, not to a mapping
        let config: ParserConfig = if content.trim().is_empty() {
            ParserConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ParserError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }
}
