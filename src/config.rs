//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Explicit config file given on the command line
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::application::services::hierarchy::DEFAULT_JSON_INDENT;

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Field delimiter of pair input (a single ASCII character)
    pub delimiter: String,
    /// Indent width of exported JSON documents
    pub json_indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: ",".into(),
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file that must exist, layered above the global one
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("delimiter", defaults.delimiter.clone())
            .map_err(config_err)?
            .set_default("json_indent", defaults.json_indent as i64)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            builder = builder.add_source(File::from(global_path).required(false));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("ORGTREE").separator("__"));

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.delimiter_byte()?;
        Ok(settings)
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ApplicationError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(ApplicationError::Config {
                message: format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ),
            }),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orgtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/orgtree/orgtree.toml
#   Explicit: orgtree --config <file>
#   Env:      ORGTREE_* environment variables (e.g. ORGTREE_DELIMITER=";")

# Field delimiter of the parent,child input rows
# delimiter = ","

# Indent width of exported JSON documents
# json_indent = 4
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_comma_and_four() {
        let settings = Settings::default();
        assert_eq!(settings.delimiter, ",");
        assert_eq!(settings.json_indent, 4);
        assert_eq!(settings.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn given_multi_char_delimiter_when_validating_then_config_error() {
        let settings = Settings {
            delimiter: "::".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.delimiter_byte(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_settings_when_rendered_as_toml_then_contains_fields() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("delimiter = \",\""));
        assert!(toml.contains("json_indent = 4"));
    }

    #[test]
    fn given_template_when_parsed_then_valid_toml() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
