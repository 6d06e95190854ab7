//! Configuration loading and validation

use crate::constants::{
    CONFIG_FILENAMES, DEFAULT_KEY_FIELD, DEFAULT_PARTIALS_ROOT, DEFAULT_VIEW,
    TEMPLATE_EXTENSIONS,
};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Settings shared by the dispatcher, the pair builder and the template engine.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatterConfig {
    /// Prefix under which per-type view directories and shared views live.
    #[serde(default = "get_default_partials_root")]
    pub partials_root: String,
    /// Sub-view used when a request names none.
    #[serde(default = "get_default_view")]
    pub default_view: String,
    /// Record field read as the pair key when the caller gives none.
    #[serde(default = "get_default_key_field")]
    pub key_field: String,
    /// Template file suffixes tried in order when resolving a view on disk.
    #[serde(default = "get_default_extensions")]
    pub extensions: Vec<String>,
    /// Values merged under every render context.
    #[serde(default)]
    pub globals: Map<String, Value>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            partials_root: get_default_partials_root(),
            default_view: get_default_view(),
            key_field: get_default_key_field(),
            extensions: get_default_extensions(),
            globals: Map::new(),
        }
    }
}

impl FormatterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_view.is_empty() {
            return Err(Error::ConfigValidation("default_view must not be empty".into()));
        }
        if self.key_field.is_empty() {
            return Err(Error::ConfigValidation("key_field must not be empty".into()));
        }
        if let Some(ext) = self.extensions.iter().find(|ext| !ext.starts_with('.') || ext.len() < 2) {
            return Err(Error::ConfigValidation(format!(
                "extension '{ext}' must start with '.' and have at least 1 character after it"
            )));
        }
        Ok(())
    }

    /// Loads the first configuration file found in `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = dir.join(config_file_name);
            if config_file_path.exists() {
                return Self::from_file(config_file_path);
            }
        }

        Err(Error::ConfigNotFound {
            dir: dir.display().to_string(),
            config_files: CONFIG_FILENAMES.join(", "),
        })
    }

    /// Reads a JSON or YAML configuration file, picked by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => {
                return Err(Error::ConfigValidation(format!(
                    "unsupported configuration file '{}'",
                    path.display()
                )))
            }
        };
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

fn get_default_partials_root() -> String {
    DEFAULT_PARTIALS_ROOT.to_string()
}

fn get_default_view() -> String {
    DEFAULT_VIEW.to_string()
}

fn get_default_key_field() -> String {
    DEFAULT_KEY_FIELD.to_string()
}

fn get_default_extensions() -> Vec<String> {
    TEMPLATE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}
