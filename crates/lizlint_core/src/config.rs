//! lizlint configuration files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::{LizlintError, ScanLimits};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for lizlint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LizlintConfig {
    /// Thresholds and filters passed to the scanner.
    #[serde(flatten)]
    pub limits: ScanLimits,

    /// Scanner executable, resolved through `PATH` when not absolute.
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_executable() -> String {
    "lizard".to_string()
}

impl LizlintConfig {
    /// Configuration file names, in discovery order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".lizlint.jsonc", ".lizlint.json"];

    /// Creates a configuration with every limit disabled.
    pub fn new() -> Self {
        Self {
            limits: ScanLimits::default(),
            executable: default_executable(),
            base_dir: None,
        }
    }

    /// Finds a configuration file directly inside `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LizlintError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LizlintError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_jsonc(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSONC text with schema validation.
    pub fn from_jsonc(text: &str) -> Result<Self, LizlintError> {
        let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
            .map_err(|e| LizlintError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(LizlintError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        Self::from_value(value)
    }

    /// Builds configuration from an editor settings object.
    ///
    /// Unknown keys are ignored; editors send their whole settings section.
    pub fn from_value(value: serde_json::Value) -> Result<Self, LizlintError> {
        serde_json::from_value(value)
            .map_err(|e| LizlintError::config(format!("Invalid config: {}", e)))
    }

    /// Resolves the whitelist path against the configuration directory.
    pub fn whitelist_path(&self) -> Option<PathBuf> {
        let whitelist = Path::new(self.limits.whitelist()?);
        match &self.base_dir {
            Some(base) if whitelist.is_relative() => Some(base.join(whitelist)),
            _ => Some(whitelist.to_path_buf()),
        }
    }
}

impl Default for LizlintConfig {
    fn default() -> Self {
        Self::new()
    }
}
