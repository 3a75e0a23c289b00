//! Generator configuration
//!
//! Settings come from built-in defaults, optionally replaced by a config
//! file, then adjusted by command-line flags. Config files may be YAML
//! (`.yml`, `.yaml`) or TOML (`.toml`):
//!
//! ```yaml
//! catalog_file: catalogs/ntp.json
//! output_file: spec/classes/ntp_spec.rb
//! excludes: [Stage, Class, Anchor, Notify, Node, "/::/"]
//! md5sums: false
//! compile_test: true
//! setup:
//!   pre_condition:
//!     - "include stdlib"
//!   hiera_config: spec/fixtures/hiera/hiera.yaml
//!   facts:
//!     osfamily: RedHat
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Default output path for the generated spec
pub const DEFAULT_OUTPUT_FILE: &str = "spec/classes/test_spec.rb";

/// Resource types excluded unless overridden
pub const DEFAULT_EXCLUDES: [&str; 6] = ["Stage", "Class", "Anchor", "Notify", "Node", "/::/"];

/// Injected setup for the generated spec
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Setup {
    /// Manifest lines evaluated before the class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_condition: Option<Vec<String>>,

    /// Path of the hiera config the spec should use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiera_config: Option<String>,

    /// Facts to compile with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<Map<String, Value>>,
}

impl Setup {
    /// Whether nothing is configured
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pre_condition.is_none() && self.hiera_config.is_none() && self.facts.is_none()
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Catalog JSON file to read
    pub catalog_file: Option<PathBuf>,

    /// Class name override
    pub class_name: Option<String>,

    /// Where to write the generated spec
    pub output_file: PathBuf,

    /// Exclude rules (type, `/regex/`, `Type[title]`, `Type[/regex/]`)
    pub excludes: Vec<String>,

    /// Strings removed from the exclude list before filtering
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_overrides: Vec<String>,

    /// Only-include rules; when non-empty, excludes are ignored
    pub only_include: Vec<String>,

    /// Verify file content by MD5 digest
    pub md5sums: bool,

    /// Emit the compile + snapshot block
    pub compile_test: bool,

    /// Injected setup lets
    pub setup: Setup,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            catalog_file: None,
            class_name: None,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            excludes: DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect(),
            include_overrides: Vec::new(),
            only_include: Vec::new(),
            md5sums: false,
            compile_test: true,
            setup: Setup::default(),
        }
    }
}

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

impl GeneratorConfig {
    /// Load a config file; fields it leaves out keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let config_err = |message: String| Error::Config {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let config = match Format::from_path(path) {
            Format::Yaml => serde_yaml::from_str(&content).map_err(|e| config_err(e.to_string()))?,
            Format::Toml => toml::from_str(&content).map_err(|e| config_err(e.to_string()))?,
        };
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise start from the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Append an exclude rule
    pub fn exclude(&mut self, rule: impl Into<String>) {
        self.excludes.push(rule.into());
    }

    /// Keep resources that an exclude rule equal to `rule` would drop
    pub fn include(&mut self, rule: impl Into<String>) {
        self.include_overrides.push(rule.into());
    }

    /// Add an only-include rule
    pub fn only_include(&mut self, rule: impl Into<String>) {
        self.only_include.push(rule.into());
    }

    /// The catalog path, required before generation
    pub fn catalog_path(&self) -> Result<&Path> {
        match &self.catalog_file {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(Error::MissingCatalog),
        }
    }
}
