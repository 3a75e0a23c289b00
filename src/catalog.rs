//! Catalog loading and normalization
//!
//! Compiled catalogs come in two shapes. Older compilers nest the resource
//! list under a `data` key:
//!
//! ```text
//! {"data": {"resources": [...]}}
//! ```
//!
//! Newer ones expose it directly:
//!
//! ```text
//! {"resources": [...]}
//! ```
//!
//! [`normalize`] folds the first shape into the second so every later stage
//! only deals with a flat, ordered resource list.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key under which legacy catalogs nest their resources
const LEGACY_KEY: &str = "data";

/// Key holding the resource sequence
const RESOURCES_KEY: &str = "resources";

/// One declared resource, identified by `(type, title)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Capitalized type name, possibly namespaced (`Concat::Fragment`)
    #[serde(rename = "type")]
    pub type_name: String,

    /// Title, unique within its type
    pub title: String,

    /// Declared parameters in catalog order; `None` when the key is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl Resource {
    /// Create a resource without a parameters key
    #[must_use]
    pub fn new(type_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            title: title.into(),
            parameters: None,
        }
    }

    /// Attach a parameter, creating the mapping if needed
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.get_or_insert_with(Map::new).insert(key.into(), value.into());
        self
    }

    /// Look up a single parameter
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.parameters.as_ref().and_then(|p| p.get(key))
    }

    /// Whether this resource is `Type[title]`
    #[must_use]
    pub fn is(&self, type_name: &str, title: &str) -> bool {
        self.type_name == type_name && self.title == title
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.type_name, self.title)
    }
}

/// A normalized catalog: a single ordered resource sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Resources in compilation order
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Fold the legacy `data.resources` nesting into the top-level shape
///
/// Values without a `data` key are returned unchanged, so applying this
/// twice is the same as applying it once.
#[must_use]
pub fn normalize(mut raw: Value) -> Value {
    if let Some(obj) = raw.as_object_mut() {
        if let Some(mut data) = obj.remove(LEGACY_KEY) {
            let resources = data
                .as_object_mut()
                .and_then(|d| d.remove(RESOURCES_KEY))
                .unwrap_or_else(|| Value::Array(Vec::new()));
            obj.insert(RESOURCES_KEY.to_string(), resources);
        }
    }
    raw
}

impl Catalog {
    /// Build a catalog from an already parsed JSON value
    pub fn from_value(raw: Value) -> serde_json::Result<Self> {
        serde_json::from_value(normalize(raw))
    }

    /// Read and normalize a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::CatalogNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let parse_err = |source| Error::CatalogParse {
            path: path.to_path_buf(),
            source,
        };
        let raw: Value = serde_json::from_str(&content).map_err(parse_err)?;
        let catalog = Self::from_value(raw).map_err(parse_err)?;
        log::debug!("Loaded {} resource(s) from {}", catalog.resources.len(), path.display());
        Ok(catalog)
    }

    /// Find the first resource equal to `Type[title]`
    #[must_use]
    pub fn find(&self, type_name: &str, title: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.is(type_name, title))
    }

    /// Number of resources
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the catalog has no resources
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
