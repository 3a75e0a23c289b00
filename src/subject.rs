//! Subject resolution - which class the generated spec describes
//!
//! A catalog compiled for class `ntp` carries `Class[main]` followed by
//! `Class[Ntp]`, and the parameters the class was declared with live on that
//! `Class[Ntp]` resource. Neither lookup is fatal: an unresolved class name
//! yields an empty `describe`, and a missing class resource drops the params
//! section.

use serde_json::{Map, Value};

use crate::catalog::Catalog;

/// Type name of class resources
pub const CLASS_TYPE: &str = "Class";

/// Title of the implicit top-level class
pub const MAIN_TITLE: &str = "main";

/// The class under test and its declared parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subject {
    /// Lower-cased class name, `None` when it cannot be determined
    pub class_name: Option<String>,

    /// Parameters of the matching `Class` resource
    pub parameters: Option<Map<String, Value>>,
}

impl Subject {
    /// Resolve the class name (or take the override) and its parameters
    #[must_use]
    pub fn resolve(catalog: &Catalog, class_override: Option<&str>) -> Self {
        let class_name = resolve_class_name(catalog, class_override);
        if class_name.is_none() {
            log::warn!(
                "Could not determine the class under test (no Class[main] marker); \
                 pass --class to set it"
            );
        }

        let parameters = resolve_parameters(catalog, class_name.as_deref());
        match (&class_name, &parameters) {
            (Some(name), None) => log::debug!("No parameters found for Class[{name}]"),
            (Some(name), Some(params)) => {
                log::debug!("Class[{name}] declares {} parameter(s)", params.len());
            },
            (None, _) => {},
        }

        Self {
            class_name,
            parameters,
        }
    }

    /// Class name, or the empty string when unresolved
    #[must_use]
    pub fn name(&self) -> &str {
        self.class_name.as_deref().unwrap_or("")
    }

    /// Whether class parameters were found
    #[must_use]
    pub const fn has_parameters(&self) -> bool {
        self.parameters.is_some()
    }
}

/// Determine the class name under test
///
/// A non-empty override wins verbatim. Otherwise the title of the resource
/// immediately after `Class[main]` is returned, lower-cased.
#[must_use]
pub fn resolve_class_name(catalog: &Catalog, class_override: Option<&str>) -> Option<String> {
    if let Some(name) = class_override.filter(|n| !n.is_empty()) {
        return Some(name.to_string());
    }

    catalog
        .resources
        .windows(2)
        .find(|pair| pair[0].is(CLASS_TYPE, MAIN_TITLE))
        .map(|pair| pair[1].title.to_lowercase())
}

/// Title-case each `::` segment: `ntp::config` -> `Ntp::Config`
#[must_use]
pub fn capitalize_class(name: &str) -> String {
    name.split("::").map(capitalize_segment).collect::<Vec<_>>().join("::")
}

fn capitalize_segment(segment: &str) -> String {
    let mut chars = segment.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Look up the parameters of `Class[<Capitalized name>]`
#[must_use]
pub fn resolve_parameters(catalog: &Catalog, class_name: Option<&str>) -> Option<Map<String, Value>> {
    let expected = capitalize_class(class_name?);
    catalog.find(CLASS_TYPE, &expected)?.parameters.clone()
}
