//! Tests for generator configuration loading

use std::fs;
use std::path::PathBuf;

use catspec::Error;
use catspec::config::{DEFAULT_EXCLUDES, DEFAULT_OUTPUT_FILE, GeneratorConfig};
use serde_json::json;

use crate::common::TestWorkspace;

// =============================================================================
// DEFAULTS
// =============================================================================

#[test]
fn test_config_default() {
    let config = GeneratorConfig::default();
    assert_eq!(config.output_file, PathBuf::from(DEFAULT_OUTPUT_FILE));
    assert_eq!(config.excludes, DEFAULT_EXCLUDES);
    assert!(config.only_include.is_empty());
    assert!(config.compile_test);
}

#[test]
fn test_load_or_default_without_path() {
    assert_eq!(GeneratorConfig::load_or_default(None).unwrap(), GeneratorConfig::default());
}

// =============================================================================
// FILE FORMATS
// =============================================================================

#[test]
fn test_yaml_config() {
    let ws = TestWorkspace::new();
    let path = ws.path().join("config.yml");
    fs::write(
        &path,
        r#"
catalog_file: catalogs/ntp.json
output_file: spec/classes/ntp_spec.rb
excludes: [Stage, Class, "/::/"]
md5sums: true
setup:
  pre_condition:
    - include stdlib
  hiera_config: spec/fixtures/hiera/hiera.yaml
  facts:
    osfamily: RedHat
    processorcount: 2
"#,
    )
    .unwrap();

    let config = GeneratorConfig::load(&path).unwrap();
    assert_eq!(config.catalog_file, Some(PathBuf::from("catalogs/ntp.json")));
    assert_eq!(config.excludes, ["Stage", "Class", "/::/"]);
    assert!(config.md5sums);
    // keys the file leaves out keep their defaults
    assert!(config.compile_test);
    assert_eq!(config.setup.pre_condition, Some(vec!["include stdlib".to_string()]));
    let facts = config.setup.facts.unwrap();
    assert_eq!(facts["osfamily"], json!("RedHat"));
    assert_eq!(facts["processorcount"], json!(2));
}

#[test]
fn test_toml_config() {
    let ws = TestWorkspace::new();
    let path = ws.path().join("catspec.toml");
    fs::write(
        &path,
        r#"
catalog_file = "ntp.json"
only_include = ["Service[ntp]"]
compile_test = false

[setup.facts]
osfamily = "Debian"
"#,
    )
    .unwrap();

    let config = GeneratorConfig::load(&path).unwrap();
    assert_eq!(config.only_include, ["Service[ntp]"]);
    assert!(!config.compile_test);
    assert_eq!(config.excludes, DEFAULT_EXCLUDES);
    assert_eq!(config.setup.facts.unwrap()["osfamily"], json!("Debian"));
}

#[test]
fn test_invalid_config_is_config_error() {
    let ws = TestWorkspace::new();
    let path = ws.path().join("broken.yml");
    fs::write(&path, "excludes: {not: [a list").unwrap();
    assert!(matches!(GeneratorConfig::load(&path), Err(Error::Config { .. })));
}

#[test]
fn test_missing_config_is_config_error() {
    let ws = TestWorkspace::new();
    let err = GeneratorConfig::load(&ws.path().join("absent.yml")).unwrap_err();
    assert!(err.to_string().contains("absent.yml"));
}

// =============================================================================
// CLI-STYLE ADJUSTMENTS
// =============================================================================

#[test]
fn test_rule_helpers() {
    let mut config = GeneratorConfig::default();
    config.exclude("Package");
    config.include("Class");
    config.only_include("File[/x/]");
    assert_eq!(config.excludes.last().map(String::as_str), Some("Package"));
    assert_eq!(config.include_overrides, ["Class"]);
    assert_eq!(config.only_include, ["File[/x/]"]);
}

#[test]
fn test_empty_catalog_path_is_missing() {
    let config = GeneratorConfig {
        catalog_file: Some(PathBuf::new()),
        ..GeneratorConfig::default()
    };
    assert!(matches!(config.catalog_path(), Err(Error::MissingCatalog)));
}
