//! Tests for resource filter rules and modes

use catspec::catalog::Resource;
use catspec::config::DEFAULT_EXCLUDES;
use catspec::filter::{FilterMode, FilterRule, ResourceFilter};
use test_case::test_case;

use crate::common::CatalogBuilder;

fn titles(resources: &[Resource]) -> Vec<String> {
    resources.iter().map(ToString::to_string).collect()
}

// =============================================================================
// RULE MATCHING
// =============================================================================

#[test_case("Service", "Service", "ntp", true ; "exact type matches")]
#[test_case("Service", "Service::Foo", "ntp", false ; "exact type is not a prefix match")]
#[test_case("/::/", "Concat::Fragment", "x", true ; "regex matches namespaced type")]
#[test_case("/::/", "File", "a::b", false ; "type regex ignores title")]
#[test_case("/^Fil/", "File", "x", true ; "anchored regex")]
#[test_case("Service[ntp]", "Service", "ntp", true ; "type and title")]
#[test_case("Service[ntp]", "Service", "ntpd", false ; "title must be exact")]
#[test_case("Service[ntp]", "Package", "ntp", false ; "type must be exact")]
#[test_case("File[/ntp/]", "File", "/etc/ntp.conf", true ; "title regex")]
#[test_case("File[/^\\/etc/]", "File", "/etc/motd", true ; "escaped slash in title regex")]
#[test_case("File[/xyz/]", "File", "/etc/ntp.conf", false ; "title regex without match")]
#[test_case("File[/ntp/]", "Service", "ntp", false ; "title regex requires exact type")]
fn rule_matches(rule: &str, type_name: &str, title: &str, expected: bool) {
    let rule = FilterRule::parse(rule).unwrap();
    assert_eq!(rule.matches(&Resource::new(type_name, title)), expected);
}

#[test_case("/(unclosed/" ; "bare regex")]
#[test_case("File[/(unclosed/]" ; "title regex")]
#[test_case("/[a-/" ; "bad class")]
fn malformed_regex_is_rule_syntax_error(rule: &str) {
    let err = FilterRule::parse(rule).unwrap_err();
    assert_eq!(err.rule, rule);
}

#[test]
fn malformed_only_include_fails_filter_construction() {
    let err = ResourceFilter::new(&["Class"], &[], &["Service[ntp]", "File[/(/]"]).unwrap_err();
    assert_eq!(err.rule, "File[/(/]");
}

#[test]
fn malformed_exclude_fails_filter_construction() {
    assert!(ResourceFilter::new(&["/(/"], &[], &[]).is_err());
}

#[test]
fn overridden_malformed_exclude_is_never_compiled() {
    assert!(ResourceFilter::new(&["/(/"], &["/(/"], &[]).is_ok());
}

// =============================================================================
// EXCLUDE MODE
// =============================================================================

#[test]
fn default_excludes_keep_order() {
    let mut resources = CatalogBuilder::new()
        .typed("Stage", "main")
        .typed("Package", "ntp")
        .typed("Class", "Ntp")
        .typed("Concat::Fragment", "x")
        .typed("File", "/etc/ntp.conf")
        .typed("Anchor", "ntp::begin")
        .typed("Service", "ntp")
        .build()
        .resources;

    let filter = ResourceFilter::new(&DEFAULT_EXCLUDES, &[], &[]).unwrap();
    assert!(!filter.is_only_include());
    filter.apply(&mut resources);
    assert_eq!(titles(&resources), ["Package[ntp]", "File[/etc/ntp.conf]", "Service[ntp]"]);
}

#[test]
fn include_override_removes_default_exclude() {
    let filter = ResourceFilter::new(&DEFAULT_EXCLUDES, &["Class"], &[]).unwrap();
    let FilterMode::Exclude(rules) = filter.mode() else {
        panic!("expected exclude mode");
    };
    assert_eq!(rules.len(), DEFAULT_EXCLUDES.len() - 1);
    assert!(filter.keeps(&Resource::new("Class", "Ntp")));
}

#[test]
fn include_override_without_match_changes_nothing() {
    let filter = ResourceFilter::new(&DEFAULT_EXCLUDES, &["Klass"], &[]).unwrap();
    assert!(!filter.keeps(&Resource::new("Class", "Ntp")));
}

#[test]
fn bracketed_exclude_drops_single_resource() {
    let mut resources =
        CatalogBuilder::new().typed("File", "/a").typed("File", "/b").build().resources;
    ResourceFilter::new(&["File[/a]"], &[], &[]).unwrap().apply(&mut resources);
    assert_eq!(titles(&resources), ["File[/b]"]);
}

// =============================================================================
// ONLY-INCLUDE MODE
// =============================================================================

#[test]
fn only_include_keeps_matching_resources_in_order() {
    let mut resources = CatalogBuilder::new()
        .typed("Service", "ntp")
        .typed("File", "/etc/ntp.conf")
        .typed("Package", "ntp")
        .typed("File", "/etc/motd")
        .build()
        .resources;

    let filter = ResourceFilter::new(&DEFAULT_EXCLUDES, &[], &["File[/ntp/]", "/^Serv/"]).unwrap();
    assert!(filter.is_only_include());
    filter.apply(&mut resources);
    assert_eq!(titles(&resources), ["Service[ntp]", "File[/etc/ntp.conf]"]);
}

#[test]
fn only_include_ignores_excludes() {
    let mut resources = CatalogBuilder::new().typed("Class", "Ntp").build().resources;
    ResourceFilter::new(&DEFAULT_EXCLUDES, &[], &["Class[Ntp]"]).unwrap().apply(&mut resources);
    assert_eq!(resources.len(), 1);
}

#[test]
fn only_include_without_match_empties_sequence() {
    let mut resources = CatalogBuilder::new().typed("File", "/etc/ntp.conf").build().resources;
    ResourceFilter::new(&DEFAULT_EXCLUDES, &[], &["File[/xyz/]"]).unwrap().apply(&mut resources);
    assert!(resources.is_empty());
}
