//! Property-based tests for normalization, filtering and digests
//!
//! Uses proptest to verify properties that should hold for all inputs.

use catspec::catalog::{Catalog, Resource, normalize};
use catspec::config::DEFAULT_EXCLUDES;
use catspec::filter::ResourceFilter;
use catspec::sanitize::content_digest;
use proptest::prelude::*;
use serde_json::json;

/// Types drawn from the default exclude list plus ordinary ones
const TYPES: [&str; 9] =
    ["Stage", "Class", "Anchor", "Concat::Fragment", "Service", "File", "Package", "User", "Exec"];

fn resource_strategy() -> impl Strategy<Value = Resource> {
    (prop::sample::select(TYPES.to_vec()), "[a-z/]{1,8}")
        .prop_map(|(type_name, title)| Resource::new(type_name, title))
}

fn resources_strategy() -> impl Strategy<Value = Vec<Resource>> {
    prop::collection::vec(resource_strategy(), 0..20)
}

proptest! {
    /// Normalizing a legacy catalog twice is the same as once
    #[test]
    fn normalize_idempotent(resources in resources_strategy(), legacy in any::<bool>()) {
        let body = serde_json::to_value(&resources).unwrap();
        let raw = if legacy {
            json!({"data": {"resources": body}})
        } else {
            json!({"resources": body})
        };
        let once = normalize(raw);
        prop_assert_eq!(normalize(once.clone()), once.clone());
        prop_assert_eq!(Catalog::from_value(once).unwrap().resources, resources);
    }

    /// Overriding every exact-string exclude restores all resources
    /// not caught by a regex rule
    #[test]
    fn exclude_then_override_restores(resources in resources_strategy()) {
        let exact: Vec<&str> = DEFAULT_EXCLUDES.iter().copied().filter(|r| !r.starts_with('/')).collect();
        let filter = ResourceFilter::new(&DEFAULT_EXCLUDES, exact.as_slice(), &[]).unwrap();

        let mut kept = resources.clone();
        filter.apply(&mut kept);
        let expected: Vec<Resource> =
            resources.into_iter().filter(|r| !r.type_name.contains("::")).collect();
        prop_assert_eq!(kept, expected);
    }

    /// Excluding never reorders; the result is a subsequence of the input
    #[test]
    fn exclude_preserves_order(resources in resources_strategy()) {
        let mut kept = resources.clone();
        ResourceFilter::new(&DEFAULT_EXCLUDES, &[], &[]).unwrap().apply(&mut kept);
        let mut remaining = resources.iter();
        for r in &kept {
            prop_assert!(remaining.any(|o| o == r));
        }
    }

    /// Only-include filtering is idempotent under the same rules
    #[test]
    fn only_include_idempotent(
        resources in resources_strategy(),
        rule in prop::sample::select(vec!["Service[ntp]", "File[/a/]", "/^(Exec|User)$/", "Package"]),
    ) {
        let filter = ResourceFilter::new(&DEFAULT_EXCLUDES, &[], &[rule]).unwrap();
        let mut once = resources;
        filter.apply(&mut once);
        let mut twice = once.clone();
        filter.apply(&mut twice);
        prop_assert_eq!(once, twice);
    }

    /// Digests are deterministic 128-bit hex strings
    #[test]
    fn digest_deterministic(content in ".*") {
        let value = json!(content);
        let a = content_digest(&value);
        let b = content_digest(&value);
        prop_assert_eq!(a.len(), 32);
        prop_assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        prop_assert_eq!(a, b);
    }
}
