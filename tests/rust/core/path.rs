//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.

use orex::{OreError, OrePath};
use proptest::prelude::*;

#[test]
fn round_trip_through_string_form() {
    let path = OrePath::from_segments(&["Small IN100", "Grain Data", "EulerAngles"]).unwrap();
    let parsed: OrePath = path.to_string().parse().unwrap();
    assert_eq!(parsed, path);
    assert_eq!(parsed.to_string(), "Small IN100/Grain Data/EulerAngles");
}

#[test]
fn construction_rejects_invalid_segments() {
    assert!(matches!(
        OrePath::new(Vec::new()),
        Err(OreError::Path { .. })
    ));
    assert!(OrePath::from_segments(&["A", ""]).is_err());
    assert!(OrePath::single("A/B").is_err());
    assert!("".parse::<OrePath>().is_err());
    assert!("A//B".parse::<OrePath>().is_err());
}

#[test]
fn derivations_are_pure() {
    let path = OrePath::from_segments(&["A", "B", "C"]).unwrap();

    let child = path.child("D").unwrap();
    assert_eq!(child.to_string(), "A/B/C/D");
    assert_eq!(path.len(), 3);

    let parent = path.parent().unwrap();
    assert_eq!(parent.to_string(), "A/B");

    let renamed = path.with_name("Z").unwrap();
    assert_eq!(renamed.to_string(), "A/B/Z");
    assert_eq!(path.name(), "C");
}

#[test]
fn single_segment_path_has_no_parent() {
    let path = OrePath::single("Root").unwrap();
    assert!(path.parent().is_none());
}

#[test]
fn segment_comparison_is_case_sensitive() {
    let lower = OrePath::single("data").unwrap();
    let upper = OrePath::single("Data").unwrap();
    assert_ne!(lower, upper);
}

#[test]
fn prefix_matching_is_segment_wise() {
    let path = OrePath::from_segments(&["FooBar", "Baz"]).unwrap();
    let prefix = OrePath::single("Foo").unwrap();
    assert!(!path.starts_with(&prefix));
    assert!(path.starts_with(&OrePath::single("FooBar").unwrap()));
}

proptest! {
    // Any constructible path must survive the string round trip.
    #[test]
    fn round_trip_holds_for_all_valid_segments(
        segments in prop::collection::vec("[A-Za-z0-9 _.-]{1,12}", 1..6)
    ) {
        let path = OrePath::new(segments).unwrap();
        let parsed: OrePath = path.to_string().parse().unwrap();
        prop_assert_eq!(parsed, path);
    }

    #[test]
    fn parent_then_child_restores_the_path(
        segments in prop::collection::vec("[A-Za-z0-9 _.-]{1,12}", 2..6)
    ) {
        let path = OrePath::new(segments).unwrap();
        let rebuilt = path
            .parent()
            .unwrap()
            .child(path.name().to_string())
            .unwrap();
        prop_assert_eq!(rebuilt, path);
    }
}
