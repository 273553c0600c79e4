//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.

use std::collections::HashMap;

use uuid::Uuid;

use orex::filters::{CreateArrayFilter, CreateGroupFilter, DeleteDataFilter};
use orex::{FilterFactory, OreCorePlugin, OreError, OreFilter, OreFilterRegistry, OrePlugin};

#[test]
fn core_plugin_registers_every_bundled_filter() {
    let mut registry = OreFilterRegistry::new();
    registry.register_plugin(&OreCorePlugin).unwrap();

    assert_eq!(registry.len(), 9);
    assert!(registry.contains(CreateGroupFilter::UUID));
    assert!(registry.contains(DeleteDataFilter::UUID));

    let info = &registry.plugins()[0];
    assert_eq!(info.id, OreCorePlugin::UUID);
    assert_eq!(info.name, "OreCore");
    assert_eq!(info.vendor, "Feldspar Team");
}

#[test]
fn instantiation_yields_fresh_filters() {
    let mut registry = OreFilterRegistry::new();
    registry.register_plugin(&OreCorePlugin).unwrap();

    let filter = registry.instantiate(CreateGroupFilter::UUID).unwrap();
    assert_eq!(filter.name(), "CreateGroupFilter");
    assert_eq!(filter.uuid(), CreateGroupFilter::UUID);
    assert_eq!(filter.human_name(), "Create Data Group");
    assert!(!filter.parameters().specs().is_empty());
}

#[test]
fn legacy_identities_resolve_to_current_filters() {
    let mut registry = OreFilterRegistry::new();
    registry.register_plugin(&OreCorePlugin).unwrap();

    let via_legacy = registry
        .instantiate(OreCorePlugin::LEGACY_DELETE_UUID)
        .unwrap();
    assert_eq!(via_legacy.uuid(), DeleteDataFilter::UUID);

    let via_legacy = registry
        .instantiate(OreCorePlugin::LEGACY_CREATE_ARRAY_UUID)
        .unwrap();
    assert_eq!(via_legacy.uuid(), CreateArrayFilter::UUID);
}

#[test]
fn duplicate_registrations_are_rejected() {
    let mut registry = OreFilterRegistry::new();
    registry.register_plugin(&OreCorePlugin).unwrap();

    assert!(matches!(
        registry.register_plugin(&OreCorePlugin),
        Err(OreError::Plugin { .. })
    ));
    assert!(registry
        .register_factory(|| Box::new(CreateGroupFilter))
        .is_err());
}

#[test]
fn unknown_identities_are_reported() {
    let registry = OreFilterRegistry::new();
    let err = registry
        .instantiate(Uuid::from_u128(0xdead_beef))
        .unwrap_err();
    assert!(matches!(err, OreError::Plugin { .. }));
}

#[test]
fn registries_are_independent_values() {
    struct TinyPlugin;

    impl OrePlugin for TinyPlugin {
        fn id(&self) -> Uuid {
            Uuid::from_u128(0x7777_0004_aaaa_4bbb_8ccc_0123_4567_89ab)
        }

        fn name(&self) -> &str {
            "Tiny"
        }

        fn vendor(&self) -> &str {
            "Tests"
        }

        fn filters(&self) -> Vec<FilterFactory> {
            vec![(|| Box::new(CreateGroupFilter) as Box<dyn OreFilter>) as FilterFactory]
        }

        fn legacy_ids(&self) -> HashMap<Uuid, Uuid> {
            HashMap::new()
        }
    }

    let mut with_core = OreFilterRegistry::new();
    with_core.register_plugin(&OreCorePlugin).unwrap();

    let mut tiny_only = OreFilterRegistry::new();
    tiny_only.register_plugin(&TinyPlugin).unwrap();

    assert_eq!(with_core.len(), 9);
    assert_eq!(tiny_only.len(), 1);
    assert!(tiny_only.contains(CreateGroupFilter::UUID));
    assert!(!tiny_only.contains(DeleteDataFilter::UUID));
}
