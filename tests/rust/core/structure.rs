//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.

use orex::{DataType, OreArray, OreObjectKind, OreObjectType, OrePath, OreStructure};

fn path(text: &str) -> OrePath {
    text.parse().unwrap()
}

fn sample_array() -> OreObjectKind {
    OreObjectKind::Array(OreArray::placeholder(DataType::Float32, vec![8], vec![3]))
}

#[test]
fn resolution_walks_segments_from_the_roots() {
    let mut structure = OreStructure::new();
    structure.insert("Scan", OreObjectKind::Group, None).unwrap();
    structure
        .insert_at(
            &path("Scan/Cells"),
            OreObjectKind::AttributeMatrix {
                tuple_shape: vec![8],
            },
        )
        .unwrap();
    structure.insert_at(&path("Scan/Cells/Eulers"), sample_array()).unwrap();

    assert_eq!(
        structure.object_type_at(&path("Scan/Cells/Eulers")),
        Some(OreObjectType::Array)
    );
    assert_eq!(
        structure.attribute_matrix_at(&path("Scan/Cells")),
        Some(&[8usize][..])
    );
    assert!(structure.id_at(&path("Scan/Missing")).is_none());
    assert!(structure.id_at(&path("Cells")).is_none());
}

#[test]
fn typed_lookup_refuses_wrong_kinds_quietly() {
    let mut structure = OreStructure::new();
    structure.insert("G", OreObjectKind::Group, None).unwrap();

    assert!(structure.array_at(&path("G")).is_none());
    assert!(structure.expect_array(&path("G")).is_err());
    assert!(structure.image_geometry_at(&path("G")).is_none());
}

#[test]
fn ids_are_unique_for_the_structure_lifetime() {
    let mut structure = OreStructure::new();
    let first = structure.insert("A", OreObjectKind::Group, None).unwrap();
    structure.remove(&path("A")).unwrap();
    let second = structure.insert("A", OreObjectKind::Group, None).unwrap();
    assert_ne!(first, second);
}

#[test]
fn additional_parent_gives_shared_ownership() {
    let mut structure = OreStructure::new();
    structure.insert("GeomA", OreObjectKind::Group, None).unwrap();
    structure.insert("GeomB", OreObjectKind::Group, None).unwrap();
    structure
        .insert_at(
            &path("GeomA/Ensemble"),
            OreObjectKind::AttributeMatrix {
                tuple_shape: vec![2],
            },
        )
        .unwrap();

    structure
        .add_parent(&path("GeomA/Ensemble"), &path("GeomB"))
        .unwrap();

    // Same object, reachable through both parents.
    assert_eq!(
        structure.id_at(&path("GeomA/Ensemble")),
        structure.id_at(&path("GeomB/Ensemble"))
    );

    // Dropping one parent leaves the shared child reachable via the other.
    structure.remove(&path("GeomA")).unwrap();
    assert!(structure.contains(&path("GeomB/Ensemble")));
    assert!(!structure.contains(&path("GeomA")));
}

#[test]
fn removing_one_path_of_a_shared_child_keeps_the_object() {
    let mut structure = OreStructure::new();
    structure.insert("A", OreObjectKind::Group, None).unwrap();
    structure.insert("B", OreObjectKind::Group, None).unwrap();
    structure
        .insert_at(&path("A/Shared"), OreObjectKind::Group)
        .unwrap();
    structure.add_parent(&path("A/Shared"), &path("B")).unwrap();

    structure.remove(&path("A/Shared")).unwrap();

    assert!(!structure.contains(&path("A/Shared")));
    assert!(structure.contains(&path("B/Shared")));
}

#[test]
fn cascade_delete_spares_only_rescued_children() {
    let mut structure = OreStructure::new();
    structure.insert("Scan", OreObjectKind::Group, None).unwrap();
    structure.insert("Backup", OreObjectKind::Group, None).unwrap();
    structure
        .insert_at(&path("Scan/Cells"), OreObjectKind::Group)
        .unwrap();
    structure
        .insert_at(&path("Scan/Cells/Doomed"), sample_array())
        .unwrap();
    structure
        .insert_at(&path("Scan/Rescued"), OreObjectKind::Group)
        .unwrap();
    structure
        .add_parent(&path("Scan/Rescued"), &path("Backup"))
        .unwrap();

    structure.remove(&path("Scan")).unwrap();

    assert!(structure.contains(&path("Backup/Rescued")));
    assert_eq!(structure.len(), 2);
}

#[test]
fn descendant_paths_are_depth_first() {
    let mut structure = OreStructure::new();
    structure.insert("Root", OreObjectKind::Group, None).unwrap();
    structure
        .insert_at(&path("Root/AM"), OreObjectKind::AttributeMatrix {
            tuple_shape: vec![4],
        })
        .unwrap();
    structure.insert_at(&path("Root/AM/Arr"), sample_array()).unwrap();
    structure
        .insert_at(&path("Root/Other"), OreObjectKind::Group)
        .unwrap();

    let rendered: Vec<String> = structure
        .descendant_paths(&path("Root"))
        .unwrap()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(rendered, vec!["Root/AM", "Root/AM/Arr", "Root/Other"]);
}

#[test]
fn clone_is_an_independent_evolution() {
    let mut structure = OreStructure::new();
    structure.insert("Base", OreObjectKind::Group, None).unwrap();

    let mut probe = structure.clone();
    probe
        .insert_at(&path("Base/Staged"), OreObjectKind::Group)
        .unwrap();

    assert!(probe.contains(&path("Base/Staged")));
    assert!(!structure.contains(&path("Base/Staged")));
}
