//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.

use orex::{
    ApplyMode, CopyDataAction, CreateArrayAction, CreateAttributeMatrixAction,
    CreateGroupAction, CreateImageGeometryAction, CreateTriangleGeometryAction, DataType,
    DeleteDataAction, DeleteKind, OreAction, OreObjectKind, OrePath, OreStructure,
    RenameDataAction,
};

fn path(text: &str) -> OrePath {
    text.parse().unwrap()
}

#[test]
fn create_array_modes_differ_only_in_storage() {
    let action = CreateArrayAction::new(DataType::Float64, vec![6], vec![3], path("Eulers"));

    let mut preflighted = OreStructure::new();
    action.apply(&mut preflighted, ApplyMode::Preflight).unwrap();
    let staged = preflighted.array_at(&path("Eulers")).unwrap();
    assert_eq!(staged.data_type(), DataType::Float64);
    assert_eq!(staged.num_tuples(), 6);
    assert_eq!(staged.num_components(), 3);
    assert!(!staged.is_allocated());

    let mut executed = OreStructure::new();
    action.apply(&mut executed, ApplyMode::Execute).unwrap();
    let real = executed.array_at(&path("Eulers")).unwrap();
    assert!(real.is_allocated());
    assert_eq!(real.as_f64().unwrap().len(), 18);
}

#[test]
fn create_actions_fail_on_collision_and_missing_parent() {
    let mut structure = OreStructure::new();
    CreateGroupAction::new(path("G"))
        .apply(&mut structure, ApplyMode::Preflight)
        .unwrap();

    // Collision on the same path.
    assert!(CreateGroupAction::new(path("G"))
        .apply(&mut structure, ApplyMode::Preflight)
        .is_err());

    // Parent must already exist.
    assert!(
        CreateAttributeMatrixAction::new(path("Missing/AM"), vec![4])
            .apply(&mut structure, ApplyMode::Preflight)
            .is_err()
    );
}

#[test]
fn image_geometry_brings_its_cell_matrix() {
    let mut structure = OreStructure::new();
    let action = CreateImageGeometryAction::new(
        path("Geom"),
        [4, 3, 2],
        [0.5, 0.5, 1.0],
        [0.0, 0.0, 0.0],
        "Cell Data",
    );
    action.apply(&mut structure, ApplyMode::Preflight).unwrap();

    let (dims, spacing, origin) = structure.image_geometry_at(&path("Geom")).unwrap();
    assert_eq!(dims, [4, 3, 2]);
    assert_eq!(spacing, [0.5, 0.5, 1.0]);
    assert_eq!(origin, [0.0, 0.0, 0.0]);

    // Cell tuples are stored slowest-first.
    assert_eq!(
        structure.attribute_matrix_at(&path("Geom/Cell Data")),
        Some(&[2usize, 3, 4][..])
    );
    assert_eq!(
        action
            .created_paths()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>(),
        vec!["Geom", "Geom/Cell Data"]
    );
}

#[test]
fn triangle_geometry_creates_shared_lists() {
    let mut structure = OreStructure::new();
    CreateTriangleGeometryAction::new(path("Mesh"), 24, 12, "Vertex Data", "Face Data")
        .apply(&mut structure, ApplyMode::Execute)
        .unwrap();

    assert_eq!(
        structure.attribute_matrix_at(&path("Mesh/Vertex Data")),
        Some(&[24usize][..])
    );
    assert_eq!(
        structure.attribute_matrix_at(&path("Mesh/Face Data")),
        Some(&[12usize][..])
    );

    let vertices = structure.array_at(&path("Mesh/SharedVertexList")).unwrap();
    assert_eq!(vertices.data_type(), DataType::Float32);
    assert_eq!(vertices.num_tuples(), 24);
    assert_eq!(vertices.num_components(), 3);
    assert!(vertices.is_allocated());

    let faces = structure.array_at(&path("Mesh/SharedFaceList")).unwrap();
    assert_eq!(faces.data_type(), DataType::UInt64);
    assert_eq!(faces.num_tuples(), 12);
}

#[test]
fn delete_requires_an_existing_target() {
    let mut structure = OreStructure::new();
    let action = DeleteDataAction::new(path("Gone"), DeleteKind::JustObject);
    assert!(action.apply(&mut structure, ApplyMode::Execute).is_err());
}

#[test]
fn rename_rejects_sibling_collision() {
    let mut structure = OreStructure::new();
    structure.insert("A", OreObjectKind::Group, None).unwrap();
    structure.insert("B", OreObjectKind::Group, None).unwrap();

    let action = RenameDataAction::new(path("A"), "B");
    assert!(action.apply(&mut structure, ApplyMode::Preflight).is_err());

    RenameDataAction::new(path("A"), "C")
        .apply(&mut structure, ApplyMode::Preflight)
        .unwrap();
    assert!(structure.contains(&path("C")));
}

#[test]
fn rename_reports_the_resulting_path_as_created() {
    let action = RenameDataAction::new(path("Grain Data/Foo"), "Bizz");
    let created = action.created_paths();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].to_string(), "Grain Data/Bizz");
}

#[test]
fn copy_carries_its_descendant_manifest() {
    let mut structure = OreStructure::new();
    structure.insert("Src", OreObjectKind::Group, None).unwrap();
    structure
        .insert_at(
            &path("Src/AM"),
            OreObjectKind::AttributeMatrix {
                tuple_shape: vec![2],
            },
        )
        .unwrap();

    let manifest = vec![path("Dst"), path("Dst/AM")];
    let action = CopyDataAction::new(path("Src"), path("Dst"), manifest.clone());
    assert_eq!(action.created_paths(), manifest);

    action.apply(&mut structure, ApplyMode::Execute).unwrap();
    assert!(structure.contains(&path("Dst/AM")));
    assert!(structure.contains(&path("Src/AM")));

    // Copying over an existing destination is a collision.
    assert!(action.apply(&mut structure, ApplyMode::Execute).is_err());
}
