//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.

use uuid::Uuid;

use orex::filters::{
    create_array, initialize_data, resample_image_geometry, CreateArrayFilter,
    InitializeDataFilter, ResampleImageGeometryFilter,
};
use orex::{
    ApplyMode, CopyDataAction, CreateImageGeometryAction, DataType, DeleteDataAction,
    DeleteKind, OreAction, OreArguments, OreCancel, OreFilter, OreMessenger, OreOutcome,
    OreOutputActions, OreParameters, OrePath, OrePreflightResult, OreRangeRunner,
    OreStructure, OreValue, ParameterKind, outcome::codes,
};

fn path(text: &str) -> OrePath {
    text.parse().unwrap()
}

fn create_array_args(target: &str, tuples: Vec<f64>) -> OreArguments {
    OreArguments::new()
        .with(create_array::PARAM_OUTPUT_PATH, OreValue::Path(path(target)))
        .with(create_array::PARAM_DATA_TYPE, OreValue::Choice(4))
        .with(create_array::PARAM_TUPLE_DIMS, OreValue::Table(vec![tuples]))
        .with(create_array::PARAM_COMPONENT_COUNT, OreValue::Int(1))
}

/// Copies `source` to `destination` and stages a deferred delete of the
/// source, failing or cancelling its execute on demand.
#[derive(Clone, Debug)]
struct MoveDataFilter {
    fail_execute: bool,
    cancel_during_execute: bool,
}

impl MoveDataFilter {
    const UUID: Uuid = Uuid::from_u128(0x7777_0001_aaaa_4bbb_8ccc_0123_4567_89ab);

    fn well_behaved() -> Self {
        Self {
            fail_execute: false,
            cancel_during_execute: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_execute: true,
            cancel_during_execute: false,
        }
    }

    fn self_cancelling() -> Self {
        Self {
            fail_execute: false,
            cancel_during_execute: true,
        }
    }
}

impl OreFilter for MoveDataFilter {
    fn name(&self) -> &'static str {
        "MoveDataFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Move Data"
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with(
                "source_path",
                "Source",
                ParameterKind::Path,
                OreValue::Path(path("Src")),
            )
            .with(
                "destination_path",
                "Destination",
                ParameterKind::Path,
                OreValue::Path(path("Dst")),
            )
    }

    fn clone_dyn(&self) -> Box<dyn OreFilter> {
        Box::new(self.clone())
    }

    fn preflight_impl(
        &self,
        structure: &OreStructure,
        args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        _cancel: &OreCancel,
    ) -> OrePreflightResult {
        let source = match args.path("source_path") {
            Ok(p) => p,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let destination = match args.path("destination_path") {
            Ok(p) => p,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        if !structure.contains(&source) {
            return OrePreflightResult::new(OreOutcome::fault(
                -901,
                format!("path '{source}' does not exist"),
            ));
        }

        let mut output = OreOutputActions::new();
        output.push(CopyDataAction::new(
            source.clone(),
            destination.clone(),
            vec![destination],
        ));
        output.push_deferred(DeleteDataAction::new(source, DeleteKind::JustObject));
        OrePreflightResult::new(
            OreOutcome::ok(output).with_warning(-950, "attribute metadata is not moved"),
        )
    }

    fn execute_impl(
        &self,
        _structure: &mut OreStructure,
        _args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OreOutcome<()> {
        if self.cancel_during_execute {
            cancel.cancel();
            let completed = OreRangeRunner::new().run(1024, cancel, |_| {});
            assert!(!completed);
            return OreOutcome::cancelled();
        }
        if self.fail_execute {
            return OreOutcome::fault(-902, "simulated execution failure");
        }
        OreOutcome::ok(())
    }
}

fn move_args() -> OreArguments {
    OreArguments::new()
        .with("source_path", OreValue::Path(path("Src")))
        .with("destination_path", OreValue::Path(path("Dst")))
}

fn seeded_structure() -> OreStructure {
    let mut structure = OreStructure::new();
    structure
        .insert("Src", orex::OreObjectKind::Group, None)
        .unwrap();
    structure
}

#[test]
fn declared_parameters_are_validated_before_any_path_resolution() {
    let filter = CreateArrayFilter;
    let mut structure = OreStructure::new();
    // Arguments reference a parent that does not exist AND omit a declared
    // key; the missing key must win.
    let args = OreArguments::new().with(
        create_array::PARAM_OUTPUT_PATH,
        OreValue::Path(path("Nowhere/Arr")),
    );

    let result = filter.preflight(
        &mut structure,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    assert!(result.outcome.is_failed());
    assert!(result
        .outcome
        .faults()
        .iter()
        .all(|fault| fault.code == codes::MISSING_PARAMETER));
    assert!(structure.is_empty());
}

#[test]
fn preflight_is_idempotent_on_an_unmodified_structure() {
    let filter = CreateArrayFilter;
    let base = OreStructure::new();
    let args = create_array_args("Arr", vec![10.0]);

    let mut first_probe = base.clone();
    let first = filter.preflight(
        &mut first_probe,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    let mut second_probe = base.clone();
    let second = filter.preflight(
        &mut second_probe,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );

    let first_created: Vec<String> = first
        .outcome
        .value()
        .unwrap()
        .created_paths()
        .iter()
        .map(|p| p.to_string())
        .collect();
    let second_created: Vec<String> = second
        .outcome
        .value()
        .unwrap()
        .created_paths()
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(first_created, second_created);
    assert_eq!(
        first_probe.array_at(&path("Arr")).unwrap().tuple_shape(),
        second_probe.array_at(&path("Arr")).unwrap().tuple_shape()
    );
}

#[test]
fn standalone_execute_produces_the_preflighted_shape() {
    let filter = CreateArrayFilter;
    let args = create_array_args("Arr", vec![10.0]);

    // What preflight describes...
    let mut probe = OreStructure::new();
    let preflight = filter.preflight(
        &mut probe,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    assert!(preflight.outcome.is_completed());
    let staged_shape = probe.array_at(&path("Arr")).unwrap().tuple_shape().to_vec();

    // ...execute materializes, without the caller replaying any actions.
    let mut structure = OreStructure::new();
    let outcome = filter.execute(
        &mut structure,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    assert!(outcome.is_completed());
    let real = structure.array_at(&path("Arr")).unwrap();
    assert_eq!(real.tuple_shape(), &staged_shape[..]);
    assert!(real.is_allocated());
}

#[test]
fn deferred_actions_commit_only_after_a_successful_execute() {
    // Success path: source deleted after the move.
    let mut moved = seeded_structure();
    let outcome = MoveDataFilter::well_behaved().execute(
        &mut moved,
        &move_args(),
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    assert!(outcome.is_completed());
    assert!(!moved.contains(&path("Src")));
    assert!(moved.contains(&path("Dst")));

    // Failure path: the copy failed, so the source must survive.
    let mut kept = seeded_structure();
    let outcome = MoveDataFilter::failing().execute(
        &mut kept,
        &move_args(),
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    assert!(outcome.is_failed());
    assert_eq!(outcome.faults()[0].code, -902);
    assert!(kept.contains(&path("Src")));
}

#[test]
fn cancellation_is_neutral_and_skips_deferred_actions() {
    let mut structure = seeded_structure();
    let cancel = OreCancel::new();
    let outcome = MoveDataFilter::self_cancelling().execute(
        &mut structure,
        &move_args(),
        &OreMessenger::silent(),
        &cancel,
    );
    assert!(outcome.is_cancelled());
    assert!(!outcome.is_failed());
    assert!(structure.contains(&path("Src")));
}

#[test]
fn warnings_surface_alongside_a_valid_outcome() {
    let mut structure = seeded_structure();
    let result = MoveDataFilter::well_behaved().preflight(
        &mut structure,
        &move_args(),
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    assert!(result.outcome.is_completed());
    assert_eq!(result.outcome.warnings.len(), 1);
    assert_eq!(result.outcome.warnings[0].code, -950);
}

#[test]
fn negative_spacing_fails_preflight_with_the_documented_code() {
    let filter = ResampleImageGeometryFilter;
    let mut structure = OreStructure::new();
    CreateImageGeometryAction::new(
        path("Geom"),
        [4, 4, 4],
        [1.0, 1.0, 1.0],
        [0.0, 0.0, 0.0],
        "Cell Data",
    )
    .apply(&mut structure, ApplyMode::Execute)
    .unwrap();

    let args = OreArguments::new()
        .with(
            resample_image_geometry::PARAM_INPUT_GEOMETRY,
            OreValue::Path(path("Geom")),
        )
        .with(
            resample_image_geometry::PARAM_SPACING,
            OreValue::FloatVec(vec![-1.0, 1.0, 1.0]),
        )
        .with(
            resample_image_geometry::PARAM_OUTPUT_GEOMETRY,
            OreValue::Path(path("Out")),
        );

    let objects_before = structure.len();
    let result = filter.preflight(
        &mut structure,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );

    assert!(result.outcome.is_failed());
    let faults = result.outcome.faults();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].code, resample_image_geometry::ERR_BAD_SPACING);
    // No actions were produced or applied.
    assert_eq!(structure.len(), objects_before);
}

#[test]
fn in_place_filters_report_modified_paths_and_create_nothing() {
    let mut structure = OreStructure::new();
    orex::CreateArrayAction::new(DataType::Int32, vec![16], vec![1], path("Counts"))
        .apply(&mut structure, ApplyMode::Execute)
        .unwrap();

    let args = OreArguments::new()
        .with(
            initialize_data::PARAM_ARRAY_PATH,
            OreValue::Path(path("Counts")),
        )
        .with(initialize_data::PARAM_INIT_VALUE, OreValue::Float(7.0));

    let mut probe = structure.clone();
    let preflight = InitializeDataFilter.preflight(
        &mut probe,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    let output = preflight.outcome.value().unwrap();
    assert!(output.actions.is_empty());
    assert!(output.deferred_actions.is_empty());
    assert_eq!(output.modified_paths.len(), 1);
    assert_eq!(output.modified_paths[0].to_string(), "Counts");

    let outcome = InitializeDataFilter.execute(
        &mut structure,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    assert!(outcome.is_completed());
    let values = structure.array_at(&path("Counts")).unwrap().as_i32().unwrap();
    assert!(values.iter().all(|v| *v == 7));
}

#[test]
fn resample_copies_nearest_source_tuples() {
    let mut structure = OreStructure::new();
    CreateImageGeometryAction::new(
        path("Geom"),
        [2, 1, 1],
        [1.0, 1.0, 1.0],
        [0.0, 0.0, 0.0],
        "Cell Data",
    )
    .apply(&mut structure, ApplyMode::Execute)
    .unwrap();
    orex::CreateArrayAction::new(
        DataType::Float32,
        vec![1, 1, 2],
        vec![1],
        path("Geom/Cell Data/Values"),
    )
    .apply(&mut structure, ApplyMode::Execute)
    .unwrap();
    structure
        .array_at_mut(&path("Geom/Cell Data/Values"))
        .unwrap()
        .as_f32_mut()
        .unwrap()
        .copy_from_slice(&[10.0, 20.0]);

    let args = OreArguments::new()
        .with(
            resample_image_geometry::PARAM_INPUT_GEOMETRY,
            OreValue::Path(path("Geom")),
        )
        .with(
            resample_image_geometry::PARAM_SPACING,
            OreValue::FloatVec(vec![0.5, 1.0, 1.0]),
        )
        .with(
            resample_image_geometry::PARAM_OUTPUT_GEOMETRY,
            OreValue::Path(path("Out")),
        );

    let outcome = ResampleImageGeometryFilter.execute(
        &mut structure,
        &args,
        &OreMessenger::silent(),
        &OreCancel::new(),
    );
    assert!(outcome.is_completed());

    let (dims, spacing, _) = structure.image_geometry_at(&path("Out")).unwrap();
    assert_eq!(dims, [4, 1, 1]);
    assert_eq!(spacing, [0.5, 1.0, 1.0]);

    let resampled = structure
        .array_at(&path("Out/Cell Data/Values"))
        .unwrap()
        .as_f32()
        .unwrap();
    assert_eq!(resampled, &[10.0, 10.0, 20.0, 20.0]);
}
