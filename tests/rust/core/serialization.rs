//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.

use serde_json::json;
use uuid::Uuid;

use orex::filters::{create_group, CreateGroupFilter};
use orex::{
    OreArguments, OreCancel, OreCorePlugin, OreFilter, OreFilterRegistry, OreMessenger,
    OreOutcome, OreOutputActions, OreParameters, OrePath, OrePipeline, OrePipelineNode,
    OrePreflightResult, OreStructure, OreValue, ParameterKind,
};

fn path(text: &str) -> OrePath {
    text.parse().unwrap()
}

/// Declares one parameter of every supported kind.
#[derive(Clone, Debug)]
struct EveryKindFilter;

impl EveryKindFilter {
    const UUID: Uuid = Uuid::from_u128(0x7777_0003_aaaa_4bbb_8ccc_0123_4567_89ab);
}

impl OreFilter for EveryKindFilter {
    fn name(&self) -> &'static str {
        "EveryKindFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Every Kind"
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with("flag", "Flag", ParameterKind::Bool, OreValue::Bool(false))
            .with("count", "Count", ParameterKind::Int, OreValue::Int(0))
            .with(
                "tolerance",
                "Tolerance",
                ParameterKind::Float,
                OreValue::Float(0.0),
            )
            .with(
                "label",
                "Label",
                ParameterKind::Text,
                OreValue::Text(String::new()),
            )
            .with(
                "target",
                "Target",
                ParameterKind::Path,
                OreValue::Path(path("Data")),
            )
            .with(
                "sources",
                "Sources",
                ParameterKind::PathList,
                OreValue::PathList(Vec::new()),
            )
            .with(
                "mode",
                "Mode",
                ParameterKind::Choice,
                OreValue::Choice(0),
            )
            .with(
                "spacing",
                "Spacing",
                ParameterKind::FloatVec,
                OreValue::FloatVec(vec![1.0, 1.0, 1.0]),
            )
            .with(
                "tuple_dims",
                "Tuple Dimensions",
                ParameterKind::Table,
                OreValue::Table(vec![vec![1.0]]),
            )
    }

    fn clone_dyn(&self) -> Box<dyn OreFilter> {
        Box::new(self.clone())
    }

    fn preflight_impl(
        &self,
        _structure: &OreStructure,
        _args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        _cancel: &OreCancel,
    ) -> OrePreflightResult {
        OrePreflightResult::new(OreOutcome::ok(OreOutputActions::new()))
    }

    fn execute_impl(
        &self,
        _structure: &mut OreStructure,
        _args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        _cancel: &OreCancel,
    ) -> OreOutcome<()> {
        OreOutcome::ok(())
    }
}

fn registry() -> OreFilterRegistry {
    let mut registry = OreFilterRegistry::new();
    registry.register_plugin(&OreCorePlugin).unwrap();
    registry
        .register_factory(|| Box::new(EveryKindFilter))
        .unwrap();
    registry
}

fn every_kind_args() -> OreArguments {
    OreArguments::new()
        .with("flag", OreValue::Bool(true))
        .with("count", OreValue::Int(-3))
        .with("tolerance", OreValue::Float(0.25))
        .with("label", OreValue::Text("Ferrite".into()))
        .with("target", OreValue::Path(path("Scan/Cell Data/Phases")))
        .with(
            "sources",
            OreValue::PathList(vec![path("Scan"), path("Scan/Cell Data")]),
        )
        .with("mode", OreValue::Choice(2))
        .with("spacing", OreValue::FloatVec(vec![0.25, 0.25, 1.0]))
        .with(
            "tuple_dims",
            OreValue::Table(vec![vec![2.0, 3.0, 4.0]]),
        )
}

#[test]
fn document_round_trip_is_lossless_for_every_value_kind() {
    let registry = registry();
    let mut pipeline = OrePipeline::new("Round Trip");
    pipeline.push_filter(Box::new(EveryKindFilter), every_kind_args());

    let document = pipeline.to_json();
    let reloaded = OrePipeline::from_json(&document, &registry).unwrap();
    assert_eq!(reloaded.to_json(), document);

    match reloaded.node(0).unwrap() {
        OrePipelineNode::Filter(node) => {
            assert_eq!(node.args(), &every_kind_args());
        }
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }
}

#[test]
fn nested_sub_pipelines_round_trip() {
    let registry = registry();

    let mut inner = OrePipeline::new("Inner");
    inner.push_filter(
        Box::new(CreateGroupFilter),
        OreArguments::new().with(
            create_group::PARAM_OUTPUT_PATH,
            OreValue::Path(path("Outer/Inner")),
        ),
    );
    let mut pipeline = OrePipeline::new("Outer");
    pipeline.push_filter(
        Box::new(CreateGroupFilter),
        OreArguments::new().with(
            create_group::PARAM_OUTPUT_PATH,
            OreValue::Path(path("Outer")),
        ),
    );
    pipeline.push_back(OrePipelineNode::Pipeline(inner));

    let document = pipeline.to_json();
    let reloaded = OrePipeline::from_json(&document, &registry).unwrap();
    assert_eq!(reloaded.to_json(), document);
    assert_eq!(reloaded.len(), 2);
    assert!(matches!(
        reloaded.node(1),
        Some(OrePipelineNode::Pipeline(_))
    ));
}

#[test]
fn disabled_flag_round_trips() {
    let registry = registry();
    let document = json!({
        "name": "Disabled Node",
        "filters": [{
            "filter": {
                "uuid": CreateGroupFilter::UUID.to_string(),
                "isDisabled": true,
            },
            "args": { "output_path": "G1" },
        }],
    });

    let reloaded = OrePipeline::from_json(&document, &registry).unwrap();
    match reloaded.node(0).unwrap() {
        OrePipelineNode::Filter(node) => assert!(node.is_disabled()),
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }
    assert_eq!(
        reloaded.to_json()["filters"][0]["filter"]["isDisabled"],
        json!(true)
    );
}

#[test]
fn paths_deserialize_from_segment_arrays_too() {
    let registry = registry();
    let document = json!({
        "name": "Segment Arrays",
        "filters": [{
            "filter": { "uuid": CreateGroupFilter::UUID.to_string() },
            "args": { "output_path": ["Scan", "Grain Data"] },
        }],
    });

    let reloaded = OrePipeline::from_json(&document, &registry).unwrap();
    match reloaded.node(0).unwrap() {
        OrePipelineNode::Filter(node) => {
            let bound = node.args().path(create_group::PARAM_OUTPUT_PATH).unwrap();
            assert_eq!(bound.to_string(), "Scan/Grain Data");
        }
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }
}

#[test]
fn unknown_filters_and_undeclared_parameters_are_rejected() {
    let registry = registry();

    let unknown = json!({
        "name": "Unknown",
        "filters": [{
            "filter": { "uuid": Uuid::from_u128(0xdead_beef).to_string() },
            "args": {},
        }],
    });
    assert!(OrePipeline::from_json(&unknown, &registry).is_err());

    let undeclared = json!({
        "name": "Undeclared",
        "filters": [{
            "filter": { "uuid": CreateGroupFilter::UUID.to_string() },
            "args": { "no_such_parameter": 1 },
        }],
    });
    assert!(OrePipeline::from_json(&undeclared, &registry).is_err());
}

#[test]
fn file_round_trip_preserves_the_document() {
    let registry = registry();
    let mut pipeline = OrePipeline::new("On Disk");
    pipeline.push_filter(Box::new(EveryKindFilter), every_kind_args());

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("pipeline.json");
    pipeline.write_file(&file_path).unwrap();

    let reloaded = OrePipeline::read_file(&file_path, &registry).unwrap();
    assert_eq!(reloaded.to_json(), pipeline.to_json());
}

#[test]
fn reloaded_pipelines_still_run() {
    let registry = registry();
    let document = json!({
        "name": "Runs After Reload",
        "filters": [{
            "filter": { "uuid": CreateGroupFilter::UUID.to_string() },
            "args": { "output_path": "G1" },
        }],
    });

    let mut pipeline = OrePipeline::from_json(&document, &registry).unwrap();
    let mut structure = OreStructure::new();
    let outcome = pipeline.execute(&mut structure, &OreMessenger::silent(), &OreCancel::new());
    assert!(outcome.is_completed());
    assert!(structure.contains(&path("G1")));
}
