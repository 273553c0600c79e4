//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.

use uuid::Uuid;

use orex::filters::{create_array, create_group, CreateArrayFilter, CreateGroupFilter};
use orex::{
    NodeStatus, OreArguments, OreCancel, OreFilter, OreFilterNode, OreMessenger, OreOutcome,
    OreOutputActions, OreParameters, OrePath, OrePipeline, OrePipelineNode,
    OrePreflightResult, OreStructure, OreValue,
};

fn path(text: &str) -> OrePath {
    text.parse().unwrap()
}

fn group_args(target: &str) -> OreArguments {
    OreArguments::new().with(create_group::PARAM_OUTPUT_PATH, OreValue::Path(path(target)))
}

fn array_args(target: &str) -> OreArguments {
    OreArguments::new()
        .with(create_array::PARAM_OUTPUT_PATH, OreValue::Path(path(target)))
        .with(create_array::PARAM_DATA_TYPE, OreValue::Choice(4))
        .with(
            create_array::PARAM_TUPLE_DIMS,
            OreValue::Table(vec![vec![10.0]]),
        )
        .with(create_array::PARAM_COMPONENT_COUNT, OreValue::Int(1))
}

/// Fails its execute; preflight stages nothing.
#[derive(Clone, Debug)]
struct AlwaysFailingFilter;

impl OreFilter for AlwaysFailingFilter {
    fn name(&self) -> &'static str {
        "AlwaysFailingFilter"
    }

    fn uuid(&self) -> Uuid {
        Uuid::from_u128(0x7777_0002_aaaa_4bbb_8ccc_0123_4567_89ab)
    }

    fn human_name(&self) -> &'static str {
        "Always Failing"
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
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
        OreOutcome::fault(-977, "this filter always fails")
    }
}

#[test]
fn single_group_node_preflights_and_executes() {
    // Scenario: one node creating a root group on an empty structure.
    let mut pipeline = OrePipeline::new("Create One Group");
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("G1"));

    let base = OreStructure::new();
    let mut probe = base.clone();
    let preflight = pipeline.preflight(&mut probe, true);
    assert!(preflight.is_completed());
    assert!(probe.contains(&path("G1")));
    assert!(probe.children_names(&path("G1")).unwrap().is_empty());

    let mut structure = base;
    let outcome = pipeline.execute(&mut structure, &OreMessenger::silent(), &OreCancel::new());
    assert!(outcome.is_completed());
    assert!(structure.contains(&path("G1")));
}

#[test]
fn deferred_delete_is_visible_during_preflight_and_gone_after_execute() {
    // Node 1 creates an array, node 2 stages a move-style deferred delete.
    let registry_delete = orex::filters::DeleteDataFilter;
    let mut pipeline = OrePipeline::new("Create Then Delete");
    pipeline.push_filter(Box::new(CreateArrayFilter), array_args("Arr"));
    pipeline.push_filter(
        Box::new(registry_delete),
        OreArguments::new().with(
            orex::filters::delete_data::PARAM_REMOVED_PATH,
            OreValue::Path(path("Arr")),
        ),
    );

    let base = OreStructure::new();
    let mut probe = base.clone();
    let preflight = pipeline.preflight(&mut probe, true);
    assert!(preflight.is_completed());
    // A third node preflighted after these two would still see the array.
    assert!(probe.contains(&path("Arr")));

    // The delete was recorded as deferred on its node.
    match pipeline.node(1).unwrap() {
        OrePipelineNode::Filter(node) => {
            let output = node.preflight_output().unwrap();
            assert_eq!(output.actions.len(), 0);
            assert_eq!(output.deferred_actions.len(), 1);
        }
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }

    let mut structure = base;
    let outcome = pipeline.execute(&mut structure, &OreMessenger::silent(), &OreCancel::new());
    assert!(outcome.is_completed());
    assert!(!structure.contains(&path("Arr")));
}

#[test]
fn node_order_is_data_dependency_order() {
    let mut pipeline = OrePipeline::new("Ordering");
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("G1"));
    pipeline.push_filter(Box::new(CreateArrayFilter), array_args("G1/Arr"));

    let mut forward_probe = OreStructure::new();
    assert!(pipeline.preflight(&mut forward_probe, true).is_completed());

    // Reversed, the array node resolves its parent before it exists.
    pipeline.move_node(1, 0).unwrap();
    let mut reversed_probe = OreStructure::new();
    let outcome = pipeline.preflight(&mut reversed_probe, true);
    assert!(outcome.is_failed());
    assert!(outcome
        .faults()
        .iter()
        .any(|fault| fault.code == create_array::ERR_MISSING_PARENT));
}

#[test]
fn preflight_collects_faults_across_all_nodes() {
    let mut pipeline = OrePipeline::new("Two Broken Nodes");
    pipeline.push_filter(Box::new(CreateArrayFilter), array_args("MissingA/Arr"));
    pipeline.push_filter(Box::new(CreateArrayFilter), array_args("MissingB/Arr"));

    let mut probe = OreStructure::new();
    let outcome = pipeline.preflight(&mut probe, true);
    assert!(outcome.is_failed());
    // Both nodes reported, not just the first.
    assert_eq!(outcome.faults().len(), 2);
}

#[test]
fn rename_propagation_rewrites_downstream_arguments() {
    let mut pipeline = OrePipeline::new("Rename Propagation");
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("Foo"));
    pipeline.push_filter(Box::new(CreateArrayFilter), array_args("Foo/Bar"));

    let base = OreStructure::new();
    let mut first_probe = base.clone();
    assert!(pipeline.preflight(&mut first_probe, true).is_completed());

    // The user retargets node 1 to a new group name.
    match pipeline.node_mut(0).unwrap() {
        OrePipelineNode::Filter(node) => node.set_args(group_args("Bizz")),
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }

    let mut second_probe = base.clone();
    assert!(pipeline.preflight(&mut second_probe, true).is_completed());

    match pipeline.node(1).unwrap() {
        OrePipelineNode::Filter(node) => {
            let rebound = node.args().path(create_array::PARAM_OUTPUT_PATH).unwrap();
            assert_eq!(rebound.to_string(), "Bizz/Bar");
        }
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }
    assert!(second_probe.contains(&path("Bizz/Bar")));
}

#[test]
fn rename_propagation_can_be_disabled() {
    let mut pipeline = OrePipeline::new("No Propagation");
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("Foo"));
    pipeline.push_filter(Box::new(CreateArrayFilter), array_args("Foo/Bar"));

    let base = OreStructure::new();
    let mut first_probe = base.clone();
    assert!(pipeline.preflight(&mut first_probe, false).is_completed());

    match pipeline.node_mut(0).unwrap() {
        OrePipelineNode::Filter(node) => node.set_args(group_args("Bizz")),
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }

    let mut second_probe = base.clone();
    let outcome = pipeline.preflight(&mut second_probe, false);

    // The stale reference is left alone and fails to resolve.
    match pipeline.node(1).unwrap() {
        OrePipelineNode::Filter(node) => {
            let stale = node.args().path(create_array::PARAM_OUTPUT_PATH).unwrap();
            assert_eq!(stale.to_string(), "Foo/Bar");
        }
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }
    assert!(outcome.is_failed());
}

#[test]
fn moving_a_node_preserves_its_identity() {
    let mut pipeline = OrePipeline::new("Move Identity");
    let first = pipeline.push_filter(Box::new(CreateGroupFilter), group_args("A"));
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("B"));
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("C"));

    assert_eq!(pipeline.position_of(first), Some(0));
    pipeline.move_node(0, 2).unwrap();
    assert_eq!(pipeline.position_of(first), Some(2));
    pipeline.move_node(2, 0).unwrap();
    assert_eq!(pipeline.position_of(first), Some(0));

    assert!(pipeline.move_node(0, 3).is_err());
}

#[test]
fn disabled_nodes_are_skipped_in_both_phases() {
    let mut pipeline = OrePipeline::new("Disabled Node");
    let mut node = OreFilterNode::new(Box::new(CreateGroupFilter), group_args("Skipped"));
    node.set_disabled(true);
    pipeline.push_back(OrePipelineNode::Filter(node));
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("Present"));

    let base = OreStructure::new();
    let mut probe = base.clone();
    assert!(pipeline.preflight(&mut probe, true).is_completed());
    assert!(!probe.contains(&path("Skipped")));
    assert!(probe.contains(&path("Present")));

    let mut structure = base;
    assert!(pipeline
        .execute(&mut structure, &OreMessenger::silent(), &OreCancel::new())
        .is_completed());
    assert!(!structure.contains(&path("Skipped")));
    assert!(structure.contains(&path("Present")));
}

#[test]
fn execution_stops_at_the_first_failing_node() {
    let mut pipeline = OrePipeline::new("Stop On Failure");
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("Before"));
    pipeline.push_filter(Box::new(AlwaysFailingFilter), OreArguments::new());
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("After"));

    let mut structure = OreStructure::new();
    let outcome = pipeline.execute(&mut structure, &OreMessenger::silent(), &OreCancel::new());

    assert!(outcome.is_failed());
    assert_eq!(outcome.faults()[0].code, -977);
    // Completed nodes stay applied; nodes after the failure never ran.
    assert!(structure.contains(&path("Before")));
    assert!(!structure.contains(&path("After")));

    match pipeline.node(1).unwrap() {
        OrePipelineNode::Filter(node) => {
            assert_eq!(node.status(), NodeStatus::Executed { valid: false });
        }
        OrePipelineNode::Pipeline(_) => panic!("expected a filter node"),
    }
}

#[test]
fn sub_pipelines_recurse_in_internal_order() {
    let mut inner = OrePipeline::new("Inner");
    inner.push_filter(Box::new(CreateGroupFilter), group_args("Outer/Inner"));

    let mut pipeline = OrePipeline::new("Outer");
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("Outer"));
    pipeline.push_back(OrePipelineNode::Pipeline(inner));
    pipeline.push_filter(Box::new(CreateArrayFilter), array_args("Outer/Inner/Arr"));

    let base = OreStructure::new();
    let mut probe = base.clone();
    assert!(pipeline.preflight(&mut probe, true).is_completed());
    assert!(probe.contains(&path("Outer/Inner/Arr")));

    let mut structure = base;
    assert!(pipeline
        .execute(&mut structure, &OreMessenger::silent(), &OreCancel::new())
        .is_completed());
    assert!(structure.contains(&path("Outer/Inner/Arr")));
}

#[test]
fn pre_cancelled_execute_schedules_nothing() {
    let mut pipeline = OrePipeline::new("Cancelled Run");
    pipeline.push_filter(Box::new(CreateGroupFilter), group_args("Never"));

    let cancel = OreCancel::new();
    cancel.cancel();
    let mut structure = OreStructure::new();
    let outcome = pipeline.execute(&mut structure, &OreMessenger::silent(), &cancel);

    assert!(outcome.is_cancelled());
    assert!(!structure.contains(&path("Never")));
}
