//! Copyright © 2025-2026 Anders Revsbech. All Rights Reserved.
//!
//! This file is part of Ore.
//! The Ore project belongs to the Feldspar Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Ore Pipeline Module
//!
//! An ordered, mutable sequence of nodes, each a filter with bound arguments
//! or a nested sub-pipeline. Node order is data-dependency order: a node may
//! only reference paths created by earlier nodes or already present when the
//! run starts.
//!
//! Preflight walks every node even after a failure so hosts can collect all
//! faults in one pass; execute stops at the first failing node and performs
//! no pipeline-wide rollback. Between two preflights of the same node, the
//! pipeline diffs the node's created paths; when exactly one path was
//! replaced by exactly one new path under the same parent, that is treated
//! as a rename and, if propagation is enabled, downstream path arguments are
//! rewritten by structural prefix replacement.
//!
//! Preflight applies placeholder-mode actions to the structure it is given,
//! while execute re-stages everything in execute mode. Run the two phases
//! against separate evolutions of the structure: typically preflight
//! against a clone, then execute against the original.

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::action::OreOutputActions;
use crate::arguments::OreArguments;
use crate::errors::{OreError, Result};
use crate::filter::{OreCancel, OreFilter, OreMessenger, OrePreflightResult};
use crate::outcome::{OreFault, OreOutcome, OreStatus, OreWarning};
use crate::path::OrePath;
use crate::registry::OreFilterRegistry;
use crate::structure::OreStructure;
use crate::value::OreValue;

/// Per-node position in the run state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    Unexecuted,
    Preflighted { valid: bool },
    Executed { valid: bool },
}

/// A filter with bound arguments, plus the node-local run state.
#[derive(Debug)]
pub struct OreFilterNode {
    id: Uuid,
    filter: Box<dyn OreFilter>,
    args: OreArguments,
    disabled: bool,
    status: NodeStatus,
    preflight_output: Option<OreOutputActions>,
    last_created: Option<Vec<OrePath>>,
}

impl OreFilterNode {
    pub fn new(filter: Box<dyn OreFilter>, args: OreArguments) -> Self {
        Self {
            id: Uuid::new_v4(),
            filter,
            args,
            disabled: false,
            status: NodeStatus::Unexecuted,
            preflight_output: None,
            last_created: None,
        }
    }

    /// Identity of this node instance. Survives reordering.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filter(&self) -> &dyn OreFilter {
        self.filter.as_ref()
    }

    pub fn args(&self) -> &OreArguments {
        &self.args
    }

    /// Rebinding arguments invalidates the cached preflight state.
    pub fn set_args(&mut self, args: OreArguments) {
        self.args = args;
        self.status = NodeStatus::Unexecuted;
        self.preflight_output = None;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// The action set staged by the last preflight, if one completed.
    pub fn preflight_output(&self) -> Option<&OreOutputActions> {
        self.preflight_output.as_ref()
    }
}

/// One entry of a pipeline: a filter node or a nested sub-pipeline.
#[derive(Debug)]
pub enum OrePipelineNode {
    Filter(OreFilterNode),
    Pipeline(OrePipeline),
}

impl OrePipelineNode {
    pub fn id(&self) -> Uuid {
        match self {
            OrePipelineNode::Filter(node) => node.id(),
            OrePipelineNode::Pipeline(sub) => sub.id(),
        }
    }

    /// Rewrites every path argument starting with `old` throughout this node
    /// (recursing into sub-pipelines). Returns how many values changed.
    pub fn rewrite_path_prefix(&mut self, old: &OrePath, new: &OrePath) -> usize {
        match self {
            OrePipelineNode::Filter(node) => node.args.rewrite_path_prefix(old, new),
            OrePipelineNode::Pipeline(sub) => sub
                .nodes
                .iter_mut()
                .map(|node| node.rewrite_path_prefix(old, new))
                .sum(),
        }
    }
}

/// Ordered sequence of filter/sub-pipeline nodes executed strictly in order.
#[derive(Debug)]
pub struct OrePipeline {
    id: Uuid,
    name: String,
    nodes: Vec<OrePipelineNode>,
}

impl OrePipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[OrePipelineNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&OrePipelineNode> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut OrePipelineNode> {
        self.nodes.get_mut(index)
    }

    pub fn push_back(&mut self, node: OrePipelineNode) {
        self.nodes.push(node);
    }

    pub fn push_front(&mut self, node: OrePipelineNode) {
        self.nodes.insert(0, node);
    }

    /// Convenience for appending a filter with its arguments.
    pub fn push_filter(&mut self, filter: Box<dyn OreFilter>, args: OreArguments) -> Uuid {
        let node = OreFilterNode::new(filter, args);
        let id = node.id();
        self.nodes.push(OrePipelineNode::Filter(node));
        id
    }

    pub fn insert(&mut self, index: usize, node: OrePipelineNode) -> Result<()> {
        if index > self.nodes.len() {
            return Err(OreError::validation(format!(
                "insert index {index} out of bounds for {} nodes",
                self.nodes.len()
            )));
        }
        self.nodes.insert(index, node);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<OrePipelineNode> {
        if index >= self.nodes.len() {
            return Err(OreError::validation(format!(
                "remove index {index} out of bounds for {} nodes",
                self.nodes.len()
            )));
        }
        Ok(self.nodes.remove(index))
    }

    /// Moves the node at `from` so it ends up at index `to`. The node
    /// instance is preserved, so observers holding its id can re-locate it
    /// with [`position_of`](Self::position_of) afterwards.
    pub fn move_node(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.nodes.len() || to >= self.nodes.len() {
            return Err(OreError::validation(format!(
                "move {from} -> {to} out of bounds for {} nodes",
                self.nodes.len()
            )));
        }
        let node = self.nodes.remove(from);
        self.nodes.insert(to, node);
        Ok(())
    }

    /// Index of the node with the given identity, at this nesting level.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.nodes.iter().position(|node| node.id() == id)
    }

    /// Preflights every node in order against `structure`.
    ///
    /// A failing node does not stop the walk; its faults are recorded
    /// (prefixed with the node position) and the overall outcome is marked
    /// failed, so hosts see every problem in one pass. When
    /// `propagate_renames` is set, a detected rename of a node's created
    /// path rewrites matching path arguments of all later nodes.
    pub fn preflight(
        &mut self,
        structure: &mut OreStructure,
        propagate_renames: bool,
    ) -> OreOutcome<()> {
        self.preflight_with(
            structure,
            propagate_renames,
            &OreMessenger::silent(),
            &OreCancel::new(),
        )
    }

    pub fn preflight_with(
        &mut self,
        structure: &mut OreStructure,
        propagate_renames: bool,
        messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OreOutcome<()> {
        let mut faults: Vec<OreFault> = Vec::new();
        let mut warnings: Vec<OreWarning> = Vec::new();

        for index in 0..self.nodes.len() {
            if cancel.is_cancelled() {
                return OreOutcome {
                    status: OreStatus::Cancelled,
                    warnings,
                };
            }

            let renames: Vec<(OrePath, OrePath)> = match &mut self.nodes[index] {
                OrePipelineNode::Pipeline(sub) => {
                    let outcome =
                        sub.preflight_with(structure, propagate_renames, messenger, cancel);
                    warnings.extend(outcome.warnings);
                    match outcome.status {
                        OreStatus::Completed(()) => {}
                        OreStatus::Failed(sub_faults) => {
                            faults.extend(sub_faults.into_iter().map(|fault| {
                                OreFault::new(
                                    fault.code,
                                    format!("node {index} [{}]: {}", sub.name, fault.message),
                                )
                            }));
                        }
                        OreStatus::Cancelled => {
                            return OreOutcome {
                                status: OreStatus::Cancelled,
                                warnings,
                            }
                        }
                    }
                    Vec::new()
                }
                OrePipelineNode::Filter(node) => {
                    if node.disabled {
                        log::debug!(
                            "skipping disabled node {index} '{}'",
                            node.filter.human_name()
                        );
                        Vec::new()
                    } else {
                        let OrePreflightResult { outcome, .. } =
                            node.filter
                                .preflight(structure, &node.args, messenger, cancel);
                        warnings.extend(outcome.warnings);
                        match outcome.status {
                            OreStatus::Completed(output) => {
                                let created = output.created_paths();
                                let renames = match &node.last_created {
                                    Some(previous) => diff_renames(previous, &created),
                                    None => Vec::new(),
                                };
                                node.last_created = Some(created);
                                node.preflight_output = Some(output);
                                node.status = NodeStatus::Preflighted { valid: true };
                                renames
                            }
                            OreStatus::Failed(node_faults) => {
                                node.status = NodeStatus::Preflighted { valid: false };
                                let name = node.filter.human_name();
                                faults.extend(node_faults.into_iter().map(|fault| {
                                    OreFault::new(
                                        fault.code,
                                        format!("node {index} [{name}]: {}", fault.message),
                                    )
                                }));
                                Vec::new()
                            }
                            OreStatus::Cancelled => {
                                return OreOutcome {
                                    status: OreStatus::Cancelled,
                                    warnings,
                                }
                            }
                        }
                    }
                }
            };

            if propagate_renames {
                for (old, new) in &renames {
                    log::debug!("propagating rename '{old}' -> '{new}' to downstream nodes");
                    for later in self.nodes[index + 1..].iter_mut() {
                        later.rewrite_path_prefix(old, new);
                    }
                }
            }
        }

        let status = if faults.is_empty() {
            OreStatus::Completed(())
        } else {
            OreStatus::Failed(faults)
        };
        OreOutcome { status, warnings }
    }

    /// Executes every node in order against `structure`.
    ///
    /// Execution requires the node sequence to have passed a preflight
    /// against an equivalent structure state. The first failing node stops
    /// the walk; deferred actions of nodes that already completed stay
    /// applied (there is no pipeline-wide rollback). Cancellation stops
    /// scheduling and surfaces as a neutral outcome.
    pub fn execute(
        &mut self,
        structure: &mut OreStructure,
        messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OreOutcome<()> {
        let mut warnings: Vec<OreWarning> = Vec::new();

        for index in 0..self.nodes.len() {
            if cancel.is_cancelled() {
                log::info!("pipeline '{}' cancelled before node {index}", self.name);
                return OreOutcome {
                    status: OreStatus::Cancelled,
                    warnings,
                };
            }

            match &mut self.nodes[index] {
                OrePipelineNode::Pipeline(sub) => {
                    let outcome = sub.execute(structure, messenger, cancel);
                    warnings.extend(outcome.warnings);
                    match outcome.status {
                        OreStatus::Completed(()) => {}
                        OreStatus::Failed(sub_faults) => {
                            let name = sub.name.clone();
                            return OreOutcome {
                                status: OreStatus::Failed(
                                    sub_faults
                                        .into_iter()
                                        .map(|fault| {
                                            OreFault::new(
                                                fault.code,
                                                format!(
                                                    "node {index} [{name}]: {}",
                                                    fault.message
                                                ),
                                            )
                                        })
                                        .collect(),
                                ),
                                warnings,
                            };
                        }
                        OreStatus::Cancelled => {
                            return OreOutcome {
                                status: OreStatus::Cancelled,
                                warnings,
                            }
                        }
                    }
                }
                OrePipelineNode::Filter(node) => {
                    if node.disabled {
                        log::debug!(
                            "skipping disabled node {index} '{}'",
                            node.filter.human_name()
                        );
                        continue;
                    }
                    let name = node.filter.human_name();
                    log::info!("executing node {index} '{name}'");
                    let started = Instant::now();
                    let outcome = node
                        .filter
                        .execute(structure, &node.args, messenger, cancel);
                    warnings.extend(outcome.warnings);
                    match outcome.status {
                        OreStatus::Completed(()) => {
                            node.status = NodeStatus::Executed { valid: true };
                            log::info!(
                                "node {index} '{name}' finished in {:.3}s",
                                started.elapsed().as_secs_f64()
                            );
                        }
                        OreStatus::Failed(node_faults) => {
                            node.status = NodeStatus::Executed { valid: false };
                            log::warn!("node {index} '{name}' failed");
                            return OreOutcome {
                                status: OreStatus::Failed(
                                    node_faults
                                        .into_iter()
                                        .map(|fault| {
                                            OreFault::new(
                                                fault.code,
                                                format!(
                                                    "node {index} [{name}]: {}",
                                                    fault.message
                                                ),
                                            )
                                        })
                                        .collect(),
                                ),
                                warnings,
                            };
                        }
                        OreStatus::Cancelled => {
                            log::info!("node {index} '{name}' stopped by request");
                            return OreOutcome {
                                status: OreStatus::Cancelled,
                                warnings,
                            };
                        }
                    }
                }
            }
        }

        OreOutcome {
            status: OreStatus::Completed(()),
            warnings,
        }
    }

    /// Renders this pipeline as a document value.
    ///
    /// Arguments appear in the filter's declaration order, so two pipelines
    /// with equal content render to equal documents.
    pub fn to_json(&self) -> Value {
        let filters: Vec<Value> = self.nodes.iter().map(node_to_json).collect();
        json!({
            "name": self.name,
            "filters": filters,
        })
    }

    /// Rebuilds a pipeline from a document value, instantiating filters
    /// through `registry` and decoding each argument per its declared
    /// parameter kind. Nested documents become sub-pipelines.
    pub fn from_json(value: &Value, registry: &OreFilterRegistry) -> Result<OrePipeline> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Untitled Pipeline");
        let entries = value
            .get("filters")
            .and_then(Value::as_array)
            .ok_or_else(|| OreError::Serde("pipeline document missing 'filters' array".into()))?;

        let mut pipeline = OrePipeline::new(name);
        for (index, entry) in entries.iter().enumerate() {
            if entry.get("filters").is_some() {
                let sub = OrePipeline::from_json(entry, registry)?;
                pipeline.push_back(OrePipelineNode::Pipeline(sub));
                continue;
            }

            let header = entry
                .get("filter")
                .and_then(Value::as_object)
                .ok_or_else(|| {
                    OreError::Serde(format!("pipeline node #{index} missing 'filter' object"))
                })?;
            let uuid_text = header.get("uuid").and_then(Value::as_str).ok_or_else(|| {
                OreError::Serde(format!("pipeline node #{index} missing filter uuid"))
            })?;
            let uuid = Uuid::parse_str(uuid_text).map_err(|err| {
                OreError::Serde(format!("pipeline node #{index} has invalid uuid: {err}"))
            })?;
            let disabled = header
                .get("isDisabled")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            let filter = registry.instantiate(uuid)?;
            let declaration = filter.parameters();
            let mut args = OreArguments::new();
            if let Some(raw_args) = entry.get("args").and_then(Value::as_object) {
                for (key, raw) in raw_args {
                    let spec = declaration.get(key).ok_or_else(|| {
                        OreError::Serde(format!(
                            "filter '{}' does not declare parameter '{key}'",
                            filter.name()
                        ))
                    })?;
                    args.insert(key.clone(), OreValue::from_json(spec.kind, raw)?);
                }
            }

            let mut node = OreFilterNode::new(filter, args);
            node.set_disabled(disabled);
            pipeline.push_back(OrePipelineNode::Filter(node));
        }
        Ok(pipeline)
    }

    /// Writes the pipeline document to a file, pretty-printed, replacing the
    /// target atomically via a sibling temporary.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let rendered = serde_json::to_string_pretty(&self.to_json())?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, rendered)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Reads a pipeline document from a file.
    pub fn read_file(path: impl AsRef<Path>, registry: &OreFilterRegistry) -> Result<OrePipeline> {
        let text = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Self::from_json(&value, registry)
    }
}

fn node_to_json(node: &OrePipelineNode) -> Value {
    match node {
        OrePipelineNode::Pipeline(sub) => sub.to_json(),
        OrePipelineNode::Filter(node) => {
            let mut args = Map::new();
            for spec in node.filter.parameters().specs() {
                if let Some(value) = node.args.get(spec.key) {
                    args.insert(spec.key.to_string(), value.to_json());
                }
            }
            json!({
                "filter": {
                    "uuid": node.filter.uuid().to_string(),
                    "isDisabled": node.disabled,
                },
                "args": args,
            })
        }
    }
}

/// Pairs the created-path diff between two consecutive preflights of one
/// node as a rename. Only the unambiguous case counts: exactly one removed
/// top-level path against exactly one added top-level path under the same
/// parent. Anything else propagates nothing.
fn diff_renames(previous: &[OrePath], current: &[OrePath]) -> Vec<(OrePath, OrePath)> {
    let removed: Vec<&OrePath> = previous
        .iter()
        .filter(|path| !current.contains(path))
        .collect();
    let added: Vec<&OrePath> = current
        .iter()
        .filter(|path| !previous.contains(path))
        .collect();

    let removed_roots = prefix_roots(&removed);
    let added_roots = prefix_roots(&added);

    if removed_roots.len() == 1
        && added_roots.len() == 1
        && removed_roots[0].parent() == added_roots[0].parent()
    {
        return vec![(removed_roots[0].clone(), added_roots[0].clone())];
    }
    if !removed_roots.is_empty() || !added_roots.is_empty() {
        log::debug!(
            "ambiguous created-path diff ({} removed, {} added), not propagating renames",
            removed_roots.len(),
            added_roots.len()
        );
    }
    Vec::new()
}

/// Drops every path that lives under another path in the same set.
fn prefix_roots<'a>(paths: &[&'a OrePath]) -> Vec<&'a OrePath> {
    paths
        .iter()
        .filter(|candidate| {
            !paths
                .iter()
                .any(|other| *other != **candidate && candidate.starts_with(other))
        })
        .copied()
        .collect()
}
