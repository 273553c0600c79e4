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

//! # Ore Filter Module
//!
//! The polymorphic unit of computation and its two-phase contract. A filter
//! implements two hooks:
//!
//! - `preflight_impl` inspects (never mutates) the structure, validates
//!   parameters and paths, and returns a description of what would change
//!   as staged actions.
//! - `execute_impl` performs the real algorithm over storage the engine
//!   already created, polling the shared cancel flag in long loops.
//!
//! The provided `preflight` and `execute` methods implement the engine side
//! of the protocol on top of those hooks: declared-parameter validation runs
//! before any path resolution, immediate actions are applied right after a
//! successful preflight, and deferred actions are committed only after a
//! successful execute.
//!
//! `execute` is self-contained: it re-runs `preflight_impl` and applies the
//! staged actions in execute mode before `execute_impl`, so the shapes it
//! produces are by construction the shapes the preflight described. Callers
//! that preflight a whole pipeline first should do so against a clone of
//! the structure.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::action::{ApplyMode, OreOutputActions};
use crate::arguments::{OreArguments, OreParameters};
use crate::outcome::{codes, OreFault, OreOutcome, OreStatus};
use crate::structure::OreStructure;

/// Shared cooperative cancellation flag.
///
/// Cloning is cheap and every clone observes the same flag. There is no
/// forced preemption: filter bodies and their internal workers poll the flag
/// at a granularity they choose.
#[derive(Clone, Debug, Default)]
pub struct OreCancel {
    flag: Arc<AtomicBool>,
}

impl OreCancel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Irrevocable for the run.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Progress or status update emitted by a running filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OreMessage {
    Status(String),
    /// Percentage in `0..=100` plus a short description.
    Progress(u8, String),
}

/// Callback signature for message sinks.
pub type MessageSink = dyn Fn(OreMessage) + Send + Sync;

/// Handle through which filters report messages. A silent messenger drops
/// everything.
#[derive(Clone, Copy, Default)]
pub struct OreMessenger<'a> {
    sink: Option<&'a MessageSink>,
}

impl<'a> OreMessenger<'a> {
    pub fn new(sink: &'a MessageSink) -> Self {
        Self { sink: Some(sink) }
    }

    pub fn silent() -> OreMessenger<'static> {
        OreMessenger { sink: None }
    }

    pub fn send(&self, message: OreMessage) {
        if let Some(sink) = self.sink {
            sink(message);
        }
    }

    pub fn status(&self, text: impl Into<String>) {
        self.send(OreMessage::Status(text.into()));
    }

    pub fn progress(&self, percent: u8, text: impl Into<String>) {
        self.send(OreMessage::Progress(percent, text.into()));
    }
}

impl fmt::Debug for OreMessenger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OreMessenger")
            .field("attached", &self.sink.is_some())
            .finish()
    }
}

/// Named value computed during preflight, surfaced to hosts for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrePreflightValue {
    pub name: String,
    pub value: String,
}

impl OrePreflightValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Result bundle of one preflight call: the staged actions (or faults) plus
/// any display values.
#[derive(Debug)]
pub struct OrePreflightResult {
    pub outcome: OreOutcome<OreOutputActions>,
    pub values: Vec<OrePreflightValue>,
}

impl OrePreflightResult {
    pub fn new(outcome: OreOutcome<OreOutputActions>) -> Self {
        Self {
            outcome,
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: OrePreflightValue) -> Self {
        self.values.push(value);
        self
    }
}

/// The unit of computation: metadata plus the two-phase contract.
pub trait OreFilter: fmt::Debug + Send + Sync {
    /// Stable class-style name, unique within a plugin.
    fn name(&self) -> &'static str;

    /// Stable identity of the filter class.
    fn uuid(&self) -> Uuid;

    /// Display name for hosts.
    fn human_name(&self) -> &'static str;

    /// Search/browse tags for hosts.
    fn default_tags(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Full declaration of the filter's parameters, independent of any
    /// structure.
    fn parameters(&self) -> OreParameters;

    /// A fresh boxed copy of this filter.
    fn clone_dyn(&self) -> Box<dyn OreFilter>;

    /// Filter-defined dry run. Must not mutate `structure`; returns staged
    /// actions describing what execute would change, or faults.
    fn preflight_impl(
        &self,
        structure: &OreStructure,
        args: &OreArguments,
        messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OrePreflightResult;

    /// Filter-defined real work over storage the engine already created.
    fn execute_impl(
        &self,
        structure: &mut OreStructure,
        args: &OreArguments,
        messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OreOutcome<()>;

    /// Engine-side preflight: validate declared parameters, run
    /// `preflight_impl`, then apply the staged immediate actions in
    /// preflight mode so later filters observe the hypothetical
    /// post-execution shape. Deferred actions are returned untouched.
    fn preflight(
        &self,
        structure: &mut OreStructure,
        args: &OreArguments,
        messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OrePreflightResult {
        let faults = self.parameters().validate(args);
        if !faults.is_empty() {
            return OrePreflightResult::new(OreOutcome::failed(faults));
        }
        if cancel.is_cancelled() {
            return OrePreflightResult::new(OreOutcome::cancelled());
        }

        let OrePreflightResult { outcome, values } =
            self.preflight_impl(structure, args, messenger, cancel);
        let OreOutcome { status, warnings } = outcome;
        let status = match status {
            OreStatus::Completed(output) => {
                match output.apply_immediate(structure, ApplyMode::Preflight) {
                    Ok(()) => OreStatus::Completed(output),
                    Err(err) => OreStatus::Failed(vec![OreFault::new(
                        codes::ACTION_APPLY_FAILED,
                        err.to_string(),
                    )]),
                }
            }
            other => other,
        };
        OrePreflightResult {
            outcome: OreOutcome { status, warnings },
            values,
        }
    }

    /// Engine-side execute: re-validate, apply the staged actions in execute
    /// mode (real allocation), run `execute_impl`, and commit deferred
    /// actions only if it succeeded. A cancelled or failed execute leaves
    /// deferred actions unapplied.
    fn execute(
        &self,
        structure: &mut OreStructure,
        args: &OreArguments,
        messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OreOutcome<()> {
        let faults = self.parameters().validate(args);
        if !faults.is_empty() {
            return OreOutcome::failed(faults);
        }
        if cancel.is_cancelled() {
            return OreOutcome::cancelled();
        }

        let OrePreflightResult { outcome, .. } =
            self.preflight_impl(structure, args, messenger, cancel);
        let OreOutcome { status, mut warnings } = outcome;
        let output = match status {
            OreStatus::Completed(output) => output,
            OreStatus::Failed(faults) => {
                return OreOutcome {
                    status: OreStatus::Failed(faults),
                    warnings,
                }
            }
            OreStatus::Cancelled => {
                return OreOutcome {
                    status: OreStatus::Cancelled,
                    warnings,
                }
            }
        };

        if let Err(err) = output.apply_immediate(structure, ApplyMode::Execute) {
            return OreOutcome {
                status: OreStatus::Failed(vec![OreFault::new(
                    codes::ACTION_APPLY_FAILED,
                    err.to_string(),
                )]),
                warnings,
            };
        }

        let exec = self.execute_impl(structure, args, messenger, cancel);
        warnings.extend(exec.warnings);
        match exec.status {
            OreStatus::Completed(()) => {
                if let Err(err) = output.apply_deferred(structure, ApplyMode::Execute) {
                    return OreOutcome {
                        status: OreStatus::Failed(vec![OreFault::new(
                            codes::DEFERRED_APPLY_FAILED,
                            err.to_string(),
                        )]),
                        warnings,
                    };
                }
                OreOutcome {
                    status: OreStatus::Completed(()),
                    warnings,
                }
            }
            OreStatus::Failed(faults) => OreOutcome {
                status: OreStatus::Failed(faults),
                warnings,
            },
            OreStatus::Cancelled => OreOutcome {
                status: OreStatus::Cancelled,
                warnings,
            },
        }
    }
}

impl Clone for Box<dyn OreFilter> {
    fn clone(&self) -> Self {
        self.clone_dyn()
    }
}
