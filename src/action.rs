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

//! # Ore Action Module
//!
//! Actions are value objects describing one structural mutation of a
//! structure. A filter's preflight never mutates the structure itself; it
//! stages actions, and the engine applies them. The same action value is
//! applied in one of two modes:
//!
//! - `Preflight`: establish the post-execution shape cheaply. Arrays get
//!   placeholder stores that still answer shape and type queries so filters
//!   preflighted later in the same pipeline can validate against them.
//! - `Execute`: perform the real, fully-sized mutation.
//!
//! On failure the structure is not guaranteed to be unmodified; a failed
//! apply makes the whole structure suspect for that run.

use std::fmt;

use crate::errors::Result;
use crate::path::OrePath;

use crate::structure::OreStructure;

/// Which phase an action is being applied for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyMode {
    /// Shape-only staging; placeholder storage.
    Preflight,
    /// Real allocation and mutation.
    Execute,
}

/// One staged structural mutation.
pub trait OreAction: fmt::Debug + Send + Sync {
    /// Applies the mutation to `structure` for the given mode.
    fn apply(&self, structure: &mut OreStructure, mode: ApplyMode) -> Result<()>;

    /// Paths this action brings into existence, used for rename detection
    /// between consecutive preflights. Destructive and in-place actions
    /// report nothing.
    fn created_paths(&self) -> Vec<OrePath> {
        Vec::new()
    }
}

/// Everything a filter's preflight stages for later application.
///
/// `actions` are consumed right after a successful preflight so downstream
/// filters observe the hypothetical post-execution shape. `deferred_actions`
/// are retained by the pipeline node and consumed only after the node's
/// execute succeeded. `modified_paths` is informational: existing objects the
/// filter will mutate in place.
#[derive(Debug, Default)]
pub struct OreOutputActions {
    pub actions: Vec<Box<dyn OreAction>>,
    pub deferred_actions: Vec<Box<dyn OreAction>>,
    pub modified_paths: Vec<OrePath>,
}

impl OreOutputActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages an immediate action.
    pub fn push(&mut self, action: impl OreAction + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Stages a deferred action.
    pub fn push_deferred(&mut self, action: impl OreAction + 'static) {
        self.deferred_actions.push(Box::new(action));
    }

    /// Records an existing path that will be mutated in place.
    pub fn push_modified(&mut self, path: OrePath) {
        self.modified_paths.push(path);
    }

    /// Paths created by the immediate actions, in staging order.
    pub fn created_paths(&self) -> Vec<OrePath> {
        self.actions
            .iter()
            .flat_map(|action| action.created_paths())
            .collect()
    }

    /// Applies every immediate action in order, stopping at the first
    /// failure.
    pub fn apply_immediate(&self, structure: &mut OreStructure, mode: ApplyMode) -> Result<()> {
        for action in &self.actions {
            action.apply(structure, mode)?;
        }
        Ok(())
    }

    /// Applies every deferred action in order, stopping at the first
    /// failure.
    pub fn apply_deferred(&self, structure: &mut OreStructure, mode: ApplyMode) -> Result<()> {
        for action in &self.deferred_actions {
            action.apply(structure, mode)?;
        }
        Ok(())
    }
}
