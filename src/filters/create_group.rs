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

use uuid::Uuid;

use crate::action::OreOutputActions;
use crate::actions::CreateGroupAction;
use crate::arguments::{OreArguments, OreParameters};
use crate::filter::{OreCancel, OreFilter, OreMessenger, OrePreflightResult};
use crate::outcome::OreOutcome;
use crate::structure::OreStructure;
use crate::value::ParameterKind;

use super::literal_path;

pub const PARAM_OUTPUT_PATH: &str = "output_path";

/// The parent of the requested path does not exist.
pub const ERR_MISSING_PARENT: i32 = -3201;
/// An object already exists at the requested path.
pub const ERR_PATH_COLLISION: i32 = -3202;

/// Creates an empty group at a path.
#[derive(Clone, Debug, Default)]
pub struct CreateGroupFilter;

impl CreateGroupFilter {
    pub const UUID: Uuid = Uuid::from_u128(0x8c1a_44b0_e2d7_4f0b_a95e_31c8_0f6d_2a01);
}

impl OreFilter for CreateGroupFilter {
    fn name(&self) -> &'static str {
        "CreateGroupFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Create Data Group"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "generation", "group"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new().with(
            PARAM_OUTPUT_PATH,
            "Created Group",
            ParameterKind::Path,
            literal_path("Data"),
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
        let path = match args.path(PARAM_OUTPUT_PATH) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };

        if let Some(parent) = path.parent() {
            if !structure.contains(&parent) {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_MISSING_PARENT,
                    format!("parent path '{parent}' does not exist"),
                ));
            }
        }
        if structure.contains(&path) {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_PATH_COLLISION,
                format!("an object already exists at '{path}'"),
            ));
        }

        let mut output = OreOutputActions::new();
        output.push(CreateGroupAction::new(path));
        OrePreflightResult::new(OreOutcome::ok(output))
    }

    fn execute_impl(
        &self,
        _structure: &mut OreStructure,
        _args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        _cancel: &OreCancel,
    ) -> OreOutcome<()> {
        // The staged action is the whole job.
        OreOutcome::ok(())
    }
}
