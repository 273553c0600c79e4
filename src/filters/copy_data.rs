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
use crate::actions::CopyDataAction;
use crate::arguments::{OreArguments, OreParameters};
use crate::filter::{OreCancel, OreFilter, OreMessenger, OrePreflightResult};
use crate::outcome::OreOutcome;
use crate::structure::OreStructure;
use crate::value::ParameterKind;

use super::literal_path;

pub const PARAM_SOURCE_PATH: &str = "source_path";
pub const PARAM_DESTINATION_PATH: &str = "destination_path";

/// The source path does not resolve.
pub const ERR_MISSING_SOURCE: i32 = -5801;
/// An object already exists at the destination.
pub const ERR_DESTINATION_COLLISION: i32 = -5802;
/// The destination's parent does not exist.
pub const ERR_MISSING_DESTINATION_PARENT: i32 = -5803;

/// Deep-copies an object and everything below it to a new path.
#[derive(Clone, Debug, Default)]
pub struct CopyDataFilter;

impl CopyDataFilter {
    pub const UUID: Uuid = Uuid::from_u128(0xd581_7fc4_2290_4b0d_a6ef_58b1_c923_0d47);
}

impl OreFilter for CopyDataFilter {
    fn name(&self) -> &'static str {
        "CopyDataFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Copy Data Object"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "copy", "duplicate"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with(
                PARAM_SOURCE_PATH,
                "Object to Copy",
                ParameterKind::Path,
                literal_path("Data"),
            )
            .with(
                PARAM_DESTINATION_PATH,
                "Copied Object",
                ParameterKind::Path,
                literal_path("Data Copy"),
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
        let source = match args.path(PARAM_SOURCE_PATH) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let destination = match args.path(PARAM_DESTINATION_PATH) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };

        if !structure.contains(&source) {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_MISSING_SOURCE,
                format!("path '{source}' does not exist"),
            ));
        }
        if structure.contains(&destination) {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_DESTINATION_COLLISION,
                format!("an object already exists at '{destination}'"),
            ));
        }
        if let Some(parent) = destination.parent() {
            if !structure.contains(&parent) {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_MISSING_DESTINATION_PARENT,
                    format!("parent path '{parent}' does not exist"),
                ));
            }
        }

        // Every descendant the copy will create, computed while the source
        // subtree is still in hand.
        let mut created = vec![destination.clone()];
        match structure.descendant_paths(&source) {
            Ok(descendants) => {
                for descendant in descendants {
                    if let Some(mapped) = descendant.replace_prefix(&source, &destination) {
                        created.push(mapped);
                    }
                }
            }
            Err(err) => {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_MISSING_SOURCE,
                    err.to_string(),
                ))
            }
        }

        let mut output = OreOutputActions::new();
        output.push(CopyDataAction::new(source, destination, created));
        OrePreflightResult::new(OreOutcome::ok(output))
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
