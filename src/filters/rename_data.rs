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
use crate::actions::RenameDataAction;
use crate::arguments::{OreArguments, OreParameters};
use crate::filter::{OreCancel, OreFilter, OreMessenger, OrePreflightResult};
use crate::outcome::OreOutcome;
use crate::structure::OreStructure;
use crate::value::{OreValue, ParameterKind};

use super::literal_path;

pub const PARAM_TARGET_PATH: &str = "target_path";
pub const PARAM_NEW_NAME: &str = "new_name";

/// The path to rename does not resolve.
pub const ERR_MISSING_PATH: i32 = -5701;
/// The new name is not a valid object name.
pub const ERR_BAD_NAME: i32 = -5702;

/// Renames an object in place. The rename applies immediately after
/// preflight so downstream nodes resolve the new name.
#[derive(Clone, Debug, Default)]
pub struct RenameDataFilter;

impl RenameDataFilter {
    pub const UUID: Uuid = Uuid::from_u128(0xc47b_2085_fd6e_4a39_91d2_07c8_3ea5_b612);
}

impl OreFilter for RenameDataFilter {
    fn name(&self) -> &'static str {
        "RenameDataFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Rename Data Object"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "rename"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with(
                PARAM_TARGET_PATH,
                "Object to Rename",
                ParameterKind::Path,
                literal_path("Data"),
            )
            .with(
                PARAM_NEW_NAME,
                "New Name",
                ParameterKind::Text,
                OreValue::Text("Renamed".into()),
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
        let new_name = match args.text(PARAM_NEW_NAME) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let path = match args.path(PARAM_TARGET_PATH) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        if path.with_name(new_name.clone()).is_err() {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_BAD_NAME,
                format!("'{new_name}' is not a valid object name"),
            ));
        }
        if !structure.contains(&path) {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_MISSING_PATH,
                format!("path '{path}' does not exist"),
            ));
        }

        let mut output = OreOutputActions::new();
        output.push(RenameDataAction::new(path, new_name));
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
