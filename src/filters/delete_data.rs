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
use crate::actions::{DeleteDataAction, DeleteKind};
use crate::arguments::{OreArguments, OreParameters};
use crate::filter::{OreCancel, OreFilter, OreMessenger, OrePreflightResult};
use crate::outcome::OreOutcome;
use crate::structure::OreStructure;
use crate::value::ParameterKind;

use super::literal_path;

pub const PARAM_REMOVED_PATH: &str = "removed_path";

/// The path to remove does not resolve.
pub const ERR_MISSING_PATH: i32 = -5601;

/// Removes an object, move-style: the delete is staged as a deferred action,
/// so during preflight the target stays visible to downstream nodes and the
/// removal is committed only after this node's execute succeeded.
#[derive(Clone, Debug, Default)]
pub struct DeleteDataFilter;

impl DeleteDataFilter {
    pub const UUID: Uuid = Uuid::from_u128(0xb0e6_913a_55c1_4d27_9e08_42af_d6b3_1c90);
}

impl OreFilter for DeleteDataFilter {
    fn name(&self) -> &'static str {
        "DeleteDataFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Delete Data"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "memory management", "remove"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new().with(
            PARAM_REMOVED_PATH,
            "Object to Remove",
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
        let path = match args.path(PARAM_REMOVED_PATH) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        if !structure.contains(&path) {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_MISSING_PATH,
                format!("path '{path}' does not exist"),
            ));
        }

        let mut output = OreOutputActions::new();
        output.push_deferred(DeleteDataAction::new(path, DeleteKind::JustObject));
        OrePreflightResult::new(OreOutcome::ok(output))
    }

    fn execute_impl(
        &self,
        _structure: &mut OreStructure,
        _args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        _cancel: &OreCancel,
    ) -> OreOutcome<()> {
        // The removal itself is the deferred action.
        OreOutcome::ok(())
    }
}
