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
use crate::actions::CreateAttributeMatrixAction;
use crate::arguments::{OreArguments, OreParameters};
use crate::filter::{OreCancel, OreFilter, OreMessenger, OrePreflightResult};
use crate::outcome::OreOutcome;
use crate::structure::OreStructure;
use crate::value::{OreValue, ParameterKind};

use super::literal_path;

pub const PARAM_OUTPUT_PATH: &str = "output_path";
pub const PARAM_TUPLE_DIMS: &str = "tuple_dims";

/// Tuple dimension table malformed or non-integral.
pub const ERR_BAD_TUPLE_DIMS: i32 = -3401;
/// The parent of the requested path does not exist.
pub const ERR_MISSING_PARENT: i32 = -3402;
/// An object already exists at the requested path.
pub const ERR_PATH_COLLISION: i32 = -3403;

/// Creates an attribute matrix with a fixed tuple shape.
#[derive(Clone, Debug, Default)]
pub struct CreateAttributeMatrixFilter;

impl CreateAttributeMatrixFilter {
    pub const UUID: Uuid = Uuid::from_u128(0x9d52_6e8a_0b14_4f6e_bd33_1a97_c8e0_5f24);
}

fn tuple_shape_from_table(table: &[Vec<f64>]) -> Option<Vec<usize>> {
    if table.len() != 1 || table[0].is_empty() {
        return None;
    }
    let mut shape = Vec::with_capacity(table[0].len());
    for cell in &table[0] {
        if !cell.is_finite() || *cell < 0.0 || cell.fract() != 0.0 {
            return None;
        }
        shape.push(*cell as usize);
    }
    Some(shape)
}

impl OreFilter for CreateAttributeMatrixFilter {
    fn name(&self) -> &'static str {
        "CreateAttributeMatrixFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Create Attribute Matrix"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "generation", "attribute matrix"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with(
                PARAM_OUTPUT_PATH,
                "Created Attribute Matrix",
                ParameterKind::Path,
                literal_path("Attribute Matrix"),
            )
            .with(
                PARAM_TUPLE_DIMS,
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
        structure: &OreStructure,
        args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        _cancel: &OreCancel,
    ) -> OrePreflightResult {
        let table = match args.table(PARAM_TUPLE_DIMS) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let tuple_shape = match tuple_shape_from_table(&table) {
            Some(shape) => shape,
            None => {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_BAD_TUPLE_DIMS,
                    "tuple dimensions must be one row of non-negative integers",
                ))
            }
        };

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
        output.push(CreateAttributeMatrixAction::new(path, tuple_shape));
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
