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
use crate::actions::CreateArrayAction;
use crate::arguments::{OreArguments, OreParameters};
use crate::array::DataType;
use crate::filter::{
    OreCancel, OreFilter, OreMessenger, OrePreflightResult, OrePreflightValue,
};
use crate::outcome::OreOutcome;
use crate::structure::OreStructure;
use crate::value::{OreValue, ParameterKind};

use super::literal_path;

pub const PARAM_OUTPUT_PATH: &str = "output_path";
pub const PARAM_DATA_TYPE: &str = "data_type";
pub const PARAM_TUPLE_DIMS: &str = "tuple_dims";
pub const PARAM_COMPONENT_COUNT: &str = "component_count";

/// Component count below one.
pub const ERR_BAD_COMPONENT_COUNT: i32 = -3301;
/// Tuple dimension table malformed or non-integral.
pub const ERR_BAD_TUPLE_DIMS: i32 = -3302;
/// Choice index outside the element-type list.
pub const ERR_BAD_DATA_TYPE: i32 = -3303;
/// The parent of the requested path does not exist.
pub const ERR_MISSING_PARENT: i32 = -3304;
/// An object already exists at the requested path.
pub const ERR_PATH_COLLISION: i32 = -3305;

/// Creates a typed array with the given tuple and component shape.
#[derive(Clone, Debug, Default)]
pub struct CreateArrayFilter;

impl CreateArrayFilter {
    pub const UUID: Uuid = Uuid::from_u128(0x6704_1f7e_98c5_4c5a_b1d0_8a3f_50e2_9b13);
}

/// Reads a one-row table of non-negative integral cells as a tuple shape.
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

impl OreFilter for CreateArrayFilter {
    fn name(&self) -> &'static str {
        "CreateArrayFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Create Data Array"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "generation", "array"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with(
                PARAM_OUTPUT_PATH,
                "Created Array",
                ParameterKind::Path,
                literal_path("Data"),
            )
            .with(
                PARAM_DATA_TYPE,
                "Element Type",
                ParameterKind::Choice,
                OreValue::Choice(4),
            )
            .with(
                PARAM_TUPLE_DIMS,
                "Tuple Dimensions",
                ParameterKind::Table,
                OreValue::Table(vec![vec![1.0]]),
            )
            .with(
                PARAM_COMPONENT_COUNT,
                "Components per Tuple",
                ParameterKind::Int,
                OreValue::Int(1),
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
        // Parameter-level constraints come before any path resolution.
        let components = match args.int(PARAM_COMPONENT_COUNT) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        if components < 1 {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_BAD_COMPONENT_COUNT,
                format!("component count must be at least 1, got {components}"),
            ));
        }

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

        let type_index = match args.choice(PARAM_DATA_TYPE) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let data_type = match DataType::ALL.get(type_index) {
            Some(data_type) => *data_type,
            None => {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_BAD_DATA_TYPE,
                    format!(
                        "element type index {type_index} outside 0..{}",
                        DataType::ALL.len()
                    ),
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

        let num_tuples: usize = tuple_shape.iter().product();
        let mut output = OreOutputActions::new();
        output.push(CreateArrayAction::new(
            data_type,
            tuple_shape,
            vec![components as usize],
            path,
        ));
        OrePreflightResult::new(OreOutcome::ok(output)).with_value(OrePreflightValue::new(
            "Allocated Tuples",
            num_tuples.to_string(),
        ))
    }

    fn execute_impl(
        &self,
        _structure: &mut OreStructure,
        _args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        _cancel: &OreCancel,
    ) -> OreOutcome<()> {
        // Allocation happened when the staged action was applied.
        OreOutcome::ok(())
    }
}
