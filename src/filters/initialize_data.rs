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
use crate::arguments::{OreArguments, OreParameters};
use crate::array::DataType;
use crate::filter::{OreCancel, OreFilter, OreMessenger, OrePreflightResult};
use crate::outcome::OreOutcome;
use crate::parallel::OreRangeRunner;
use crate::structure::OreStructure;
use crate::value::{OreValue, ParameterKind};

use super::literal_path;

pub const PARAM_ARRAY_PATH: &str = "array_path";
pub const PARAM_INIT_VALUE: &str = "init_value";

/// The path does not resolve to an array.
pub const ERR_NOT_AN_ARRAY: i32 = -5901;
/// The array lost its backing store between preflight and execute.
pub const ERR_NOT_ALLOCATED: i32 = -5902;

/// Overwrites every element of an existing array with a constant.
///
/// This filter creates nothing: it reports the target as modified in place
/// and mutates it during execute only.
#[derive(Clone, Debug, Default)]
pub struct InitializeDataFilter;

impl InitializeDataFilter {
    pub const UUID: Uuid = Uuid::from_u128(0xf13c_a844_07d9_4e52_9b66_21d5_803f_6ba7);
}

impl OreFilter for InitializeDataFilter {
    fn name(&self) -> &'static str {
        "InitializeDataFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Initialize Data"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "initialize", "fill"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with(
                PARAM_ARRAY_PATH,
                "Array to Initialize",
                ParameterKind::Path,
                literal_path("Data"),
            )
            .with(
                PARAM_INIT_VALUE,
                "Initialization Value",
                ParameterKind::Float,
                OreValue::Float(0.0),
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
        if let Err(fault) = args.float(PARAM_INIT_VALUE) {
            return OrePreflightResult::new(OreOutcome::failed(vec![fault]));
        }
        let path = match args.path(PARAM_ARRAY_PATH) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        if structure.array_at(&path).is_none() {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_NOT_AN_ARRAY,
                format!("'{path}' is not an array"),
            ));
        }

        let mut output = OreOutputActions::new();
        output.push_modified(path);
        OrePreflightResult::new(OreOutcome::ok(output))
    }

    fn execute_impl(
        &self,
        structure: &mut OreStructure,
        args: &OreArguments,
        _messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OreOutcome<()> {
        let value = match args.float(PARAM_INIT_VALUE) {
            Ok(value) => value,
            Err(fault) => return OreOutcome::failed(vec![fault]),
        };
        let path = match args.path(PARAM_ARRAY_PATH) {
            Ok(path) => path,
            Err(fault) => return OreOutcome::failed(vec![fault]),
        };
        let array = match structure.array_at_mut(&path) {
            Some(array) => array,
            None => {
                return OreOutcome::fault(
                    ERR_NOT_AN_ARRAY,
                    format!("'{path}' is not an array"),
                )
            }
        };
        if !array.is_allocated() {
            return OreOutcome::fault(
                ERR_NOT_ALLOCATED,
                format!("array '{path}' has no backing store"),
            );
        }

        let runner = OreRangeRunner::new();

        macro_rules! fill_numeric {
            ($mut_fn:ident, $ty:ty) => {
                match array.$mut_fn() {
                    Some(data) => runner.run_slices(data, 1, cancel, |_, chunk| {
                        chunk.fill(value as $ty);
                    }),
                    None => false,
                }
            };
        }

        let completed = match array.data_type() {
            DataType::Int8 => fill_numeric!(as_i8_mut, i8),
            DataType::UInt8 => fill_numeric!(as_u8_mut, u8),
            DataType::Int16 => fill_numeric!(as_i16_mut, i16),
            DataType::UInt16 => fill_numeric!(as_u16_mut, u16),
            DataType::Int32 => fill_numeric!(as_i32_mut, i32),
            DataType::UInt32 => fill_numeric!(as_u32_mut, u32),
            DataType::Int64 => fill_numeric!(as_i64_mut, i64),
            DataType::UInt64 => fill_numeric!(as_u64_mut, u64),
            DataType::Float32 => fill_numeric!(as_f32_mut, f32),
            DataType::Float64 => fill_numeric!(as_f64_mut, f64),
            DataType::Boolean => match array.as_bool_mut() {
                Some(data) => runner.run_slices(data, 1, cancel, |_, chunk| {
                    chunk.fill(value != 0.0);
                }),
                None => false,
            },
        };

        if !completed {
            if cancel.is_cancelled() {
                return OreOutcome::cancelled();
            }
            return OreOutcome::fault(
                ERR_NOT_ALLOCATED,
                format!("array '{path}' store does not match its element type"),
            );
        }
        OreOutcome::ok(())
    }
}
