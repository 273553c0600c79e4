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
use crate::actions::CreateImageGeometryAction;
use crate::arguments::{OreArguments, OreParameters};
use crate::filter::{
    OreCancel, OreFilter, OreMessenger, OrePreflightResult, OrePreflightValue,
};
use crate::outcome::OreOutcome;
use crate::structure::OreStructure;
use crate::value::{OreValue, ParameterKind};

use super::literal_path;

pub const PARAM_OUTPUT_PATH: &str = "output_path";
pub const PARAM_DIMENSIONS: &str = "dimensions";
pub const PARAM_SPACING: &str = "spacing";
pub const PARAM_ORIGIN: &str = "origin";
pub const PARAM_CELL_DATA_NAME: &str = "cell_data_name";

/// Dimensions not three positive integers.
pub const ERR_BAD_DIMENSIONS: i32 = -3501;
/// Spacing not three positive values.
pub const ERR_BAD_SPACING: i32 = -3502;
/// Origin not three values.
pub const ERR_BAD_ORIGIN: i32 = -3503;
/// Cell data name not a valid object name.
pub const ERR_BAD_CELL_NAME: i32 = -3504;
/// The parent of the requested path does not exist.
pub const ERR_MISSING_PARENT: i32 = -3505;
/// An object already exists at the requested path.
pub const ERR_PATH_COLLISION: i32 = -3506;

/// Creates an image geometry with its cell attribute matrix.
#[derive(Clone, Debug, Default)]
pub struct CreateImageGeometryFilter;

impl CreateImageGeometryFilter {
    pub const UUID: Uuid = Uuid::from_u128(0xa3f8_02cd_76b1_49d2_8c45_e9d0_1b6a_f035);
}

fn three_positive_ints(values: &[f64]) -> Option<[usize; 3]> {
    if values.len() != 3 {
        return None;
    }
    let mut dims = [0usize; 3];
    for (slot, value) in dims.iter_mut().zip(values) {
        if !value.is_finite() || *value < 1.0 || value.fract() != 0.0 {
            return None;
        }
        *slot = *value as usize;
    }
    Some(dims)
}

fn three_floats(values: &[f64]) -> Option<[f64; 3]> {
    if values.len() != 3 || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some([values[0], values[1], values[2]])
}

impl OreFilter for CreateImageGeometryFilter {
    fn name(&self) -> &'static str {
        "CreateImageGeometryFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Create Image Geometry"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "generation", "image geometry"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with(
                PARAM_OUTPUT_PATH,
                "Created Geometry",
                ParameterKind::Path,
                literal_path("Image Geometry"),
            )
            .with(
                PARAM_DIMENSIONS,
                "Dimensions (voxels)",
                ParameterKind::FloatVec,
                OreValue::FloatVec(vec![1.0, 1.0, 1.0]),
            )
            .with(
                PARAM_SPACING,
                "Spacing",
                ParameterKind::FloatVec,
                OreValue::FloatVec(vec![1.0, 1.0, 1.0]),
            )
            .with(
                PARAM_ORIGIN,
                "Origin",
                ParameterKind::FloatVec,
                OreValue::FloatVec(vec![0.0, 0.0, 0.0]),
            )
            .with(
                PARAM_CELL_DATA_NAME,
                "Cell Data Name",
                ParameterKind::Text,
                OreValue::Text("Cell Data".into()),
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
        let raw_dims = match args.float_vec(PARAM_DIMENSIONS) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let dims = match three_positive_ints(&raw_dims) {
            Some(dims) => dims,
            None => {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_BAD_DIMENSIONS,
                    "dimensions must be three positive integers",
                ))
            }
        };

        let raw_spacing = match args.float_vec(PARAM_SPACING) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let spacing = match three_floats(&raw_spacing) {
            Some(spacing) if spacing.iter().all(|v| *v > 0.0) => spacing,
            _ => {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_BAD_SPACING,
                    format!("spacing must be three positive values, got {raw_spacing:?}"),
                ))
            }
        };

        let raw_origin = match args.float_vec(PARAM_ORIGIN) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let origin = match three_floats(&raw_origin) {
            Some(origin) => origin,
            None => {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_BAD_ORIGIN,
                    "origin must be three values",
                ))
            }
        };

        let cell_name = match args.text(PARAM_CELL_DATA_NAME) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };

        let path = match args.path(PARAM_OUTPUT_PATH) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        if path.child(cell_name.clone()).is_err() {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_BAD_CELL_NAME,
                format!("'{cell_name}' is not a valid object name"),
            ));
        }
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

        let voxels = dims[0] * dims[1] * dims[2];
        let mut output = OreOutputActions::new();
        output.push(CreateImageGeometryAction::new(
            path, dims, spacing, origin, cell_name,
        ));
        OrePreflightResult::new(OreOutcome::ok(output)).with_value(OrePreflightValue::new(
            "Cell Count",
            voxels.to_string(),
        ))
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
