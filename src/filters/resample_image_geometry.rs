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

//! Nearest-neighbor resampling of an image geometry onto a new spacing.
//! The per-tuple copy loop runs on the range runner and polls the cancel
//! flag at chunk granularity.

use uuid::Uuid;

use crate::action::OreOutputActions;
use crate::actions::{CreateArrayAction, CreateImageGeometryAction};
use crate::arguments::{OreArguments, OreParameters};
use crate::array::DataType;
use crate::filter::{
    OreCancel, OreFilter, OreMessenger, OrePreflightResult, OrePreflightValue,
};
use crate::object::OreObjectType;
use crate::outcome::OreOutcome;
use crate::parallel::OreRangeRunner;
use crate::path::OrePath;
use crate::structure::OreStructure;
use crate::value::{OreValue, ParameterKind};

use super::literal_path;

pub const PARAM_INPUT_GEOMETRY: &str = "input_geometry";
pub const PARAM_OUTPUT_GEOMETRY: &str = "output_geometry";
pub const PARAM_SPACING: &str = "spacing";

/// Spacing not three positive values.
pub const ERR_BAD_SPACING: i32 = -11500;
/// Input path missing or not an image geometry.
pub const ERR_NOT_IMAGE_GEOMETRY: i32 = -11501;
/// An object already exists at the output path.
pub const ERR_OUTPUT_COLLISION: i32 = -11502;
/// The output path's parent does not exist.
pub const ERR_MISSING_OUTPUT_PARENT: i32 = -11503;
/// Cell arrays changed between preflight and execute.
pub const ERR_CELL_DATA_OUT_OF_STEP: i32 = -11504;

/// Resamples an image geometry and its cell arrays onto a new spacing with
/// nearest-neighbor lookups.
#[derive(Clone, Debug, Default)]
pub struct ResampleImageGeometryFilter;

impl ResampleImageGeometryFilter {
    pub const UUID: Uuid = Uuid::from_u128(0xe925_60b3_8d1f_4a78_bc04_f7a2_461e_8dc9);
}

/// The name of the first attribute matrix under `geometry`, if any.
fn cell_matrix_name(structure: &OreStructure, geometry: &OrePath) -> Option<String> {
    structure
        .children_names(geometry)
        .ok()?
        .into_iter()
        .find(|name| {
            geometry
                .child(name.clone())
                .ok()
                .and_then(|path| structure.object_type_at(&path))
                == Some(OreObjectType::AttributeMatrix)
        })
}

fn resampled_dims(dims: [usize; 3], old_spacing: [f64; 3], new_spacing: [f64; 3]) -> [usize; 3] {
    let mut out = [1usize; 3];
    for axis in 0..3 {
        let scaled = dims[axis] as f64 * old_spacing[axis] / new_spacing[axis];
        out[axis] = (scaled.round() as usize).max(1);
    }
    out
}

fn spacing_from(values: &[f64]) -> Option<[f64; 3]> {
    if values.len() != 3 || values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return None;
    }
    Some([values[0], values[1], values[2]])
}

/// Copies the nearest source tuple into every destination tuple. Returns
/// `false` when cancellation cut the sweep short.
fn resample_nearest<T: Copy + Send + Sync>(
    src: &[T],
    dst: &mut [T],
    comps: usize,
    src_dims: [usize; 3],
    dst_dims: [usize; 3],
    scale: [f64; 3],
    runner: &OreRangeRunner,
    cancel: &OreCancel,
) -> bool {
    runner.run_slices(dst, comps, cancel, |first_tuple, chunk| {
        let tuples = chunk.len() / comps;
        for t in 0..tuples {
            let dst_tuple = first_tuple + t;
            let x = dst_tuple % dst_dims[0];
            let y = (dst_tuple / dst_dims[0]) % dst_dims[1];
            let z = dst_tuple / (dst_dims[0] * dst_dims[1]);
            let sx = ((x as f64 * scale[0]) as usize).min(src_dims[0] - 1);
            let sy = ((y as f64 * scale[1]) as usize).min(src_dims[1] - 1);
            let sz = ((z as f64 * scale[2]) as usize).min(src_dims[2] - 1);
            let src_tuple = (sz * src_dims[1] + sy) * src_dims[0] + sx;
            let dst_off = t * comps;
            chunk[dst_off..dst_off + comps]
                .copy_from_slice(&src[src_tuple * comps..src_tuple * comps + comps]);
        }
    })
}

impl OreFilter for ResampleImageGeometryFilter {
    fn name(&self) -> &'static str {
        "ResampleImageGeometryFilter"
    }

    fn uuid(&self) -> Uuid {
        Self::UUID
    }

    fn human_name(&self) -> &'static str {
        "Resample Image Geometry"
    }

    fn default_tags(&self) -> Vec<&'static str> {
        vec!["core", "sampling", "image geometry", "spacing"]
    }

    fn parameters(&self) -> OreParameters {
        OreParameters::new()
            .with(
                PARAM_INPUT_GEOMETRY,
                "Geometry to Resample",
                ParameterKind::Path,
                literal_path("Image Geometry"),
            )
            .with(
                PARAM_SPACING,
                "New Spacing",
                ParameterKind::FloatVec,
                OreValue::FloatVec(vec![1.0, 1.0, 1.0]),
            )
            .with(
                PARAM_OUTPUT_GEOMETRY,
                "Resampled Geometry",
                ParameterKind::Path,
                literal_path("Resampled Geometry"),
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
        // Spacing is a parameter-level constraint, checked before any path
        // resolution.
        let raw_spacing = match args.float_vec(PARAM_SPACING) {
            Ok(value) => value,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let new_spacing = match spacing_from(&raw_spacing) {
            Some(spacing) => spacing,
            None => {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_BAD_SPACING,
                    format!("spacing must be three positive values, got {raw_spacing:?}"),
                ))
            }
        };

        let input = match args.path(PARAM_INPUT_GEOMETRY) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };
        let output = match args.path(PARAM_OUTPUT_GEOMETRY) {
            Ok(path) => path,
            Err(fault) => return OrePreflightResult::new(OreOutcome::failed(vec![fault])),
        };

        let (src_dims, src_spacing, origin) = match structure.image_geometry_at(&input) {
            Some(geometry) => geometry,
            None => {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_NOT_IMAGE_GEOMETRY,
                    format!("'{input}' is not an image geometry"),
                ))
            }
        };
        if structure.contains(&output) {
            return OrePreflightResult::new(OreOutcome::fault(
                ERR_OUTPUT_COLLISION,
                format!("an object already exists at '{output}'"),
            ));
        }
        if let Some(parent) = output.parent() {
            if !structure.contains(&parent) {
                return OrePreflightResult::new(OreOutcome::fault(
                    ERR_MISSING_OUTPUT_PARENT,
                    format!("parent path '{parent}' does not exist"),
                ));
            }
        }

        let dst_dims = resampled_dims(src_dims, src_spacing, new_spacing);
        let cell_name =
            cell_matrix_name(structure, &input).unwrap_or_else(|| "Cell Data".to_string());

        let mut output_actions = OreOutputActions::new();
        output_actions.push(CreateImageGeometryAction::new(
            output.clone(),
            dst_dims,
            new_spacing,
            origin,
            cell_name.clone(),
        ));

        // Mirror every cell array onto the resampled grid.
        if let (Ok(src_cell), Ok(dst_cell)) =
            (input.child(cell_name.clone()), output.child(cell_name))
        {
            if let Ok(names) = structure.children_names(&src_cell) {
                for name in names {
                    let array_path = match src_cell.child(name.clone()) {
                        Ok(path) => path,
                        Err(_) => continue,
                    };
                    let Some(array) = structure.array_at(&array_path) else {
                        continue;
                    };
                    let dst_path = match dst_cell.child(name) {
                        Ok(path) => path,
                        Err(_) => continue,
                    };
                    output_actions.push(CreateArrayAction::new(
                        array.data_type(),
                        vec![dst_dims[2], dst_dims[1], dst_dims[0]],
                        array.component_shape().to_vec(),
                        dst_path,
                    ));
                }
            }
        }

        OrePreflightResult::new(OreOutcome::ok(output_actions)).with_value(
            OrePreflightValue::new(
                "Resampled Dimensions",
                format!("{} x {} x {}", dst_dims[0], dst_dims[1], dst_dims[2]),
            ),
        )
    }

    fn execute_impl(
        &self,
        structure: &mut OreStructure,
        args: &OreArguments,
        messenger: &OreMessenger<'_>,
        cancel: &OreCancel,
    ) -> OreOutcome<()> {
        let input = match args.path(PARAM_INPUT_GEOMETRY) {
            Ok(path) => path,
            Err(fault) => return OreOutcome::failed(vec![fault]),
        };
        let output = match args.path(PARAM_OUTPUT_GEOMETRY) {
            Ok(path) => path,
            Err(fault) => return OreOutcome::failed(vec![fault]),
        };

        let (src_dims, src_spacing, _) = match structure.image_geometry_at(&input) {
            Some(geometry) => geometry,
            None => {
                return OreOutcome::fault(
                    ERR_NOT_IMAGE_GEOMETRY,
                    format!("'{input}' is not an image geometry"),
                )
            }
        };
        let (dst_dims, dst_spacing, _) = match structure.image_geometry_at(&output) {
            Some(geometry) => geometry,
            None => {
                return OreOutcome::fault(
                    ERR_NOT_IMAGE_GEOMETRY,
                    format!("'{output}' is not an image geometry"),
                )
            }
        };
        let scale = [
            dst_spacing[0] / src_spacing[0],
            dst_spacing[1] / src_spacing[1],
            dst_spacing[2] / src_spacing[2],
        ];

        let Some(cell_name) = cell_matrix_name(structure, &input) else {
            // Nothing to resample; the geometry itself was the whole job.
            return OreOutcome::ok(());
        };
        let (src_cell, dst_cell) = match (
            input.child(cell_name.clone()),
            output.child(cell_name),
        ) {
            (Ok(src), Ok(dst)) => (src, dst),
            _ => {
                return OreOutcome::fault(
                    ERR_CELL_DATA_OUT_OF_STEP,
                    "cell attribute matrix name is not a valid object name",
                )
            }
        };

        let names = match structure.children_names(&src_cell) {
            Ok(names) => names,
            Err(err) => return OreOutcome::fault(ERR_CELL_DATA_OUT_OF_STEP, err.to_string()),
        };
        let runner = OreRangeRunner::new();
        let total = names.len().max(1);

        for (index, name) in names.into_iter().enumerate() {
            let src_path = match src_cell.child(name.clone()) {
                Ok(path) => path,
                Err(_) => continue,
            };
            if structure.array_at(&src_path).is_none() {
                continue;
            }
            let src_array = match structure.expect_array(&src_path) {
                Ok(array) => array.clone(),
                Err(err) => {
                    return OreOutcome::fault(ERR_CELL_DATA_OUT_OF_STEP, err.to_string())
                }
            };
            let dst_path = match dst_cell.child(name.clone()) {
                Ok(path) => path,
                Err(_) => continue,
            };
            let dst_array = match structure.array_at_mut(&dst_path) {
                Some(array) => array,
                None => {
                    return OreOutcome::fault(
                        ERR_CELL_DATA_OUT_OF_STEP,
                        format!("resampled array '{dst_path}' was not staged"),
                    )
                }
            };

            messenger.progress(
                ((index * 100) / total) as u8,
                format!("resampling '{name}'"),
            );
            let comps = src_array.num_components();

            macro_rules! dispatch {
                ($(($variant:ident, $as_ref:ident, $as_mut:ident)),* $(,)?) => {
                    match src_array.data_type() {
                        $(DataType::$variant => {
                            match (src_array.$as_ref(), dst_array.$as_mut()) {
                                (Some(src), Some(dst)) => Some(resample_nearest(
                                    src, dst, comps, src_dims, dst_dims, scale,
                                    &runner, cancel,
                                )),
                                _ => None,
                            }
                        })*
                    }
                };
            }

            let completed = dispatch!(
                (Int8, as_i8, as_i8_mut),
                (UInt8, as_u8, as_u8_mut),
                (Int16, as_i16, as_i16_mut),
                (UInt16, as_u16, as_u16_mut),
                (Int32, as_i32, as_i32_mut),
                (UInt32, as_u32, as_u32_mut),
                (Int64, as_i64, as_i64_mut),
                (UInt64, as_u64, as_u64_mut),
                (Float32, as_f32, as_f32_mut),
                (Float64, as_f64, as_f64_mut),
                (Boolean, as_bool, as_bool_mut),
            );

            match completed {
                Some(true) => {}
                Some(false) => return OreOutcome::cancelled(),
                None => {
                    return OreOutcome::fault(
                        ERR_CELL_DATA_OUT_OF_STEP,
                        format!("array '{name}' store does not match its staged copy"),
                    )
                }
            }
        }

        messenger.progress(100, "resampling finished");
        OreOutcome::ok(())
    }
}
