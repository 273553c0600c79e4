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

use crate::action::{ApplyMode, OreAction};
use crate::errors::Result;
use crate::object::OreObjectKind;
use crate::path::OrePath;
use crate::structure::OreStructure;

/// Creates an image (regular voxel grid) geometry together with its cell
/// attribute matrix.
///
/// The cell matrix tuple shape is stored slowest-first, i.e. `[z, y, x]` for
/// dims given as `[x, y, z]`, so a flat index walks x fastest.
#[derive(Clone, Debug)]
pub struct CreateImageGeometryAction {
    path: OrePath,
    dims: [usize; 3],
    spacing: [f64; 3],
    origin: [f64; 3],
    cell_data_name: String,
}

impl CreateImageGeometryAction {
    pub fn new(
        path: OrePath,
        dims: [usize; 3],
        spacing: [f64; 3],
        origin: [f64; 3],
        cell_data_name: impl Into<String>,
    ) -> Self {
        Self {
            path,
            dims,
            spacing,
            origin,
            cell_data_name: cell_data_name.into(),
        }
    }

    pub fn path(&self) -> &OrePath {
        &self.path
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Path of the cell attribute matrix this action creates.
    pub fn cell_data_path(&self) -> Result<OrePath> {
        self.path.child(self.cell_data_name.clone())
    }
}

impl OreAction for CreateImageGeometryAction {
    fn apply(&self, structure: &mut OreStructure, _mode: ApplyMode) -> Result<()> {
        structure.insert_at(
            &self.path,
            OreObjectKind::ImageGeometry {
                dims: self.dims,
                spacing: self.spacing,
                origin: self.origin,
            },
        )?;
        let cell_path = self.cell_data_path()?;
        structure.insert_at(
            &cell_path,
            OreObjectKind::AttributeMatrix {
                tuple_shape: vec![self.dims[2], self.dims[1], self.dims[0]],
            },
        )?;
        Ok(())
    }

    fn created_paths(&self) -> Vec<OrePath> {
        let mut created = vec![self.path.clone()];
        if let Ok(cell_path) = self.cell_data_path() {
            created.push(cell_path);
        }
        created
    }
}
