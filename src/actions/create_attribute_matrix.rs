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

/// Creates an attribute matrix: a container whose child arrays all share one
/// tuple shape. The shape itself is metadata, so both modes are identical;
/// tuple-count consistency of the children is validated by filters, not
/// here.
#[derive(Clone, Debug)]
pub struct CreateAttributeMatrixAction {
    path: OrePath,
    tuple_shape: Vec<usize>,
}

impl CreateAttributeMatrixAction {
    pub fn new(path: OrePath, tuple_shape: Vec<usize>) -> Self {
        Self { path, tuple_shape }
    }

    pub fn path(&self) -> &OrePath {
        &self.path
    }

    pub fn tuple_shape(&self) -> &[usize] {
        &self.tuple_shape
    }
}

impl OreAction for CreateAttributeMatrixAction {
    fn apply(&self, structure: &mut OreStructure, _mode: ApplyMode) -> Result<()> {
        structure.insert_at(
            &self.path,
            OreObjectKind::AttributeMatrix {
                tuple_shape: self.tuple_shape.clone(),
            },
        )?;
        Ok(())
    }

    fn created_paths(&self) -> Vec<OrePath> {
        vec![self.path.clone()]
    }
}
