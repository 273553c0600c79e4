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
use crate::array::{DataType, OreArray};
use crate::errors::Result;
use crate::object::OreObjectKind;
use crate::path::OrePath;
use crate::structure::OreStructure;

/// Creates a typed array.
///
/// In preflight mode the array gets a placeholder store so downstream
/// filters can query shape and type; execute mode commits the zeroed
/// full-size buffer.
#[derive(Clone, Debug)]
pub struct CreateArrayAction {
    data_type: DataType,
    tuple_shape: Vec<usize>,
    component_shape: Vec<usize>,
    path: OrePath,
}

impl CreateArrayAction {
    pub fn new(
        data_type: DataType,
        tuple_shape: Vec<usize>,
        component_shape: Vec<usize>,
        path: OrePath,
    ) -> Self {
        Self {
            data_type,
            tuple_shape,
            component_shape,
            path,
        }
    }

    pub fn path(&self) -> &OrePath {
        &self.path
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl OreAction for CreateArrayAction {
    fn apply(&self, structure: &mut OreStructure, mode: ApplyMode) -> Result<()> {
        let array = match mode {
            ApplyMode::Preflight => OreArray::placeholder(
                self.data_type,
                self.tuple_shape.clone(),
                self.component_shape.clone(),
            ),
            ApplyMode::Execute => OreArray::allocated(
                self.data_type,
                self.tuple_shape.clone(),
                self.component_shape.clone(),
            ),
        };
        structure.insert_at(&self.path, OreObjectKind::Array(array))?;
        Ok(())
    }

    fn created_paths(&self) -> Vec<OrePath> {
        vec![self.path.clone()]
    }
}
