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

/// Name of the shared vertex coordinate list created under the geometry.
pub const SHARED_VERTICES_NAME: &str = "SharedVertexList";
/// Name of the shared face index list created under the geometry.
pub const SHARED_FACES_NAME: &str = "SharedFaceList";

/// Creates a triangle-mesh geometry with its vertex and face attribute
/// matrices plus the shared vertex/face lists (xyz coordinates per vertex,
/// three vertex indices per face).
#[derive(Clone, Debug)]
pub struct CreateTriangleGeometryAction {
    path: OrePath,
    num_vertices: usize,
    num_faces: usize,
    vertex_data_name: String,
    face_data_name: String,
}

impl CreateTriangleGeometryAction {
    pub fn new(
        path: OrePath,
        num_vertices: usize,
        num_faces: usize,
        vertex_data_name: impl Into<String>,
        face_data_name: impl Into<String>,
    ) -> Self {
        Self {
            path,
            num_vertices,
            num_faces,
            vertex_data_name: vertex_data_name.into(),
            face_data_name: face_data_name.into(),
        }
    }

    pub fn path(&self) -> &OrePath {
        &self.path
    }
}

impl OreAction for CreateTriangleGeometryAction {
    fn apply(&self, structure: &mut OreStructure, mode: ApplyMode) -> Result<()> {
        structure.insert_at(
            &self.path,
            OreObjectKind::TriangleGeometry {
                num_vertices: self.num_vertices,
                num_faces: self.num_faces,
            },
        )?;
        structure.insert_at(
            &self.path.child(self.vertex_data_name.clone())?,
            OreObjectKind::AttributeMatrix {
                tuple_shape: vec![self.num_vertices],
            },
        )?;
        structure.insert_at(
            &self.path.child(self.face_data_name.clone())?,
            OreObjectKind::AttributeMatrix {
                tuple_shape: vec![self.num_faces],
            },
        )?;

        let vertices = match mode {
            ApplyMode::Preflight => {
                OreArray::placeholder(DataType::Float32, vec![self.num_vertices], vec![3])
            }
            ApplyMode::Execute => {
                OreArray::allocated(DataType::Float32, vec![self.num_vertices], vec![3])
            }
        };
        structure.insert_at(
            &self.path.child(SHARED_VERTICES_NAME)?,
            OreObjectKind::Array(vertices),
        )?;

        let faces = match mode {
            ApplyMode::Preflight => {
                OreArray::placeholder(DataType::UInt64, vec![self.num_faces], vec![3])
            }
            ApplyMode::Execute => {
                OreArray::allocated(DataType::UInt64, vec![self.num_faces], vec![3])
            }
        };
        structure.insert_at(
            &self.path.child(SHARED_FACES_NAME)?,
            OreObjectKind::Array(faces),
        )?;
        Ok(())
    }

    fn created_paths(&self) -> Vec<OrePath> {
        let children = [
            self.vertex_data_name.as_str(),
            self.face_data_name.as_str(),
            SHARED_VERTICES_NAME,
            SHARED_FACES_NAME,
        ];
        let mut created = vec![self.path.clone()];
        for name in children {
            if let Ok(child) = self.path.child(name) {
                created.push(child);
            }
        }
        created
    }
}
