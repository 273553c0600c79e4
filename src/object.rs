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

//! # Ore Object Module
//!
//! Entries of the object arena. Every [`OreObject`] carries a structure-unique
//! integer id, a human name, the ids of its parents (plural: an object may be
//! shared between parents to survive the deletion of one of them), and a
//! [`OreObjectKind`] payload. Parent links are plain id back-references, never
//! owning pointers; the [`crate::structure::OreStructure`] arena owns every
//! object exclusively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::array::OreArray;

/// Structure-unique integer identity of an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminator for the object kinds a structure can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OreObjectType {
    Group,
    AttributeMatrix,
    ImageGeometry,
    TriangleGeometry,
    Array,
}

impl OreObjectType {
    pub fn name(&self) -> &'static str {
        match self {
            OreObjectType::Group => "group",
            OreObjectType::AttributeMatrix => "attribute_matrix",
            OreObjectType::ImageGeometry => "image_geometry",
            OreObjectType::TriangleGeometry => "triangle_geometry",
            OreObjectType::Array => "array",
        }
    }
}

/// Kind-specific payload of an object.
#[derive(Clone, Debug, PartialEq)]
pub enum OreObjectKind {
    /// Plain container with no geometry semantics.
    Group,
    /// Named group of sibling arrays sharing one tuple shape.
    AttributeMatrix { tuple_shape: Vec<usize> },
    /// Regular voxel grid over a spatial domain.
    ImageGeometry {
        dims: [usize; 3],
        spacing: [f64; 3],
        origin: [f64; 3],
    },
    /// Triangle mesh described by vertex and face counts.
    TriangleGeometry {
        num_vertices: usize,
        num_faces: usize,
    },
    /// Typed flat array.
    Array(OreArray),
}

impl OreObjectKind {
    pub fn object_type(&self) -> OreObjectType {
        match self {
            OreObjectKind::Group => OreObjectType::Group,
            OreObjectKind::AttributeMatrix { .. } => OreObjectType::AttributeMatrix,
            OreObjectKind::ImageGeometry { .. } => OreObjectType::ImageGeometry,
            OreObjectKind::TriangleGeometry { .. } => OreObjectType::TriangleGeometry,
            OreObjectKind::Array(_) => OreObjectType::Array,
        }
    }

    /// Arrays are leaves; every other kind may parent children.
    pub fn can_have_children(&self) -> bool {
        !matches!(self, OreObjectKind::Array(_))
    }
}

/// One entry of the object arena.
#[derive(Clone, Debug, PartialEq)]
pub struct OreObject {
    pub id: ObjectId,
    pub name: String,
    pub parents: Vec<ObjectId>,
    pub kind: OreObjectKind,
}

impl OreObject {
    pub fn object_type(&self) -> OreObjectType {
        self.kind.object_type()
    }

    /// Borrow the array payload, or `None` for non-array objects.
    pub fn as_array(&self) -> Option<&OreArray> {
        match &self.kind {
            OreObjectKind::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut OreArray> {
        match &mut self.kind {
            OreObjectKind::Array(array) => Some(array),
            _ => None,
        }
    }
}
