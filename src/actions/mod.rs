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

//! Concrete structural mutations staged by filter preflights.

pub mod copy_data;
pub mod create_array;
pub mod create_attribute_matrix;
pub mod create_group;
pub mod create_image_geometry;
pub mod create_triangle_geometry;
pub mod delete_data;
pub mod rename_data;

pub use copy_data::CopyDataAction;
pub use create_array::CreateArrayAction;
pub use create_attribute_matrix::CreateAttributeMatrixAction;
pub use create_group::CreateGroupAction;
pub use create_image_geometry::CreateImageGeometryAction;
pub use create_triangle_geometry::CreateTriangleGeometryAction;
pub use delete_data::{DeleteDataAction, DeleteKind};
pub use rename_data::RenameDataAction;
