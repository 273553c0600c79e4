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

//! # Ore Core Filters
//!
//! The engine's bundled filter set: structural creation, deletion, renames,
//! copies, and a resampling filter that exercises the parallel runner. They
//! are deliberately thin callers of the engine contract; plugins are
//! expected to look like this.

use std::collections::HashMap;

use uuid::Uuid;

use crate::filter::OreFilter;
use crate::path::OrePath;
use crate::plugin::{FilterFactory, OrePlugin};
use crate::value::OreValue;

pub mod copy_data;
pub mod create_array;
pub mod create_attribute_matrix;
pub mod create_group;
pub mod create_image_geometry;
pub mod delete_data;
pub mod initialize_data;
pub mod rename_data;
pub mod resample_image_geometry;

pub use copy_data::CopyDataFilter;
pub use create_array::CreateArrayFilter;
pub use create_attribute_matrix::CreateAttributeMatrixFilter;
pub use create_group::CreateGroupFilter;
pub use create_image_geometry::CreateImageGeometryFilter;
pub use delete_data::DeleteDataFilter;
pub use initialize_data::InitializeDataFilter;
pub use rename_data::RenameDataFilter;
pub use resample_image_geometry::ResampleImageGeometryFilter;

/// Builds the default path value for a parameter declaration. The names the
/// bundled filters declare are valid segment literals.
pub(crate) fn literal_path(name: &'static str) -> OreValue {
    OreValue::Path(
        OrePath::single(name).expect("bundled filter default paths are valid literals"),
    )
}

/// The plugin bundling the engine's own filters.
#[derive(Debug, Default)]
pub struct OreCorePlugin;

impl OreCorePlugin {
    pub const UUID: Uuid = Uuid::from_u128(0x05ab_9d12_4c01_48e7_9f3a_2b60_d1c4_77a0);

    /// Identity `DeleteDataFilter` carried before the structural-filter
    /// consolidation; kept so old pipeline documents keep loading.
    pub const LEGACY_DELETE_UUID: Uuid =
        Uuid::from_u128(0x1f0e_55c2_9a77_4d43_b1c8_6f02_94ad_3c11);
    /// Pre-consolidation identity of `CreateArrayFilter`.
    pub const LEGACY_CREATE_ARRAY_UUID: Uuid =
        Uuid::from_u128(0x2b7d_10ef_3c59_41a6_8e92_70cd_5b18_f402);
}

impl OrePlugin for OreCorePlugin {
    fn id(&self) -> Uuid {
        Self::UUID
    }

    fn name(&self) -> &str {
        "OreCore"
    }

    fn vendor(&self) -> &str {
        "Feldspar Team"
    }

    fn filters(&self) -> Vec<FilterFactory> {
        vec![
            (|| Box::new(CreateGroupFilter) as Box<dyn OreFilter>) as FilterFactory,
            || Box::new(CreateArrayFilter) as Box<dyn OreFilter>,
            || Box::new(CreateAttributeMatrixFilter) as Box<dyn OreFilter>,
            || Box::new(CreateImageGeometryFilter) as Box<dyn OreFilter>,
            || Box::new(DeleteDataFilter) as Box<dyn OreFilter>,
            || Box::new(RenameDataFilter) as Box<dyn OreFilter>,
            || Box::new(CopyDataFilter) as Box<dyn OreFilter>,
            || Box::new(InitializeDataFilter) as Box<dyn OreFilter>,
            || Box::new(ResampleImageGeometryFilter) as Box<dyn OreFilter>,
        ]
    }

    fn legacy_ids(&self) -> HashMap<Uuid, Uuid> {
        HashMap::from([
            (Self::LEGACY_DELETE_UUID, DeleteDataFilter::UUID),
            (Self::LEGACY_CREATE_ARRAY_UUID, CreateArrayFilter::UUID),
        ])
    }
}
