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

/// Creates an empty group. Groups carry no payload, so both apply modes do
/// the same thing.
#[derive(Clone, Debug)]
pub struct CreateGroupAction {
    path: OrePath,
}

impl CreateGroupAction {
    pub fn new(path: OrePath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &OrePath {
        &self.path
    }
}

impl OreAction for CreateGroupAction {
    fn apply(&self, structure: &mut OreStructure, _mode: ApplyMode) -> Result<()> {
        structure.insert_at(&self.path, OreObjectKind::Group)?;
        Ok(())
    }

    fn created_paths(&self) -> Vec<OrePath> {
        vec![self.path.clone()]
    }
}
